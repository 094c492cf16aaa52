use std::{thread, time::Duration};

use tracing::{info, warn};

use crate::{
    error::RecorderError,
    model::{DeviceId, SensorRange},
    operator::Operator,
    reading::split_word,
    registry::{PortRegisterEntry, REG_MEAS_START_STOP, REG_RESET_COMMAND, REG_SENSOR_DATA_FIRST},
    transport::BusTransport,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    RangeConfigured,
    Heating,
    AwaitingConfirm,
    Measuring,
    DataCaptured,
    Deinitialized,
    Reset,
    Aborted,
}

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub range: SensorRange,
    /// Heat-soak cycles; each sleeps `heat_interval` then pings the device.
    pub heat_cycles: u32,
    pub heat_interval: Duration,
    /// Pause between starting the measurement and the first data read.
    pub settle_delay: Duration,
    /// Consecutive 32-bit words read from the data register block.
    pub data_words: u16,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            range: SensorRange::Range1,
            heat_cycles: 6,
            heat_interval: Duration::from_secs(9),
            settle_delay: Duration::from_secs(9),
            data_words: 3,
        }
    }
}

/// One arm/heat/measure/read cycle against a resolved sensor port.
///
/// The linear state progression mirrors the physical constraint that the
/// sensing element must be hot before it is measured, with a manual
/// checkpoint where the operator verifies the heat by touch.
pub struct SensorSession<'a, T: BusTransport> {
    bus: &'a mut T,
    device: DeviceId,
    port: PortRegisterEntry,
    cfg: SessionConfig,
    state: SessionState,
}

impl<'a, T: BusTransport> SensorSession<'a, T> {
    pub fn new(bus: &'a mut T, device: DeviceId, port: PortRegisterEntry, cfg: SessionConfig) -> Self {
        Self { bus, device, port, cfg, state: SessionState::Idle }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Drive the session from `Idle` through `DataCaptured` and return the
    /// decoded reading pairs. On any fatal transaction failure the session
    /// ends in `Aborted` and no partial data is reported.
    pub fn run<O: Operator>(&mut self, operator: &mut O) -> Result<Vec<(u16, u16)>, RecorderError> {
        self.configure_range()?;
        self.heat_soak();
        self.await_confirmation(operator)?;
        self.start_measurement()?;
        self.capture()
    }

    pub fn configure_range(&mut self) -> Result<(), RecorderError> {
        let mask = self.cfg.range.mask();
        info!(
            "selecting range {mask:#06b} via register {} on {}",
            self.port.range_select_register, self.port.name
        );
        let txn = self
            .bus
            .write_u16(self.device, self.port.range_select_register, mask)
            .map_err(|e| self.abort(e))?;
        if !txn.is_success() {
            return Err(self.abort(RecorderError::Communication(txn.status)));
        }
        self.state = SessionState::RangeConfigured;
        Ok(())
    }

    /// Bounded warm-up wait. The interleaved pings only keep the bus session
    /// alive and give progress feedback; their failures are not fatal.
    pub fn heat_soak(&mut self) {
        self.state = SessionState::Heating;
        info!("heating sensor to operating temperature");
        for cycle in 1..=self.cfg.heat_cycles {
            thread::sleep(self.cfg.heat_interval);
            match self.bus.ping(self.device) {
                Ok(txn) if txn.is_success() => {}
                Ok(txn) => warn!("liveness ping failed: {:?}", txn.status),
                Err(e) => warn!("liveness ping failed: {e}"),
            }
            info!(
                "heat soak: {}s elapsed",
                u64::from(cycle) * self.cfg.heat_interval.as_secs()
            );
        }
    }

    /// Safety checkpoint: wait indefinitely for the operator to confirm the
    /// sensor is hot.
    pub fn await_confirmation<O: Operator>(&mut self, operator: &mut O) -> Result<(), RecorderError> {
        self.state = SessionState::AwaitingConfirm;
        operator.acknowledge("Sensor hot. Please touch the sensor and press Enter to continue...")?;
        info!("resuming data collection from the sensor");
        Ok(())
    }

    pub fn start_measurement(&mut self) -> Result<(), RecorderError> {
        let txn = self
            .bus
            .write_u8(self.device, REG_MEAS_START_STOP, 1)
            .map_err(|e| self.abort(e))?;
        if !txn.is_success() {
            warn!("error starting measurement: {:?}", txn.status);
            return Err(self.abort(RecorderError::Communication(txn.status)));
        }
        info!("measurement started");
        self.state = SessionState::Measuring;
        Ok(())
    }

    /// Read the fixed block of data words and decode them. Any failure on
    /// any word discards the whole batch.
    pub fn capture(&mut self) -> Result<Vec<(u16, u16)>, RecorderError> {
        thread::sleep(self.cfg.settle_delay);
        let mut pairs = Vec::with_capacity(usize::from(self.cfg.data_words));
        for i in 0..self.cfg.data_words {
            let address = REG_SENSOR_DATA_FIRST + i * 4;
            let txn = self
                .bus
                .read_u32(self.device, address)
                .map_err(|e| self.abort(e))?;
            if !txn.is_success() {
                return Err(self.abort(RecorderError::Communication(txn.status)));
            }
            if let Some(fault) = txn.fault {
                return Err(self.abort(RecorderError::Device(fault)));
            }
            let word = match txn.value {
                Some(word) => word,
                None => return Err(self.abort(RecorderError::Communication(txn.status))),
            };
            info!("data register {address}: {word:#010x}");
            pairs.push(split_word(word));
        }
        self.state = SessionState::DataCaptured;
        Ok(pairs)
    }

    /// Idempotent measurement stop; best-effort, failures only logged.
    pub fn deinitialize(&mut self) {
        info!("deinitializing measurement sensor");
        match self.bus.write_u16(self.device, REG_MEAS_START_STOP, 0) {
            Ok(txn) if txn.is_success() => {}
            Ok(txn) => warn!("error stopping measurement: {:?}", txn.status),
            Err(e) => warn!("error stopping measurement: {e}"),
        }
        self.state = SessionState::Deinitialized;
    }

    /// Command a device reset; reports whether the device accepted it.
    pub fn reset(&mut self) -> bool {
        let accepted = matches!(
            self.bus.write_u8(self.device, REG_RESET_COMMAND, 1),
            Ok(txn) if txn.is_success()
        );
        if accepted {
            self.state = SessionState::Reset;
        } else {
            warn!("recorder reset was not accepted");
        }
        accepted
    }

    fn abort(&mut self, error: RecorderError) -> RecorderError {
        self.state = SessionState::Aborted;
        error
    }
}
