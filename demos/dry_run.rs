use std::{collections::HashMap, time::Duration};

use gas_sensor_recorder::{
    locate_with, port_registry, resolve, BusTransport, CommStatus, DeviceId, MeasurementLog,
    Operator, RecorderError, SensorSession, SessionConfig, Transaction,
};

/// In-memory recorder with an ethanol sensor plugged into Port2.
struct DemoBus {
    registers: HashMap<u16, u32>,
}

impl DemoBus {
    fn new() -> Self {
        let mut registers = HashMap::new();
        registers.insert(51, 99);
        registers.insert(55, 46);
        registers.insert(85, 0x0002_0001);
        registers.insert(89, 0x0004_0003);
        registers.insert(93, 0x0006_0005);
        Self { registers }
    }
}

impl BusTransport for DemoBus {
    fn ping(&mut self, _id: DeviceId) -> Result<Transaction<()>, RecorderError> {
        Ok(Transaction::success(()))
    }

    fn read_u16(&mut self, _id: DeviceId, address: u16) -> Result<Transaction<u16>, RecorderError> {
        let value = self.registers.get(&address).map(|&v| v as u16).unwrap_or(0);
        Ok(Transaction::success(value))
    }

    fn read_u32(&mut self, _id: DeviceId, address: u16) -> Result<Transaction<u32>, RecorderError> {
        let value = self.registers.get(&address).copied().unwrap_or(0);
        Ok(Transaction::success(value))
    }

    fn write_u8(
        &mut self,
        _id: DeviceId,
        address: u16,
        value: u8,
    ) -> Result<Transaction<()>, RecorderError> {
        self.registers.insert(address, u32::from(value));
        Ok(Transaction::success(()))
    }

    fn write_u16(
        &mut self,
        _id: DeviceId,
        address: u16,
        value: u16,
    ) -> Result<Transaction<()>, RecorderError> {
        self.registers.insert(address, u32::from(value));
        Ok(Transaction::success(()))
    }
}

struct AutoOperator;

impl Operator for AutoOperator {
    fn acknowledge(&mut self, prompt: &str) -> Result<(), RecorderError> {
        println!("[auto-ack] {prompt}");
        Ok(())
    }

    fn continue_or_abort(&mut self, _prompt: &str) -> Result<bool, RecorderError> {
        Ok(false)
    }
}

fn main() -> anyhow::Result<()> {
    let device = DeviceId(171);
    let candidates = vec!["demo0".to_string(), "demo1".to_string()];

    let mut bus = locate_with(&candidates, device, |name| {
        if name == "demo1" {
            Ok(DemoBus::new())
        } else {
            Err(RecorderError::Communication(CommStatus::RxTimeout))
        }
    })?;

    let registry = port_registry(true);
    let port = resolve(&mut bus, device, 46, &registry, Duration::ZERO)?;
    println!("sensor found on {}", port.name);

    let cfg = SessionConfig {
        heat_cycles: 2,
        heat_interval: Duration::from_millis(10),
        settle_delay: Duration::from_millis(10),
        ..SessionConfig::default()
    };
    let mut session = SensorSession::new(&mut bus, device, port, cfg);
    let mut operator = AutoOperator;
    let pairs = session.run(&mut operator)?;
    println!("captured pairs: {pairs:?}");

    let dir = std::env::temp_dir();
    let log = MeasurementLog::new(dir.join("dry_run_results.txt"));
    log.append(&pairs)?;
    println!("log written to {} (verified: {})", log.path().display(), log.verify());

    session.deinitialize();
    let reset_ok = session.reset();
    println!("reset accepted: {reset_ok}, final state: {:?}", session.state());
    Ok(())
}
