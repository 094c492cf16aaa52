use std::{thread, time::Duration};

use tracing::{info, warn};

use crate::{
    error::RecorderError,
    model::DeviceId,
    registry::PortRegisterEntry,
    transport::BusTransport,
};

/// Settling pause before the registry scan starts. The hardware needs a
/// moment after connection before its port registers read back reliably.
pub const SCAN_SETTLE: Duration = Duration::from_secs(1);

/// Walk the port registry in table order and return the first entry whose
/// id register reads back `target_sensor_id`.
///
/// A non-success status on a read skips that entry; a device fault on an
/// otherwise successful read is logged but the returned value (when the
/// transport delivered one) is still compared. Transport loss aborts the
/// scan.
pub fn resolve<T: BusTransport>(
    bus: &mut T,
    device: DeviceId,
    target_sensor_id: u16,
    registry: &[PortRegisterEntry],
    settle: Duration,
) -> Result<PortRegisterEntry, RecorderError> {
    info!("checking where sensor {target_sensor_id} is connected");
    thread::sleep(settle);

    for entry in registry {
        let txn = bus.read_u16(device, entry.sensor_id_register)?;

        if !txn.is_success() {
            warn!(
                "communication error on register {} ({}): {:?}",
                entry.sensor_id_register, entry.name, txn.status
            );
            continue;
        }
        if let Some(fault) = txn.fault {
            warn!(
                "device fault on register {} ({}): {:?}",
                entry.sensor_id_register, entry.name, fault
            );
        }

        if txn.value == Some(target_sensor_id) {
            info!("sensor {target_sensor_id} found on {}", entry.name);
            return Ok(*entry);
        }
        if let Some(id) = txn.value {
            info!("{} reports sensor id {id}", entry.name);
        }
    }

    warn!("sensor {target_sensor_id} not found on any port");
    Err(RecorderError::SensorNotFound(target_sensor_id))
}
