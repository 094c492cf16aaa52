use tracing::{info, warn};

use crate::{
    error::RecorderError,
    model::DeviceId,
    registry,
    transport::BusTransport,
    transport_dynamixel::DynamixelTransport,
};

#[derive(Debug, Clone)]
pub struct LocatorConfig {
    /// Only endpoints whose name starts with this prefix are tried.
    pub device_prefix: String,
    pub baud_rate: u32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            device_prefix: "/dev/cu.usbserial".to_string(),
            baud_rate: registry::BAUD_RATE,
        }
    }
}

/// Enumerate serial endpoints matching the prefix, in lexicographic order.
pub fn candidate_ports(prefix: &str) -> Result<Vec<String>, RecorderError> {
    let mut names: Vec<String> = serialport::available_ports()?
        .into_iter()
        .map(|p| p.port_name)
        .filter(|name| name.starts_with(prefix))
        .collect();
    names.sort();
    Ok(names)
}

/// Walk the candidate endpoints, open each and ping the device. The first
/// endpoint whose ping succeeds wins and its open handle is returned; every
/// other handle is dropped, which closes the port.
pub fn locate_with<T, F>(
    candidates: &[String],
    device: DeviceId,
    mut open: F,
) -> Result<T, RecorderError>
where
    T: BusTransport,
    F: FnMut(&str) -> Result<T, RecorderError>,
{
    for name in candidates {
        info!("trying port {name}");
        let mut bus = match open(name) {
            Ok(bus) => bus,
            Err(e) => {
                warn!("could not open {name}: {e}");
                continue;
            }
        };
        match bus.ping(device) {
            Ok(txn) if txn.is_success() => {
                info!("device {} found on {name}", device.0);
                return Ok(bus);
            }
            Ok(txn) => info!("no device on {name}: {:?}", txn.status),
            Err(e) => warn!("ping failed on {name}: {e}"),
        }
    }
    Err(RecorderError::DeviceNotFound)
}

/// Locate the recorder on the machine's serial ports.
pub fn locate(cfg: &LocatorConfig, device: DeviceId) -> Result<DynamixelTransport, RecorderError> {
    let candidates = candidate_ports(&cfg.device_prefix)?;
    locate_with(&candidates, device, |name| {
        DynamixelTransport::open(name, cfg.baud_rate)
    })
}
