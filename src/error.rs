use thiserror::Error;

use crate::model::{CommStatus, DeviceFault};

#[derive(Debug, Error)]
pub enum RecorderError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("bus communication failed: {0:?}")]
    Communication(CommStatus),
    #[error("device fault: {0:?}")]
    Device(DeviceFault),
    #[error("no device answered on any candidate port")]
    DeviceNotFound,
    #[error("sensor {0} not found on any port")]
    SensorNotFound(u16),
    #[error("log sentinel missing after append")]
    WriteVerification,
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
