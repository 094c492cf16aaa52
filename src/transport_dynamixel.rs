use std::io::ErrorKind;

use dynamixel2::{Bus, ReadError, Response, TransferError};

use crate::{
    error::RecorderError,
    model::{CommStatus, DeviceFault, DeviceId, Transaction},
    transport::BusTransport,
};

/// Alert bit of the protocol status byte. The status packet only tells us
/// that a hardware alert is pending, not which one.
const ALERT_FLAG: u8 = 0x80;

/// Bus client backed by the Dynamixel Protocol 2.0 SDK.
pub struct DynamixelTransport {
    bus: Bus<Vec<u8>, Vec<u8>>,
}

impl DynamixelTransport {
    pub fn open(serial_port: &str, baudrate: u32) -> Result<Self, RecorderError> {
        let bus = Bus::open(serial_port, baudrate)
            .map_err(|e| RecorderError::Transport(e.to_string()))?;
        Ok(Self { bus })
    }
}

impl BusTransport for DynamixelTransport {
    fn ping(&mut self, id: DeviceId) -> Result<Transaction<()>, RecorderError> {
        complete(self.bus.ping(id.0)).map(|t| t.map(|_| ()))
    }

    fn read_u16(&mut self, id: DeviceId, address: u16) -> Result<Transaction<u16>, RecorderError> {
        complete(self.bus.read_u16(id.0, address))
    }

    fn read_u32(&mut self, id: DeviceId, address: u16) -> Result<Transaction<u32>, RecorderError> {
        complete(self.bus.read_u32(id.0, address))
    }

    fn write_u8(
        &mut self,
        id: DeviceId,
        address: u16,
        value: u8,
    ) -> Result<Transaction<()>, RecorderError> {
        complete(self.bus.write_u8(id.0, address, value))
    }

    fn write_u16(
        &mut self,
        id: DeviceId,
        address: u16,
        value: u16,
    ) -> Result<Transaction<()>, RecorderError> {
        complete(self.bus.write_u16(id.0, address, value))
    }
}

/// Collapse an SDK transfer outcome into a [`Transaction`].
///
/// Status-packet errors and recoverable receive failures become transaction
/// statuses so callers can apply their skip/abort policy; everything else is
/// a transport error.
fn complete<T>(
    result: Result<Response<T>, TransferError>,
) -> Result<Transaction<T>, RecorderError> {
    match result {
        Ok(response) => {
            let fault = response
                .alert
                .then_some(DeviceFault::Unknown(ALERT_FLAG));
            Ok(Transaction {
                status: CommStatus::Success,
                fault,
                value: Some(response.data),
            })
        }
        // The device processed the request but flagged an error in the
        // status packet; the SDK does not hand back a payload in this case.
        Err(TransferError::ReadError(ReadError::MotorError(e))) => {
            Ok(Transaction::faulted(DeviceFault::from_code(e.raw & !ALERT_FLAG)))
        }
        Err(TransferError::ReadError(ReadError::Io(e))) if e.kind() == ErrorKind::TimedOut => {
            Ok(Transaction::failed(CommStatus::RxTimeout))
        }
        // Corrupt frames (bad checksum, malformed header) count as CRC-class
        // receive failures.
        Err(TransferError::ReadError(ReadError::InvalidMessage(_))) => {
            Ok(Transaction::failed(CommStatus::CrcError))
        }
        Err(other) => Err(RecorderError::Transport(other.to_string())),
    }
}
