use crate::{
    error::RecorderError,
    model::{DeviceId, Transaction},
};

/// Request/response operations against a device on the bus.
///
/// Every method reports the per-transaction communication status and any
/// device fault through [`Transaction`]; `Err` is reserved for transport
/// failures that make the bus itself unusable (port gone, framing broken).
pub trait BusTransport {
    fn ping(&mut self, id: DeviceId) -> Result<Transaction<()>, RecorderError>;
    fn read_u16(&mut self, id: DeviceId, address: u16) -> Result<Transaction<u16>, RecorderError>;
    fn read_u32(&mut self, id: DeviceId, address: u16) -> Result<Transaction<u32>, RecorderError>;
    fn write_u8(
        &mut self,
        id: DeviceId,
        address: u16,
        value: u8,
    ) -> Result<Transaction<()>, RecorderError>;
    fn write_u16(
        &mut self,
        id: DeviceId,
        address: u16,
        value: u16,
    ) -> Result<Transaction<()>, RecorderError>;
}
