//! Register map of the recorder device. Addresses must stay bit-exact
//! against the device firmware.

use crate::model::DeviceId;

pub const RECORDER_DEVICE_ID: DeviceId = DeviceId(171);
pub const BAUD_RATE: u32 = 115_200;

pub const REG_RESET_COMMAND: u16 = 23;
pub const REG_MEAS_START_STOP: u16 = 24;
pub const REG_TEMP_PORT_ID: u16 = 25;

pub const REG_SENSORS_STATUS: u16 = 83;
pub const REG_SENSOR_DATA_FIRST: u16 = 85;
pub const REG_SENSOR_DATA_LAST: u16 = 124;
pub const REG_UPD_COMMAND: u16 = 125;

/// Id reported by an ethanol sensor module in a port's id register.
pub const ETHANOL_SENSOR_ID: u16 = 46;

/// One physical sensor port and its pair of registers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortRegisterEntry {
    pub name: &'static str,
    pub sensor_id_register: u16,
    pub range_select_register: u16,
}

const PRIMARY_PORTS: [PortRegisterEntry; 4] = [
    PortRegisterEntry { name: "Port1", sensor_id_register: 51, range_select_register: 53 },
    PortRegisterEntry { name: "Port2", sensor_id_register: 55, range_select_register: 57 },
    PortRegisterEntry { name: "Port3", sensor_id_register: 59, range_select_register: 61 },
    PortRegisterEntry { name: "Port4", sensor_id_register: 63, range_select_register: 65 },
];

const SECONDARY_PORTS: [PortRegisterEntry; 4] = [
    PortRegisterEntry { name: "Port1S", sensor_id_register: 67, range_select_register: 69 },
    PortRegisterEntry { name: "Port2S", sensor_id_register: 71, range_select_register: 73 },
    PortRegisterEntry { name: "Port3S", sensor_id_register: 75, range_select_register: 77 },
    PortRegisterEntry { name: "Port4S", sensor_id_register: 79, range_select_register: 81 },
];

/// The fixed scan table, in scan order. The secondary "S" variants are a
/// configuration choice; hardware revisions without them scan only the
/// primary four.
pub fn port_registry(include_secondary: bool) -> Vec<PortRegisterEntry> {
    let mut entries = PRIMARY_PORTS.to_vec();
    if include_secondary {
        entries.extend_from_slice(&SECONDARY_PORTS);
    }
    entries
}
