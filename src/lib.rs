pub mod error;
pub mod locator;
pub mod model;
pub mod operator;
pub mod reading;
pub mod registry;
pub mod resolver;
pub mod session;
pub mod sink;
pub mod transport;
pub mod transport_dynamixel;

pub use error::RecorderError;
pub use locator::{candidate_ports, locate, locate_with, LocatorConfig};
pub use model::{CommStatus, DeviceFault, DeviceId, SensorRange, Transaction};
pub use operator::{ConsoleOperator, Operator};
pub use registry::{port_registry, PortRegisterEntry};
pub use resolver::{resolve, SCAN_SETTLE};
pub use session::{SensorSession, SessionConfig, SessionState};
pub use sink::MeasurementLog;
pub use transport::BusTransport;
pub use transport_dynamixel::DynamixelTransport;
