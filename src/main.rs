use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use gas_sensor_recorder::{
    locator::{self, LocatorConfig},
    operator::{ConsoleOperator, Operator},
    registry::{self, RECORDER_DEVICE_ID},
    resolver::{self, SCAN_SETTLE},
    session::{SensorSession, SessionConfig},
    sink::MeasurementLog,
    RecorderError,
};

const LOG_FILE: &str = "results_term_compens.txt";
const MAX_RUNS: u32 = 3;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut operator = ConsoleOperator::new();

    for run in 1..=MAX_RUNS {
        info!("measurement run {run}/{MAX_RUNS}");
        if let Err(e) = run_once(&mut operator) {
            error!("run {run} failed: {e}");
        }

        let keep_going = operator
            .continue_or_abort("If a mistake occurred, enter 'e' to exit, or press Enter to continue: ")?;
        if !keep_going {
            info!("exiting at operator request");
            return Ok(());
        }
    }

    Ok(())
}

/// One full pipeline repetition. The bus handle is re-acquired here and
/// dropped on return, so repetitions share no state except the log file.
fn run_once(operator: &mut ConsoleOperator) -> Result<(), RecorderError> {
    let mut bus = locator::locate(&LocatorConfig::default(), RECORDER_DEVICE_ID)?;

    let ports = registry::port_registry(true);
    let port = resolver::resolve(
        &mut bus,
        RECORDER_DEVICE_ID,
        registry::ETHANOL_SENSOR_ID,
        &ports,
        SCAN_SETTLE,
    )?;

    let mut session = SensorSession::new(&mut bus, RECORDER_DEVICE_ID, port, SessionConfig::default());
    let pairs = session.run(operator)?;
    info!("captured {} reading pairs", pairs.len());

    let log = MeasurementLog::new(LOG_FILE);
    log.append(&pairs)?;
    info!("data written to {}", log.path().display());

    if !log.verify() {
        error!("data write verification failed, stopping measurements");
        return Err(RecorderError::WriteVerification);
    }
    info!("data successfully written, measurements can continue");

    session.deinitialize();
    if !session.reset() {
        info!("device reset not confirmed");
    }
    Ok(())
}
