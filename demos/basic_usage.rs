//! Basic logger usage example
//!
//! Logs at every level to the console (and to syslog when a local syslog
//! daemon is reachable), with the minimum level raised to INFO.
//!
//! Run with: cargo run --example basic_usage

use leveled_logger::prelude::*;
use leveled_logger::{crit, debug, error, info, warn};

fn main() -> Result<()> {
    // syslog records usually end up in /var/log/messages or the journal
    let logger = match Logger::builder().syslog("exampleLogger").stdlog().build() {
        Ok(logger) => logger,
        Err(LoggerError::SinkUnavailable { message, .. }) => {
            eprintln!("syslog unavailable ({}), console only", message);
            Logger::init(LogConfig::stdlog())?
        }
        Err(e) => return Err(e),
    };
    logger.set_level(LogLevel::Info);

    debug!(logger, "This is for Debugging");
    info!(logger, "This is for Infoing");
    warn!(logger, "This is a Warning");
    error!(logger, "This is for Erroring");
    crit!(logger, "This is for Critting");

    match logger.close_syslog() {
        Ok(()) | Err(LoggerError::SinkUnavailable { .. }) => {}
        Err(e) => return Err(e),
    }

    Ok(())
}
