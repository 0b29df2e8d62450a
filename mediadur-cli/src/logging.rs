// ============================================================================
// mediadur-cli/src/logging.rs
// ============================================================================
//
// LOGGING: env_logger Setup for the CLI
//
// Diagnostics from both crates go through the `log` facade and are written
// to stderr by env_logger. User-facing per-file output does not pass through
// here; it is delivered by the event handlers in output.rs.
//
// USAGE:
// - default: warnings and errors (per-file skip warnings from the aggregation
//   engine are hidden, the console handler already reports them)
// - --debug: everything at debug level
// - RUST_LOG overrides both, e.g. RUST_LOG=mediadur_core=trace
//
// AI-ASSISTANT-INFO: Logging initialisation for the CLI

use log::Level;
use std::io::Write;

const DEFAULT_FILTER: &str = "warn,mediadur_core::processing=error";
const DEBUG_FILTER: &str = "debug";

/// Initializes the global logger. Safe to call more than once.
pub fn init(debug: bool) {
    let filter = if debug { DEBUG_FILTER } else { DEFAULT_FILTER };

    let result = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format(|buf, record| {
            let level = match record.level() {
                Level::Error => "ERROR",
                Level::Warn => "WARN ",
                Level::Info => "INFO ",
                Level::Debug => "DEBUG",
                Level::Trace => "TRACE",
            };
            writeln!(buf, "{} {} {}", buf.timestamp(), level, record.args())
        })
        .try_init();

    if result.is_ok() {
        log::debug!("Logger initialized with filter: {}", filter);
    }
}
