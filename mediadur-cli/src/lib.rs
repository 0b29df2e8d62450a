// mediadur-cli/src/lib.rs
//
// Library portion of the mediadur CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::Cli;
pub use commands::run_tally;
pub use error::{CliErrorContext, CliResult};
