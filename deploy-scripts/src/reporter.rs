//! Operator-facing progress output

use colored::Colorize;
use tracing::debug;

/// A sink for the progress messages emitted during a deployment
pub trait Reporter: Send + Sync {
    /// Report progress or a result
    fn info(&self, msg: &str);
    /// Report a recoverable problem
    fn warn(&self, msg: &str);
    /// Report a fatal error
    fn error(&self, msg: &str);
}

/// Writes colorized messages to the terminal.
///
/// Info is green, warnings and errors are red; errors go to stderr.
/// Coloring is disabled when `NO_COLOR` is set.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn info(&self, msg: &str) {
        debug!(target: "report", "{msg}");
        println!("{}", msg.green());
    }

    fn warn(&self, msg: &str) {
        debug!(target: "report", "{msg}");
        println!("{}", msg.red());
    }

    fn error(&self, msg: &str) {
        debug!(target: "report", "{msg}");
        eprintln!("{}", msg.red());
    }
}
