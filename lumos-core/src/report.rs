//! User-facing output sink.
//!
//! Commands describe *what* happened through these semantic methods.
//! Implementations decide *where* it goes (terminal, test buffer).

/// Output sink for user-facing messages.
pub trait Reporter {
    /// Report a success or progress message.
    fn info(&mut self, msg: &str);

    /// Report an error message.
    fn error(&mut self, msg: &str);
}

/// Reporter that prints to stdout/stderr.
pub struct TerminalReporter;

impl TerminalReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for TerminalReporter {
    fn info(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn error(&mut self, msg: &str) {
        eprintln!("error: {}", msg);
    }
}
