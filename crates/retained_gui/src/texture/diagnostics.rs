//! Where texture loading failures are reported

/// Receives human-readable failure reports
pub trait DiagnosticSink {
    /// Report a failure
    fn report(&mut self, message: &str);
}

/// Writes reports through the `log` facade
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, message: &str) {
        log::error!("{message}");
    }
}

impl<F: FnMut(&str)> DiagnosticSink for F {
    fn report(&mut self, message: &str) {
        self(message);
    }
}
