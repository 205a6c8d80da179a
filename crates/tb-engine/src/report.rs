//! Result reporting.

/// Receives every top-level evaluation and its result.
pub trait Reporter {
    /// Called once per successful top-level evaluation.
    fn report(&mut self, original: &str, result: &str);
}

impl<F> Reporter for F
where
    F: FnMut(&str, &str),
{
    fn report(&mut self, original: &str, result: &str) {
        self(original, result);
    }
}

/// Reports through the `log` facade at info level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn report(&mut self, original: &str, result: &str) {
        log::info!("{original} => {result}");
    }
}
