//! Reporter port - the single live status line of a run
//!
//! The caller owns the reporter and injects it into the pipeline. One stage is
//! reported at a time: `start`, any number of `update`s, then `stop`.

use crate::domain::entities::StageResult;

pub trait Reporter: Send + Sync {
    /// A stage begins; `header` is shown while it runs
    fn start(&self, header: &str);

    /// Replace the running message without finishing the stage
    fn update(&self, _message: &str) {}

    /// The stage finished; render its final line
    fn stop(&self, header: &str, result: &StageResult);

    /// Non-fatal problem worth telling the user about
    fn warn(&self, message: &str);
}

/// Silent reporter for library use and tests
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn start(&self, _header: &str) {}

    fn stop(&self, _header: &str, _result: &StageResult) {}

    fn warn(&self, _message: &str) {}
}
