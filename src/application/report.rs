//! Report aggregator
//!
//! Collects the outcome of every application built in one invocation and
//! derives the process exit status from them.

use chrono::Local;

use super::pipeline::PipelineOutcome;

/// One line of the final summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppReport {
    pub app: String,
    pub success: bool,
    /// First failure message, kept only in verbose mode
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildSummary {
    entries: Vec<AppReport>,
    finished_at: Option<String>,
}

impl BuildSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: &PipelineOutcome, verbose: bool) {
        self.push_report(AppReport {
            app: outcome.app.clone(),
            success: outcome.success(),
            message: outcome.message(verbose).map(str::to_string),
        });
    }

    pub fn push_report(&mut self, report: AppReport) {
        self.entries.push(report);
    }

    /// Stamp the summary with the wall-clock time (`HH:MM:SS`)
    pub fn finish(&mut self) {
        self.finish_at(Local::now().format("%H:%M:%S").to_string());
    }

    pub fn finish_at(&mut self, time: impl Into<String>) {
        self.finished_at = Some(time.into());
    }

    pub fn finished_at(&self) -> Option<&str> {
        self.finished_at.as_deref()
    }

    pub fn entries(&self) -> &[AppReport] {
        &self.entries
    }

    pub fn total(&self) -> usize {
        self.entries.len()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|entry| !entry.success).count()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// 0 when every application built, 1 otherwise
    pub fn exit_code(&self) -> i32 {
        if self.all_succeeded() {
            0
        } else {
            1
        }
    }
}
