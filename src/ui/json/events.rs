//! Event types for `--json` output.

use serde::Serialize;

use appbuild::application::BuildSummary;
use appbuild::config::ConfigWarning;
use appbuild::StageResult;

/// A stage began.
#[derive(Debug, Clone, Serialize)]
pub struct StageStartedEvent<'a> {
    pub event: &'static str,
    pub header: &'a str,
}

impl<'a> StageStartedEvent<'a> {
    pub fn new(header: &'a str) -> Self {
        Self {
            event: "stage_started",
            header,
        }
    }
}

/// A stage ended. `message` is present only in verbose mode.
#[derive(Debug, Clone, Serialize)]
pub struct StageFinishedEvent<'a> {
    pub event: &'static str,
    pub header: &'a str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

impl<'a> StageFinishedEvent<'a> {
    pub fn new(header: &'a str, result: &'a StageResult, verbose: bool) -> Self {
        let failure = result.failure_ref();
        Self {
            event: "stage_finished",
            header,
            success: failure.is_none(),
            kind: failure.map(|f| f.kind.as_str()),
            message: failure
                .filter(|_| verbose)
                .map(|f| f.message.as_str()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WarningEvent<'a> {
    pub event: &'static str,
    pub message: &'a str,
}

impl<'a> WarningEvent<'a> {
    pub fn new(message: &'a str) -> Self {
        Self {
            event: "warning",
            message,
        }
    }
}

/// Unknown key in the project file.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigWarningEvent {
    pub event: &'static str,
    pub key: String,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl From<&ConfigWarning> for ConfigWarningEvent {
    fn from(warning: &ConfigWarning) -> Self {
        Self {
            event: "config_warning",
            key: warning.key.clone(),
            file: warning.file.display().to_string(),
            line: warning.line,
            suggestion: warning.suggestion.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AppEntry<'a> {
    pub name: &'a str,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'a str>,
}

/// Closing event of a run.
#[derive(Debug, Clone, Serialize)]
pub struct SummaryEvent<'a> {
    pub event: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<&'a str>,
    pub total: usize,
    pub failed: usize,
    pub success: bool,
    pub apps: Vec<AppEntry<'a>>,
}

impl<'a> SummaryEvent<'a> {
    pub fn new(summary: &'a BuildSummary) -> Self {
        Self {
            event: "summary",
            finished_at: summary.finished_at(),
            total: summary.total(),
            failed: summary.failed(),
            success: summary.all_succeeded(),
            apps: summary
                .entries()
                .iter()
                .map(|entry| AppEntry {
                    name: &entry.app,
                    success: entry.success,
                    message: entry.message.as_deref(),
                })
                .collect(),
        }
    }
}
