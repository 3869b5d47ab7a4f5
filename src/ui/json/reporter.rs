use std::io::{self, Write};
use std::sync::Mutex;

use appbuild::{Reporter, StageResult};
use tracing::warn;

use super::events::{StageFinishedEvent, StageStartedEvent, WarningEvent};
use super::write_typed_event;

/// Reporter that writes NDJSON events instead of drawing a status line
pub struct JsonReporter<W: Write + Send> {
    out: Mutex<W>,
    verbose: bool,
}

impl JsonReporter<io::Stdout> {
    pub fn stdout(verbose: bool) -> Self {
        Self::new(io::stdout(), verbose)
    }
}

impl<W: Write + Send> JsonReporter<W> {
    pub fn new(out: W, verbose: bool) -> Self {
        Self {
            out: Mutex::new(out),
            verbose,
        }
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        match self.out.into_inner() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn write<T: serde::Serialize>(&self, event: &T) {
        let mut out = match self.out.lock() {
            Ok(out) => out,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Err(err) = write_typed_event(&mut *out, event) {
            warn!(error = %err, "failed to write json event");
        }
    }
}

impl<W: Write + Send> Reporter for JsonReporter<W> {
    fn start(&self, header: &str) {
        self.write(&StageStartedEvent::new(header));
    }

    fn stop(&self, header: &str, result: &StageResult) {
        self.write(&StageFinishedEvent::new(header, result, self.verbose));
    }

    fn warn(&self, message: &str) {
        self.write(&WarningEvent::new(message));
    }
}
