//! Progress reporting for bulk population.

use std::sync::Arc;

/// Host-side progress indicator, shown while a partition is being populated
pub trait ProgressReporter: Send + Sync {
    fn begin(&self, label: &str);
    fn end(&self, label: &str);
}

/// Reports progress as `tracing` events
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn begin(&self, label: &str) {
        tracing::info!("{}", label);
    }

    fn end(&self, label: &str) {
        tracing::debug!("done: {}", label);
    }
}

/// Label shown while a file type is populated
pub fn progress_label(title: &str) -> String {
    format!("Updating Bedrock Definitions for \"{}\"...", title)
}

/// Calls `begin` on creation and `end` on drop, whichever way the scope exits
pub struct ProgressScope {
    reporter: Arc<dyn ProgressReporter>,
    label: String,
}

impl ProgressScope {
    pub fn start(reporter: Arc<dyn ProgressReporter>, title: &str) -> Self {
        let label = progress_label(title);
        reporter.begin(&label);
        Self { reporter, label }
    }
}

impl Drop for ProgressScope {
    fn drop(&mut self) {
        self.reporter.end(&self.label);
    }
}

/// Records every begin/end call, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingProgress {
    pub events: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl RecordingProgress {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl ProgressReporter for RecordingProgress {
    fn begin(&self, label: &str) {
        self.events.lock().unwrap().push(format!("begin {}", label));
    }

    fn end(&self, label: &str) {
        self.events.lock().unwrap().push(format!("end {}", label));
    }
}
