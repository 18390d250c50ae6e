//! Status reporting for long-running remote operations
//!
//! Remote operations report their lifecycle through the [`StatusReporter`]
//! trait so the CLI can render a spinner without the core library depending
//! on any terminal machinery. Operations follow an attempt-report-propagate
//! contract: the reporter is always marked failed before an error is
//! propagated, and nothing is swallowed.

/// Receiver for operation lifecycle events
pub trait StatusReporter: Send + Sync {
    /// A remote operation started; `message` describes it in user terms
    fn task_started(&self, message: &str);

    /// The most recently started operation completed successfully
    fn task_succeeded(&self);

    /// The most recently started operation failed
    ///
    /// `message` optionally replaces the start message in the rendered
    /// failure line.
    fn task_failed(&self, message: Option<&str>);
}

/// Reporter that ignores all events
///
/// Used as the default in library consumers and throughout tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl StatusReporter for NullReporter {
    fn task_started(&self, _message: &str) {}
    fn task_succeeded(&self) {}
    fn task_failed(&self, _message: Option<&str>) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_null_reporter_is_object_safe() {
        let reporter: Arc<dyn StatusReporter> = Arc::new(NullReporter);
        reporter.task_started("doing nothing");
        reporter.task_succeeded();
        reporter.task_failed(None);
    }
}
