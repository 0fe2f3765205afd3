//! Last-resort error handling.
//!
//! Failures inside event handlers never escape the coordinator; they end up
//! here, are logged and counted, and the page keeps running.

use tracing::error;

use crate::event::EventOutcome;
use crate::host::{EventKind, EventTarget, Host};

#[derive(Debug, Clone, Default)]
pub struct ErrorReporter {
    reported: usize,
}

impl ErrorReporter {
    pub fn attach<H: Host>(host: &mut H) -> Self {
        host.listen(EventTarget::Window, EventKind::Error);
        host.listen(EventTarget::Window, EventKind::UnhandledRejection);
        Self::default()
    }

    /// Number of errors seen so far
    pub fn reported(&self) -> usize {
        self.reported
    }

    /// Absorb a failure raised while handling `context`
    pub fn handler_failed(&mut self, context: &str, err: &crate::Error) {
        self.reported += 1;
        error!(context, error = %err, "application error");
    }

    pub fn script_error(&mut self, message: &str) -> EventOutcome {
        self.reported += 1;
        error!(message, "application error");
        EventOutcome::default()
    }

    /// Log a rejection and suppress the host's own reporting
    pub fn unhandled_rejection(&mut self, reason: &str) -> EventOutcome {
        self.reported += 1;
        error!(reason, "unhandled rejection");
        EventOutcome::prevent_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeHost;

    #[test]
    fn test_rejections_are_suppressed() {
        let mut host = FakeHost::new();
        let mut reporter = ErrorReporter::attach(&mut host);

        assert!(!reporter.script_error("boom").default_prevented);
        assert!(reporter.unhandled_rejection("timeout").default_prevented);
        reporter.handler_failed("scroll", &crate::Error::Other("lost".to_string()));
        assert_eq!(reporter.reported(), 3);
        assert!(host.is_listening(EventTarget::Window, EventKind::UnhandledRejection));
    }
}
