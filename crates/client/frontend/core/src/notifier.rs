//! [`Notifier`] that feeds a shared [`MessageLog`].
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use runtime::{Notifier, Severity};
use tracing::{debug, warn};

use crate::config::MessageConfig;
use crate::message::{MessageEntry, MessageLog};

/// Collects runtime notifications for display.
///
/// Cloning shares the log.
#[derive(Clone, Debug)]
pub struct MessageLogNotifier {
    log: Arc<Mutex<MessageLog>>,
    show_rejections: bool,
}

impl MessageLogNotifier {
    pub fn new(config: &MessageConfig) -> Self {
        Self {
            log: Arc::new(Mutex::new(MessageLog::new(config.capacity))),
            show_rejections: config.show_rejections,
        }
    }

    /// A log poisoned by a panicking writer is recovered, not lost.
    pub fn log(&self) -> MutexGuard<'_, MessageLog> {
        self.log.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("message log lock poisoned, recovering");
            poisoned.into_inner()
        })
    }

    /// Copy of the log, newest last.
    pub fn entries(&self) -> Vec<MessageEntry> {
        self.log().iter().cloned().collect()
    }
}

impl Notifier for MessageLogNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        if severity == Severity::Warning && !self.show_rejections {
            debug!(message, "rejection hidden from message log");
            return;
        }
        self.log()
            .push(MessageEntry::new(message, None, severity.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageLevel;

    #[test]
    fn records_with_level() {
        let notifier = MessageLogNotifier::new(&MessageConfig::default());
        notifier.notify("action pending", Severity::Warning);
        notifier.notify("ledger offline", Severity::Error);

        let entries = notifier.entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].level, MessageLevel::Warning);
        assert_eq!(entries[1].text, "ledger offline");
    }

    #[test]
    fn rejections_can_be_hidden() {
        let config = MessageConfig {
            show_rejections: false,
            ..MessageConfig::default()
        };
        let notifier = MessageLogNotifier::new(&config);
        notifier.notify("no moves left", Severity::Warning);
        notifier.notify("refresh failed", Severity::Error);

        assert_eq!(notifier.entries().len(), 1);
    }

    #[test]
    fn poisoned_log_keeps_recording() {
        let notifier = MessageLogNotifier::new(&MessageConfig::default());
        notifier.notify("before", Severity::Info);

        let shared = notifier.clone();
        let panicked = std::thread::spawn(move || {
            let _log = shared.log.lock().unwrap();
            panic!("writer died holding the log");
        })
        .join();
        assert!(panicked.is_err());
        assert!(notifier.log.is_poisoned());

        notifier.notify("after", Severity::Error);
        let texts: Vec<_> = notifier.entries().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, ["before", "after"]);
    }
}
