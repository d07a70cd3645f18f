//! Utilities for reacting to runtime events inside UI layers.
use runtime::{Event, IntentEvent, SnapshotEvent};

use crate::format::describe_intent;
use crate::message::{MessageEntry, MessageLevel, MessageLog};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EventImpact {
    pub requires_redraw: bool,
}

impl EventImpact {
    pub const fn none() -> Self {
        Self {
            requires_redraw: false,
        }
    }

    pub const fn redraw() -> Self {
        Self {
            requires_redraw: true,
        }
    }

    pub fn combine(self, other: Self) -> Self {
        Self {
            requires_redraw: self.requires_redraw || other.requires_redraw,
        }
    }
}

pub trait EventConsumer {
    fn on_event(&mut self, event: &Event) -> EventImpact;
    fn message_log(&self) -> &MessageLog;
    fn message_log_mut(&mut self) -> &mut MessageLog;
    fn take_message_log(self) -> MessageLog
    where
        Self: Sized;
}

/// Turns session events into log lines.
#[derive(Clone, Debug)]
pub struct SessionEventLog {
    log: MessageLog,
}

impl SessionEventLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            log: MessageLog::new(capacity),
        }
    }

    fn on_intent(&mut self, event: &IntentEvent) -> EventImpact {
        match event {
            IntentEvent::Dispatched { intent } => {
                self.log.push(MessageEntry::new(
                    format!("sent: {}", describe_intent(intent)),
                    None,
                    MessageLevel::Info,
                ));
                EventImpact::none()
            }
            IntentEvent::Confirmed { intent, receipt } => {
                self.log.push(MessageEntry::new(
                    format!(
                        "confirmed: {} ({})",
                        describe_intent(intent),
                        receipt.transaction_id
                    ),
                    Some(receipt.version),
                    MessageLevel::Info,
                ));
                EventImpact::redraw()
            }
            IntentEvent::Failed { intent, error } => {
                self.log.push(MessageEntry::new(
                    format!("failed: {}: {error}", describe_intent(intent)),
                    None,
                    MessageLevel::Error,
                ));
                EventImpact::redraw()
            }
        }
    }

    fn on_snapshot(&mut self, event: &SnapshotEvent) -> EventImpact {
        match event {
            SnapshotEvent::Refreshed {
                version,
                dropped_selection,
            } => {
                if let Some(unit) = dropped_selection {
                    self.log.push(MessageEntry::new(
                        format!("unit {unit} is gone, selection cleared"),
                        Some(*version),
                        MessageLevel::Warning,
                    ));
                }
                EventImpact::redraw()
            }
            SnapshotEvent::Discarded { .. } => EventImpact::none(),
            SnapshotEvent::RefreshFailed { error } => {
                self.log.push(MessageEntry::new(
                    format!("refresh failed: {error}"),
                    None,
                    MessageLevel::Error,
                ));
                EventImpact::none()
            }
        }
    }
}

impl EventConsumer for SessionEventLog {
    fn on_event(&mut self, event: &Event) -> EventImpact {
        match event {
            Event::Intent(event) => self.on_intent(event),
            Event::Snapshot(event) => self.on_snapshot(event),
        }
    }

    fn message_log(&self) -> &MessageLog {
        &self.log
    }

    fn message_log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    fn take_message_log(self) -> MessageLog {
        self.log
    }
}

#[cfg(test)]
mod tests {
    use game_core::{AttackIntent, UnitId};

    use super::*;

    #[test]
    fn failures_are_logged_as_errors() {
        let mut consumer = SessionEventLog::new(8);
        let impact = consumer.on_event(&Event::Intent(IntentEvent::Failed {
            intent: AttackIntent::new(UnitId(1), UnitId(9)).into(),
            error: "ledger unavailable".into(),
        }));

        assert!(impact.requires_redraw);
        let entry = consumer.message_log().iter().last().unwrap();
        assert_eq!(entry.level, MessageLevel::Error);
        assert!(entry.text.contains("attack #9 with #1"));
    }

    #[test]
    fn stale_snapshot_needs_no_redraw() {
        let mut consumer = SessionEventLog::new(8);
        let impact = consumer.on_event(&Event::Snapshot(SnapshotEvent::Discarded {
            received: 1,
            current: 2,
        }));
        assert_eq!(impact, EventImpact::none());
        assert!(consumer.message_log().is_empty());
    }
}
