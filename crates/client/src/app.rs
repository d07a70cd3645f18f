//! Line-oriented frontend: one command per line, text output.
use std::io::Write;

use anyhow::Result;
use async_trait::async_trait;
use client_frontend_core::format::{describe_decision, render_map};
use client_frontend_core::{
    EventConsumer, Frontend, FrontendConfig, MessageEntry, MessageLevel, MessageLogNotifier,
    SessionEventLog, UiFrame,
};
use game_core::Decision;
use runtime::{Event, SessionHandle, Topic};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::input::{HELP, InputCommand, parse_line};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Reads commands from `input` and writes the game view to `output`.
///
/// Runtime notifications (rejections, ledger errors) are read from the
/// shared [`MessageLogNotifier`]; intent and snapshot progress comes from
/// the event bus.
pub struct LineFrontend<R, W> {
    lines: Lines<R>,
    output: W,
    config: FrontendConfig,
    notifier: MessageLogNotifier,
    events: SessionEventLog,
    seen_notices: u64,
    seen_events: u64,
}

impl LineFrontend<BufReader<Stdin>, std::io::Stdout> {
    pub fn stdio(config: FrontendConfig, notifier: MessageLogNotifier) -> Self {
        Self::new(
            BufReader::new(tokio::io::stdin()),
            std::io::stdout(),
            config,
            notifier,
        )
    }
}

impl<R, W> LineFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    pub fn new(input: R, output: W, config: FrontendConfig, notifier: MessageLogNotifier) -> Self {
        let events = SessionEventLog::new(config.messages.capacity);
        Self {
            lines: input.lines(),
            output,
            config,
            notifier,
            events,
            seen_notices: 0,
            seen_events: 0,
        }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    async fn execute(&mut self, command: InputCommand, handle: &SessionHandle) -> Result<Flow> {
        match command {
            InputCommand::Click(position) => {
                let decision = handle.resolve_position(position);
                // Rejections are reported through the notifier.
                if !matches!(decision, Decision::Rejected { .. }) {
                    writeln!(self.output, "{}", describe_decision(&decision))?;
                }
            }
            InputCommand::Select(unit) => match handle.select(unit) {
                Ok(Some(unit)) => writeln!(self.output, "selected unit {unit}")?,
                Ok(None) => writeln!(self.output, "selection cleared")?,
                Err(error) => writeln!(self.output, "{error}")?,
            },
            InputCommand::Refresh => match handle.refresh().await {
                Ok(version) => writeln!(self.output, "snapshot v{version}")?,
                Err(error) => debug!(%error, "manual refresh failed"),
            },
            InputCommand::Status => self.render(handle)?,
            InputCommand::Help => writeln!(self.output, "{HELP}")?,
            InputCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn on_event(&mut self, received: std::result::Result<Event, RecvError>) -> Result<Flow> {
        match received {
            Ok(event) => {
                self.events.on_event(&event);
                self.flush_messages()?;
                Ok(Flow::Continue)
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "event receiver lagged");
                Ok(Flow::Continue)
            }
            Err(RecvError::Closed) => Ok(Flow::Quit),
        }
    }

    fn render(&mut self, handle: &SessionHandle) -> Result<()> {
        let frame = UiFrame::from_session(
            handle,
            &self.config.overlay,
            self.events.message_log(),
            0,
        );

        write!(self.output, "{}", render_map(&frame.map))?;
        let selected = frame
            .selected
            .map(|unit| {
                format!(
                    "{} {:?} hp {} moves {}",
                    unit.id, unit.kind, unit.health, unit.movement_range
                )
            })
            .unwrap_or_else(|| "none".to_string());
        writeln!(
            self.output,
            "v{}  selected: {selected}  pending: {}",
            frame.version, frame.pending
        )?;
        Ok(())
    }

    /// Print entries logged since the last flush.
    fn flush_messages(&mut self) -> Result<()> {
        let notices: Vec<MessageEntry> = {
            let log = self.notifier.log();
            let fresh = log.since(self.seen_notices).cloned().collect();
            self.seen_notices = log.total_pushed();
            fresh
        };

        let log = self.events.message_log();
        // Errors already reach the notifier.
        let progress: Vec<MessageEntry> = log
            .since(self.seen_events)
            .filter(|entry| entry.level != MessageLevel::Error)
            .cloned()
            .collect();
        self.seen_events = log.total_pushed();

        for entry in notices.iter().chain(&progress) {
            writeln!(self.output, "{}", format_entry(entry))?;
        }
        Ok(())
    }

    fn prompt(&mut self) -> Result<()> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        Ok(())
    }
}

fn format_entry(entry: &MessageEntry) -> String {
    let marker = match entry.level {
        MessageLevel::Info => "*",
        MessageLevel::Warning => "!",
        MessageLevel::Error => "!!",
    };
    match entry.version {
        Some(version) => format!("{marker} [v{version}] {}", entry.text),
        None => format!("{marker} {}", entry.text),
    }
}

#[async_trait]
impl<R, W> Frontend for LineFrontend<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: Write + Send,
{
    async fn run(&mut self, handle: SessionHandle) -> Result<()> {
        let mut intents = handle.subscribe(Topic::Intent);
        let mut snapshots = handle.subscribe(Topic::Snapshot);

        let (backend, network) = handle.ledger_info();
        writeln!(self.output, "connected to {backend} ledger ({network})")?;
        self.render(&handle)?;
        self.prompt()?;

        loop {
            let flow = tokio::select! {
                line = self.lines.next_line() => match line? {
                    Some(line) => {
                        let flow = match parse_line(&line) {
                            Ok(Some(command)) => self.execute(command, &handle).await?,
                            Ok(None) => Flow::Continue,
                            Err(error) => {
                                writeln!(self.output, "{error}")?;
                                Flow::Continue
                            }
                        };
                        self.flush_messages()?;
                        if flow == Flow::Continue {
                            self.prompt()?;
                        }
                        flow
                    }
                    None => Flow::Quit,
                },
                event = intents.recv() => self.on_event(event)?,
                event = snapshots.recv() => self.on_event(event)?,
            };

            if flow == Flow::Quit {
                break;
            }
        }

        self.flush_messages()?;
        self.output.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use client_blockchain_core::{InMemoryLedger, MemoryLedgerConfig, Scenario};
    use runtime::Session;

    use super::*;

    async fn play(script: &str, ledger: InMemoryLedger) -> String {
        let config = FrontendConfig::default();
        let notifier = MessageLogNotifier::new(&config.messages);
        let session = Session::builder()
            .ledger(ledger)
            .notifier(notifier.clone())
            .build()
            .await
            .unwrap();

        let mut frontend = LineFrontend::new(script.as_bytes(), Vec::new(), config, notifier);
        frontend.run(session.handle()).await.unwrap();
        session.shutdown().await.unwrap();

        String::from_utf8(frontend.into_output()).unwrap()
    }

    fn demo_ledger() -> InMemoryLedger {
        InMemoryLedger::new(Scenario::demo().into_snapshot().unwrap())
    }

    #[tokio::test]
    async fn select_and_move() {
        let output = play("4 5\n4 7\nq\n", demo_ledger()).await;

        assert!(output.starts_with("connected to InMemory ledger (local)"));
        assert!(output.contains("selected unit #1"));
        assert!(output.contains("unit #1 moving to (4, 7)"));
    }

    #[tokio::test]
    async fn bad_input_does_not_end_the_session() {
        let output = play("fly\n3 north\ns\n", demo_ledger()).await;

        assert!(output.contains("unknown command `fly`"));
        assert!(output.contains("`north` is not a coordinate"));
        assert!(output.contains("v0  selected: none  pending: 0"));
    }

    #[tokio::test]
    async fn rejections_come_from_the_notifier() {
        let snapshot = Scenario::demo().into_snapshot().unwrap();
        let slow = MemoryLedgerConfig::default().with_latency(Duration::from_millis(200));
        let ledger = InMemoryLedger::with_config(snapshot, slow);

        // #1 is reselected and ordered again while its first move is in flight.
        let output = play("4 5\n4 7\n4 5\n4 6\nq\n", ledger).await;

        assert!(output.contains("! action pending"));
        assert!(!output.contains("rejected:"));
    }

    #[tokio::test]
    async fn npc_cannot_be_selected_directly() {
        let output = play("u 100\nu 2\n", demo_ledger()).await;

        assert!(output.contains("selected unit #2"));
        assert!(!output.contains("selected unit #100"));
    }
}
