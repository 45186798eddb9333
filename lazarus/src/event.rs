//! Event bus for lazarus.
//!
//! Terminal input, timer ticks, orchestrator output, and highlight-worker
//! results are all normalised into [`AppEvent`] and sent over one tokio
//! unbounded channel. The main loop is the single consumer.
//!
//! Two independent intervals drive the loop:
//! - **Render interval** (33 ms ≈ 30 FPS) triggers a `terminal.draw()` call.
//! - **Tick interval** (250 ms) advances the busy spinner.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::{FutureExt, StreamExt};
use lazarus_core::view::RunEvent;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::highlight::types::HighlightPayload;

/// All events the application can receive from any source.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// Terminal was resized. ratatui reads the new size on the next draw.
    Resize,
    /// Logic tick.
    Tick,
    /// Render tick.
    Render,
    /// State change from the running orchestrator.
    Run(RunEvent),
    /// Highlighted code from the highlight worker thread.
    Highlighted(Box<HighlightPayload>),
}

/// Sender and receiver ends of the unified event channel.
pub struct EventHandler {
    /// Clone this for every producer.
    pub tx: mpsc::UnboundedSender<AppEvent>,
    /// Owned by the main loop.
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawns the task that feeds terminal input and timer ticks into `tx`.
///
/// The crossterm stream future is fused so a terminated stream does not get
/// polled again by `select!`. Only key presses are forwarded; Windows also
/// reports releases, which would double every keystroke.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut tick_interval = interval(Duration::from_millis(250));
        let mut render_interval = interval(Duration::from_millis(33));
        let mut reader = EventStream::new();

        loop {
            let tick_tick = tick_interval.tick();
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            tokio::select! {
                _ = tick_tick => {
                    if tx.send(AppEvent::Tick).is_err() {
                        break;
                    }
                }
                _ = render_tick => {
                    if tx.send(AppEvent::Render).is_err() {
                        break;
                    }
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                            let _ = tx.send(AppEvent::Key(key));
                        }
                        Some(Ok(Event::Resize(_, _))) => {
                            let _ = tx.send(AppEvent::Resize);
                        }
                        Some(Err(e)) => {
                            tracing::warn!(error = %e, "terminal input error");
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}

/// Forwards orchestrator events into the app channel.
///
/// Returns the sender to hand to `orchestrator::launch`. The forwarding task
/// ends when every clone of that sender has been dropped.
pub fn run_event_bridge(app_tx: mpsc::UnboundedSender<AppEvent>) -> mpsc::UnboundedSender<RunEvent> {
    let (run_tx, mut run_rx) = mpsc::unbounded_channel::<RunEvent>();
    tokio::spawn(async move {
        while let Some(event) = run_rx.recv().await {
            if app_tx.send(AppEvent::Run(event)).is_err() {
                break;
            }
        }
    });
    run_tx
}
