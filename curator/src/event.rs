//! Event bus for curator.
//!
//! All user input, timer ticks, and API-worker results are normalised into
//! a single `AppEvent` enum and sent over one tokio unbounded MPSC channel.
//! The main loop receives from this channel and dispatches.
//!
//! Two independent intervals drive the render and logic cycles:
//! - **Render interval** (33 ms ≈ 30 FPS) — triggers `terminal.draw()`.
//! - **Tick interval** (250 ms) — drives toast expiry and the debounced
//!   autosave deadline check.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

use crate::api::types::ApiOutcome;

/// All events the application can receive from any source.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press from the terminal (`KeyEventKind::Press` only; Windows
    /// synthesises both press and release, so release is filtered out in
    /// [`spawn_event_task`]).
    Key(KeyEvent),
    /// A mouse event (click, scroll).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Logic tick (250 ms): toast expiry, autosave deadline.
    Tick,
    /// Render tick — triggers a `terminal.draw()` call.
    Render,
    /// Result from the API background worker. Boxed to keep the channel
    /// variant small; diff payloads can be large.
    Api(Box<ApiOutcome>),
    /// Quit signal.
    Quit,
}

/// Holds both ends of the unified event channel.
///
/// The sender is cloned into background tasks; the receiver is owned by
/// the main loop.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
    pub rx: mpsc::UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    /// Unbounded is appropriate: producers emit at a bounded hardware rate
    /// and the main loop always keeps up.
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

/// Spawns the background task that drives the event channel.
///
/// Runs until the sender is dropped. `reader.next().fuse()` keeps
/// `tokio::select!` from polling a completed future if the crossterm
/// stream terminates. Send errors are ignored — a dropped receiver means
/// the application is shutting down.
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
                    let _ = tx.send(AppEvent::Tick);
                }
                _ = render_tick => {
                    let _ = tx.send(AppEvent::Render);
                }
                maybe_event = crossterm_event => {
                    match maybe_event {
                        Some(Ok(Event::Key(key))) => {
                            if key.kind == KeyEventKind::Press {
                                let _ = tx.send(AppEvent::Key(key));
                            }
                        }
                        Some(Ok(Event::Resize(w, h))) => {
                            let _ = tx.send(AppEvent::Resize(w, h));
                        }
                        Some(Ok(Event::Mouse(mouse))) => {
                            let _ = tx.send(AppEvent::Mouse(mouse));
                        }
                        _ => {}
                    }
                }
            }
        }
    });
}
