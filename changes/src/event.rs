//! Event bus for the review UI.
//!
//! Terminal input and render ticks are normalised into a single `AppEvent`
//! enum and sent over a tokio unbounded MPSC channel. The runner receives from
//! this channel one event at a time.
//!
//! There is no logic tick: the review only changes state in response to input
//! or to the result of a reject round trip, which the runner awaits while it
//! keeps draining this channel.

use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind, MouseEvent};
use futures::{FutureExt, StreamExt};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::interval;

/// Render interval (≈30 FPS).
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// All events the runner can receive.
#[derive(Debug)]
#[non_exhaustive]
pub enum AppEvent {
    /// A key press (`KeyEventKind::Press` only).
    Key(KeyEvent),
    /// A mouse event (click, scroll, move).
    Mouse(MouseEvent),
    /// Terminal was resized to (columns, rows).
    Resize(u16, u16),
    /// Render tick, triggers a `terminal.draw()` call.
    Render,
    /// Quit signal from outside the key dispatcher.
    Quit,
}

/// Sender and receiver ends of the unified event channel.
pub struct EventHandler {
    pub tx: mpsc::UnboundedSender<AppEvent>,
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

/// Spawns the background task that feeds terminal input and render ticks.
///
/// The task ends once the receiver is dropped and a send fails.
///
/// `reader.next().fuse()` keeps `select!` from polling a finished stream, and
/// the `KeyEventKind::Press` filter drops the release events Windows reports
/// for every keystroke.
pub fn spawn_event_task(tx: mpsc::UnboundedSender<AppEvent>) {
    tokio::spawn(async move {
        let mut render_interval = interval(RENDER_INTERVAL);
        let mut reader = EventStream::new();

        let mut input_closed = false;

        while !input_closed {
            let render_tick = render_interval.tick();
            let crossterm_event = reader.next().fuse();

            let sent = tokio::select! {
                _ = render_tick => tx.send(AppEvent::Render),
                maybe_event = crossterm_event => match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        tx.send(AppEvent::Key(key))
                    }
                    Some(Ok(Event::Resize(w, h))) => tx.send(AppEvent::Resize(w, h)),
                    Some(Ok(Event::Mouse(mouse))) => tx.send(AppEvent::Mouse(mouse)),
                    Some(Ok(_)) => Ok(()),
                    // Input stream closed or broken: nothing more can arrive.
                    Some(Err(_)) | None => {
                        input_closed = true;
                        tx.send(AppEvent::Quit)
                    }
                },
            };

            if sent.is_err() {
                break;
            }
        }
    });
}
