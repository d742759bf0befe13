//! Terminal event abstraction.
//!
//! Wraps crossterm events into a simpler enum and runs a background task
//! that forwards them over a channel so the main loop stays non-blocking.
//! The frame clock is *not* derived from input polling — `main` runs a
//! fixed-rate interval for that — so this task only ever forwards real
//! input.

use std::time::Duration;

use crossterm::event::{self, Event as CtEvent, KeyEvent, MouseEvent};
use tokio::sync::mpsc;

/// High-level input events consumed by the application.
#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
}

/// Spawns a background task that polls the terminal for events and sends
/// them through the returned channel.
pub fn spawn_event_reader() -> mpsc::UnboundedReceiver<AppEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::task::spawn_blocking(move || {
        loop {
            // Short poll so the task notices a dropped receiver and exits.
            if !event::poll(Duration::from_millis(50)).unwrap_or(false) {
                if tx.is_closed() {
                    break;
                }
                continue;
            }
            let Ok(ev) = event::read() else { continue };
            let app_event = match ev {
                CtEvent::Key(k) => AppEvent::Key(k),
                CtEvent::Mouse(m) => AppEvent::Mouse(m),
                CtEvent::Resize(w, h) => AppEvent::Resize(w, h),
                _ => continue,
            };
            if tx.send(app_event).is_err() {
                break; // receiver dropped
            }
        }
    });

    rx
}
