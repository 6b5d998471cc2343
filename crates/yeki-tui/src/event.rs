use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind, MouseEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Rows scrolled per mouse wheel notch
pub const WHEEL_ROWS: i32 = 3;

/// Preview events
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A key was pressed
    Key(KeyEvent),
    /// Mouse wheel, in rows; positive scrolls down
    Wheel(i32),
    /// Terminal was resized
    Resize(u16, u16),
    /// No input within the tick rate
    Tick,
}

/// Map a terminal event onto what the preview reacts to
pub fn translate(event: Event) -> Option<AppEvent> {
    match event {
        // crossterm 0.27+ also reports key releases on some terminals
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(AppEvent::Key(key)),
        Event::Mouse(mouse) => match mouse.kind {
            MouseEventKind::ScrollDown => Some(AppEvent::Wheel(WHEEL_ROWS)),
            MouseEventKind::ScrollUp => Some(AppEvent::Wheel(-WHEEL_ROWS)),
            _ => None,
        },
        Event::Resize(w, h) => Some(AppEvent::Resize(w, h)),
        _ => None,
    }
}

/// Polls crossterm for preview events
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms.max(1)),
        }
    }

    /// Wait up to one tick for the next event
    pub fn next(&self) -> Result<Option<AppEvent>> {
        if event::poll(self.tick_rate)? {
            Ok(translate(event::read()?))
        } else {
            Ok(Some(AppEvent::Tick))
        }
    }

    /// Move polling onto a blocking thread that feeds `tx`.
    ///
    /// The reader ends when `tx` is closed, when reading fails, or when
    /// [`EventReader::shutdown`] is called.
    pub fn spawn(self, tx: UnboundedSender<AppEvent>) -> EventReader {
        let stop = Arc::new(AtomicBool::new(false));
        let flag = stop.clone();

        let task = tokio::task::spawn_blocking(move || {
            while !flag.load(Ordering::Relaxed) {
                match self.next() {
                    Ok(Some(event)) => {
                        if tx.send(event).is_err() {
                            break;
                        }
                    }
                    Ok(None) => {}
                    Err(e) => {
                        warn!(error = %e, "terminal event read failed");
                        break;
                    }
                }
            }
            debug!("terminal event reader stopped");
        });

        EventReader { stop, task }
    }
}

/// Running event reader
pub struct EventReader {
    stop: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl EventReader {
    /// Stop the reader and wait for its thread, at most one tick
    pub async fn shutdown(self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Err(e) = self.task.await {
            warn!(error = %e, "event reader ended abnormally");
        }
    }
}
