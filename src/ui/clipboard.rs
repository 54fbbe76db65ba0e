//! Copy affordance runtime
//!
//! Writes cell values to the clipboard and drives the copied-state
//! lifecycle. Success is not taken from the write call: it is observed by
//! reading the clipboard back and comparing against the most recently
//! requested value, so confirmation is eventual rather than immediate.
//! Once confirmed, the copied state holds for two seconds and then
//! auto-clears; a new request before that restarts the cycle without
//! dropping the visible state early.

use anyhow::Result;
use std::time::{Duration, Instant};
use tracing::{debug, trace};

use crate::data::CellValue;
use crate::timer::HoldTimer;

/// How long the copied state stays visible after confirmation.
pub const COPIED_HOLD: Duration = Duration::from_millis(2000);

/// Injected clipboard collaborator. The system implementation sits on
/// arboard; tests substitute an in-memory fake.
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<()>;
    fn get_text(&mut self) -> Result<String>;
}

/// System clipboard behind the backend trait.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner.set_text(text)?;
        Ok(())
    }

    fn get_text(&mut self) -> Result<String> {
        Ok(self.inner.get_text()?)
    }
}

/// Payload of the one-shot success notification.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyNotice {
    pub row_id: String,
    pub preview: String,
    pub full_value: String,
}

/// State transitions surfaced to the caller, to be applied to the per-row
/// flag map and the notification area.
#[derive(Debug, Clone, PartialEq)]
pub enum CopyEvent {
    /// Read-back matched; emitted once per copy request.
    Confirmed(CopyNotice),
    /// The copied state for a row ended (hold elapsed or superseded).
    Expired { row_id: String },
}

struct PendingCopy {
    row_id: String,
    value: String,
}

/// Drives clipboard writes, read-back confirmation and the copied hold.
pub struct CopyFeedback<B: ClipboardBackend> {
    backend: B,
    pending: Option<PendingCopy>,
    confirmed_row: Option<String>,
    timer: HoldTimer,
}

impl<B: ClipboardBackend> CopyFeedback<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pending: None,
            confirmed_row: None,
            timer: HoldTimer::new(COPIED_HOLD),
        }
    }

    /// Request a copy of a cell value for a row. Null values have no copy
    /// affordance and are ignored. Write failures are absorbed here: the
    /// confirmation simply never arrives.
    pub fn request_copy(&mut self, row_id: &str, value: &CellValue) {
        let Some(text) = value.clipboard_text() else {
            trace!(target: "clipboard", "ignoring copy request for null value");
            return;
        };

        if let Err(err) = self.backend.set_text(&text) {
            debug!(target: "clipboard", "clipboard write failed: {:#}", err);
        }

        // The previously confirmed state stays visible until the new
        // request confirms; only the pending target is replaced.
        self.pending = Some(PendingCopy {
            row_id: row_id.to_string(),
            value: text,
        });
    }

    /// Advance the lifecycle at `now`: check the read-back for a pending
    /// request and expire a stale copied state. Returns the transitions
    /// that happened this tick.
    pub fn poll(&mut self, now: Instant) -> Vec<CopyEvent> {
        let mut events = Vec::new();

        if let Some(pending) = self.pending.take() {
            match self.backend.get_text() {
                Ok(current) if current == pending.value => {
                    if let Some(previous) = self.confirmed_row.take() {
                        if previous != pending.row_id {
                            events.push(CopyEvent::Expired { row_id: previous });
                        }
                    }

                    debug!(target: "clipboard", "copy confirmed for row {}", pending.row_id);
                    self.timer.start(now);
                    self.confirmed_row = Some(pending.row_id.clone());
                    events.push(CopyEvent::Confirmed(CopyNotice {
                        preview: preview_of(&pending.value),
                        row_id: pending.row_id,
                        full_value: pending.value,
                    }));
                }
                Ok(_) => {
                    trace!(target: "clipboard", "read-back mismatch, still waiting");
                    self.pending = Some(pending);
                }
                Err(err) => {
                    trace!(target: "clipboard", "clipboard read failed: {:#}", err);
                    self.pending = Some(pending);
                }
            }
        }

        if self.timer.take_expired(now) {
            if let Some(row_id) = self.confirmed_row.take() {
                events.push(CopyEvent::Expired { row_id });
            }
        }

        events
    }

    /// Whether a row's copied state is visible at `now`.
    pub fn is_copied(&self, row_id: &str, now: Instant) -> bool {
        self.confirmed_row.as_deref() == Some(row_id) && self.timer.is_active(now)
    }

    /// Cancel the pending request and the hold timer, e.g. on teardown.
    pub fn cancel(&mut self) {
        self.pending = None;
        self.confirmed_row = None;
        self.timer.cancel();
    }
}

fn preview_of(value: &str) -> String {
    if value.len() > 20 {
        format!("{}...", &value[..17])
    } else {
        value.to_string()
    }
}
