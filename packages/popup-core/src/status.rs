//! Transient status message with a single replaceable clear timer.
//!
//! Every new message bumps a generation counter and aborts the previously
//! scheduled clear. A clear only fires if its generation is still current, so
//! a stale timer can never erase a newer message.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::task::JoinHandle;

use crate::lock;

/// How long a flashed message stays visible.
pub const MESSAGE_TTL: Duration = Duration::from_millis(5000);

/// Styling hint for a status message. A message without a kind is neutral
/// progress text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Success,
    Error,
}

/// What the status slot currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: Option<MessageKind>,
}

impl StatusMessage {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Default)]
struct Slot {
    message: StatusMessage,
    generation: u64,
    pending_clear: Option<JoinHandle<()>>,
}

impl Slot {
    fn replace(&mut self, message: StatusMessage) -> u64 {
        if let Some(handle) = self.pending_clear.take() {
            handle.abort();
        }
        self.generation += 1;
        self.message = message;
        self.generation
    }
}

/// Shared status slot. Clones refer to the same slot.
#[derive(Clone)]
pub struct StatusLine {
    slot: Arc<Mutex<Slot>>,
    ttl: Duration,
}

impl StatusLine {
    pub fn new() -> Self {
        Self::with_ttl(MESSAGE_TTL)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(Slot::default())),
            ttl,
        }
    }

    pub fn current(&self) -> StatusMessage {
        lock(&self.slot).message.clone()
    }

    /// Show a message that clears itself after the TTL.
    ///
    /// Must be called from within a tokio runtime.
    pub fn flash(&self, text: impl Into<String>, kind: Option<MessageKind>) {
        let mut slot = lock(&self.slot);
        let generation = slot.replace(StatusMessage {
            text: text.into(),
            kind,
        });

        let shared = Arc::clone(&self.slot);
        let ttl = self.ttl;
        slot.pending_clear = Some(tokio::spawn(async move {
            tokio::time::sleep(ttl).await;
            let mut slot = lock(&shared);
            if slot.generation == generation {
                slot.message = StatusMessage::default();
                slot.pending_clear = None;
            }
        }));
    }

    /// Show a message that stays until replaced. Cancels any pending clear.
    pub fn hold(&self, text: impl Into<String>, kind: Option<MessageKind>) {
        lock(&self.slot).replace(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    /// Clear the slot immediately.
    pub fn clear(&self) {
        lock(&self.slot).replace(StatusMessage::default());
    }
}

impl Default for StatusLine {
    fn default() -> Self {
        Self::new()
    }
}
