use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ErrorCode;
use crate::session::SessionState;
use crate::types::{StorageHandle, TransactionHandle};

/// Event emitted on every state transition, shaped for the audit/history
/// store: `{session_id, status, storage_handle, transaction_hash}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionEvent {
    pub session_id: Uuid,
    pub status: SessionState,
    /// Cosmetic progress indicator (0-100) during proof generation.
    /// Carries no correctness signal.
    pub progress: Option<u8>,
    pub storage_handle: Option<StorageHandle>,
    pub transaction_hash: Option<TransactionHandle>,
    pub error: Option<ErrorCode>,
}

/// Optional observer the state machine notifies on stage transitions.
///
/// Fire-and-forget: the pipeline never blocks on or reads back from an
/// observer, and a slow or absent one changes nothing about correctness.
pub trait SessionObserver: Send + Sync {
    fn on_transition(&self, event: &SessionEvent);
}

/// Observer that publishes events to a kanal channel, for callers that
/// persist session history elsewhere.
pub struct ChannelObserver {
    sender: kanal::Sender<SessionEvent>,
}

impl ChannelObserver {
    pub fn new(sender: kanal::Sender<SessionEvent>) -> Self {
        Self { sender }
    }
}

impl SessionObserver for ChannelObserver {
    fn on_transition(&self, event: &SessionEvent) {
        // Best effort: a full or closed channel must not stall the session.
        let _ = self.sender.try_send(event.clone());
    }
}

/// Mock observer recording every event, for tests.
#[derive(Default)]
pub struct MockObserver {
    pub events: std::sync::Mutex<Vec<SessionEvent>>,
}

impl MockObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn statuses(&self) -> Vec<SessionState> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|e| e.status)
            .collect()
    }
}

impl SessionObserver for MockObserver {
    fn on_transition(&self, event: &SessionEvent) {
        self.events.lock().unwrap().push(event.clone());
    }
}
