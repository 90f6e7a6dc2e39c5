use std::collections::HashMap;

use tokio::sync::watch;

use super::{SessionId, SessionSnapshot};

/// One coordinator refresh, pushed to the service and every player monitor.
///
/// The coordinator owns polling; this crate only consumes its pushes. A
/// session missing from `sessions` has ended on the server, which is distinct
/// from a session that is present but has no `now_playing_item`.
#[derive(Debug, Clone, Default)]
pub struct SessionUpdate {
    /// Sessions currently reported by the server, or None when the
    /// coordinator has no data at all
    pub sessions: Option<HashMap<SessionId, SessionSnapshot>>,

    /// Whether the last refresh succeeded
    pub last_update_success: bool,
}

impl SessionUpdate {
    /// A successful refresh carrying the given session map
    pub fn with_sessions(sessions: HashMap<SessionId, SessionSnapshot>) -> Self {
        Self {
            sessions: Some(sessions),
            last_update_success: true,
        }
    }

    /// Look up one session's snapshot, if still reported
    pub fn snapshot(&self, session_id: &SessionId) -> Option<&SessionSnapshot> {
        self.sessions.as_ref().and_then(|s| s.get(session_id))
    }
}

/// Sender half of the session feed, held by whatever polls the server.
///
/// Every push replaces the previous update wholesale; slow consumers only
/// ever observe the latest refresh.
#[derive(Debug, Clone)]
pub struct SessionFeed {
    tx: watch::Sender<SessionUpdate>,
}

impl SessionFeed {
    /// Create a feed and its receiver half.
    ///
    /// The initial update is empty and marked unsuccessful, so players stay
    /// unavailable until the first real refresh arrives.
    pub fn new() -> (Self, SessionFeedReceiver) {
        let (tx, rx) = watch::channel(SessionUpdate::default());
        (Self { tx }, SessionFeedReceiver { rx })
    }

    /// Publish a refreshed update to all receivers.
    pub fn push(&self, update: SessionUpdate) {
        let _ = self.tx.send(update);
    }
}

/// Receiver half of the session feed.
#[derive(Debug, Clone)]
pub struct SessionFeedReceiver {
    rx: watch::Receiver<SessionUpdate>,
}

impl SessionFeedReceiver {
    /// Get the most recent update.
    pub fn current(&self) -> SessionUpdate {
        self.rx.borrow().clone()
    }

    /// Wait for the next push.
    ///
    /// # Errors
    ///
    /// Returns an error once the sender half has been dropped.
    pub async fn changed(&mut self) -> Result<(), watch::error::RecvError> {
        self.rx.changed().await
    }
}
