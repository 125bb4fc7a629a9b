//! Annotation session manager
//!
//! Owns every live session behind one `RwLock`ed map. The domain itself is
//! single-user per session, but the HTTP server is concurrent, so each
//! operation takes the lock, resolves the session, and applies the store
//! operation in place. Sessions are reaped by a background task after an
//! idle timeout.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::store::AnnotationStore;
use super::types::{Annotation, PendingSelection, SessionSnapshot, StoreError};

/// How often the cleanup task looks for idle sessions.
const CLEANUP_INTERVAL_SECS: u64 = 300;

/// Errors from session-level operations.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session '{0}' not found")]
    NotFound(Uuid),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A single annotation session: one user, one document, one store.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub store: AnnotationStore,
    pub created_at: DateTime<Utc>,
    pub last_active: DateTime<Utc>,
}

impl Session {
    fn new(seed_labels: &[String]) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            store: AnnotationStore::new(seed_labels),
            created_at: now,
            last_active: now,
        }
    }

    fn touch(&mut self) {
        self.last_active = Utc::now();
    }

    fn is_idle(&self, ttl: Duration, now: DateTime<Utc>) -> bool {
        self.last_active + ttl < now
    }
}

/// Manages annotation sessions
#[derive(Clone)]
pub struct SessionManager {
    inner: Arc<SessionManagerInner>,
}

struct SessionManagerInner {
    /// Live sessions indexed by ID
    sessions: RwLock<HashMap<Uuid, Session>>,

    /// Labels every new session starts with
    seed_labels: Vec<String>,

    /// Idle time after which a session is reaped
    ttl: Duration,
}

impl SessionManager {
    pub fn new(seed_labels: Vec<String>, ttl_minutes: i64) -> Self {
        Self {
            inner: Arc::new(SessionManagerInner {
                sessions: RwLock::new(HashMap::new()),
                seed_labels,
                ttl: Duration::minutes(ttl_minutes),
            }),
        }
    }

    // ========================================================================
    // Session Lifecycle
    // ========================================================================

    /// Create a new session and return its ID.
    pub async fn create_session(&self) -> Uuid {
        let session = Session::new(&self.inner.seed_labels);
        let id = session.id;

        let mut sessions = self.inner.sessions.write().await;
        sessions.insert(id, session);

        tracing::info!(session_id = %id, "Created annotation session");
        id
    }

    pub async fn contains(&self, id: Uuid) -> bool {
        self.inner.sessions.read().await.contains_key(&id)
    }

    pub async fn session_count(&self) -> usize {
        self.inner.sessions.read().await.len()
    }

    // ========================================================================
    // Store Operations
    // ========================================================================

    /// Replace the session's document, clearing any pending selection.
    pub async fn set_document(&self, id: Uuid, text: String) -> Result<(), SessionError> {
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();
        session.store.set_document(text);

        tracing::debug!(session_id = %id, "Document replaced");
        Ok(())
    }

    pub async fn document(&self, id: Uuid) -> Result<String, SessionError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(session.store.document().to_string())
    }

    /// Hand a selection candidate to the session's store.
    pub async fn receive_selection(
        &self,
        id: Uuid,
        candidate: PendingSelection,
    ) -> Result<(), SessionError> {
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();
        session.store.receive_selection(candidate)?;
        Ok(())
    }

    pub async fn pending(&self, id: Uuid) -> Result<Option<PendingSelection>, SessionError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(session.store.pending().cloned())
    }

    /// Append a label to the session's label set. Returns whether the label
    /// was new.
    pub async fn add_label(&self, id: Uuid, name: &str) -> Result<bool, SessionError> {
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();
        let added = session.store.add_label(name)?;

        if added {
            tracing::info!(session_id = %id, label = %name.trim(), "Added entity label");
        }
        Ok(added)
    }

    pub async fn labels(&self, id: Uuid) -> Result<Vec<String>, SessionError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(session.store.labels().to_vec())
    }

    /// Confirm the pending selection under `label`.
    pub async fn confirm(&self, id: Uuid, label: &str) -> Result<Annotation, SessionError> {
        let mut sessions = self.inner.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        session.touch();
        let annotation = session.store.confirm(label)?;

        tracing::info!(
            session_id = %id,
            label = %annotation.label,
            start = annotation.start,
            end = annotation.end,
            "Annotation confirmed"
        );
        Ok(annotation)
    }

    pub async fn annotations(&self, id: Uuid) -> Result<Vec<Annotation>, SessionError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(session.store.annotations().to_vec())
    }

    /// Full read-only view of a session under one lock acquisition.
    pub async fn snapshot(&self, id: Uuid) -> Result<SessionSnapshot, SessionError> {
        let sessions = self.inner.sessions.read().await;
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        Ok(session.store.snapshot())
    }

    // ========================================================================
    // Cleanup
    // ========================================================================

    /// Drop sessions idle for longer than the configured TTL.
    ///
    /// Returns the number of sessions reaped.
    pub async fn cleanup_idle(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.inner.sessions.write().await;

        let before = sessions.len();
        sessions.retain(|id, session| {
            let keep = !session.is_idle(self.inner.ttl, now);
            if !keep {
                tracing::debug!(session_id = %id, "Reaping idle annotation session");
            }
            keep
        });

        let count = before - sessions.len();
        if count > 0 {
            tracing::info!(count = count, "Cleaned up idle annotation sessions");
        }
        count
    }

    /// Start the background cleanup task.
    pub fn start_cleanup_task(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(std::time::Duration::from_secs(CLEANUP_INTERVAL_SECS));

            loop {
                interval.tick().await;
                self.cleanup_idle().await;
            }
        })
    }
}
