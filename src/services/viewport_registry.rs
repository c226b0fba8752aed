use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use value_study::{ImageOrigin, ViewportEvent, ViewportState, ViewportSynchronizer};

use crate::error::ApiError;

/// Opaque identifier of a viewport session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        use rand::Rng;
        let id: String = rand::thread_rng()
            .sample_iter(&rand::distributions::Alphanumeric)
            .take(16)
            .map(char::from)
            .collect();
        Self(id)
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trait for viewport session storage
#[async_trait]
pub trait ViewportRegistry: Send + Sync {
    /// Store an initialized synchronizer under a fresh id
    async fn create(
        &self,
        synchronizer: ViewportSynchronizer,
    ) -> Result<(SessionId, ViewportState), ApiError>;

    /// Current state of a session
    async fn find(&self, id: &SessionId) -> Result<Option<ViewportState>, ApiError>;

    /// Apply an interaction event; `None` if the session does not exist
    async fn apply(
        &self,
        id: &SessionId,
        event: ViewportEvent,
    ) -> Result<Option<ViewportState>, ApiError>;

    /// Tell the session a new image is displayed
    async fn load_image(
        &self,
        id: &SessionId,
        width: u32,
        height: u32,
        origin: ImageOrigin,
    ) -> Result<Option<ViewportState>, ApiError>;

    /// Drop a session; `false` if it did not exist
    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError>;
}

struct Session {
    synchronizer: ViewportSynchronizer,
    last_used: DateTime<Utc>,
}

impl Session {
    fn state(&self) -> Result<ViewportState, ApiError> {
        self.synchronizer
            .state()
            .copied()
            .ok_or_else(|| ApiError::Internal("viewport session has no state".to_string()))
    }
}

/// In-memory viewport sessions, bounded by least-recently-used eviction
pub struct InMemoryViewportRegistry {
    sessions: Arc<RwLock<HashMap<SessionId, Session>>>,
    max_sessions: usize,
}

impl InMemoryViewportRegistry {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            max_sessions: max_sessions.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

impl Default for InMemoryViewportRegistry {
    fn default() -> Self {
        Self::new(64)
    }
}

#[async_trait]
impl ViewportRegistry for InMemoryViewportRegistry {
    async fn create(
        &self,
        synchronizer: ViewportSynchronizer,
    ) -> Result<(SessionId, ViewportState), ApiError> {
        let session = Session {
            synchronizer,
            last_used: Utc::now(),
        };
        let state = session.state()?;

        let mut sessions = self.sessions.write().await;
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, s)| s.last_used)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                    tracing::debug!(session = %id, "Evicted least recently used viewport session");
                }
                None => break,
            }
        }

        let id = SessionId::generate();
        sessions.insert(id.clone(), session);
        tracing::info!(session = %id, active = sessions.len(), "Viewport session created");
        Ok((id, state))
    }

    async fn find(&self, id: &SessionId) -> Result<Option<ViewportState>, ApiError> {
        let sessions = self.sessions.read().await;
        sessions.get(id).map(Session::state).transpose()
    }

    async fn apply(
        &self,
        id: &SessionId,
        event: ViewportEvent,
    ) -> Result<Option<ViewportState>, ApiError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(id) else {
            return Ok(None);
        };
        session.synchronizer.handle(event);
        session.last_used = Utc::now();
        session.state().map(Some)
    }

    async fn load_image(
        &self,
        id: &SessionId,
        width: u32,
        height: u32,
        origin: ImageOrigin,
    ) -> Result<Option<ViewportState>, ApiError> {
        let mut sessions = self.sessions.write().await;
        let Some(session) = sessions.get_mut(id) else {
            return Ok(None);
        };
        session.synchronizer.load_image(width, height, origin)?;
        session.last_used = Utc::now();
        session.state().map(Some)
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.remove(id).is_some())
    }
}
