use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

/// The credential obtained from a successful login.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
    pub created_at: DateTime<Utc>,
}

impl SessionData {
    pub fn new(token: String) -> Self {
        Self {
            token,
            created_at: Utc::now(),
        }
    }

    /// Minutes since login (for display)
    pub fn age_minutes(&self) -> i64 {
        (Utc::now() - self.created_at).num_minutes().max(0)
    }
}

/// Holds at most one bearer token for the owning client.
///
/// Readers clone the token out and release the lock before any request is
/// sent, so a login finishing mid-request never blocks on it.
#[derive(Debug, Default)]
pub struct Session {
    data: RwLock<Option<SessionData>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace whatever token is held
    pub async fn update(&self, data: SessionData) {
        *self.data.write().await = Some(data);
    }

    /// Get the bearer token if one is held
    pub async fn token(&self) -> Option<String> {
        self.data.read().await.as_ref().map(|d| d.token.clone())
    }

    pub async fn data(&self) -> Option<SessionData> {
        self.data.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.data.read().await.is_some()
    }
}
