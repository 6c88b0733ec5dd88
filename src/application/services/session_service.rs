use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Demo login against a single configured account. Tokens live in memory only
/// and are lost on restart.
#[derive(Clone)]
pub struct SessionService {
    username: String,
    password: String,
    tokens: Arc<RwLock<HashSet<String>>>,
}

impl SessionService {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }

    /// Issue a bearer token for matching credentials.
    pub async fn login(&self, username: &str, password: &str) -> Option<String> {
        if username != self.username || password != self.password {
            tracing::warn!("Rejected login for user {}", username);
            return None;
        }

        let token = uuid::Uuid::new_v4().to_string();
        self.tokens.write().await.insert(token.clone());
        tracing::info!("User {} logged in", username);
        Some(token)
    }

    pub async fn logout(&self, token: &str) -> bool {
        self.tokens.write().await.remove(token)
    }

    pub async fn is_valid(&self, token: &str) -> bool {
        self.tokens.read().await.contains(token)
    }
}
