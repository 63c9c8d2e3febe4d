//! Session capability injected into the API client
//!
//! The client never reads auth state from a global. Whoever owns the session
//! (cookie jar, keychain, in-memory store) implements `SessionProvider`.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Signed-in user as stored in the session
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Read access to the current session plus the ability to end it
pub trait SessionProvider: Send + Sync {
    /// Bearer token for the current session, if any
    fn token(&self) -> Option<String>;

    /// Signed-in user, if any
    fn user(&self) -> Option<SessionUser>;

    /// Drop the current session (called on 401)
    fn clear_session(&self);
}

#[derive(Clone, Debug)]
struct SessionState {
    token: String,
    user: Option<SessionUser>,
}

/// In-process session store
#[derive(Debug, Default)]
pub struct MemorySession {
    state: RwLock<Option<SessionState>>,
}

impl MemorySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already holds a token
    pub fn with_token(token: &str) -> Self {
        let session = Self::new();
        session.sign_in(token, None);
        session
    }

    /// Replace the current session
    pub fn sign_in(&self, token: &str, user: Option<SessionUser>) {
        *self.state.write() = Some(SessionState {
            token: token.to_string(),
            user,
        });
    }

    pub fn is_signed_in(&self) -> bool {
        self.state.read().is_some()
    }
}

impl SessionProvider for MemorySession {
    fn token(&self) -> Option<String> {
        self.state
            .read()
            .as_ref()
            .map(|s| s.token.clone())
            .filter(|t| !t.is_empty())
    }

    fn user(&self) -> Option<SessionUser> {
        self.state.read().as_ref().and_then(|s| s.user.clone())
    }

    fn clear_session(&self) {
        *self.state.write() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_session_lifecycle() {
        let session = MemorySession::new();
        assert!(session.token().is_none());
        assert!(!session.is_signed_in());

        let user = SessionUser {
            id: 1,
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            role: Some("admin".to_string()),
        };
        session.sign_in("abc123", Some(user.clone()));
        assert_eq!(session.token().as_deref(), Some("abc123"));
        assert_eq!(session.user(), Some(user));

        session.clear_session();
        assert!(session.token().is_none());
        assert!(session.user().is_none());
    }

    #[test]
    fn test_empty_token_is_no_token() {
        let session = MemorySession::with_token("");
        assert!(session.is_signed_in());
        assert!(session.token().is_none());
    }
}
