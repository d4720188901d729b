//! Bearer token storage and the session-expiry hook.

use std::sync::{PoisonError, RwLock};

/// Source of the bearer token attached to every request.
pub trait TokenProvider: Send + Sync {
    /// Current token, if logged in.
    fn token(&self) -> Option<String>;

    /// Forgets the token. Called when the backend rejects it.
    fn clear(&self);
}

/// Callback run once per rejected request, after the token is cleared.
///
/// Front ends use it to send the user back to the login screen.
pub trait UnauthorizedHook: Send + Sync {
    /// Handles a 401 response.
    fn on_unauthorized(&self);
}

impl<F> UnauthorizedHook for F
where
    F: Fn() + Send + Sync,
{
    fn on_unauthorized(&self) {
        self();
    }
}

/// In-memory token store for the lifetime of a session.
#[derive(Debug, Default)]
pub struct SessionToken {
    token: RwLock<Option<String>>,
}

impl SessionToken {
    /// Creates a store holding `token`.
    #[must_use]
    pub fn new(token: Option<String>) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        Self {
            token: RwLock::new(token),
        }
    }

    /// Replaces the stored token.
    pub fn set(&self, token: impl Into<String>) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token.into());
    }

    /// Returns true if a token is stored.
    #[must_use]
    pub fn is_present(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl TokenProvider for SessionToken {
    fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn clear(&self) {
        self.token
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_session_token_lifecycle() {
        let tokens = SessionToken::new(None);
        assert!(!tokens.is_present());

        tokens.set("abc");
        assert_eq!(tokens.token().as_deref(), Some("abc"));

        tokens.clear();
        assert!(tokens.token().is_none());
    }

    #[test]
    fn test_blank_token_is_absent() {
        assert!(!SessionToken::new(Some("  ".into())).is_present());
    }

    #[test]
    fn test_closure_is_a_hook() {
        let calls = AtomicUsize::new(0);
        let hook = || {
            calls.fetch_add(1, Ordering::SeqCst);
        };
        hook.on_unauthorized();
        hook.on_unauthorized();
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
