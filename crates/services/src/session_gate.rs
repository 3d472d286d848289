use std::fmt;
use std::sync::{PoisonError, RwLock};

use exam_core::model::UserProfile;
use tracing::{debug, info};

use crate::error::FetchError;

/// Opaque bearer credential attached to every exam API call.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a token. Blank values are treated as absent.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw token, for the `token` request header only.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// A signed-in session: the token plus the profile returned with it, if any.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthSession {
    pub token: SessionToken,
    pub profile: Option<UserProfile>,
}

impl AuthSession {
    #[must_use]
    pub fn new(token: SessionToken, profile: Option<UserProfile>) -> Self {
        Self { token, profile }
    }
}

/// Holds the current session. It never issues or checks credentials itself;
/// the exam API does that.
#[derive(Debug, Default)]
pub struct SessionGate {
    current: RwLock<Option<AuthSession>>,
}

impl SessionGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_session(session: AuthSession) -> Self {
        Self {
            current: RwLock::new(Some(session)),
        }
    }

    pub fn establish(&self, session: AuthSession) {
        let username = session
            .profile
            .as_ref()
            .map_or("<unknown>", |profile| profile.username.as_str())
            .to_string();
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(session);
        info!(%username, "session established");
    }

    pub fn clear(&self) {
        let had_session = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .is_some();
        debug!(had_session, "session cleared");
    }

    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    #[must_use]
    pub fn profile(&self) -> Option<UserProfile> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .and_then(|session| session.profile.clone())
    }

    /// Token for the next fetch.
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Auth` when nobody is signed in.
    pub fn token(&self) -> Result<SessionToken, FetchError> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|session| session.token.clone())
            .ok_or(FetchError::Auth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_is_absent() {
        assert!(SessionToken::new("  ").is_none());
        assert_eq!(SessionToken::new(" abc ").unwrap().expose(), "abc");
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret-value").unwrap();
        assert!(!format!("{token:?}").contains("secret"));
    }

    #[test]
    fn gate_without_session_refuses_token() {
        let gate = SessionGate::new();
        assert!(!gate.is_signed_in());
        assert!(matches!(gate.token(), Err(FetchError::Auth)));
    }

    #[test]
    fn establish_then_clear() {
        let gate = SessionGate::new();
        gate.establish(AuthSession::new(SessionToken::new("t").unwrap(), None));
        assert_eq!(gate.token().unwrap().expose(), "t");
        assert!(gate.profile().is_none());

        gate.clear();
        assert!(matches!(gate.token(), Err(FetchError::Auth)));
    }
}
