//! Session state passed explicitly to per-user operations.
//!
//! Token issuance and refresh belong to the embedding application; this
//! module only carries the result of a login around as an explicit value.

use std::fmt;

use crate::error::{DeckstackError, Result};

// ---------------------------------------------------------------------------
// SessionToken
// ---------------------------------------------------------------------------

/// Opaque session token issued at login.
///
/// `Debug` redacts the value so tokens never leak into diagnostics.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw token string.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The raw token value, for handing to the issuing service.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SessionToken(..)")
    }
}

// ---------------------------------------------------------------------------
// AuthContext
// ---------------------------------------------------------------------------

/// Identity of a logged-in user plus the token issued for the session.
///
/// Operations touching per-user state take `&AuthContext` explicitly;
/// there is no ambient login state anywhere in the crate.
#[derive(Debug, Clone)]
pub struct AuthContext {
    user: String,
    token: SessionToken,
}

impl AuthContext {
    /// Build a context from the logged-in user name and issued token.
    pub fn new(user: impl Into<String>, token: SessionToken) -> Self {
        Self {
            user: user.into(),
            token,
        }
    }

    /// The logged-in user name.
    pub fn user(&self) -> &str {
        &self.user
    }

    /// The session token.
    pub fn token(&self) -> &SessionToken {
        &self.token
    }
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// Holder for the current login state.
#[derive(Debug, Default)]
pub struct Session {
    ctx: Option<AuthContext>,
}

impl Session {
    /// Create a logged-out session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a login, replacing any existing one.
    pub fn login(&mut self, user: impl Into<String>, token: SessionToken) {
        self.ctx = Some(AuthContext::new(user, token));
    }

    /// Clear the login state.
    pub fn logout(&mut self) {
        self.ctx = None;
    }

    /// The current context, if logged in.
    pub fn auth(&self) -> Option<&AuthContext> {
        self.ctx.as_ref()
    }

    /// Whether a login is recorded.
    pub fn is_logged_in(&self) -> bool {
        self.ctx.is_some()
    }

    /// The current context, or `Unauthorized` when logged out.
    pub fn require(&self) -> Result<&AuthContext> {
        self.ctx
            .as_ref()
            .ok_or_else(|| DeckstackError::Unauthorized("Not logged in".to_string()))
    }
}
