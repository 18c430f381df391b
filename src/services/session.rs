use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::common::SessionError;
use crate::types::{AdminPublic, LoginResponse};

/// The signed-in admin: the backend-issued bearer token plus when it stops being usable.
///
/// The token itself is only reachable through [`Session::token`], which checks expiry on
/// every read.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    token: String,
    pub admin: AdminPublic,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// `ttl` caps the lifetime; a readable `exp` claim in the token can shorten it.
    pub fn new(token: String, admin: AdminPublic, now: DateTime<Utc>, ttl: Duration) -> Self {
        let capped = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);
        let expires_at = match token_expiry(&token) {
            Some(exp) => exp.min(capped),
            None => capped,
        };

        Self {
            token,
            admin,
            expires_at,
        }
    }

    pub fn from_login(response: LoginResponse, now: DateTime<Utc>, ttl: Duration) -> Self {
        Self::new(response.access_token, response.admin, now, ttl)
    }

    pub fn token(&self) -> Result<&str, SessionError> {
        self.token_at(Utc::now())
    }

    pub fn token_at(&self, now: DateTime<Utc>) -> Result<&str, SessionError> {
        if self.is_expired_at(now) {
            return Err(SessionError::Expired);
        }
        Ok(&self.token)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn email(&self) -> &str {
        &self.admin.email
    }
}

/// Reads the `exp` claim of a JWT without verifying it. Verification is the backend's job;
/// this only lets the front end stop sending a token it knows is dead.
pub fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    #[derive(Deserialize)]
    struct Claims {
        exp: Option<i64>,
    }

    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;
    DateTime::from_timestamp(claims.exp?, 0)
}
