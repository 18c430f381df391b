use actix_web::cookie::Key;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::web::security::RateLimiter;

#[derive(Clone)]
pub struct AppState {
    pub api: ApiClient,
    pub rate_limiter: Arc<RateLimiter>,
    /// Encrypts the session cookie.
    pub cookie_key: Key,
    pub settings: Arc<Settings>,
}

impl AppState {
    pub fn new(api: ApiClient, settings: Settings) -> Self {
        let cookie_key = match settings.session_key.as_deref().map(Key::try_from) {
            Some(Ok(key)) => key,
            Some(Err(e)) => {
                log::warn!("SESSION_KEY rejected ({}); using a per-process key", e);
                Key::generate()
            }
            None => {
                log::warn!("SESSION_KEY not set; admin sessions end when the process restarts");
                Key::generate()
            }
        };

        Self {
            api,
            rate_limiter: Arc::new(RateLimiter::new()),
            cookie_key,
            settings: Arc::new(settings),
        }
    }
}
