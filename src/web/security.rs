use actix_web::HttpRequest;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, SystemTime};

/// A request budget: at most `max_requests` per `window`.
#[derive(Debug, Clone, Copy)]
pub struct RateLimit {
    pub scope: &'static str,
    pub max_requests: usize,
    pub window: Duration,
}

impl RateLimit {
    pub const LOGIN: RateLimit = RateLimit {
        scope: "login",
        max_requests: 5,
        window: Duration::from_secs(300),
    };

    pub const CONTACT: RateLimit = RateLimit {
        scope: "contact",
        max_requests: 5,
        window: Duration::from_secs(600),
    };

    pub const SETUP: RateLimit = RateLimit {
        scope: "setup",
        max_requests: 3,
        window: Duration::from_secs(3600),
    };
}

/// Simple in-memory rate limiter
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<SystemTime>>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
        }
    }

    /// Check if request should be allowed
    /// Returns true if allowed, false if rate limit exceeded
    pub fn check_rate_limit(
        &self,
        key: &str,
        max_requests: usize,
        window: Duration,
    ) -> bool {
        let now = SystemTime::now();
        let mut requests = self
            .requests
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        let entry = requests.entry(key.to_string()).or_default();

        // Remove old requests outside the window
        entry.retain(|&time| {
            now.duration_since(time).unwrap_or(Duration::from_secs(0)) < window
        });

        if entry.len() >= max_requests {
            return false;
        }

        entry.push(now);

        // Drop empty entries so idle clients do not accumulate
        requests.retain(|_, times| !times.is_empty());

        true
    }

    /// Counts one request from the caller of `req` against `limit`.
    pub fn allow(&self, req: &HttpRequest, limit: RateLimit) -> bool {
        let key = format!("{}:{}", limit.scope, client_ip(req));
        let allowed = self.check_rate_limit(&key, limit.max_requests, limit.window);
        if !allowed {
            log::warn!("rate limit hit for {}", key);
        }
        allowed
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

pub fn client_ip(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Generic error message for security
pub fn generic_error_message(context: &str) -> String {
    format!(
        "An error occurred while processing your {}. Please try again.",
        context
    )
}
