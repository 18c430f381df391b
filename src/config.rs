use std::time::Duration;

use crate::common::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000/api";
pub const DEFAULT_API_TIMEOUT_SECS: u64 = 15;
/// Matches the backend's access token lifetime.
pub const DEFAULT_SESSION_TTL_HOURS: i64 = 24;
pub const MAX_API_TIMEOUT_SECS: u64 = 300;
/// One year.
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;
pub const DEFAULT_STATIC_DIR: &str = "./static";
/// actix-web's `Key::from` needs at least this many bytes.
pub const SESSION_KEY_MIN_LEN: usize = 64;

/// Process settings, read once at startup.
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: String,
    pub api_base_url: String,
    pub api_timeout: Duration,
    pub session_ttl: chrono::Duration,
    /// Cookie encryption key material. `None` means generate one per process.
    pub session_key: Option<Vec<u8>>,
    pub cookie_secure: bool,
    pub static_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
            session_ttl: chrono::Duration::hours(DEFAULT_SESSION_TTL_HOURS),
            session_key: None,
            cookie_secure: true,
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds settings from any key lookup; blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let defaults = Self::default();

        let api_base_url = match get("API_BASE_URL") {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
                url.trim_end_matches('/').to_string()
            }
            Some(url) => {
                return Err(ConfigError::Invalid {
                    key: "API_BASE_URL",
                    reason: format!("expected an http(s) URL, got {}", url),
                })
            }
            None => defaults.api_base_url,
        };

        let api_timeout = match get("API_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_bounded("API_TIMEOUT_SECS", &v, MAX_API_TIMEOUT_SECS)?),
            None => defaults.api_timeout,
        };

        let session_ttl = match get("SESSION_TTL_HOURS") {
            Some(v) => {
                let hours = parse_bounded("SESSION_TTL_HOURS", &v, MAX_SESSION_TTL_HOURS)?;
                chrono::Duration::hours(hours as i64)
            },
            None => defaults.session_ttl,
        };

        let session_key = match get("SESSION_KEY") {
            Some(v) if v.len() < SESSION_KEY_MIN_LEN => {
                return Err(ConfigError::Invalid {
                    key: "SESSION_KEY",
                    reason: format!("must be at least {} bytes", SESSION_KEY_MIN_LEN),
                })
            }
            Some(v) => Some(v.into_bytes()),
            None => None,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(v) => parse_bool("COOKIE_SECURE", &v)?,
            None => defaults.cookie_secure,
        };

        Ok(Self {
            bind_addr: get("BIND_ADDR").unwrap_or(defaults.bind_addr),
            api_base_url,
            api_timeout,
            session_ttl,
            session_key,
            cookie_secure,
            static_dir: get("STATIC_DIR").unwrap_or(defaults.static_dir),
        })
    }
}

/// A whole number in `1..=max`.
fn parse_bounded(key: &'static str, value: &str, max: u64) -> Result<u64, ConfigError> {
    match value.parse::<u64>() {
        Ok(n) if n > 0 && n <= max => Ok(n),
        _ => Err(ConfigError::Invalid {
            key,
            reason: format!("expected an integer from 1 to {}, got {}", max, value),
        }),
    }
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            reason: format!("expected true or false, got {}", value),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn settings(pairs: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(s.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(s.api_timeout, Duration::from_secs(15));
        assert_eq!(s.session_ttl, chrono::Duration::hours(24));
        assert!(s.session_key.is_none());
        assert!(s.cookie_secure);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            ("API_BASE_URL", "https://api.school.ac.ke/api/"),
            ("API_TIMEOUT_SECS", "5"),
            ("COOKIE_SECURE", "false"),
            ("BIND_ADDR", " "),
        ])
        .unwrap();
        assert_eq!(s.api_base_url, "https://api.school.ac.ke/api");
        assert_eq!(s.api_timeout, Duration::from_secs(5));
        assert!(!s.cookie_secure);
        assert_eq!(s.bind_addr, DEFAULT_BIND_ADDR);
    }

    #[test]
    fn test_invalid_values() {
        assert!(settings(&[("API_TIMEOUT_SECS", "0")]).is_err());
        assert!(settings(&[("API_BASE_URL", "localhost:5000")]).is_err());
        assert!(settings(&[("SESSION_KEY", "short")]).is_err());
        assert!(settings(&[("COOKIE_SECURE", "maybe")]).is_err());
    }

    #[test]
    fn test_durations_are_bounded() {
        assert!(settings(&[("SESSION_TTL_HOURS", "10000000000")]).is_err());
        assert!(settings(&[("API_TIMEOUT_SECS", "18446744073709551615")]).is_err());

        let s = settings(&[("SESSION_TTL_HOURS", "8760")]).unwrap();
        assert_eq!(s.session_ttl, chrono::Duration::hours(24 * 365));
    }
}
