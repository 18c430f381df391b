use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::common::ApiError;
use crate::types::ErrorBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One backend call. `path` is relative to the API base, e.g. `/news/`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub bearer: Option<String>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            bearer: None,
            body: None,
        }
    }

    pub fn bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw response: the status line is kept so callers never mistake an error payload for data.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        serde_json::from_slice(&self.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    /// Builds the error for a non-2xx response from its structured body, falling back
    /// to the status when the body is not the expected shape.
    pub fn rejection(&self) -> ApiError {
        let message = serde_json::from_slice::<ErrorBody>(&self.body)
            .ok()
            .and_then(ErrorBody::into_message)
            .unwrap_or_else(|| match self.status {
                401 => "Your session has expired. Please sign in again.".to_string(),
                403 => "You are not allowed to do that.".to_string(),
                404 => "The requested item no longer exists.".to_string(),
                status if status >= 500 => "The server ran into a problem. Please try again.".to_string(),
                status => format!("Request failed with status {}", status),
            });

        ApiError::Rejected {
            status: self.status,
            message,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request. `Err` means no response was received at all.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError>;
}

/// reqwest-backed transport with a per-request timeout.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout.min(Duration::from_secs(10)))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut builder = self.client.request(request.method.into(), &url);
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else {
                ApiError::Transport(e.to_string())
            }
        })?;

        Ok(ApiResponse::new(status, body.to_vec()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejection_prefers_structured_error() {
        let response = ApiResponse::new(400, r#"{"error": "Email and password are required"}"#);
        assert_eq!(
            response.rejection(),
            ApiError::Rejected {
                status: 400,
                message: "Email and password are required".into()
            }
        );

        let response = ApiResponse::new(401, r#"{"msg": "Token has expired"}"#);
        assert_eq!(
            response.rejection(),
            ApiError::Rejected {
                status: 401,
                message: "Token has expired".into()
            }
        );
    }

    #[test]
    fn test_rejection_falls_back_on_unstructured_body() {
        let response = ApiResponse::new(502, "<html>Bad Gateway</html>");
        let err = response.rejection();
        assert_eq!(err.status(), Some(502));
        assert!(!err.is_transport());
    }
}
