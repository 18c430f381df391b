use serde::{Deserialize, Serialize};

use crate::models::ResourceId;

/// Public admin information returned by the backend
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct AdminPublic {
    #[serde(default)]
    pub id: Option<ResourceId>,
    pub email: String,
}

/// Login request payload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Successful login response
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub admin: AdminPublic,
}

/// First-admin setup payload
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SetupRequest {
    pub email: String,
    pub password: String,
}

/// Plain acknowledgement, e.g. `{"message": "Message sent successfully"}`
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body of a non-2xx response. The backend uses `error`; its JWT layer uses `msg`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error
            .or(self.message)
            .or(self.msg)
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
    }
}
