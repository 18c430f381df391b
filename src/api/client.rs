use std::sync::Arc;
use std::time::Duration;

use crate::common::{ApiError, SessionError};
use crate::models::{ContactForm, ContactMessage, Resource, ResourceId, ResourceKind, Updatable};
use crate::services::Session;
use crate::types::{ApiMessage, LoginRequest, LoginResponse, SetupRequest};

use super::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

/// Typed verbs over the REST backend.
///
/// Every call checks the HTTP status: 2xx bodies are decoded into the expected type,
/// anything else becomes [`ApiError::Rejected`] with the server's message. The bearer
/// token always comes from a [`Session`] handed in by the caller.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn http(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        Ok(Self::new(Arc::new(HttpTransport::new(base_url, timeout)?)))
    }

    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let method = request.method;
        let path = request.path.clone();
        log::debug!("{} {}", method, path);

        let response = self.transport.send(request).await.inspect_err(|e| {
            log::warn!("{} {} got no response: {}", method, path, e);
        })?;

        if response.is_success() {
            return Ok(response);
        }

        let err = response.rejection();
        log::warn!("{} {} rejected with {}: {}", method, path, response.status, err);
        Err(err)
    }

    fn bearer(session: Option<&Session>) -> Result<Option<String>, ApiError> {
        Ok(session
            .map(|s| s.token().map(str::to_string))
            .transpose()?)
    }

    fn required_bearer(session: &Session) -> Result<Option<String>, ApiError> {
        Ok(Some(session.token()?.to_string()))
    }

    fn encode<T: serde::Serialize>(value: &T) -> Result<serde_json::Value, ApiError> {
        serde_json::to_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    // AUTH

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let body = Self::encode(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;

        self.execute(ApiRequest::new(Method::Post, "/auth/login").json(body))
            .await?
            .json()
    }

    /// The backend keeps no server-side session; this only lets it log the event.
    pub async fn logout(&self, session: &Session) -> Result<(), ApiError> {
        self.execute(ApiRequest::new(Method::Post, "/auth/logout").bearer(Self::required_bearer(session)?))
            .await
            .map(|_| ())
    }

    pub async fn setup_admin(&self, request: &SetupRequest) -> Result<ApiMessage, ApiError> {
        let body = Self::encode(request)?;
        let response = self
            .execute(ApiRequest::new(Method::Post, "/auth/setup").json(body))
            .await?;
        Ok(response.json().unwrap_or_default())
    }

    // RESOURCES

    pub async fn list<R: Resource>(&self, session: Option<&Session>) -> Result<Vec<R>, ApiError> {
        if R::KIND.list_requires_auth() && session.is_none() {
            return Err(SessionError::Missing.into());
        }

        self.execute(ApiRequest::new(Method::Get, R::KIND.collection_path()).bearer(Self::bearer(session)?))
            .await?
            .json()
    }

    /// Returns the server's echo of the new record when the body has the record's shape.
    pub async fn create<R: Resource>(
        &self,
        session: Option<&Session>,
        draft: &R::Draft,
    ) -> Result<Option<R>, ApiError> {
        let body = Self::encode(draft)?;
        let response = self
            .execute(
                ApiRequest::new(Method::Post, R::KIND.collection_path())
                    .bearer(Self::bearer(session)?)
                    .json(body),
            )
            .await?;

        Ok(response.json::<R>().ok())
    }

    pub async fn update<R: Updatable>(
        &self,
        session: &Session,
        id: ResourceId,
        patch: &R::Patch,
    ) -> Result<Option<R>, ApiError> {
        let body = Self::encode(patch)?;
        let response = self
            .execute(
                ApiRequest::new(Method::Put, R::KIND.item_path(id))
                    .bearer(Self::required_bearer(session)?)
                    .json(body),
            )
            .await?;

        Ok(response.json::<R>().ok())
    }

    pub async fn delete<R: Resource>(&self, session: &Session, id: ResourceId) -> Result<(), ApiError> {
        self.execute(ApiRequest::new(Method::Delete, R::KIND.item_path(id)).bearer(Self::required_bearer(session)?))
            .await
            .map(|_| ())
    }

    // CONTACT

    pub async fn submit_contact(&self, form: &ContactForm) -> Result<ApiMessage, ApiError> {
        let body = Self::encode(form)?;
        let response = self
            .execute(ApiRequest::new(Method::Post, ResourceKind::Contact.collection_path()).json(body))
            .await?;
        Ok(response.json().unwrap_or_default())
    }

    pub async fn mark_contact_read(
        &self,
        session: &Session,
        id: ResourceId,
    ) -> Result<Option<ContactMessage>, ApiError> {
        let path = format!("{}/read", ResourceKind::Contact.item_path(id));
        let response = self
            .execute(ApiRequest::new(Method::Put, path).bearer(Self::required_bearer(session)?))
            .await?;
        Ok(response.json().ok())
    }
}
