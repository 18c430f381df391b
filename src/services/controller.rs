//! Generic list/mutation lifecycle for one backend collection.
//!
//! A [`ResourceController`] owns the last fetched collection of `R` and keeps it in step
//! with the server one item at a time. All mutating calls take `&mut self`, so calls on one
//! controller never overlap. Dropping the controller cancels whatever it still has in flight.

use std::collections::BTreeSet;
use std::future::Future;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;
use crate::common::{ApiError, FieldErrors, MutationError, SessionError};
use crate::models::{ContactMessage, Draft, FormField, Resource, ResourceId, Updatable};

use super::Session;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
}

impl NoticeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

/// A transient message shown after an action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NoticeLevel::Error
    }

    pub fn css_class(&self) -> &'static str {
        self.level.as_str()
    }
}

/// What the list area shows. Exactly one variant at a time, so a spinner and stale
/// content never render together.
#[derive(Debug, PartialEq)]
pub enum View<'a, R> {
    Idle,
    Loading,
    Failed(&'a str),
    Loaded(&'a [R]),
}

/// The open "add" form: entered values plus any field errors.
#[derive(Debug, Clone, PartialEq)]
pub struct Modal<D> {
    pub draft: D,
    pub errors: FieldErrors,
}

impl<D: Draft> Modal<D> {
    pub fn fields(&self) -> Vec<FormField> {
        self.draft
            .fields()
            .into_iter()
            .map(|field| field.with_error(&self.errors))
            .collect()
    }
}

pub struct ResourceController<R: Resource> {
    api: ApiClient,
    session: Option<Session>,
    state: LoadState,
    items: Vec<R>,
    saving: BTreeSet<ResourceId>,
    creating: bool,
    modal: Option<Modal<R::Draft>>,
    notices: Vec<Notice>,
    cancel: CancellationToken,
}

pub(crate) async fn guarded<T>(
    cancel: &CancellationToken,
    call: impl Future<Output = Result<T, ApiError>>,
) -> Result<T, ApiError> {
    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(ApiError::Cancelled),
        result = call => result,
    }
}

fn signed_in(session: &Option<Session>) -> Result<&Session, ApiError> {
    session.as_ref().ok_or(ApiError::Session(SessionError::Missing))
}

impl<R: Resource> ResourceController<R> {
    /// Controller for an admin view. Mutations need `session`.
    pub fn new(api: ApiClient, session: Option<Session>) -> Self {
        Self {
            api,
            session,
            state: LoadState::Idle,
            items: Vec::new(),
            saving: BTreeSet::new(),
            creating: false,
            modal: None,
            notices: Vec::new(),
            cancel: CancellationToken::new(),
        }
    }

    /// Read-only controller for public pages.
    pub fn public(api: ApiClient) -> Self {
        Self::new(api, None)
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn view(&self) -> View<'_, R> {
        match &self.state {
            LoadState::Idle => View::Idle,
            LoadState::Loading => View::Loading,
            LoadState::Failed(message) => View::Failed(message),
            LoadState::Loaded => View::Loaded(&self.items),
        }
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn into_items(mut self) -> Vec<R> {
        std::mem::take(&mut self.items)
    }

    pub fn get(&self, id: ResourceId) -> Option<&R> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_saving(&self, id: ResourceId) -> bool {
        self.saving.contains(&id)
    }

    pub fn is_creating(&self) -> bool {
        self.creating
    }

    pub fn modal(&self) -> Option<&Modal<R::Draft>> {
        self.modal.as_ref()
    }

    pub fn open_modal(&mut self) {
        if self.modal.is_none() {
            self.modal = Some(Modal {
                draft: R::Draft::default(),
                errors: FieldErrors::new(),
            });
        }
    }

    pub fn close_modal(&mut self) {
        self.modal = None;
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn push_notice(&mut self, notice: Notice) {
        self.notices.push(notice);
    }

    fn report(&mut self, context: &str, err: ApiError) -> ApiError {
        if err != ApiError::Cancelled {
            self.notices.push(Notice::error(format!("{}: {}", context, err)));
        }
        err
    }

    /// Fetches the collection and replaces the local list wholesale, in server order.
    pub async fn load(&mut self) -> Result<(), ApiError> {
        self.state = LoadState::Loading;
        self.items.clear();

        let result = guarded(&self.cancel, self.api.list::<R>(self.session.as_ref())).await;
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Loaded;
                Ok(())
            }
            Err(ApiError::Cancelled) => {
                self.state = LoadState::Idle;
                Err(ApiError::Cancelled)
            }
            Err(err) => {
                log::warn!("loading {} failed: {}", R::KIND, err);
                self.state = LoadState::Failed(err.to_string());
                let context = format!("Could not load {}", R::KIND.label());
                Err(self.report(&context, err))
            }
        }
    }

    /// Post-mutation reload. A failure keeps the current list (plus `confirmed`, the
    /// server's echo of the new record) rather than blanking the view.
    async fn refresh(&mut self, confirmed: Option<R>) {
        let result = guarded(&self.cancel, self.api.list::<R>(self.session.as_ref())).await;
        match result {
            Ok(items) => {
                self.items = items;
                self.state = LoadState::Loaded;
            }
            Err(err) => {
                if let Some(record) = confirmed {
                    if self.get(record.id()).is_none() {
                        self.items.push(record);
                    }
                }
                if self.state != LoadState::Loaded && !self.items.is_empty() {
                    self.state = LoadState::Loaded;
                }
                self.report("Saved, but the list could not be refreshed", err);
            }
        }
    }

    /// Validates locally, posts, then reloads. On failure the modal stays open with the
    /// entered values and the list is left as it was.
    pub async fn create(&mut self, draft: R::Draft) -> Result<(), MutationError> {
        if let Err(errors) = draft.validate() {
            self.modal = Some(Modal {
                draft,
                errors: errors.clone(),
            });
            return Err(MutationError::Invalid(errors));
        }

        self.creating = true;
        let result = guarded(&self.cancel, self.api.create::<R>(self.session.as_ref(), &draft)).await;
        self.creating = false;

        match result {
            Ok(confirmed) => {
                self.modal = None;
                self.notices
                    .push(Notice::success(format!("Added to {}.", R::KIND.label())));
                self.refresh(confirmed).await;
                Ok(())
            }
            Err(err) => {
                self.modal = Some(Modal {
                    draft,
                    errors: FieldErrors::new(),
                });
                Err(self.report("Could not save", err).into())
            }
        }
    }

    /// Deletes after `confirm` accepts the item. Declining issues no request.
    pub async fn delete<F>(&mut self, id: ResourceId, confirm: F) -> Result<(), MutationError>
    where
        F: FnOnce(&R) -> bool,
    {
        let Some(item) = self.get(id) else {
            return Err(MutationError::NotFound(id));
        };
        if !confirm(item) {
            return Err(MutationError::Declined);
        }
        let title = item.title().to_string();

        let session = match signed_in(&self.session) {
            Ok(session) => session,
            Err(err) => return Err(self.report("Could not delete", err).into()),
        };

        self.saving.insert(id);
        let result = guarded(&self.cancel, self.api.delete::<R>(session, id)).await;
        self.saving.remove(&id);

        match result {
            Ok(()) => {
                self.items.retain(|item| item.id() != id);
                self.notices.push(Notice::success(format!("Deleted \"{}\".", title)));
                Ok(())
            }
            Err(err) => Err(self.report(&format!("Could not delete \"{}\"", title), err).into()),
        }
    }
}

impl<R: Updatable> ResourceController<R> {
    /// Puts `patch`; on success the local item becomes the server's echo, or the patch
    /// spliced in with a fresh timestamp when the server does not echo the record.
    pub async fn update(&mut self, id: ResourceId, patch: R::Patch) -> Result<(), MutationError> {
        if self.get(id).is_none() {
            return Err(MutationError::NotFound(id));
        }

        let session = match signed_in(&self.session) {
            Ok(session) => session,
            Err(err) => return Err(self.report("Could not save", err).into()),
        };

        self.saving.insert(id);
        let result = guarded(&self.cancel, self.api.update::<R>(session, id, &patch)).await;
        self.saving.remove(&id);

        match result {
            Ok(echo) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id() == id) {
                    match echo.filter(|record| record.id() == id) {
                        Some(confirmed) => *item = confirmed,
                        None => item.apply_patch(&patch, Utc::now().naive_utc()),
                    }
                }
                self.notices.push(Notice::success("Saved."));
                Ok(())
            }
            Err(err) => Err(self.report("Could not save", err).into()),
        }
    }
}

impl ResourceController<ContactMessage> {
    pub async fn mark_read(&mut self, id: ResourceId) -> Result<(), MutationError> {
        match self.get(id) {
            None => return Err(MutationError::NotFound(id)),
            Some(message) if message.is_read => return Ok(()),
            Some(_) => {}
        }

        let session = match signed_in(&self.session) {
            Ok(session) => session,
            Err(err) => return Err(self.report("Could not update message", err).into()),
        };

        self.saving.insert(id);
        let result = guarded(&self.cancel, self.api.mark_contact_read(session, id)).await;
        self.saving.remove(&id);

        match result {
            Ok(echo) => {
                if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
                    match echo.filter(|record| record.id == id) {
                        Some(confirmed) => *item = confirmed,
                        None => item.is_read = true,
                    }
                }
                Ok(())
            }
            Err(err) => Err(self.report("Could not update message", err).into()),
        }
    }
}

impl<R: Resource> Drop for ResourceController<R> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
