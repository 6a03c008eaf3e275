//! Form/list state controller for the Users screen.
//!
//! Owns the draft, the validation errors, the busy flags, the last API error
//! and the client-side copy of the user list. Rendering only reads
//! [`UserFormState`]; all mutations go through the actions below.
//!
//! Each network action is split into a `begin_*` step that updates flags and
//! a `finish_*` step that folds the result in. The async methods chain both
//! around the service call; the event loop runs the call on a spawned task
//! instead and applies the `finish_*` step when the result arrives.

use crate::api::users::UserRepository;
use crate::error::{ApiResult, error_message};
use crate::model::{UserDraft, UserField, UserRecord, ValidationErrors};
use crate::service::UserService;
use crate::validation::validate;

/// Everything the presentation layer reads.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserFormState {
    pub users: Vec<UserRecord>,
    pub draft: UserDraft,
    pub errors: ValidationErrors,
    pub is_submitting: bool,
    pub is_loading: bool,
    pub api_error: Option<String>,
}

/// Event that triggered a submission. Submitting consumes it so the key
/// that caused it gets no further handling.
#[derive(Debug, Default)]
pub struct FormEvent {
    default_prevented: bool,
}

impl FormEvent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

pub struct UserFormController<R: UserRepository> {
    service: UserService<R>,
    state: UserFormState,
    activated: bool,
}

impl<R: UserRepository> UserFormController<R> {
    pub fn new(service: UserService<R>) -> Self {
        Self {
            service,
            state: UserFormState::default(),
            activated: false,
        }
    }

    pub fn state(&self) -> &UserFormState {
        &self.state
    }

    pub fn service(&self) -> &UserService<R> {
        &self.service
    }

    /// Returns `true` exactly once: the first activation owes a load.
    pub fn activate(&mut self) -> bool {
        !std::mem::replace(&mut self.activated, true)
    }

    /// First activation loads the user list; later calls do nothing.
    pub async fn initialize(&mut self) {
        if self.activate() {
            self.load_users().await;
        }
    }

    pub async fn load_users(&mut self) {
        self.begin_load();
        let result = self.service.get_users().await;
        self.finish_load(result);
    }

    pub fn begin_load(&mut self) {
        self.state.is_loading = true;
        self.state.api_error = None;
    }

    pub fn finish_load(&mut self, result: ApiResult<Vec<UserRecord>>) {
        match result {
            Ok(users) => self.state.users = users,
            Err(err) => {
                tracing::warn!(error = %err, "failed to load users");
                self.state.api_error = Some(error_message(&err));
            }
        }
        self.state.is_loading = false;
    }

    /// Set one draft field. Clears that field's error and the API error.
    pub fn handle_input_change(&mut self, field: UserField, value: impl Into<String>) {
        self.state.draft.set(field, value);
        self.state.errors.clear_field(field);
        self.state.api_error = None;
    }

    /// Append a character to a draft field, as typing does.
    pub fn push_char(&mut self, field: UserField, c: char) {
        let mut value = self.state.draft.get(field).to_string();
        value.push(c);
        self.handle_input_change(field, value);
    }

    /// Remove the last character of a draft field.
    pub fn pop_char(&mut self, field: UserField) {
        let mut value = self.state.draft.get(field).to_string();
        value.pop();
        self.handle_input_change(field, value);
    }

    pub async fn submit(&mut self, event: &mut FormEvent) {
        if let Some(draft) = self.begin_submit(event) {
            let result = self.service.create_user(&draft).await;
            self.finish_submit(result);
        }
    }

    /// Validate the draft. Returns the draft to send when it is valid;
    /// otherwise records the errors and ends the submission.
    pub fn begin_submit(&mut self, event: &mut FormEvent) -> Option<UserDraft> {
        event.prevent_default();
        self.state.is_submitting = true;
        self.state.api_error = None;

        self.state.errors = validate(&self.state.draft);
        if !self.state.errors.is_empty() {
            tracing::debug!(fields = self.state.errors.len(), "draft rejected by validation");
            self.state.is_submitting = false;
            return None;
        }
        Some(self.state.draft.clone())
    }

    pub fn finish_submit(&mut self, result: ApiResult<UserRecord>) {
        match result {
            Ok(record) => {
                tracing::info!(id = record.id, "user created");
                self.state.users.push(record);
                self.state.draft = UserDraft::default();
                self.state.errors = ValidationErrors::default();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to create user");
                self.state.api_error = Some(error_message(&err));
            }
        }
        self.state.is_submitting = false;
    }

    pub async fn remove_user(&mut self, id: i64) {
        self.begin_remove();
        let result = self.service.delete_user(id).await;
        self.finish_remove(id, result);
    }

    pub fn begin_remove(&mut self) {
        self.state.api_error = None;
    }

    /// The list only changes once the server confirmed the delete.
    pub fn finish_remove(&mut self, id: i64, result: ApiResult<()>) {
        match result {
            Ok(()) => {
                tracing::info!(id, "user deleted");
                self.state.users.retain(|u| u.id != id);
            }
            Err(err) => {
                tracing::warn!(id, error = %err, "failed to delete user");
                self.state.api_error = Some(error_message(&err));
            }
        }
    }
}
