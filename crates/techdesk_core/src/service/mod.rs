//! Form workflows: the validation boundary in front of the store.
//!
//! # Responsibility
//! - Turn raw form input into typed records, rejecting invalid input.
//! - Call store mutations and post the matching user notification.
//!
//! # Invariants
//! - A rejected submission creates or changes nothing and always leaves an
//!   `Error` notification behind.
//! - Business rules the store does not enforce (one rating per service,
//!   only completed services are rateable) are checked here.

pub mod client_service;
pub mod rating_service;
pub mod request_service;

use crate::model::RecordId;
use crate::repo::kv_repo::{KeyValueRepository, RepoError};
use crate::store::notification::Severity;
use crate::store::Store;
use log::warn;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a form submission was refused.
///
/// `Display` yields the text shown to the user.
#[derive(Debug)]
pub enum SubmitError {
    MissingClientFields,
    InvalidEmail,
    ClientNotFound(RecordId),
    MissingServiceFields,
    InvalidClientReference(String),
    InvalidBudget(String),
    NonPositiveBudget,
    InvalidDate(String),
    ServiceNotSelected,
    ScoreNotSelected,
    ScoreOutOfRange(u8),
    ServiceNotFound(RecordId),
    ServiceNotCompleted(RecordId),
    AlreadyRated(RecordId),
    Storage(RepoError),
}

impl SubmitError {
    /// Stable machine-readable code for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingClientFields | Self::MissingServiceFields => "missing_fields",
            Self::InvalidEmail => "invalid_email",
            Self::ClientNotFound(_) => "client_not_found",
            Self::InvalidClientReference(_) => "invalid_client_reference",
            Self::InvalidBudget(_) => "invalid_budget",
            Self::NonPositiveBudget => "non_positive_budget",
            Self::InvalidDate(_) => "invalid_date",
            Self::ServiceNotSelected => "service_not_selected",
            Self::ScoreNotSelected => "score_not_selected",
            Self::ScoreOutOfRange(_) => "score_out_of_range",
            Self::ServiceNotFound(_) => "service_not_found",
            Self::ServiceNotCompleted(_) => "service_not_completed",
            Self::AlreadyRated(_) => "already_rated",
            Self::Storage(_) => "storage_failed",
        }
    }
}

impl Display for SubmitError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingClientFields => write!(f, "Fill in all fields!"),
            Self::InvalidEmail => write!(f, "Enter a valid email address!"),
            Self::ClientNotFound(_) => write!(f, "Client not found!"),
            Self::MissingServiceFields => write!(f, "Fill in all required fields!"),
            Self::InvalidClientReference(value) => write!(f, "Invalid client selection: `{value}`"),
            Self::InvalidBudget(value) => write!(f, "Budget must be a number, got `{value}`!"),
            Self::NonPositiveBudget => write!(f, "Budget must be greater than zero!"),
            Self::InvalidDate(value) => write!(f, "Date must use YYYY-MM-DD, got `{value}`!"),
            Self::ServiceNotSelected => write!(f, "Select a service!"),
            Self::ScoreNotSelected => write!(f, "Select a score!"),
            Self::ScoreOutOfRange(score) => write!(f, "Score must be between 1 and 5, got {score}!"),
            Self::ServiceNotFound(_) => write!(f, "Service not found!"),
            Self::ServiceNotCompleted(_) => write!(f, "Only completed services can be rated!"),
            Self::AlreadyRated(_) => write!(f, "This service has already been rated!"),
            Self::Storage(err) => write!(f, "Could not save changes: {err}"),
        }
    }
}

impl Error for SubmitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SubmitError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Logs and surfaces a refused submission, then hands the error back.
fn reject<R: KeyValueRepository>(
    store: &mut Store<R>,
    form: &'static str,
    err: SubmitError,
) -> SubmitError {
    warn!(
        "event=form_rejected module=service form={} error_code={}",
        form,
        err.code()
    );
    store.notify(err.to_string(), Severity::Error);
    err
}

/// Trims `value`; blank input becomes `None`.
fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
