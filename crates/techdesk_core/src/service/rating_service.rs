//! Rating form workflow.
//!
//! # Invariants
//! - A service may carry at most one rating.
//! - Only `Completed` services can be rated.
//! - Score `0` means the user has not picked a star yet.

use crate::model::{NewRating, Rating, RecordId, MAX_SCORE, MIN_SCORE};
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::{non_blank, reject, SubmitError};
use crate::store::notification::Severity;
use crate::store::Store;

/// Raw rating form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RatingForm {
    /// Selected service id as submitted by the picker.
    pub service_id: String,
    pub score: u8,
    pub comment: String,
}

/// Rating create/delete entry points.
pub struct RatingService<'s, R: KeyValueRepository> {
    store: &'s mut Store<R>,
}

impl<'s, R: KeyValueRepository> RatingService<'s, R> {
    pub fn new(store: &'s mut Store<R>) -> Self {
        Self { store }
    }

    pub fn submit(&mut self, form: &RatingForm) -> Result<Rating, SubmitError> {
        let fields = match self.validate(form) {
            Ok(fields) => fields,
            Err(err) => return Err(reject(self.store, "rating", err)),
        };

        match self.store.add_rating(fields) {
            Ok(rating) => {
                self.store
                    .notify("Rating registered successfully!", Severity::Success);
                Ok(rating)
            }
            Err(err) => Err(reject(self.store, "rating", err.into())),
        }
    }

    pub fn delete(&mut self, id: RecordId) -> Result<bool, SubmitError> {
        match self.store.delete_rating(id) {
            Ok(true) => {
                self.store
                    .notify("Rating deleted successfully!", Severity::Success);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => Err(reject(self.store, "rating", err.into())),
        }
    }

    fn validate(&self, form: &RatingForm) -> Result<NewRating, SubmitError> {
        let service_id = non_blank(&form.service_id)
            .and_then(|raw| raw.parse::<RecordId>().ok())
            .ok_or(SubmitError::ServiceNotSelected)?;

        if form.score == 0 {
            return Err(SubmitError::ScoreNotSelected);
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(&form.score) {
            return Err(SubmitError::ScoreOutOfRange(form.score));
        }

        if self
            .store
            .ratings()
            .iter()
            .any(|rating| rating.service_id == service_id)
        {
            return Err(SubmitError::AlreadyRated(service_id));
        }

        match self.store.service(service_id) {
            None => return Err(SubmitError::ServiceNotFound(service_id)),
            Some(service) if !service.is_completed() => {
                return Err(SubmitError::ServiceNotCompleted(service_id));
            }
            Some(_) => {}
        }

        Ok(NewRating {
            service_id,
            score: form.score,
            comment: non_blank(&form.comment),
        })
    }
}
