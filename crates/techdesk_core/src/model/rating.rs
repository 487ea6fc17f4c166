//! Post-service ratings.

use super::id::RecordId;
use serde::{Deserialize, Serialize};

pub const MIN_SCORE: u8 = 1;
pub const MAX_SCORE: u8 = 5;

/// Customer score for one completed service request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    pub id: RecordId,
    pub service_id: RecordId,
    pub score: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRating {
    pub service_id: RecordId,
    pub score: u8,
    pub comment: Option<String>,
}

impl NewRating {
    pub fn into_rating(self, id: RecordId) -> Rating {
        Rating {
            id,
            service_id: self.service_id,
            score: self.score,
            comment: self.comment,
        }
    }
}
