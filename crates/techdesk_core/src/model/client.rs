//! Client records.

use super::id::RecordId;
use serde::{Deserialize, Serialize};

/// A customer of the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: RecordId,
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Field set for creating a client; the store assigns the id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewClient {
    pub fn into_client(self, id: RecordId) -> Client {
        Client {
            id,
            name: self.name,
            email: self.email,
            phone: self.phone,
        }
    }
}

/// Partial update: `Some` fields overwrite, `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ClientPatch {
    /// Patch that overwrites every editable field.
    pub fn replace_all(fields: NewClient) -> Self {
        Self {
            name: Some(fields.name),
            email: Some(fields.email),
            phone: Some(fields.phone),
        }
    }
}

impl Client {
    /// Merges `patch` into this record in place.
    pub fn apply(&mut self, patch: ClientPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = phone;
        }
    }
}
