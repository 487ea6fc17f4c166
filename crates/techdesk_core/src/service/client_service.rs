//! Client form workflow.
//!
//! # Invariants
//! - Name, email and phone are all required and stored trimmed.
//! - Email must have the `local@domain` shape.

use crate::model::{Client, ClientPatch, NewClient, RecordId};
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::{non_blank, reject, SubmitError};
use crate::store::notification::Severity;
use crate::store::Store;
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[^\s@]+@[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?)*$",
    )
    .expect("valid email regex")
});

/// Raw client form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ClientForm {
    /// Pre-fills the form for editing an existing client.
    pub fn from_client(client: &Client) -> Self {
        Self {
            name: client.name.clone(),
            email: client.email.clone(),
            phone: client.phone.clone(),
        }
    }

    /// Validates the input into creatable fields.
    pub fn parse(&self) -> Result<NewClient, SubmitError> {
        let (Some(name), Some(email), Some(phone)) = (
            non_blank(&self.name),
            non_blank(&self.email),
            non_blank(&self.phone),
        ) else {
            return Err(SubmitError::MissingClientFields);
        };

        if !is_valid_email(&email) {
            return Err(SubmitError::InvalidEmail);
        }

        Ok(NewClient { name, email, phone })
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

/// Client create/edit/delete entry points.
pub struct ClientService<'s, R: KeyValueRepository> {
    store: &'s mut Store<R>,
}

impl<'s, R: KeyValueRepository> ClientService<'s, R> {
    pub fn new(store: &'s mut Store<R>) -> Self {
        Self { store }
    }

    /// Creates a client, or overwrites the one being edited.
    ///
    /// Returns the stored record after the write.
    pub fn submit(
        &mut self,
        form: &ClientForm,
        editing: Option<RecordId>,
    ) -> Result<Client, SubmitError> {
        let fields = match form.parse() {
            Ok(fields) => fields,
            Err(err) => return Err(reject(self.store, "client", err)),
        };

        let result = match editing {
            None => self.store.add_client(fields).map(Some),
            Some(id) => self
                .store
                .update_client(id, ClientPatch::replace_all(fields))
                .map(|_| self.store.client(id).cloned()),
        };

        match result {
            Ok(Some(client)) => {
                let text = if editing.is_some() {
                    "Client updated successfully!"
                } else {
                    "Client registered successfully!"
                };
                self.store.notify(text, Severity::Success);
                Ok(client)
            }
            Ok(None) => {
                let id = editing.unwrap_or_default();
                Err(reject(self.store, "client", SubmitError::ClientNotFound(id)))
            }
            Err(err) => Err(reject(self.store, "client", err.into())),
        }
    }

    /// Deletes a client. Its service requests remain and show a placeholder.
    pub fn delete(&mut self, id: RecordId) -> Result<bool, SubmitError> {
        match self.store.delete_client(id) {
            Ok(true) => {
                self.store
                    .notify("Client deleted successfully!", Severity::Success);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => Err(reject(self.store, "client", err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, ClientForm};
    use crate::service::SubmitError;

    #[test]
    fn email_shape_check() {
        assert!(is_valid_email("contato@abc.com"));
        assert!(is_valid_email("ops@localhost"));
        assert!(!is_valid_email("no-at-sign"));
        assert!(!is_valid_email("two@@example.com"));
        assert!(!is_valid_email("space in@example.com"));
    }

    #[test]
    fn blank_fields_are_missing() {
        let form = ClientForm {
            name: "   ".to_string(),
            email: "a@b.com".to_string(),
            phone: "1".to_string(),
        };
        assert!(matches!(form.parse(), Err(SubmitError::MissingClientFields)));
    }

    #[test]
    fn parse_trims_values() {
        let form = ClientForm {
            name: "  Acme ".to_string(),
            email: " ops@acme.io ".to_string(),
            phone: " 555 ".to_string(),
        };
        let fields = form.parse().unwrap();
        assert_eq!(fields.name, "Acme");
        assert_eq!(fields.email, "ops@acme.io");
        assert_eq!(fields.phone, "555");
    }
}
