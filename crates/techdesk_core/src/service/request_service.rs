//! Service request form workflow.
//!
//! # Invariants
//! - Client, service type and budget are required.
//! - Budget must parse as a finite decimal greater than zero.
//! - A blank date means today; a blank status is not possible (select box).

use crate::model::{NewServiceRequest, RecordId, ServicePatch, ServiceRequest, ServiceStatus};
use crate::repo::kv_repo::KeyValueRepository;
use crate::service::{non_blank, reject, SubmitError};
use crate::store::notification::Severity;
use crate::store::Store;
use chrono::{Local, NaiveDate};

/// Raw service request form input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceForm {
    /// Selected client id as submitted by the picker.
    pub client_id: String,
    pub service_type: String,
    pub description: String,
    pub budget: String,
    pub status: ServiceStatus,
    /// `YYYY-MM-DD`; blank means today.
    pub date: String,
}

impl ServiceForm {
    /// Validates the input, resolving a blank date to `today`.
    pub fn parse(&self, today: NaiveDate) -> Result<NewServiceRequest, SubmitError> {
        let (Some(client_raw), Some(service_type), Some(budget_raw)) = (
            non_blank(&self.client_id),
            non_blank(&self.service_type),
            non_blank(&self.budget),
        ) else {
            return Err(SubmitError::MissingServiceFields);
        };

        let budget = budget_raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .ok_or(SubmitError::InvalidBudget(budget_raw))?;
        if budget <= 0.0 {
            return Err(SubmitError::NonPositiveBudget);
        }

        let client_id = client_raw
            .parse::<RecordId>()
            .map_err(|_| SubmitError::InvalidClientReference(client_raw.clone()))?;

        let date = match non_blank(&self.date) {
            None => today,
            Some(raw) => NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
                .map_err(|_| SubmitError::InvalidDate(raw.clone()))?,
        };

        Ok(NewServiceRequest {
            client_id,
            service_type,
            description: non_blank(&self.description),
            budget,
            status: self.status,
            date,
        })
    }
}

/// Service request create/status/delete entry points.
pub struct RequestService<'s, R: KeyValueRepository> {
    store: &'s mut Store<R>,
}

impl<'s, R: KeyValueRepository> RequestService<'s, R> {
    pub fn new(store: &'s mut Store<R>) -> Self {
        Self { store }
    }

    /// Registers a request dated today when the form leaves the date blank.
    pub fn submit(&mut self, form: &ServiceForm) -> Result<ServiceRequest, SubmitError> {
        self.submit_on(form, Local::now().date_naive())
    }

    pub fn submit_on(
        &mut self,
        form: &ServiceForm,
        today: NaiveDate,
    ) -> Result<ServiceRequest, SubmitError> {
        let fields = match form.parse(today) {
            Ok(fields) => fields,
            Err(err) => return Err(reject(self.store, "service", err)),
        };

        match self.store.add_service(fields) {
            Ok(service) => {
                self.store
                    .notify("Service registered successfully!", Severity::Success);
                Ok(service)
            }
            Err(err) => Err(reject(self.store, "service", err.into())),
        }
    }

    /// Moves a request to `status`.
    pub fn change_status(
        &mut self,
        id: RecordId,
        status: ServiceStatus,
    ) -> Result<bool, SubmitError> {
        match self.store.update_service(id, ServicePatch::status(status)) {
            Ok(true) => {
                self.store.notify("Status updated!", Severity::Success);
                Ok(true)
            }
            Ok(false) => Err(reject(self.store, "service", SubmitError::ServiceNotFound(id))),
            Err(err) => Err(reject(self.store, "service", err.into())),
        }
    }

    /// Deletes a request. Its ratings remain and show a placeholder.
    pub fn delete(&mut self, id: RecordId) -> Result<bool, SubmitError> {
        match self.store.delete_service(id) {
            Ok(true) => {
                self.store
                    .notify("Service deleted successfully!", Severity::Success);
                Ok(true)
            }
            Ok(false) => Ok(false),
            Err(err) => Err(reject(self.store, "service", err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ServiceForm;
    use crate::model::ServiceStatus;
    use crate::service::SubmitError;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn form(budget: &str) -> ServiceForm {
        ServiceForm {
            client_id: "1".to_string(),
            service_type: "Cloud Computing".to_string(),
            budget: budget.to_string(),
            ..ServiceForm::default()
        }
    }

    #[test]
    fn blank_date_defaults_to_today_and_status_to_pending() {
        let fields = form("250.50").parse(today()).unwrap();
        assert_eq!(fields.date, today());
        assert_eq!(fields.status, ServiceStatus::Pending);
        assert_eq!(fields.budget, 250.5);
        assert_eq!(fields.description, None);
    }

    #[test]
    fn budget_must_be_positive_number() {
        assert!(matches!(
            form("0").parse(today()),
            Err(SubmitError::NonPositiveBudget)
        ));
        assert!(matches!(
            form("-10").parse(today()),
            Err(SubmitError::NonPositiveBudget)
        ));
        assert!(matches!(
            form("abc").parse(today()),
            Err(SubmitError::InvalidBudget(_))
        ));
        assert!(matches!(
            form("inf").parse(today()),
            Err(SubmitError::InvalidBudget(_))
        ));
    }

    #[test]
    fn explicit_date_must_be_iso() {
        let mut input = form("10");
        input.date = "15/11/2025".to_string();
        assert!(matches!(input.parse(today()), Err(SubmitError::InvalidDate(_))));

        input.date = "2025-11-15".to_string();
        assert_eq!(
            input.parse(today()).unwrap().date,
            NaiveDate::from_ymd_opt(2025, 11, 15).unwrap()
        );
    }

    #[test]
    fn client_reference_must_be_numeric() {
        let mut input = form("10");
        input.client_id = "acme".to_string();
        assert!(matches!(
            input.parse(today()),
            Err(SubmitError::InvalidClientReference(_))
        ));
    }
}
