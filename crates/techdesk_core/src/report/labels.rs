//! Cross-record lookups used when rendering tables and pickers.

use crate::model::{Client, Rating, ServiceRequest};

pub const MISSING_CLIENT_LABEL: &str = "Client not found";
pub const MISSING_SERVICE_LABEL: &str = "Service not found";

/// A completed service request as offered by the rating form.
#[derive(Debug, Clone, PartialEq)]
pub struct RateableService<'a> {
    pub service: &'a ServiceRequest,
    pub client_name: &'a str,
    /// Already has a rating; the picker shows it disabled.
    pub already_rated: bool,
}

/// Owning client's name, or a placeholder when the client is gone.
pub fn client_name_for_service<'a>(clients: &'a [Client], service: &ServiceRequest) -> &'a str {
    clients
        .iter()
        .find(|client| client.id == service.client_id)
        .map_or(MISSING_CLIENT_LABEL, |client| client.name.as_str())
}

/// Rated service's type label, or a placeholder when the service is gone.
pub fn service_label_for_rating<'a>(services: &'a [ServiceRequest], rating: &Rating) -> &'a str {
    services
        .iter()
        .find(|service| service.id == rating.service_id)
        .map_or(MISSING_SERVICE_LABEL, |service| service.service_type.as_str())
}

/// Completed service requests in collection order, flagged when rated.
pub fn rateable_services<'a>(
    clients: &'a [Client],
    services: &'a [ServiceRequest],
    ratings: &[Rating],
) -> Vec<RateableService<'a>> {
    services
        .iter()
        .filter(|service| service.is_completed())
        .map(|service| RateableService {
            service,
            client_name: client_name_for_service(clients, service),
            already_rated: ratings.iter().any(|rating| rating.service_id == service.id),
        })
        .collect()
}
