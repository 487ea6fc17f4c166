//! First-run demo dataset.
//!
//! Loaded for any collection that has no readable stored value.

use super::{Client, Rating, ServiceRequest, ServiceStatus};
use chrono::NaiveDate;

pub fn seed_clients() -> Vec<Client> {
    vec![
        Client {
            id: 1,
            name: "Empresa ABC Ltda".to_string(),
            email: "contato@abc.com".to_string(),
            phone: "(11) 98765-4321".to_string(),
        },
        Client {
            id: 2,
            name: "Tech Solutions SA".to_string(),
            email: "suporte@techsol.com".to_string(),
            phone: "(11) 91234-5678".to_string(),
        },
    ]
}

pub fn seed_services() -> Vec<ServiceRequest> {
    vec![
        seed_service(
            1,
            1,
            "Computer Maintenance",
            "Cleaning and preventive maintenance",
            500.0,
            ServiceStatus::Completed,
            (2025, 11, 15),
        ),
        seed_service(
            2,
            2,
            "Network Installation",
            "Structured cabling installation",
            1200.0,
            ServiceStatus::Completed,
            (2025, 11, 20),
        ),
        seed_service(
            3,
            1,
            "Technical Support",
            "Remote support",
            300.0,
            ServiceStatus::Pending,
            (2025, 12, 1),
        ),
    ]
}

pub fn seed_ratings() -> Vec<Rating> {
    vec![
        Rating {
            id: 1,
            service_id: 1,
            score: 5,
            comment: Some("Excellent service!".to_string()),
        },
        Rating {
            id: 2,
            service_id: 2,
            score: 4,
            comment: Some("Very good, fast and efficient.".to_string()),
        },
    ]
}

fn seed_service(
    id: u64,
    client_id: u64,
    service_type: &str,
    description: &str,
    budget: f64,
    status: ServiceStatus,
    (year, month, day): (i32, u32, u32),
) -> ServiceRequest {
    ServiceRequest {
        id,
        client_id,
        service_type: service_type.to_string(),
        description: Some(description.to_string()),
        budget,
        status,
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default(),
    }
}
