//! Core record keeping for an IT-services desk.
//! Clients, service requests and ratings live here, together with the
//! reports derived from them.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod report;
pub mod repo;
pub mod service;
pub mod store;

pub use config::{ConfigError, DeskConfig};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::{
    Client, ClientPatch, IdGenerator, NewClient, NewRating, NewServiceRequest, Rating, RecordId,
    ServicePatch, ServiceRequest, ServiceStatus, SERVICE_TYPES,
};
pub use repo::collection_repo::{CollectionKey, CollectionRepository, EmptyCollectionPolicy};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult, SqliteKeyValueRepository,
};
pub use service::client_service::{ClientForm, ClientService};
pub use service::rating_service::{RatingForm, RatingService};
pub use service::request_service::{RequestService, ServiceForm};
pub use service::SubmitError;
pub use store::notification::{Notification, Severity};
pub use store::{Store, StoreOptions};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
