//! Derived reports over the record collections.
//!
//! # Responsibility
//! - Compute dashboard aggregates by linear scans, on demand.
//! - Resolve cross-record labels with placeholders for dangling references.
//!
//! # Invariants
//! - Every function here is pure; nothing is cached.
//! - Ranked outputs use a stable sort, so ties keep first-appearance order.
//! - Averages and percentages are rounded to one decimal place.

pub mod labels;
pub mod stats;

pub use labels::{
    client_name_for_service, rateable_services, service_label_for_rating, RateableService,
    MISSING_CLIENT_LABEL, MISSING_SERVICE_LABEL,
};
pub use stats::{
    average_rating, average_rating_by_type, dashboard_summary, demand_ranking,
    service_type_popularity, ClientDemand, DashboardSummary, TypePopularity, TypeRating,
    POPULARITY_TOP_N,
};
