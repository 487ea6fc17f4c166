//! Record shapes for clients, service requests and ratings.
//!
//! # Responsibility
//! - Define the three persisted record types and their partial-update patches.
//! - Own identifier issuance and the first-run seed dataset.
//!
//! # Invariants
//! - Every record carries a store-issued `RecordId` that is never reused.
//! - Cross-record references (`client_id`, `service_id`) are plain ids and
//!   may dangle; nothing here enforces referential integrity.

pub mod client;
pub mod id;
pub mod rating;
pub mod seed;
pub mod service_request;

pub use client::{Client, ClientPatch, NewClient};
pub use id::{IdGenerator, RecordId};
pub use rating::{NewRating, Rating, MAX_SCORE, MIN_SCORE};
pub use service_request::{
    NewServiceRequest, ServicePatch, ServiceRequest, ServiceStatus, SERVICE_TYPES,
};
