//! Collection persistence adapter.
//!
//! # Responsibility
//! - Load each record collection from key-value storage at startup.
//! - Fall back to seed data when a stored value is missing or unreadable.
//! - Write a whole collection back as one JSON array.
//!
//! # Invariants
//! - Loading never fails; every failure path degrades to seed data.
//! - Under `EmptyCollectionPolicy::SkipEmpty`, an empty collection is never
//!   written, so the previous snapshot survives on disk.

use crate::model::seed::{seed_clients, seed_ratings, seed_services};
use crate::model::{Client, Rating, ServiceRequest};
use crate::repo::kv_repo::{KeyValueRepository, RepoError, RepoResult};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key of one record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionKey {
    Clients,
    Services,
    Ratings,
}

impl CollectionKey {
    pub const ALL: [CollectionKey; 3] = [Self::Clients, Self::Services, Self::Ratings];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Clients => "clients",
            Self::Services => "services",
            Self::Ratings => "ratings",
        }
    }
}

/// What to do when asked to persist a collection with no records.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EmptyCollectionPolicy {
    /// Leave storage untouched. Deleting the last record therefore does not
    /// survive a reload.
    #[default]
    SkipEmpty,
    /// Write `[]` like any other collection.
    PersistEmpty,
}

/// Where a loaded collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadSource {
    Stored,
    Seed,
}

/// The three collections as loaded at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCollections {
    pub clients: Vec<Client>,
    pub services: Vec<ServiceRequest>,
    pub ratings: Vec<Rating>,
    /// Keys that came from seed data rather than storage, in `ALL` order.
    pub seeded: Vec<CollectionKey>,
}

/// Reads and writes record collections through a key-value repository.
pub struct CollectionRepository<R: KeyValueRepository> {
    kv: R,
    policy: EmptyCollectionPolicy,
}

impl<R: KeyValueRepository> CollectionRepository<R> {
    pub fn new(kv: R, policy: EmptyCollectionPolicy) -> Self {
        Self { kv, policy }
    }

    pub fn policy(&self) -> EmptyCollectionPolicy {
        self.policy
    }

    /// Gives back the underlying key-value repository.
    pub fn into_inner(self) -> R {
        self.kv
    }

    /// Loads all three collections, seeding whichever are unavailable.
    pub fn load_all(&self) -> LoadedCollections {
        let (clients, clients_from) = self.load_or_seed(CollectionKey::Clients, seed_clients);
        let (services, services_from) = self.load_or_seed(CollectionKey::Services, seed_services);
        let (ratings, ratings_from) = self.load_or_seed(CollectionKey::Ratings, seed_ratings);

        let seeded = CollectionKey::ALL
            .into_iter()
            .zip([clients_from, services_from, ratings_from])
            .filter(|(_, source)| *source == LoadSource::Seed)
            .map(|(key, _)| key)
            .collect();

        LoadedCollections {
            clients,
            services,
            ratings,
            seeded,
        }
    }

    /// Loads one collection, or returns `seed()` when storage has nothing usable.
    pub fn load_or_seed<T, F>(&self, key: CollectionKey, seed: F) -> (Vec<T>, LoadSource)
    where
        T: DeserializeOwned,
        F: FnOnce() -> Vec<T>,
    {
        let raw = match self.kv.get(key.as_str()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                info!(
                    "event=collection_load module=repo status=seeded key={} reason=absent",
                    key.as_str()
                );
                return (seed(), LoadSource::Seed);
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=seeded key={} reason=read_failed error={}",
                    key.as_str(),
                    err
                );
                return (seed(), LoadSource::Seed);
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(records) => {
                info!(
                    "event=collection_load module=repo status=ok key={} count={}",
                    key.as_str(),
                    records.len()
                );
                (records, LoadSource::Stored)
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=seeded key={} reason=malformed error={}",
                    key.as_str(),
                    err
                );
                (seed(), LoadSource::Seed)
            }
        }
    }

    /// Writes `records` under `key`, honoring the empty-collection policy.
    ///
    /// Returns `Ok(false)` when the write was skipped.
    pub fn save<T: Serialize>(&self, key: CollectionKey, records: &[T]) -> RepoResult<bool> {
        if records.is_empty() && self.policy == EmptyCollectionPolicy::SkipEmpty {
            debug!(
                "event=collection_save module=repo status=skipped key={} reason=empty",
                key.as_str()
            );
            return Ok(false);
        }

        let encoded = serde_json::to_string(records).map_err(|source| RepoError::Encode {
            key: key.as_str().to_string(),
            source,
        })?;
        self.kv.set(key.as_str(), &encoded)?;
        debug!(
            "event=collection_save module=repo status=ok key={} count={} bytes={}",
            key.as_str(),
            records.len(),
            encoded.len()
        );
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::{CollectionKey, CollectionRepository, EmptyCollectionPolicy, LoadSource};
    use crate::model::seed::seed_clients;
    use crate::model::Client;
    use crate::repo::kv_repo::{KeyValueRepository, MemoryKeyValueRepository};

    #[test]
    fn malformed_value_falls_back_to_seed() {
        let kv = MemoryKeyValueRepository::new();
        kv.set("clients", "{not json").unwrap();
        let repo = CollectionRepository::new(&kv, EmptyCollectionPolicy::SkipEmpty);

        let (clients, source) = repo.load_or_seed::<Client, _>(CollectionKey::Clients, seed_clients);
        assert_eq!(source, LoadSource::Seed);
        assert_eq!(clients, seed_clients());
    }

    #[test]
    fn shape_mismatch_falls_back_to_seed() {
        let kv = MemoryKeyValueRepository::new();
        kv.set("clients", r#"[{"id":1,"nome":"legacy"}]"#).unwrap();
        let repo = CollectionRepository::new(&kv, EmptyCollectionPolicy::SkipEmpty);

        let (_, source) = repo.load_or_seed::<Client, _>(CollectionKey::Clients, seed_clients);
        assert_eq!(source, LoadSource::Seed);
    }

    #[test]
    fn load_all_reports_which_collections_were_seeded() {
        let kv = MemoryKeyValueRepository::new();
        kv.set("services", "[]").unwrap();
        let repo = CollectionRepository::new(&kv, EmptyCollectionPolicy::SkipEmpty);

        let loaded = repo.load_all();
        assert!(loaded.services.is_empty());
        assert_eq!(
            loaded.seeded,
            vec![CollectionKey::Clients, CollectionKey::Ratings]
        );
    }

    #[test]
    fn skip_empty_leaves_storage_untouched() {
        let kv = MemoryKeyValueRepository::new();
        let repo = CollectionRepository::new(&kv, EmptyCollectionPolicy::SkipEmpty);

        let written = repo.save::<Client>(CollectionKey::Clients, &[]).unwrap();
        assert!(!written);
        assert!(kv.is_empty());
    }

    #[test]
    fn persist_empty_writes_empty_array() {
        let kv = MemoryKeyValueRepository::new();
        let repo = CollectionRepository::new(&kv, EmptyCollectionPolicy::PersistEmpty);

        assert!(repo.save::<Client>(CollectionKey::Clients, &[]).unwrap());
        assert_eq!(kv.get("clients").unwrap().as_deref(), Some("[]"));

        let (clients, source) = repo.load_or_seed::<Client, _>(CollectionKey::Clients, seed_clients);
        assert_eq!(source, LoadSource::Stored);
        assert!(clients.is_empty());
    }
}
