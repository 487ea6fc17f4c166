//! Application store: the single write path for all record collections.
//!
//! # Responsibility
//! - Own the client, service-request and rating collections in memory.
//! - Issue record ids and apply create/update/delete mutations.
//! - Write a changed collection through to storage after every mutation.
//! - Hold the transient notification shown to the user.
//!
//! # Invariants
//! - Collections are only mutated through `Store` methods.
//! - The store never rejects a record on business grounds; form workflows
//!   validate before calling in.
//! - Updates and deletes of unknown ids are silent no-ops (`Ok(false)`) and
//!   do not touch storage.
//! - A failed write-through keeps the in-memory mutation and returns the
//!   storage error.

pub mod notification;

use crate::model::{
    Client, ClientPatch, IdGenerator, NewClient, NewRating, NewServiceRequest, Rating, RecordId,
    ServicePatch, ServiceRequest,
};
use crate::repo::collection_repo::{CollectionKey, CollectionRepository, EmptyCollectionPolicy};
use crate::repo::kv_repo::{KeyValueRepository, RepoResult};
use log::{error, info};
use notification::{Notification, NotificationSlot, Severity, DEFAULT_NOTIFICATION_TTL};
use std::time::{Duration, Instant};

/// Startup knobs for [`Store::open_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    pub empty_policy: EmptyCollectionPolicy,
    pub notification_ttl: Duration,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            empty_policy: EmptyCollectionPolicy::default(),
            notification_ttl: DEFAULT_NOTIFICATION_TTL,
        }
    }
}

/// In-memory record collections backed by key-value storage.
pub struct Store<R: KeyValueRepository> {
    repo: CollectionRepository<R>,
    clients: Vec<Client>,
    services: Vec<ServiceRequest>,
    ratings: Vec<Rating>,
    ids: IdGenerator,
    notification: NotificationSlot,
    seeded: Vec<CollectionKey>,
}

impl<R: KeyValueRepository> Store<R> {
    /// Loads the store from `kv` with default options.
    pub fn open(kv: R) -> Self {
        Self::open_with(kv, StoreOptions::default())
    }

    /// Loads every collection from `kv`, seeding the ones that are missing.
    pub fn open_with(kv: R, options: StoreOptions) -> Self {
        let repo = CollectionRepository::new(kv, options.empty_policy);
        let loaded = repo.load_all();

        let max_id = loaded
            .clients
            .iter()
            .map(|client| client.id)
            .chain(loaded.services.iter().map(|service| service.id))
            .chain(loaded.ratings.iter().map(|rating| rating.id))
            .max()
            .unwrap_or(0);

        let seeded_keys = loaded
            .seeded
            .iter()
            .map(|key| key.as_str())
            .collect::<Vec<_>>()
            .join(",");
        info!(
            "event=store_open module=store status=ok clients={} services={} ratings={} seeded={} policy={:?}",
            loaded.clients.len(),
            loaded.services.len(),
            loaded.ratings.len(),
            if seeded_keys.is_empty() { "none" } else { seeded_keys.as_str() },
            options.empty_policy
        );

        Self {
            repo,
            clients: loaded.clients,
            services: loaded.services,
            ratings: loaded.ratings,
            ids: IdGenerator::starting_after(max_id),
            notification: NotificationSlot::new(options.notification_ttl),
            seeded: loaded.seeded,
        }
    }

    /// Closes the store and gives back its key-value repository.
    pub fn into_repository(self) -> R {
        self.repo.into_inner()
    }

    /// Collections that started from seed data because storage had nothing
    /// usable for them at open time.
    pub fn seeded_collections(&self) -> &[CollectionKey] {
        &self.seeded
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn services(&self) -> &[ServiceRequest] {
        &self.services
    }

    pub fn ratings(&self) -> &[Rating] {
        &self.ratings
    }

    pub fn client(&self, id: RecordId) -> Option<&Client> {
        self.clients.iter().find(|client| client.id == id)
    }

    pub fn service(&self, id: RecordId) -> Option<&ServiceRequest> {
        self.services.iter().find(|service| service.id == id)
    }

    pub fn rating(&self, id: RecordId) -> Option<&Rating> {
        self.ratings.iter().find(|rating| rating.id == id)
    }

    pub fn add_client(&mut self, fields: NewClient) -> RepoResult<Client> {
        let client = fields.into_client(self.ids.next_id());
        self.clients.push(client.clone());
        self.persist(CollectionKey::Clients)?;
        Ok(client)
    }

    /// Merges `patch` into the client with `id`. Returns whether one matched.
    pub fn update_client(&mut self, id: RecordId, patch: ClientPatch) -> RepoResult<bool> {
        let Some(client) = self.clients.iter_mut().find(|client| client.id == id) else {
            return Ok(false);
        };
        client.apply(patch);
        self.persist(CollectionKey::Clients)?;
        Ok(true)
    }

    /// Removes the client with `id`. Its service requests are left in place.
    pub fn delete_client(&mut self, id: RecordId) -> RepoResult<bool> {
        let before = self.clients.len();
        self.clients.retain(|client| client.id != id);
        if self.clients.len() == before {
            return Ok(false);
        }
        self.persist(CollectionKey::Clients)?;
        Ok(true)
    }

    pub fn add_service(&mut self, fields: NewServiceRequest) -> RepoResult<ServiceRequest> {
        let service = fields.into_request(self.ids.next_id());
        self.services.push(service.clone());
        self.persist(CollectionKey::Services)?;
        Ok(service)
    }

    pub fn update_service(&mut self, id: RecordId, patch: ServicePatch) -> RepoResult<bool> {
        let Some(service) = self.services.iter_mut().find(|service| service.id == id) else {
            return Ok(false);
        };
        service.apply(patch);
        self.persist(CollectionKey::Services)?;
        Ok(true)
    }

    /// Removes the service request with `id`. Its ratings are left in place.
    pub fn delete_service(&mut self, id: RecordId) -> RepoResult<bool> {
        let before = self.services.len();
        self.services.retain(|service| service.id != id);
        if self.services.len() == before {
            return Ok(false);
        }
        self.persist(CollectionKey::Services)?;
        Ok(true)
    }

    /// Appends a rating as given; duplicates and non-completed targets are
    /// the caller's concern.
    pub fn add_rating(&mut self, fields: NewRating) -> RepoResult<Rating> {
        let rating = fields.into_rating(self.ids.next_id());
        self.ratings.push(rating.clone());
        self.persist(CollectionKey::Ratings)?;
        Ok(rating)
    }

    pub fn delete_rating(&mut self, id: RecordId) -> RepoResult<bool> {
        let before = self.ratings.len();
        self.ratings.retain(|rating| rating.id != id);
        if self.ratings.len() == before {
            return Ok(false);
        }
        self.persist(CollectionKey::Ratings)?;
        Ok(true)
    }

    /// Posts a transient message, replacing any visible one.
    pub fn notify(&mut self, text: impl Into<String>, severity: Severity) {
        self.notify_at(text, severity, Instant::now());
    }

    pub fn notify_at(&mut self, text: impl Into<String>, severity: Severity, now: Instant) {
        let text = text.into();
        info!(
            "event=notify module=store severity={} chars={}",
            severity.as_str(),
            text.chars().count()
        );
        self.notification.post(text, severity, now);
    }

    /// Returns the message visible right now.
    pub fn notification(&self) -> Option<&Notification> {
        self.notification_at(Instant::now())
    }

    pub fn notification_at(&self, now: Instant) -> Option<&Notification> {
        self.notification.visible_at(now)
    }

    /// Drops the current message if its own deadline has passed.
    pub fn clear_expired_notification(&mut self, now: Instant) -> Option<Notification> {
        self.notification.clear_expired(now)
    }

    pub fn notification_ttl(&self) -> Duration {
        self.notification.ttl()
    }

    pub fn empty_policy(&self) -> EmptyCollectionPolicy {
        self.repo.policy()
    }

    fn persist(&self, key: CollectionKey) -> RepoResult<()> {
        let result = match key {
            CollectionKey::Clients => self.repo.save(key, &self.clients),
            CollectionKey::Services => self.repo.save(key, &self.services),
            CollectionKey::Ratings => self.repo.save(key, &self.ratings),
        };

        match result {
            Ok(_) => Ok(()),
            Err(err) => {
                error!(
                    "event=collection_save module=store status=error key={} error={}",
                    key.as_str(),
                    err
                );
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Store;
    use crate::model::{ClientPatch, NewClient};
    use crate::repo::kv_repo::MemoryKeyValueRepository;

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "555-0100".to_string(),
        }
    }

    #[test]
    fn new_ids_are_above_seeded_ids() {
        let kv = MemoryKeyValueRepository::new();
        let mut store = Store::open(&kv);

        let created = store.add_client(new_client("Acme")).unwrap();
        assert!(created.id > 3);
    }

    #[test]
    fn unknown_ids_are_silent_no_ops() {
        let kv = MemoryKeyValueRepository::new();
        let mut store = Store::open(&kv);

        assert!(!store.update_client(999, ClientPatch::default()).unwrap());
        assert!(!store.delete_client(999).unwrap());
        assert!(!store.delete_service(999).unwrap());
        assert!(!store.delete_rating(999).unwrap());
        assert!(kv.is_empty(), "no-op mutations must not write");
    }
}
