//! Affirmation repository and daily assignment store
//!
//! The repository owns the in-memory list of affirmations, refreshes it from
//! an [`AffirmationSource`], and binds each calendar date to one affirmation.
//! It is meant to live on a single task: state sits behind a `RefCell`, so the
//! type is not `Sync`, and all assignment reads and writes are synchronous.

use std::cell::RefCell;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use tokio::sync::watch;

use crate::api::{AffirmationSource, ApiError};
use crate::db::KeyValueStore;
use crate::models::{decode_snapshot, encode_snapshot, Affirmation};
use crate::util::date_key;

/// Store key of the serialized affirmation list
pub const CACHE_KEY: &str = "cached_affirmations";

/// Store key of the date -> affirmation id map
pub const ASSIGNMENTS_KEY: &str = "assigned_affirmations_by_date";

/// Snapshot of repository state, published on every transition
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepositoryState {
    pub affirmations: Vec<Affirmation>,
    pub is_loading: bool,
    pub error: Option<ApiError>,
}

pub struct AffirmationRepository<A, S> {
    source: A,
    store: S,
    state: RefCell<RepositoryState>,
    notifier: watch::Sender<RepositoryState>,
}

impl<A: AffirmationSource, S: KeyValueStore> AffirmationRepository<A, S> {
    /// Create a repository, seeding the list from the cached snapshot
    pub fn new(source: A, store: S) -> Self {
        let state = RepositoryState {
            affirmations: load_cached(&store).unwrap_or_default(),
            ..RepositoryState::default()
        };
        let (notifier, _) = watch::channel(state.clone());

        Self {
            source,
            store,
            state: RefCell::new(state),
            notifier,
        }
    }

    /// Refresh the list from the source
    ///
    /// Returns immediately if a fetch is already in flight. Failures are
    /// recorded in [`RepositoryState::error`]; when the list is empty at that
    /// point it is reloaded from the cached snapshot.
    pub async fn fetch_affirmations(&self) {
        {
            let mut state = self.state.borrow_mut();
            if state.is_loading {
                tracing::debug!("Affirmation fetch already in flight");
                return;
            }
            state.is_loading = true;
            state.error = None;
        }
        let _loading = LoadingGuard {
            state: &self.state,
            notifier: &self.notifier,
        };
        self.publish();

        match self.source.fetch_affirmations().await {
            Ok(dtos) => {
                let affirmations: Vec<Affirmation> =
                    dtos.into_iter().map(Affirmation::from).collect();
                tracing::debug!("Fetched {} affirmations", affirmations.len());
                self.save_to_cache(&affirmations);
                self.state.borrow_mut().affirmations = affirmations;
            }
            Err(error) => {
                tracing::error!("Failed to fetch affirmations: {error}");
                let cached = if self.state.borrow().affirmations.is_empty() {
                    load_cached(&self.store)
                } else {
                    None
                };

                let mut state = self.state.borrow_mut();
                state.error = Some(error);
                if let Some(cached) = cached {
                    state.affirmations = cached;
                }
            }
        }
    }

    /// The affirmation bound to `date`, assigning one if needed
    ///
    /// An existing binding is reused only while its id is still in the
    /// current list; otherwise a new pick replaces it.
    pub fn assigned_affirmation(&self, date: NaiveDate) -> Affirmation {
        let key = date_key(date);
        let assignments = self.load_assignments();

        if let Some(id) = assignments.get(&key) {
            let state = self.state.borrow();
            if let Some(existing) = state.affirmations.iter().find(|a| &a.id == id) {
                return existing.clone();
            }
            tracing::debug!("Assigned affirmation {id} for {key} is no longer available");
        }

        self.assign(key, assignments)
    }

    /// Replace the binding for `date` with a fresh random pick
    pub fn reroll(&self, date: NaiveDate) -> Affirmation {
        let key = date_key(date);
        let assignments = self.load_assignments();
        self.assign(key, assignments)
    }

    pub fn affirmations(&self) -> Vec<Affirmation> {
        self.state.borrow().affirmations.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// The error from the most recent fetch, if it failed
    pub fn error(&self) -> Option<ApiError> {
        self.state.borrow().error.clone()
    }

    pub fn state(&self) -> RepositoryState {
        self.state.borrow().clone()
    }

    /// Receive a snapshot whenever loading starts or finishes
    pub fn subscribe(&self) -> watch::Receiver<RepositoryState> {
        self.notifier.subscribe()
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    fn assign(&self, key: String, mut assignments: BTreeMap<String, String>) -> Affirmation {
        let picked = self
            .state
            .borrow()
            .affirmations
            .choose(&mut rand::rng())
            .cloned()
            .unwrap_or_else(Affirmation::fallback);

        assignments.insert(key, picked.id.clone());
        if let Err(error) = self.store.set_json(ASSIGNMENTS_KEY, &assignments) {
            tracing::error!("Failed to persist affirmation assignments: {error}");
        }
        picked
    }

    fn load_assignments(&self) -> BTreeMap<String, String> {
        match self.store.get_json(ASSIGNMENTS_KEY) {
            Ok(assignments) => assignments.unwrap_or_default(),
            Err(error) => {
                tracing::warn!("Ignoring unreadable affirmation assignments: {error}");
                BTreeMap::new()
            }
        }
    }

    fn save_to_cache(&self, affirmations: &[Affirmation]) {
        let result = encode_snapshot(affirmations)
            .map_err(crate::Error::from)
            .and_then(|raw| self.store.set(CACHE_KEY, &raw));
        if let Err(error) = result {
            tracing::error!("Failed to encode affirmations for cache: {error}");
        }
    }

    fn publish(&self) {
        self.notifier.send_replace(self.state.borrow().clone());
    }
}

/// Clears `is_loading` on every exit from a fetch, including a dropped future
struct LoadingGuard<'a> {
    state: &'a RefCell<RepositoryState>,
    notifier: &'a watch::Sender<RepositoryState>,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.borrow_mut();
        state.is_loading = false;
        self.notifier.send_replace(state.clone());
    }
}

fn load_cached(store: &impl KeyValueStore) -> Option<Vec<Affirmation>> {
    let raw = match store.get(CACHE_KEY) {
        Ok(raw) => raw?,
        Err(error) => {
            tracing::error!("Failed to read cached affirmations: {error}");
            return None;
        }
    };

    match decode_snapshot(&raw) {
        Ok(affirmations) => Some(affirmations),
        Err(error) => {
            tracing::error!("Failed to decode cached affirmations: {error}");
            None
        }
    }
}
