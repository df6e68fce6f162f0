//! Observable snapshot store.
//!
//! # Responsibility
//! - Own the single current snapshot for one demo variant.
//! - Funnel every mutation through `update_state`: compute, persist, commit,
//!   notify.
//! - Manage subscribers keyed by handler identity.
//!
//! # Invariants
//! - The committed snapshot always equals the last successfully persisted one.
//! - Subscribers run synchronously, after commit, before the mutator returns.
//! - A failed write leaves the snapshot untouched and notifies nobody.
//! - Registering the same handler twice keeps a single registration.

pub mod board;
pub mod gallery;

use crate::repo::snapshot_repo::{Snapshot, SnapshotRepository};
use crate::storage::{KeyValueStorage, StorageError};
use log::{debug, error, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::rc::Rc;

/// Change handler receiving `(previous, next)`; `previous` is `None` only for
/// the initial call made by `subscribe`.
pub type Subscriber<S> = Rc<dyn Fn(Option<&S>, &S)>;

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionToken(u64);

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    /// Persisting the next snapshot failed; the mutation was not committed.
    StorageWrite(StorageError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StorageWrite(err) => write!(f, "failed to persist snapshot: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::StorageWrite(err) => Some(err),
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::StorageWrite(value)
    }
}

/// Construction options for `Store`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Overrides `Snapshot::DEFAULT_STORAGE_KEY`.
    pub storage_key: Option<String>,
    /// Deterministic color generation for tests and demos.
    pub rng_seed: Option<u64>,
}

/// Single source of truth for one snapshot type.
pub struct Store<S: Snapshot, K: KeyValueStorage> {
    repo: SnapshotRepository<K>,
    state: RefCell<Rc<S>>,
    subscribers: RefCell<BTreeMap<SubscriptionToken, Subscriber<S>>>,
    next_token: Cell<u64>,
    rng: RefCell<StdRng>,
}

impl<S: Snapshot, K: KeyValueStorage> Store<S, K> {
    /// Creates a store over `storage`, loading the snapshot under the default key.
    pub fn open(storage: K) -> Self {
        Self::with_options(storage, StoreOptions::default())
    }

    pub fn with_options(storage: K, options: StoreOptions) -> Self {
        let key = options
            .storage_key
            .unwrap_or_else(|| S::DEFAULT_STORAGE_KEY.to_string());
        let repo = SnapshotRepository::new(storage, key);
        let state = repo.load::<S>();
        let rng = match options.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        info!(
            "event=store_open module=store status=ok snapshot={} key={} seeded={}",
            S::NAME,
            repo.key(),
            options.rng_seed.is_some()
        );

        Self {
            repo,
            state: RefCell::new(Rc::new(state)),
            subscribers: RefCell::default(),
            next_token: Cell::new(1),
            rng: RefCell::new(rng),
        }
    }

    /// Current snapshot. Callers share it; mutations go through the store.
    pub fn get_state(&self) -> Rc<S> {
        Rc::clone(&self.state.borrow())
    }

    pub fn storage(&self) -> &K {
        self.repo.storage()
    }

    pub fn storage_key(&self) -> &str {
        self.repo.key()
    }

    /// Registers `handler` and immediately calls it with `(None, current)`.
    ///
    /// A handler already registered (same `Rc`) is not added again; its
    /// original token is returned.
    pub fn subscribe(&self, handler: Subscriber<S>) -> SubscriptionToken {
        let existing = self
            .subscribers
            .borrow()
            .iter()
            .find(|(_, registered)| Rc::ptr_eq(registered, &handler))
            .map(|(token, _)| *token);

        let token = match existing {
            Some(token) => token,
            None => {
                let token = SubscriptionToken(self.next_token.get());
                self.next_token.set(token.0 + 1);
                self.subscribers
                    .borrow_mut()
                    .insert(token, Rc::clone(&handler));
                token
            }
        };

        let current = self.get_state();
        handler(None, &*current);
        token
    }

    /// Convenience wrapper for closures that are never shared.
    pub fn subscribe_fn(&self, handler: impl Fn(Option<&S>, &S) + 'static) -> SubscriptionToken {
        self.subscribe(Rc::new(handler))
    }

    /// Returns whether `token` was registered.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        self.subscribers.borrow_mut().remove(&token).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    /// Single mutation funnel.
    ///
    /// `updater` returns `None` when nothing changes; the call is then a no-op
    /// and `Ok(false)` is returned. Otherwise the next snapshot is persisted,
    /// committed, and every subscriber is called with `(prev, next)`.
    pub fn update_state(&self, updater: impl FnOnce(&S) -> Option<S>) -> StoreResult<bool> {
        self.update("update_state", updater)
    }

    fn update(&self, op: &'static str, updater: impl FnOnce(&S) -> Option<S>) -> StoreResult<bool> {
        let prev = self.get_state();
        let Some(next) = updater(&*prev) else {
            debug!(
                "event=state_update module=store status=unchanged snapshot={} op={op}",
                S::NAME
            );
            return Ok(false);
        };

        if let Err(err) = self.repo.save(&next) {
            error!(
                "event=state_update module=store status=error snapshot={} op={op} error_code=storage_write_failed error={err}",
                S::NAME
            );
            return Err(StoreError::StorageWrite(err));
        }

        let next = Rc::new(next);
        *self.state.borrow_mut() = Rc::clone(&next);
        debug!(
            "event=state_update module=store status=ok snapshot={} op={op}",
            S::NAME
        );
        self.notify(Some(&*prev), &*next);
        Ok(true)
    }

    fn notify(&self, prev: Option<&S>, next: &S) {
        // Snapshot the set so handlers may (un)subscribe while being notified.
        let handlers: Vec<Subscriber<S>> = self.subscribers.borrow().values().cloned().collect();
        for handler in handlers {
            handler(prev, next);
        }
    }

    fn random_color(&self) -> String {
        S::PALETTE
            .random_color(&mut *self.rng.borrow_mut())
            .to_string()
    }
}
