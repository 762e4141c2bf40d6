//! Canonical list of launched tokens, newest first

use gaspad_types::*;
use tracing::{debug, info, warn};

use crate::clock::Clock;
use crate::storage::KeyValueStore;

/// Owns the ordered launch sequence and keeps it in sync with one storage slot
pub struct LaunchStore<S: KeyValueStore> {
    storage: S,
    key: String,
    launches: Vec<Token>,
}

impl<S: KeyValueStore> LaunchStore<S> {
    /// Create a store over `storage` without reading it yet
    pub fn new(storage: S, key: &str) -> Self {
        Self {
            storage,
            key: key.to_string(),
            launches: Vec::new(),
        }
    }

    /// Create a store and load the persisted sequence
    pub fn open(storage: S, key: &str, clock: &dyn Clock) -> Self {
        let mut store = Self::new(storage, key);
        store.load(clock);
        store
    }

    /// Read the persisted sequence
    ///
    /// A missing, unreadable, malformed or empty payload is replaced by the seed
    /// sequence, which is persisted straight away. This never fails.
    pub fn load(&mut self, clock: &dyn Clock) -> &[Token] {
        match self.read_persisted() {
            Some(launches) => {
                debug!("Loaded {} launches from '{}'", launches.len(), self.key);
                self.launches = launches;
            }
            None => {
                let seed = seed_launches(clock.now_ms());
                match serde_json::to_string(&seed) {
                    Ok(payload) => {
                        if let Err(e) = self.storage.set(&self.key, &payload) {
                            warn!("Failed to persist seed launches to '{}': {}", self.key, e);
                        }
                    }
                    Err(e) => warn!("Failed to encode seed launches: {}", e),
                }
                self.launches = seed;
            }
        }

        &self.launches
    }

    fn read_persisted(&self) -> Option<Vec<Token>> {
        let payload = match self.storage.get(&self.key) {
            Ok(Some(payload)) => payload,
            Ok(None) => {
                info!("No persisted launches under '{}', using seed sequence", self.key);
                return None;
            }
            Err(e) => {
                warn!("Failed to read '{}', using seed sequence: {}", self.key, e);
                return None;
            }
        };

        match serde_json::from_str::<Vec<Token>>(&payload) {
            Ok(launches) if !launches.is_empty() => Some(launches),
            Ok(_) => {
                warn!("Persisted launch list under '{}' is empty, using seed sequence", self.key);
                None
            }
            Err(e) => {
                warn!("Malformed launch list under '{}', using seed sequence: {}", self.key, e);
                None
            }
        }
    }

    /// Prepend `token` and persist the full sequence before returning
    ///
    /// On error nothing changes, in memory or in storage.
    pub fn append(&mut self, token: Token) -> GasPadResult<()> {
        token.validate()?;
        if self.contains_id(&token.id) {
            return Err(GasPadError::invalid_parameter("id", &token.id, "an id not already in the store"));
        }

        let mut updated = Vec::with_capacity(self.launches.len() + 1);
        updated.push(token);
        updated.extend(self.launches.iter().cloned());

        let payload = serde_json::to_string(&updated)?;
        self.storage.set(&self.key, &payload)?;

        info!("Appended launch {} (${}), {} total", updated[0].id, updated[0].ticker, updated.len());
        self.launches = updated;
        Ok(())
    }

    /// Every launch, newest first
    pub fn all(&self) -> &[Token] {
        &self.launches
    }

    /// At most `n` of the newest launches
    pub fn latest(&self, n: usize) -> &[Token] {
        &self.launches[..n.min(self.launches.len())]
    }

    pub fn find(&self, id: &str) -> Option<&Token> {
        self.launches.iter().find(|t| t.id == id)
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.launches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.launches.is_empty()
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
