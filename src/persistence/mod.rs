//! Debounced save and crash-tolerant restore of the registry.
//!
//! The layout is spread over two keys: `<prefix>.windows` holds the pane
//! records, `<prefix>.active` the active pane id.

mod debounce;
mod snapshot;
mod store;

pub use debounce::Debouncer;
pub use snapshot::{LayoutSnapshot, PersistedPane};
pub use store::{FileStore, KeyValueStore, MemoryStore};

use std::time::Instant;

use crate::config::WmConfig;
use crate::error::PersistError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    pub windows: String,
    pub active: String,
}

impl StorageKeys {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            windows: format!("{prefix}.windows"),
            active: format!("{prefix}.active"),
        }
    }
}

pub struct PersistenceAdapter {
    store: Box<dyn KeyValueStore>,
    keys: StorageKeys,
    debounce: Debouncer,
}

impl std::fmt::Debug for PersistenceAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PersistenceAdapter")
            .field("keys", &self.keys)
            .field("debounce", &self.debounce)
            .finish_non_exhaustive()
    }
}

impl PersistenceAdapter {
    pub fn new(store: impl KeyValueStore + 'static, config: &WmConfig) -> Self {
        Self {
            store: Box::new(store),
            keys: StorageKeys::with_prefix(&config.storage_key_prefix),
            debounce: Debouncer::new(config.save_debounce()),
        }
    }

    /// Read the stored layout. `Ok(None)` when nothing was ever saved.
    ///
    /// An unreadable active id is dropped rather than failing the whole
    /// snapshot; the registry picks a new active pane from the stack.
    pub fn try_load(&self) -> Result<Option<LayoutSnapshot>, PersistError> {
        let Some(raw_windows) = self.store.get(&self.keys.windows)? else {
            return Ok(None);
        };
        let panes = LayoutSnapshot::decode_windows(&raw_windows)?;
        let active_window_id = match self.store.get(&self.keys.active) {
            Ok(Some(raw)) => LayoutSnapshot::decode_active(&raw).unwrap_or_else(|err| {
                tracing::warn!(error = %err, "discarding unreadable active pane id");
                None
            }),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(error = %err, "failed to read active pane id");
                None
            }
        };
        Ok(Some(LayoutSnapshot::new(panes, active_window_id)))
    }

    /// Like [`try_load`](Self::try_load), but any failure means "no prior
    /// state". The failure is logged here and nowhere else.
    pub fn load(&self) -> Option<LayoutSnapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(error = %err, key = %self.keys.windows, "ignoring corrupt layout snapshot");
                None
            }
        }
    }

    /// Restart the debounce window.
    pub fn schedule(&mut self, now: Instant) {
        self.debounce.schedule(now);
    }

    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    pub fn take_due(&mut self, now: Instant) -> bool {
        self.debounce.take_due(now)
    }

    /// Write `snapshot` now. A pending debounce is dropped once the write
    /// succeeds and kept when it fails.
    pub fn save(&mut self, snapshot: &LayoutSnapshot) -> Result<(), PersistError> {
        let windows = snapshot.encode_windows().map_err(PersistError::Encode)?;
        let active = snapshot.encode_active().map_err(PersistError::Encode)?;
        self.store.set(&self.keys.windows, &windows)?;
        self.store.set(&self.keys.active, &active)?;
        self.debounce.cancel();
        Ok(())
    }
}
