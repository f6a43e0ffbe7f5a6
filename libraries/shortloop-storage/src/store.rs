//! Key-value preference storage backed by redb.
//!
//! Preferences are stored as string keys with JSON-serialized values. The
//! block list occupies two keys, one string set per kind of identifier.

use crate::error::{Result, StorageError};
use redb::{Database, TableDefinition, TableError};
use shortloop_core::{BlockList, ChannelId, PreferenceStore, VideoId};
use std::collections::HashSet;
use std::path::Path;
use tracing::debug;

const PREFERENCES: TableDefinition<&str, &str> = TableDefinition::new("preferences");

// Preference key constants
/// Blocked video identifiers (JSON string array)
pub const KEY_BLOCKED_VIDEOS: &str = "blocklist.videos";

/// Blocked channel identifiers (JSON string array)
pub const KEY_BLOCKED_CHANNELS: &str = "blocklist.channels";

/// File-backed preference store.
///
/// # Example
///
/// ```rust,no_run
/// use shortloop_core::PreferenceStore;
/// use shortloop_storage::PreferenceDb;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = PreferenceDb::open("shortloop.redb")?;
/// let block_list = store.load_block_list()?;
/// println!("{} blocked entries", block_list.len());
/// # Ok(())
/// # }
/// ```
pub struct PreferenceDb {
    db: Database,
}

impl PreferenceDb {
    /// Open (or create) the preference database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = Database::create(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "Opened preference store");
        Ok(Self { db })
    }

    /// Read one preference value, or `None` when the key was never written.
    pub fn get(&self, key: &str) -> Result<Option<serde_json::Value>> {
        let read_txn = self.db.begin_read()?;
        let table = match read_txn.open_table(PREFERENCES) {
            Ok(table) => table,
            // A fresh database has no table until the first write
            Err(TableError::TableDoesNotExist(_)) => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        match table.get(key)? {
            Some(raw) => {
                let value = serde_json::from_str(raw.value())
                    .map_err(|e| StorageError::Serialization(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Write one preference value, replacing any previous one.
    pub fn set(&self, key: &str, value: &serde_json::Value) -> Result<()> {
        let raw =
            serde_json::to_string(value).map_err(|e| StorageError::Serialization(e.to_string()))?;

        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PREFERENCES)?;
            table.insert(key, raw.as_str())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Remove one preference key. Missing keys are not an error.
    pub fn remove(&self, key: &str) -> Result<()> {
        let write_txn = self.db.begin_write()?;
        {
            let mut table = write_txn.open_table(PREFERENCES)?;
            table.remove(key)?;
        }
        write_txn.commit()?;
        Ok(())
    }

    fn load_id_set(&self, key: &str) -> Result<HashSet<String>> {
        match self.get(key)? {
            Some(value) => serde_json::from_value(value)
                .map_err(|e| StorageError::Serialization(e.to_string())),
            None => Ok(HashSet::new()),
        }
    }

    fn load_block_list_inner(&self) -> Result<BlockList> {
        let videos = self.load_id_set(KEY_BLOCKED_VIDEOS)?;
        let channels = self.load_id_set(KEY_BLOCKED_CHANNELS)?;

        let block_list = BlockList {
            videos: videos.into_iter().map(VideoId::new).collect(),
            channels: channels.into_iter().map(ChannelId::new).collect(),
        };

        debug!(entries = block_list.len(), "Loaded block list");
        Ok(block_list)
    }

    fn save_block_list_inner(&self, block_list: &BlockList) -> Result<()> {
        let videos = serde_json::to_value(&block_list.videos)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        let channels = serde_json::to_value(&block_list.channels)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;

        self.set(KEY_BLOCKED_VIDEOS, &videos)?;
        self.set(KEY_BLOCKED_CHANNELS, &channels)?;

        debug!(entries = block_list.len(), "Saved block list");
        Ok(())
    }
}

impl PreferenceStore for PreferenceDb {
    fn load_block_list(&self) -> shortloop_core::Result<BlockList> {
        self.load_block_list_inner().map_err(Into::into)
    }

    fn save_block_list(&self, block_list: &BlockList) -> shortloop_core::Result<()> {
        self.save_block_list_inner(block_list).map_err(Into::into)
    }
}
