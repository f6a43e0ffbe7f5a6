//! ShortLoop Storage
//!
//! Local key-value preference layer backing the user's persisted state,
//! primarily the block list. Values are JSON documents keyed by dotted
//! string names, stored in a single-file redb database.

mod error;
mod store;

pub use error::{Result, StorageError};
pub use store::{PreferenceDb, KEY_BLOCKED_CHANNELS, KEY_BLOCKED_VIDEOS};
