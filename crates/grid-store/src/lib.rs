//! Snapshot persistence port for the grid dashboard
//!
//! This crate provides the small storage interface the dashboard's layout
//! engine and list widgets persist through, together with two
//! implementations:
//!
//! - [`JsonFileStore`]: a JSON document on disk, written atomically
//!   (temp file, fsync, rename).
//! - [`MemoryStore`]: an in-memory fake that still round-trips values
//!   through `serde_json`, so tests exercise the real document format.
//!
//! # Examples
//!
//! ```
//! use grid_store::{MemoryStore, Store};
//!
//! let store = MemoryStore::<Vec<String>>::new();
//! assert!(store.load().unwrap().is_none());
//!
//! store.save(&vec!["a".to_string()]).unwrap();
//! assert_eq!(store.load().unwrap(), Some(vec!["a".to_string()]));
//! ```

#![warn(missing_docs)]

mod error;
mod file;
mod memory;

pub use error::{Result, StoreError};
pub use file::JsonFileStore;
pub use memory::MemoryStore;

/// Persistence port: loads the last saved value and saves new ones.
///
/// Implementations must be usable behind a shared reference so a single
/// store can be handed to a controller that saves after every mutation.
pub trait Store<T>: Send + Sync {
    /// Load the last saved value.
    ///
    /// Returns `Ok(None)` when nothing has been saved yet.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the backing storage cannot be read and
    /// `StoreError::Parse` if the stored document is corrupt.
    fn load(&self) -> Result<Option<T>>;

    /// Persist `value`, replacing whatever was stored before.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialize` if the value cannot be encoded, or an
    /// I/O flavored error if it cannot be written.
    fn save(&self, value: &T) -> Result<()>;
}

impl<T, S> Store<T> for std::sync::Arc<S>
where
    S: Store<T> + ?Sized,
{
    fn load(&self) -> Result<Option<T>> {
        (**self).load()
    }

    fn save(&self, value: &T) -> Result<()> {
        (**self).save(value)
    }
}
