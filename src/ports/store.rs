//! Store port: the external key/value + set collaborator.

use std::error::Error;

/// Failure reported by a store adapter.
pub type StoreFailure = Box<dyn Error + Send + Sync>;

/// Key/value and set-valued store shared by every request handler.
///
/// Each method is expected to be atomic on its own; sequences of calls are
/// not. Implementations must be safe to share across threads.
pub trait KeyValueStore: Send + Sync {
    /// Adds `member` to `set`, creating the set if needed.
    ///
    /// Returns `true` if the member was newly added, `false` if it was
    /// already present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or updated.
    fn set_add(&self, set: &str, member: &str) -> Result<bool, StoreFailure>;

    /// Removes `member` from `set`.
    ///
    /// Returns `true` if the member was present.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or updated.
    fn set_remove(&self, set: &str, member: &str) -> Result<bool, StoreFailure>;

    /// Reports whether `member` is in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn set_contains(&self, set: &str, member: &str) -> Result<bool, StoreFailure>;

    /// Returns a uniformly sampled member of `set`, or `None` if it is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn set_random_member(&self, set: &str) -> Result<Option<String>, StoreFailure>;

    /// Returns the number of members in `set`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn set_size(&self, set: &str) -> Result<u64, StoreFailure>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or updated.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreFailure>;

    /// Fetches the value under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached.
    fn get(&self, key: &str) -> Result<Option<String>, StoreFailure>;

    /// Erases the value under `key`. Returns `true` if a value existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be reached or updated.
    fn delete(&self, key: &str) -> Result<bool, StoreFailure>;
}
