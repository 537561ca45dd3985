//! SessionStore trait for the durable key-value store.
//!
//! Defined in rakkchat-core so the session identity manager can persist its
//! identifier without depending on any storage backend. The file-backed and
//! in-memory adapters live in rakkchat-infra.

use rakkchat_types::error::StorageError;

/// A durable, string-valued key-value store scoped to one user profile.
///
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait SessionStore: Send + Sync {
    /// Read the value under `key`, `None` if never written or removed.
    fn get(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Write `value` under `key`, replacing any previous value.
    fn set(
        &self,
        key: &str,
        value: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;

    /// Remove `key`. Removing a missing key is not an error.
    fn remove(
        &self,
        key: &str,
    ) -> impl std::future::Future<Output = Result<(), StorageError>> + Send;
}
