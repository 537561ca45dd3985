//! Session store adapters.
//!
//! Implements the `SessionStore` trait from `rakkchat-core`: a JSON file in
//! the data directory for the real widget, and a process-local map for
//! ephemeral sessions and tests.

pub mod file;
pub mod memory;

pub use file::FileSessionStore;
pub use memory::MemorySessionStore;
