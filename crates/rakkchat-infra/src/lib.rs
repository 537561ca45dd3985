//! Infrastructure layer for rakkchat.
//!
//! Contains implementations of the port traits defined in `rakkchat-core`:
//! the reqwest-based chat service client, file-backed and in-memory session
//! stores, plus config loading and data directory resolution.

pub mod config;
pub mod filesystem;
pub mod http;
pub mod storage;
