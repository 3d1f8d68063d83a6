// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`firebase`]: Realtime database REST streaming client (implements [`ImageStore`])
//! - [`memory`]: In-process store fed from code or a JSON file (implements [`ImageStore`])
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Adapters own transport concerns: reconnection, backoff, credentials
//!
//! [`ImageStore`]: crate::application::port::ImageStore

pub mod firebase;
pub mod memory;

// Re-export main types for convenience
pub use firebase::{FirebaseStore, FirebaseStoreConfig};
pub use memory::MemoryStore;
