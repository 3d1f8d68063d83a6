// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types and `serde_json` values, keeping the
//! application layer independent of concrete transports.
//!
//! # Available Ports
//!
//! - [`store`]: Live subscription to the remote image collection
//!
//! # Design Notes
//!
//! - The store handle is constructed explicitly and injected, never global
//! - Traits are `Send + Sync` so handles can be shared with async tasks
//! - Listeners are plain callbacks; adapters decide which thread calls them

pub mod store;

pub use store::{ImageStore, SnapshotListener, StoreError, StoreEvent, StoreSubscription};
