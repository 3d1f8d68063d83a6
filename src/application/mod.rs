// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//! - [`sync`]: The gallery data sync use case
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer uses application layer services
//!
//! # Example
//!
//! ```ignore
//! use shilpkar_gallery::application::sync::GalleryDataSync;
//! use shilpkar_gallery::infrastructure::memory::MemoryStore;
//!
//! let store = Arc::new(MemoryStore::new());
//! let sync = GalleryDataSync::new(store, path);
//! let mut unsubscribe = sync.start(|state| println!("{} images", state.images.len()));
//! unsubscribe.unsubscribe();
//! ```

pub mod port;
pub mod sync;
