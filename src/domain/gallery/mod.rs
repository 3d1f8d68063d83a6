// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.

mod newtypes;
mod record;

pub use newtypes::{slide_limit_bounds, CollectionPath, InvalidCollectionPath, SlideLimit};
pub use record::{records_from_snapshot, ImageRecord, SnapshotParseError, SnapshotRecords};
