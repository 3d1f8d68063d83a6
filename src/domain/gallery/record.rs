// SPDX-License-Identifier: MPL-2.0
//! Image records and snapshot conversion.
//!
//! The store keeps a mapping from opaque keys to records. Only the values are
//! retained, in the order the payload lists them. That order is defined by the
//! store and may change between snapshots.

use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;

/// Metadata of one gallery image as stored at the collection path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageRecord {
    /// Opaque identifier, unique within one snapshot.
    pub id: String,
    /// Locator of the displayable image.
    pub url: String,
    /// Any other fields carried by the record. Preserved, never interpreted.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ImageRecord {
    /// Creates a record without extra fields.
    #[must_use]
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            extra: Map::new(),
        }
    }

    /// Converts one stored value into a record.
    ///
    /// `key` is the store key of the value and is only used for error
    /// reporting. Numeric ids are accepted and kept in their decimal form.
    pub fn from_value(key: &str, value: &Value) -> Result<Self, SnapshotParseError> {
        let Value::Object(fields) = value else {
            return Err(SnapshotParseError::NotARecord {
                key: key.to_string(),
            });
        };

        let id = match fields.get("id") {
            Some(Value::String(id)) if !id.is_empty() => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(SnapshotParseError::MissingField {
                    key: key.to_string(),
                    field: "id",
                })
            }
        };

        let url = match fields.get("url") {
            Some(Value::String(url)) if !url.trim().is_empty() => url.clone(),
            _ => {
                return Err(SnapshotParseError::MissingField {
                    key: key.to_string(),
                    field: "url",
                })
            }
        };

        let extra = fields
            .iter()
            .filter(|(name, _)| name.as_str() != "id" && name.as_str() != "url")
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect();

        Ok(Self { id, url, extra })
    }
}

/// Reasons a snapshot value cannot be turned into a list of records.
#[derive(Debug, Clone, PartialEq)]
pub enum SnapshotParseError {
    /// The payload is a scalar where a collection was expected.
    UnexpectedPayload(&'static str),

    /// An entry of the collection is not an object.
    NotARecord { key: String },

    /// An entry lacks a required field.
    MissingField { key: String, field: &'static str },
}

impl fmt::Display for SnapshotParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotParseError::UnexpectedPayload(kind) => {
                write!(f, "expected a collection of records, got {kind}")
            }
            SnapshotParseError::NotARecord { key } => {
                write!(f, "entry '{key}' is not a record")
            }
            SnapshotParseError::MissingField { key, field } => {
                write!(f, "entry '{key}' has no usable '{field}'")
            }
        }
    }
}

impl std::error::Error for SnapshotParseError {}

/// Records converted from one snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SnapshotRecords {
    /// Usable records in document order.
    pub images: Vec<ImageRecord>,
    /// Entries left out because they are not usable records.
    pub skipped: Vec<SnapshotParseError>,
}

impl FromIterator<Result<ImageRecord, SnapshotParseError>> for SnapshotRecords {
    fn from_iter<I: IntoIterator<Item = Result<ImageRecord, SnapshotParseError>>>(iter: I) -> Self {
        let mut records = SnapshotRecords::default();
        for entry in iter {
            match entry {
                Ok(record) => records.images.push(record),
                Err(error) => records.skipped.push(error),
            }
        }
        records
    }
}

/// Converts the value delivered at the collection path into ordered records.
///
/// - An absent value, `null`, or an empty collection yields an empty list.
/// - An object yields its values in document order; keys are discarded.
/// - An array (the store's encoding of integer-keyed maps) yields its
///   elements in order, skipping `null` holes.
///
/// Malformed entries are left out and reported in
/// [`SnapshotRecords::skipped`]; only a scalar payload is rejected.
pub fn records_from_snapshot(value: Option<&Value>) -> Result<SnapshotRecords, SnapshotParseError> {
    match value {
        None | Some(Value::Null) => Ok(SnapshotRecords::default()),
        Some(Value::Object(entries)) => Ok(entries
            .iter()
            .map(|(key, entry)| ImageRecord::from_value(key, entry))
            .collect()),
        Some(Value::Array(entries)) => Ok(entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| !entry.is_null())
            .map(|(index, entry)| ImageRecord::from_value(&index.to_string(), entry))
            .collect()),
        Some(Value::Bool(_)) => Err(SnapshotParseError::UnexpectedPayload("a boolean")),
        Some(Value::Number(_)) => Err(SnapshotParseError::UnexpectedPayload("a number")),
        Some(Value::String(_)) => Err(SnapshotParseError::UnexpectedPayload("a string")),
    }
}
