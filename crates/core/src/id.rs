//! Integer record identifiers.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier of a persisted record.
///
/// Identifiers are positive and allocated in increasing order by the record
/// store, so ordering by id is ordering by insertion.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// The first identifier handed out by an empty store.
    pub const FIRST: RecordId = RecordId(1);

    pub fn from_i64(value: i64) -> Self {
        Self(value)
    }

    /// The identifier allocated after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl core::fmt::Display for RecordId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}
