//! Typed identifiers for procurement records.

use serde::{Deserialize, Serialize};

use supplyline_core::RecordId;

/// Plant identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(pub RecordId);

/// Vendor identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VendorId(pub RecordId);

/// Purchase agreement identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgreementId(pub RecordId);

/// Purchase order identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(pub RecordId);

macro_rules! impl_record_id_newtype {
    ($t:ty) => {
        impl $t {
            /// Convenience for tests and wire mapping.
            pub fn from_i64(value: i64) -> Self {
                Self(RecordId::from_i64(value))
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<RecordId> for $t {
            fn from(value: RecordId) -> Self {
                Self(value)
            }
        }
    };
}

impl_record_id_newtype!(PlantId);
impl_record_id_newtype!(VendorId);
impl_record_id_newtype!(AgreementId);
impl_record_id_newtype!(OrderId);
