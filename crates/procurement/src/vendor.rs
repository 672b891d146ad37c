use supplyline_core::Entity;

use crate::error::{ProcurementError, ProcurementResult};
use crate::ids::VendorId;

/// A supplying vendor. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub id: VendorId,
    pub name: String,
}

/// Vendor awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVendor {
    pub name: String,
}

impl NewVendor {
    pub fn new(name: impl Into<String>) -> ProcurementResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProcurementError::Validation(
                "vendor name cannot be empty".to_string(),
            ));
        }
        Ok(Self { name })
    }

    pub fn into_vendor(self, id: VendorId) -> Vendor {
        Vendor {
            id,
            name: self.name,
        }
    }
}

impl Entity for Vendor {
    type Id = VendorId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
