use supplyline_core::Entity;

use crate::error::{ProcurementError, ProcurementResult};
use crate::ids::PlantId;

/// A receiving plant. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plant {
    pub id: PlantId,
    pub name: String,
}

/// Plant awaiting an identifier from the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPlant {
    pub name: String,
}

impl NewPlant {
    pub fn new(name: impl Into<String>) -> ProcurementResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ProcurementError::Validation(
                "plant name cannot be empty".to_string(),
            ));
        }
        Ok(Self { name })
    }

    pub fn into_plant(self, id: PlantId) -> Plant {
        Plant {
            id,
            name: self.name,
        }
    }
}

impl Entity for Plant {
    type Id = PlantId;

    fn id(&self) -> Self::Id {
        self.id
    }
}
