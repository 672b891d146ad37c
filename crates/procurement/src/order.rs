use chrono::NaiveDate;
use serde::Serialize;

use supplyline_core::Entity;

use crate::ids::{AgreementId, OrderId, PlantId, VendorId};

/// Purchase order lifecycle. `Ordered -> Received` is the only transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Ordered,
    Received,
}

/// Purchase order, either placed against an agreement or standalone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    #[serde(rename = "order_id")]
    pub id: OrderId,
    pub agreement_id: Option<AgreementId>,
    pub vendor_id: Option<VendorId>,
    pub plant_id: Option<PlantId>,
    pub order_date: NaiveDate,
    pub delivery_date: Option<NaiveDate>,
    pub quantity: i64,
}

impl Order {
    pub fn status(&self) -> OrderStatus {
        match self.delivery_date {
            Some(_) => OrderStatus::Received,
            None => OrderStatus::Ordered,
        }
    }

    pub fn is_standalone(&self) -> bool {
        self.agreement_id.is_none()
    }
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> Self::Id {
        self.id
    }
}

/// Order awaiting an identifier from the store. Always starts as `Ordered`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    pub agreement_id: Option<AgreementId>,
    pub vendor_id: Option<VendorId>,
    pub plant_id: Option<PlantId>,
    pub order_date: NaiveDate,
    pub quantity: i64,
}

impl NewOrder {
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            agreement_id: self.agreement_id,
            vendor_id: self.vendor_id,
            plant_id: self.plant_id,
            order_date: self.order_date,
            delivery_date: None,
            quantity: self.quantity,
        }
    }
}

/// Which of the two order shapes a set of references describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderShape {
    /// Placed against an agreement; a supplied vendor is only cross-checked.
    AgreementBacked {
        agreement_id: AgreementId,
        vendor_id: Option<VendorId>,
        plant_id: Option<PlantId>,
    },
    Standalone {
        vendor_id: VendorId,
        plant_id: PlantId,
    },
}
