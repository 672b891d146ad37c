//! Engine inputs.
//!
//! Optional dates default to "today" at the moment the command is executed,
//! never at construction time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ids::{AgreementId, OrderId, PlantId, VendorId};

/// Command: CreatePurchaseAgreement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchaseAgreement {
    pub plant_id: PlantId,
    pub vendor_id: VendorId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub quantity: i64,
}

/// Command: CreatePurchaseOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatePurchaseOrder {
    pub quantity: i64,
    pub order_date: Option<NaiveDate>,
    pub agreement_id: Option<AgreementId>,
    pub vendor_id: Option<VendorId>,
    pub plant_id: Option<PlantId>,
}

impl CreatePurchaseOrder {
    pub fn against_agreement(agreement_id: AgreementId, quantity: i64) -> Self {
        Self {
            quantity,
            order_date: None,
            agreement_id: Some(agreement_id),
            vendor_id: None,
            plant_id: None,
        }
    }

    pub fn standalone(vendor_id: VendorId, plant_id: PlantId, quantity: i64) -> Self {
        Self {
            quantity,
            order_date: None,
            agreement_id: None,
            vendor_id: Some(vendor_id),
            plant_id: Some(plant_id),
        }
    }

    pub fn ordered_on(mut self, order_date: NaiveDate) -> Self {
        self.order_date = Some(order_date);
        self
    }
}

/// Command: ReceivePurchaseOrder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivePurchaseOrder {
    pub order_id: OrderId,
    pub delivery_date: Option<NaiveDate>,
}

impl ReceivePurchaseOrder {
    pub fn new(order_id: OrderId) -> Self {
        Self {
            order_id,
            delivery_date: None,
        }
    }

    pub fn delivered_on(mut self, delivery_date: NaiveDate) -> Self {
        self.delivery_date = Some(delivery_date);
        self
    }
}
