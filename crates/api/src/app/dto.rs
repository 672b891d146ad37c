use chrono::NaiveDate;
use serde::Deserialize;

use supplyline_procurement::{
    AgreementId, CreatePurchaseAgreement, CreatePurchaseOrder, OrderId, PlantId,
    ReceivePurchaseOrder, VendorId,
};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseAgreementRequest {
    pub plant_id: PlantId,
    pub vendor_id: VendorId,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreatePurchaseOrderRequest {
    pub agreement_id: Option<AgreementId>,
    pub vendor_id: Option<VendorId>,
    pub plant_id: Option<PlantId>,
    pub order_date: Option<NaiveDate>,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct ReceivePurchaseOrderRequest {
    pub order_id: OrderId,
    pub delivery_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct GetPurchaseAgreementRequest {
    pub agreement_id: AgreementId,
}

/// Look up one order by id, or the plant's earliest received order.
#[derive(Debug, Deserialize)]
pub struct GetPurchaseOrderRequest {
    pub order_id: Option<OrderId>,
    pub plant_id: Option<PlantId>,
}

// -------------------------
// Mapping to engine commands
// -------------------------

impl From<CreatePurchaseAgreementRequest> for CreatePurchaseAgreement {
    fn from(req: CreatePurchaseAgreementRequest) -> Self {
        Self {
            plant_id: req.plant_id,
            vendor_id: req.vendor_id,
            start: req.start,
            end: req.end,
            quantity: req.quantity,
        }
    }
}

impl From<CreatePurchaseOrderRequest> for CreatePurchaseOrder {
    fn from(req: CreatePurchaseOrderRequest) -> Self {
        Self {
            quantity: req.quantity,
            order_date: req.order_date,
            agreement_id: req.agreement_id,
            vendor_id: req.vendor_id,
            plant_id: req.plant_id,
        }
    }
}

impl From<ReceivePurchaseOrderRequest> for ReceivePurchaseOrder {
    fn from(req: ReceivePurchaseOrderRequest) -> Self {
        Self {
            order_id: req.order_id,
            delivery_date: req.delivery_date,
        }
    }
}
