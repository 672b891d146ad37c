//! Procurement rule failures.

use chrono::NaiveDate;
use thiserror::Error;

use supplyline_core::DomainError;

use crate::ids::{AgreementId, OrderId, PlantId, VendorId};

pub type ProcurementResult<T> = Result<T, ProcurementError>;

/// Every way an engine operation can fail.
///
/// Validation always precedes the write, so any of these leaves persisted
/// state unchanged.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProcurementError {
    #[error("either agreement_id or vendor_id needs to be provided")]
    MissingReference,

    #[error("agreement {agreement_id} does not belong to vendor {vendor_id}")]
    AgreementVendorMismatch {
        agreement_id: AgreementId,
        vendor_id: VendorId,
    },

    #[error(
        "if no agreement_id is given, both vendor_id and plant_id need to be provided for a standalone order"
    )]
    StandaloneReferenceIncomplete,

    #[error(
        "(order quantity) {requested} + (existing quantity) {existing} exceeds agreement quantity {ceiling}"
    )]
    QuantityExceedsAgreement {
        requested: i64,
        existing: i64,
        ceiling: i64,
    },

    #[error("order date {order_date} can not be outside of agreement duration {start} - {end}")]
    OrderDateOutsideAgreementWindow {
        order_date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("delivery date {delivery_date} can not be before order date {order_date}")]
    DeliveryBeforeOrderDate {
        delivery_date: NaiveDate,
        order_date: NaiveDate,
    },

    #[error(
        "order delivery date {delivery_date} can not be outside of agreement duration {start} - {end}"
    )]
    DeliveryOutsideAgreementWindow {
        delivery_date: NaiveDate,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("order {order_id} was already received on {received_on}")]
    OrderAlreadyReceived {
        order_id: OrderId,
        received_on: NaiveDate,
    },

    #[error("can not find purchase order for order id {0}")]
    OrderNotFound(OrderId),

    #[error("can not find purchase agreement for agreement id {0}")]
    AgreementNotFound(AgreementId),

    #[error("can not find plant {0}")]
    PlantNotFound(PlantId),

    #[error("can not find vendor {0}")]
    VendorNotFound(VendorId),

    #[error("no received orders found for plant {0}")]
    PlantHasNoReceivedOrders(PlantId),

    #[error("quantity must be positive, got {0}")]
    InvalidQuantity(i64),

    #[error("agreement window start {start} is after end {end}")]
    InvalidAgreementWindow { start: NaiveDate, end: NaiveDate },

    #[error("validation failed: {0}")]
    Validation(String),

    /// A concurrent write invalidated the checks; safe to retry.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Store(String),
}

impl ProcurementError {
    /// Stable machine-readable identifier (used for wire error bodies).
    pub fn code(&self) -> &'static str {
        match self {
            ProcurementError::MissingReference => "missing_reference",
            ProcurementError::AgreementVendorMismatch { .. } => "agreement_vendor_mismatch",
            ProcurementError::StandaloneReferenceIncomplete => "standalone_reference_incomplete",
            ProcurementError::QuantityExceedsAgreement { .. } => "quantity_exceeds_agreement",
            ProcurementError::OrderDateOutsideAgreementWindow { .. } => {
                "order_date_outside_agreement_window"
            }
            ProcurementError::DeliveryBeforeOrderDate { .. } => "delivery_before_order_date",
            ProcurementError::DeliveryOutsideAgreementWindow { .. } => {
                "delivery_outside_agreement_window"
            }
            ProcurementError::OrderAlreadyReceived { .. } => "order_already_received",
            ProcurementError::OrderNotFound(_) => "order_not_found",
            ProcurementError::AgreementNotFound(_) => "agreement_not_found",
            ProcurementError::PlantNotFound(_) => "plant_not_found",
            ProcurementError::VendorNotFound(_) => "vendor_not_found",
            ProcurementError::PlantHasNoReceivedOrders(_) => "plant_has_no_received_orders",
            ProcurementError::InvalidQuantity(_) => "invalid_quantity",
            ProcurementError::InvalidAgreementWindow { .. } => "invalid_agreement_window",
            ProcurementError::Validation(_) => "validation_error",
            ProcurementError::Conflict(_) => "conflict",
            ProcurementError::Store(_) => "store_error",
        }
    }

    /// Lookup misses, as opposed to rule violations.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ProcurementError::OrderNotFound(_)
                | ProcurementError::AgreementNotFound(_)
                | ProcurementError::PlantNotFound(_)
                | ProcurementError::VendorNotFound(_)
                | ProcurementError::PlantHasNoReceivedOrders(_)
        )
    }
}

impl From<DomainError> for ProcurementError {
    fn from(value: DomainError) -> Self {
        match value {
            DomainError::Conflict(msg) => ProcurementError::Conflict(msg),
        }
    }
}
