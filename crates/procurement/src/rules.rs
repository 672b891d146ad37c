//! Order-lifecycle rules.
//!
//! Pure decision functions over already-loaded records. The engine in
//! `supplyline-infra` loads records, calls these in order and persists only when
//! every check passes.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use crate::agreement::Agreement;
use crate::error::{ProcurementError, ProcurementResult};
use crate::ids::{AgreementId, PlantId, VendorId};
use crate::order::{Order, OrderShape};

pub fn ensure_positive_quantity(quantity: i64) -> ProcurementResult<()> {
    if quantity <= 0 {
        return Err(ProcurementError::InvalidQuantity(quantity));
    }
    Ok(())
}

/// Decide the order shape from the supplied references.
///
/// Covers the reference checks that need no lookups: no reference at all, and
/// a standalone order missing its vendor or plant.
pub fn classify_order(
    agreement_id: Option<AgreementId>,
    vendor_id: Option<VendorId>,
    plant_id: Option<PlantId>,
) -> ProcurementResult<OrderShape> {
    match (agreement_id, vendor_id, plant_id) {
        (None, None, _) => Err(ProcurementError::MissingReference),
        (Some(agreement_id), vendor_id, plant_id) => Ok(OrderShape::AgreementBacked {
            agreement_id,
            vendor_id,
            plant_id,
        }),
        (None, Some(vendor_id), Some(plant_id)) => Ok(OrderShape::Standalone {
            vendor_id,
            plant_id,
        }),
        (None, Some(_), None) => Err(ProcurementError::StandaloneReferenceIncomplete),
    }
}

pub fn check_agreement_vendor(
    agreement: &Agreement,
    vendor_id: Option<VendorId>,
) -> ProcurementResult<()> {
    match vendor_id {
        Some(vendor_id) if vendor_id != agreement.vendor_id => {
            Err(ProcurementError::AgreementVendorMismatch {
                agreement_id: agreement.id,
                vendor_id,
            })
        }
        _ => Ok(()),
    }
}

/// Total quantity already ordered, received or not.
pub fn committed_quantity<'a>(orders: impl IntoIterator<Item = &'a Order>) -> i64 {
    orders
        .into_iter()
        .fold(0i64, |sum, order| sum.saturating_add(order.quantity))
}

pub fn check_quantity_ceiling(
    agreement: &Agreement,
    existing: i64,
    requested: i64,
) -> ProcurementResult<()> {
    if existing.saturating_add(requested) > agreement.quantity {
        return Err(ProcurementError::QuantityExceedsAgreement {
            requested,
            existing,
            ceiling: agreement.quantity,
        });
    }
    Ok(())
}

pub fn check_order_date(agreement: &Agreement, order_date: NaiveDate) -> ProcurementResult<()> {
    if !agreement.window.contains(order_date) {
        return Err(ProcurementError::OrderDateOutsideAgreementWindow {
            order_date,
            start: agreement.window.start(),
            end: agreement.window.end(),
        });
    }
    Ok(())
}

/// Outcome of a valid receipt request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Receipt {
    /// First receipt: record this delivery date.
    Record(NaiveDate),
    /// The order was already received on exactly this date; nothing to write.
    AlreadyRecorded,
}

pub fn check_receipt(
    order: &Order,
    agreement: Option<&Agreement>,
    delivery_date: NaiveDate,
) -> ProcurementResult<Receipt> {
    if order.order_date > delivery_date {
        return Err(ProcurementError::DeliveryBeforeOrderDate {
            delivery_date,
            order_date: order.order_date,
        });
    }

    if let Some(agreement) = agreement {
        if !agreement.window.contains(delivery_date) {
            return Err(ProcurementError::DeliveryOutsideAgreementWindow {
                delivery_date,
                start: agreement.window.start(),
                end: agreement.window.end(),
            });
        }
    }

    match order.delivery_date {
        None => Ok(Receipt::Record(delivery_date)),
        Some(received_on) if received_on == delivery_date => Ok(Receipt::AlreadyRecorded),
        Some(received_on) => Err(ProcurementError::OrderAlreadyReceived {
            order_id: order.id,
            received_on,
        }),
    }
}

/// Whether `order` counts towards `plant_id`: through one of the plant's
/// agreements, or as a standalone order naming the plant itself.
pub fn is_plant_order(
    order: &Order,
    plant_id: PlantId,
    plant_agreements: &BTreeSet<AgreementId>,
) -> bool {
    match order.agreement_id {
        Some(agreement_id) => plant_agreements.contains(&agreement_id),
        None => order.plant_id == Some(plant_id),
    }
}

/// Earliest received order; ties on delivery date go to the lowest order id.
pub fn earliest_received<'a>(orders: impl IntoIterator<Item = &'a Order>) -> Option<&'a Order> {
    orders
        .into_iter()
        .filter_map(|order| order.delivery_date.map(|delivered| (delivered, order)))
        .min_by_key(|(delivered, order)| (*delivered, order.id))
        .map(|(_, order)| order)
}
