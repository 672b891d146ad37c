//! Procurement rule engine.
//!
//! `ProcurementService` orchestrates every operation the same way:
//!
//! ```text
//! Command
//!   ↓
//! 1. Read the version of the table that will be written
//!   ↓
//! 2. Load referenced records (agreement, plant, vendor, order)
//!   ↓
//! 3. Run the pure rules from `supplyline_procurement::rules`
//!   ↓
//! 4. Write with `ExpectedVersion::Exact(version)`
//! ```
//!
//! A concurrent writer makes step 4 fail with a conflict; the whole operation
//! is then re-run against fresh reads. This keeps the agreement ceiling
//! (`sum(order quantities) <= agreement quantity`) intact when the service is
//! shared between threads.

use std::collections::BTreeSet;

use chrono::NaiveDate;

use supplyline_core::ExpectedVersion;
use supplyline_procurement::rules::{self, Receipt};
use supplyline_procurement::{
    Agreement, AgreementId, CreatePurchaseAgreement, CreatePurchaseOrder, DateWindow,
    NewAgreement, NewOrder, NewPlant, NewVendor, Order, OrderId, OrderShape, Plant, PlantId,
    ProcurementError, ProcurementResult, ReceivePurchaseOrder, Vendor, VendorId,
};

use crate::clock::{Clock, SystemClock};
use crate::store::{ProcurementStore, RecordStore};

/// Attempts per operation before a write conflict is surfaced to the caller.
const MAX_WRITE_ATTEMPTS: usize = 8;

/// The procurement rule engine, bound to an explicit store handle.
#[derive(Debug)]
pub struct ProcurementService<S, C = SystemClock> {
    store: S,
    clock: C,
}

impl<S> ProcurementService<S, SystemClock> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            clock: SystemClock,
        }
    }
}

impl<S, C> ProcurementService<S, C> {
    pub fn with_clock(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S, C> ProcurementService<S, C>
where
    S: ProcurementStore,
    C: Clock,
{
    fn plants(&self) -> &dyn RecordStore<Plant> {
        &self.store
    }

    fn vendors(&self) -> &dyn RecordStore<Vendor> {
        &self.store
    }

    fn agreements(&self) -> &dyn RecordStore<Agreement> {
        &self.store
    }

    fn orders(&self) -> &dyn RecordStore<Order> {
        &self.store
    }

    /// Today according to the injected clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn register_plant(&self, name: impl Into<String>) -> ProcurementResult<Plant> {
        let plant = self
            .plants()
            .insert(NewPlant::new(name)?, ExpectedVersion::Any)?;
        tracing::info!(plant_id = %plant.id, name = %plant.name, "plant registered");
        Ok(plant)
    }

    pub fn register_vendor(&self, name: impl Into<String>) -> ProcurementResult<Vendor> {
        let vendor = self
            .vendors()
            .insert(NewVendor::new(name)?, ExpectedVersion::Any)?;
        tracing::info!(vendor_id = %vendor.id, name = %vendor.name, "vendor registered");
        Ok(vendor)
    }

    pub fn get_plant(&self, plant_id: PlantId) -> ProcurementResult<Plant> {
        self.plants()
            .get(plant_id)?
            .ok_or(ProcurementError::PlantNotFound(plant_id))
    }

    pub fn get_vendor(&self, vendor_id: VendorId) -> ProcurementResult<Vendor> {
        self.vendors()
            .get(vendor_id)?
            .ok_or(ProcurementError::VendorNotFound(vendor_id))
    }

    /// Create an agreement dated today.
    ///
    /// The window must not be inverted and both parties must exist.
    pub fn create_purchase_agreement(
        &self,
        cmd: CreatePurchaseAgreement,
    ) -> ProcurementResult<Agreement> {
        let result = self.try_create_agreement(&cmd);
        match &result {
            Ok(agreement) => tracing::info!(
                agreement_id = %agreement.id,
                plant_id = %agreement.plant_id,
                vendor_id = %agreement.vendor_id,
                quantity = agreement.quantity,
                "purchase agreement created"
            ),
            Err(err) => tracing::warn!(code = err.code(), error = %err, "purchase agreement rejected"),
        }
        result
    }

    fn try_create_agreement(&self, cmd: &CreatePurchaseAgreement) -> ProcurementResult<Agreement> {
        rules::ensure_positive_quantity(cmd.quantity)?;
        let window = DateWindow::new(cmd.start, cmd.end)?;
        self.get_plant(cmd.plant_id)?;
        self.get_vendor(cmd.vendor_id)?;

        let agreement = self.agreements().insert(
            NewAgreement {
                plant_id: cmd.plant_id,
                vendor_id: cmd.vendor_id,
                agreement_date: self.today(),
                window,
                quantity: cmd.quantity,
            },
            ExpectedVersion::Any,
        )?;
        Ok(agreement)
    }

    /// Create an order, either against an agreement or standalone.
    pub fn create_purchase_order(&self, cmd: CreatePurchaseOrder) -> ProcurementResult<Order> {
        let order_date = cmd.order_date.unwrap_or_else(|| self.today());
        let result = retry_on_conflict("create_purchase_order", || {
            self.try_create_order(&cmd, order_date)
        });
        match &result {
            Ok(order) => tracing::info!(
                order_id = %order.id,
                agreement_id = ?order.agreement_id,
                quantity = order.quantity,
                %order_date,
                "purchase order created"
            ),
            Err(err) => tracing::warn!(code = err.code(), error = %err, "purchase order rejected"),
        }
        result
    }

    fn try_create_order(
        &self,
        cmd: &CreatePurchaseOrder,
        order_date: NaiveDate,
    ) -> ProcurementResult<Order> {
        rules::ensure_positive_quantity(cmd.quantity)?;
        // Read before any check so an interleaved order insert is detected.
        let version = self.orders().version()?;

        match rules::classify_order(cmd.agreement_id, cmd.vendor_id, cmd.plant_id)? {
            OrderShape::AgreementBacked {
                agreement_id,
                vendor_id,
                plant_id,
            } => {
                let agreement = self.get_purchase_agreement(agreement_id)?;
                rules::check_agreement_vendor(&agreement, vendor_id)?;
                if let Some(plant_id) = plant_id {
                    self.get_plant(plant_id)?;
                }

                let existing = self
                    .orders()
                    .filter(&|o: &Order| o.agreement_id == Some(agreement_id))?;
                let committed = rules::committed_quantity(&existing);
                rules::check_quantity_ceiling(&agreement, committed, cmd.quantity)?;
                rules::check_order_date(&agreement, order_date)?;
            }
            OrderShape::Standalone {
                vendor_id,
                plant_id,
            } => {
                self.get_vendor(vendor_id)?;
                self.get_plant(plant_id)?;
            }
        }

        let order = self.orders().insert(
            NewOrder {
                agreement_id: cmd.agreement_id,
                vendor_id: cmd.vendor_id,
                plant_id: cmd.plant_id,
                order_date,
                quantity: cmd.quantity,
            },
            ExpectedVersion::Exact(version),
        )?;
        Ok(order)
    }

    /// Record the delivery of an order (Ordered -> Received).
    ///
    /// Receiving again with the same date returns the order unchanged; a
    /// different date is rejected.
    pub fn receive_purchase_order(&self, cmd: ReceivePurchaseOrder) -> ProcurementResult<Order> {
        let delivery_date = cmd.delivery_date.unwrap_or_else(|| self.today());
        let result = retry_on_conflict("receive_purchase_order", || {
            self.try_receive_order(cmd.order_id, delivery_date)
        });
        match &result {
            Ok(order) => tracing::info!(
                order_id = %order.id,
                %delivery_date,
                "purchase order received"
            ),
            Err(err) => tracing::warn!(
                order_id = %cmd.order_id,
                code = err.code(),
                error = %err,
                "purchase order receipt rejected"
            ),
        }
        result
    }

    fn try_receive_order(
        &self,
        order_id: OrderId,
        delivery_date: NaiveDate,
    ) -> ProcurementResult<Order> {
        let version = self.orders().version()?;
        let mut order = self.get_purchase_order(order_id)?;
        let agreement = match order.agreement_id {
            Some(agreement_id) => Some(self.get_purchase_agreement(agreement_id)?),
            None => None,
        };

        match rules::check_receipt(&order, agreement.as_ref(), delivery_date)? {
            Receipt::AlreadyRecorded => {
                tracing::debug!(order_id = %order.id, "order already received on this date");
                Ok(order)
            }
            Receipt::Record(delivery_date) => {
                order.delivery_date = Some(delivery_date);
                self.orders()
                    .update(order.clone(), ExpectedVersion::Exact(version))?;
                Ok(order)
            }
        }
    }

    pub fn get_purchase_agreement(&self, agreement_id: AgreementId) -> ProcurementResult<Agreement> {
        self.agreements()
            .get(agreement_id)?
            .ok_or(ProcurementError::AgreementNotFound(agreement_id))
    }

    pub fn get_purchase_order(&self, order_id: OrderId) -> ProcurementResult<Order> {
        self.orders()
            .get(order_id)?
            .ok_or(ProcurementError::OrderNotFound(order_id))
    }

    /// Orders placed against an agreement, oldest id first.
    pub fn list_agreement_orders(&self, agreement_id: AgreementId) -> ProcurementResult<Vec<Order>> {
        self.get_purchase_agreement(agreement_id)?;
        let orders = self
            .orders()
            .filter(&|o: &Order| o.agreement_id == Some(agreement_id))?;
        Ok(orders)
    }

    /// The plant's earliest received order, through its agreements or standalone.
    ///
    /// Ties on delivery date resolve to the lowest order id.
    pub fn get_earliest_plant_order(&self, plant_id: PlantId) -> ProcurementResult<Order> {
        let plant_agreements: BTreeSet<AgreementId> = self
            .agreements()
            .filter(&|a: &Agreement| a.plant_id == plant_id)?
            .into_iter()
            .map(|a| a.id)
            .collect();

        let received = self.orders().filter(&|o: &Order| {
            o.delivery_date.is_some() && rules::is_plant_order(o, plant_id, &plant_agreements)
        })?;

        let earliest = rules::earliest_received(&received)
            .cloned()
            .ok_or(ProcurementError::PlantHasNoReceivedOrders(plant_id))?;
        tracing::debug!(
            %plant_id,
            order_id = %earliest.id,
            candidates = received.len(),
            "earliest received order resolved"
        );
        Ok(earliest)
    }
}

fn retry_on_conflict<T>(
    operation: &'static str,
    mut attempt: impl FnMut() -> ProcurementResult<T>,
) -> ProcurementResult<T> {
    let mut attempts = 1;
    loop {
        match attempt() {
            Err(ProcurementError::Conflict(reason)) if attempts < MAX_WRITE_ATTEMPTS => {
                tracing::debug!(operation, attempts, %reason, "write conflict, retrying");
                attempts += 1;
            }
            result => return result,
        }
    }
}
