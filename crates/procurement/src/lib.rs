//! Procurement domain module (plants, vendors, purchase agreements, purchase orders).
//!
//! This crate contains the business rules gating agreement and order creation
//! and order receipt, implemented purely as deterministic domain logic (no IO,
//! no HTTP, no storage).

pub mod agreement;
pub mod command;
pub mod error;
pub mod ids;
pub mod order;
pub mod plant;
pub mod rules;
pub mod vendor;

pub use agreement::{Agreement, DateWindow, NewAgreement};
pub use command::{CreatePurchaseAgreement, CreatePurchaseOrder, ReceivePurchaseOrder};
pub use error::{ProcurementError, ProcurementResult};
pub use ids::{AgreementId, OrderId, PlantId, VendorId};
pub use order::{NewOrder, Order, OrderShape, OrderStatus};
pub use plant::{NewPlant, Plant};
pub use vendor::{NewVendor, Vendor};
