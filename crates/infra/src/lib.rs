//! Infrastructure layer: record stores, clock, and the procurement rule engine.

pub mod clock;
pub mod service;
pub mod store;

mod integration_tests;

pub use clock::{Clock, FixedClock, SystemClock};
pub use service::ProcurementService;
pub use store::{InMemoryStore, ProcurementStore, RecordStore, StoreError};
