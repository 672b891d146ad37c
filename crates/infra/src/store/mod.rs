//! Record storage abstractions for procurement records.
//!
//! The rule engine only talks to [`RecordStore`]; backends decide how records
//! are kept. Every backend must assign ids in increasing order and bump a
//! per-record-type version on every write so writers can detect interleaving.

pub mod in_memory;
pub mod record;

pub use in_memory::{InMemoryStore, InMemoryTable};
pub use record::{ProcurementStore, Record, RecordStore, StoreError, StoreResult};
