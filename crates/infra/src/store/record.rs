use std::sync::Arc;

use thiserror::Error;

use supplyline_core::{DomainError, Entity, ExpectedVersion};
use supplyline_procurement::{
    Agreement, NewAgreement, NewOrder, NewPlant, NewVendor, Order, Plant, ProcurementError,
    Vendor,
};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },

    /// The expected version no longer matches; the caller's reads are stale.
    #[error(transparent)]
    Conflict(#[from] DomainError),

    #[error("store lock poisoned")]
    Poisoned,
}

impl From<StoreError> for ProcurementError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::Conflict(err) => err.into(),
            other => ProcurementError::Store(other.to_string()),
        }
    }
}

/// A persistable procurement record.
pub trait Record: Entity + Clone + core::fmt::Debug + Send + Sync + 'static {
    /// The record before the store has assigned it an id.
    type New: Send;

    /// Record kind used in errors and logs.
    const KIND: &'static str;

    fn from_new(id: Self::Id, new: Self::New) -> Self;
}

impl Record for Plant {
    type New = NewPlant;
    const KIND: &'static str = "plant";

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        new.into_plant(id)
    }
}

impl Record for Vendor {
    type New = NewVendor;
    const KIND: &'static str = "vendor";

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        new.into_vendor(id)
    }
}

impl Record for Agreement {
    type New = NewAgreement;
    const KIND: &'static str = "agreement";

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        new.into_agreement(id)
    }
}

impl Record for Order {
    type New = NewOrder;
    const KIND: &'static str = "order";

    fn from_new(id: Self::Id, new: Self::New) -> Self {
        new.into_order(id)
    }
}

/// CRUD-by-id plus filtered scans over one record type.
pub trait RecordStore<R: Record>: Send + Sync {
    fn get(&self, id: R::Id) -> StoreResult<Option<R>>;

    /// Insert a new record, assigning the next id.
    fn insert(&self, new: R::New, expected: ExpectedVersion) -> StoreResult<R>;

    /// Replace an existing record (matched by id).
    fn update(&self, record: R, expected: ExpectedVersion) -> StoreResult<()>;

    /// All records matching `predicate`, in ascending id order.
    fn filter(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<Vec<R>>;

    /// Current version of this record type; bumped by every write.
    fn version(&self) -> StoreResult<u64>;
}

impl<R, S> RecordStore<R> for Arc<S>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    fn get(&self, id: R::Id) -> StoreResult<Option<R>> {
        (**self).get(id)
    }

    fn insert(&self, new: R::New, expected: ExpectedVersion) -> StoreResult<R> {
        (**self).insert(new, expected)
    }

    fn update(&self, record: R, expected: ExpectedVersion) -> StoreResult<()> {
        (**self).update(record, expected)
    }

    fn filter(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<Vec<R>> {
        (**self).filter(predicate)
    }

    fn version(&self) -> StoreResult<u64> {
        (**self).version()
    }
}

/// Everything the procurement engine needs from a backend.
pub trait ProcurementStore:
    RecordStore<Plant> + RecordStore<Vendor> + RecordStore<Agreement> + RecordStore<Order>
{
}

impl<S> ProcurementStore for S where
    S: RecordStore<Plant> + RecordStore<Vendor> + RecordStore<Agreement> + RecordStore<Order>
{
}
