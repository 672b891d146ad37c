use std::collections::BTreeMap;
use std::sync::RwLock;

use supplyline_core::{Entity, ExpectedVersion, RecordId};
use supplyline_procurement::{Agreement, Order, Plant, Vendor};

use super::record::{Record, RecordStore, StoreError, StoreResult};

#[derive(Debug)]
struct Table<R: Record> {
    rows: BTreeMap<R::Id, R>,
    next_id: RecordId,
    version: u64,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: RecordId::FIRST,
            version: 0,
        }
    }
}

/// In-memory table for a single record type.
///
/// Intended for tests/dev. Version checks and the write happen under one
/// write lock, so a conditional insert is atomic.
#[derive(Debug)]
pub struct InMemoryTable<R: Record> {
    inner: RwLock<Table<R>>,
}

impl<R: Record> InMemoryTable<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Table::default()),
        }
    }
}

impl<R: Record> Default for InMemoryTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecordStore<R> for InMemoryTable<R>
where
    R: Record,
    R::Id: From<RecordId> + Send + Sync,
{
    fn get(&self, id: R::Id) -> StoreResult<Option<R>> {
        let table = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.rows.get(&id).cloned())
    }

    fn insert(&self, new: R::New, expected: ExpectedVersion) -> StoreResult<R> {
        let mut table = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        expected.check(table.version)?;

        let id = R::Id::from(table.next_id);
        let record = R::from_new(id, new);
        table.rows.insert(id, record.clone());
        table.next_id = table.next_id.next();
        table.version += 1;
        Ok(record)
    }

    fn update(&self, record: R, expected: ExpectedVersion) -> StoreResult<()> {
        let mut table = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        expected.check(table.version)?;

        let id = record.id();
        match table.rows.get_mut(&id) {
            Some(row) => *row = record,
            None => {
                return Err(StoreError::NotFound {
                    kind: R::KIND,
                    id: format!("{id:?}"),
                });
            }
        }
        table.version += 1;
        Ok(())
    }

    fn filter(&self, predicate: &dyn Fn(&R) -> bool) -> StoreResult<Vec<R>> {
        let table = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table
            .rows
            .values()
            .filter(|record| predicate(record))
            .cloned()
            .collect())
    }

    fn version(&self) -> StoreResult<u64> {
        let table = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(table.version)
    }
}

/// In-memory backend holding all four procurement record types.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    plants: InMemoryTable<Plant>,
    vendors: InMemoryTable<Vendor>,
    agreements: InMemoryTable<Agreement>,
    orders: InMemoryTable<Order>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

macro_rules! delegate_to_table {
    ($record:ty, $field:ident) => {
        impl RecordStore<$record> for InMemoryStore {
            fn get(&self, id: <$record as Entity>::Id) -> StoreResult<Option<$record>> {
                self.$field.get(id)
            }

            fn insert(
                &self,
                new: <$record as Record>::New,
                expected: ExpectedVersion,
            ) -> StoreResult<$record> {
                self.$field.insert(new, expected)
            }

            fn update(&self, record: $record, expected: ExpectedVersion) -> StoreResult<()> {
                self.$field.update(record, expected)
            }

            fn filter(&self, predicate: &dyn Fn(&$record) -> bool) -> StoreResult<Vec<$record>> {
                self.$field.filter(predicate)
            }

            fn version(&self) -> StoreResult<u64> {
                self.$field.version()
            }
        }
    };
}

delegate_to_table!(Plant, plants);
delegate_to_table!(Vendor, vendors);
delegate_to_table!(Agreement, agreements);
delegate_to_table!(Order, orders);
