use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use inventory_types::domain::order::Order;
use inventory_types::domain::product::Product;
use inventory_types::domain::supplier::Supplier;
use inventory_types::ports::repository::{EntityStore, Record, RepoError, Repository};
use uuid::Uuid;

/// Hex characters of a v4 uuid kept in generated ids. 48 random bits: the
/// chance of any collision among n ids is about n^2 / 2^49, and inserts
/// re-draw on collision anyway.
const ID_SUFFIX_LEN: usize = 12;

pub fn generate_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &suffix[..ID_SUFFIX_LEN])
}

#[derive(Clone)]
struct Slot<T> {
    seq: u64,
    record: T,
}

/// One entity kind's records keyed by id.
#[derive(Clone)]
pub struct MemoryCollection<T: Record> {
    map: Arc<DashMap<String, Slot<T>>>,
    next_seq: Arc<AtomicU64>,
}

impl<T: Record> MemoryCollection<T> {
    pub fn new() -> Self {
        Self {
            map: Arc::new(DashMap::new()),
            next_seq: Arc::new(AtomicU64::new(0)),
        }
    }
}

impl<T: Record> Default for MemoryCollection<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Repository<T> for MemoryCollection<T> {
    async fn get(&self, id: &str) -> Result<Option<T>, RepoError> {
        Ok(self.map.get(id).map(|slot| slot.record.clone()))
    }

    async fn list(&self) -> Result<Vec<T>, RepoError> {
        let mut slots: Vec<Slot<T>> = self.map.iter().map(|kv| kv.value().clone()).collect();
        slots.sort_by_key(|slot| slot.seq);
        Ok(slots.into_iter().map(|slot| slot.record).collect())
    }

    async fn insert(&self, new: T::New) -> Result<T, RepoError> {
        loop {
            match self.map.entry(generate_id(T::ID_PREFIX)) {
                Entry::Occupied(_) => continue,
                Entry::Vacant(vacant) => {
                    let record = T::create(vacant.key().clone(), new);
                    let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
                    vacant.insert(Slot {
                        seq,
                        record: record.clone(),
                    });
                    return Ok(record);
                }
            }
        }
    }

    async fn update(&self, id: &str, patch: T::Patch) -> Result<Option<T>, RepoError> {
        if let Some(mut slot) = self.map.get_mut(id) {
            slot.record.apply(patch);
            return Ok(Some(slot.record.clone()));
        }
        Ok(None)
    }

    async fn delete(&self, id: &str) -> Result<bool, RepoError> {
        Ok(self.map.remove(id).is_some())
    }

    async fn count(&self) -> Result<usize, RepoError> {
        Ok(self.map.len())
    }
}

/// Process-wide inventory state. Clones share the same collections.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    products: MemoryCollection<Product>,
    suppliers: MemoryCollection<Supplier>,
    orders: MemoryCollection<Order>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl EntityStore for InMemoryStore {
    type Products = MemoryCollection<Product>;
    type Suppliers = MemoryCollection<Supplier>;
    type Orders = MemoryCollection<Order>;

    fn products(&self) -> &Self::Products {
        &self.products
    }

    fn suppliers(&self) -> &Self::Suppliers {
        &self.suppliers
    }

    fn orders(&self) -> &Self::Orders {
        &self.orders
    }
}
