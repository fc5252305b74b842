//! inventory-repo: in-memory adapter for the inventory store port

pub mod memory;

pub use memory::{InMemoryStore, MemoryCollection};

pub fn build_store() -> InMemoryStore {
    InMemoryStore::new()
}
