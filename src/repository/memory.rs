//! In-memory repository
//!
//! Insertion-ordered store used by the binary and the tests.

use std::collections::HashMap;

use super::{Entity, Repository};

/// Vec-backed store with a key index.
///
/// `find_all` returns records in insertion order; deleting swaps the last
/// record into the freed slot, so order is only stable between deletes.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: Entity> InMemoryRepository<T> {
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Build a store pre-populated with records. Later duplicates are dropped.
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let mut repository = Self::new();
        for record in records {
            repository.save(record);
        }
        repository
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Entity> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> Repository<T> for InMemoryRepository<T> {
    fn exists_by_id(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    fn find_by_id(&self, id: &str) -> Option<T> {
        self.index.get(id).map(|&slot| self.records[slot].clone())
    }

    fn save(&mut self, entity: T) -> bool {
        if self.index.contains_key(entity.id()) {
            return false;
        }
        self.index.insert(entity.id().to_string(), self.records.len());
        self.records.push(entity);
        true
    }

    fn update(&mut self, entity: T) -> bool {
        match self.index.get(entity.id()) {
            Some(&slot) => {
                self.records[slot] = entity;
                true
            }
            None => false,
        }
    }

    fn delete(&mut self, id: &str) -> bool {
        let Some(slot) = self.index.remove(id) else {
            return false;
        };
        self.records.swap_remove(slot);
        if let Some(moved) = self.records.get(slot) {
            self.index.insert(moved.id().to_string(), slot);
        }
        true
    }

    fn find_all(&self) -> Vec<T> {
        self.records.clone()
    }
}
