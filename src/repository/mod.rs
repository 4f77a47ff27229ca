//! Repository module
//!
//! The persistence port the services are written against, plus the bundled
//! in-memory implementation.

mod memory;

pub use memory::InMemoryRepository;

/// A record addressable by a string primary key.
pub trait Entity: Clone {
    fn id(&self) -> &str;
}

/// Keyed store for entities.
///
/// Implementations are free to be backed by anything; the services only rely
/// on the contract documented on each method. Results are reported as
/// booleans, a storage failure is indistinguishable from a no-op.
pub trait Repository<T: Entity> {
    /// Whether a record with this ID is stored
    fn exists_by_id(&self, id: &str) -> bool;

    /// Look up a record by ID
    fn find_by_id(&self, id: &str) -> Option<T>;

    /// Insert a new record. Behaviour for an existing ID is up to the
    /// implementation; callers check existence first.
    fn save(&mut self, entity: T) -> bool;

    /// Overwrite an existing record by ID
    fn update(&mut self, entity: T) -> bool;

    /// Remove a record, returning whether anything was removed
    fn delete(&mut self, id: &str) -> bool;

    /// Every stored record
    fn find_all(&self) -> Vec<T>;
}

impl<T: Entity, R: Repository<T> + ?Sized> Repository<T> for Box<R> {
    fn exists_by_id(&self, id: &str) -> bool {
        (**self).exists_by_id(id)
    }

    fn find_by_id(&self, id: &str) -> Option<T> {
        (**self).find_by_id(id)
    }

    fn save(&mut self, entity: T) -> bool {
        (**self).save(entity)
    }

    fn update(&mut self, entity: T) -> bool {
        (**self).update(entity)
    }

    fn delete(&mut self, id: &str) -> bool {
        (**self).delete(id)
    }

    fn find_all(&self) -> Vec<T> {
        (**self).find_all()
    }
}
