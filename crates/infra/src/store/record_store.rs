use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};

use plantops_core::{DomainError, DomainResult, RecordId};
use plantops_records::Record;

/// Id-keyed store for one record kind.
///
/// Ids are assigned by the store and never reused. Records are validated
/// before they are written; a failed validation leaves the store unchanged.
pub trait RecordStore<R: Record>: Send + Sync {
    fn insert(&self, new: R::New) -> DomainResult<R>;
    fn get(&self, id: RecordId) -> Option<R>;
    /// All records, ordered by id.
    fn list(&self) -> Vec<R>;
    fn update(&self, id: RecordId, patch: R::Patch) -> DomainResult<R>;
    fn delete(&self, id: RecordId) -> Option<R>;
}

impl<R, S> RecordStore<R> for Arc<S>
where
    R: Record,
    S: RecordStore<R> + ?Sized,
{
    fn insert(&self, new: R::New) -> DomainResult<R> {
        (**self).insert(new)
    }

    fn get(&self, id: RecordId) -> Option<R> {
        (**self).get(id)
    }

    fn list(&self) -> Vec<R> {
        (**self).list()
    }

    fn update(&self, id: RecordId, patch: R::Patch) -> DomainResult<R> {
        (**self).update(id, patch)
    }

    fn delete(&self, id: RecordId) -> Option<R> {
        (**self).delete(id)
    }
}

/// In-memory record store for tests/dev and the default server wiring.
#[derive(Debug)]
pub struct InMemoryRecordStore<R> {
    inner: RwLock<BTreeMap<RecordId, R>>,
    next_id: AtomicU64,
}

impl<R> InMemoryRecordStore<R> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }
}

impl<R> Default for InMemoryRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned<R: Record>() -> DomainError {
    DomainError::invariant(format!("{} store lock poisoned", R::KIND))
}

impl<R: Record> RecordStore<R> for InMemoryRecordStore<R> {
    fn insert(&self, new: R::New) -> DomainResult<R> {
        let mut map = self.inner.write().map_err(|_| poisoned::<R>())?;
        let id = RecordId::new(self.next_id.load(Ordering::SeqCst));
        let record = R::from_new(id, new);
        record.validate()?;
        self.next_id.fetch_add(1, Ordering::SeqCst);
        map.insert(id, record.clone());
        tracing::debug!(kind = R::KIND, id = %id, "record inserted");
        Ok(record)
    }

    fn get(&self, id: RecordId) -> Option<R> {
        let map = self.inner.read().ok()?;
        map.get(&id).cloned()
    }

    fn list(&self) -> Vec<R> {
        match self.inner.read() {
            Ok(map) => map.values().cloned().collect(),
            Err(_) => vec![],
        }
    }

    fn update(&self, id: RecordId, patch: R::Patch) -> DomainResult<R> {
        let mut map = self.inner.write().map_err(|_| poisoned::<R>())?;
        let current = map.get(&id).ok_or_else(DomainError::not_found)?;
        let mut updated = current.clone();
        updated.apply_patch(patch);
        updated.validate()?;
        map.insert(id, updated.clone());
        tracing::debug!(kind = R::KIND, id = %id, "record updated");
        Ok(updated)
    }

    fn delete(&self, id: RecordId) -> Option<R> {
        let mut map = self.inner.write().ok()?;
        let removed = map.remove(&id);
        if removed.is_some() {
            tracing::debug!(kind = R::KIND, id = %id, "record deleted");
        }
        removed
    }
}
