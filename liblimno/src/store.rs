//! An in-memory, ordered collection of sample records
use crate::sample::{INITIAL_COUNTER, Record};
use tokio::sync::Mutex;
use tracing::{debug, trace};

struct Inner<R> {
    samples: Vec<R>,
    counter: i64,
}

/// Holds every live record of one schema together with the counter that hands
/// out new ids. Records keep the order in which they were added.
///
/// All operations take a single lock for their whole duration, so concurrent
/// callers never observe a half-applied change and ids are never handed out
/// twice.
pub struct SampleStore<R> {
    inner: Mutex<Inner<R>>,
}

impl<R: Record> SampleStore<R> {
    /// Create a store holding only the schema's seed record
    pub fn new() -> Self {
        Self::with_samples(vec![R::seed()], INITIAL_COUNTER)
    }

    /// Create a store from existing records. `counter` is the last id that was
    /// handed out; the next created record gets `counter + 1`.
    pub fn with_samples(samples: Vec<R>, counter: i64) -> Self {
        Self {
            inner: Mutex::new(Inner { samples, counter }),
        }
    }

    pub async fn list(&self) -> Vec<R> {
        self.inner.lock().await.samples.clone()
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.samples.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.lock().await.samples.is_empty()
    }

    /// The id that the next call to [SampleStore::create] will assign
    pub async fn next_id(&self) -> i64 {
        self.inner.lock().await.counter + 1
    }

    /// Append a new record. Whatever id the payload carries is replaced by the
    /// next value of the id counter. Returns the record as stored.
    pub async fn create(&self, mut sample: R) -> R {
        let mut inner = self.inner.lock().await;
        inner.counter += 1;
        sample.set_id(inner.counter);
        trace!(id = inner.counter, "appending sample");
        inner.samples.push(sample.clone());
        sample
    }

    /// Replace every record with the given id by `sample`. The replacement is
    /// stored as-is, including its own id, even if that differs from `id`.
    ///
    /// Returns `false` if no record matched, in which case nothing changes.
    pub async fn update(&self, id: i64, sample: R) -> bool {
        let mut inner = self.inner.lock().await;
        let mut found = false;
        for existing in inner.samples.iter_mut().filter(|s| s.id() == id) {
            *existing = sample.clone();
            found = true;
        }
        if found && sample.id() != id {
            debug!(id, new_id = sample.id(), "sample id changed by update");
        }
        found
    }

    /// Remove the first record with the given id, keeping the remaining
    /// records in order. Returns the removed record, or `None` if there was
    /// no such record.
    pub async fn delete(&self, id: i64) -> Option<R> {
        let mut inner = self.inner.lock().await;
        let index = inner.samples.iter().position(|s| s.id() == id)?;
        Some(inner.samples.remove(index))
    }
}

impl<R: Record> Default for SampleStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{ExpandedSample, MinimalSample, SEED_ID};
    use std::sync::Arc;
    use test_log::test;

    fn minimal(id: i64, title: &str) -> MinimalSample {
        MinimalSample {
            id,
            title: Some(title.to_string()),
            notes: None,
        }
    }

    fn ids<R: Record>(samples: &[R]) -> Vec<i64> {
        samples.iter().map(|s| s.id()).collect()
    }

    #[test(tokio::test)]
    async fn test_new_store_is_seeded() {
        let store = SampleStore::<ExpandedSample>::new();
        let samples = store.list().await;
        assert_eq!(samples, vec![ExpandedSample::seed()]);
        assert_eq!(samples[0].id, SEED_ID);
        assert_eq!(store.len().await, 1);
        assert!(!store.is_empty().await);
        assert_eq!(store.next_id().await, 2);
    }

    #[test(tokio::test)]
    async fn test_create_assigns_increasing_ids() {
        let store = SampleStore::<MinimalSample>::new();
        // a client-supplied id is ignored
        let first = store.create(minimal(99, "first")).await;
        let second = store.create(minimal(0, "second")).await;
        assert_eq!(first.id, 2);
        assert_eq!(second.id, 3);
        assert!(second.id > first.id);

        let samples = store.list().await;
        assert_eq!(ids(&samples), vec![SEED_ID, 2, 3]);
        assert_eq!(samples.last(), Some(&second));
    }

    #[test(tokio::test)]
    async fn test_ids_are_not_reused_after_delete() {
        let store = SampleStore::<MinimalSample>::new();
        let created = store.create(minimal(0, "a")).await;
        assert!(store.delete(created.id).await.is_some());
        let next = store.create(minimal(0, "b")).await;
        assert!(next.id > created.id);
        assert_eq!(ids(&store.list().await), vec![SEED_ID, next.id]);
    }

    #[test(tokio::test)]
    async fn test_update_replaces_record() {
        let store = SampleStore::<MinimalSample>::new();
        let created = store.create(minimal(0, "X")).await;
        let replacement = minimal(created.id, "Y");
        assert!(store.update(created.id, replacement.clone()).await);
        let samples = store.list().await;
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[1], replacement);
    }

    #[test(tokio::test)]
    async fn test_update_writes_payload_id_through() {
        let store = SampleStore::<MinimalSample>::new();
        let created = store.create(minimal(0, "X")).await;
        assert!(store.update(created.id, minimal(40, "moved")).await);
        assert_eq!(ids(&store.list().await), vec![SEED_ID, 40]);
    }

    #[test(tokio::test)]
    async fn test_update_missing_is_noop() {
        let store = SampleStore::<MinimalSample>::new();
        store.create(minimal(0, "X")).await;
        let before = store.list().await;
        assert!(!store.update(1234, minimal(1234, "nope")).await);
        assert_eq!(store.list().await, before);
    }

    #[test(tokio::test)]
    async fn test_delete_keeps_order() {
        let store = SampleStore::<MinimalSample>::new();
        let a = store.create(minimal(0, "a")).await;
        let b = store.create(minimal(0, "b")).await;
        let c = store.create(minimal(0, "c")).await;

        let removed = store.delete(b.id).await.expect("sample should be removed");
        assert_eq!(removed, b);
        assert_eq!(ids(&store.list().await), vec![SEED_ID, a.id, c.id]);
    }

    #[test(tokio::test)]
    async fn test_delete_missing_is_noop() {
        let store = SampleStore::<MinimalSample>::new();
        let before = store.list().await;
        assert!(store.delete(77).await.is_none());
        assert_eq!(store.list().await, before);
    }

    #[test(tokio::test)]
    async fn test_delete_only_removes_first_match() {
        let store = SampleStore::with_samples(vec![minimal(5, "a"), minimal(5, "b")], 5);
        assert_eq!(store.delete(5).await, Some(minimal(5, "a")));
        assert_eq!(store.list().await, vec![minimal(5, "b")]);
    }

    #[test(tokio::test(flavor = "multi_thread", worker_threads = 4))]
    async fn test_concurrent_creates_get_distinct_ids() {
        let store = Arc::new(SampleStore::<MinimalSample>::new());
        let handles: Vec<_> = (0..50)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move { store.create(minimal(0, &n.to_string())).await.id })
            })
            .collect();
        let mut assigned = Vec::new();
        for handle in handles {
            assigned.push(handle.await.expect("task panicked"));
        }
        assigned.sort();
        assigned.dedup();
        assert_eq!(assigned.len(), 50);
        assert_eq!(store.len().await, 51);
        assert_eq!(store.next_id().await, 52);
    }
}
