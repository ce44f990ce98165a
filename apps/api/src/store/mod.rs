//! Repository layer. Every dataset in the service sits behind `Repository<T>`,
//! so view handlers never touch storage directly. The only backend is
//! `InMemoryRepository`, seeded at startup from `seed`.

pub mod seed;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::errors::AppError;

/// A stored entity addressable by a UUID.
pub trait Record: Clone + Send + Sync + 'static {
    fn id(&self) -> Uuid;
}

/// Read/write contract shared by all datasets.
///
/// Carried in `AppState` as `Arc<dyn Repository<T>>`.
#[async_trait]
pub trait Repository<T: Record>: Send + Sync {
    /// All records in insertion order.
    async fn list(&self) -> Vec<T>;

    async fn get(&self, id: Uuid) -> Option<T>;

    /// Records matching `predicate`, scanned linearly in insertion order.
    async fn find(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> Vec<T>;

    /// Upsert: replaces the record with the same id in place, or appends it.
    async fn save(&self, record: T) -> T;

    /// Appends `record` unless an existing record matches `conflicts`, in which
    /// case nothing is written and `None` comes back.
    async fn insert_unless(
        &self,
        record: T,
        conflicts: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Option<T>;

    /// Applies `apply` to the record with `id` and returns the updated copy.
    async fn modify(&self, id: Uuid, apply: &(dyn for<'a> Fn(&'a mut T) + Send + Sync))
        -> Option<T>;

    /// Read-modify-write that may reject the change. `apply` runs on a copy
    /// under the write lock; the copy replaces the stored record only on `Ok`.
    /// `Ok(None)` means no record has `id`.
    async fn try_modify(
        &self,
        id: Uuid,
        apply: &(dyn for<'a> Fn(&'a mut T) -> Result<(), AppError> + Send + Sync),
    ) -> Result<Option<T>, AppError>;

    /// Applies `apply` to every record whose id is in `ids`; returns how many changed.
    async fn modify_many(
        &self,
        ids: &[Uuid],
        apply: &(dyn for<'a> Fn(&'a mut T) + Send + Sync),
    ) -> usize;

    async fn remove(&self, id: Uuid) -> Option<T>;
}

pub struct InMemoryRepository<T> {
    records: RwLock<Vec<T>>,
}

impl<T: Record> InMemoryRepository<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }
}

impl<T: Record> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl<T: Record> Repository<T> for InMemoryRepository<T> {
    async fn list(&self) -> Vec<T> {
        self.records.read().await.clone()
    }

    async fn get(&self, id: Uuid) -> Option<T> {
        self.records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned()
    }

    async fn find(&self, predicate: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync)) -> Vec<T> {
        self.records
            .read()
            .await
            .iter()
            .filter(|r| predicate(r))
            .cloned()
            .collect()
    }

    async fn save(&self, record: T) -> T {
        let mut records = self.records.write().await;
        match records.iter_mut().find(|r| r.id() == record.id()) {
            Some(existing) => *existing = record.clone(),
            None => records.push(record.clone()),
        }
        record
    }

    async fn insert_unless(
        &self,
        record: T,
        conflicts: &(dyn for<'a> Fn(&'a T) -> bool + Send + Sync),
    ) -> Option<T> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| conflicts(r)) {
            return None;
        }
        records.push(record.clone());
        Some(record)
    }

    async fn modify(
        &self,
        id: Uuid,
        apply: &(dyn for<'a> Fn(&'a mut T) + Send + Sync),
    ) -> Option<T> {
        let mut records = self.records.write().await;
        let record = records.iter_mut().find(|r| r.id() == id)?;
        apply(record);
        Some(record.clone())
    }

    async fn try_modify(
        &self,
        id: Uuid,
        apply: &(dyn for<'a> Fn(&'a mut T) -> Result<(), AppError> + Send + Sync),
    ) -> Result<Option<T>, AppError> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id() == id) else {
            return Ok(None);
        };
        let mut next = record.clone();
        apply(&mut next)?;
        *record = next.clone();
        Ok(Some(next))
    }

    async fn modify_many(
        &self,
        ids: &[Uuid],
        apply: &(dyn for<'a> Fn(&'a mut T) + Send + Sync),
    ) -> usize {
        let mut records = self.records.write().await;
        let mut changed = 0;
        for record in records.iter_mut().filter(|r| ids.contains(&r.id())) {
            apply(record);
            changed += 1;
        }
        changed
    }

    async fn remove(&self, id: Uuid) -> Option<T> {
        let mut records = self.records.write().await;
        let index = records.iter().position(|r| r.id() == id)?;
        Some(records.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Uuid,
        body: String,
    }

    impl Record for Note {
        fn id(&self) -> Uuid {
            self.id
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: Uuid::new_v4(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_save_replaces_in_place() {
        let first = note("a");
        let second = note("b");
        let repo = InMemoryRepository::new(vec![first.clone(), second.clone()]);

        repo.save(Note {
            id: first.id,
            body: "changed".to_string(),
        })
        .await;

        let all = repo.list().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].body, "changed");
        assert_eq!(all[1], second);
    }

    #[tokio::test]
    async fn test_save_appends_new() {
        let repo = InMemoryRepository::new(vec![note("a")]);
        let added = repo.save(note("b")).await;
        let all = repo.list().await;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].id, added.id);
    }

    #[tokio::test]
    async fn test_remove_preserves_order() {
        let notes = vec![note("a"), note("b"), note("c")];
        let repo = InMemoryRepository::new(notes.clone());

        let removed = repo.remove(notes[1].id).await;
        assert_eq!(removed.map(|n| n.body), Some("b".to_string()));

        let bodies: Vec<_> = repo.list().await.into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["a", "c"]);
        assert!(repo.remove(notes[1].id).await.is_none());
    }

    #[tokio::test]
    async fn test_modify_many_counts_only_matches() {
        let notes = vec![note("a"), note("b"), note("c")];
        let repo = InMemoryRepository::new(notes.clone());

        let changed = repo
            .modify_many(&[notes[0].id, notes[2].id, Uuid::new_v4()], &|n: &mut Note| {
                n.body.push('!')
            })
            .await;

        assert_eq!(changed, 2);
        let bodies: Vec<_> = repo.list().await.into_iter().map(|n| n.body).collect();
        assert_eq!(bodies, vec!["a!", "b", "c!"]);
    }

    #[tokio::test]
    async fn test_insert_unless_skips_on_conflict() {
        let repo = InMemoryRepository::new(vec![note("taken")]);

        let dup = repo
            .insert_unless(note("taken"), &|n: &Note| n.body == "taken")
            .await;
        assert!(dup.is_none());

        let fresh = repo
            .insert_unless(note("free"), &|n: &Note| n.body == "free")
            .await;
        assert_eq!(fresh.map(|n| n.body), Some("free".to_string()));
        assert_eq!(repo.list().await.len(), 2);
    }

    #[tokio::test]
    async fn test_try_modify_rejected_change_is_not_stored() {
        let first = note("a");
        let repo = InMemoryRepository::new(vec![first.clone()]);

        let err = repo
            .try_modify(first.id, &|n: &mut Note| {
                n.body.push_str("-half-done");
                Err(AppError::Validation("nope".to_string()))
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(repo.get(first.id).await, Some(first.clone()));

        let missing = repo
            .try_modify(Uuid::new_v4(), &|_: &mut Note| Ok(()))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_try_modify_keeps_every_write() {
        let log = note("");
        let id = log.id;
        let repo = std::sync::Arc::new(InMemoryRepository::new(vec![log]));

        let tasks: Vec<_> = (0..100)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.try_modify(id, &|n: &mut Note| {
                        n.body.push('x');
                        Ok(())
                    })
                    .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(repo.get(id).await.unwrap().body.len(), 100);
    }

    #[tokio::test]
    async fn test_find_scans_linearly() {
        let repo = InMemoryRepository::new(vec![note("x1"), note("y"), note("x2")]);
        let found = repo.find(&|n: &Note| n.body.starts_with('x')).await;
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].body, "x1");
    }
}
