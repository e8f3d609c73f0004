use std::collections::HashMap;
use std::sync::RwLock;

use crate::{CoreError, Entity, Repository};

/// In-memory repository: a process-local map from identifier to entity
/// behind a read/write lock.
///
/// Mutations hold the write lock for their whole duration; lookups share the
/// read lock, so concurrent readers never block each other. Guards are
/// dropped on every exit path, including error returns. The map insert or
/// remove is the only side effect and happens after the existence check, so
/// a failing call leaves the store in its prior state.
pub struct InMemoryRepository<E: Entity> {
    inner: RwLock<HashMap<String, E>>,
}

impl<E: Entity> InMemoryRepository<E> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn poisoned() -> CoreError {
    CoreError::Repository("lock poisoned".into())
}

impl<E: Entity> Repository for InMemoryRepository<E> {
    type Entity = E;

    fn create(&self, entity: E) -> Result<E, CoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if map.contains_key(entity.id()) {
            return Err(CoreError::AlreadyExists);
        }
        map.insert(entity.id().to_string(), entity.clone());
        Ok(entity)
    }

    fn get_by_id(&self, id: &str) -> Result<E, CoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        map.get(id).cloned().ok_or(CoreError::NotFound)
    }

    fn get_all(&self) -> Result<Vec<E>, CoreError> {
        let map = self.inner.read().map_err(|_| poisoned())?;
        // Fresh vec of clones; the internal map is never handed out.
        Ok(map.values().cloned().collect())
    }

    fn update(&self, entity: E) -> Result<E, CoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        if !map.contains_key(entity.id()) {
            return Err(CoreError::NotFound);
        }
        map.insert(entity.id().to_string(), entity.clone());
        Ok(entity)
    }

    fn delete(&self, id: &str) -> Result<(), CoreError> {
        let mut map = self.inner.write().map_err(|_| poisoned())?;
        match map.remove(id) {
            Some(_) => Ok(()),
            None => Err(CoreError::NotFound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Book;
    use std::sync::Arc;
    use std::thread;

    fn mk_book(id: &str) -> Book {
        Book {
            id: id.to_string(),
            title: "Clean Architecture".to_string(),
            author: "Robert C. Martin".to_string(),
        }
    }

    #[test]
    fn create_get_roundtrip() {
        let repo = InMemoryRepository::new();
        let book = repo.create(mk_book("b1")).expect("created");
        assert_eq!(book, mk_book("b1"));
        let got = repo.get_by_id("b1").expect("found");
        assert_eq!(got, book);
    }

    #[test]
    fn create_rejects_duplicate_and_keeps_original() {
        let repo = InMemoryRepository::new();
        repo.create(mk_book("dup")).expect("created");

        let mut second = mk_book("dup");
        second.title = "Another Title".into();
        let err = repo.create(second).unwrap_err();
        assert_eq!(err, CoreError::AlreadyExists);

        // The stored entity is unaltered by the failed create.
        let got = repo.get_by_id("dup").unwrap();
        assert_eq!(got.title, "Clean Architecture");
    }

    #[test]
    fn get_missing_is_not_found() {
        let repo: InMemoryRepository<Book> = InMemoryRepository::new();
        assert_eq!(repo.get_by_id("nope").unwrap_err(), CoreError::NotFound);
    }

    #[test]
    fn get_all_empty_then_n_entries() {
        let repo = InMemoryRepository::new();
        assert!(repo.get_all().unwrap().is_empty());

        for i in 0..5 {
            repo.create(mk_book(&format!("b{}", i))).unwrap();
        }
        let mut ids: Vec<String> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|b| b.id)
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[test]
    fn update_replaces_or_fails_not_found() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.update(mk_book("b1")).unwrap_err(), CoreError::NotFound);

        repo.create(mk_book("b1")).unwrap();
        let mut replacement = mk_book("b1");
        replacement.author = "Uncle Bob".into();
        repo.update(replacement).expect("updated");
        assert_eq!(repo.get_by_id("b1").unwrap().author, "Uncle Bob");
    }

    #[test]
    fn delete_removes_or_fails_not_found() {
        let repo = InMemoryRepository::new();
        assert_eq!(repo.delete("b1").unwrap_err(), CoreError::NotFound);

        repo.create(mk_book("b1")).unwrap();
        repo.delete("b1").expect("deleted");
        assert_eq!(repo.get_by_id("b1").unwrap_err(), CoreError::NotFound);
    }

    #[test]
    fn concurrent_creates_with_distinct_ids_all_succeed() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = Vec::new();
        for i in 0..8 {
            let repo = Arc::clone(&repo);
            handles.push(thread::spawn(move || {
                repo.create(mk_book(&format!("b{}", i)))
            }));
        }
        for h in handles {
            h.join().expect("thread").expect("created");
        }
        assert_eq!(repo.get_all().unwrap().len(), 8);
        for i in 0..8 {
            repo.get_by_id(&format!("b{}", i)).expect("retrievable");
        }
    }

    #[test]
    fn concurrent_creates_with_same_id_yield_one_winner() {
        let repo = Arc::new(InMemoryRepository::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let repo = Arc::clone(&repo);
            handles.push(thread::spawn(move || repo.create(mk_book("contested"))));
        }
        let results: Vec<_> = handles.into_iter().map(|h| h.join().expect("thread")).collect();

        let successes = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(successes, 1);
        assert!(results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .all(|e| *e == CoreError::AlreadyExists));
        assert_eq!(repo.get_all().unwrap().len(), 1);
    }
}
