//! `UserRepository` backed by a process-local map.
//!
//! Identifiers come from a counter that only grows, so a deleted id is never
//! handed out again, matching a database sequence.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{NewUser, User, UserId};

#[derive(Debug, Default)]
struct Store {
    last_id: i32,
    users: BTreeMap<UserId, User>,
}

/// In-memory implementation of the [`UserRepository`] port.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("in-memory user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.lock()?.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }

    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;
        store.last_id = next;
        let created = User::new(UserId::new(next), user.clone());
        store.users.insert(created.id(), created.clone());
        Ok(created)
    }

    async fn save(&self, user: &User) -> Result<Option<User>, UserPersistenceError> {
        let mut store = self.lock()?;
        Ok(store.users.get_mut(&user.id()).map(|slot| {
            *slot = user.clone();
            user.clone()
        }))
    }

    async fn remove(&self, id: UserId) -> Result<bool, UserPersistenceError> {
        Ok(self.lock()?.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Age, FirstName};
    use rstest::{fixture, rstest};

    #[fixture]
    fn candidate() -> NewUser {
        NewUser {
            first_name: FirstName::new("John").expect("valid name"),
            last_name: Some("Doe".to_owned()),
            age: Some(Age::new(20).expect("valid age")),
        }
    }

    #[rstest]
    #[tokio::test]
    async fn fresh_store_is_empty() {
        let repo = InMemoryUserRepository::new();
        assert!(repo.list_all().await.expect("list").is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn insert_assigns_sequential_ids(candidate: NewUser) {
        let repo = InMemoryUserRepository::new();

        let first = repo.insert(&candidate).await.expect("insert");
        let second = repo.insert(&candidate).await.expect("insert");

        assert_eq!(first.id(), UserId::new(1));
        assert_eq!(second.id(), UserId::new(2));
        assert_eq!(
            repo.list_all().await.expect("list"),
            vec![first, second]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn removed_ids_are_not_reused(candidate: NewUser) {
        let repo = InMemoryUserRepository::new();
        let first = repo.insert(&candidate).await.expect("insert");

        assert!(repo.remove(first.id()).await.expect("remove"));
        assert!(!repo.remove(first.id()).await.expect("second remove"));
        let next = repo.insert(&candidate).await.expect("insert");

        assert_eq!(next.id(), UserId::new(2));
        assert!(repo.find_by_id(first.id()).await.expect("find").is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn save_overwrites_existing_and_ignores_missing(candidate: NewUser) {
        let repo = InMemoryUserRepository::new();
        let stored = repo.insert(&candidate).await.expect("insert");
        let renamed = User::try_from_parts(stored.id().value(), "Jane", None, None)
            .expect("valid user");

        let saved = repo.save(&renamed).await.expect("save");
        assert_eq!(saved.as_ref(), Some(&renamed));
        assert_eq!(
            repo.find_by_id(stored.id()).await.expect("find"),
            Some(renamed)
        );

        let ghost = User::try_from_parts(99, "Ghost", None, None).expect("valid user");
        assert_eq!(repo.save(&ghost).await.expect("save"), None);
    }
}
