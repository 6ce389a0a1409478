//! User resource service.
//!
//! Implements the driving ports on top of a [`UserRepository`]. The service
//! keeps no state between calls; the repository owns the canonical records.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{UserPersistenceError, UserRepository, UsersCommand, UsersQuery};
use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Message returned when an identifier does not resolve to a stored user.
pub const USER_NOT_FOUND: &str = "User not found";

/// User service implementing [`UsersQuery`] and [`UsersCommand`].
pub struct UserService<R: ?Sized> {
    repository: Arc<R>,
}

impl<R: ?Sized> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: ?Sized> UserService<R> {
    /// Create a service over the given repository.
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }
}

impl<R> UserService<R>
where
    R: UserRepository + ?Sized,
{
    fn map_persistence_error(error: UserPersistenceError) -> Error {
        match error {
            UserPersistenceError::Connection { message } => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            UserPersistenceError::Query { message } => {
                Error::internal(format!("user repository error: {message}"))
            }
        }
    }

    async fn load(&self, id: UserId) -> Result<User, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[async_trait]
impl<R> UsersQuery for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn list_users(&self) -> Result<Vec<User>, Error> {
        self.repository
            .list_all()
            .await
            .map_err(Self::map_persistence_error)
    }

    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error> {
        self.repository
            .find_by_id(id)
            .await
            .map_err(Self::map_persistence_error)
    }
}

#[async_trait]
impl<R> UsersCommand for UserService<R>
where
    R: UserRepository + ?Sized,
{
    async fn create_user(&self, user: NewUser) -> Result<User, Error> {
        let created = self
            .repository
            .insert(&user)
            .await
            .map_err(Self::map_persistence_error)?;
        info!(user_id = %created.id(), "user created");
        Ok(created)
    }

    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error> {
        let existing = self.load(id).await?;
        let merged = existing.merge(patch);
        let saved = self
            .repository
            .save(&merged)
            .await
            .map_err(Self::map_persistence_error)?
            // Deleted between the load and the save.
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))?;
        info!(user_id = %id, "user updated");
        Ok(saved)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), Error> {
        let existing = self.load(id).await?;
        let removed = self
            .repository
            .remove(existing.id())
            .await
            .map_err(Self::map_persistence_error)?;
        if !removed {
            return Err(Error::not_found(USER_NOT_FOUND));
        }
        info!(user_id = %id, "user deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests;
