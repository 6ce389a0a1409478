//! Driven port for user persistence adapters and their errors.

use async_trait::async_trait;

use crate::domain::{NewUser, User, UserId};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        /// Repository connection could not be established.
        Connection => "user repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query => "user repository query failed: {message}",
    }
}

/// Storage contract for user records.
///
/// Adapters own identifier assignment: [`UserRepository::insert`] returns the
/// stored record with its fresh [`UserId`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users ordered by identifier.
    async fn list_all(&self) -> Result<Vec<User>, UserPersistenceError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError>;

    /// Store a new user and return it with its assigned identifier.
    async fn insert(&self, user: &NewUser) -> Result<User, UserPersistenceError>;

    /// Overwrite the stored record carrying `user.id()`.
    ///
    /// Returns `None` when the record no longer exists.
    async fn save(&self, user: &User) -> Result<Option<User>, UserPersistenceError>;

    /// Delete a user, returning whether a record was removed.
    async fn remove(&self, id: UserId) -> Result<bool, UserPersistenceError>;
}
