//! Driving port for user reads.
//!
//! HTTP handlers depend on this trait rather than on persistence adapters so
//! they can be exercised against any backing store.

use async_trait::async_trait;

use crate::domain::{Error, User, UserId};

/// Read-side use cases for the user resource.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Every stored user, ordered by identifier.
    async fn list_users(&self) -> Result<Vec<User>, Error>;

    /// The user with `id`, or `None` when it does not exist.
    async fn find_user(&self, id: UserId) -> Result<Option<User>, Error>;
}
