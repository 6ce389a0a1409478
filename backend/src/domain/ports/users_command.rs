//! Driving port for user mutations.

use async_trait::async_trait;

use crate::domain::{Error, NewUser, User, UserId, UserPatch};

/// Write-side use cases for the user resource.
///
/// Update and delete fail with [`crate::domain::ErrorCode::NotFound`] when the
/// identifier does not resolve to a stored user.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Persist a new user and return it with its assigned identifier.
    async fn create_user(&self, user: NewUser) -> Result<User, Error>;

    /// Merge `patch` onto the stored user and return the result.
    async fn update_user(&self, id: UserId, patch: UserPatch) -> Result<User, Error>;

    /// Permanently remove the user.
    async fn delete_user(&self, id: UserId) -> Result<(), Error>;
}
