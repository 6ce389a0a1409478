//! User data model.
//!
//! A user is created from a [`NewUser`], receives its [`UserId`] from the
//! persistence layer, and is later changed through a [`UserPatch`] that only
//! overwrites the fields it carries.

use std::fmt;

/// Validation errors raised by the user value constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    #[error("first name must not be empty")]
    EmptyFirstName,
    #[error("age must be a positive integer, got {value}")]
    InvalidAge { value: i64 },
}

/// Identifier assigned by the persistence layer when a user is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UserId(i32);

impl UserId {
    pub const fn new(id: i32) -> Self {
        Self(id)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Required first name; never blank.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirstName(String);

impl FirstName {
    /// Validate and construct a [`FirstName`].
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::FirstName;
    ///
    /// assert!(FirstName::new("John").is_ok());
    /// assert!(FirstName::new("  ").is_err());
    /// ```
    pub fn new(first_name: impl Into<String>) -> Result<Self, UserValidationError> {
        let first_name = first_name.into();
        if first_name.trim().is_empty() {
            return Err(UserValidationError::EmptyFirstName);
        }
        Ok(Self(first_name))
    }
}

impl AsRef<str> for FirstName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<FirstName> for String {
    fn from(value: FirstName) -> Self {
        value.0
    }
}

/// Non-negative age in years, bounded by the storage column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Age(i32);

impl Age {
    /// Validate and construct an [`Age`]; zero is accepted, negatives are not.
    pub fn new(age: i64) -> Result<Self, UserValidationError> {
        i32::try_from(age)
            .ok()
            .filter(|value| *value >= 0)
            .map(Self)
            .ok_or(UserValidationError::InvalidAge { value: age })
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

/// Candidate user accepted by the create operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: FirstName,
    pub last_name: Option<String>,
    pub age: Option<Age>,
}

/// Partial update.
///
/// An outer `None` keeps the stored value. For the optional fields
/// `Some(None)` clears the stored value and `Some(Some(_))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub first_name: Option<FirstName>,
    pub last_name: Option<Option<String>>,
    pub age: Option<Option<Age>>,
}

/// Persisted user record.
///
/// ## Invariants
/// - `id` is assigned by persistence and never changes.
/// - `first_name` is non-blank; `age`, when present, is non-negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    first_name: FirstName,
    last_name: Option<String>,
    age: Option<Age>,
}

impl User {
    /// Attach a persistence-assigned identifier to a candidate user.
    pub fn new(id: UserId, new_user: NewUser) -> Self {
        let NewUser {
            first_name,
            last_name,
            age,
        } = new_user;
        Self {
            id,
            first_name,
            last_name,
            age,
        }
    }

    /// Rebuild a user from raw stored values.
    pub fn try_from_parts(
        id: i32,
        first_name: impl Into<String>,
        last_name: Option<String>,
        age: Option<i32>,
    ) -> Result<Self, UserValidationError> {
        let new_user = NewUser {
            first_name: FirstName::new(first_name)?,
            last_name,
            age: age.map(|value| Age::new(i64::from(value))).transpose()?,
        };
        Ok(Self::new(UserId::new(id), new_user))
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn first_name(&self) -> &FirstName {
        &self.first_name
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn age(&self) -> Option<Age> {
        self.age
    }

    /// Overwrite the fields present in `patch`, keeping the identifier.
    ///
    /// A present-but-empty optional field clears the stored value.
    ///
    /// # Examples
    /// ```
    /// use users_backend::domain::{FirstName, User, UserPatch};
    ///
    /// let user = User::try_from_parts(1, "John", Some("Doe".to_owned()), Some(20))
    ///     .expect("valid user");
    /// let patch = UserPatch {
    ///     first_name: Some(FirstName::new("Jane").expect("valid name")),
    ///     ..UserPatch::default()
    /// };
    /// let merged = user.merge(patch);
    /// assert_eq!(merged.first_name().as_ref(), "Jane");
    /// assert_eq!(merged.last_name(), Some("Doe"));
    /// ```
    #[must_use]
    pub fn merge(self, patch: UserPatch) -> Self {
        let UserPatch {
            first_name,
            last_name,
            age,
        } = patch;
        Self {
            id: self.id,
            first_name: first_name.unwrap_or(self.first_name),
            last_name: last_name.unwrap_or(self.last_name),
            age: age.unwrap_or(self.age),
        }
    }
}

#[cfg(test)]
mod tests;
