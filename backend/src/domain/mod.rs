//! Domain primitives, ports and services.
//!
//! Public surface:
//! - `Error` / `ErrorCode`: transport-agnostic error envelope.
//! - `User`, `NewUser`, `UserPatch` and their validated fields.
//! - `UserService`: the user resource lifecycle over a `UserRepository`.
//! - `TraceId`: request correlation identifier.

pub mod error;
pub mod ports;
pub mod trace_id;
pub mod user;
pub mod user_service;

pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Age, FirstName, NewUser, User, UserId, UserPatch, UserValidationError};
pub use self::user_service::{USER_NOT_FOUND, UserService};
