//! Users API handlers.
//!
//! ```text
//! GET    /users
//! GET    /users/{id}
//! POST   /users        {"firstName":"John","lastName":"Doe","age":20}
//! PUT    /users/{id}   {"age":21}
//! DELETE /users/{id}
//! ```
//!
//! Bodies are accepted as raw JSON, checked by the validation gate and only
//! then decoded into the per-operation request DTOs.

use actix_web::{HttpRequest, delete, error::JsonPayloadError, get, post, put, web};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{
    Age, Error, FirstName, NewUser, USER_NOT_FOUND, User, UserId, UserPatch, UserValidationError,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::RequestResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{ValidationErrors, ValidationMode, whole_i32};

/// Confirmation message returned by `DELETE /users/{id}`.
pub const USER_DELETED: &str = "User deleted successfully";

/// Request body for `POST /users`.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    #[schema(example = "John")]
    pub first_name: String,
    #[serde(default)]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "optional_whole_number")]
    #[schema(example = 20, minimum = 0)]
    pub age: Option<i64>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = UserValidationError;

    fn try_from(value: CreateUserRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            first_name: FirstName::new(value.first_name)?,
            last_name: value.last_name,
            age: value.age.map(Age::new).transpose()?,
        })
    }
}

/// Request body for `PUT /users/{id}`.
///
/// Absent fields are kept. `lastName` and `age` sent as `null` are cleared.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>)]
    pub last_name: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "present_whole_number",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<i64>, minimum = 0)]
    pub age: Option<Option<i64>>,
}

impl TryFrom<UpdateUserRequest> for UserPatch {
    type Error = UserValidationError;

    fn try_from(value: UpdateUserRequest) -> Result<Self, Self::Error> {
        let age = value
            .age
            .map(|age| age.map(Age::new).transpose())
            .transpose()?;
        Ok(Self {
            first_name: value.first_name.map(FirstName::new).transpose()?,
            last_name: value.last_name,
            age,
        })
    }
}

/// Mark a field as present, so `null` decodes to `Some(None)` rather than
/// `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

fn optional_whole_number<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer)?
        .map(|value| {
            whole_i32(&value)
                .map(i64::from)
                .ok_or_else(|| serde::de::Error::custom("expected a whole number"))
        })
        .transpose()
}

fn present_whole_number<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
where
    D: Deserializer<'de>,
{
    optional_whole_number(deserializer).map(Some)
}

/// User representation returned by every users endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "John")]
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = 20)]
    pub age: Option<i32>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id().value(),
            first_name: user.first_name().as_ref().to_owned(),
            last_name: user.last_name().map(str::to_owned),
            age: user.age().map(Age::value),
        }
    }
}

/// Body returned by `DELETE /users/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct DeleteUserResponse {
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

fn decode<T: serde::de::DeserializeOwned>(payload: Value) -> Result<T, Error> {
    serde_json::from_value(payload)
        .map_err(|err| Error::invalid_request(format!("request body could not be decoded: {err}")))
}

fn map_user_validation_error(err: UserValidationError) -> Error {
    Error::invalid_request(err.to_string())
}

/// List every stored user.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use users_backend::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Users", body = [UserResponse]),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Persistence unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<UserResponse>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect()))
}

/// Fetch one user by identifier.
#[utoipa::path(
    get,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = UserResponse),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Persistence unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    state
        .users
        .find_user(id)
        .await?
        .map(|user| web::Json(UserResponse::from(user)))
        .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
}

/// Create a user.
///
/// The body is checked against the validation gate before anything is
/// stored; every violation is reported in one `400` response.
#[utoipa::path(
    post,
    path = "/users",
    request_body = CreateUserRequest,
    responses(
        (status = 200, description = "Created user", body = UserResponse),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Persistence unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<Value>,
) -> RequestResult<web::Json<UserResponse>> {
    let payload = payload.into_inner();
    ValidationErrors::check(&payload, ValidationMode::Create)?;
    let request: CreateUserRequest = decode(payload)?;
    let new_user = NewUser::try_from(request).map_err(map_user_validation_error)?;

    let created = state.users_command.create_user(new_user).await?;
    Ok(web::Json(UserResponse::from(created)))
}

/// Apply a partial update to a user.
#[utoipa::path(
    put,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 400, description = "Validation failed", body = ValidationErrors),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Persistence unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<Value>,
) -> RequestResult<web::Json<UserResponse>> {
    let id = UserId::new(path.into_inner());
    let payload = payload.into_inner();
    ValidationErrors::check(&payload, ValidationMode::Update)?;
    // A non-object body carries no fields; treat it as an empty patch.
    let request: UpdateUserRequest = if payload.is_object() {
        decode(payload)?
    } else {
        UpdateUserRequest::default()
    };
    let patch = UserPatch::try_from(request).map_err(map_user_validation_error)?;

    let updated = state.users_command.update_user(id, patch).await?;
    Ok(web::Json(UserResponse::from(updated)))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/users/{id}",
    params(("id" = i32, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = DeleteUserResponse),
        (status = 404, description = "User not found", body = Error),
        (status = 500, description = "Internal server error", body = Error),
        (status = 503, description = "Persistence unavailable", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<web::Json<DeleteUserResponse>> {
    let id = UserId::new(path.into_inner());
    state.users_command.delete_user(id).await?;
    Ok(web::Json(DeleteUserResponse {
        message: USER_DELETED.to_owned(),
    }))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let message = match err {
        JsonPayloadError::ContentType => "request body must be application/json".to_owned(),
        other => format!("request body is not valid JSON: {other}"),
    };
    Error::invalid_request(message).into()
}

fn path_error_handler(_err: actix_web::error::PathError, _req: &HttpRequest) -> actix_web::Error {
    // Ids that are not integers can never address a stored user.
    Error::not_found(USER_NOT_FOUND).into()
}

/// Register the users routes together with their extractor error handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(update_user)
        .service(delete_user);
}
