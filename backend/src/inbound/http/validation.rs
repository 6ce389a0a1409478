//! Request body validation gate for the users resource.
//!
//! Rules are plain data: a field name, a predicate over the submitted JSON
//! value, a message, whether `null` is allowed, and whether the rejected
//! value is echoed back. The gate
//! runs over the raw body before any typed conversion so wrong-typed fields
//! are reported as violations instead of deserialisation failures.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Where the offending value was read from. This API only validates bodies.
const BODY_LOCATION: &str = "body";

const INVALID_VALUE: &str = "Invalid value";
const INVALID_AGE: &str = "age must be a positive integer";

/// Whether a payload creates a user or patches an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Required fields must be present.
    Create,
    /// Only the fields present in the body are checked.
    Update,
}

struct FieldRule {
    field: &'static str,
    required_on_create: bool,
    /// `null` is accepted and clears the field.
    nullable: bool,
    accepts: fn(&Value) -> bool,
    message: &'static str,
    echo_value: bool,
}

const USER_RULES: [FieldRule; 3] = [
    FieldRule {
        field: "firstName",
        required_on_create: true,
        nullable: false,
        accepts: is_non_blank_string,
        message: INVALID_VALUE,
        echo_value: false,
    },
    FieldRule {
        field: "lastName",
        required_on_create: false,
        nullable: true,
        accepts: Value::is_string,
        message: INVALID_VALUE,
        echo_value: false,
    },
    FieldRule {
        field: "age",
        required_on_create: false,
        nullable: true,
        accepts: is_non_negative_i32,
        message: INVALID_AGE,
        echo_value: true,
    },
];

fn is_non_blank_string(value: &Value) -> bool {
    value.as_str().is_some_and(|text| !text.trim().is_empty())
}

fn is_non_negative_i32(value: &Value) -> bool {
    whole_i32(value).is_some_and(|number| number >= 0)
}

/// Read a JSON number as a whole `i32`.
///
/// Floats without a fractional part, such as `20.0`, count as whole numbers.
pub(crate) fn whole_i32(value: &Value) -> Option<i32> {
    if let Some(number) = value.as_i64() {
        return i32::try_from(number).ok();
    }
    let number = value.as_f64()?;
    let in_range = (f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&number);
    if !in_range || number.fract() != 0.0 {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        reason = "number is whole and within i32 range"
    )]
    let whole = number as i32;
    Some(whole)
}

/// One failed rule, serialised in the shape clients already consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FieldViolation {
    #[schema(example = "age must be a positive integer")]
    pub msg: String,
    #[schema(example = "age")]
    pub param: String,
    #[schema(example = "body")]
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>, example = -1)]
    pub value: Option<Value>,
}

impl FieldViolation {
    fn new(rule: &FieldRule, submitted: Option<&Value>) -> Self {
        Self {
            msg: rule.message.to_owned(),
            param: rule.field.to_owned(),
            location: BODY_LOCATION.to_owned(),
            value: submitted.filter(|_| rule.echo_value).cloned(),
        }
    }
}

/// Check a user payload against the rule table.
///
/// A non-object body is treated as an object with no fields. `null` is
/// accepted for nullable fields and rejected for the others. Violations are
/// returned in rule order.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use users_backend::inbound::http::validation::{ValidationMode, validate_user_payload};
///
/// let violations = validate_user_payload(&json!({ "lastName": "Doe" }), ValidationMode::Create);
/// assert_eq!(violations.len(), 1);
/// assert_eq!(violations[0].param, "firstName");
/// ```
pub fn validate_user_payload(payload: &Value, mode: ValidationMode) -> Vec<FieldViolation> {
    let empty = Map::new();
    let fields = payload.as_object().unwrap_or(&empty);

    USER_RULES
        .iter()
        .filter_map(|rule| {
            match fields.get(rule.field) {
                Some(Value::Null) if rule.nullable => None,
                Some(value) if (rule.accepts)(value) => None,
                Some(value) => Some(FieldViolation::new(rule, Some(value))),
                None if rule.required_on_create && mode == ValidationMode::Create => {
                    Some(FieldViolation::new(rule, None))
                }
                None => None,
            }
        })
        .collect()
}

/// Rejected payload; rendered as HTTP 400 with an `errors` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, thiserror::Error)]
#[error("request body failed validation ({} violations)", .errors.len())]
pub struct ValidationErrors {
    pub errors: Vec<FieldViolation>,
}

impl ValidationErrors {
    /// Run the gate and turn any violations into an error.
    ///
    /// # Errors
    ///
    /// Returns `Err` carrying every violation when at least one rule fails.
    pub fn check(payload: &Value, mode: ValidationMode) -> Result<(), Self> {
        let errors = validate_user_payload(payload, mode);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }
}

impl ResponseError for ValidationErrors {
    fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}
