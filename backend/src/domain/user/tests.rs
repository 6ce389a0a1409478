//! Tests for the domain user model.

use super::*;
use rstest::{fixture, rstest};

#[fixture]
fn stored_user() -> User {
    User::try_from_parts(7, "John", Some("Doe".to_owned()), Some(20)).expect("valid user")
}

#[rstest]
#[case("")]
#[case("   ")]
fn first_name_rejects_blank_values(#[case] raw: &str) {
    assert_eq!(FirstName::new(raw), Err(UserValidationError::EmptyFirstName));
}

#[rstest]
#[case(0)]
#[case(25)]
#[case(i64::from(i32::MAX))]
fn age_accepts_non_negative_values(#[case] raw: i64) {
    let age = Age::new(raw).expect("age within range");
    assert_eq!(i64::from(age.value()), raw);
}

#[rstest]
#[case(-1)]
#[case(i64::from(i32::MAX) + 1)]
fn age_rejects_out_of_range_values(#[case] raw: i64) {
    assert_eq!(
        Age::new(raw),
        Err(UserValidationError::InvalidAge { value: raw })
    );
}

#[rstest]
fn try_from_parts_rejects_invalid_rows() {
    let result = User::try_from_parts(1, "", None, Some(3));
    assert_eq!(result, Err(UserValidationError::EmptyFirstName));
}

#[rstest]
fn new_attaches_identifier(stored_user: User) {
    assert_eq!(stored_user.id(), UserId::new(7));
    assert_eq!(stored_user.first_name().as_ref(), "John");
    assert_eq!(stored_user.last_name(), Some("Doe"));
    assert_eq!(stored_user.age().map(Age::value), Some(20));
}

#[rstest]
fn merge_with_empty_patch_is_identity(stored_user: User) {
    assert_eq!(stored_user.clone().merge(UserPatch::default()), stored_user);
}

#[rstest]
fn merge_overwrites_only_present_fields(stored_user: User) {
    let patch = UserPatch {
        age: Some(Some(Age::new(21).expect("valid age"))),
        ..UserPatch::default()
    };

    let merged = stored_user.merge(patch);

    assert_eq!(merged.id(), UserId::new(7));
    assert_eq!(merged.first_name().as_ref(), "John");
    assert_eq!(merged.last_name(), Some("Doe"));
    assert_eq!(merged.age().map(Age::value), Some(21));
}

#[rstest]
fn merge_replaces_every_field(stored_user: User) {
    let patch = UserPatch {
        first_name: Some(FirstName::new("Jane").expect("valid name")),
        last_name: Some(Some("Smith".to_owned())),
        age: Some(Some(Age::new(25).expect("valid age"))),
    };

    let merged = stored_user.merge(patch);

    assert_eq!(
        merged,
        User::try_from_parts(7, "Jane", Some("Smith".to_owned()), Some(25)).expect("valid user")
    );
}

#[rstest]
fn merge_clears_optional_fields_set_to_none(stored_user: User) {
    let patch = UserPatch {
        last_name: Some(None),
        age: Some(None),
        ..UserPatch::default()
    };

    let merged = stored_user.merge(patch);

    assert_eq!(merged.first_name().as_ref(), "John");
    assert_eq!(merged.last_name(), None);
    assert_eq!(merged.age(), None);
}
