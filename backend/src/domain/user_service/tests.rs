//! Tests for the user resource service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::MockUserRepository;
use crate::domain::{Age, ErrorCode, FirstName};

fn make_service(repo: MockUserRepository) -> UserService<MockUserRepository> {
    UserService::new(Arc::new(repo))
}

#[fixture]
fn john() -> User {
    User::try_from_parts(1, "John", Some("Doe".to_owned()), Some(20)).expect("valid user")
}

#[fixture]
fn new_john() -> NewUser {
    NewUser {
        first_name: FirstName::new("John").expect("valid name"),
        last_name: Some("Doe".to_owned()),
        age: Some(Age::new(20).expect("valid age")),
    }
}

#[rstest]
#[tokio::test]
async fn list_users_returns_repository_rows(john: User) {
    let mut repo = MockUserRepository::new();
    let rows = vec![john.clone()];
    repo.expect_list_all().times(1).return_once(move || Ok(rows));

    let users = make_service(repo).list_users().await.expect("list succeeds");

    assert_eq!(users, vec![john]);
}

#[rstest]
#[tokio::test]
async fn list_users_on_empty_store_is_empty() {
    let mut repo = MockUserRepository::new();
    repo.expect_list_all().return_once(|| Ok(Vec::new()));

    let users = make_service(repo).list_users().await.expect("list succeeds");

    assert!(users.is_empty());
}

#[rstest]
#[tokio::test]
async fn find_user_reports_absence_without_error() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(42)))
        .return_once(|_| Ok(None));

    let found = make_service(repo)
        .find_user(UserId::new(42))
        .await
        .expect("lookup succeeds");

    assert!(found.is_none());
}

#[rstest]
#[tokio::test]
async fn create_user_returns_stored_entity(new_john: NewUser, john: User) {
    let mut repo = MockUserRepository::new();
    let expected = new_john.clone();
    let stored = john.clone();
    repo.expect_insert()
        .withf(move |candidate| *candidate == expected)
        .times(1)
        .return_once(move |_| Ok(stored));

    let created = make_service(repo)
        .create_user(new_john)
        .await
        .expect("create succeeds");

    assert_eq!(created, john);
}

#[rstest]
#[tokio::test]
async fn update_user_merges_patch_onto_stored_record(john: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id()
        .with(eq(UserId::new(1)))
        .return_once(move |_| Ok(Some(john)));
    let expected =
        User::try_from_parts(1, "John", Some("Doe".to_owned()), Some(30)).expect("valid user");
    let saved = expected.clone();
    repo.expect_save()
        .withf(move |user| *user == saved)
        .times(1)
        .return_once(|user| Ok(Some(user.clone())));

    let patch = UserPatch {
        age: Some(Some(Age::new(30).expect("valid age"))),
        ..UserPatch::default()
    };
    let updated = make_service(repo)
        .update_user(UserId::new(1), patch)
        .await
        .expect("update succeeds");

    assert_eq!(updated, expected);
}

#[rstest]
#[tokio::test]
async fn update_user_missing_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_save().never();

    let err = make_service(repo)
        .update_user(UserId::new(9), UserPatch::default())
        .await
        .expect_err("missing user must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
    assert_eq!(err.message(), USER_NOT_FOUND);
}

#[rstest]
#[tokio::test]
async fn update_user_deleted_mid_flight_is_not_found(john: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(john)));
    repo.expect_save().return_once(|_| Ok(None));

    let err = make_service(repo)
        .update_user(UserId::new(1), UserPatch::default())
        .await
        .expect_err("vanished user must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn delete_user_removes_existing_record(john: User) {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(move |_| Ok(Some(john)));
    repo.expect_remove()
        .with(eq(UserId::new(1)))
        .times(1)
        .return_once(|_| Ok(true));

    make_service(repo)
        .delete_user(UserId::new(1))
        .await
        .expect("delete succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_user_missing_id_is_not_found() {
    let mut repo = MockUserRepository::new();
    repo.expect_find_by_id().return_once(|_| Ok(None));
    repo.expect_remove().never();

    let err = make_service(repo)
        .delete_user(UserId::new(1))
        .await
        .expect_err("missing user must fail");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case(UserPersistenceError::connection("refused"), ErrorCode::ServiceUnavailable)]
#[case(UserPersistenceError::query("syntax"), ErrorCode::InternalError)]
#[tokio::test]
async fn persistence_failures_map_to_domain_errors(
    #[case] failure: UserPersistenceError,
    #[case] expected: ErrorCode,
) {
    let mut repo = MockUserRepository::new();
    repo.expect_list_all().return_once(move || Err(failure));

    let err = make_service(repo)
        .list_users()
        .await
        .expect_err("repository failure must surface");

    assert_eq!(err.code(), expected);
}
