//! Integration tests for `DieselUserRepository` against PostgreSQL.
//!
//! The suite runs only when `USERS_TEST_DATABASE_URL` points at a disposable
//! database. Migrations are applied once, then each scenario runs in turn
//! against the same pool. Assertions only touch rows the scenario created, so
//! the database can be shared with other runs.

use rstest::{fixture, rstest};
use users_backend::domain::ports::UserRepository;
use users_backend::domain::{Age, FirstName, NewUser, User, UserId};
use users_backend::outbound::persistence::{
    DbPool, DieselUserRepository, PoolConfig, run_pending_migrations,
};

mod support;

use support::test_database_url;

#[fixture]
fn candidate() -> NewUser {
    NewUser {
        first_name: FirstName::new("Diesel").expect("valid name"),
        last_name: Some("Tester".to_owned()),
        age: Some(Age::new(33).expect("valid age")),
    }
}

async fn repository(database_url: &str) -> DieselUserRepository {
    run_pending_migrations(database_url)
        .await
        .expect("migrations apply");
    let config = PoolConfig::new(database_url).with_max_size(2);
    let pool = DbPool::new(config).await.expect("pool builds");
    DieselUserRepository::new(pool)
}

#[rstest]
#[tokio::test]
async fn diesel_repository_honours_port_contract(candidate: NewUser) {
    let Some(database_url) = test_database_url() else {
        return;
    };
    let repo = repository(&database_url).await;

    user_lifecycle_round_trips(&repo, &candidate).await;
    identifiers_increase_and_are_not_reused(&repo, &candidate).await;
    saving_a_missing_user_reports_absence(&repo).await;
}

async fn user_lifecycle_round_trips(repo: &DieselUserRepository, candidate: &NewUser) {
    let created = repo.insert(candidate).await.expect("insert");
    assert_eq!(created.first_name().as_ref(), "Diesel");
    assert_eq!(created.last_name(), Some("Tester"));
    assert_eq!(created.age().map(Age::value), Some(33));

    let fetched = repo.find_by_id(created.id()).await.expect("find");
    assert_eq!(fetched.as_ref(), Some(&created));
    assert!(
        repo.list_all()
            .await
            .expect("list")
            .iter()
            .any(|user| user.id() == created.id())
    );

    let cleared = User::try_from_parts(created.id().value(), "Renamed", None, Some(34))
        .expect("valid user");
    let saved = repo.save(&cleared).await.expect("save");
    assert_eq!(saved.as_ref(), Some(&cleared));
    assert_eq!(
        repo.find_by_id(created.id()).await.expect("find"),
        Some(cleared)
    );

    assert!(repo.remove(created.id()).await.expect("remove"));
    assert!(!repo.remove(created.id()).await.expect("second remove"));
    assert_eq!(repo.find_by_id(created.id()).await.expect("find"), None);
}

async fn identifiers_increase_and_are_not_reused(
    repo: &DieselUserRepository,
    candidate: &NewUser,
) {
    let first = repo.insert(candidate).await.expect("insert");
    assert!(repo.remove(first.id()).await.expect("remove"));
    let second = repo.insert(candidate).await.expect("insert");

    assert!(second.id() > first.id());
    assert!(repo.remove(second.id()).await.expect("cleanup"));
}

async fn saving_a_missing_user_reports_absence(repo: &DieselUserRepository) {
    let ghost = User::try_from_parts(i32::MAX, "Ghost", None, None).expect("valid user");

    assert_eq!(repo.save(&ghost).await.expect("save"), None);
    assert_eq!(repo.find_by_id(UserId::new(i32::MAX)).await.expect("find"), None);
}
