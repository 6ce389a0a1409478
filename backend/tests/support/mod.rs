//! Shared helpers for backend integration tests.

/// Environment variable naming the PostgreSQL database used by the Diesel
/// integration tests.
pub const TEST_DATABASE_URL_ENV: &str = "USERS_TEST_DATABASE_URL";

/// Connection string for the integration database, if one is configured.
///
/// Suites that need PostgreSQL print a skip marker and return early when
/// this is `None`, so the default `cargo test` run needs no database.
pub fn test_database_url() -> Option<String> {
    match std::env::var(TEST_DATABASE_URL_ENV) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {TEST_DATABASE_URL_ENV} is not set");
            None
        }
    }
}
