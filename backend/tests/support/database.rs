//! Database selection for the Diesel suites.

/// Environment variable naming the PostgreSQL database used by the Diesel
/// suites. The database is truncated between tests.
pub const TEST_DATABASE_URL: &str = "CAFES_TEST_DATABASE_URL";

/// Database URL for the Diesel suites, or `None` with a skip marker printed.
pub fn database_url_or_skip(test: &str) -> Option<String> {
    match std::env::var(TEST_DATABASE_URL) {
        Ok(url) if !url.trim().is_empty() => Some(url),
        _ => {
            eprintln!("SKIP-TEST-DATABASE: {test}: set {TEST_DATABASE_URL} to run");
            None
        }
    }
}
