//! CLI subcommand implementations.

pub mod migrate;
pub mod seed;

use secrecy::SecretString;

/// Read the storefront database URL from the environment.
///
/// Accepts `LOCURA_DATABASE_URL`, falling back to `DATABASE_URL` like the
/// storefront server does.
///
/// # Errors
///
/// Returns a message naming the variable when neither is set.
pub fn database_url() -> Result<SecretString, &'static str> {
    dotenvy::dotenv().ok();

    std::env::var("LOCURA_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| "LOCURA_DATABASE_URL not set")
}
