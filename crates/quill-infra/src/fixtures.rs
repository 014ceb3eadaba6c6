//! User fixtures - pre-provisioned accounts loaded from JSON.
//!
//! ```json
//! [{"username": "admin", "email": "admin@example.com", "password": "...", "role": "admin"}]
//! ```

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use quill_core::domain::{NewUser, Role};
use quill_core::error::RepoError;
use quill_core::ports::{AuthError, PasswordService, UserRepository};

/// One account in a fixture file.
#[derive(Debug, Clone, Deserialize)]
pub struct UserFixture {
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed fixture: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Fixture user '{0}' cannot have the anonymous role")]
    AnonymousUser(String),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Parse fixture JSON.
pub fn parse_user_fixtures(json: &str) -> Result<Vec<UserFixture>, FixtureError> {
    let fixtures: Vec<UserFixture> = serde_json::from_str(json)?;

    if let Some(bad) = fixtures.iter().find(|f| f.role == Role::Anonymous) {
        return Err(FixtureError::AnonymousUser(bad.username.clone()));
    }

    Ok(fixtures)
}

/// Read and parse a fixture file.
pub fn load_user_fixtures(path: &Path) -> Result<Vec<UserFixture>, FixtureError> {
    let json = std::fs::read_to_string(path)?;
    parse_user_fixtures(&json)
}

/// Create every fixture user that does not exist yet.
///
/// Returns the number of users created.
pub async fn seed_users(
    users: &dyn UserRepository,
    passwords: &dyn PasswordService,
    fixtures: &[UserFixture],
) -> Result<usize, FixtureError> {
    let mut created = 0;

    for fixture in fixtures {
        if users.find_by_username(&fixture.username).await?.is_some() {
            tracing::debug!(username = %fixture.username, "Fixture user already present");
            continue;
        }

        let password_hash = passwords.hash(&fixture.password)?;
        let user = users
            .create(NewUser::with_role(
                fixture.username.clone(),
                fixture.email.clone(),
                password_hash,
                fixture.role,
            ))
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, role = %fixture.role, "Seeded fixture user");
        created += 1;
    }

    Ok(created)
}
