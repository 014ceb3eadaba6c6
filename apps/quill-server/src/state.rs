//! Application state - shared across all handlers.

use std::sync::Arc;

use thiserror::Error;

use quill_core::domain::Locale;
use quill_core::ports::{AuthError, PasswordService, PostRepository, TokenService, UserRepository};
use quill_infra::{
    Argon2PasswordService, FixtureError, InMemoryPostRepository, InMemoryUserRepository,
    JwtTokenService,
};

use crate::config::{AppConfig, SessionConfig};

/// Errors that stop the server from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Database unavailable: {0}")]
    Database(String),

    #[error("Invalid password hashing settings: {0}")]
    Passwords(#[from] AuthError),

    #[error("Fixture seeding failed: {0}")]
    Fixtures(#[from] FixtureError),
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenService>,
    pub passwords: Arc<dyn PasswordService>,
    pub session: SessionConfig,
    pub locale: Locale,
    /// Backing store name, reported by the health check.
    pub storage: &'static str,
}

impl AppState {
    /// State backed by in-memory repositories.
    pub fn in_memory(tokens: Arc<dyn TokenService>, passwords: Arc<dyn PasswordService>) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
            tokens,
            passwords,
            session: SessionConfig::default(),
            locale: Locale::default(),
            storage: "memory",
        }
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, StartupError> {
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
        let passwords: Arc<dyn PasswordService> =
            Arc::new(Argon2PasswordService::with_config(config.passwords)?);

        let mut state = Self::connect_storage(config, tokens, passwords).await?;
        state.session = config.session.clone();
        state.locale = config.locale;

        if let Some(path) = &config.fixtures_path {
            let fixtures = quill_infra::load_user_fixtures(path)?;
            let created =
                quill_infra::seed_users(state.users.as_ref(), state.passwords.as_ref(), &fixtures)
                    .await?;
            tracing::info!(path = %path.display(), created, "User fixtures loaded");
        }

        tracing::info!(storage = state.storage, "Application state initialized");

        Ok(state)
    }

    #[cfg(feature = "postgres")]
    async fn connect_storage(
        config: &AppConfig,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, StartupError> {
        use migration::{Migrator, MigratorTrait};
        use quill_infra::{PostgresPostRepository, PostgresUserRepository};

        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Ok(Self::in_memory(tokens, passwords));
        };

        let conn = quill_infra::database::connect(db_config)
            .await
            .map_err(|e| StartupError::Database(e.to_string()))?;

        if config.auto_migrate {
            Migrator::up(&conn, None)
                .await
                .map_err(|e| StartupError::Database(e.to_string()))?;
            tracing::info!("Database migrations applied");
        }

        Ok(Self {
            posts: Arc::new(PostgresPostRepository::new(conn.clone())),
            users: Arc::new(PostgresUserRepository::new(conn)),
            tokens,
            passwords,
            session: SessionConfig::default(),
            locale: Locale::default(),
            storage: "postgres",
        })
    }

    #[cfg(not(feature = "postgres"))]
    async fn connect_storage(
        config: &AppConfig,
        tokens: Arc<dyn TokenService>,
        passwords: Arc<dyn PasswordService>,
    ) -> Result<Self, StartupError> {
        if config.database.is_some() {
            return Err(StartupError::Database(
                "DATABASE_URL is set but the server was built without the postgres feature"
                    .to_string(),
            ));
        }
        tracing::info!("Running without postgres feature - using in-memory repositories");
        Ok(Self::in_memory(tokens, passwords))
    }
}
