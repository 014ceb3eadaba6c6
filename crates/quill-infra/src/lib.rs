//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`:
//! SeaORM repositories, in-memory repositories, JWT sessions, Argon2
//! password hashing and JSON user fixtures.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL repositories via SeaORM
//! - `minimal` - In-memory repositories only

pub mod auth;
pub mod database;
pub mod fixtures;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService, PasswordConfig};
pub use database::{DatabaseConfig, InMemoryPostRepository, InMemoryUserRepository};
pub use fixtures::{
    FixtureError, UserFixture, load_user_fixtures, parse_user_fixtures, seed_users,
};

#[cfg(feature = "postgres")]
pub use database::{PostgresPostRepository, PostgresUserRepository};
