//! Data Transfer Objects - request/response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Login form submission.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Where to go after logging in.
    #[serde(default)]
    pub next: Option<String>,
}

/// Public view of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub author: AuthorResponse,
    pub created_at: DateTime<Utc>,
    pub published_at: DateTime<Utc>,
}

/// Public view of a post's author.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub username: String,
}

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub storage: String,
    pub timestamp: DateTime<Utc>,
}
