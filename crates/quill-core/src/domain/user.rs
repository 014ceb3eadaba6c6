use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// User entity - a pre-provisioned account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Role granted to this account once it is logged in.
    pub fn role(&self) -> Role {
        if self.is_superuser {
            Role::Admin
        } else if self.is_staff {
            Role::Staff
        } else {
            Role::User
        }
    }
}

/// A user that has not been assigned an id yet.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl NewUser {
    /// Build an account whose staff flags grant `role`.
    ///
    /// Administrators are staff as well, so they can open the back-office.
    pub fn with_role(username: String, email: String, password_hash: String, role: Role) -> Self {
        let (is_staff, is_superuser) = match role {
            Role::Admin => (true, true),
            Role::Staff => (true, false),
            Role::User | Role::Anonymous => (false, false),
        };

        Self {
            username,
            email,
            password_hash,
            is_staff,
            is_superuser,
        }
    }
}
