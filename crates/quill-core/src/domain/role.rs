use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Caller classification used by the authorization gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Staff,
    User,
    Anonymous,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Staff => "staff",
            Role::User => "user",
            Role::Anonymous => "anonymous",
        }
    }

    /// Resolve the strongest role named in a token's role list.
    ///
    /// An authenticated caller is at least `User`, whatever the list holds.
    pub fn from_claims(roles: &[String]) -> Self {
        let parsed: Vec<Role> = roles.iter().filter_map(|r| r.parse().ok()).collect();

        if parsed.contains(&Role::Admin) {
            Role::Admin
        } else if parsed.contains(&Role::Staff) {
            Role::Staff
        } else {
            Role::User
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "staff" => Ok(Role::Staff),
            "user" => Ok(Role::User),
            "anonymous" => Ok(Role::Anonymous),
            _ => Err(DomainError::UnknownRole(s.to_string())),
        }
    }
}
