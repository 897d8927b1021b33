use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::DomainError;

/// Role of an identity. Only owners may author, mutate or delete posts
/// through the owner surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Owner,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Owner => "owner",
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
        match s {
            "user" => Ok(Role::User),
            "owner" => Ok(Role::Owner),
            _ => Err(DomainError::validation(
                "User type must be either 'user' or 'owner'",
            )),
        }
    }
}

/// User entity - an identity known to the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with a generated ID and timestamp.
    pub fn new(
        username: String,
        email: String,
        first_name: String,
        last_name: String,
        role: Role,
        password_hash: String,
    ) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            email,
            first_name,
            last_name,
            role,
            password_hash,
            created_at: Utc::now(),
        }
    }

    /// Display name captured on posts at creation time.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_owner(&self) -> bool {
        self.role == Role::Owner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert!(matches!(
            "admin".parse::<Role>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn test_full_name() {
        let user = User::new(
            "jdoe".into(),
            "jdoe@example.com".into(),
            "John".into(),
            "Doe".into(),
            Role::Owner,
            "hash".into(),
        );
        assert_eq!(user.full_name(), "John Doe");
        assert!(user.is_owner());
    }
}
