//! Authentication gateway: signup and login.

use std::sync::Arc;

use crate::domain::{Role, User};
use crate::error::DomainError;
use crate::ports::{PasswordService, TokenService, UserRepository};

const MIN_PASSWORD_LEN: usize = 8;

/// Signup input.
#[derive(Debug, Clone, Default)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub password: String,
}

/// A bearer token handed out at login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub access_token: String,
    pub expires_in: i64,
}

/// Verifies credentials and issues tokens.
///
/// Collaborators are injected once at startup.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            passwords,
            tokens,
        }
    }

    /// Register a new identity.
    pub async fn signup(&self, req: NewUser) -> Result<User, DomainError> {
        for (field, value) in [
            ("Username", &req.username),
            ("Email address", &req.email),
            ("First name", &req.first_name),
            ("Last name", &req.last_name),
            ("User type", &req.role),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::Validation(format!("{field} is required")));
            }
        }
        if !req.email.contains('@') {
            return Err(DomainError::validation("Invalid email address"));
        }
        if req.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters"
            )));
        }
        let role: Role = req.role.parse()?;

        if self.users.find_by_username(&req.username).await?.is_some() {
            return Err(DomainError::conflict(
                "A user with the given username is already registered",
            ));
        }
        if self.users.find_by_email(&req.email).await?.is_some() {
            return Err(DomainError::Conflict(format!(
                "The email '{}' is already in use",
                req.email
            )));
        }

        let password_hash = self
            .passwords
            .hash(&req.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let user = User::new(
            req.username,
            req.email,
            req.first_name,
            req.last_name,
            role,
            password_hash,
        );
        let saved = self.users.insert(user).await?;

        tracing::info!(user_id = %saved.id, role = %saved.role, "User registered");
        Ok(saved)
    }

    /// Check credentials and issue a bearer token.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<IssuedToken, DomainError> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::Unauthenticated("User not found".to_string()))?;

        let valid = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;
        if !valid {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::Unauthenticated(
                "Username or password mismatch".to_string(),
            ));
        }

        let access_token = self
            .tokens
            .generate_token(user.id, &user.username, vec![user.role.to_string()])
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, "User logged in");
        Ok(IssuedToken {
            access_token,
            expires_in: self.tokens.expiration_seconds(),
        })
    }
}
