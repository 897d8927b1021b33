//! Application state - shared across all handlers.

use std::sync::Arc;

use quill_core::ports::{BlogRepository, RateLimiter, TokenService, UserRepository};
use quill_core::services::{AuthService, BlogService};
use quill_infra::{
    Argon2PasswordService, InMemoryBlogRepository, InMemoryRateLimiter, InMemoryUserRepository,
    JwtTokenService,
};

#[cfg(feature = "postgres")]
use quill_infra::{PostgresBlogRepository, PostgresUserRepository, database::connect};

use crate::config::AppConfig;

/// Shared application state. Every collaborator is built once here.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub blogs: BlogService,
    pub auth: AuthService,
    pub tokens: Arc<dyn TokenService>,
    pub rate_limiter: Arc<dyn RateLimiter>,
}

type Stores = (Arc<dyn UserRepository>, Arc<dyn BlogRepository>);

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Self {
        let (users, blogs) = Self::stores(config).await;
        let state = Self::assemble(
            users,
            blogs,
            Arc::new(JwtTokenService::new(config.jwt.clone())),
            Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone())),
        );

        tracing::info!("Application state initialized");
        state
    }

    /// State backed entirely by in-memory stores.
    #[cfg(test)]
    pub fn in_memory(tokens: Arc<dyn TokenService>, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        let (users, blogs) = Self::memory_stores();
        Self::assemble(users, blogs, tokens, rate_limiter)
    }

    fn assemble(
        users: Arc<dyn UserRepository>,
        blogs: Arc<dyn BlogRepository>,
        tokens: Arc<dyn TokenService>,
        rate_limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        let auth = AuthService::new(
            users.clone(),
            Arc::new(Argon2PasswordService::new()),
            tokens.clone(),
        );
        Self {
            blogs: BlogService::new(blogs, users.clone()),
            users,
            auth,
            tokens,
            rate_limiter,
        }
    }

    #[cfg(feature = "postgres")]
    async fn stores(config: &AppConfig) -> Stores {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Self::memory_stores();
        };

        match connect(db_config).await {
            Ok(conn) => (
                Arc::new(PostgresUserRepository::new(conn.clone())),
                Arc::new(PostgresBlogRepository::new(conn)),
            ),
            Err(e) => {
                tracing::error!(
                    "Failed to connect to database: {}. Using in-memory fallback.",
                    e
                );
                Self::memory_stores()
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn stores(_config: &AppConfig) -> Stores {
        tracing::info!("Running without postgres feature - using in-memory stores");
        Self::memory_stores()
    }

    fn memory_stores() -> Stores {
        (
            Arc::new(InMemoryUserRepository::new()),
            Arc::new(InMemoryBlogRepository::new()),
        )
    }
}
