//! # Quill Infrastructure
//!
//! Concrete implementations of the ports defined in `quill-core`.
//! This crate contains the blog and identity stores, token and password
//! services and the rate limiter.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL stores via SeaORM. Without it only the
//!   in-memory stores are available.

pub mod auth;
pub mod database;
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtConfig, JwtTokenService};
pub use database::{InMemoryBlogRepository, InMemoryUserRepository};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConfig, PostgresBlogRepository, PostgresUserRepository};
