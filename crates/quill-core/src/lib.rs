//! # Quill Core
//!
//! The domain layer of the Quill blogging backend.
//! This crate contains the blog lifecycle, the listing contract and the
//! authorization rules, with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

pub use error::{DomainError, RepoError};
