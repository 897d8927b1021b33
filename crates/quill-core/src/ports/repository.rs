use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{BlogPost, BlogQuery, User};
use crate::error::RepoError;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity. Unique violations surface as `RepoError::Constraint`.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Missing rows surface as `RepoError::NotFound`.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, returning the removed record.
    async fn delete(&self, id: ID) -> Result<Option<T>, RepoError>;
}

/// Identity store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Blog store.
#[async_trait]
pub trait BlogRepository: BaseRepository<BlogPost, Uuid> {
    /// Exact, case-sensitive title lookup.
    async fn find_by_title(&self, title: &str) -> Result<Option<BlogPost>, RepoError>;

    /// Apply the query's filters, cursor, ordering and limit.
    async fn find_page(&self, query: &BlogQuery) -> Result<Vec<BlogPost>, RepoError>;

    /// Atomically add one to `read_count` of a published post and return the
    /// updated record. Returns `None` when the post is absent or not published.
    async fn increment_read_count(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError>;
}
