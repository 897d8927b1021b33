//! In-memory stores - used when no database is configured.
//!
//! Both stores keep records in a `BTreeMap` keyed by id behind an async
//! `RwLock`. Unique columns are enforced the way the Postgres indexes enforce
//! them. Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::domain::{BlogPost, BlogQuery, User};
use quill_core::error::RepoError;
use quill_core::ports::{BaseRepository, BlogRepository, UserRepository};

/// In-memory identity store.
#[derive(Default)]
pub struct InMemoryUserRepository {
    store: RwLock<BTreeMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique(store: &BTreeMap<Uuid, User>, user: &User) -> Result<(), RepoError> {
        for existing in store.values().filter(|u| u.id != user.id) {
            if existing.username == user.username {
                return Err(RepoError::Constraint("username already exists".to_string()));
            }
            if existing.email == user.email {
                return Err(RepoError::Constraint("email already exists".to_string()));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&user.id) {
            return Err(RepoError::Constraint("id already exists".to_string()));
        }
        Self::check_unique(&store, &user)?;
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update(&self, user: User) -> Result<User, RepoError> {
        let mut store = self.store.write().await;
        if !store.contains_key(&user.id) {
            return Err(RepoError::NotFound);
        }
        Self::check_unique(&store, &user)?;
        store.insert(user.id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.store.write().await.remove(&id))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|u| u.email == email).cloned())
    }
}

/// In-memory blog store.
#[derive(Default)]
pub struct InMemoryBlogRepository {
    store: RwLock<BTreeMap<Uuid, BlogPost>>,
}

impl InMemoryBlogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_unique_title(
        store: &BTreeMap<Uuid, BlogPost>,
        blog: &BlogPost,
    ) -> Result<(), RepoError> {
        if store
            .values()
            .any(|b| b.id != blog.id && b.title == blog.title)
        {
            return Err(RepoError::Constraint("title already exists".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for InMemoryBlogRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.store.read().await.get(&id).cloned())
    }

    async fn insert(&self, blog: BlogPost) -> Result<BlogPost, RepoError> {
        let mut store = self.store.write().await;
        if store.contains_key(&blog.id) {
            return Err(RepoError::Constraint("id already exists".to_string()));
        }
        Self::check_unique_title(&store, &blog)?;
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn update(&self, mut blog: BlogPost) -> Result<BlogPost, RepoError> {
        let mut store = self.store.write().await;
        let Some(stored) = store.get(&blog.id) else {
            return Err(RepoError::NotFound);
        };
        // The counter belongs to increment_read_count; keep the stored value.
        blog.read_count = stored.read_count;
        Self::check_unique_title(&store, &blog)?;
        store.insert(blog.id, blog.clone());
        Ok(blog)
    }

    async fn delete(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Ok(self.store.write().await.remove(&id))
    }
}

#[async_trait]
impl BlogRepository for InMemoryBlogRepository {
    async fn find_by_title(&self, title: &str) -> Result<Option<BlogPost>, RepoError> {
        let store = self.store.read().await;
        Ok(store.values().find(|b| b.title == title).cloned())
    }

    async fn find_page(&self, query: &BlogQuery) -> Result<Vec<BlogPost>, RepoError> {
        let store = self.store.read().await;
        let mut page: Vec<BlogPost> = store
            .values()
            .filter(|b| query.matches(b))
            .cloned()
            .collect();
        drop(store);

        page.sort_by(|a, b| query.compare(a, b));
        page.truncate(query.limit as usize);
        Ok(page)
    }

    async fn increment_read_count(&self, id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        // Read and increment under one write lock.
        let mut store = self.store.write().await;
        Ok(store
            .get_mut(&id)
            .filter(|b| b.is_published())
            .map(|b| {
                b.read_count += 1;
                b.clone()
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_core::domain::{BlogState, ListBlogsParams, NewBlog, Role, Scope};

    fn owner() -> User {
        User::new(
            "grace".into(),
            "grace@example.com".into(),
            "Grace".into(),
            "Hopper".into(),
            Role::Owner,
            "hash".into(),
        )
    }

    fn blog(title: &str) -> BlogPost {
        BlogPost::new(
            &owner(),
            NewBlog {
                title: title.into(),
                description: "desc".into(),
                tags: vec![],
                body: "body".into(),
            },
        )
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_title() {
        let repo = InMemoryBlogRepository::new();
        repo.insert(blog("Same")).await.unwrap();

        let err = repo.insert(blog("Same")).await.unwrap_err();
        assert!(matches!(err, RepoError::Constraint(_)));
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = InMemoryBlogRepository::new();
        let err = repo.update(blog("Ghost")).await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound));
    }

    #[tokio::test]
    async fn test_increment_only_touches_published() {
        let repo = InMemoryBlogRepository::new();
        let draft = repo.insert(blog("Draft")).await.unwrap();
        assert!(repo.increment_read_count(draft.id).await.unwrap().is_none());

        let mut published = blog("Live");
        published.state = BlogState::Published;
        let published = repo.insert(published).await.unwrap();

        let read = repo.increment_read_count(published.id).await.unwrap().unwrap();
        assert_eq!(read.read_count, 1);
        let stored = repo.find_by_id(published.id).await.unwrap().unwrap();
        assert_eq!(stored.read_count, 1);
    }

    #[tokio::test]
    async fn test_update_keeps_stored_read_count() {
        let repo = InMemoryBlogRepository::new();
        let mut post = blog("Counted");
        post.state = BlogState::Published;
        let stale = repo.insert(post).await.unwrap();

        repo.increment_read_count(stale.id).await.unwrap();
        repo.increment_read_count(stale.id).await.unwrap();

        let mut edited = stale.clone();
        edited.body = "rewritten".into();
        let saved = repo.update(edited).await.unwrap();

        assert_eq!(saved.read_count, 2);
        assert_eq!(saved.body, "rewritten");
        let stored = repo.find_by_id(stale.id).await.unwrap().unwrap();
        assert_eq!(stored.read_count, 2);
    }

    #[tokio::test]
    async fn test_find_page_truncates_to_limit() {
        let repo = InMemoryBlogRepository::new();
        for i in 0..25 {
            repo.insert(blog(&format!("Post {i}"))).await.unwrap();
        }

        let query = BlogQuery::resolve(Scope::Owner, ListBlogsParams::default()).unwrap();
        let page = repo.find_page(&query).await.unwrap();

        assert_eq!(page.len(), 20);
        // newest first by default
        assert_eq!(page[0].title, "Post 24");
    }

    #[tokio::test]
    async fn test_user_unique_username_and_email() {
        let repo = InMemoryUserRepository::new();
        let first = owner();
        repo.insert(first.clone()).await.unwrap();

        let mut same_email = owner();
        same_email.username = "other".into();
        assert!(matches!(
            repo.insert(same_email).await,
            Err(RepoError::Constraint(_))
        ));

        let found = repo.find_by_username("grace").await.unwrap().unwrap();
        assert_eq!(found.id, first.id);
    }
}
