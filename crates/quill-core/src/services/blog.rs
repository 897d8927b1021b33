//! Blog listing and lifecycle operations.

use std::sync::Arc;

use serde_json::{Map, Value};
use uuid::Uuid;

use crate::domain::{
    BlogEdit, BlogPost, BlogQuery, BlogState, ListBlogsParams, NewBlog, Page, Scope,
};
use crate::error::{DomainError, RepoError};
use crate::ports::{BlogRepository, UserRepository};

const TITLE_TAKEN: &str = "Blog title already exists";

/// Query engine and lifecycle controller over the blog store.
///
/// Stateless apart from its collaborators; every call re-reads the stores.
#[derive(Clone)]
pub struct BlogService {
    blogs: Arc<dyn BlogRepository>,
    users: Arc<dyn UserRepository>,
}

impl BlogService {
    pub fn new(blogs: Arc<dyn BlogRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { blogs, users }
    }

    /// List one page of posts visible in `scope`.
    ///
    /// An empty page is reported as `NotFound`, not as an empty success.
    pub async fn list_blogs(
        &self,
        scope: Scope,
        params: ListBlogsParams,
    ) -> Result<Page, DomainError> {
        let query = BlogQuery::resolve(scope, params)?;
        tracing::debug!(?scope, ?query, "Listing blogs");

        let blogs = self.blogs.find_page(&query).await?;
        if blogs.is_empty() {
            return Err(DomainError::not_found("No blogs found matching the criteria."));
        }

        Ok(Page::new(blogs, query.cursor.is_some()))
    }

    /// Fetch a single post, counting the read when it is published.
    pub async fn get_blog_by_id(&self, scope: Scope, id: Uuid) -> Result<BlogPost, DomainError> {
        match scope {
            Scope::Public => self
                .blogs
                .increment_read_count(id)
                .await?
                .ok_or_else(|| DomainError::not_found("Blog not found or not published")),
            Scope::Owner => {
                let blog = self
                    .blogs
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Blog not found"))?;

                if !blog.is_published() {
                    return Ok(blog);
                }

                // Same atomic increment as the public path; the post may
                // have been deleted in between.
                self.blogs
                    .increment_read_count(id)
                    .await?
                    .ok_or_else(|| DomainError::not_found("Blog not found"))
            }
        }
    }

    /// Create a draft authored by `author_id`.
    pub async fn create_blog(
        &self,
        author_id: Uuid,
        draft: NewBlog,
    ) -> Result<BlogPost, DomainError> {
        let author = self
            .users
            .find_by_id(author_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User not found"))?;

        if self.blogs.find_by_title(&draft.title).await?.is_some() {
            return Err(DomainError::conflict(TITLE_TAKEN));
        }

        let blog = BlogPost::new(&author, draft);
        let saved = self.blogs.insert(blog).await.map_err(blog_store_error)?;

        tracing::info!(blog_id = %saved.id, author_id = %author_id, "Blog created");
        Ok(saved)
    }

    /// Move a post to `requested` state. Only draft -> published is allowed.
    pub async fn update_state(
        &self,
        id: Uuid,
        requested: Option<&str>,
    ) -> Result<BlogPost, DomainError> {
        let requested: BlogState = requested.unwrap_or_default().parse()?;

        let mut blog = self.find(id).await?;
        blog.state = blog.state.transition_to(requested)?;
        blog.touch();

        let saved = self.blogs.update(blog).await.map_err(blog_store_error)?;
        tracing::info!(blog_id = %saved.id, state = %saved.state, "Blog state updated");
        Ok(saved)
    }

    /// Apply whitelisted field edits. Title uniqueness is left to the store.
    pub async fn edit_blog(
        &self,
        id: Uuid,
        fields: &Map<String, Value>,
    ) -> Result<BlogPost, DomainError> {
        let edit = BlogEdit::from_fields(fields)?;
        if edit.is_empty() {
            tracing::debug!(blog_id = %id, "Empty edit; refreshing derived fields only");
        }

        let mut blog = self.find(id).await?;
        blog.apply(edit);
        blog.touch();

        let saved = self.blogs.update(blog).await.map_err(blog_store_error)?;
        tracing::info!(blog_id = %saved.id, "Blog edited");
        Ok(saved)
    }

    /// Delete a post regardless of its state, returning the removed record.
    pub async fn delete_blog(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        let deleted = self
            .blogs
            .delete(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blog not found"))?;

        tracing::info!(blog_id = %id, "Blog deleted");
        Ok(deleted)
    }

    async fn find(&self, id: Uuid) -> Result<BlogPost, DomainError> {
        self.blogs
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Blog not found"))
    }
}

/// Title is the only unique column on blogs.
fn blog_store_error(err: RepoError) -> DomainError {
    match err {
        RepoError::NotFound => DomainError::not_found("Blog not found"),
        RepoError::Constraint(_) => DomainError::conflict(TITLE_TAKEN),
        other => other.into(),
    }
}
