//! Authenticated reads and post creation for any signed-in user.
//!
//! Reads see the same published-only view as the public routes.

use actix_web::{HttpResponse, http::StatusCode, web};

use quill_core::domain::{ListBlogsParams, Scope};
use quill_shared::dto::CreateBlogRequest;

use super::views::{blog_envelope, new_blog, page_response, parse_blog_id};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /users
pub async fn list_blogs(
    _identity: Identity,
    state: web::Data<AppState>,
    query: web::Query<ListBlogsParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .blogs
        .list_blogs(Scope::Public, query.into_inner())
        .await?;
    Ok(page_response(page))
}

/// GET /users/{id}
pub async fn get_blog(
    _identity: Identity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let blog = state.blogs.get_blog_by_id(Scope::Public, id).await?;
    Ok(blog_envelope(StatusCode::OK, "Blog retrieved successfully", blog))
}

/// POST /users/create
pub async fn create_blog(
    identity: Identity,
    state: web::Data<AppState>,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let draft = new_blog(body.into_inner())?;
    tracing::debug!(username = %identity.username, title = %draft.title, "Creating blog");
    let blog = state.blogs.create_blog(identity.user_id, draft).await?;
    Ok(blog_envelope(
        StatusCode::CREATED,
        "Blog created successfully",
        blog,
    ))
}
