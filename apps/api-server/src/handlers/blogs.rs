//! Public reads: published posts only, no authentication.

use actix_web::{HttpResponse, http::StatusCode, web};

use quill_core::domain::{ListBlogsParams, Scope};

use super::views::{blog_envelope, page_response, parse_blog_id};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /blogs
pub async fn list_blogs(
    state: web::Data<AppState>,
    query: web::Query<ListBlogsParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .blogs
        .list_blogs(Scope::Public, query.into_inner())
        .await?;
    Ok(page_response(page))
}

/// GET /blogs/{id}
pub async fn get_blog(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let blog = state.blogs.get_blog_by_id(Scope::Public, id).await?;
    Ok(blog_envelope(StatusCode::OK, "Blog retrieved successfully", blog))
}
