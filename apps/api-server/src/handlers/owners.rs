//! Owner routes: every state is visible, and posts can be mutated.

use actix_web::{HttpResponse, http::StatusCode, web};
use serde_json::{Map, Value};

use quill_core::domain::{ListBlogsParams, Scope};
use quill_shared::dto::{CreateBlogRequest, UpdateStateRequest};

use super::views::{blog_envelope, new_blog, page_response, parse_blog_id};
use crate::middleware::auth::OwnerIdentity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /owners
pub async fn list_blogs(
    _owner: OwnerIdentity,
    state: web::Data<AppState>,
    query: web::Query<ListBlogsParams>,
) -> AppResult<HttpResponse> {
    let page = state
        .blogs
        .list_blogs(Scope::Owner, query.into_inner())
        .await?;
    Ok(page_response(page))
}

/// GET /owners/{id}
pub async fn get_blog(
    _owner: OwnerIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let blog = state.blogs.get_blog_by_id(Scope::Owner, id).await?;
    Ok(blog_envelope(StatusCode::OK, "Blog retrieved successfully", blog))
}

/// POST /owners/create
pub async fn create_blog(
    OwnerIdentity(owner): OwnerIdentity,
    state: web::Data<AppState>,
    body: web::Json<CreateBlogRequest>,
) -> AppResult<HttpResponse> {
    let draft = new_blog(body.into_inner())?;
    let blog = state.blogs.create_blog(owner.id, draft).await?;
    Ok(blog_envelope(
        StatusCode::CREATED,
        "Blog created successfully",
        blog,
    ))
}

/// PUT /owners/update/{id}
pub async fn update_state(
    _owner: OwnerIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateStateRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let blog = state
        .blogs
        .update_state(id, body.state.as_deref())
        .await?;
    Ok(blog_envelope(StatusCode::OK, "State updated successfully.", blog))
}

/// PUT /owners/edit/{id}
pub async fn edit_blog(
    _owner: OwnerIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<Map<String, Value>>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let blog = state.blogs.edit_blog(id, &body).await?;
    Ok(blog_envelope(StatusCode::OK, "Blog updated successfully.", blog))
}

/// DELETE /owners/{id}
pub async fn delete_blog(
    _owner: OwnerIdentity,
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_blog_id(&path)?;
    let blog = state.blogs.delete_blog(id).await?;
    Ok(blog_envelope(StatusCode::OK, "Blog deleted successfully.", blog))
}
