//! Conversions between domain values and wire bodies.

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::{BlogPost, NewBlog, Page, User};
use quill_shared::dto::{
    BlogEnvelope, BlogPageResponse, BlogResponse, CreateBlogRequest, UserResponse,
};

use crate::middleware::error::AppError;

pub fn blog_response(blog: BlogPost) -> BlogResponse {
    BlogResponse {
        id: blog.id.to_string(),
        title: blog.title,
        description: blog.description,
        tags: blog.tags,
        body: blog.body,
        author: blog.author,
        state: blog.state.to_string(),
        read_count: blog.read_count,
        reading_time: blog.read_time,
        created_at: blog.created_at.to_rfc3339(),
        last_updated_at: blog.last_updated_at.to_rfc3339(),
    }
}

pub fn user_response(user: User) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        user_type: user.role.to_string(),
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        created_at: user.created_at.to_rfc3339(),
    }
}

pub fn page_response(page: Page) -> HttpResponse {
    HttpResponse::Ok().json(BlogPageResponse {
        status: StatusCode::OK.as_u16(),
        next_cursor: page.next_cursor.map(|id| id.to_string()),
        prev_cursor: page.prev_cursor.map(|id| id.to_string()),
        total_results: page.total_results(),
        blogs: page.blogs.into_iter().map(blog_response).collect(),
    })
}

pub fn blog_envelope(status: StatusCode, message: &str, blog: BlogPost) -> HttpResponse {
    HttpResponse::build(status).json(BlogEnvelope {
        status: status.as_u16(),
        message: message.to_string(),
        blog: blog_response(blog),
    })
}

/// Path ids must parse; anything else is a validation error, not a 404.
pub fn parse_blog_id(raw: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw).map_err(|_| DomainError::validation("Invalid blog id").into())
}

pub fn new_blog(req: CreateBlogRequest) -> Result<NewBlog, AppError> {
    Ok(NewBlog::from_parts(
        req.title,
        req.description,
        req.tags,
        req.body,
    )?)
}
