//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SignupRequest {
    pub username: String,
    #[serde(alias = "email_address")]
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// `user` or `owner`.
    #[serde(alias = "role")]
    pub user_type: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// A user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub user_type: String,
    pub created_at: String,
}

/// Body returned by `/signup`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignupResponse {
    pub status: u16,
    pub message: String,
    pub user: UserResponse,
}

/// Body returned by `/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub status: u16,
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Request to create a blog post. Missing fields are reported by the
/// validator, not the deserializer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateBlogRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub body: Option<String>,
}

/// Request to move a post to another state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateStateRequest {
    pub state: Option<String>,
}

/// A blog post as rendered to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub body: String,
    pub author: String,
    pub state: String,
    pub read_count: i64,
    /// Seconds.
    pub reading_time: f64,
    pub created_at: String,
    pub last_updated_at: String,
}

/// Envelope for a single post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogEnvelope {
    pub status: u16,
    pub message: String,
    pub blog: BlogResponse,
}

/// Envelope for one page of posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPageResponse {
    pub status: u16,
    pub next_cursor: Option<String>,
    pub prev_cursor: Option<String>,
    pub total_results: usize,
    pub blogs: Vec<BlogResponse>,
}

/// Liveness body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_uses_camel_case_keys() {
        let page = BlogPageResponse {
            status: 200,
            next_cursor: Some("abc".into()),
            prev_cursor: None,
            total_results: 0,
            blogs: vec![],
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["nextCursor"], "abc");
        assert!(json["prevCursor"].is_null());
        assert_eq!(json["totalResults"], 0);
    }

    #[test]
    fn test_signup_accepts_original_field_names() {
        let req: SignupRequest = serde_json::from_str(
            r#"{"username":"ada","email_address":"ada@example.com","user_type":"owner"}"#,
        )
        .unwrap();
        assert_eq!(req.email, "ada@example.com");
        assert_eq!(req.user_type, "owner");
        assert!(req.password.is_empty());
    }

    #[test]
    fn test_create_blog_missing_fields_deserialize() {
        let req: CreateBlogRequest = serde_json::from_str(r#"{"title":"Hi"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Hi"));
        assert!(req.body.is_none());
    }
}
