//! Signup and login handlers.

use actix_web::{HttpResponse, web};

use quill_core::services::NewUser;
use quill_shared::dto::{AuthResponse, LoginRequest, SignupRequest, SignupResponse};

use super::views::user_response;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /signup
pub async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .auth
        .signup(NewUser {
            username: req.username,
            email: req.email,
            first_name: req.first_name,
            last_name: req.last_name,
            role: req.user_type,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(SignupResponse {
        status: 201,
        message: "User registered successfully".to_string(),
        user: user_response(user),
    }))
}

/// POST /login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let issued = state.auth.login(&req.username, &req.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        status: 200,
        token: issued.access_token,
        token_type: "Bearer".to_string(),
        expires_in: issued.expires_in,
    }))
}
