//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use uuid::Uuid;

use quill_core::DomainError;
use quill_core::domain::User;
use quill_core::ports::{AuthError, BaseRepository, TokenClaims};
use quill_core::services::authorize_owner_action;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller, taken from a verified bearer token.
///
/// ```ignore
/// async fn protected_route(identity: Identity) -> impl Responder {
///     format!("Hello, user {}!", identity.user_id)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub username: String,
}

impl From<TokenClaims> for Identity {
    fn from(claims: TokenClaims) -> Self {
        Self {
            user_id: claims.user_id,
            username: claims.username,
        }
    }
}

fn unauthenticated(err: AuthError) -> AppError {
    let message = match err {
        AuthError::TokenExpired => "Your authentication token has expired. Please login again.",
        AuthError::MissingAuth => {
            "Please provide a valid Bearer token in the Authorization header."
        }
        AuthError::InvalidToken(detail) => {
            tracing::debug!(%detail, "Rejected bearer token");
            "Invalid token"
        }
        other => {
            return AppError::from(DomainError::Internal(other.to_string()));
        }
    };
    DomainError::Unauthenticated(message.to_string()).into()
}

fn app_state(req: &HttpRequest) -> Result<&web::Data<AppState>, AppError> {
    req.app_data::<web::Data<AppState>>().ok_or_else(|| {
        AppError::from(DomainError::Internal(
            "AppState not found in app data".to_string(),
        ))
    })
}

/// Verify the `Authorization: Bearer <token>` header.
fn verify_bearer(req: &HttpRequest) -> Result<Identity, AppError> {
    let state = app_state(req)?;

    let auth_header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or_else(|| unauthenticated(AuthError::MissingAuth))?;

    let auth_str = auth_header.to_str().map_err(|_| {
        unauthenticated(AuthError::InvalidToken(
            "Invalid authorization header".to_string(),
        ))
    })?;

    let token = auth_str.strip_prefix("Bearer ").ok_or_else(|| {
        unauthenticated(AuthError::InvalidToken(
            "Expected Bearer token".to_string(),
        ))
    })?;

    state
        .tokens
        .validate_token(token)
        .map(Identity::from)
        .map_err(unauthenticated)
}

impl FromRequest for Identity {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(verify_bearer(req))
    }
}

/// Authenticated caller holding the owner role.
///
/// The role is re-read from the identity store on every request; claims in
/// the token are not trusted for authorization.
#[derive(Debug, Clone)]
pub struct OwnerIdentity(pub User);

impl FromRequest for OwnerIdentity {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let verified = verify_bearer(req).and_then(|identity| {
            let state = app_state(req)?;
            Ok((identity, state.users.clone()))
        });

        Box::pin(async move {
            let (identity, users) = verified?;
            let user = users
                .find_by_id(identity.user_id)
                .await
                .map_err(DomainError::from)?;
            if user.is_none() {
                tracing::debug!(user_id = %identity.user_id, "Token for unknown user");
            }

            let owner = authorize_owner_action(user.as_ref())?;
            Ok(OwnerIdentity(owner.clone()))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{ResponseError, http::StatusCode};

    #[test]
    fn test_identity_from_claims() {
        let user_id = Uuid::now_v7();
        let identity = Identity::from(TokenClaims {
            user_id,
            username: "grace".to_string(),
            roles: vec!["owner".to_string()],
            exp: 0,
        });
        assert_eq!(identity.user_id, user_id);
        assert_eq!(identity.username, "grace");
    }

    #[test]
    fn test_expired_token_is_unauthenticated() {
        let err = unauthenticated(AuthError::TokenExpired);
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.kind(), "unauthenticated");
    }
}
