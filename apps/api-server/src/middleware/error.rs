//! Error handling - every failure leaves as the JSON error envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::DomainError;
use quill_shared::ErrorResponse;

/// Application-level error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Rate limit exceeded. Try again in {retry_after} seconds.")]
    RateLimited { retry_after: u64 },
}

impl AppError {
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Domain(err) => err.kind(),
            AppError::RateLimited { .. } => "rate_limited",
        }
    }

    /// Envelope body for this error, without a request id.
    pub fn body(&self) -> ErrorResponse {
        let status = self.status_code().as_u16();
        match self {
            AppError::Domain(DomainError::Internal(_)) => ErrorResponse::internal_error(),
            other => ErrorResponse::new(status, other.kind(), other.to_string()),
        }
    }

    /// Full response; `request_id` is echoed in the body when known.
    pub fn response(&self, request_id: Option<&str>) -> HttpResponse {
        let mut body = self.body();
        if let Some(id) = request_id {
            body = body.with_request_id(id);
        }

        let mut builder = HttpResponse::build(self.status_code());
        if let AppError::RateLimited { retry_after } = self {
            builder
                .insert_header(("X-RateLimit-Remaining", "0"))
                .insert_header(("Retry-After", retry_after.to_string()));
        }
        builder.json(body)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Domain(err) => match err {
                DomainError::Validation(_)
                | DomainError::InvalidTransition(_)
                | DomainError::NoChange(_) => StatusCode::BAD_REQUEST,
                DomainError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
                DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
                DomainError::NotFound(_) => StatusCode::NOT_FOUND,
                DomainError::Conflict(_) => StatusCode::CONFLICT,
                DomainError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Rendered once per failed request; the request-id re-render does not log.
        if let AppError::Domain(DomainError::Internal(detail)) = self {
            tracing::error!("Internal error: {}", detail);
        }
        self.response(None)
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;

/// Malformed JSON bodies and query strings become validation errors.
pub fn bad_input(detail: impl std::fmt::Display) -> actix_web::Error {
    AppError::from(DomainError::Validation(format!("Invalid request: {detail}"))).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
    };

    /// Counts ERROR events.
    struct ErrorCounter(Arc<AtomicUsize>);

    impl<S: tracing::Subscriber> Layer<S> for ErrorCounter {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == tracing::Level::ERROR {
                self.0.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (DomainError::validation("x"), 400),
            (DomainError::InvalidTransition("x".into()), 400),
            (DomainError::NoChange("x".into()), 400),
            (DomainError::Unauthenticated("x".into()), 401),
            (DomainError::Forbidden("x".into()), 403),
            (DomainError::not_found("x"), 404),
            (DomainError::conflict("x"), 409),
            (DomainError::Internal("x".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code().as_u16(), status);
        }
        assert_eq!(
            AppError::RateLimited { retry_after: 3 }.status_code(),
            StatusCode::TOO_MANY_REQUESTS
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let body = AppError::from(DomainError::Internal("pool exhausted".into())).body();
        assert_eq!(body.kind, "internal_error");
        assert!(!body.message.contains("pool"));
    }

    #[test]
    fn test_body_carries_kind_and_message() {
        let body = AppError::from(DomainError::not_found("Blog not found")).body();
        assert_eq!(body.status, 404);
        assert_eq!(body.kind, "not_found");
        assert_eq!(body.message, "Blog not found");
    }

    #[test]
    fn test_internal_error_logged_once_per_request() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));

        tracing::subscriber::with_default(subscriber, || {
            let err = AppError::from(DomainError::Internal("pool exhausted".into()));
            // actix renders the error, then the request-id layer renders it again
            let first = err.error_response();
            let second = err.response(Some("req-1"));
            assert_eq!(first.status(), StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(second.status(), StatusCode::INTERNAL_SERVER_ERROR);
        });

        assert_eq!(errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_client_errors_are_not_logged_as_errors() {
        let errors = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(ErrorCounter(errors.clone()));

        tracing::subscriber::with_default(subscriber, || {
            AppError::from(DomainError::not_found("Blog not found")).error_response();
        });

        assert_eq!(errors.load(Ordering::SeqCst), 0);
    }
}
