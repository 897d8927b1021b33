//! Rate limiting middleware.

use actix_web::{
    Error, HttpResponse,
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
    web,
};
use futures::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::rc::Rc;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Per-client-IP rate limiting, backed by the limiter in [`AppState`].
///
/// Requests pass through unchecked if no limiter is registered.
pub struct RateLimit;

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = RateLimitService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitService {
            service: Rc::new(service),
        }))
    }
}

pub struct RateLimitService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RateLimitService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = req
            .app_data::<web::Data<AppState>>()
            .map(|state| state.rate_limiter.clone());

        let key = req
            .connection_info()
            .realip_remote_addr()
            .unwrap_or("unknown")
            .to_string();

        Box::pin(async move {
            match limiter {
                Some(limiter) => {
                    let result = limiter.check(&key).await;
                    if !result.allowed {
                        tracing::warn!("Rate limit exceeded for key: {}", key);

                        let err = AppError::RateLimited {
                            retry_after: result.reset_after.as_secs().max(1),
                        };
                        let (http_req, _payload) = req.into_parts();
                        let response = HttpResponse::from_error(err);
                        return Ok(ServiceResponse::new(http_req, response).map_into_right_body());
                    }
                }
                None => tracing::error!("Rate limiter missing from app data, failing open"),
            }

            let res = service.call(req).await?;
            Ok(res.map_into_left_body())
        })
    }
}
