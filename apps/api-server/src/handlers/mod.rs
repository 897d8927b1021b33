//! HTTP handlers and route configuration.

mod auth;
mod blogs;
mod health;
mod owners;
mod users;
mod views;


use actix_web::web;

use crate::middleware::error::bad_input;
use crate::middleware::rate_limit::RateLimit;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| bad_input(err)))
        .app_data(web::QueryConfig::default().error_handler(|err, _req| bad_input(err)))
        .route("/health", web::get().to(health::health_check))
        // Auth routes
        .service(
            web::resource("/signup")
                .wrap(RateLimit)
                .route(web::post().to(auth::signup)),
        )
        .service(
            web::resource("/login")
                .wrap(RateLimit)
                .route(web::post().to(auth::login)),
        )
        // Public reads
        .service(
            web::scope("/blogs")
                .route("", web::get().to(blogs::list_blogs))
                .route("/{id}", web::get().to(blogs::get_blog)),
        )
        // Any authenticated caller
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_blogs))
                .route("/create", web::post().to(users::create_blog))
                .route("/{id}", web::get().to(users::get_blog)),
        )
        // Owners only
        .service(
            web::scope("/owners")
                .route("", web::get().to(owners::list_blogs))
                .route("/create", web::post().to(owners::create_blog))
                .route("/update/{id}", web::put().to(owners::update_state))
                .route("/edit/{id}", web::put().to(owners::edit_blog))
                .route("/{id}", web::get().to(owners::get_blog))
                .route("/{id}", web::delete().to(owners::delete_blog)),
        );
}
