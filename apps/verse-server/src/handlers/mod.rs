//! HTTP handlers and route configuration.

mod admin;
mod auth;
mod health;
mod pages;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    // Rendered pages
    .route("/", web::get().to(pages::home))
    .route("/posts/{slug}", web::get().to(pages::post_detail))
    .route("/ads.txt", web::get().to(pages::ads_txt))
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(posts::list))
            .route("/posts/{slug}", web::get().to(posts::get))
            // Auth routes
            .service(
                web::scope("/auth")
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            // Admin routes
            .service(
                web::scope("/admin")
                    .route("/posts", web::get().to(admin::list_posts))
                    .route("/posts", web::post().to(admin::create_post))
                    .route("/posts/{slug}", web::put().to(admin::update_post))
                    .route("/posts/{slug}", web::delete().to(admin::delete_post))
                    .route("/settings", web::get().to(admin::get_settings))
                    .route("/settings", web::put().to(admin::update_settings)),
            ),
    );
}
