//! Application factory
//!
//! Builds the actix-web application over an already-wired [`AppState`].

use actix_cors::Cors;
use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error, HttpResponse,
};

use sk_shared::errors::{error_codes, ErrorResponse};

use crate::middleware::auth::SessionAuth;
use crate::routes::auth::{logout::logout, session::session};
use crate::state::AppState;

/// Create and configure the application with all dependencies
pub fn create_app(
    app_state: web::Data<AppState>,
    cors: Cors,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(app_state)
        .wrap(cors)
        .wrap(Logger::default())
        // Health check endpoint
        .route("/health", web::get().to(health_check))
        // API v1 routes
        .service(
            web::scope("/api/v1").service(
                web::scope("/auth")
                    .wrap(SessionAuth)
                    .route("/session", web::get().to(session))
                    .route("/logout", web::post().to(logout)),
            ),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "session-keeper-api",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Default 404 handler
async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
