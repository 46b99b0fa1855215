//! CORS middleware configuration for cross-origin requests.
//!
//! Credentials travel in cookies, so CORS must allow credentials and can
//! never answer with a wildcard origin. Production only admits the
//! configured frontend origin.

use actix_cors::Cors;
use actix_web::http::{header, Method};

use sk_shared::config::{Environment, ServerConfig};

const PREFLIGHT_MAX_AGE: usize = 3600;

/// Creates a CORS middleware instance configured for the environment.
///
/// In development without a configured frontend, any origin is echoed back
/// so local tools can reach the API.
pub fn create_cors(server: &ServerConfig, environment: Environment) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(PREFLIGHT_MAX_AGE)
        .supports_credentials();

    match (&server.frontend_origin, environment.is_production()) {
        (Some(origin), _) => {
            log::info!("Allowing credentialed requests from {}", origin);
            cors.allowed_origin(origin)
        }
        (None, true) => {
            log::warn!("FRONTEND_URL not set; cross-origin requests will be rejected");
            cors
        }
        (None, false) => {
            log::info!("Configuring permissive CORS for {}", environment);
            cors.allow_any_origin()
        }
    }
}
