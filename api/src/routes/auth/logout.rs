use actix_web::{web, HttpResponse, HttpResponseBuilder};

use sk_shared::config::CookieConfig;
use sk_shared::errors::{error_codes, ErrorResponse};

use crate::cookies::removal_cookies;
use crate::dto::LogoutResponse;
use crate::middleware::auth::AuthContext;
use crate::state::AppState;

/// Handler for POST /api/v1/auth/logout
///
/// Deletes the subject's refresh record and clears both cookies.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "status": "success",
///     "message": "Logged out successfully"
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: No valid session (answered by the middleware)
/// - 503 Service Unavailable: Refresh store unreachable; cookies are still cleared
/// - 500 Internal Server Error: Any other store failure
pub async fn logout(state: web::Data<AppState>, auth: AuthContext) -> HttpResponse {
    match state.revocation.logout(&auth.subject).await {
        Ok(_) => clearing_cookies(HttpResponse::Ok(), &state.cookies).json(LogoutResponse::success()),
        Err(error) if error.is_store_unavailable() => {
            log::error!("Logout for subject {} failed: {}", auth.subject, error);
            clearing_cookies(HttpResponse::ServiceUnavailable(), &state.cookies).json(ErrorResponse::new(
                error_codes::SERVICE_UNAVAILABLE,
                "Service temporarily unavailable",
            ))
        }
        Err(error) => {
            log::error!("Logout for subject {} failed: {}", auth.subject, error);
            clearing_cookies(HttpResponse::InternalServerError(), &state.cookies).json(ErrorResponse::new(
                error_codes::INTERNAL_ERROR,
                "Internal server error",
            ))
        }
    }
}

fn clearing_cookies(mut builder: HttpResponseBuilder, cookies: &CookieConfig) -> HttpResponseBuilder {
    for cookie in removal_cookies(cookies) {
        builder.cookie(cookie);
    }
    builder
}
