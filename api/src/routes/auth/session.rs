use actix_web::HttpResponse;

use crate::dto::SessionResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/v1/auth/session
///
/// Returns the subject the session middleware verified. Rotated cookies, if
/// any, are added by the middleware.
pub async fn session(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        subject: auth.subject.to_string(),
    })
}
