//! Session authentication middleware for protected endpoints.
//!
//! Extracts the credential carriers, runs verify-and-maybe-rotate through
//! [`sk_core::services::SessionService::authenticate`], and injects the verified subject into
//! the request. When the session was rotated, the new cookies are added to
//! whatever response the handler produced.
//!
//! Every rejection answers with the same body; the specific reason is only
//! logged.

use actix_web::{
    body::{EitherBody, MessageBody},
    cookie::Cookie,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::StatusCode,
    web, Error, FromRequest, HttpMessage, HttpRequest, HttpResponse,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use sk_core::domain::entities::Subject;
use sk_core::errors::AuthError;
use sk_shared::config::CookieConfig;
use sk_shared::errors::{error_codes, ErrorResponse};

use crate::cookies::{credential_cookies, presented_credentials, removal_cookies};
use crate::state::AppState;

/// Authenticated subject injected into requests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub subject: Subject,
}

/// Session authentication middleware factory
#[derive(Debug, Clone, Copy, Default)]
pub struct SessionAuth;

impl<S, B> Transform<S, ServiceRequest> for SessionAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = SessionAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(SessionAuthMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Session authentication middleware service
pub struct SessionAuthMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for SessionAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            let state = req.app_data::<web::Data<AppState>>().cloned();
            let Some(state) = state else {
                log::error!("Session middleware mounted without application state");
                let response = HttpResponse::InternalServerError().json(ErrorResponse::new(
                    error_codes::INTERNAL_ERROR,
                    "Internal server error",
                ));
                return Ok(req.into_response(response).map_into_right_body());
            };

            let presented = presented_credentials(req.request(), &state.cookies);
            let outcome = match state.session.authenticate(presented).await {
                Ok(outcome) => outcome,
                Err(error) => {
                    let response = rejection_response(error, &state.cookies);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(AuthContext {
                subject: outcome.subject.clone(),
            });

            let Some(pair) = outcome.rotated else {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            };

            log::info!("Session rotated for subject {}", outcome.subject);
            let rotated = credential_cookies(&state.cookies, &pair);
            let http_req = req.request().clone();

            match service.call(req).await {
                Ok(mut res) => {
                    attach_cookies(res.response_mut(), rotated);
                    Ok(res.map_into_left_body())
                }
                Err(err) => {
                    // The new refresh token is already current; the client must receive it
                    let mut response = err.error_response();
                    attach_cookies(&mut response, rotated);
                    Ok(ServiceResponse::new(http_req, response).map_into_right_body())
                }
            }
        })
    }
}

/// Add rotated cookies unless the handler already set a cookie of that name
fn attach_cookies<B>(response: &mut HttpResponse<B>, cookies: [Cookie<'static>; 2]) {
    let already_set: Vec<String> = response
        .cookies()
        .map(|cookie| cookie.name().to_string())
        .collect();

    for cookie in cookies {
        if already_set.iter().any(|name| name == cookie.name()) {
            continue;
        }
        if let Err(e) = response.add_cookie(&cookie) {
            log::error!("Failed to attach rotated cookie {}: {}", cookie.name(), e);
        }
    }
}

/// Response for a rejected request
///
/// The body never varies with the reason. Carriers are cleared when the
/// presented credentials can never succeed again.
pub fn rejection_response(error: AuthError, cookies: &CookieConfig) -> HttpResponse {
    match error {
        AuthError::StoreUnavailable | AuthError::IssuanceFailed => {
            log::error!("Authentication failed: {}", error.reason());
        }
        _ => log::warn!("Authentication rejected: {}", error.reason()),
    }

    let status = StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::UNAUTHORIZED);
    let mut builder = HttpResponse::build(status);
    if error.clears_credentials() {
        for cookie in removal_cookies(cookies) {
            builder.cookie(cookie);
        }
    }

    if status == StatusCode::UNAUTHORIZED {
        builder.json(ErrorResponse::not_authenticated())
    } else {
        builder.json(ErrorResponse::new(
            error_codes::INTERNAL_ERROR,
            "Internal server error",
        ))
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let context = req.extensions().get::<AuthContext>().cloned();
        let result = context.ok_or_else(|| {
            log::error!("AuthContext requested on a route without session middleware");
            Error::from(InternalError::from_response(
                "authentication required",
                HttpResponse::Unauthorized().json(ErrorResponse::not_authenticated()),
            ))
        });

        ready(result)
    }
}
