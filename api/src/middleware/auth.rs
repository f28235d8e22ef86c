//! Session guard for citizen endpoints.
//!
//! [`JwtAuth`] verifies the `Authorization: Bearer` session with the
//! [`SessionService`] found in app data and stores an [`AuthContext`] in the
//! request extensions. In optional mode a request without any token is
//! served anonymously; a token that is present but bad is always a 401.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::AUTHORIZATION,
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};
use uuid::Uuid;

use ouv_core::{
    domain::entities::Claims,
    errors::{DomainError, TokenError},
    SessionService,
};

use crate::handlers::error::{handle_domain_error, request_language, unauthorized};

/// Signed-in citizen behind a request
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub email: Option<String>,
    /// Session id, for log correlation
    pub jti: String,
}

impl AuthContext {
    pub fn from_claims(claims: Claims) -> Result<Self, DomainError> {
        let user_id = claims
            .user_id()
            .map_err(|_| DomainError::Token(TokenError::InvalidClaims))?;
        Ok(Self {
            user_id,
            email: claims.email,
            jti: claims.jti,
        })
    }
}

#[derive(Debug, Clone, Copy)]
pub struct JwtAuth {
    required: bool,
}

impl JwtAuth {
    pub fn required() -> Self {
        Self { required: true }
    }

    /// Anonymous requests pass; invalid tokens are still rejected
    pub fn optional() -> Self {
        Self { required: false }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthService {
            service: Rc::new(service),
            required: self.required,
        }))
    }
}

pub struct JwtAuthService<S> {
    service: Rc<S>,
    required: bool,
}

impl<S, B> Service<ServiceRequest> for JwtAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let required = self.required;

        Box::pin(async move {
            let lang = request_language(req.request());

            let Some(token) = extract_bearer_token(&req) else {
                if required {
                    return Ok(req.into_response(unauthorized(lang)).map_into_right_body());
                }
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            };

            let verified = match req.app_data::<web::Data<SessionService>>() {
                Some(sessions) => sessions.verify(&token).and_then(AuthContext::from_claims),
                None => {
                    tracing::error!("SessionService is not registered as app data");
                    Err(DomainError::Unauthorized)
                }
            };

            let context = match verified {
                Ok(context) => context,
                Err(e) => {
                    tracing::debug!(error = %e, "Rejected bearer token");
                    let response = handle_domain_error(&e, lang);
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(context);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn reject(reason: &'static str, response: actix_web::HttpResponse) -> Error {
    InternalError::from_response(reason, response).into()
}

/// Token of an `Authorization: Bearer <token>` header; the scheme is matched
/// case-insensitively
fn extract_bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then(|| token.to_string())
}

/// 401 unless [`JwtAuth`] stored a context
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| reject("authentication required", unauthorized(request_language(req))));

        ready(result)
    }
}

/// Caller if signed in; never rejects
pub struct OptionalAuth(pub Option<AuthContext>);

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().cloned();
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn token_of(header: Option<&str>) -> Option<String> {
        let mut req = TestRequest::default();
        if let Some(value) = header {
            req = req.insert_header((AUTHORIZATION, value));
        }
        extract_bearer_token(&req.to_srv_request())
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(token_of(Some("Bearer abc.def")), Some("abc.def".to_string()));
        assert_eq!(token_of(Some("bearer  abc.def ")), Some("abc.def".to_string()));
        assert_eq!(token_of(Some("abc.def")), None);
        assert_eq!(token_of(Some("Basic dXNlcjpwdw==")), None);
        assert_eq!(token_of(Some("Bearer ")), None);
        assert_eq!(token_of(None), None);
    }
}
