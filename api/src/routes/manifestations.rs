//! Filing and tracking manifestations

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ouv_core::{EmailServiceTrait, ManifestationRepository, OtpRepository, UserRepository};

use crate::app::AppState;
use crate::dto::{ManifestationResponse, SubmitManifestationRequest};
use crate::handlers::{handle_domain_error, request_language, validation_error_response};
use crate::middleware::{AuthContext, OptionalAuth};

/// Handler for POST /api/v1/manifestations
///
/// A session is optional. Signed-in citizens get the manifestation linked
/// to their account unless they file it anonymously.
pub async fn submit<U, M, O, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, M, O, E>>,
    auth: OptionalAuth,
    request: web::Json<SubmitManifestationRequest>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: ManifestationRepository + 'static,
    O: OtpRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let lang = request_language(&req);

    if let Err(errors) = request.validate() {
        return validation_error_response(&errors, lang);
    }

    let user_id = auth.0.map(|ctx| ctx.user_id);
    match state
        .manifestation_service
        .submit(request.into_inner().into(), user_id)
        .await
    {
        Ok(manifestation) => {
            HttpResponse::Created().json(ManifestationResponse::from(manifestation))
        }
        Err(error) => handle_domain_error(&error, lang),
    }
}

/// Handler for GET /api/v1/manifestations (requires a session)
pub async fn list<U, M, O, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, M, O, E>>,
    auth: AuthContext,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: ManifestationRepository + 'static,
    O: OtpRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    match state.manifestation_service.list_for_user(auth.user_id).await {
        Ok(items) => HttpResponse::Ok().json(
            items
                .into_iter()
                .map(ManifestationResponse::from)
                .collect::<Vec<_>>(),
        ),
        Err(error) => handle_domain_error(&error, request_language(&req)),
    }
}

/// Handler for GET /api/v1/manifestations/{protocol}
pub async fn track<U, M, O, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, M, O, E>>,
    protocol: web::Path<String>,
) -> HttpResponse
where
    U: UserRepository + 'static,
    M: ManifestationRepository + 'static,
    O: OtpRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    match state.manifestation_service.track(&protocol).await {
        Ok(manifestation) => HttpResponse::Ok().json(ManifestationResponse::from(manifestation)),
        Err(error) => handle_domain_error(&error, request_language(&req)),
    }
}
