//! Profile registration

use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ouv_core::{EmailServiceTrait, ManifestationRepository, OtpRepository, UserRepository, UserSummary};

use crate::app::AppState;
use crate::dto::RegisterRequest;
use crate::handlers::{handle_domain_error, request_language, validation_error_response};

/// Handler for POST /api/v1/users/register
///
/// Creates or updates the profile of the user owning `email`. Without an
/// email a fresh anonymous user is created.
pub async fn register<U, M, O, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, M, O, E>>,
    request: web::Json<RegisterRequest>,
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

    match state.profile_service.register(request.into_inner().into()).await {
        Ok(user) => HttpResponse::Ok().json(UserSummary::from(&user)),
        Err(error) => handle_domain_error(&error, lang),
    }
}
