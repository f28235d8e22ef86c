use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ouv_core::{EmailServiceTrait, ManifestationRepository, OtpRepository, UserRepository};

use crate::app::AppState;
use crate::dto::VerifyCodeRequest;
use crate::handlers::{handle_domain_error, request_language, validation_error_response};

/// Handler for POST /api/v1/auth/verify-code
///
/// Exchanges a valid code for a session. The first successful verification
/// of an address creates its user.
///
/// # Responses
///
/// - `200` `{ "token", "token_type": "Bearer", "expires_in", "user", "is_new_user" }`
/// - `400` wrong, expired or missing code (with `remaining_attempts` when known)
/// - `429` attempts exhausted; a new code must be requested
pub async fn verify_code<U, M, O, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, M, O, E>>,
    request: web::Json<VerifyCodeRequest>,
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

    match state
        .auth_service
        .login_with_code(&request.email, &request.code)
        .await
    {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(error) => handle_domain_error(&error, lang),
    }
}
