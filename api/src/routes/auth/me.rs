use actix_web::{web, HttpRequest, HttpResponse};

use ouv_core::{EmailServiceTrait, ManifestationRepository, OtpRepository, UserRepository, UserSummary};

use crate::app::AppState;
use crate::handlers::{handle_domain_error, request_language};
use crate::middleware::AuthContext;

/// Handler for GET /api/v1/auth/me (requires a session)
pub async fn me<U, M, O, E>(
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
    match state.auth_service.find_user(auth.user_id).await {
        Ok(user) => HttpResponse::Ok().json(UserSummary::from(&user)),
        Err(error) => handle_domain_error(&error, request_language(&req)),
    }
}
