use actix_web::{http::header, web, HttpRequest, HttpResponse};
use validator::Validate;

use ouv_core::{EmailServiceTrait, ManifestationRepository, OtpRepository, SendOtpOutcome, UserRepository};
use ouv_shared::{error_codes, Language};

use crate::app::AppState;
use crate::dto::{RateLimitedResponse, SendCodeRequest, SendCodeResponse};
use crate::handlers::{handle_domain_error, request_language, validation_error_response};

/// Handler for POST /api/v1/auth/send-code
///
/// Emails a one-time code to the address.
///
/// # Request Body
///
/// ```json
/// { "email": "cidadao@exemplo.com" }
/// ```
///
/// # Responses
///
/// - `200` `{ "success": true, "message": "...", "resend_after": 60, "expires_at": "..." }`
/// - `429` `{ "success": false, "error": "RATE_LIMIT_EXCEEDED", "message": "...", "retry_after": 42 }`
///   while the previous code is younger than the resend cooldown
/// - `400` invalid email, `503` email provider failure
pub async fn send_code<U, M, O, E>(
    req: HttpRequest,
    state: web::Data<AppState<U, M, O, E>>,
    request: web::Json<SendCodeRequest>,
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

    match state.auth_service.send_code(&request.email).await {
        Ok(SendOtpOutcome::Sent {
            expires_at,
            resend_after_seconds,
            ..
        }) => HttpResponse::Ok().json(SendCodeResponse {
            success: true,
            message: lang
                .pick(
                    "Código de verificação enviado. Verifique seu e-mail.",
                    "Verification code sent. Please check your email.",
                )
                .to_string(),
            resend_after: resend_after_seconds,
            expires_at,
        }),
        Ok(SendOtpOutcome::CoolingDown { retry_after_seconds }) => {
            HttpResponse::TooManyRequests()
                .insert_header((header::RETRY_AFTER, retry_after_seconds.to_string()))
                .json(RateLimitedResponse {
                    success: false,
                    error: error_codes::RATE_LIMIT_EXCEEDED.to_string(),
                    message: cooldown_message(lang, retry_after_seconds),
                    retry_after: retry_after_seconds,
                })
        }
        Err(error) => handle_domain_error(&error, lang),
    }
}

fn cooldown_message(lang: Language, seconds: i64) -> String {
    match lang {
        Language::Portuguese => format!(
            "Aguarde {} segundos antes de solicitar um novo código",
            seconds
        ),
        Language::English => format!(
            "Please wait {} seconds before requesting a new code",
            seconds
        ),
    }
}
