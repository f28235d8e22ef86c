//! Mapping of domain errors to localized HTTP responses
//!
//! Every error body is an [`ErrorResponse`] with a stable `error` code and a
//! message in the caller's language (Portuguese unless `Accept-Language`
//! prefers English).

use actix_web::{http::header, HttpRequest, HttpResponse};
use validator::ValidationErrors;

use ouv_core::errors::{AuthError, DomainError, TokenError, ValidationError};
use ouv_shared::{error_codes, ErrorResponse, Language};

/// Language preferred by the caller
pub fn request_language(req: &HttpRequest) -> Language {
    req.headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Language::from_accept_language)
        .unwrap_or_default()
}

/// Handle domain errors and convert them to appropriate HTTP responses
pub fn handle_domain_error(error: &DomainError, lang: Language) -> HttpResponse {
    match error {
        DomainError::Internal { message } => {
            tracing::error!(error = %message, "Internal error while handling request");
        }
        DomainError::Auth(AuthError::EmailDeliveryFailure { reason }) => {
            tracing::error!(error = %reason, "Email delivery failed");
        }
        other => tracing::debug!(error = %other, "Request rejected"),
    }

    match error {
        DomainError::Auth(auth_error) => handle_auth_error(auth_error, lang),
        DomainError::Token(token_error) => handle_token_error(token_error, lang),
        DomainError::ValidationErr(validation_error) => {
            handle_validation_error(validation_error, lang)
        }
        DomainError::Validation { message } => HttpResponse::BadRequest().json(
            ErrorResponse::new(
                error_codes::VALIDATION_ERROR,
                lang.pick("Dados inválidos", "Invalid request data"),
            )
            .with_detail("reason", message),
        ),
        DomainError::NotFound { resource } if resource == "manifestation" => {
            HttpResponse::NotFound().json(ErrorResponse::new(
                error_codes::MANIFESTATION_NOT_FOUND,
                lang.pick(
                    "Nenhuma manifestação encontrada com este protocolo",
                    "No manifestation found for this protocol",
                ),
            ))
        }
        DomainError::NotFound { .. } => HttpResponse::NotFound().json(ErrorResponse::new(
            error_codes::NOT_FOUND,
            lang.pick("Recurso não encontrado", "Resource not found"),
        )),
        DomainError::Conflict { .. } => HttpResponse::Conflict().json(ErrorResponse::new(
            error_codes::CONFLICT,
            lang.pick(
                "O recurso já existe, tente novamente",
                "The resource already exists, please retry",
            ),
        )),
        DomainError::Unauthorized => unauthorized(lang),
        DomainError::Internal { .. } => internal_error(lang),
    }
}

fn handle_auth_error(error: &AuthError, lang: Language) -> HttpResponse {
    match error {
        AuthError::InvalidEmail { .. } => invalid_email(lang),
        AuthError::InvalidVerificationCode { remaining_attempts } => {
            let mut body = ErrorResponse::new(
                error_codes::VERIFICATION_CODE_INVALID,
                lang.pick(
                    "Código de verificação inválido ou expirado",
                    "Invalid or expired verification code",
                ),
            );
            if let Some(remaining) = remaining_attempts {
                body = body.with_detail("remaining_attempts", remaining);
            }
            HttpResponse::BadRequest().json(body)
        }
        AuthError::MaxAttemptsExceeded => HttpResponse::TooManyRequests().json(ErrorResponse::new(
            error_codes::VERIFICATION_ATTEMPTS_EXHAUSTED,
            lang.pick(
                "Número máximo de tentativas excedido. Solicite um novo código",
                "Maximum verification attempts exceeded. Please request a new code",
            ),
        )),
        AuthError::EmailDeliveryFailure { .. } => {
            HttpResponse::ServiceUnavailable().json(ErrorResponse::new(
                error_codes::EMAIL_DELIVERY_FAILED,
                lang.pick(
                    "Não foi possível enviar o e-mail. Tente novamente mais tarde",
                    "The email could not be sent. Please try again later",
                ),
            ))
        }
        AuthError::UserNotFound | AuthError::AuthenticationFailed => unauthorized(lang),
    }
}

fn handle_token_error(error: &TokenError, lang: Language) -> HttpResponse {
    match error {
        TokenError::TokenExpired => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::TOKEN_EXPIRED,
            lang.pick("Sessão expirada", "Session expired"),
        )),
        TokenError::TokenGenerationFailed => internal_error(lang),
        TokenError::InvalidTokenFormat
        | TokenError::InvalidSignature
        | TokenError::TokenNotYetValid
        | TokenError::InvalidClaims => HttpResponse::Unauthorized().json(ErrorResponse::new(
            error_codes::TOKEN_INVALID,
            lang.pick("Sessão inválida", "Invalid session"),
        )),
    }
}

fn handle_validation_error(error: &ValidationError, lang: Language) -> HttpResponse {
    let body = match error {
        ValidationError::InvalidEmail => return invalid_email(lang),
        ValidationError::RequiredField { field } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            match lang {
                Language::Portuguese => format!("O campo '{}' é obrigatório", field),
                Language::English => format!("The field '{}' is required", field),
            },
        )
        .with_detail("field", field),
        ValidationError::InvalidFormat { field } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            match lang {
                Language::Portuguese => format!("O campo '{}' tem formato inválido", field),
                Language::English => format!("The field '{}' has an invalid format", field),
            },
        )
        .with_detail("field", field),
        ValidationError::InvalidLength {
            field, min, max, ..
        } => ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            match lang {
                Language::Portuguese => {
                    format!("O campo '{}' deve ter entre {} e {} caracteres", field, min, max)
                }
                Language::English => {
                    format!("The field '{}' must be between {} and {} characters", field, min, max)
                }
            },
        )
        .with_detail("field", field)
        .with_detail("min", min)
        .with_detail("max", max),
    };

    HttpResponse::BadRequest().json(body)
}

/// 400 response for a request body rejected by `validator`
pub fn validation_error_response(errors: &ValidationErrors, lang: Language) -> HttpResponse {
    let fields: Vec<&str> = errors.field_errors().keys().copied().collect();
    tracing::debug!(?fields, "Request body failed validation");

    HttpResponse::BadRequest().json(
        ErrorResponse::new(
            error_codes::VALIDATION_ERROR,
            lang.pick(
                "Dados inválidos. Verifique os campos informados",
                "Invalid request data. Please check the submitted fields",
            ),
        )
        .with_detail("fields", fields),
    )
}

/// 401 response used by handlers and the authentication middleware
pub fn unauthorized(lang: Language) -> HttpResponse {
    HttpResponse::Unauthorized().json(ErrorResponse::new(
        error_codes::UNAUTHORIZED,
        lang.pick("Autenticação necessária", "Authentication required"),
    ))
}

fn invalid_email(lang: Language) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::EMAIL_INVALID,
        lang.pick("Endereço de e-mail inválido", "Invalid email address"),
    ))
}

fn internal_error(lang: Language) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse::new(
        error_codes::INTERNAL_ERROR,
        lang.pick("Ocorreu um erro interno", "An internal error occurred"),
    ))
}
