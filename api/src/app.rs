//! Application state and factory
//!
//! This module holds the shared services handed to every handler and builds
//! the Actix-web application around them.

use std::sync::Arc;

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError},
    web, App, Error, HttpRequest, HttpResponse,
};

use ouv_core::{
    AuthService, EmailServiceTrait, ManifestationRepository, ManifestationService, OtpRepository,
    ProfileService, SessionService, UserRepository,
};
use ouv_infra::database::DatabasePool;
use ouv_shared::{error_codes, ErrorResponse};

use crate::handlers::request_language;
use crate::middleware::JwtAuth;
use crate::routes::{auth, health, manifestations, users};

/// Services shared by all handlers
pub struct AppState<U, M, O, E>
where
    U: UserRepository,
    M: ManifestationRepository,
    O: OtpRepository,
    E: EmailServiceTrait,
{
    pub auth_service: Arc<AuthService<U, E, O>>,
    pub profile_service: Arc<ProfileService<U>>,
    pub manifestation_service: Arc<ManifestationService<M>>,
    pub session_service: Arc<SessionService>,
    /// Pool probed by the health check, absent in tests
    pub database: Option<DatabasePool>,
}

/// Register the routes, JSON limits and shared state on an app
///
/// Middleware that differs between the server and tests (CORS, request
/// tracing) is added by the caller.
pub fn create_app<U, M, O, E>(
    state: web::Data<AppState<U, M, O, E>>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserRepository + 'static,
    M: ManifestationRepository + 'static,
    O: OtpRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let sessions = web::Data::from(state.session_service.clone());
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler);

    App::new()
        .app_data(state)
        .app_data(sessions)
        .app_data(json_config)
        .route("/health", web::get().to(health::health_check::<U, M, O, E>))
        .service(
            web::scope("/api/v1")
                .service(
                    web::scope("/auth")
                        .route("/send-code", web::post().to(auth::send_code::<U, M, O, E>))
                        .route("/verify-code", web::post().to(auth::verify_code::<U, M, O, E>))
                        .service(
                            web::resource("/me")
                                .route(web::get().to(auth::me::<U, M, O, E>))
                                .wrap(JwtAuth::required()),
                        ),
                )
                .service(
                    web::scope("/users")
                        .route("/register", web::post().to(users::register::<U, M, O, E>)),
                )
                .service(
                    web::scope("/manifestations")
                        .service(
                            web::resource("")
                                .route(web::post().to(manifestations::submit::<U, M, O, E>))
                                .route(web::get().to(manifestations::list::<U, M, O, E>))
                                .wrap(JwtAuth::optional()),
                        )
                        .route(
                            "/{protocol}",
                            web::get().to(manifestations::track::<U, M, O, E>),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

/// Localized 400 for malformed or oversized JSON bodies
fn json_error_handler(error: JsonPayloadError, req: &HttpRequest) -> Error {
    let lang = request_language(req);
    tracing::debug!(error = %error, "Rejected JSON payload");

    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        error_codes::VALIDATION_ERROR,
        lang.pick(
            "Corpo da requisição inválido",
            "Invalid request body",
        ),
    ));
    InternalError::from_response(error, response).into()
}

/// Default 404 handler
async fn not_found(req: HttpRequest) -> HttpResponse {
    let lang = request_language(&req);
    HttpResponse::NotFound().json(ErrorResponse::new(
        error_codes::NOT_FOUND,
        lang.pick("Recurso não encontrado", "The requested resource was not found"),
    ))
}
