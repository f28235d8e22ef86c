use actix_web::{web, HttpResponse};
use chrono::Utc;

use ouv_core::{EmailServiceTrait, ManifestationRepository, OtpRepository, UserRepository};
use ouv_shared::types::HealthResponse;

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports `degraded` with status 503 when the database does not answer.
/// Without a configured pool only the process itself is checked.
pub async fn health_check<U, M, O, E>(state: web::Data<AppState<U, M, O, E>>) -> HttpResponse
where
    U: UserRepository + 'static,
    M: ManifestationRepository + 'static,
    O: OtpRepository + 'static,
    E: EmailServiceTrait + 'static,
{
    let database = match &state.database {
        Some(pool) => pool.ping().await,
        None => true,
    };

    let body = HealthResponse {
        status: if database { "healthy" } else { "degraded" }.to_string(),
        service: "ouvidoria-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database,
        timestamp: Utc::now(),
    };

    if database {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
