use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::dto::{ChatRequestDto, HealthResponse},
};

/// One independent chat turn against the reference context.
///
/// Model failures still answer `200` with `{"erro": ...}`; only malformed
/// bodies are rejected with `400`.
#[post("/responder")]
async fn responder(
    state: web::Data<AppState>,
    request: web::Json<ChatRequestDto>,
    req: HttpRequest,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let request_id = get_request_id(&req).unwrap_or_default();
    log::info!(
        "[{}] chat request ({} characters)",
        request_id,
        request.texto.chars().count()
    );

    let reply = state.chat_service.respond(&request.texto).await;
    if reply.is_error() {
        log::warn!("[{}] chat request failed: {}", request_id, reply.text());
    }

    Ok(HttpResponse::Ok().json(reply))
}

#[get("/health")]
async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::healthy(
        state.chat_service.context().char_count(),
    ))
}

/// Rejects unparseable bodies with the same `{"erro": ...}` shape.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into())
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(responder)
        .service(health_check);
}
