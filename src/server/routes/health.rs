//! Backend liveness endpoint

use crate::server::state::AppState;
use crate::utils::error::Result;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};
use tracing::{debug, error};

/// Configure liveness routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/ping", web::get().to(ping));
}

/// `200` when the store answers, `500` otherwise
pub async fn ping(state: web::Data<AppState>) -> Result<HttpResponse> {
    debug!("Ping requested");

    state.store.ping().await.inspect_err(|e| {
        error!("{} backend is unreachable: {}", state.store.backend(), e);
    })?;

    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body("OK"))
}
