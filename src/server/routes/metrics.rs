//! Metric ingestion and lookup endpoints
//!
//! JSON writes pass through the same steps: decode the body, check the
//! signature if one was sent, apply to the store, echo the stored value.
//! Request bodies arrive already decompressed; responses are compressed by
//! the `Compress` middleware when the client accepts gzip.

use crate::core::models::{MetricRecord, Metrics, MetricsQuery};
use crate::server::integrity::{json_response, verify_request};
use crate::server::state::AppState;
use crate::utils::error::{MetricsError, Result};
use actix_web::http::header::{self, ContentType};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Configure metric routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(list_metrics))
        .route("/value/", web::post().to(get_value_json))
        .route("/value/{kind}/{id}", web::get().to(get_value))
        .route("/update/", web::post().to(update_json))
        .route("/update/{kind}/{id}/{value}", web::post().to(update_from_path))
        .route("/updates/", web::post().to(update_batch));
}

fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .map_err(|e| MetricsError::bad_request(format!("malformed JSON body: {}", e)))
}

fn wants_json(req: &HttpRequest) -> bool {
    [header::ACCEPT, header::CONTENT_TYPE].iter().any(|name| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"))
    })
}

/// Listing of every metric
pub async fn list_metrics(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    let listing = state.store.get_all_metrics().await?;
    let content_type = if wants_json(&req) {
        ContentType::json()
    } else {
        ContentType::html()
    };
    Ok(HttpResponse::Ok().content_type(content_type).body(listing))
}

/// Plain-text value of one metric
pub async fn get_value(
    path: web::Path<(String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (kind, id) = path.into_inner();
    let value = state.store.get_metric(&kind, &id).await?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(value))
}

/// JSON lookup of one metric
pub async fn get_value_json(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let query: MetricsQuery = decode(&body)?;
    let kind = query.kind()?;
    verify_request(&state, &req, &body)?;

    let value = state.store.get(kind, &query.id).await?;
    json_response(&state, &Metrics::new(query.id, value))
}

/// Path-encoded write
pub async fn update_from_path(
    path: web::Path<(String, String, String)>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let (kind, id, raw) = path.into_inner();
    let value = state.store.save_metric(&kind, &id, &raw).await?;
    debug!("Stored {} {} = {}", kind, id, value);
    Ok(HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .finish())
}

/// JSON write of one metric; echoes the stored value
pub async fn update_json(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let record = decode::<Metrics>(&body)?.into_record()?;
    verify_request(&state, &req, &body)?;

    let value = state.store.save(record.clone()).await?;
    debug!("Stored {} {} = {}", record.kind(), record.id, value);
    json_response(&state, &Metrics::new(record.id, value))
}

/// JSON write of a batch
///
/// The whole batch is decoded and verified before anything is applied.
/// Records are then applied one by one; a store failure leaves the earlier
/// records applied and answers with that failure.
pub async fn update_batch(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let records = decode::<Vec<Metrics>>(&body)?
        .into_iter()
        .map(Metrics::into_record)
        .collect::<Result<Vec<MetricRecord>>>()?;
    verify_request(&state, &req, &body)?;

    let mut applied = Vec::with_capacity(records.len());
    for record in records {
        let value = state.store.save(record.clone()).await?;
        applied.push(Metrics::new(record.id, value));
    }

    debug!("Applied batch of {} metrics", applied.len());
    json_response(&state, &applied)
}
