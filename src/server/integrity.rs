//! Request signature checks and signed JSON responses

use crate::server::state::AppState;
use crate::utils::crypto::HASH_HEADER;
use crate::utils::error::{MetricsError, Result};
use actix_web::http::header::ContentType;
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use tracing::warn;

/// Check the `HashSHA256` header against the (decompressed) body
///
/// Passes when no key is configured or the header is absent.
pub(crate) fn verify_request(state: &AppState, req: &HttpRequest, body: &[u8]) -> Result<()> {
    let Some(signer) = &state.signer else {
        return Ok(());
    };
    let Some(header) = req.headers().get(HASH_HEADER) else {
        return Ok(());
    };

    let signature = header
        .to_str()
        .map_err(|_| MetricsError::signature_mismatch("signature header is not valid text"))?;
    if signature.trim().is_empty() {
        return Ok(());
    }

    signer.verify(body, signature).inspect_err(|_| {
        warn!("Rejected request to {} with a bad signature", req.path());
    })
}

/// JSON response, signed when a key is configured
pub(crate) fn json_response<T: Serialize>(state: &AppState, payload: &T) -> Result<HttpResponse> {
    let body = serde_json::to_vec(payload)?;
    let mut builder = HttpResponse::Ok();
    builder.content_type(ContentType::json());
    if let Some(signer) = &state.signer {
        builder.insert_header((HASH_HEADER, signer.sign(&body)?));
    }
    Ok(builder.body(body))
}
