use crate::models::sms::SimulateRequest;
use crate::sensor::{self, LufftVariant};
use axum::{http::StatusCode, Json};
use serde_json::json;
use tracing::{debug, warn};

/// Renders a record pair as a Lufft telegram for fixtures and simulated traffic.
pub async fn simulate_lufft(
    Json(payload): Json<SimulateRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let variant = LufftVariant::from_token_count(usize::from(payload.variant)).ok_or_else(|| {
        warn!(variant = payload.variant, "Unsupported telegram variant");
        (
            StatusCode::BAD_REQUEST,
            format!("unsupported variant {}", payload.variant),
        )
    })?;

    let message =
        sensor::encode(&payload.observation, &payload.health, variant).map_err(|e| {
            warn!(%variant, error = %e, "Record cannot be rendered as a telegram");
            (StatusCode::BAD_REQUEST, e.to_string())
        })?;
    debug!(%variant, %message, "Simulated telegram");

    Ok(Json(json!({
        "variant": payload.variant,
        "message": message,
    })))
}
