use crate::app::AppState;
use crate::db::postgres::{insert_health, insert_observation, station_by_phone};
use crate::models::sms::SmsRequest;
use crate::sensor;
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::json;
use std::time::Instant;
use tracing::{info, warn};

/// Webhook for Lufft telegrams relayed by the SMS gateway.
pub async fn ingest_lufft_sms(
    State(state): State<AppState>,
    Json(payload): Json<SmsRequest>,
) -> Result<Json<serde_json::Value>, (StatusCode, String)> {
    let start = Instant::now();
    let received_at = Utc::now();

    // Decode first so malformed telegrams never reach the database
    let (obs, health) = sensor::decode(&payload.message, received_at).map_err(|e| {
        warn!(from = %payload.from, error = ?e, "Rejected telegram");
        (StatusCode::BAD_REQUEST, e.to_string())
    })?;

    if !health.error_msg.is_empty() {
        warn!(
            from = %payload.from,
            minutes_difference = health.minutes_difference,
            error_msg = %health.error_msg,
            "Telegram timestamp replaced with receipt time"
        );
    }

    let station_id = station_by_phone(&state.pool, &payload.from)
        .await
        .map_err(internal_err)?
        .ok_or_else(|| {
            warn!(from = %payload.from, "Telegram from unregistered number");
            (StatusCode::NOT_FOUND, "Unknown station".to_string())
        })?;

    insert_observation(&state.pool, station_id, &obs)
        .await
        .map_err(internal_err)?;
    insert_health(&state.pool, station_id, &health)
        .await
        .map_err(internal_err)?;

    let total_ms = start.elapsed().as_millis() as i64;
    info!(
        station_id,
        data_count = health.data_count,
        data_status = %health.data_status,
        total_ms,
        "Telegram ingested"
    );

    Ok(Json(json!({
        "ok": true,
        "stationId": station_id,
        "timestamp": obs.timestamp,
        "dataCount": health.data_count,
        "dataStatus": health.data_status,
        "minutesDifference": health.minutes_difference,
        "errorMsg": health.error_msg,
        "totalMs": total_ms,
    })))
}

fn internal_err<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    warn!(error=%e, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Internal Server Error".to_string(),
    )
}
