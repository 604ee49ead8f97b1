use axum::{extract::State, http::StatusCode, response::Json, routing::post, Router};
use shared::{LogEntry, LogResponse};
use tracing::{debug, error, info, warn};

use crate::AppState;

/// Create a router for log forwarding
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(log_message))
}

/// Forward a log line from the rendering layer to the backend logger
pub async fn log_message(
    State(_app_state): State<AppState>,
    Json(entry): Json<LogEntry>,
) -> Result<Json<LogResponse>, StatusCode> {
    let component = entry.component.as_deref().unwrap_or("frontend");
    let message = format!("[{}] {}", component, entry.message);

    match entry.level.to_lowercase().as_str() {
        "debug" => debug!("{}", message),
        "info" => info!("{}", message),
        "warn" => warn!("{}", message),
        "error" => error!("{}", message),
        _ => info!("{}", message), // Default to info for unknown levels
    }

    Ok(Json(LogResponse { success: true }))
}
