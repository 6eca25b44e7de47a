use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::recommendation::MODEL_VERSION;
use crate::state::AppState;

/// GET /
/// Always answers, even when the model failed to load.
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model_version": MODEL_VERSION,
        "model_loaded": state.model_loaded()
    }))
}
