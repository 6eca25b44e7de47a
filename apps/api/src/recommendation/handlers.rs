//! Axum route handlers for the recommendation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::models::career::PredictionResponse;
use crate::models::profile::Profile;
use crate::state::AppState;

/// POST /predict
///
/// Scores a profile and returns up to five careers with confidences summing to ~100.
/// Answers 503 before looking at the body when no model is loaded.
pub async fn handle_predict(
    State(state): State<AppState>,
    payload: Result<Json<Profile>, JsonRejection>,
) -> Result<Json<PredictionResponse>, AppError> {
    let recommender = state.recommender()?;
    let Json(profile) = payload.map_err(|rejection| AppError::Validation(rejection.body_text()))?;

    let response = recommender.predict(&profile)?;
    Ok(Json(response))
}
