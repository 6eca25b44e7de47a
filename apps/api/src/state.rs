use std::sync::Arc;

use crate::errors::AppError;
use crate::recommendation::service::Recommender;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// `None` when the model artifacts failed to load; `/predict` then answers 503.
    pub recommender: Option<Arc<Recommender>>,
}

impl AppState {
    pub fn recommender(&self) -> Result<&Recommender, AppError> {
        self.recommender
            .as_deref()
            .ok_or(AppError::ServiceUnavailable)
    }

    pub fn model_loaded(&self) -> bool {
        self.recommender.is_some()
    }
}
