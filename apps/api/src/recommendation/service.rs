use std::sync::Arc;

use tracing::debug;

use crate::errors::AppError;
use crate::models::career::{CareerRecommendation, PredictionResponse};
use crate::models::profile::Profile;
use crate::recommendation::blending::blend;
use crate::recommendation::classifier::{checked_probabilities, Classifier};
use crate::recommendation::features::{encode, FeatureSchema};
use crate::recommendation::MODEL_VERSION;

/// Encoder → classifier → blender pipeline over a loaded model.
///
/// Built once at startup and shared read-only across requests.
#[derive(Clone)]
pub struct Recommender {
    schema: FeatureSchema,
    classifier: Arc<dyn Classifier>,
}

impl Recommender {
    pub fn new(schema: FeatureSchema, classifier: Arc<dyn Classifier>) -> Self {
        Self { schema, classifier }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    /// Scores `profile` and returns up to five careers, best first.
    ///
    /// Validation runs before any encoding. Classifier failures propagate as-is.
    pub fn predict(&self, profile: &Profile) -> Result<PredictionResponse, AppError> {
        profile
            .personality
            .check_bounds()
            .map_err(AppError::Validation)?;

        let encoded = encode(profile, &self.schema);
        let raw = self.classifier.predict_proba(&encoded.features)?;
        let probabilities = checked_probabilities(raw)?;
        let scores = blend(&probabilities, &encoded);

        let top = scores.first();
        debug!(
            top = top.map(|s| s.career.title()).unwrap_or("none"),
            top_score = top.map(|s| s.score).unwrap_or(0.0),
            tech_skills = encoded.signals.tech_skill_count,
            education = encoded.signals.education_encoded,
            "Scored profile"
        );

        Ok(PredictionResponse {
            careers: scores
                .into_iter()
                .map(|s| CareerRecommendation {
                    title: s.career.title().to_string(),
                    confidence: s.confidence,
                })
                .collect(),
            model_version: MODEL_VERSION.to_string(),
        })
    }
}
