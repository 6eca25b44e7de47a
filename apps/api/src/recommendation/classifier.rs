//! Classifier — the narrow seam between feature rows and per-career probabilities.
//!
//! `Recommender` holds an `Arc<dyn Classifier>`. The default backend is
//! `LogisticClassifier`, a one-vs-rest logistic model loaded from JSON. Tests
//! plug in fixed-output doubles through the same trait.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::models::career::Career;
use crate::recommendation::artifacts::ArtifactError;

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("expected {expected} features, got {found}")]
    FeatureCount { expected: usize, found: usize },

    #[error("expected {expected} career probabilities, got {found}")]
    LabelCount { expected: usize, found: usize },

    #[error("probability for {career} is not in [0, 1]: {value}")]
    InvalidProbability { career: Career, value: f64 },

    #[error("logit for {0} is undefined (NaN)")]
    UndefinedLogit(Career),
}

/// Multi-label career classifier.
///
/// `predict_proba` returns the probability that each career applies, in
/// [`Career::ALL`] order.
pub trait Classifier: Send + Sync {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError>;
}

/// Checks a classifier's raw output and fixes it to one value per career.
pub fn checked_probabilities(raw: Vec<f64>) -> Result<[f64; Career::COUNT], ClassifierError> {
    let probabilities: [f64; Career::COUNT] = raw.try_into().map_err(|raw: Vec<f64>| {
        ClassifierError::LabelCount {
            expected: Career::COUNT,
            found: raw.len(),
        }
    })?;

    for career in Career::ALL {
        let value = probabilities[career.index()];
        if !(value.is_finite() && (0.0..=1.0).contains(&value)) {
            return Err(ClassifierError::InvalidProbability { career, value });
        }
    }
    Ok(probabilities)
}

// ────────────────────────────────────────────────────────────────────────────
// LogisticClassifier
// ────────────────────────────────────────────────────────────────────────────

/// On-disk form of a one-vs-rest logistic model.
///
/// `labels[i]` names the career scored by `coefficients[i]` and `intercepts[i]`.
/// Labels may appear in any order.
#[derive(Debug, Clone, Deserialize)]
pub struct LogisticModelArtifact {
    pub labels: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
    pub intercepts: Vec<f64>,
}

/// One independent logistic regression per career: `p = σ(w · x + b)`.
#[derive(Debug, Clone)]
pub struct LogisticClassifier {
    n_features: usize,
    /// Indexed by `Career::index()`.
    weights: Vec<Vec<f64>>,
    intercepts: [f64; Career::COUNT],
}

impl LogisticClassifier {
    /// Validates `artifact` against the expected feature width and reorders its
    /// rows into `Career::ALL` order.
    pub fn from_artifact(
        artifact: LogisticModelArtifact,
        n_features: usize,
    ) -> Result<Self, ArtifactError> {
        let LogisticModelArtifact {
            labels,
            coefficients,
            intercepts,
        } = artifact;

        if labels.len() != Career::COUNT {
            return Err(ArtifactError::Shape {
                what: "career labels",
                expected: Career::COUNT,
                found: labels.len(),
            });
        }
        if coefficients.len() != labels.len() {
            return Err(ArtifactError::Shape {
                what: "coefficient rows",
                expected: labels.len(),
                found: coefficients.len(),
            });
        }
        if intercepts.len() != labels.len() {
            return Err(ArtifactError::Shape {
                what: "intercepts",
                expected: labels.len(),
                found: intercepts.len(),
            });
        }

        let mut seen = HashSet::with_capacity(Career::COUNT);
        let mut weights = vec![Vec::new(); Career::COUNT];
        let mut ordered_intercepts = [0.0; Career::COUNT];

        for ((label, row), intercept) in labels.into_iter().zip(coefficients).zip(intercepts) {
            let career =
                Career::from_title(&label).ok_or_else(|| ArtifactError::UnknownLabel(label.clone()))?;
            if !seen.insert(career) {
                return Err(ArtifactError::DuplicateLabel(label));
            }
            if row.len() != n_features {
                return Err(ArtifactError::Shape {
                    what: "coefficients per row",
                    expected: n_features,
                    found: row.len(),
                });
            }
            weights[career.index()] = row;
            ordered_intercepts[career.index()] = intercept;
        }

        Ok(Self {
            n_features,
            weights,
            intercepts: ordered_intercepts,
        })
    }
}

impl Classifier for LogisticClassifier {
    fn predict_proba(&self, features: &[f64]) -> Result<Vec<f64>, ClassifierError> {
        if features.len() != self.n_features {
            return Err(ClassifierError::FeatureCount {
                expected: self.n_features,
                found: features.len(),
            });
        }

        Career::ALL
            .into_iter()
            .map(|career| {
                let row = &self.weights[career.index()];
                let z = row.iter().zip(features).map(|(w, x)| w * x).sum::<f64>()
                    + self.intercepts[career.index()];
                if z.is_nan() {
                    return Err(ClassifierError::UndefinedLogit(career));
                }
                Ok(sigmoid(z))
            })
            .collect()
    }
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
