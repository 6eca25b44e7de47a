//! Startup loading of the two model artifacts: the ordered feature schema and
//! the classifier weights. Both are JSON files named in `Config`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::info;

use crate::config::Config;
use crate::recommendation::classifier::{LogisticClassifier, LogisticModelArtifact};
use crate::recommendation::features::FeatureSchema;
use crate::recommendation::service::Recommender;

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("feature schema has no columns")]
    EmptySchema,

    #[error("duplicate feature column '{0}'")]
    DuplicateFeature(String),

    #[error("unknown career label '{0}'")]
    UnknownLabel(String),

    #[error("duplicate career label '{0}'")]
    DuplicateLabel(String),

    #[error("expected {expected} {what}, found {found}")]
    Shape {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Reads a JSON array of column names.
pub fn load_feature_schema(path: &Path) -> Result<FeatureSchema, ArtifactError> {
    let columns: Vec<String> = read_json(path)?;
    let schema = FeatureSchema::new(columns)?;
    if schema.is_empty() {
        return Err(ArtifactError::EmptySchema);
    }
    Ok(schema)
}

/// Reads a logistic model whose rows must match `schema` in width.
pub fn load_classifier(
    path: &Path,
    schema: &FeatureSchema,
) -> Result<LogisticClassifier, ArtifactError> {
    let artifact: LogisticModelArtifact = read_json(path)?;
    LogisticClassifier::from_artifact(artifact, schema.len())
}

/// Loads both artifacts named in `config` and wires them into a `Recommender`.
pub fn load_recommender(config: &Config) -> Result<Recommender, ArtifactError> {
    let schema = load_feature_schema(&config.model_features_path)?;
    info!(
        "Feature schema loaded from {}",
        config.model_features_path.display()
    );

    let classifier = load_classifier(&config.model_path, &schema)?;
    info!("Classifier loaded from {}", config.model_path.display());

    Ok(Recommender::new(schema, Arc::new(classifier)))
}
