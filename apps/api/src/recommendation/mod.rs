// Career recommendation engine.
// Pipeline: feature encoding → classifier → heuristic blending → renormalized top 5.
// Model artifacts are loaded once at startup; everything per-request is pure.

pub mod artifacts;
pub mod blending;
pub mod classifier;
pub mod features;
pub mod handlers;
pub mod service;

/// Static version tag attached to every prediction and the health payload.
pub const MODEL_VERSION: &str = "1.0";
