// Static boundary loader.
// Reads the Canada GeoJSON file from disk and validates its shape.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::info;

use crate::error::{CovidError, Result};

/// Read and parse the boundary document.
///
/// The document is consumed as raw JSON rather than typed features: the
/// chart renderer passes it through to plotly untouched, keyed by
/// `properties.name`.
pub fn load_boundaries(path: &Path) -> Result<Value> {
    info!("reading boundary document from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let document: Value = serde_json::from_str(&contents)?;

    match document.get("type").and_then(Value::as_str) {
        Some("FeatureCollection") => Ok(document),
        Some(other) => Err(CovidError::Boundary(format!(
            "expected FeatureCollection, got {}",
            other
        ))),
        None => Err(CovidError::Boundary("missing type field".to_string())),
    }
}

/// Region names (`properties.name`) of the document's features.
pub fn feature_names(document: &Value) -> Vec<String> {
    document
        .get("features")
        .and_then(Value::as_array)
        .map(|features| {
            features
                .iter()
                .filter_map(|feature| {
                    feature
                        .pointer("/properties/name")
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .collect()
        })
        .unwrap_or_default()
}
