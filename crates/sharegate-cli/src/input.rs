//! JSON input files.

use std::path::Path;

use serde::de::DeserializeOwned;

use sharegate_core::error::{AppError, ErrorKind};

/// Reads and parses a JSON file.
pub async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Validation,
            format!("Failed to read '{}'", path.display()),
            e,
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        AppError::with_source(
            ErrorKind::Serialization,
            format!("Failed to parse '{}'", path.display()),
            e,
        )
    })
}
