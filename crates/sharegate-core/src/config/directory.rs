//! Principal directory query configuration.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Settings for "pick a principal" directory searches.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Page size of the principal picker.
    #[serde(default = "default_page_size")]
    pub page_size: u64,
    /// Maximum page size accepted from callers.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: u64,
    /// Sort applied when the caller supplies none (`field:direction`).
    #[serde(default = "default_sort")]
    pub default_sort: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            default_sort: default_sort(),
        }
    }
}

impl DirectoryConfig {
    /// Check page bounds and sort syntax.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page_size == 0 || self.page_size > self.max_page_size {
            return Err(AppError::configuration(format!(
                "directory.page_size must be within 1..={}",
                self.max_page_size
            )));
        }
        match self.default_sort.split_once(':') {
            Some((field, "asc" | "desc")) if !field.is_empty() => Ok(()),
            _ => Err(AppError::configuration(format!(
                "directory.default_sort '{}' must look like 'field:asc' or 'field:desc'",
                self.default_sort
            ))),
        }
    }
}

fn default_page_size() -> u64 {
    10
}

fn default_max_page_size() -> u64 {
    100
}

fn default_sort() -> String {
    "created:desc".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_sort_rejected() {
        let config = DirectoryConfig {
            default_sort: "created".to_string(),
            ..DirectoryConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
