//! Resource references.

use serde::{Deserialize, Serialize};

use sharegate_core::types::ResourceId;

/// Well-known resource type names.
pub mod resource_type {
    /// A document inside a datasource tree (path-scoped).
    pub const DOCUMENT: &str = "document";
    /// A datasource.
    pub const DATASOURCE: &str = "datasource";
    /// A model provider.
    pub const MODEL_PROVIDER: &str = "model_provider";
}

/// Reference to a shareable resource.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceRef {
    /// Resource type name (see [`resource_type`]).
    #[serde(rename = "resource_type")]
    pub kind: String,
    /// Resource identifier.
    #[serde(rename = "resource_id")]
    pub id: ResourceId,
    /// Hierarchical location, only for path-scoped resources.
    #[serde(
        default,
        rename = "resource_parent_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub path: Option<String>,
}

impl ResourceRef {
    /// Reference a flat (non path-scoped) resource.
    pub fn new(kind: impl Into<String>, id: impl Into<ResourceId>) -> Self {
        Self {
            kind: kind.into(),
            id: id.into(),
            path: None,
        }
    }

    /// Attach a hierarchical path.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Whether two references address the same resource, ignoring path.
    pub fn same_resource(&self, other: &ResourceRef) -> bool {
        self.kind == other.kind && self.id == other.id
    }
}

impl std::fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_omitted_for_flat_resources() {
        let flat = ResourceRef::new(resource_type::DATASOURCE, "ds-1");
        let json = serde_json::to_value(&flat).unwrap();
        assert_eq!(json["resource_type"], "datasource");
        assert!(json.get("resource_parent_path").is_none());

        let doc = ResourceRef::new(resource_type::DOCUMENT, "doc-1").with_path("/reports/2024/");
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["resource_parent_path"], "/reports/2024/");
        assert!(doc.same_resource(&ResourceRef::new("document", "doc-1")));
    }
}
