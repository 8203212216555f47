//! JSON manifest store
//!
//! The manifest is a single object with an `externals` array; array order
//! is preserved and is the processing order. Serialization is
//! deterministic: declared key order, 4-space indent, optional keys
//! omitted when absent.

use crate::{ExternalsError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One declared external repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalSpec {
    /// Working-tree location, relative to the manifest file's directory
    pub path: String,

    /// Remote name to register and use; `origin` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// URL used for fetch operations
    pub fetchurl: String,

    /// Optional explicit push URL; the fetch URL serves both directions
    /// when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pushurl: Option<String>,

    /// Desired revision: branch name, tag, or commit hash
    pub revision: String,
}

impl ExternalSpec {
    /// The remote name for this external, defaulting to "origin"
    pub fn remote_name(&self) -> &str {
        self.name.as_deref().unwrap_or("origin")
    }
}

/// A parsed externals manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Externals in declaration order
    pub externals: Vec<ExternalSpec>,
}

impl Manifest {
    /// Load a manifest from a file
    ///
    /// Fails with a configuration error when the file is missing, is not
    /// valid JSON, or lacks the `externals` key.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ExternalsError::Config(format!(
                "Manifest file not found: {}",
                path.display()
            )));
        }

        tracing::info!(path = %path.display(), "Loading externals manifest");

        let content = std::fs::read_to_string(path)?;
        let manifest: Self = serde_json::from_str(&content).map_err(|e| {
            ExternalsError::Config(format!("Invalid manifest {}: {}", path.display(), e))
        })?;

        tracing::debug!(externals = manifest.externals.len(), "Manifest loaded");

        Ok(manifest)
    }

    /// Parse a manifest from JSON text
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| ExternalsError::Config(format!("Invalid manifest: {}", e)))
    }

    /// Serialize to indented JSON with stable, declared key order
    pub fn to_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut serializer)?;

        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const EXAMPLE_MANIFEST: &str = r#"{
    "externals": [
        {
            "path": "deps/widget",
            "fetchurl": "https://example.com/widget.git",
            "pushurl": "git@example.com:widget.git",
            "revision": "master"
        },
        {
            "path": "deps/gadget",
            "name": "upstream",
            "fetchurl": "https://example.com/gadget.git",
            "revision": "v1.0"
        }
    ]
}"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = Manifest::parse(EXAMPLE_MANIFEST).unwrap();

        assert_eq!(manifest.externals.len(), 2);

        let widget = &manifest.externals[0];
        assert_eq!(widget.path, "deps/widget");
        assert_eq!(widget.fetchurl, "https://example.com/widget.git");
        assert_eq!(widget.pushurl.as_deref(), Some("git@example.com:widget.git"));
        assert_eq!(widget.revision, "master");
        assert_eq!(widget.remote_name(), "origin");

        let gadget = &manifest.externals[1];
        assert_eq!(gadget.remote_name(), "upstream");
        assert!(gadget.pushurl.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("externals.json");
        std::fs::write(&path, EXAMPLE_MANIFEST).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.externals.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = Manifest::load("/nonexistent/externals.json");
        match result {
            Err(ExternalsError::Config(msg)) => assert!(msg.contains("not found")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_load_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("externals.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            Manifest::load(&path),
            Err(ExternalsError::Config(_))
        ));
    }

    #[test]
    fn test_load_missing_externals_key() {
        let result = Manifest::parse(r#"{ "repositories": [] }"#);
        match result {
            Err(ExternalsError::Config(msg)) => assert!(msg.contains("externals")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_required_field() {
        let result = Manifest::parse(
            r#"{ "externals": [ { "path": "dep", "revision": "master" } ] }"#,
        );
        match result {
            Err(ExternalsError::Config(msg)) => assert!(msg.contains("fetchurl")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_round_trip_preserves_entries() {
        let manifest = Manifest::parse(EXAMPLE_MANIFEST).unwrap();
        let reparsed = Manifest::parse(&manifest.to_json().unwrap()).unwrap();

        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn test_serialize_omits_absent_optionals() {
        let manifest = Manifest {
            externals: vec![ExternalSpec {
                path: "dep".to_string(),
                name: None,
                fetchurl: "https://example.com/repo.git".to_string(),
                pushurl: None,
                revision: "master".to_string(),
            }],
        };

        let json = manifest.to_json().unwrap();
        assert!(!json.contains("pushurl"));
        assert!(!json.contains("\"name\""));
    }

    #[test]
    fn test_serialize_key_order_and_indent() {
        let manifest = Manifest {
            externals: vec![ExternalSpec {
                path: "dep".to_string(),
                name: None,
                fetchurl: "https://example.com/repo.git".to_string(),
                pushurl: Some("git@example.com:repo.git".to_string()),
                revision: "v1.0".to_string(),
            }],
        };

        let json = manifest.to_json().unwrap();

        // Declared key order, not alphabetical
        let path_pos = json.find("\"path\"").unwrap();
        let fetch_pos = json.find("\"fetchurl\"").unwrap();
        let push_pos = json.find("\"pushurl\"").unwrap();
        let rev_pos = json.find("\"revision\"").unwrap();
        assert!(path_pos < fetch_pos);
        assert!(fetch_pos < push_pos);
        assert!(push_pos < rev_pos);

        // 4-space indent
        assert!(json.contains("\n    \"externals\""));
    }

    #[test]
    fn test_array_order_preserved() {
        let manifest = Manifest::parse(EXAMPLE_MANIFEST).unwrap();
        let json = manifest.to_json().unwrap();

        let widget_pos = json.find("deps/widget").unwrap();
        let gadget_pos = json.find("deps/gadget").unwrap();
        assert!(widget_pos < gadget_pos);
    }
}
