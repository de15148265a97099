//! Plugin manifest (`dt-plugins.yaml`) parsing
//!
//! The manifest is deliberately fail-open: a missing file, a malformed
//! document, or a missing `plugins` key all yield an empty manifest
//! rather than an error. A broken registry must never block `dt
//! version` or the in-process plugins.
//!
//! Format:
//!
//! ```yaml
//! plugins:
//!   foo:
//!     type: node
//!     bin: cli/foo/dist/cli.js
//!     description: Foo build and deployment tools
//! ```

use serde::Deserialize;
use serde_yaml::{Mapping, Value};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Execution kind declared by a manifest entry.
///
/// Only `node` is recognized today; anything else (including a missing
/// `type` field) is preserved verbatim and ignored by the wrapper
/// factory, reserved for future kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginKind {
    Node,
    Other(String),
}

impl PluginKind {
    fn parse(raw: Option<String>) -> Self {
        match raw.as_deref() {
            Some("node") => Self::Node,
            _ => Self::Other(raw.unwrap_or_default()),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node)
    }
}

/// One manifest entry, keyed by plugin name.
#[derive(Debug, Clone)]
pub struct ManifestEntry {
    /// Declared execution kind.
    pub kind: PluginKind,

    /// Executable entry file, relative to the repository root.
    pub bin: Option<PathBuf>,

    /// Help text; the wrapper factory generates one when absent.
    pub description: Option<String>,

    /// The entry's full mapping as written, for fields this layer does
    /// not interpret.
    pub raw_config: Mapping,
}

/// Recognized per-entry fields. Everything else stays in `raw_config`.
#[derive(Debug, Default, Deserialize)]
struct RawEntry {
    #[serde(rename = "type")]
    kind: Option<String>,
    bin: Option<PathBuf>,
    description: Option<String>,
}

/// The parsed manifest: plugin name -> entry, in document order.
///
/// Loaded once per process invocation and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct PluginManifest {
    entries: Vec<(String, ManifestEntry)>,
}

impl PluginManifest {
    /// Load the manifest from `path`.
    ///
    /// Infallible by policy: every failure mode degrades to an empty
    /// manifest, traced at debug level only.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                debug!("unreadable plugin manifest {}: {}", path.display(), e);
                return Self::default();
            }
        };

        let doc: Value = match serde_yaml::from_str(&text) {
            Ok(doc) => doc,
            Err(e) => {
                debug!("malformed plugin manifest {}: {}", path.display(), e);
                return Self::default();
            }
        };

        Self::from_document(&doc)
    }

    fn from_document(doc: &Value) -> Self {
        let Some(plugins) = doc.get("plugins").and_then(Value::as_mapping) else {
            return Self::default();
        };

        let mut entries = Vec::new();
        for (key, config) in plugins {
            let Some(name) = key.as_str() else {
                continue;
            };
            let Some(raw_config) = config.as_mapping().cloned() else {
                debug!("plugin entry '{}' is not a mapping, skipping", name);
                continue;
            };
            let raw: RawEntry = serde_yaml::from_value(config.clone()).unwrap_or_default();

            entries.push((
                name.to_string(),
                ManifestEntry {
                    kind: PluginKind::parse(raw.kind),
                    bin: raw.bin,
                    description: raw.description,
                    raw_config,
                },
            ));
        }

        Self { entries }
    }

    /// Entries in document order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &ManifestEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn get(&self, name: &str) -> Option<&ManifestEntry> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, entry)| entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn load_str(yaml: &str) -> PluginManifest {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("dt-plugins.yaml");
        fs::write(&path, yaml).unwrap();
        PluginManifest::load(&path)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let tmp = TempDir::new().unwrap();
        let manifest = PluginManifest::load(&tmp.path().join("dt-plugins.yaml"));
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_malformed_yaml_is_empty() {
        let manifest = load_str("plugins: [unclosed\n  nope: {");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_missing_plugins_key_is_empty() {
        let manifest = load_str("tools:\n  foo:\n    type: node\n");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_plugins_not_a_mapping_is_empty() {
        let manifest = load_str("plugins: 42\n");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_parses_entries_in_document_order() {
        let manifest = load_str(concat!(
            "plugins:\n",
            "  zeta:\n",
            "    type: node\n",
            "    bin: cli/zeta/dist/cli.js\n",
            "  alpha:\n",
            "    type: node\n",
            "    bin: cli/alpha/dist/cli.js\n",
            "    description: Alpha tools\n",
        ));

        let names: Vec<&str> = manifest.entries().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["zeta", "alpha"]);

        let alpha = manifest.get("alpha").unwrap();
        assert!(alpha.kind.is_node());
        assert_eq!(alpha.bin.as_deref(), Some(Path::new("cli/alpha/dist/cli.js")));
        assert_eq!(alpha.description.as_deref(), Some("Alpha tools"));

        let zeta = manifest.get("zeta").unwrap();
        assert_eq!(zeta.description, None);
    }

    #[test]
    fn test_unrecognized_kind_is_preserved() {
        let manifest = load_str(concat!(
            "plugins:\n",
            "  legacy:\n",
            "    type: python\n",
            "    bin: cli/legacy/main.py\n",
            "  untyped:\n",
            "    bin: cli/untyped/cli.js\n",
        ));

        assert_eq!(
            manifest.get("legacy").unwrap().kind,
            PluginKind::Other("python".to_string())
        );
        assert!(!manifest.get("untyped").unwrap().kind.is_node());
    }

    #[test]
    fn test_raw_config_keeps_unknown_fields() {
        let manifest = load_str(concat!(
            "plugins:\n",
            "  foo:\n",
            "    type: node\n",
            "    bin: cli/foo/dist/cli.js\n",
            "    env: production\n",
        ));

        let foo = manifest.get("foo").unwrap();
        assert_eq!(
            foo.raw_config.get("env").and_then(Value::as_str),
            Some("production")
        );
    }
}
