//! Configuration file loading for sinopia.
//!
//! Reads `sinopia.config.json` from a project directory. A missing file
//! means defaults; a file that exists but cannot be read or parsed is an
//! error, since silently ignoring it would change every result.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sinopia_canon::MatchOptions;
use sinopia_croquis::{ExtractOptions, NodeResolver};

/// File name looked up in the project directory.
pub const CONFIG_FILE_NAME: &str = "sinopia.config.json";

/// Top-level sinopia configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SinopiaConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Module specifier resolution.
    #[serde(default)]
    pub resolve: ResolveConfig,

    /// Surface extraction.
    #[serde(default)]
    pub extract: ExtractConfig,

    /// Coverage matching.
    #[serde(default)]
    pub coverage: CoverageConfig,

    /// Forward resolution misses to the log.
    #[serde(default)]
    pub verbose: bool,
}

/// Configuration for module resolution.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveConfig {
    /// Alias prefix to directory, relative to the project root
    /// (e.g. `{ "@/": "src/" }`).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub alias: BTreeMap<String, String>,

    /// Extensions tried when a specifier has none. Replaces the defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

/// Configuration for surface extraction.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractConfig {
    /// Extra component-defining functions, on top of `defineComponent`
    /// and friends.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub component_definers: Vec<String>,
}

/// Configuration for coverage matching.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverageConfig {
    /// Extra mount helpers, on top of `mount`, `render` and friends.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub mount_functions: Vec<String>,
}

/// Configuration loading error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Load `sinopia.config.json` from `dir`.
pub fn load_config(dir: &Path) -> Result<SinopiaConfig, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(SinopiaConfig::default());
    }

    let content = std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
        path: config_path.clone(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
        path: config_path,
        source,
    })
}

impl SinopiaConfig {
    /// Resolver with aliases anchored at `root`.
    pub fn resolver(&self, root: &Path) -> NodeResolver {
        let mut resolver = NodeResolver::new();
        for (prefix, target) in &self.resolve.alias {
            resolver = resolver.with_alias(prefix.as_str(), root.join(target));
        }
        if let Some(extensions) = &self.resolve.extensions {
            resolver = resolver.with_extensions(extensions.iter().map(String::as_str));
        }
        resolver
    }

    pub fn extract_options(&self) -> ExtractOptions {
        self.extract
            .component_definers
            .iter()
            .fold(ExtractOptions::default(), |options, name| {
                options.with_component_definer(name.as_str())
            })
    }

    pub fn match_options(&self) -> MatchOptions {
        self.coverage
            .mount_functions
            .iter()
            .fold(MatchOptions::default(), |options, name| {
                options.with_mount_function(name.as_str())
            })
    }
}

/// JSON Schema for `sinopia.config.json`.
pub const SINOPIA_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Sinopia Configuration",
  "description": "Configuration file for sinopia - Vue component surface and coverage analysis",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "resolve": {
      "type": "object",
      "properties": {
        "alias": {
          "type": "object",
          "description": "Specifier prefix to directory, relative to the project root.",
          "additionalProperties": { "type": "string" },
          "examples": [{ "@/": "src/" }]
        },
        "extensions": {
          "type": "array",
          "description": "Extensions tried when a specifier has none.",
          "items": { "type": "string" }
        }
      },
      "additionalProperties": false
    },
    "extract": {
      "type": "object",
      "properties": {
        "componentDefiners": {
          "type": "array",
          "description": "Additional functions whose argument is a component options object.",
          "items": { "type": "string" }
        }
      },
      "additionalProperties": false
    },
    "coverage": {
      "type": "object",
      "properties": {
        "mountFunctions": {
          "type": "array",
          "description": "Additional functions that mount a component in tests.",
          "items": { "type": "string" }
        }
      },
      "additionalProperties": false
    },
    "verbose": {
      "type": "boolean",
      "description": "Log module resolution misses."
    }
  },
  "additionalProperties": false
}"#;

#[cfg(test)]
mod tests {
    use super::*;
    use sinopia_croquis::{MemoryHost, PathResolver};

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path()).unwrap();
        assert_eq!(config, SinopiaConfig::default());
        assert!(!config.verbose);
    }

    #[test]
    fn test_full_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{
  "$schema": "./node_modules/.sinopia/schema.json",
  "resolve": { "alias": { "@/": "src/" }, "extensions": ["ts", "vue"] },
  "extract": { "componentDefiners": ["defineWidget"] },
  "coverage": { "mountFunctions": ["mountWithStore"] },
  "verbose": true
}"#,
        )
        .unwrap();

        let config = load_config(dir.path()).unwrap();
        assert!(config.verbose);
        assert_eq!(config.resolve.alias.get("@/").map(String::as_str), Some("src/"));
        assert!(config.extract_options().is_component_definer("defineWidget"));
        assert!(config.extract_options().is_component_definer("defineComponent"));
        assert!(config.match_options().is_mount_function("mountWithStore"));
        assert!(config.match_options().is_mount_function("mount"));

        let root = Path::new("/project");
        let host = MemoryHost::new().with_file("/project/src/shared.ts", "");
        let found = config.resolver(root).resolve("@/shared", Path::new("/project/src/a"), &host);
        assert_eq!(found, Some(PathBuf::from("/project/src/shared.ts")));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ \"verbose\": tru }").unwrap();
        assert!(matches!(load_config(dir.path()), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config: SinopiaConfig = serde_json::from_str(r#"{ "future": 1 }"#).unwrap();
        assert_eq!(config, SinopiaConfig::default());
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(SINOPIA_CONFIG_SCHEMA).unwrap();
        assert_eq!(schema["title"], "Sinopia Configuration");
    }
}
