//! Configuration file loading for tamis.
//!
//! Reads `tamis.config.json` from the current working directory.
//! Also provides JSON Schema generation for editor autocompletion.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::options::OptimizeOptions;

pub const CONFIG_FILE_NAME: &str = "tamis.config.json";

/// Top-level tamis configuration.
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct TamisConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Options for the `optimize` command.
    #[serde(default)]
    pub optimize: OptimizeOptions,
}

fn base_dir(dir: Option<&Path>) -> PathBuf {
    dir.map(Path::to_path_buf)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default())
}

/// Load `tamis.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the defaults. An unreadable or malformed file is
/// reported as a warning and also yields the defaults.
pub fn load_config(dir: Option<&Path>) -> TamisConfig {
    let config_path = base_dir(dir).join(CONFIG_FILE_NAME);

    if !config_path.exists() {
        return TamisConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => {
                tracing::debug!("loaded {}", config_path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}", config_path.display(), e);
                TamisConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("Failed to read {}: {}", config_path.display(), e);
            TamisConfig::default()
        }
    }
}

/// JSON Schema for `tamis.config.json`.
pub const TAMIS_CONFIG_SCHEMA: &str = r#"{
  "$schema": "http://json-schema.org/draft-07/schema#",
  "title": "Tamis Configuration",
  "description": "Configuration file for tamis - Build-time tree-shaker for utility-first CSS",
  "type": "object",
  "properties": {
    "$schema": {
      "type": "string",
      "description": "JSON Schema reference for editor autocompletion"
    },
    "optimize": {
      "type": "object",
      "description": "Options for the optimize command",
      "properties": {
        "sourceDir": {
          "type": "string",
          "description": "Directory scanned for used classes",
          "default": "./src"
        },
        "outputDir": {
          "type": "string",
          "description": "Directory receiving every output file",
          "default": "./dist"
        },
        "sourceCSS": {
          "type": "string",
          "description": "Framework stylesheet to optimize",
          "default": "./dist/index.css"
        },
        "generateChunks": {
          "type": "boolean",
          "description": "Write one stylesheet per utility category",
          "default": true
        },
        "extractCritical": {
          "type": "boolean",
          "description": "Write the critical subset",
          "default": true
        },
        "jsSourceDir": {
          "type": "string",
          "description": "Directory whose .js files are copied to {outputDir}/js",
          "default": "./src/js"
        },
        "fixtures": {
          "type": "array",
          "description": "Extra files scanned for usage when present",
          "items": { "type": "string" },
          "default": ["./test-utilities.html", "./demo.html", "./demo-advanced.html"]
        },
        "criticalFixture": {
          "type": "string",
          "description": "File scanned for critical classes when criticalSelectors is empty",
          "default": "./test-utilities.html"
        },
        "criticalSelectors": {
          "type": "array",
          "description": "Classes always treated as critical",
          "items": { "type": "string" },
          "examples": [["flex", "p-4", "text-lg"]]
        }
      },
      "additionalProperties": false
    }
  },
  "additionalProperties": false
}"#;

/// Write the JSON Schema to `node_modules/.tamis/tamis.config.schema.json`.
pub fn write_schema(dir: Option<&Path>) -> std::io::Result<PathBuf> {
    let schema_dir = base_dir(dir).join("node_modules/.tamis");
    std::fs::create_dir_all(&schema_dir)?;
    let schema_path = schema_dir.join("tamis.config.schema.json");
    std::fs::write(&schema_path, TAMIS_CONFIG_SCHEMA)?;
    Ok(schema_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = load_config(Some(dir.path()));
        assert!(config.schema.is_none());
        assert_eq!(config.optimize, OptimizeOptions::default());
    }

    #[test]
    fn test_load_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{
  "$schema": "./node_modules/.tamis/tamis.config.schema.json",
  "optimize": {
    "sourceCSS": "./build/framework.css",
    "extractCritical": false,
    "criticalSelectors": ["flex", "p-4"]
  }
}"#,
        )
        .unwrap();

        let config = load_config(Some(dir.path()));
        assert!(config.schema.is_some());
        assert_eq!(
            config.optimize.source_css,
            PathBuf::from("./build/framework.css")
        );
        assert!(!config.optimize.extract_critical);
        assert!(config.optimize.generate_chunks);
        assert_eq!(config.optimize.critical_selectors, ["flex", "p-4"]);
    }

    #[test]
    fn test_malformed_config_falls_back() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "{ optimize: ").unwrap();
        let config = load_config(Some(dir.path()));
        assert_eq!(config.optimize, OptimizeOptions::default());
    }

    #[test]
    fn test_schema_is_valid_json() {
        let schema: serde_json::Value = serde_json::from_str(TAMIS_CONFIG_SCHEMA).unwrap();
        let properties = &schema["properties"]["optimize"]["properties"];
        for key in [
            "sourceDir",
            "outputDir",
            "sourceCSS",
            "generateChunks",
            "extractCritical",
            "jsSourceDir",
            "fixtures",
            "criticalFixture",
            "criticalSelectors",
        ] {
            assert!(properties.get(key).is_some(), "missing {key}");
        }
    }

    #[test]
    fn test_write_schema() {
        let dir = TempDir::new().unwrap();
        let path = write_schema(Some(dir.path())).unwrap();
        assert!(path.ends_with("node_modules/.tamis/tamis.config.schema.json"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), TAMIS_CONFIG_SCHEMA);
    }
}
