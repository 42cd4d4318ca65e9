//! Optimization options.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub const OPTIMIZED_CSS_FILE: &str = "index.optimized.css";
pub const CRITICAL_CSS_FILE: &str = "critical.css";
pub const CHUNKS_DIR: &str = "chunks";
pub const ANALYTICS_FILE: &str = "bundle-analytics.json";
pub const JS_DIR: &str = "js";

/// Options for one optimization run.
///
/// Every field has a default, so a config file may set any subset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimizeOptions {
    /// Directory scanned for used classes (default: ./src)
    pub source_dir: PathBuf,

    /// Directory receiving every output file (default: ./dist)
    pub output_dir: PathBuf,

    /// Framework stylesheet to optimize (default: ./dist/index.css)
    #[serde(rename = "sourceCSS", alias = "sourceCss")]
    pub source_css: PathBuf,

    /// Write one stylesheet per utility category (default: true)
    pub generate_chunks: bool,

    /// Write the critical subset (default: true)
    pub extract_critical: bool,

    /// Directory whose `.js` files are copied to `{outputDir}/js` (default: ./src/js)
    pub js_source_dir: PathBuf,

    /// Extra files scanned for usage when present
    pub fixtures: Vec<PathBuf>,

    /// File scanned for critical classes when `criticalSelectors` is empty
    pub critical_fixture: PathBuf,

    /// Classes always treated as critical
    pub critical_selectors: Vec<String>,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("./src"),
            output_dir: PathBuf::from("./dist"),
            source_css: PathBuf::from("./dist/index.css"),
            generate_chunks: true,
            extract_critical: true,
            js_source_dir: PathBuf::from("./src/js"),
            fixtures: vec![
                PathBuf::from("./test-utilities.html"),
                PathBuf::from("./demo.html"),
                PathBuf::from("./demo-advanced.html"),
            ],
            critical_fixture: PathBuf::from("./test-utilities.html"),
            critical_selectors: Vec::new(),
        }
    }
}

impl OptimizeOptions {
    /// Root every relative path at `base`.
    pub fn rooted_at(mut self, base: &Path) -> Self {
        let root = |path: &mut PathBuf| {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        };
        root(&mut self.source_dir);
        root(&mut self.output_dir);
        root(&mut self.source_css);
        root(&mut self.js_source_dir);
        root(&mut self.critical_fixture);
        self.fixtures.iter_mut().for_each(root);
        self
    }

    pub fn optimized_css_path(&self) -> PathBuf {
        self.output_dir.join(OPTIMIZED_CSS_FILE)
    }

    pub fn critical_css_path(&self) -> PathBuf {
        self.output_dir.join(CRITICAL_CSS_FILE)
    }

    pub fn chunks_dir(&self) -> PathBuf {
        self.output_dir.join(CHUNKS_DIR)
    }

    pub fn analytics_path(&self) -> PathBuf {
        self.output_dir.join(ANALYTICS_FILE)
    }

    pub fn js_output_dir(&self) -> PathBuf {
        self.output_dir.join(JS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = OptimizeOptions::default();
        assert_eq!(options.source_dir, PathBuf::from("./src"));
        assert_eq!(options.source_css, PathBuf::from("./dist/index.css"));
        assert!(options.generate_chunks);
        assert!(options.extract_critical);
        assert_eq!(options.fixtures.len(), 3);
        assert_eq!(
            options.optimized_css_path(),
            PathBuf::from("./dist/index.optimized.css")
        );
        assert_eq!(
            options.analytics_path(),
            PathBuf::from("./dist/bundle-analytics.json")
        );
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let options: OptimizeOptions =
            serde_json::from_str(r#"{ "outputDir": "build", "generateChunks": false }"#).unwrap();
        assert_eq!(options.output_dir, PathBuf::from("build"));
        assert!(!options.generate_chunks);
        assert!(options.extract_critical);
        assert_eq!(options.source_dir, PathBuf::from("./src"));
    }

    #[test]
    fn test_source_css_key_spellings() {
        let upper: OptimizeOptions =
            serde_json::from_str(r#"{ "sourceCSS": "a.css" }"#).unwrap();
        let camel: OptimizeOptions =
            serde_json::from_str(r#"{ "sourceCss": "a.css" }"#).unwrap();
        assert_eq!(upper.source_css, PathBuf::from("a.css"));
        assert_eq!(upper, camel);
    }

    #[test]
    fn test_rooted_at() {
        let options = OptimizeOptions {
            output_dir: PathBuf::from("/abs/out"),
            ..Default::default()
        }
        .rooted_at(Path::new("/project"));
        assert_eq!(options.source_dir, PathBuf::from("/project/./src"));
        assert_eq!(options.output_dir, PathBuf::from("/abs/out"));
        assert_eq!(
            options.fixtures[1],
            PathBuf::from("/project/./demo.html")
        );
    }
}
