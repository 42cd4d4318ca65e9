//! Usage scanning.
//!
//! Walks a source tree and collects every utility class referenced from
//! markup or scripts. Two syntactic forms are recognized:
//!
//! - quoted `class="..."` / `className='...'` attribute values, split on
//!   whitespace
//! - `class:name` directive bindings (Svelte style), one token each
//!
//! Every candidate goes through [`is_utility_class`]; anything else is
//! ignored.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;
use walkdir::{DirEntry, WalkDir};

use crate::classify::is_utility_class;
use crate::error::{ScanError, ScanResult};

/// Set of distinct utility class names found during a scan.
pub type UsedClasses = FxHashSet<String>;

/// File name suffixes that are read during a directory scan.
pub const SOURCE_EXTENSIONS: &[&str] = &[".html", ".js", ".jsx", ".ts", ".tsx", ".vue", ".svelte"];

/// Dependency cache directory skipped during a directory scan.
pub const DEPENDENCY_DIR: &str = "node_modules";

static CLASS_ATTR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?:class|className)=["']([^"']+)["']"#).expect("Invalid regex"));

static CLASS_BINDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"class:([a-zA-Z0-9_-]+)").expect("Invalid regex"));

/// Accumulates used utility classes across any number of files.
#[derive(Debug, Default)]
pub struct UsageScanner {
    used: UsedClasses,
    files_scanned: usize,
}

impl UsageScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan every source file under `root`.
    ///
    /// Hidden directories and `node_modules` are skipped. The first entry
    /// that cannot be visited or read aborts the scan.
    pub fn scan_dir(&mut self, root: impl AsRef<Path>) -> ScanResult<&UsedClasses> {
        let root = root.as_ref();
        let files = source_files(root)?;
        tracing::debug!("found {} source files under {}", files.len(), root.display());

        for path in &files {
            self.scan_file(path)?;
        }

        Ok(&self.used)
    }

    /// Scan a single file, failing if it cannot be read.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD.
    pub fn scan_file(&mut self, path: &Path) -> ScanResult<()> {
        let bytes = std::fs::read(path).map_err(|source| ScanError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let added = self.extract(&String::from_utf8_lossy(&bytes));
        self.files_scanned += 1;
        tracing::debug!("scanned {} (+{} utilities)", path.display(), added);
        Ok(())
    }

    /// Scan a file if it exists.
    ///
    /// Returns `false` without touching the set when the file is absent.
    pub fn scan_optional_file(&mut self, path: impl AsRef<Path>) -> ScanResult<bool> {
        let path = path.as_ref();
        if !path.is_file() {
            tracing::debug!("skipping absent file {}", path.display());
            return Ok(false);
        }
        self.scan_file(path)?;
        Ok(true)
    }

    /// Extract utilities from `content` into the running set.
    ///
    /// Returns how many previously unseen classes were added.
    pub fn extract(&mut self, content: &str) -> usize {
        let before = self.used.len();
        for_each_utility(content, |class| {
            if !self.used.contains(class) {
                self.used.insert(class.to_string());
            }
        });
        self.used.len() - before
    }

    pub fn used(&self) -> &UsedClasses {
        &self.used
    }

    pub fn into_used(self) -> UsedClasses {
        self.used
    }

    #[inline]
    pub fn contains(&self, class: &str) -> bool {
        self.used.contains(class)
    }

    pub fn len(&self) -> usize {
        self.used.len()
    }

    pub fn is_empty(&self) -> bool {
        self.used.is_empty()
    }

    /// Number of files read so far.
    pub fn files_scanned(&self) -> usize {
        self.files_scanned
    }
}

/// Utilities referenced by `content`, deduplicated, in first-seen order.
pub fn extract_utilities(content: &str) -> Vec<String> {
    let mut seen = FxHashSet::default();
    let mut out = Vec::new();
    for_each_utility(content, |class| {
        if seen.insert(class) {
            out.push(class.to_string());
        }
    });
    out
}

fn for_each_utility<'a>(content: &'a str, mut f: impl FnMut(&'a str)) {
    for caps in CLASS_ATTR_RE.captures_iter(content) {
        let Some(value) = caps.get(1) else {
            continue;
        };
        for class in value.as_str().split_whitespace() {
            if is_utility_class(class) {
                f(class);
            }
        }
    }

    for caps in CLASS_BINDING_RE.captures_iter(content) {
        if let Some(class) = caps.get(1) {
            if is_utility_class(class.as_str()) {
                f(class.as_str());
            }
        }
    }
}

/// Whether a file name carries one of [`SOURCE_EXTENSIONS`].
pub fn is_source_file(name: &str) -> bool {
    SOURCE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || name == DEPENDENCY_DIR
}

/// Every source file under `root`, in a stable order.
pub fn source_files(root: &Path) -> ScanResult<Vec<PathBuf>> {
    let mut files = Vec::new();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        // Don't filter the root directory itself
        .filter_entry(|e| e.depth() == 0 || !is_skipped_dir(e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if is_source_file(&entry.file_name().to_string_lossy()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
