//! Bundle analytics report.

use std::path::Path;

use serde::Serialize;
use tamis_crible::UsedClasses;
use tamis_feuille::ChunkCategory;

/// Critical utility count above which splitting is suggested.
pub const CRITICAL_SPLIT_THRESHOLD: usize = 50;

/// Used utility count below which the bundle is considered minimal.
pub const OPTIMAL_USAGE_THRESHOLD: usize = 100;

/// Summary written to `bundle-analytics.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    /// Number of distinct utilities found in the scanned sources.
    pub total_utilities: usize,
    /// Number of utilities in the resolved critical set.
    pub critical_utilities: usize,
    /// Chunks written during this run.
    pub chunks: Vec<ChunkCategory>,
    /// Utilities defined by the stylesheet but never used, sorted.
    pub unused_utilities: Vec<String>,
    pub size_savings: SizeSavings,
    pub recommendations: Vec<String>,
}

impl AnalyticsReport {
    /// Pretty-printed JSON with two-space indentation.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Formatted size comparison between the source and optimized stylesheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SizeSavings {
    pub original_size: String,
    pub optimized_size: String,
    pub savings: String,
}

impl SizeSavings {
    pub fn from_sizes(original: u64, optimized: u64) -> Self {
        Self {
            original_size: format_kb(original),
            optimized_size: format_kb(optimized),
            savings: savings_percent(original, optimized),
        }
    }

    /// Compare the on-disk sizes of two files. An absent file counts as 0 bytes.
    pub fn measure(original: &Path, optimized: &Path) -> Self {
        Self::from_sizes(file_size(original), file_size(optimized))
    }
}

fn file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Two decimals with ties rounded away from zero, as `toFixed(2)` prints them.
fn fixed2(value: f64) -> String {
    format!("{:.2}", (value * 100.0).round() / 100.0)
}

/// `1536` -> `"1.50KB"`
pub fn format_kb(bytes: u64) -> String {
    format!("{}KB", fixed2(bytes as f64 / 1024.0))
}

/// Relative reduction as a percentage with two decimals, `"0%"` for an empty original.
pub fn savings_percent(original: u64, optimized: u64) -> String {
    if original == 0 {
        return "0%".to_string();
    }
    let saved = (original as f64 - optimized as f64) / original as f64 * 100.0;
    format!("{}%", fixed2(saved))
}

/// Utilities the stylesheet defines that are absent from `used`, sorted.
pub fn unused_utilities<I>(available: I, used: &UsedClasses) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut unused: Vec<String> = available
        .into_iter()
        .filter(|class| !used.contains(class))
        .collect();
    unused.sort_unstable();
    unused.dedup();
    unused
}

pub fn recommendations(used: usize, critical: usize) -> Vec<String> {
    let mut out = Vec::new();
    if critical > CRITICAL_SPLIT_THRESHOLD {
        out.push("Consider splitting critical CSS into smaller chunks".to_string());
    }
    if used < OPTIMAL_USAGE_THRESHOLD {
        out.push("Bundle size is optimal for current usage".to_string());
    }
    out
}
