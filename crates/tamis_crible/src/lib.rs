//! # tamis_crible
//!
//! Crible - The utility class screen for Tamis.
//!
//! ## Name Origin
//!
//! A **crible** (/kʁibl/) is the coarse riddle a gardener shakes soil through
//! before the finer sieve. `tamis_crible` is that first pass: it shakes the
//! project's markup and scripts and keeps only the tokens that look like
//! utility classes.
//!
//! ## Modules
//!
//! - [`classify`] - The ordered utility pattern list and the classifier
//! - [`scanner`] - Source tree walking and class token extraction
//!
//! ## Example
//!
//! ```
//! use tamis_crible::{is_utility_class, UsageScanner};
//!
//! assert!(is_utility_class("p-4"));
//! assert!(!is_utility_class("card"));
//!
//! let mut scanner = UsageScanner::new();
//! scanner.extract(r#"<div class="flex p-4 card"></div>"#);
//! assert!(scanner.contains("flex"));
//! assert!(!scanner.contains("card"));
//! ```

pub mod classify;
mod error;
pub mod scanner;

pub use classify::{classify, is_utility_class, utility_patterns, UtilityCategory, UtilityPattern};
pub use error::{ScanError, ScanResult};
pub use scanner::{extract_utilities, source_files, UsageScanner, UsedClasses};
