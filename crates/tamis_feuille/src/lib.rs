//! # tamis_feuille
//!
//! Feuille - The stylesheet splitter and filters for Tamis.
//!
//! ## Name Origin
//!
//! **Feuille** (/fœj/) is the sheet in *feuille de style*. `tamis_feuille`
//! cuts a stylesheet into its top-level rules once, then lets the optimizer
//! run several cheap passes over the same rule list: the used-class filter,
//! the critical extractor and the category chunker.
//!
//! ## Parsing model
//!
//! The splitter is a brace-depth tokenizer, not a full CSS parser:
//!
//! - comments, strings and backslash escapes never count as braces
//! - `@media`, `@supports`, `@container`, `@layer` and `@document` blocks are
//!   parsed one level deep so their inner rules can be filtered
//! - every other block at-rule (`@keyframes`, `@font-face`, ...) is one
//!   opaque unit
//! - nested braces inside a plain rule body stay inside that rule
//!
//! ## Example
//!
//! ```
//! use rustc_hash::FxHashSet;
//! use tamis_feuille::{optimize_css, Stylesheet};
//!
//! let sheet = Stylesheet::parse(":root{--x:1}\n.flex{display:flex}\n.grid{display:grid}");
//! let used: FxHashSet<String> = ["flex".to_string()].into_iter().collect();
//!
//! assert_eq!(optimize_css(&sheet, &used), ":root{--x:1}\n.flex{display:flex}");
//! ```

pub mod chunk;
pub mod filter;
pub mod selector;
pub mod sheet;

pub use chunk::{create_chunks, extract_chunk, Chunk, ChunkCategory};
pub use filter::{
    apply_filter, extract_critical, optimize_css, ChunkFilter, CriticalFilter, RuleFilter,
    UsedFilter,
};
pub use selector::{class_names, has_base_marker};
pub use sheet::{AtBlock, CssRule, Diagnostic, DiagnosticKind, GroupRule, StyleRule, Stylesheet};
