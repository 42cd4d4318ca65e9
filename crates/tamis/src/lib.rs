//! # Tamis
//!
//! Build-time tree-shaker and chunker for utility-first CSS.
//!
//! ## Name Origin
//!
//! A **tamis** (/ta.mi/) is a drum sieve: fine mesh stretched over a hoop,
//! used to pass flour and leave the lumps behind. Tamis passes a framework
//! stylesheet through the classes a project actually uses and keeps only
//! what falls through.
//!
//! ## Pipeline
//!
//! 1. Copy the framework's JavaScript modules to the output directory
//! 2. Scan the source tree for used utility classes ([`crible`])
//! 3. Split the source stylesheet once ([`feuille`])
//! 4. Write the optimized stylesheet, the critical subset and category chunks
//! 5. Write `bundle-analytics.json`
//!
//! ## Crates
//!
//! - [`crible`] - Utility classifier and usage scanner
//! - [`feuille`] - Stylesheet splitter, filters and chunks
//!
//! ## Example
//!
//! ```no_run
//! use tamis::{OptimizeOptions, Optimizer};
//!
//! let mut optimizer = Optimizer::new(OptimizeOptions::default());
//! let report = optimizer.optimize()?;
//! println!("{} utilities in use", report.total_utilities);
//! # Ok::<(), tamis::OptimizeError>(())
//! ```

pub mod analytics;
pub mod config;
mod error;
pub mod optimizer;
pub mod options;

/// Utility classifier and usage scanner.
pub use tamis_crible as crible;

/// Stylesheet splitter, filters and chunks.
pub use tamis_feuille as feuille;

pub use analytics::{AnalyticsReport, SizeSavings};
pub use error::{OptimizeError, OptimizeResult};
pub use optimizer::Optimizer;
pub use options::OptimizeOptions;
