//! Build optimization pipeline.
//!
//! [`Optimizer::optimize`] runs every step in order on one thread: copy the
//! JavaScript modules, scan for used classes, split the source stylesheet
//! once, then write the optimized stylesheet, the critical subset, the
//! category chunks and the analytics report. Any I/O failure aborts the run.

use std::fs;
use std::path::{Path, PathBuf};

use tamis_crible::{UsageScanner, UsedClasses};
use tamis_feuille::{create_chunks, extract_critical, optimize_css, Chunk, Stylesheet};

use crate::analytics::{recommendations, unused_utilities, AnalyticsReport, SizeSavings};
use crate::error::{OptimizeError, OptimizeResult};
use crate::options::OptimizeOptions;

/// One optimization run over a project.
#[derive(Debug)]
pub struct Optimizer {
    options: OptimizeOptions,
    scanner: UsageScanner,
    critical: UsedClasses,
    chunks: Vec<Chunk>,
    copied_modules: Vec<PathBuf>,
}

impl Optimizer {
    pub fn new(options: OptimizeOptions) -> Self {
        Self {
            options,
            scanner: UsageScanner::new(),
            critical: UsedClasses::default(),
            chunks: Vec::new(),
            copied_modules: Vec::new(),
        }
    }

    pub fn options(&self) -> &OptimizeOptions {
        &self.options
    }

    /// Classes found by [`Self::analyze_usage`].
    pub fn used(&self) -> &UsedClasses {
        self.scanner.used()
    }

    /// Classes resolved by [`Self::resolve_critical_set`].
    pub fn critical(&self) -> &UsedClasses {
        &self.critical
    }

    /// Chunks written by the last run.
    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    /// Destination paths of the copied JavaScript modules.
    pub fn copied_modules(&self) -> &[PathBuf] {
        &self.copied_modules
    }

    /// Run the whole pipeline and return the report that was written.
    pub fn optimize(&mut self) -> OptimizeResult<AnalyticsReport> {
        tracing::info!("starting build optimization");

        self.copy_js_modules()?;
        self.analyze_usage()?;

        let source_css = self.options.source_css.clone();
        let css = read_to_string(&source_css)?;
        let sheet = Stylesheet::parse(&css);
        for diagnostic in &sheet.diagnostics {
            tracing::warn!("{}: {}", source_css.display(), diagnostic);
        }
        tracing::debug!(
            "split {} into {} rules",
            source_css.display(),
            sheet.rules.len()
        );

        create_dir(&self.options.output_dir)?;

        let optimized_path = self.options.optimized_css_path();
        write_file(&optimized_path, &optimize_css(&sheet, self.scanner.used()))?;

        if self.options.extract_critical {
            self.resolve_critical_set()?;
            let critical_path = self.options.critical_css_path();
            write_file(&critical_path, &extract_critical(&sheet, &self.critical))?;
        }

        if self.options.generate_chunks {
            self.chunks = create_chunks(&sheet);
            let chunks_dir = self.options.chunks_dir();
            create_dir(&chunks_dir)?;
            for chunk in &self.chunks {
                write_file(&chunks_dir.join(chunk.file_name()), &chunk.css)?;
            }
            tracing::info!("generated {} chunks", self.chunks.len());
        }

        let report = self.build_report(&sheet, &optimized_path);
        write_file(&self.options.analytics_path(), &report.to_json()?)?;

        tracing::info!(
            "optimization complete: {} used utilities, {} unused",
            report.total_utilities,
            report.unused_utilities.len()
        );
        Ok(report)
    }

    /// Copy every `.js` file of the module directory into `{outputDir}/js`.
    ///
    /// The destination is always created. A missing module directory is not
    /// an error. Returns the number of files copied.
    pub fn copy_js_modules(&mut self) -> OptimizeResult<usize> {
        let dest_dir = self.options.js_output_dir();
        create_dir(&dest_dir)?;

        let source_dir = &self.options.js_source_dir;
        if !source_dir.is_dir() {
            tracing::debug!("no module directory at {}", source_dir.display());
            return Ok(0);
        }

        let entries = fs::read_dir(source_dir).map_err(|source| OptimizeError::Read {
            path: source_dir.clone(),
            source,
        })?;
        let mut modules = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| OptimizeError::Read {
                path: source_dir.clone(),
                source,
            })?;
            let path = entry.path();
            if path.is_file() && path.extension().is_some_and(|ext| ext == "js") {
                modules.push(path);
            }
        }
        modules.sort();

        for from in modules {
            let Some(name) = from.file_name() else {
                continue;
            };
            let to = dest_dir.join(name);
            fs::copy(&from, &to).map_err(|source| OptimizeError::Copy {
                from: from.clone(),
                to: to.clone(),
                source,
            })?;
            tracing::info!("copied {} to {}", from.display(), to.display());
            self.copied_modules.push(to);
        }

        Ok(self.copied_modules.len())
    }

    /// Scan the source tree, then every fixture file that exists.
    pub fn analyze_usage(&mut self) -> OptimizeResult<usize> {
        self.scanner.scan_dir(&self.options.source_dir)?;
        for fixture in &self.options.fixtures {
            if self.scanner.scan_optional_file(fixture)? {
                tracing::debug!("scanned fixture {}", fixture.display());
            }
        }
        tracing::info!(
            "found {} used utilities in {} files",
            self.scanner.len(),
            self.scanner.files_scanned()
        );
        Ok(self.scanner.len())
    }

    /// Explicit critical classes, or the used set once the critical
    /// fixture has been scanned. Empty when neither is available.
    pub fn resolve_critical_set(&mut self) -> OptimizeResult<&UsedClasses> {
        self.critical = if !self.options.critical_selectors.is_empty() {
            self.options.critical_selectors.iter().cloned().collect()
        } else if self
            .scanner
            .scan_optional_file(&self.options.critical_fixture)?
        {
            self.scanner.used().clone()
        } else {
            tracing::debug!(
                "no critical fixture at {}",
                self.options.critical_fixture.display()
            );
            UsedClasses::default()
        };
        tracing::info!("extracted {} critical utilities", self.critical.len());
        Ok(&self.critical)
    }

    fn build_report(&self, sheet: &Stylesheet<'_>, optimized_path: &Path) -> AnalyticsReport {
        let used = self.scanner.used();
        AnalyticsReport {
            total_utilities: used.len(),
            critical_utilities: self.critical.len(),
            chunks: self.chunks.iter().map(|chunk| chunk.category).collect(),
            unused_utilities: unused_utilities(sheet.utility_classes(), used),
            size_savings: SizeSavings::measure(&self.options.source_css, optimized_path),
            recommendations: recommendations(used.len(), self.critical.len()),
        }
    }
}

/// Read a text file, replacing invalid UTF-8 with U+FFFD.
fn read_to_string(path: &Path) -> OptimizeResult<String> {
    let bytes = fs::read(path).map_err(|source| OptimizeError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8(bytes)
        .unwrap_or_else(|err| String::from_utf8_lossy(err.as_bytes()).into_owned()))
}

fn write_file(path: &Path, contents: &str) -> OptimizeResult<()> {
    fs::write(path, contents).map_err(|source| OptimizeError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!("wrote {} ({} bytes)", path.display(), contents.len());
    Ok(())
}

fn create_dir(path: &Path) -> OptimizeResult<()> {
    fs::create_dir_all(path).map_err(|source| OptimizeError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}
