//! Optimize command - Tree-shake and chunk the framework stylesheet

use clap::Args;
use std::path::PathBuf;
use std::time::Instant;

use tamis::config::load_config;
use tamis::{OptimizeOptions, Optimizer};

#[derive(Args, Default)]
pub struct OptimizeArgs {
    /// Directory scanned for used classes (default: ./src)
    #[arg(long)]
    pub source_dir: Option<PathBuf>,

    /// Output directory (default: ./dist)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Framework stylesheet to optimize (default: ./dist/index.css)
    #[arg(short, long)]
    pub source_css: Option<PathBuf>,

    /// Skip writing category chunks
    #[arg(long)]
    pub no_chunks: bool,

    /// Skip writing critical.css
    #[arg(long)]
    pub no_critical: bool,

    /// Directory containing tamis.config.json (default: current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Log every file read and written
    #[arg(short, long)]
    pub verbose: bool,
}

impl OptimizeArgs {
    /// Layer the flags over the options loaded from the config file.
    fn apply(self, mut options: OptimizeOptions) -> OptimizeOptions {
        if let Some(source_dir) = self.source_dir {
            options.source_dir = source_dir;
        }
        if let Some(output_dir) = self.output_dir {
            options.output_dir = output_dir;
        }
        if let Some(source_css) = self.source_css {
            options.source_css = source_css;
        }
        if self.no_chunks {
            options.generate_chunks = false;
        }
        if self.no_critical {
            options.extract_critical = false;
        }
        options
    }
}

pub fn run(args: OptimizeArgs) {
    super::init_logging(args.verbose);
    let start = Instant::now();

    let config_dir = args.config.clone();
    let mut options = load_config(config_dir.as_deref()).optimize;
    if let Some(dir) = &config_dir {
        options = options.rooted_at(dir);
    }
    let options = args.apply(options);
    let analytics_path = options.analytics_path();

    println!("Starting build optimization...");

    let mut optimizer = Optimizer::new(options);
    let report = match optimizer.optimize() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    println!("Found {} used utilities", report.total_utilities);
    if !optimizer.copied_modules().is_empty() {
        println!("Copied {} JavaScript modules", optimizer.copied_modules().len());
    }
    if optimizer.options().extract_critical {
        println!("Extracted {} critical utilities", report.critical_utilities);
    }
    if !report.chunks.is_empty() {
        println!("Generated {} chunks", report.chunks.len());
    }
    println!(
        "Size: {} -> {} ({} saved)",
        report.size_savings.original_size,
        report.size_savings.optimized_size,
        report.size_savings.savings
    );
    println!("Analytics saved to {}", analytics_path.display());
    println!(
        "\x1b[32m✓\x1b[0m Optimization complete in {:.4}s",
        start.elapsed().as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_config() {
        let args = OptimizeArgs {
            output_dir: Some(PathBuf::from("build")),
            no_chunks: true,
            ..Default::default()
        };
        let options = args.apply(OptimizeOptions {
            source_css: PathBuf::from("framework.css"),
            ..Default::default()
        });
        assert_eq!(options.output_dir, PathBuf::from("build"));
        assert_eq!(options.source_css, PathBuf::from("framework.css"));
        assert!(!options.generate_chunks);
        assert!(options.extract_critical);
    }
}
