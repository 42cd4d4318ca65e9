//! Schema command - JSON Schema for tamis.config.json

use clap::Args;
use std::path::PathBuf;

use tamis::config::{write_schema, TAMIS_CONFIG_SCHEMA};

#[derive(Args, Default)]
pub struct SchemaArgs {
    /// Write to node_modules/.tamis/tamis.config.schema.json instead of stdout
    #[arg(long)]
    pub write: bool,

    /// Project directory (default: current directory)
    #[arg(long)]
    pub dir: Option<PathBuf>,
}

pub fn run(args: SchemaArgs) {
    if !args.write {
        println!("{TAMIS_CONFIG_SCHEMA}");
        return;
    }

    match write_schema(args.dir.as_deref()) {
        Ok(path) => println!("Schema written to {}", path.display()),
        Err(e) => {
            eprintln!("error: failed to write schema: {e}");
            std::process::exit(1);
        }
    }
}
