use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::{Args, ValueEnum};

use super::open_store;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Binary,
    Json,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Saved store (binary) or JSON document.
    pub input: PathBuf,
    /// Destination file.
    #[arg(long)]
    pub out: PathBuf,
    /// Output encoding.
    #[arg(long, value_enum, default_value_t = OutputFormat::Binary)]
    pub to: OutputFormat,
}

pub fn run(args: &ConvertArgs) -> Result<(), Box<dyn Error>> {
    let store = open_store(&args.input, None)?;
    match args.to {
        OutputFormat::Binary => store.save(&args.out)?,
        OutputFormat::Json => {
            if let Some(parent) = args.out.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&args.out, store.to_json_string()?)?;
        }
    }
    Ok(())
}
