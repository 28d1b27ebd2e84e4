use std::error::Error;
use std::path::PathBuf;

use clap::Args;

use super::open_store;

#[derive(Args, Debug)]
pub struct PromoteArgs {
    /// Saved store (binary) or JSON document.
    pub input: PathBuf,
    /// Dotted attribute path below each step's results, e.g. `optics.psi`.
    pub attr: String,
    /// Name the promoted value takes in primary (defaults to the path).
    #[arg(long)]
    pub alias: Option<String>,
    /// Where to save the updated store (binary).
    #[arg(long)]
    pub out: PathBuf,
}

pub fn run(args: &PromoteArgs) -> Result<(), Box<dyn Error>> {
    let mut store = open_store(&args.input, None)?;
    store.promote(&args.attr, args.alias.as_deref())?;
    store.save(&args.out)?;
    tracing::info!(out = %args.out.display(), attr = %args.attr, "promoted attribute");
    Ok(())
}
