use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pame_store::SummaryStyle;

use super::open_store;

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Saved store (binary) or JSON document.
    pub input: PathBuf,
    /// Level of detail: "short" or "full".
    #[arg(long, default_value = "short")]
    pub style: String,
    /// YAML file overriding where the wavelength axis is looked up.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

pub fn run(args: &SummaryArgs) -> Result<(), Box<dyn Error>> {
    let style: SummaryStyle = args.style.parse()?;
    let store = open_store(&args.input, args.config.as_deref())?;
    println!("{}", store.summary(style)?);
    Ok(())
}
