use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pame_store::AxisRelabel;
use serde_json::Value;

use super::open_store;

#[derive(Args, Debug)]
pub struct PanelArgs {
    /// Saved store (binary) or JSON document.
    pub input: PathBuf,
    /// Input name (or integer) used to relabel the step axis. Parsed as JSON
    /// first, so names such as `true`, `null` or `1e3` need `--relabel-key`.
    #[arg(long, conflicts_with = "relabel_key")]
    pub relabel: Option<String>,
    /// Input name used verbatim to relabel the step axis.
    #[arg(long)]
    pub relabel_key: Option<String>,
    /// Text prepended to relabeled steps; enables 4-decimal formatting.
    #[arg(long)]
    pub prefix: Option<String>,
    /// Print this variable's wavelength x step table instead of the header.
    #[arg(long)]
    pub variable: Option<String>,
    /// YAML file overriding where the wavelength axis is looked up.
    #[arg(long)]
    pub config: Option<PathBuf>,
}

/// Interprets the raw argument as JSON when it parses (so `3` is an integer
/// and `3.5` a float), and as a plain input name otherwise.
pub fn parse_relabel(raw: &str) -> Result<AxisRelabel, Box<dyn Error>> {
    let value = serde_json::from_str::<Value>(raw).unwrap_or_else(|_| Value::String(raw.into()));
    Ok(AxisRelabel::try_from(&value)?)
}

pub fn run(args: &PanelArgs) -> Result<(), Box<dyn Error>> {
    let store = open_store(&args.input, args.config.as_deref())?;
    let relabel = match (&args.relabel_key, &args.relabel) {
        (Some(key), _) => Some(AxisRelabel::from(key.as_str())),
        (None, Some(raw)) => Some(parse_relabel(raw)?),
        (None, None) => None,
    };
    let panel = store.primary_panel(relabel.as_ref(), args.prefix.as_deref())?;
    match &args.variable {
        Some(variable) => {
            let frame = panel
                .variable_frame(variable)
                .ok_or_else(|| format!("variable {variable} is not in the primary panel"))?;
            println!("{frame}");
        }
        None => println!("{panel}"),
    }
    Ok(())
}
