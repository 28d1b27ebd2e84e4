use std::error::Error;
use std::path::Path;

use pame_store::{SimulationStore, StoreConfig};

pub mod convert;
pub mod panel;
pub mod promote;
pub mod summary;

/// Opens a store, choosing the JSON loader for `.json` files and the binary
/// loader for everything else.
pub fn open_store(path: &Path, config: Option<&Path>) -> Result<SimulationStore, Box<dyn Error>> {
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    let store = if is_json {
        SimulationStore::from_json(path)?
    } else {
        SimulationStore::from_serialized(path)?
    };
    let store = match config {
        Some(config) => store.with_config(StoreConfig::load(config)?),
        None => store,
    };
    Ok(store)
}
