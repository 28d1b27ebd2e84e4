//! Storage object for simulation output.
//!
//! A [`SimulationStore`] collects the per-step dictionaries produced by a
//! simulation run (`about`, `static`, `primary`, `results`, `inputs`),
//! persists them as a versioned binary payload or a JSON document, and
//! derives a labeled variable x wavelength x step [`PrimaryPanel`] on demand.

use std::collections::BTreeMap;

use serde_json::Value;

pub mod config;
mod panel;
mod results;
pub mod serde_io;
mod step;
mod store;
mod summary;
mod value;

pub use config::{StoreConfig, DEFAULT_LAMBDAS_KEY, DEFAULT_SPECTRAL_CATEGORY};
pub use pame_core::errors::{ErrorInfo, StoreError};
pub use panel::{AxisRelabel, PrimaryPanel, RowAxis, VariableFrame};
pub use results::ResultsTree;
pub use step::{StepId, STEP_PREFIX};
pub use store::{SimulationStore, StoreSnapshot};
pub use summary::{smart_format, SummaryStyle};

/// Free-form run metadata.
pub type AboutTable = BTreeMap<String, Value>;
/// Category -> parameter -> value.
pub type StaticTable = BTreeMap<String, BTreeMap<String, Value>>;
/// Output variables of a single step.
pub type PrimaryRecord = BTreeMap<String, Value>;
/// Step label -> primary record.
pub type PrimaryTable = BTreeMap<String, PrimaryRecord>;
/// Swept parameter -> one value per step.
pub type InputsTable = BTreeMap<String, Vec<Value>>;
