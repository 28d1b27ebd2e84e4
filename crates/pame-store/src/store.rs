use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;

use pame_core::errors::{ErrorInfo, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::panel::{AxisRelabel, PrimaryPanel};
use crate::results::ResultsTree;
use crate::serde_io::{from_json_slice, to_canonical_json_bytes, StoreEnvelope};
use crate::summary::{self, SummarySections, SummaryStyle};
use crate::{AboutTable, InputsTable, PrimaryTable, StaticTable};

/// The five persisted fields, shared by the JSON document and the binary payload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub about: AboutTable,
    #[serde(rename = "static")]
    pub static_params: StaticTable,
    pub primary: PrimaryTable,
    pub results: ResultsTree,
    pub inputs: InputsTable,
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    about: &'a AboutTable,
    #[serde(rename = "static")]
    static_params: &'a StaticTable,
    primary: &'a PrimaryTable,
    results: &'a ResultsTree,
    inputs: &'a InputsTable,
}

/// Storage object for the per-step output of one simulation run.
///
/// The fields are plain data owned by the caller; derived views such as
/// [`SimulationStore::primary_panel`] are rebuilt on every call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationStore {
    /// Free-form metadata, at most one nested level.
    pub about: AboutTable,
    /// Simulation-wide parameters grouped by category.
    pub static_params: StaticTable,
    /// Per-step output variables keyed by `step_<N>`.
    pub primary: PrimaryTable,
    /// Per-step nested results, the source for [`SimulationStore::promote`].
    pub results: ResultsTree,
    /// Swept parameter values, index-aligned with the step order.
    pub inputs: InputsTable,
    config: StoreConfig,
}

impl SimulationStore {
    /// Creates an empty store with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assembles a store from already-built tables.
    pub fn from_parts(
        about: AboutTable,
        static_params: StaticTable,
        primary: PrimaryTable,
        results: ResultsTree,
        inputs: InputsTable,
    ) -> Self {
        Self {
            about,
            static_params,
            primary,
            results,
            inputs,
            config: StoreConfig::default(),
        }
    }

    /// Replaces the lookup configuration.
    pub fn with_config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Builds a store from a JSON document with `about`, `static`,
    /// `primary`, `results` and `inputs` keys.
    pub fn from_json(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let bytes =
            fs::read(path).map_err(|err| StoreError::io("json-read", path.display(), err))?;
        Self::from_json_slice(&bytes)
    }

    pub fn from_json_str(json: &str) -> Result<Self, StoreError> {
        Self::from_json_slice(json.as_bytes())
    }

    pub fn from_json_reader<R: Read>(mut reader: R) -> Result<Self, StoreError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|err| StoreError::io("json-read", "<stream>", err))?;
        Self::from_json_slice(&bytes)
    }

    fn from_json_slice(bytes: &[u8]) -> Result<Self, StoreError> {
        let snapshot: StoreSnapshot = from_json_slice(bytes)?;
        let mut store = Self::new();
        store.apply(snapshot);
        Ok(store)
    }

    /// Builds an empty store and loads a previously saved one into it.
    pub fn from_serialized(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.load(path)?;
        Ok(store)
    }

    pub fn from_serialized_reader<R: Read>(reader: R) -> Result<Self, StoreError> {
        let mut store = Self::new();
        store.load_from_reader(reader)?;
        Ok(store)
    }

    fn snapshot_ref(&self) -> SnapshotRef<'_> {
        SnapshotRef {
            about: &self.about,
            static_params: &self.static_params,
            primary: &self.primary,
            results: &self.results,
            inputs: &self.inputs,
        }
    }

    /// Copies the five persisted fields into an owned snapshot.
    pub fn snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            about: self.about.clone(),
            static_params: self.static_params.clone(),
            primary: self.primary.clone(),
            results: self.results.clone(),
            inputs: self.inputs.clone(),
        }
    }

    fn apply(&mut self, snapshot: StoreSnapshot) {
        self.about = snapshot.about;
        self.static_params = snapshot.static_params;
        self.primary = snapshot.primary;
        self.results = snapshot.results;
        self.inputs = snapshot.inputs;
    }

    /// Renders the store as the JSON document accepted by [`SimulationStore::from_json`].
    pub fn to_json_string(&self) -> Result<String, StoreError> {
        let bytes = to_canonical_json_bytes(&self.snapshot_ref())?;
        String::from_utf8(bytes)
            .map_err(|err| StoreError::Format(ErrorInfo::new("json-utf8", err.to_string())))
    }

    /// Encodes the persisted fields as a versioned binary payload.
    pub fn to_bytes(&self) -> Result<Vec<u8>, StoreError> {
        StoreEnvelope::wrap(&self.snapshot_ref())?.to_bytes()
    }

    /// Writes the store to `path`.
    ///
    /// The payload is fully encoded, written to a temporary file next to
    /// `path` and then renamed over it. A failed save leaves any previous
    /// file at `path` intact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;
        let parent = path
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)
            .map_err(|err| StoreError::io("save-mkdir", parent.display(), err))?;
        let mut staged = NamedTempFile::new_in(parent)
            .map_err(|err| StoreError::io("save-create", parent.display(), err))?;
        staged
            .write_all(&bytes)
            .and_then(|_| staged.as_file().sync_all())
            .map_err(|err| StoreError::io("save-write", staged.path().display(), err))?;
        staged
            .persist(path)
            .map_err(|err| StoreError::io("save-rename", path.display(), err.error))?;
        debug!(path = %path.display(), bytes = bytes.len(), "saved simulation store");
        Ok(())
    }

    pub fn save_to_writer<W: Write>(&self, mut writer: W) -> Result<(), StoreError> {
        let bytes = self.to_bytes()?;
        writer
            .write_all(&bytes)
            .and_then(|_| writer.flush())
            .map_err(|err| StoreError::io("save-write", "<stream>", err))
    }

    /// Replaces `about`, `static`, `primary`, `results` and `inputs` with
    /// the contents of a saved store. Nothing changes unless the whole
    /// payload decodes.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let file =
            File::open(path).map_err(|err| StoreError::io("load-open", path.display(), err))?;
        self.load_from_reader(file)?;
        debug!(path = %path.display(), steps = self.primary.len(), "loaded simulation store");
        Ok(())
    }

    pub fn load_from_reader<R: Read>(&mut self, mut reader: R) -> Result<(), StoreError> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|err| StoreError::io("load-read", "<stream>", err))?;
        self.load_bytes(&bytes)
    }

    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), StoreError> {
        let snapshot: StoreSnapshot = StoreEnvelope::from_bytes(bytes)?.unwrap_payload()?;
        self.apply(snapshot);
        Ok(())
    }

    /// Text summary with `Inputs`, `Primary`, `About` and `Static Parameters`
    /// sections, in that order.
    pub fn summary(&self, style: SummaryStyle) -> Result<String, StoreError> {
        let panel = self.primary_panel(None, None)?;
        Ok(summary::render(
            &SummarySections {
                inputs: &self.inputs,
                panel: &panel,
                about: &self.about,
                static_params: &self.static_params,
            },
            style,
        ))
    }

    /// Copies `results.<step>.<attr>` into `primary[step][alias]` for every
    /// step in `results`. `alias` defaults to `attr`.
    ///
    /// All steps resolve before anything is written, so a missing attribute
    /// leaves `primary` unchanged.
    pub fn promote(&mut self, attr: &str, alias: Option<&str>) -> Result<(), StoreError> {
        if attr.is_empty() {
            return Err(StoreError::InvalidArgument(ErrorInfo::new(
                "promote-attr",
                "attribute path must not be empty",
            )));
        }
        let alias = alias.filter(|alias| !alias.is_empty()).unwrap_or(attr);
        let resolved = self
            .results
            .steps()
            .map(|step| {
                self.results
                    .resolve_in(step, attr)
                    .map(|value| (step.to_string(), value.clone()))
                    .ok_or_else(|| {
                        StoreError::MissingAttribute(
                            ErrorInfo::new(
                                "promote",
                                format!("could not find attribute {attr} on step {step}"),
                            )
                            .with_context("attribute", attr)
                            .with_context("step", step),
                        )
                    })
            })
            .collect::<Result<Vec<(String, Value)>, _>>()?;
        debug!(attr, alias, steps = resolved.len(), "promoting results attribute");
        for (step, value) in resolved {
            self.primary
                .entry(step)
                .or_default()
                .insert(alias.to_string(), value);
        }
        Ok(())
    }

    /// Wavelength axis from `static[<spectral category>][<lambdas key>]`, if
    /// present and numeric.
    pub fn wavelengths(&self) -> Option<Vec<f64>> {
        let lambdas = self
            .static_params
            .get(&self.config.spectral_category)
            .and_then(|params| params.get(&self.config.lambdas_key))
            .and_then(Value::as_array)
            .and_then(|values| values.iter().map(Value::as_f64).collect::<Option<Vec<_>>>());
        if lambdas.is_none() {
            warn!(
                category = %self.config.spectral_category,
                key = %self.config.lambdas_key,
                "wavelengths not found in static parameters; panel rows will not be indexed by wavelength"
            );
        }
        lambdas
    }

    /// Builds the variable x wavelength x step panel from `primary`.
    ///
    /// With `relabel` set to an input key, step labels are replaced by that
    /// input's values; `prefix` switches the labels to `<prefix><value:.4>`.
    pub fn primary_panel(
        &self,
        relabel: Option<&AxisRelabel>,
        prefix: Option<&str>,
    ) -> Result<PrimaryPanel, StoreError> {
        let mut panel = PrimaryPanel::build(&self.primary, self.wavelengths())?;
        if let Some(relabel) = relabel {
            panel.relabel_steps(relabel, &self.inputs, prefix)?;
        }
        Ok(panel)
    }
}
