#![allow(dead_code)]

use std::collections::BTreeMap;

use pame_store::{
    AboutTable, InputsTable, PrimaryRecord, PrimaryTable, ResultsTree, SimulationStore,
    StaticTable, DEFAULT_LAMBDAS_KEY, DEFAULT_SPECTRAL_CATEGORY,
};
use serde_json::{json, Value};

pub fn record(entries: &[(&str, Value)]) -> PrimaryRecord {
    entries
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

pub fn spectral_static(lambdas: Value) -> StaticTable {
    let mut params = BTreeMap::new();
    params.insert(DEFAULT_LAMBDAS_KEY.to_string(), lambdas);
    params.insert("x_unit".to_string(), json!("nm"));
    let mut table = StaticTable::new();
    table.insert(DEFAULT_SPECTRAL_CATEGORY.to_string(), params);
    table
}

/// Two-step layer sweep over three wavelengths.
pub fn sample_store() -> SimulationStore {
    let mut about = AboutTable::new();
    about.insert("Simulation Name".to_string(), json!("vfrac sweep"));
    about.insert(
        "Storage".to_string(),
        json!({"outpath": "/tmp/sweep", "compress": true}),
    );

    let mut static_params = spectral_static(json!([400.0, 500.0, 600.0]));
    let mut layer = BTreeMap::new();
    layer.insert("thickness".to_string(), json!(24.0));
    static_params.insert("layer".to_string(), layer);

    let mut primary = PrimaryTable::new();
    primary.insert(
        "step_0".to_string(),
        record(&[
            ("R_avg", json!([0.1, 0.2, 0.3])),
            ("A_avg", json!([0.5, 0.5, 0.5])),
            ("vfrac", json!(0.5)),
        ]),
    );
    primary.insert(
        "step_1".to_string(),
        record(&[
            ("R_avg", json!([0.4, 0.5, 0.6])),
            ("A_avg", json!([0.3, 0.2, 0.1])),
            ("vfrac", json!(0.6)),
        ]),
    );

    let results: ResultsTree = [
        (
            "step_0".to_string(),
            json!({"optics": {"ellipsometry": {"psi": 12.5}}, "layer": {"n": 1.45}}),
        ),
        (
            "step_1".to_string(),
            json!({"optics": {"ellipsometry": {"psi": 13.0}}, "layer": {"n": 1.47}}),
        ),
    ]
    .into_iter()
    .collect();

    let mut inputs = InputsTable::new();
    inputs.insert("vfrac".to_string(), vec![json!(0.5), json!(0.6)]);

    SimulationStore::from_parts(about, static_params, primary, results, inputs)
}
