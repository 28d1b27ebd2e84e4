mod common;

use std::fs;

use pame_store::{RowAxis, StoreConfig, StoreError, DEFAULT_LAMBDAS_KEY};
use serde_json::json;
use tempfile::tempdir;

use common::sample_store;

#[test]
fn yaml_fields_default_when_absent() {
    let config = StoreConfig::from_yaml_slice(b"spectral_category: optics\n").expect("yaml");
    assert_eq!(config.spectral_category, "optics");
    assert_eq!(config.lambdas_key, DEFAULT_LAMBDAS_KEY);
    assert!(matches!(
        StoreConfig::from_yaml_slice(b"spectral_category: [1, 2"),
        Err(StoreError::Format(_))
    ));
}

#[test]
fn custom_category_drives_the_wavelength_axis() {
    let dir = tempdir().expect("tmp dir");
    let path = dir.path().join("store.yaml");
    fs::write(&path, "spectral_category: optics\nlambdas_key: wl\n").expect("write");
    let config = StoreConfig::load(&path).expect("load config");

    let mut store = sample_store().with_config(config);
    let panel = store.primary_panel(None, None).expect("panel");
    assert_eq!(panel.rows(), &RowAxis::Positional(3));

    let mut optics = std::collections::BTreeMap::new();
    optics.insert("wl".to_string(), json!([1.0, 2.0, 3.0]));
    store.static_params.insert("optics".to_string(), optics);
    let panel = store.primary_panel(None, None).expect("panel");
    assert_eq!(panel.rows(), &RowAxis::Wavelengths(vec![1.0, 2.0, 3.0]));
}

#[test]
fn config_is_not_persisted() {
    let config = StoreConfig {
        spectral_category: "optics".to_string(),
        lambdas_key: "wl".to_string(),
    };
    let store = sample_store().with_config(config);
    let bytes = store.to_bytes().expect("bytes");
    let mut restored = pame_store::SimulationStore::new();
    restored.load_bytes(&bytes).expect("load");
    assert_eq!(restored.config(), &StoreConfig::default());
    assert_eq!(restored.primary, store.primary);
}
