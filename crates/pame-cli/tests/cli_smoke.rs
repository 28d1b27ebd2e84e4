use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use serde_json::json;
use tempfile::tempdir;

fn pame(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pame"))
        .args(args)
        .output()
        .expect("run pame")
}

fn write_document(dir: &Path) -> String {
    let doc = json!({
        "about": {"Simulation Name": "cli"},
        "static": {"spectral_parameters": {"lambdas": [400.0, 500.0]}},
        "primary": {
            "step_2": {"R_avg": [0.3, 0.4]},
            "step_10": {"R_avg": [0.5, 0.6]}
        },
        "results": {
            "step_2": {"layer": {"n": 1.4}},
            "step_10": {"layer": {"n": 1.6}}
        },
        "inputs": {"vfrac": [0.25, 0.75]}
    });
    let path = dir.join("sim.json");
    fs::write(&path, doc.to_string()).expect("write doc");
    path.to_string_lossy().into_owned()
}

#[test]
fn summary_prints_all_sections() {
    let dir = tempdir().expect("tmp dir");
    let input = write_document(dir.path());
    let output = pame(&["summary", &input, "--style", "full"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for header in ["Inputs:", "Primary:", "About:", "Static Parameters:"] {
        assert!(stdout.contains(header), "missing {header}");
    }
}

#[test]
fn bad_style_fails() {
    let dir = tempdir().expect("tmp dir");
    let input = write_document(dir.path());
    let output = pame(&["summary", &input, "--style", "bad"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid argument"));
}

#[test]
fn panel_relabels_steps() {
    let dir = tempdir().expect("tmp dir");
    let input = write_document(dir.path());
    let output = pame(&[
        "panel", &input, "--relabel", "vfrac", "--prefix", "v_", "--variable", "R_avg",
    ]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("wavelength\tv_0.2500\tv_0.7500"), "{stdout}");

    let output = pame(&["panel", &input, "--relabel", "3.14"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("float"));
}

#[test]
fn relabel_key_is_taken_verbatim() {
    let dir = tempdir().expect("tmp dir");
    let doc = json!({
        "about": {},
        "static": {},
        "primary": {"step_0": {"R_avg": 0.1}, "step_1": {"R_avg": 0.2}},
        "results": {},
        "inputs": {"true": ["low", "high"]}
    });
    let path = dir.path().join("keys.json");
    fs::write(&path, doc.to_string()).expect("write doc");
    let input = path.to_string_lossy().into_owned();

    let output = pame(&["panel", &input, "--relabel-key", "true", "--variable", "R_avg"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("row\tlow\thigh"), "{stdout}");

    let output = pame(&["panel", &input, "--relabel", "true"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("bool"));

    let output = pame(&["panel", &input, "--relabel", "x", "--relabel-key", "true"]);
    assert!(!output.status.success());
}

#[test]
fn promote_then_convert_round_trips() {
    let dir = tempdir().expect("tmp dir");
    let input = write_document(dir.path());
    let saved = dir.path().join("promoted.pame");
    let saved_str = saved.to_string_lossy().into_owned();
    let output = pame(&["promote", &input, "layer.n", "--alias", "n", "--out", &saved_str]);
    assert!(output.status.success());

    let json_out = dir.path().join("out").join("promoted.json");
    let json_str = json_out.to_string_lossy().into_owned();
    let output = pame(&["convert", &saved_str, "--out", &json_str, "--to", "json"]);
    assert!(output.status.success());
    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&json_out).expect("read")).expect("json");
    assert_eq!(value["primary"]["step_10"]["n"], json!(1.6));
}
