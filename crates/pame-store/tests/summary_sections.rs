mod common;

use pame_store::{SimulationStore, StoreError, SummaryStyle};

use common::sample_store;

const HEADERS: [&str; 4] = ["Inputs:", "Primary:", "About:", "Static Parameters:"];

fn section_positions(text: &str) -> Vec<usize> {
    HEADERS
        .iter()
        .map(|header| text.find(header).unwrap_or_else(|| panic!("missing {header}")))
        .collect()
}

#[test]
fn both_styles_emit_sections_in_order() {
    let store = sample_store();
    for style in ["short", "full"] {
        let style: SummaryStyle = style.parse().expect("style");
        let text = store.summary(style).expect("summary");
        assert!(!text.is_empty());
        let positions = section_positions(&text);
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]), "{text}");
        assert!(text.contains("\n\nPrimary:"));
    }
}

#[test]
fn bad_style_is_invalid_argument() {
    let err = "bad".parse::<SummaryStyle>().unwrap_err();
    assert!(matches!(err, StoreError::InvalidArgument(_)));
}

#[test]
fn values_are_rendered_inline() {
    let text = sample_store().summary(SummaryStyle::Short).expect("summary");
    assert!(text.contains("\tvfrac : list(0.5 - 0.6)"));
    assert!(text.contains("\tSimulation Name : vfrac sweep"));
    assert!(text.contains("\tStorage:\n\t\tcompress : true\n\t\toutpath : /tmp/sweep"));
    assert!(text.contains("\tspectral_parameters:\n\t\tlambdas : list(400.0 - 600.0)"));
    assert!(text.contains("\tlayer:\n\t\tthickness : 24.0"));
    assert!(text.contains("\tDimensions: 3 (variables) x 3 (wavelengths) x 2 (steps)"));
    assert!(!text.contains("Ranges:"));
}

#[test]
fn full_style_lists_variable_ranges() {
    let text = sample_store().summary(SummaryStyle::Full).expect("summary");
    assert!(text.contains("\tRanges:\n\t\tA_avg : 0.1 - 0.5"));
    assert!(text.contains("\t\tR_avg : 0.1 - 0.6"));
}

#[test]
fn empty_store_still_has_every_section() {
    let text = SimulationStore::new().summary(SummaryStyle::Short).expect("summary");
    section_positions(&text);
    assert!(text.contains("Step axis: None"));
}
