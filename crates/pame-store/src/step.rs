use std::fmt;
use std::str::FromStr;

use pame_core::errors::{ErrorInfo, StoreError};

/// Prefix shared by every step label.
pub const STEP_PREFIX: &str = "step_";

/// Parsed `step_<N>` label. Ordering follows `N`, never the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StepId(u64);

impl StepId {
    /// Creates a step identifier from its integer suffix.
    pub fn new(index: u64) -> Self {
        Self(index)
    }

    /// Returns the integer suffix.
    pub fn index(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STEP_PREFIX}{}", self.0)
    }
}

impl FromStr for StepId {
    type Err = StoreError;

    fn from_str(label: &str) -> Result<Self, Self::Err> {
        label
            .strip_prefix(STEP_PREFIX)
            .filter(|suffix| !suffix.is_empty() && suffix.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|suffix| suffix.parse::<u64>().ok())
            .map(StepId)
            .ok_or_else(|| {
                StoreError::TableConstruction(
                    ErrorInfo::new("step-id", "step label is not of the form step_<N>")
                        .with_context("step", label),
                )
            })
    }
}

/// Returns the permutation that orders `labels` by their numeric suffix.
pub(crate) fn numeric_order(labels: &[String]) -> Result<Vec<usize>, StoreError> {
    let ids = labels
        .iter()
        .map(|label| label.parse::<StepId>())
        .collect::<Result<Vec<_>, _>>()?;
    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by_key(|&idx| ids[idx]);
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_orders_numerically() {
        let labels: Vec<String> = ["step_10", "step_2", "step_1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let order = numeric_order(&labels).unwrap();
        assert_eq!(order, vec![2, 1, 0]);
    }

    #[test]
    fn rejects_malformed_labels() {
        for bad in ["step_", "step_x", "run_3", "step_-1", "3"] {
            assert!(bad.parse::<StepId>().is_err(), "{bad} should not parse");
        }
        assert_eq!("step_7".parse::<StepId>().unwrap().to_string(), "step_7");
    }
}
