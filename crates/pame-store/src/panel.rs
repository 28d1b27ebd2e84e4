//! Labeled 3-axis view over per-step primary records.
//!
//! Axis 0 holds variable names, axis 1 the wavelength (or positional row)
//! axis, axis 2 the step labels. Cells are `f64`; `NaN` marks a variable
//! that a step did not report.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use pame_core::errors::{ErrorInfo, StoreError};
use serde_json::Value;

use crate::step::numeric_order;
use crate::value::{as_cell, plain_string, type_name};
use crate::PrimaryTable;

/// Row axis of the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum RowAxis {
    /// Rows labeled by wavelength.
    Wavelengths(Vec<f64>),
    /// Unlabeled rows `0..n`.
    Positional(usize),
}

impl RowAxis {
    pub fn len(&self) -> usize {
        match self {
            RowAxis::Wavelengths(values) => values.len(),
            RowAxis::Positional(len) => *len,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether rows carry wavelength labels.
    pub fn is_labeled(&self) -> bool {
        matches!(self, RowAxis::Wavelengths(_))
    }

    /// Display label of row `idx`.
    pub fn label(&self, idx: usize) -> Option<String> {
        match self {
            RowAxis::Wavelengths(values) => values.get(idx).map(|value| value.to_string()),
            RowAxis::Positional(len) => (idx < *len).then(|| idx.to_string()),
        }
    }
}

/// How to relabel the step axis of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxisRelabel {
    /// Replace step labels with the values of this `inputs` entry.
    Input(String),
    /// Accepted without relabeling.
    Position(i64),
}

impl From<&str> for AxisRelabel {
    fn from(key: &str) -> Self {
        AxisRelabel::Input(key.to_string())
    }
}

impl From<String> for AxisRelabel {
    fn from(key: String) -> Self {
        AxisRelabel::Input(key)
    }
}

impl From<i64> for AxisRelabel {
    fn from(position: i64) -> Self {
        AxisRelabel::Position(position)
    }
}

impl TryFrom<&Value> for AxisRelabel {
    type Error = StoreError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        if let Some(key) = value.as_str() {
            return Ok(AxisRelabel::Input(key.to_string()));
        }
        if let Some(position) = value.as_i64() {
            return Ok(AxisRelabel::Position(position));
        }
        Err(StoreError::InvalidArgument(
            ErrorInfo::new(
                "axis-relabel-type",
                format!(
                    "can only relabel the step axis with strings or integers, got type {}",
                    type_name(value)
                ),
            )
            .with_context("type", type_name(value))
            .with_hint("strings should name a key of the store's inputs"),
        ))
    }
}

/// 2-D slice of one variable: rows x steps.
#[derive(Debug, Clone)]
pub struct VariableFrame {
    pub variable: String,
    pub rows: RowAxis,
    pub steps: Vec<String>,
    /// Row-major values, `values[row][step]`.
    pub values: Vec<Vec<f64>>,
}

impl fmt::Display for VariableFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let corner = if self.rows.is_labeled() { "wavelength" } else { "row" };
        write!(f, "{corner}")?;
        for step in &self.steps {
            write!(f, "\t{step}")?;
        }
        for (idx, row) in self.values.iter().enumerate() {
            writeln!(f)?;
            write!(f, "{}", self.rows.label(idx).unwrap_or_default())?;
            for value in row {
                write!(f, "\t{value}")?;
            }
        }
        Ok(())
    }
}

/// Labeled variable x row x step table derived from the primary records.
#[derive(Debug, Clone)]
pub struct PrimaryPanel {
    variables: Vec<String>,
    rows: RowAxis,
    steps: Vec<String>,
    values: Vec<f64>,
}

impl PrimaryPanel {
    /// Builds a panel from primary records, one frame per step.
    ///
    /// Every step must coerce; the first failure aborts the whole build.
    /// The returned panel has its variable axis sorted lexicographically
    /// and its step axis sorted by numeric suffix.
    pub fn build(
        primary: &PrimaryTable,
        wavelengths: Option<Vec<f64>>,
    ) -> Result<Self, StoreError> {
        let index_len = wavelengths.as_ref().map(Vec::len);
        let frames = primary
            .iter()
            .map(|(step, record)| coerce_record(step, record, index_len))
            .collect::<Result<Vec<_>, _>>()?;

        let row_count = index_len
            .unwrap_or_else(|| frames.iter().map(|frame| frame.rows).max().unwrap_or(0));
        let rows = match wavelengths {
            Some(values) => RowAxis::Wavelengths(values),
            None => RowAxis::Positional(row_count),
        };

        let mut seen = BTreeSet::new();
        let mut variables = Vec::new();
        for frame in &frames {
            for (name, _) in &frame.columns {
                if seen.insert(name.as_str()) {
                    variables.push(name.clone());
                }
            }
        }
        let steps: Vec<String> = primary.keys().cloned().collect();

        let mut panel = PrimaryPanel {
            values: vec![f64::NAN; variables.len() * row_count * steps.len()],
            variables,
            rows,
            steps,
        };
        let positions: BTreeMap<&str, usize> = panel
            .variables
            .iter()
            .enumerate()
            .map(|(idx, name)| (name.as_str(), idx))
            .collect();
        let (row_total, step_total) = (panel.rows.len(), panel.steps.len());
        for (step_idx, frame) in frames.iter().enumerate() {
            for (name, column) in &frame.columns {
                let var_idx = positions[name.as_str()];
                for row in 0..frame.rows {
                    panel.values[(var_idx * row_total + row) * step_total + step_idx] =
                        column.at(row);
                }
            }
        }

        panel.sort_variables();
        panel.sort_steps_numerically()?;
        Ok(panel)
    }

    /// Returns (variables, rows, steps).
    pub fn dimensions(&self) -> (usize, usize, usize) {
        (self.variables.len(), self.rows.len(), self.steps.len())
    }

    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    pub fn rows(&self) -> &RowAxis {
        &self.rows
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    fn offset(&self, var_idx: usize, row: usize, step_idx: usize) -> usize {
        (var_idx * self.rows.len() + row) * self.steps.len() + step_idx
    }

    /// Cell lookup by labels; `None` for unknown labels or missing data.
    /// A repeated step label resolves to its first occurrence.
    pub fn get(&self, variable: &str, row: usize, step: &str) -> Option<f64> {
        let var_idx = self.variables.iter().position(|name| name == variable)?;
        let step_idx = self.steps.iter().position(|label| label == step)?;
        if row >= self.rows.len() {
            return None;
        }
        let value = self.values[self.offset(var_idx, row, step_idx)];
        (!value.is_nan()).then_some(value)
    }

    /// Rows x steps slice for a single variable.
    pub fn variable_frame(&self, variable: &str) -> Option<VariableFrame> {
        let var_idx = self.variables.iter().position(|name| name == variable)?;
        let values = (0..self.rows.len())
            .map(|row| {
                (0..self.steps.len())
                    .map(|step_idx| self.values[self.offset(var_idx, row, step_idx)])
                    .collect()
            })
            .collect();
        Some(VariableFrame {
            variable: variable.to_string(),
            rows: self.rows.clone(),
            steps: self.steps.clone(),
            values,
        })
    }

    /// Minimum and maximum finite value of a variable across the panel.
    pub fn value_range(&self, variable: &str) -> Option<(f64, f64)> {
        let var_idx = self.variables.iter().position(|name| name == variable)?;
        let block = self.rows.len() * self.steps.len();
        self.values[var_idx * block..(var_idx + 1) * block]
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((lo, hi)) => Some((lo.min(value), hi.max(value))),
            })
    }

    /// Sorts axis 0 lexicographically by variable name.
    pub fn sort_variables(&mut self) {
        let mut order: Vec<usize> = (0..self.variables.len()).collect();
        order.sort_by(|&a, &b| self.variables[a].cmp(&self.variables[b]));
        self.reindex_variables(&order);
    }

    /// Sorts axis 2 by the integer suffix of each `step_<N>` label.
    pub fn sort_steps_numerically(&mut self) -> Result<(), StoreError> {
        let order = numeric_order(&self.steps)?;
        self.reindex_steps(&order);
        Ok(())
    }

    /// Renames step labels; labels absent from `mapping` are kept.
    ///
    /// Repeated labels are allowed. Label lookups such as [`PrimaryPanel::get`]
    /// resolve to the first step carrying the label.
    pub fn rename_steps(&mut self, mapping: &BTreeMap<String, String>) {
        for label in &mut self.steps {
            if let Some(renamed) = mapping.get(label.as_str()) {
                *label = renamed.clone();
            }
        }
    }

    /// Applies an [`AxisRelabel`] using the store's swept inputs.
    pub fn relabel_steps(
        &mut self,
        relabel: &AxisRelabel,
        inputs: &BTreeMap<String, Vec<Value>>,
        prefix: Option<&str>,
    ) -> Result<(), StoreError> {
        let key = match relabel {
            AxisRelabel::Input(key) => key,
            AxisRelabel::Position(_) => return Ok(()),
        };
        let values = inputs.get(key).ok_or_else(|| {
            StoreError::InvalidArgument(
                ErrorInfo::new("unknown-input", "relabel key is not a swept input")
                    .with_context("input", key.clone())
                    .with_hint(format!(
                        "known inputs: {}",
                        inputs.keys().cloned().collect::<Vec<_>>().join(", ")
                    )),
            )
        })?;
        let prefix = prefix.filter(|prefix| !prefix.is_empty());
        let mut mapping = BTreeMap::new();
        for (label, value) in self.steps.iter().zip(values) {
            let new_label = match prefix {
                Some(prefix) => {
                    let number = value.as_f64().ok_or_else(|| {
                        StoreError::InvalidArgument(
                            ErrorInfo::new("relabel-format", "prefixed labels need numeric inputs")
                                .with_context("input", key.clone())
                                .with_context("step", label.clone())
                                .with_context("type", type_name(value)),
                        )
                    })?;
                    format!("{prefix}{number:.4}")
                }
                None => plain_string(value),
            };
            mapping.insert(label.clone(), new_label);
        }
        self.rename_steps(&mapping);
        Ok(())
    }

    fn reindex_variables(&mut self, order: &[usize]) {
        let block = self.rows.len() * self.steps.len();
        let mut values = Vec::with_capacity(self.values.len());
        for &idx in order {
            values.extend_from_slice(&self.values[idx * block..(idx + 1) * block]);
        }
        self.variables = order.iter().map(|&idx| self.variables[idx].clone()).collect();
        self.values = values;
    }

    fn reindex_steps(&mut self, order: &[usize]) {
        let width = self.steps.len();
        let mut values = Vec::with_capacity(self.values.len());
        for line in self.values.chunks(width.max(1)) {
            values.extend(order.iter().map(|&idx| line[idx]));
        }
        self.steps = order.iter().map(|&idx| self.steps[idx].clone()).collect();
        self.values = values;
    }
}

fn axis_span(labels: &[String]) -> String {
    match (labels.first(), labels.last()) {
        (Some(first), Some(last)) => format!("{first} to {last}"),
        _ => "None".to_string(),
    }
}

impl fmt::Display for PrimaryPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (variables, rows, steps) = self.dimensions();
        let (row_kind, row_axis) = if self.rows.is_labeled() {
            ("wavelengths", "Wavelength axis")
        } else {
            ("rows", "Row axis")
        };
        let row_labels: Vec<String> = [0, rows.saturating_sub(1)]
            .iter()
            .filter_map(|&idx| self.rows.label(idx))
            .collect();
        writeln!(f, "<PrimaryPanel>")?;
        writeln!(
            f,
            "Dimensions: {variables} (variables) x {rows} ({row_kind}) x {steps} (steps)"
        )?;
        writeln!(f, "Variables axis: {}", axis_span(&self.variables))?;
        writeln!(f, "{row_axis}: {}", axis_span(&row_labels))?;
        write!(f, "Step axis: {}", axis_span(&self.steps))
    }
}

enum Column {
    Scalar(f64),
    Series(Vec<f64>),
}

impl Column {
    fn at(&self, row: usize) -> f64 {
        match self {
            Column::Scalar(value) => *value,
            Column::Series(values) => values[row],
        }
    }
}

struct Frame {
    rows: usize,
    columns: Vec<(String, Column)>,
}

fn coercion_error(step: &str, variable: &str, message: impl Into<String>) -> StoreError {
    StoreError::TableConstruction(
        ErrorInfo::new("coerce", message)
            .with_context("step", step)
            .with_context("variable", variable),
    )
}

fn coerce_record(
    step: &str,
    record: &BTreeMap<String, Value>,
    index_len: Option<usize>,
) -> Result<Frame, StoreError> {
    let mut columns = Vec::with_capacity(record.len());
    for (name, value) in record {
        let column = match value {
            Value::Array(items) => Column::Series(
                items
                    .iter()
                    .map(|item| {
                        as_cell(item).ok_or_else(|| {
                            coercion_error(
                                step,
                                name,
                                format!("sequence holds a non-numeric {}", type_name(item)),
                            )
                        })
                    })
                    .collect::<Result<_, _>>()?,
            ),
            other => Column::Scalar(as_cell(other).ok_or_else(|| {
                coercion_error(step, name, format!("cannot tabulate a {}", type_name(other)))
            })?),
        };
        columns.push((name.clone(), column));
    }

    let mut rows = index_len;
    for (name, column) in &columns {
        if let Column::Series(values) = column {
            let expected = *rows.get_or_insert(values.len());
            if values.len() != expected {
                return Err(coercion_error(
                    step,
                    name,
                    format!("length {} does not match row count {expected}", values.len()),
                ));
            }
        }
    }
    let rows = rows.unwrap_or(if columns.is_empty() { 0 } else { 1 });
    Ok(Frame { rows, columns })
}
