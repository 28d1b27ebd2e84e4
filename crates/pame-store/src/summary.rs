use std::fmt;
use std::str::FromStr;

use pame_core::errors::{ErrorInfo, StoreError};
use serde_json::Value;

use crate::panel::PrimaryPanel;
use crate::value::plain_string;
use crate::{AboutTable, InputsTable, StaticTable};

/// Level of detail for [`crate::SimulationStore::summary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SummaryStyle {
    #[default]
    Short,
    /// Also lists the value range of every panel variable.
    Full,
}

impl FromStr for SummaryStyle {
    type Err = StoreError;

    fn from_str(style: &str) -> Result<Self, Self::Err> {
        match style {
            "short" => Ok(SummaryStyle::Short),
            "full" => Ok(SummaryStyle::Full),
            other => Err(StoreError::InvalidArgument(
                ErrorInfo::new(
                    "summary-style",
                    format!("style must be \"short\" or \"full\", got {other}"),
                )
                .with_context("style", other),
            )),
        }
    }
}

impl fmt::Display for SummaryStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryStyle::Short => write!(f, "short"),
            SummaryStyle::Full => write!(f, "full"),
        }
    }
}

fn sequence_range(items: &[Value]) -> Option<String> {
    let (first, last) = (items.first()?, items.last()?);
    Some(format!("list({} - {})", plain_string(first), plain_string(last)))
}

/// Formats a value for inline display: strings verbatim, non-empty
/// sequences as `list(<first> - <last>)`, everything else in JSON form.
pub fn smart_format(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Array(items) => sequence_range(items).unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

pub(crate) struct SummarySections<'a> {
    pub inputs: &'a InputsTable,
    pub panel: &'a PrimaryPanel,
    pub about: &'a AboutTable,
    pub static_params: &'a StaticTable,
}

pub(crate) fn render(sections: &SummarySections<'_>, style: SummaryStyle) -> String {
    let mut inputs = String::from("Inputs:");
    for (key, values) in sections.inputs {
        let rendered = sequence_range(values).unwrap_or_else(|| "[]".to_string());
        inputs.push_str(&format!("\n\t{key} : {rendered}"));
    }

    let mut primary = String::from("Primary:");
    primary.push_str(&format!(
        "\n\t{}",
        sections.panel.to_string().replace('\n', "\n\t")
    ));
    if style == SummaryStyle::Full {
        primary.push_str("\n\tRanges:");
        for variable in sections.panel.variables() {
            let range = match sections.panel.value_range(variable) {
                Some((lo, hi)) => format!("{lo} - {hi}"),
                None => "no finite values".to_string(),
            };
            primary.push_str(&format!("\n\t\t{variable} : {range}"));
        }
    }

    let mut about = String::from("About:");
    for (key, value) in sections.about {
        match value {
            Value::Object(entries) => {
                about.push_str(&format!("\n\t{key}:"));
                for (sub_key, sub_value) in entries {
                    about.push_str(&format!("\n\t\t{sub_key} : {}", smart_format(sub_value)));
                }
            }
            other => about.push_str(&format!("\n\t{key} : {}", smart_format(other))),
        }
    }

    let mut static_params = String::from("Static Parameters:");
    for (category, params) in sections.static_params {
        static_params.push_str(&format!("\n\t{category}:"));
        for (key, value) in params {
            static_params.push_str(&format!("\n\t\t{key} : {}", smart_format(value)));
        }
    }

    [inputs, primary, about, static_params].join("\n\n")
}
