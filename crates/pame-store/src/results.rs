use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-step nested results with dotted-path lookup (`step_0.a.b.c`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultsTree(BTreeMap<String, Value>);

impl ResultsTree {
    /// Creates an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the results of one step.
    pub fn insert(&mut self, step: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(step.into(), value)
    }

    /// Returns the raw results of one step.
    pub fn get(&self, step: &str) -> Option<&Value> {
        self.0.get(step)
    }

    /// Iterates the step labels present in the tree.
    pub fn steps(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Resolves a full dotted path whose first segment is the step label.
    pub fn resolve(&self, path: &str) -> Option<&Value> {
        let (step, attr) = match path.split_once('.') {
            Some((step, attr)) => (step, Some(attr)),
            None => (path, None),
        };
        let root = self.0.get(step)?;
        match attr {
            Some(attr) => walk(root, attr),
            None => Some(root),
        }
    }

    /// Resolves `attr` (dotted) beneath the results of `step`.
    pub fn resolve_in(&self, step: &str, attr: &str) -> Option<&Value> {
        walk(self.0.get(step)?, attr)
    }
}

fn walk<'a>(root: &'a Value, attr: &str) -> Option<&'a Value> {
    attr.split('.')
        .try_fold(root, |current, segment| current.as_object()?.get(segment))
}

impl From<BTreeMap<String, Value>> for ResultsTree {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }
}

impl FromIterator<(String, Value)> for ResultsTree {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
