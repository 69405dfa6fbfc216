//! Field rules expressed as data: each level maps to a predicate over its
//! selected value.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::level::Level;
use crate::model::{SelectionState, ValidationErrors};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rule {
    /// Value must be non-empty.
    Required,
    /// Value must contain something other than whitespace.
    NonBlank,
    Optional,
}

impl Rule {
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Rule::Required => !value.is_empty(),
            Rule::NonBlank => !value.trim().is_empty(),
            Rule::Optional => true,
        }
    }

    pub fn message(level: Level) -> String {
        format!("{level} is required")
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationRules(BTreeMap<Level, Rule>);

impl Default for ValidationRules {
    fn default() -> Self {
        Self(Level::ALL.into_iter().map(|l| (l, Rule::Required)).collect())
    }
}

impl ValidationRules {
    pub fn new(rules: impl IntoIterator<Item = (Level, Rule)>) -> Self {
        Self(rules.into_iter().collect())
    }

    #[must_use]
    pub fn with(mut self, level: Level, rule: Rule) -> Self {
        self.0.insert(level, rule);
        self
    }

    /// Levels without a rule are treated as `Optional`.
    pub fn rule(&self, level: Level) -> Rule {
        self.0.get(&level).copied().unwrap_or(Rule::Optional)
    }

    pub fn missing_levels(&self) -> Vec<Level> {
        Level::ALL
            .into_iter()
            .filter(|l| !self.0.contains_key(l))
            .collect()
    }

    /// Checks every level in order, replacing `errors` wholesale.
    /// Returns `true` when no level failed.
    pub fn validate(&self, selection: &SelectionState, errors: &mut ValidationErrors) -> bool {
        for level in Level::ALL {
            if self.rule(level).accepts(selection.get(level)) {
                errors.clear(level);
            } else {
                errors.set(level, Rule::message(level));
            }
        }
        errors.is_empty()
    }
}
