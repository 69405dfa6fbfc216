use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::config::SelectorConfig;
use crate::level::Level;
use crate::LEVEL_COUNT;

/// Selected value per level. An empty string means "unselected".
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    values: [String; LEVEL_COUNT],
}

impl SelectionState {
    pub fn get(&self, level: Level) -> &str {
        &self.values[level.index()]
    }

    pub fn is_selected(&self, level: Level) -> bool {
        !self.values[level.index()].is_empty()
    }

    /// Sets `level` and unselects every level below it.
    pub fn select(&mut self, level: Level, value: impl Into<String>) {
        self.values[level.index()] = value.into();
        for below in level.below() {
            self.values[below.index()].clear();
        }
    }

    pub fn clear(&mut self) {
        for value in &mut self.values {
            value.clear();
        }
    }

    /// Values of all levels strictly above `level`, top first.
    pub fn parents_of(&self, level: Level) -> Vec<String> {
        level
            .above()
            .iter()
            .map(|l| self.values[l.index()].clone())
            .collect()
    }

    /// No selected level sits below an unselected one.
    pub fn is_consistent(&self) -> bool {
        self.values
            .windows(2)
            .all(|pair| !(pair[0].is_empty() && !pair[1].is_empty()))
    }

    pub fn is_empty(&self) -> bool {
        self.values.iter().all(String::is_empty)
    }
}

/// Selectable labels per level, valid only for the current parent selections.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct OptionSet {
    lists: [Vec<String>; LEVEL_COUNT],
}

impl OptionSet {
    pub fn get(&self, level: Level) -> &[String] {
        &self.lists[level.index()]
    }

    pub fn set(&mut self, level: Level, options: Vec<String>) {
        self.lists[level.index()] = options;
    }

    /// Empties every level strictly below `level`.
    pub fn clear_below(&mut self, level: Level) {
        for below in level.below() {
            self.lists[below.index()].clear();
        }
    }

    pub fn clear(&mut self) {
        for list in &mut self.lists {
            list.clear();
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lists.iter().all(Vec::is_empty)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    messages: [Option<String>; LEVEL_COUNT],
}

impl ValidationErrors {
    pub fn get(&self, level: Level) -> Option<&str> {
        self.messages[level.index()].as_deref()
    }

    pub fn set(&mut self, level: Level, message: impl Into<String>) {
        self.messages[level.index()] = Some(message.into());
    }

    pub fn clear(&mut self, level: Level) {
        self.messages[level.index()] = None;
    }

    pub fn is_empty(&self) -> bool {
        self.messages.iter().all(Option::is_none)
    }

    pub fn len(&self) -> usize {
        self.messages.iter().filter(|m| m.is_some()).count()
    }

    /// Levels carrying a message, in level order.
    pub fn iter(&self) -> impl Iterator<Item = (Level, &str)> + '_ {
        Level::ALL
            .into_iter()
            .filter_map(|level| self.get(level).map(|message| (level, message)))
    }
}

/// The accepted selection handed to consumers after a successful submit.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct LocationSelection {
    pub country: String,
    pub state: String,
    pub district: String,
    pub city: String,
}

impl LocationSelection {
    pub fn new(
        country: impl Into<String>,
        state: impl Into<String>,
        district: impl Into<String>,
        city: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            state: state.into(),
            district: district.into(),
            city: city.into(),
        }
    }
}

impl From<&SelectionState> for LocationSelection {
    fn from(selection: &SelectionState) -> Self {
        Self::new(
            selection.get(Level::Country),
            selection.get(Level::State),
            selection.get(Level::District),
            selection.get(Level::City),
        )
    }
}

/// Full selector state. Mutated only by `App::update`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct Model {
    pub selection: SelectionState,
    pub options: OptionSet,
    pub errors: ValidationErrors,
    pub dialog_open: bool,
    pub config: SelectorConfig,

    // Fetch bookkeeping, never carried across serialization
    #[serde(skip)]
    pub(crate) pending: BTreeSet<(Level, u64)>,
    #[serde(skip)]
    pub(crate) seq: [u64; LEVEL_COUNT],
}

impl Model {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while at least one issued fetch has not been answered.
    pub fn is_loading(&self) -> bool {
        !self.pending.is_empty()
    }

    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FieldView {
    pub level: Level,
    pub label: String,
    pub hint: String,
    pub value: String,
    pub options: Vec<String>,
    pub error: Option<String>,
    pub enabled: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct DialogView {
    pub title: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ViewModel {
    pub fields: Vec<FieldView>,
    pub loading: bool,
    pub dialog: Option<DialogView>,
}

impl ViewModel {
    pub fn field(&self, level: Level) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.level == level)
    }

    pub fn value(&self, level: Level) -> &str {
        self.field(level).map_or("", |f| f.value.as_str())
    }

    pub fn options(&self, level: Level) -> &[String] {
        self.field(level).map_or(&[][..], |f| f.options.as_slice())
    }

    pub fn selection(&self) -> LocationSelection {
        LocationSelection::new(
            self.value(Level::Country),
            self.value(Level::State),
            self.value(Level::District),
            self.value(Level::City),
        )
    }

    /// Field errors gathered back into one set.
    pub fn errors(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::default();
        for field in &self.fields {
            if let Some(message) = &field.error {
                errors.set(field.level, message.clone());
            }
        }
        errors
    }
}
