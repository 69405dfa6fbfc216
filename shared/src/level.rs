use serde::{Deserialize, Serialize};
use std::fmt;

/// One step of the cascading selection. Declaration order is dependency
/// order: every level depends on all levels above it.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Country,
    State,
    District,
    City,
}

impl Level {
    pub const ALL: [Level; 4] = [Level::Country, Level::State, Level::District, Level::City];

    pub const fn index(self) -> usize {
        match self {
            Level::Country => 0,
            Level::State => 1,
            Level::District => 2,
            Level::City => 3,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Level::Country => "Country",
            Level::State => "State",
            Level::District => "District",
            Level::City => "City",
        }
    }

    /// Guidance shown next to the field.
    pub const fn hint(self) -> &'static str {
        match self {
            Level::Country => "Please select a country first",
            Level::State => "Please select a state after selecting a country",
            Level::District => "Please select a district after selecting a state",
            Level::City => "Please select a city after selecting a district",
        }
    }

    /// The level whose options are populated by a selection at this level.
    pub const fn child(self) -> Option<Level> {
        match self {
            Level::Country => Some(Level::State),
            Level::State => Some(Level::District),
            Level::District => Some(Level::City),
            Level::City => None,
        }
    }

    pub const fn parent(self) -> Option<Level> {
        match self {
            Level::Country => None,
            Level::State => Some(Level::Country),
            Level::District => Some(Level::State),
            Level::City => Some(Level::District),
        }
    }

    pub const fn is_leaf(self) -> bool {
        self.child().is_none()
    }

    /// Levels strictly above this one, top first.
    pub fn above(self) -> &'static [Level] {
        let all: &'static [Level] = &Self::ALL;
        &all[..self.index()]
    }

    /// Levels strictly below this one, nearest first.
    pub fn below(self) -> &'static [Level] {
        let all: &'static [Level] = &Self::ALL;
        &all[self.index() + 1..]
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
