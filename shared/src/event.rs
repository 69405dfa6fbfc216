use serde::{Deserialize, Serialize};

use crate::capabilities::FetchResult;
use crate::config::SelectorConfig;
use crate::level::Level;
use crate::model::{LocationSelection, ValidationErrors};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Event {
    /// Replace the behaviour switches and validation rules.
    Configure(SelectorConfig),
    /// Load the country list.
    Initialize,
    /// Select a value at any level. City never triggers a fetch.
    Select { level: Level, value: String },
    SelectCity { value: String },
    Validate,
    Submit,
    CloseDialog,

    // Capability responses
    OptionsLoaded { ticket: FetchTicket, result: FetchResult },
}

/// Identity of one issued fetch.
///
/// `seq` is the per-level counter value at issue time and `parents` the
/// selections above `target` at issue time. A result is applied only while
/// both still match the model.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    pub target: Level,
    pub seq: u64,
    pub parents: Vec<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted(LocationSelection),
    Rejected(ValidationErrors),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}
