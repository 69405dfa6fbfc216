// lib.rs - Cascading location selection core

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod app;
pub mod capabilities;
pub mod config;
pub mod event;
pub mod level;
pub mod model;
pub mod selector;
pub mod validation;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use app::App;
pub use capabilities::{
    decode_envelope, fetch_options, normalize_labels, ApiEnvelope, Capabilities, CountryRecord,
    Effect, FetchError, FetchRequest, FetchResult, LocationApi, LocationDataSource,
    NormalizingSource, ReportOperation, SelectorObserver, StateRecord, StatesPayload,
    TracingObserver,
};
pub use config::{ConfigError, SelectorConfig};
pub use event::{Event, FetchTicket, SubmitOutcome};
pub use level::Level;
pub use model::{
    DialogView, FieldView, LocationSelection, Model, OptionSet, SelectionState,
    ValidationErrors, ViewModel,
};
pub use selector::LocationSelector;
pub use validation::{Rule, ValidationRules};

pub const LEVEL_COUNT: usize = 4;
pub const DEFAULT_DIALOG_TITLE: &str = "Form submitted successfully!";
pub const DEFAULT_RELOAD_COUNTRIES_AFTER_SUBMIT: bool = true;
pub const DEFAULT_FETCH_ON_EMPTY_SELECTION: bool = true;
pub const MAX_OPTION_LABEL_LENGTH: usize = 256;
