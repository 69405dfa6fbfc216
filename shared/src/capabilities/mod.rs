//! External collaborators the selector core calls into.
//!
//! The core asks for option lists through `LocationData` and announces
//! submissions and fetch failures through `Report`. The shell resolves both
//! against a `LocationDataSource` and a `SelectorObserver`; neither owns any
//! selector state.

mod location_data;
mod observer;
mod report;
mod source;

pub use self::location_data::{FetchRequest, FetchResult, LocationData};
pub use self::observer::{SelectorObserver, TracingObserver};
pub use self::report::{Report, ReportOperation};
pub use self::source::{
    decode_envelope, fetch_options, normalize_labels, ApiEnvelope, CountryRecord, FetchError,
    LocationApi, LocationDataSource, NormalizingSource, StateRecord, StatesPayload,
};

pub use crux_core::render::Render;

use crate::app::App;
use crate::event::Event;

#[derive(crux_core::macros::Effect)]
pub struct Capabilities {
    pub render: Render<Event>,
    pub location_data: LocationData<Event>,
    pub report: Report<Event>,
}
