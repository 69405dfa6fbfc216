use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use super::source::FetchError;
use crate::level::Level;
use crate::model::SelectionState;

/// Asks the shell for the options of one level.
#[derive(Clone)]
pub struct LocationData<E> {
    context: CapabilityContext<FetchRequest, E>,
}

impl<Ev> Capability<Ev> for LocationData<Ev> {
    type Operation = FetchRequest;
    type MappedSelf<MappedEv> = LocationData<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        LocationData::new(self.context.map_event(f))
    }
}

impl<E> LocationData<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<FetchRequest, E>) -> Self {
        Self { context }
    }

    /// Sends `request` to the shell; the answer comes back as the event
    /// built by `make_event`.
    pub fn fetch<F>(&self, request: FetchRequest, make_event: F)
    where
        F: FnOnce(FetchResult) -> E + Send + 'static,
    {
        let context = self.context.clone();
        self.context.spawn(async move {
            let result = context.request_from_shell(request).await;
            context.update_app(make_event(result));
        });
    }
}

#[derive(Debug, Clone, Hash, Serialize, Deserialize, PartialEq, Eq)]
pub enum FetchRequest {
    Countries,
    States {
        country: String,
    },
    Districts {
        country: String,
        state: String,
    },
    Cities {
        country: String,
        state: String,
        district: String,
    },
}

pub type FetchResult = Result<Vec<String>, FetchError>;

impl Operation for FetchRequest {
    type Output = FetchResult;
}

impl FetchRequest {
    /// The request that populates `target` under the current selection.
    pub fn for_level(target: Level, selection: &SelectionState) -> Self {
        let country = || selection.get(Level::Country).to_string();
        let state = || selection.get(Level::State).to_string();
        match target {
            Level::Country => Self::Countries,
            Level::State => Self::States { country: country() },
            Level::District => Self::Districts {
                country: country(),
                state: state(),
            },
            Level::City => Self::Cities {
                country: country(),
                state: state(),
                district: selection.get(Level::District).to_string(),
            },
        }
    }

    pub fn target(&self) -> Level {
        match self {
            Self::Countries => Level::Country,
            Self::States { .. } => Level::State,
            Self::Districts { .. } => Level::District,
            Self::Cities { .. } => Level::City,
        }
    }
}
