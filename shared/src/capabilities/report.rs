use crux_core::capability::{Capability, CapabilityContext, Operation};
use serde::{Deserialize, Serialize};

use super::source::FetchError;
use crate::level::Level;
use crate::model::LocationSelection;

/// Fire-and-forget notices for whoever consumes the selector's outcomes.
#[derive(Clone)]
pub struct Report<E> {
    context: CapabilityContext<ReportOperation, E>,
}

impl<Ev> Capability<Ev> for Report<Ev> {
    type Operation = ReportOperation;
    type MappedSelf<MappedEv> = Report<MappedEv>;

    fn map_event<F, NewEv>(&self, f: F) -> Self::MappedSelf<NewEv>
    where
        F: Fn(NewEv) -> Ev + Send + Sync + 'static,
        Ev: 'static,
        NewEv: 'static + Send,
    {
        Report::new(self.context.map_event(f))
    }
}

impl<E> Report<E>
where
    E: Send + 'static,
{
    pub fn new(context: CapabilityContext<ReportOperation, E>) -> Self {
        Self { context }
    }

    /// An accepted submission, as it was before the form reset.
    pub fn submitted(&self, selection: LocationSelection) {
        self.notify(ReportOperation::Submitted(selection));
    }

    /// A current fetch for `level` failed.
    pub fn fetch_failed(&self, level: Level, error: FetchError) {
        self.notify(ReportOperation::FetchFailed { level, error });
    }

    fn notify(&self, operation: ReportOperation) {
        let context = self.context.clone();
        self.context.spawn(async move {
            context.notify_shell(operation).await;
        });
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ReportOperation {
    Submitted(LocationSelection),
    FetchFailed { level: Level, error: FetchError },
}

impl Operation for ReportOperation {
    type Output = ();
}
