use std::collections::VecDeque;
use std::sync::Arc;

use crux_core::Core;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument};

use crate::app::App;
use crate::capabilities::{
    fetch_options, Capabilities, Effect, LocationDataSource, ReportOperation, SelectorObserver, TracingObserver,
};
use crate::config::{ConfigError, SelectorConfig};
use crate::event::{Event, SubmitOutcome};
use crate::level::Level;
use crate::model::{ValidationErrors, ViewModel};

/// Async shell around the selector [`App`].
///
/// Fetch requests are answered from a [`LocationDataSource`] and reports are
/// handed to a [`SelectorObserver`]. The core lock is held only while an
/// event or answer is processed, never across a data-source call, so
/// overlapping operations interleave and the core's ticket checks decide
/// which results land.
pub struct LocationSelector<S> {
    core: Mutex<Core<Effect, App>>,
    source: Arc<S>,
    observer: Arc<dyn SelectorObserver>,
}

impl<S: LocationDataSource> LocationSelector<S> {
    pub fn new(source: Arc<S>, config: SelectorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let core = Core::new::<Capabilities>();
        // configuring only renders
        let _ = core.process_event(Event::Configure(config));
        Ok(Self {
            core: Mutex::new(core),
            source,
            observer: Arc::new(TracingObserver),
        })
    }

    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn SelectorObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    #[instrument(skip(self))]
    pub async fn initialize(&self) {
        self.dispatch(Event::Initialize).await;
    }

    /// Selects `value` at `level` and waits for the options of the level
    /// below. Fetch failures are reported to the observer, never returned.
    #[instrument(skip(self, value), fields(value = tracing::field::Empty))]
    pub async fn select_level(&self, level: Level, value: impl Into<String>) {
        let value = value.into();
        tracing::Span::current().record("value", value.as_str());
        self.dispatch(Event::Select { level, value }).await;
    }

    pub async fn select_city(&self, value: impl Into<String>) {
        self.dispatch(Event::SelectCity {
            value: value.into(),
        })
        .await;
    }

    /// Recomputes the field errors and returns them; empty means valid.
    pub async fn validate(&self) -> ValidationErrors {
        self.dispatch(Event::Validate).await;
        self.view().await.errors()
    }

    #[instrument(skip(self))]
    pub async fn submit(&self) -> SubmitOutcome {
        let reports = self.dispatch(Event::Submit).await;
        let accepted = reports.into_iter().find_map(|report| match report {
            ReportOperation::Submitted(selection) => Some(selection),
            ReportOperation::FetchFailed { .. } => None,
        });
        match accepted {
            Some(selection) => {
                info!("submission accepted");
                SubmitOutcome::Accepted(selection)
            }
            None => SubmitOutcome::Rejected(self.view().await.errors()),
        }
    }

    pub async fn close_dialog(&self) {
        self.dispatch(Event::CloseDialog).await;
    }

    pub async fn view(&self) -> ViewModel {
        self.core.lock().await.view()
    }

    /// Processes `event` and carries out every effect it produces, including
    /// the follow-ups of answered fetches. Returns the reports raised on the
    /// way, after they have been handed to the observer.
    async fn dispatch(&self, event: Event) -> Vec<ReportOperation> {
        let effects = self.core.lock().await.process_event(event);
        self.run(effects).await
    }

    async fn run(&self, effects: Vec<Effect>) -> Vec<ReportOperation> {
        let mut queue = VecDeque::from(effects);
        let mut reports = Vec::new();
        while let Some(effect) = queue.pop_front() {
            match effect {
                Effect::Render(_) => {}
                Effect::LocationData(mut request) => {
                    debug!(target_level = %request.operation.target(), "fetching options");
                    let result = fetch_options(self.source.as_ref(), &request.operation).await;
                    let follow_up = self.core.lock().await.resolve(&mut request, result);
                    queue.extend(follow_up);
                }
                Effect::Report(request) => {
                    let report = request.operation.clone();
                    match &report {
                        ReportOperation::Submitted(selection) => self.observer.on_submit(selection),
                        ReportOperation::FetchFailed { level, error } => {
                            self.observer.on_fetch_error(*level, error);
                        }
                    }
                    reports.push(report);
                }
            }
        }
        reports
    }
}
