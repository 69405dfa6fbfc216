//! The cascading selection state machine.
//!
//! `update` performs no I/O. Option lists are requested through the
//! `LocationData` capability and come back as `Event::OptionsLoaded` carrying
//! the ticket they were issued with, which is how stale and unknown answers
//! are recognised and dropped.

use tracing::debug;

use crate::capabilities::{Capabilities, FetchRequest, FetchResult};
use crate::event::{Event, FetchTicket};
use crate::level::Level;
use crate::model::{DialogView, FieldView, LocationSelection, Model, ViewModel};

#[derive(Default)]
pub struct App;

impl crux_core::App for App {
    type Event = Event;
    type Model = Model;
    type ViewModel = ViewModel;
    type Capabilities = Capabilities;

    fn update(&self, event: Event, model: &mut Model, caps: &Capabilities) {
        match event {
            Event::Configure(config) => model.config = config,
            Event::Initialize => self.issue(model, caps, Level::Country),
            Event::Select { level, value } => self.select(model, caps, level, value),
            Event::SelectCity { value } => self.select_city(model, value),
            Event::Validate => {
                self.validate(model);
            }
            Event::Submit => self.submit(model, caps),
            Event::CloseDialog => model.dialog_open = false,
            Event::OptionsLoaded { ticket, result } => self.resolve(model, caps, ticket, result),
        }
        caps.render.render();
    }

    fn view(&self, model: &Model) -> ViewModel {
        let fields = Level::ALL
            .into_iter()
            .map(|level| FieldView {
                level,
                label: level.label().to_string(),
                hint: level.hint().to_string(),
                value: model.selection.get(level).to_string(),
                options: model.options.get(level).to_vec(),
                error: model.errors.get(level).map(str::to_string),
                enabled: parent_selected(model, level),
            })
            .collect();

        ViewModel {
            fields,
            loading: model.is_loading(),
            dialog: model.dialog_open.then(|| DialogView {
                title: model.config.dialog_title.clone(),
            }),
        }
    }
}

impl App {
    /// Selects `value` at `level`, invalidating everything below it and
    /// requesting options for the next level down.
    fn select(&self, model: &mut Model, caps: &Capabilities, level: Level, value: String) {
        let Some(child) = level.child() else {
            self.select_city(model, value);
            return;
        };

        let unselecting = value.is_empty();
        if !unselecting && !parent_selected(model, level) {
            debug!(%level, "ignoring selection below an unselected level");
            return;
        }

        debug!(%level, %value, "selection changed");
        model.selection.select(level, value);
        model.errors.clear(level);
        model.options.clear_below(level);

        if unselecting && !model.config.fetch_on_empty_selection {
            // nothing to fetch; outstanding results for `child` are now stale
            model.seq[child.index()] += 1;
            return;
        }
        self.issue(model, caps, child);
    }

    fn select_city(&self, model: &mut Model, value: String) {
        if !value.is_empty() && !parent_selected(model, Level::City) {
            debug!("ignoring city without a district");
            return;
        }
        model.selection.select(Level::City, value);
        model.errors.clear(Level::City);
    }

    /// Recomputes every field error. Returns `true` when submission may
    /// proceed.
    fn validate(&self, model: &mut Model) -> bool {
        model
            .config
            .rules
            .validate(&model.selection, &mut model.errors)
    }

    fn submit(&self, model: &mut Model, caps: &Capabilities) {
        if !self.validate(model) {
            debug!(errors = model.errors.len(), "submission rejected");
            return;
        }

        let accepted = LocationSelection::from(&model.selection);
        model.dialog_open = true;
        model.selection.clear();
        model.options.clear();
        // anything still in flight belongs to the form we just reset
        for seq in &mut model.seq {
            *seq += 1;
        }

        caps.report.submitted(accepted);
        if model.config.reload_countries_after_submit {
            self.issue(model, caps, Level::Country);
        }
    }

    /// Applies the outcome of a fetch issued under `ticket`.
    fn resolve(
        &self,
        model: &mut Model,
        caps: &Capabilities,
        ticket: FetchTicket,
        result: FetchResult,
    ) {
        let target = ticket.target;
        if !model.pending.remove(&(target, ticket.seq)) {
            debug!(%target, seq = ticket.seq, "ignoring options for a fetch that is not outstanding");
            return;
        }
        if !is_current(model, &ticket) {
            debug!(%target, seq = ticket.seq, "discarding stale options");
            return;
        }

        match result {
            Ok(options) => {
                debug!(%target, count = options.len(), "options loaded");
                model.options.set(target, options);
            }
            Err(error) => {
                model.options.set(target, Vec::new());
                caps.report.fetch_failed(target, error);
            }
        }
    }

    fn issue(&self, model: &mut Model, caps: &Capabilities, target: Level) {
        let index = target.index();
        model.seq[index] += 1;
        let ticket = FetchTicket {
            target,
            seq: model.seq[index],
            parents: model.selection.parents_of(target),
        };
        model.pending.insert((target, ticket.seq));

        let request = FetchRequest::for_level(target, &model.selection);
        debug!(%target, seq = ticket.seq, "requesting options");
        caps.location_data
            .fetch(request, move |result| Event::OptionsLoaded { ticket, result });
    }
}

fn parent_selected(model: &Model, level: Level) -> bool {
    match level.parent() {
        Some(parent) => model.selection.is_selected(parent),
        None => true,
    }
}

fn is_current(model: &Model, ticket: &FetchTicket) -> bool {
    model.seq[ticket.target.index()] == ticket.seq
        && model.selection.parents_of(ticket.target) == ticket.parents
}
