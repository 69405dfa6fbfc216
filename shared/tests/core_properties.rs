use crux_core::testing::AppTester;
use crux_core::Request;
use location_core::{App, Effect, Event, FetchError, FetchRequest, Level, Model};
use proptest::prelude::*;

type Tester = AppTester<App, Effect>;

/// Every parent has three children named after it, so any reachable
/// selection has options at the next level.
fn answer(request: &FetchRequest) -> Result<Vec<String>, FetchError> {
    let parent = match request {
        FetchRequest::Countries => "c".to_string(),
        FetchRequest::States { country } => country.clone(),
        FetchRequest::Districts { state, .. } => state.clone(),
        FetchRequest::Cities { district, .. } => district.clone(),
    };
    if parent.is_empty() {
        return Ok(Vec::new());
    }
    Ok((0..3).map(|i| format!("{parent}.{i}")).collect())
}

fn fetches(effects: Vec<Effect>) -> Vec<Request<FetchRequest>> {
    effects
        .into_iter()
        .filter_map(|effect| match effect {
            Effect::LocationData(request) => Some(request),
            _ => None,
        })
        .collect()
}

fn report_count(effects: &[Effect]) -> usize {
    effects
        .iter()
        .filter(|effect| matches!(effect, Effect::Report(_)))
        .count()
}

/// Answers `request` with `result` and applies the events that come back.
fn settle(
    app: &Tester,
    model: &mut Model,
    mut request: Request<FetchRequest>,
    result: Result<Vec<String>, FetchError>,
) -> Vec<Effect> {
    let update = app.resolve(&mut request, result).expect("fetch resolves");
    let mut effects = update.effects;
    for event in update.events {
        effects.extend(app.update(event, model).effects);
    }
    effects
}

fn booted() -> (Tester, Model) {
    let app = Tester::default();
    let mut model = Model::default();
    for request in fetches(app.update(Event::Initialize, &mut model).effects) {
        let result = answer(&request.operation);
        settle(&app, &mut model, request, result);
    }
    (app, model)
}

#[derive(Debug, Clone)]
enum Step {
    Pick(Level, usize),
    Clear(Level),
    Fail(Level, usize),
}

fn step() -> impl Strategy<Value = Step> {
    let level = prop::sample::select(Level::ALL.to_vec());
    prop_oneof![
        4 => (level.clone(), 0usize..3).prop_map(|(l, i)| Step::Pick(l, i)),
        1 => level.clone().prop_map(Step::Clear),
        1 => (level, 0usize..3).prop_map(|(l, i)| Step::Fail(l, i)),
    ]
}

proptest! {
    #[test]
    fn loading_brackets_every_fetch(steps in prop::collection::vec(step(), 1..30)) {
        let (app, mut model) = booted();
        for step in steps {
            let (level, value, fail) = match step {
                Step::Pick(level, i) | Step::Fail(level, i) => {
                    let value = model.options.get(level).get(i).cloned().unwrap_or_default();
                    (level, value, matches!(step, Step::Fail(..)))
                }
                Step::Clear(level) => (level, String::new(), false),
            };

            let update = app.update(Event::Select { level, value }, &mut model);
            for request in fetches(update.effects) {
                let target = request.operation.target();
                prop_assert!(model.is_loading());
                prop_assert!(app.view(&model).loading);
                prop_assert!(model.options.get(target).is_empty());

                let result = if fail {
                    Err(FetchError::network("down"))
                } else {
                    answer(&request.operation)
                };
                let expect_empty = !matches!(&result, Ok(options) if !options.is_empty());
                let follow_up = settle(&app, &mut model, request, result);
                prop_assert!(!model.is_loading());
                prop_assert_eq!(report_count(&follow_up), usize::from(fail));
                prop_assert_eq!(model.options.get(target).is_empty(), expect_empty);
            }

            for below in level.below() {
                prop_assert!(!model.selection.is_selected(*below));
            }
            if let Some(grandchild) = level.child().and_then(Level::child) {
                prop_assert!(model.options.get(grandchild).is_empty());
            }
            prop_assert!(model.selection.is_consistent());
        }
    }

    #[test]
    fn city_selection_never_touches_options(pick in 0usize..3) {
        let (app, mut model) = booted();
        for level in [Level::Country, Level::State, Level::District] {
            let value = model.options.get(level)[0].clone();
            let update = app.update(Event::Select { level, value }, &mut model);
            for request in fetches(update.effects) {
                let result = answer(&request.operation);
                settle(&app, &mut model, request, result);
            }
        }
        let options = model.options.clone();
        let city = options.get(Level::City)[pick].clone();

        let update = app.update(Event::Select { level: Level::City, value: city.clone() }, &mut model);
        prop_assert!(fetches(update.effects).is_empty());
        prop_assert_eq!(&model.options, &options);
        prop_assert_eq!(model.selection.get(Level::City), city.as_str());
        prop_assert!(!model.is_loading());
    }
}
