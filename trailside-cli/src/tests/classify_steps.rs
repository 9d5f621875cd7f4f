//! Behaviour-driven step definitions driving the classify CLI scenarios.

use super::helpers::{CASUAL_ACTIVITIES_JSON, CASUAL_TRAILS_JSON, Workspace};
use super::*;
use crate::classify::run_classify_with;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use std::cell::RefCell;

struct ClassifyWorld {
    workspace: Workspace,
    stdout: RefCell<Vec<u8>>,
    result: RefCell<Option<Result<(), CliError>>>,
}

impl ClassifyWorld {
    fn output(&self) -> Value {
        let stdout = String::from_utf8(self.stdout.borrow().clone()).expect("stdout utf-8");
        serde_json::from_str(&stdout).expect("output should be JSON")
    }
}

#[fixture]
fn world() -> ClassifyWorld {
    ClassifyWorld {
        workspace: Workspace::new(),
        stdout: RefCell::new(Vec::new()),
        result: RefCell::new(None),
    }
}

#[given("a catalogue of short, easy trails")]
fn casual_catalogue(#[from(world)] world: &ClassifyWorld) {
    world.workspace.write("trails.json", CASUAL_TRAILS_JSON);
}

#[given("three completed activities on those trails")]
fn three_activities(#[from(world)] world: &ClassifyWorld) {
    world
        .workspace
        .write("activities.json", CASUAL_ACTIVITIES_JSON);
}

#[given("one completed activity")]
fn one_activity(#[from(world)] world: &ClassifyWorld) {
    world.workspace.write(
        "activities.json",
        r#"[{"trail_id": 11, "completed_on": "2024-05-01"}]"#,
    );
}

#[when("I run the classify command")]
fn run_classify_command(#[from(world)] world: &ClassifyWorld) {
    let root = &world.workspace.root;
    let invocation = [
        "trailside".to_owned(),
        "classify".to_owned(),
        format!("--{ARG_TRAILS}"),
        root.join("trails.json").into_string(),
        format!("--{ARG_ACTIVITIES}"),
        root.join("activities.json").into_string(),
    ];
    let parsed = Cli::try_parse_from(invocation).map_err(CliError::from);
    let outcome = parsed.and_then(|cli| match cli.command {
        Command::Classify(args) => {
            let mut buffer = world.stdout.borrow_mut();
            run_classify_with(args, &mut *buffer)
        }
        Command::Recommend(_) => panic!("expected classify command"),
    });
    world.result.replace(Some(outcome));
}

#[then("the command succeeds")]
fn command_succeeds(#[from(world)] world: &ClassifyWorld) {
    let borrowed = world.result.borrow();
    let result = borrowed.as_ref().expect("result recorded");
    assert!(result.is_ok(), "expected success, found {result:?}");
}

#[then("the archetype is \"casual\" from 3 hikes")]
fn casual_archetype(#[from(world)] world: &ClassifyWorld) {
    let output = world.output();
    assert_eq!(output["archetype"], "casual");
    assert_eq!(output["hikes"], 3);
    assert_eq!(
        output["scores"].as_object().map(serde_json::Map::len),
        Some(7)
    );
}

#[then("no archetype is reported")]
fn no_archetype(#[from(world)] world: &ClassifyWorld) {
    let output = world.output();
    assert!(output["archetype"].is_null());
    assert_eq!(output["hikes"], 0);
}

#[scenario(path = "tests/features/classify_command.feature", index = 0)]
fn casual_history_is_classified(world: ClassifyWorld) {
    let _ = world;
}

#[scenario(path = "tests/features/classify_command.feature", index = 1)]
fn short_history_is_not_classified(world: ClassifyWorld) {
    let _ = world;
}
