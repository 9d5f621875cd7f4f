//! Focused unit tests covering CLI configuration and input validation.

use super::helpers::{TRAILS_JSON, Workspace};
use super::*;
use camino::Utf8PathBuf;
use crate::classify::{ClassifyArgs, ClassifyConfig};
use crate::recommend::{RecommendArgs, RecommendConfig, config_from_layers_for_test};
use ortho_config::MergeComposer;
use rstest::rstest;
use serde_json::json;

#[rstest]
#[case(None, Some("request.json"), ARG_TRAILS, ENV_RECOMMEND_TRAILS)]
#[case(Some("trails.json"), None, ARG_REQUEST, ENV_RECOMMEND_REQUEST)]
fn recommend_requires_trails_and_request(
    #[case] trails: Option<&str>,
    #[case] request: Option<&str>,
    #[case] field: &'static str,
    #[case] env_var: &'static str,
) {
    let args = RecommendArgs {
        trails: trails.map(Utf8PathBuf::from),
        request: request.map(Utf8PathBuf::from),
        ..RecommendArgs::default()
    };
    let err = RecommendConfig::try_from(args).expect_err("missing field should error");
    assert!(
        matches!(err, CliError::MissingArgument { field: f, env } if f == field && env == env_var),
        "unexpected error {err:?}"
    );
}

#[rstest]
fn classify_requires_activities() {
    let args = ClassifyArgs {
        trails: Some(Utf8PathBuf::from("trails.json")),
        activities: None,
    };
    let err = ClassifyConfig::try_from(args).expect_err("missing activities");
    assert!(matches!(
        err,
        CliError::MissingArgument {
            field: ARG_ACTIVITIES,
            env: ENV_CLASSIFY_ACTIVITIES,
        }
    ));
}

#[rstest]
fn blank_weather_urls_mean_offline() {
    let args = RecommendArgs {
        trails: Some(Utf8PathBuf::from("trails.json")),
        request: Some(Utf8PathBuf::from("request.json")),
        weather_base_url: Some("  ".to_owned()),
        ..RecommendArgs::default()
    };
    let config = RecommendConfig::try_from(args).expect("config builds");
    assert_eq!(config.weather_base_url, None);
}

#[rstest]
fn validate_sources_reports_missing_and_directory_inputs() {
    let workspace = Workspace::new();
    let trails = workspace.write("trails.json", TRAILS_JSON);
    let config = RecommendConfig {
        trails: trails.clone(),
        rules: None,
        request: workspace.root.join("absent.json"),
        activities: None,
        weather_base_url: None,
        max_level: None,
    };
    let err = config.validate_sources().expect_err("missing request");
    assert!(matches!(err, CliError::MissingSourceFile { field: ARG_REQUEST, .. }));

    let config = RecommendConfig {
        request: trails,
        rules: Some(workspace.root.clone()),
        ..config
    };
    let err = config.validate_sources().expect_err("rules is a directory");
    assert!(matches!(err, CliError::SourcePathNotFile { field: ARG_RULES, .. }));
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "trails": 42 }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    assert!(matches!(err, CliError::Configuration(_)), "{err:?}");
}

#[rstest]
fn merge_layers_honours_precedence() {
    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "trails": "from-file/trails.json",
            "weather_base_url": "http://from-file:8080",
            "max_level": 3,
        }),
        None,
    );
    composer.push_environment(json!({
        "request": "from-env/request.json",
        "trails": "from-env/trails.json",
    }));
    composer.push_cli(json!({ "trails": "from-cli/trails.json" }));

    let config =
        config_from_layers_for_test(composer.layers()).expect("merged config should build");
    assert_eq!(config.trails, Utf8PathBuf::from("from-cli/trails.json"));
    assert_eq!(config.request, Utf8PathBuf::from("from-env/request.json"));
    assert_eq!(config.weather_base_url.as_deref(), Some("http://from-file:8080"));
    assert_eq!(config.max_level, Some(3));
}

#[rstest]
#[case("trails.db", true)]
#[case("trails.sqlite", true)]
#[case("trails.json", false)]
#[case("trails", false)]
fn sqlite_catalogues_are_recognised_by_extension(#[case] path: &str, #[case] expected: bool) {
    assert_eq!(is_sqlite_path(Utf8Path::new(path)), expected);
}

#[rstest]
fn json_catalogues_load_into_memory() {
    let workspace = Workspace::new();
    let path = workspace.write("trails.json", TRAILS_JSON);
    let store = open_trail_store(&path).expect("store opens");
    let trail = store.get(2).expect("lookup succeeds").expect("trail exists");
    assert_eq!(trail.name, "Steep climb");
}

#[rstest]
fn json_output_ends_with_a_newline() {
    let mut buffer = Vec::new();
    write_json(&mut buffer, &json!({ "ok": true })).expect("write succeeds");
    let text = String::from_utf8(buffer).expect("utf-8 output");
    assert!(text.ends_with("}\n"));
}
