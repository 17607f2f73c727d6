//! Backend accessors exercised against the in-process stub server.

mod common;

use nutriguard_sdk::models::{ActivityLevel, GoalKind, MacroPlanInput, Profile, Sex, UserTargets, WeeklyStatus};
use nutriguard_sdk::{config, GoalTargets, KeyValueStore, NutriGuardError};

const WEEKLY: &str = r#"{"weekly_status": [
    {"day": "2026-10-13", "day_name": "Tue", "status": "achieved"},
    {"day": "2026-10-14", "day_name": "Wed", "status": "not_achieved"},
    {"day": "2026-10-15", "day_name": "Thu", "status": "pending"},
    {"day": "2026-10-16", "day_name": "Fri", "status": "no_data"}
]}"#;

const PLAN: &str = r#"{"calories": 2100, "protein": 110, "fat": 70, "carbs": 240,
    "maxSugar": 25, "fiberTarget": 30, "bmr": 1500, "tdee": 2300}"#;

fn plan_input() -> MacroPlanInput {
    MacroPlanInput {
        weight_kg: 70.0,
        height_cm: 170.0,
        age: 30,
        sex: Sex::Male,
        goal: GoalKind::Lose,
        activity_level: ActivityLevel::Moderate,
        is_diabetic: false,
    }
}

// ---------------------------------------------------------------------------
// weekly status
// ---------------------------------------------------------------------------

#[test]
fn weekly_status_maps_unknown_values_to_no_data() {
    let server = common::StubServer::start(&[("GET", "/metrics/weekly-status", 200, WEEKLY)]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    let token = common::log_in(&sdk);

    let days = sdk.metrics().weekly_status().unwrap();
    assert_eq!(days.len(), 4);
    assert_eq!(days[0].status, WeeklyStatus::Achieved);
    assert_eq!(days[0].day_name, "Tue");
    assert_eq!(days[1].status, WeeklyStatus::NotAchieved);
    assert_eq!(days[2].status, WeeklyStatus::NoData);
    assert_eq!(days[3].status, WeeklyStatus::NoData);

    let reqs = server.requests_to("/metrics/weekly-status");
    let expected_auth = format!("Bearer {}", token);
    assert_eq!(reqs[0].header("authorization"), Some(expected_auth.as_str()));
}

#[test]
fn weekly_status_requires_login() {
    let server = common::StubServer::start(&[("GET", "/metrics/weekly-status", 200, WEEKLY)]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);

    let err = sdk.metrics().weekly_status().unwrap_err();
    assert!(matches!(err, NutriGuardError::NotLoggedIn));
    assert!(server.requests().is_empty());
}

#[test]
fn weekly_status_surfaces_http_errors() {
    let server = common::StubServer::start(&[("GET", "/metrics/weekly-status", 401, "expired")]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    match sdk.metrics().weekly_status().unwrap_err() {
        NutriGuardError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "expired");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn weekly_status_rejects_non_json_body() {
    let server = common::StubServer::start(&[("GET", "/metrics/weekly-status", 200, "<html>")]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let err = sdk.metrics().weekly_status().unwrap_err();
    assert!(matches!(err, NutriGuardError::Json(_)));
    assert!(!err.is_remote());
}

#[test]
fn unreachable_backend_is_a_remote_error() {
    let (sdk, _tmp) = common::setup_sdk(common::UNREACHABLE_URL);
    common::log_in(&sdk);

    let err = sdk.metrics().weekly_status().unwrap_err();
    assert!(err.is_remote());
}

#[test]
fn save_day_posts_explicit_day() {
    let server = common::StubServer::start(&[("POST", "/metrics/save", 200, r#"{"saved":true}"#)]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let items = common::sample_scan();
    let totals = nutriguard_sdk::ledger::scan_totals(&items);
    let ack = sdk.metrics().save_day("2026-10-01", &items, &totals).unwrap();
    assert_eq!(ack["saved"], true);

    let body = server.requests_to("/metrics/save")[0].json();
    assert_eq!(body["day"], "2026-10-01");
    assert_eq!(body["nutrition"]["items"][1]["name"], "egg");
}

// ---------------------------------------------------------------------------
// targets
// ---------------------------------------------------------------------------

#[test]
fn goals_prefer_local_record() {
    let server = common::StubServer::start(&[]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);
    sdk.targets()
        .save_local(&UserTargets {
            calories: 1800.0,
            protein: 100.0,
            fat: 60.0,
            carbs: 180.0,
            max_sugar: 20.0,
            fiber_target: Some(30.0),
        })
        .unwrap();

    let goals = sdk.targets().goals();
    assert_eq!(goals.calorie_goal, 1800.0);
    assert_eq!(goals.sugar_goal, 20.0);
    assert!(server.requests().is_empty());
}

#[test]
fn goals_fall_back_to_backend_and_cache_locally() {
    let server = common::StubServer::start(&[(
        "GET",
        "/user/targets",
        200,
        r#"{"calories": 2400, "protein": 150, "fat": 80, "carbs": 260, "maxSugar": 40}"#,
    )]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let goals = sdk.targets().goals();
    assert_eq!(goals.calorie_goal, 2400.0);
    assert_eq!(goals.fiber_goal, 25.0);

    let cached = sdk.targets().local().unwrap();
    assert_eq!(cached.protein, 150.0);

    // Second lookup is served locally.
    sdk.targets().goals();
    assert_eq!(server.requests_to("/user/targets").len(), 1);
}

#[test]
fn goals_tolerate_null_fields_from_backend() {
    let server = common::StubServer::start(&[(
        "GET",
        "/user/targets",
        200,
        r#"{"calories": 2400, "protein": null, "fat": 80, "carbs": "260", "maxSugar": 40, "fiberTarget": null}"#,
    )]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let goals = sdk.targets().goals();
    assert_eq!(goals.calorie_goal, 2400.0);
    assert_eq!(goals.protein_goal, 0.0);
    assert_eq!(goals.carbs_goal, 260.0);
    assert_eq!(goals.fiber_goal, 25.0);
}

#[test]
fn goals_default_when_backend_has_none() {
    let server = common::StubServer::start(&[("GET", "/user/targets", 404, r#"{"detail":"none"}"#)]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    assert_eq!(sdk.targets().fetch_remote().unwrap(), None);
    assert_eq!(sdk.targets().goals(), GoalTargets::default());
    assert!(sdk.targets().local().is_none());
}

#[test]
fn goals_default_when_logged_out_or_failing() {
    let (sdk, _tmp) = common::setup_sdk(common::UNREACHABLE_URL);
    assert_eq!(sdk.targets().goals(), GoalTargets::default());

    common::log_in(&sdk);
    assert_eq!(sdk.targets().goals(), GoalTargets::default());
}

#[test]
fn unparsable_local_targets_are_ignored() {
    let (sdk, _tmp) = common::setup_offline_sdk();
    sdk.context()
        .store
        .set(config::KEY_DAILY_TARGET, "[1,2,3]")
        .unwrap();
    assert!(sdk.targets().local().is_none());
    assert_eq!(sdk.targets().goals(), GoalTargets::default());
}

#[test]
fn plan_persists_targets_locally_and_remotely() {
    let server = common::StubServer::start(&[
        ("POST", "/macro-plan", 200, PLAN),
        ("POST", "/user/targets", 200, r#"{"ok":true}"#),
    ]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let plan = sdk.targets().plan(&plan_input()).unwrap();
    assert_eq!(plan.bmr, 1500.0);
    assert_eq!(plan.tdee, 2300.0);

    let plan_req = &server.requests_to("/macro-plan")[0];
    assert_eq!(plan_req.header("authorization"), None);
    assert_eq!(plan_req.json()["activityLevel"], "moderate");

    let saved = server.requests_to("/user/targets");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].json()["maxSugar"], 25.0);
    assert_eq!(saved[0].json()["fiberTarget"], 30.0);

    let goals = sdk.targets().goals();
    assert_eq!(goals.calorie_goal, 2100.0);
    assert_eq!(goals.fiber_goal, 30.0);
}

#[test]
fn plan_survives_failed_target_upload() {
    let server = common::StubServer::start(&[
        ("POST", "/macro-plan", 200, PLAN),
        ("POST", "/user/targets", 503, "down"),
    ]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    sdk.targets().plan(&plan_input()).unwrap();
    assert_eq!(sdk.targets().local().unwrap().calories, 2100.0);
}

#[test]
fn plan_without_login_stays_local() {
    let server = common::StubServer::start(&[("POST", "/macro-plan", 200, PLAN)]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);

    sdk.targets().plan(&plan_input()).unwrap();
    assert!(server.requests_to("/user/targets").is_empty());
    assert_eq!(sdk.targets().local().unwrap().protein, 110.0);
}

#[test]
fn plan_rejects_invalid_input_before_calling_backend() {
    let server = common::StubServer::start(&[("POST", "/macro-plan", 200, PLAN)]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);

    let mut input = plan_input();
    input.height_cm = -1.0;
    let err = sdk.targets().plan(&input).unwrap_err();
    assert!(matches!(err, NutriGuardError::InvalidArgument(_)));
    assert!(server.requests().is_empty());
}

#[test]
fn plan_error_message_from_backend() {
    let server = common::StubServer::start(&[("POST", "/macro-plan", 422, "bad sex")]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);

    let err = sdk.targets().plan(&plan_input()).unwrap_err();
    assert!(err.to_string().contains("bad sex"));
    assert!(sdk.targets().local().is_none());
}

// ---------------------------------------------------------------------------
// profile
// ---------------------------------------------------------------------------

#[test]
fn profile_get_and_bmi() {
    let server = common::StubServer::start(&[(
        "GET",
        "/user/profile",
        200,
        r#"{"name": "Alice", "height": 170, "weight": "70", "age": 30, "gender": "Female", "is_diabetic": false}"#,
    )]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let profile = sdk.profile().get().unwrap();
    assert_eq!(profile.name.as_deref(), Some("Alice"));
    assert_eq!(profile.is_diabetic, Some(false));
    assert_eq!(sdk.profile().bmi().unwrap(), Some(24.2));
}

#[test]
fn profile_save_sends_only_present_fields() {
    let server = common::StubServer::start(&[("POST", "/user/profile", 200, "{}")]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    let update = Profile {
        height: Some(182.0),
        gender: Some("Male".into()),
        ..Profile::default()
    };
    sdk.profile().save(&update).unwrap();

    let body = server.requests_to("/user/profile")[0].json();
    assert_eq!(body, serde_json::json!({"height": 182.0, "gender": "Male"}));
}

#[test]
fn missing_profile_is_not_found() {
    let server = common::StubServer::start(&[]);
    let (sdk, _tmp) = common::setup_sdk(&server.base_url);
    common::log_in(&sdk);

    match sdk.profile().get().unwrap_err() {
        NutriGuardError::NotFound(path) => assert_eq!(path, "user/profile"),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(sdk.profile().get().unwrap_err().is_remote());
}

#[test]
fn profile_requires_login() {
    let (sdk, _tmp) = common::setup_offline_sdk();
    assert!(matches!(sdk.profile().get().unwrap_err(), NutriGuardError::NotLoggedIn));
}
