use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};
use shared::models::*;
use crate::{
    config::AppConfig,
    controller::Controller,
    error::{ApiError, StoreError},
    session::{Login, Session, SessionTable},
    store::{LoginStore, VoteLedger, VoteRecord},
};

const CONFIG: &str = r#"{
    "project_names": ["Garden", "Library"],
    "points": 10,
    "admin": "boss",
    "logins": {
        "alpha": ["Alice", false],
        "bravo": ["Bob", false],
        "charlie": ["Carol", true]
    }
}"#;

fn fixture(config: &str) -> (TempDir, AppConfig) {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("config.json"), config).expect("write config");
    let paths = AppConfig::in_dir(dir.path());
    (dir, paths)
}

fn open() -> (TempDir, AppConfig, Controller) {
    let (dir, paths) = fixture(CONFIG);
    let controller = Controller::open(&paths).expect("open controller");
    (dir, paths, controller)
}

fn logged_in(controller: &Controller, code: &str) -> Session {
    let mut session = Session::default();
    controller.login(&mut session, code).expect("login");
    session
}

fn vote(controller: &Controller, code: &str, points: [u32; 2]) -> SessionView {
    let mut session = logged_in(controller, code);
    controller.change_allocation(&mut session, 0, points[0]).expect("slider 0");
    controller.change_allocation(&mut session, 1, points[1]).expect("slider 1");
    controller.submit(&mut session).expect("submit")
}

fn ledger_rows(path: &Path) -> Vec<Vec<u32>> {
    VoteLedger::new(path).read().expect("read ledger").map(|c| c.rows).unwrap_or_default()
}

#[test]
fn seeds_login_file_with_results_viewer() {
    let (_dir, paths, _controller) = open();
    let logins = LoginStore::new(&paths.logins_file).load().expect("logins");
    assert_eq!(logins.len(), 4);
    assert_eq!(logins[RESULTS_ONLY_CODE], LoginEntry::results_viewer());
    assert!(!logins.contains_key("boss"));
}

#[test]
fn existing_login_file_is_not_reseeded() {
    let (_dir, paths) = fixture(CONFIG);
    fs::write(&paths.logins_file, r#"{"alpha": ["Alice", true]}"#).expect("write logins");
    let _controller = Controller::open(&paths).expect("open");

    let logins = LoginStore::new(&paths.logins_file).load().expect("logins");
    assert!(logins["alpha"].has_voted);
    assert!(!logins.contains_key("bravo"));
}

#[test]
fn rejects_invalid_config() {
    let (_dir, paths) = fixture(r#"{"project_names": [], "points": 10, "logins": {}}"#);
    assert!(matches!(Controller::open(&paths), Err(StoreError::InvalidConfig(_))));
}

#[test]
fn login_routes_to_state() {
    let (_dir, _paths, controller) = open();

    let mut session = Session::default();
    assert_eq!(controller.view(&mut session).unwrap().state, SessionState::AwaitingLogin);

    assert!(matches!(controller.login(&mut session, "nobody"), Err(ApiError::InvalidCredential)));
    assert!(matches!(controller.login(&mut session, " alpha "), Err(ApiError::InvalidCredential)));
    assert_eq!(controller.view(&mut session).unwrap().state, SessionState::AwaitingLogin);

    let view = controller.login(&mut session, "alpha").unwrap();
    assert_eq!(view.state, SessionState::Voting);
    assert_eq!(view.label.as_deref(), Some("Alice"));
    assert_eq!(view.allocation, vec![0, 0]);
    assert!(view.admin_enabled);

    assert!(matches!(controller.login(&mut session, "bravo"), Err(ApiError::NotAllowed(_))));

    let voted = logged_in(&controller, "charlie");
    assert_eq!(controller.state(&voted).unwrap(), SessionState::Submitted);

    let admin = logged_in(&controller, "boss");
    assert_eq!(controller.state(&admin).unwrap(), SessionState::Admin);

    let viewer = logged_in(&controller, RESULTS_ONLY_CODE);
    assert_eq!(controller.state(&viewer).unwrap(), SessionState::ResultsOnly);

    let mut anonymous = Session::default();
    let view = controller.view_results(&mut anonymous).unwrap();
    assert_eq!(view.state, SessionState::ResultsOnly);
}

#[test]
fn admin_code_is_unknown_without_admin_config() {
    let (_dir, paths) = fixture(r#"{"project_names": ["A"], "points": 3, "logins": {"x": ["X", false]}}"#);
    let controller = Controller::open(&paths).expect("open");
    let mut session = Session::default();
    assert!(matches!(controller.login(&mut session, "boss"), Err(ApiError::InvalidCredential)));
    assert!(!controller.view(&mut session).unwrap().admin_enabled);
}

#[test]
fn slider_changes_are_clamped() {
    let (_dir, _paths, controller) = open();
    let mut session = logged_in(&controller, "alpha");

    let update = controller.change_allocation(&mut session, 0, 7).unwrap();
    assert_eq!(update.allocation, vec![7, 0]);
    assert!(update.notice.is_none());

    let update = controller.change_allocation(&mut session, 1, 5).unwrap();
    assert_eq!(update.allocation, vec![7, 3]);
    assert_eq!(update.total, 10);
    let notice = update.notice.expect("clamp notice");
    assert_eq!((notice.attempted, notice.value), (5, 3));

    assert!(matches!(
        controller.change_allocation(&mut session, 2, 1),
        Err(ApiError::InvalidInput(_))
    ));
}

#[test]
fn submit_requires_exact_total() {
    let (_dir, paths, controller) = open();
    let mut session = logged_in(&controller, "alpha");
    controller.change_allocation(&mut session, 0, 4).unwrap();
    controller.change_allocation(&mut session, 1, 5).unwrap();

    match controller.submit(&mut session) {
        Err(ApiError::TotalMismatch { expected, actual }) => assert_eq!((expected, actual), (10, 9)),
        other => panic!("expected total mismatch, got {:?}", other.map(|v| v.state)),
    }
    assert_eq!(controller.view(&mut session).unwrap().allocation, vec![4, 5]);
    assert!(ledger_rows(&paths.votes_file).is_empty());
}

#[test]
fn submit_records_vote_once() {
    let (_dir, paths, controller) = open();
    let mut session = logged_in(&controller, "alpha");
    controller.change_allocation(&mut session, 0, 6).unwrap();
    controller.change_allocation(&mut session, 1, 4).unwrap();

    let view = controller.submit(&mut session).unwrap();
    assert_eq!(view.state, SessionState::Submitted);
    assert_eq!(ledger_rows(&paths.votes_file), vec![vec![6, 4]]);
    assert!(LoginStore::new(&paths.logins_file).load().unwrap()["alpha"].has_voted);

    assert!(matches!(controller.submit(&mut session), Err(ApiError::NotAllowed(_))));
    assert!(matches!(controller.change_allocation(&mut session, 0, 1), Err(ApiError::NotAllowed(_))));

    let again = logged_in(&controller, "alpha");
    assert_eq!(controller.state(&again).unwrap(), SessionState::Submitted);
    assert_eq!(ledger_rows(&paths.votes_file).len(), 1);
}

#[test]
fn concurrent_session_for_same_code_sees_submission() {
    let (_dir, _paths, controller) = open();
    let mut first = logged_in(&controller, "bravo");
    let second = logged_in(&controller, "bravo");

    controller.change_allocation(&mut first, 0, 10).unwrap();
    controller.submit(&mut first).unwrap();

    assert_eq!(controller.state(&second).unwrap(), SessionState::Submitted);
}

#[test]
fn ledger_rows_sum_to_limit_and_aggregate() {
    let (_dir, paths, controller) = open();
    vote(&controller, "alpha", [7, 3]);
    vote(&controller, "bravo", [2, 8]);

    let rows = ledger_rows(&paths.votes_file);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.iter().sum::<u32>() == 10));

    let viewer = logged_in(&controller, RESULTS_ONLY_CODE);
    let results = controller.results(&viewer).unwrap();
    assert_eq!(results.total_votes, 2);
    assert_eq!(results.totals[0], ProjectTotal { name: "Garden".into(), points: 9 });
    assert_eq!(results.totals[1], ProjectTotal { name: "Library".into(), points: 11 });
}

#[test]
fn results_without_ledger_are_empty() {
    let (_dir, _paths, controller) = open();
    let viewer = logged_in(&controller, RESULTS_ONLY_CODE);
    let results = controller.results(&viewer).unwrap();
    assert_eq!(results.total_votes, 0);
    assert_eq!(results.project_names, vec!["Garden", "Library"]);
    assert!(results.totals.iter().all(|t| t.points == 0));

    let voter = logged_in(&controller, "alpha");
    assert!(matches!(controller.results(&voter), Err(ApiError::NotAllowed(_))));
}

#[test]
fn ledger_append_rejects_other_columns() {
    let dir = tempdir().expect("tempdir");
    let ledger = VoteLedger::new(dir.path().join("votes.csv"));
    let record = |projects: &[&str], points: &[u32]| VoteRecord {
        projects: projects.iter().map(|p| p.to_string()).collect(),
        points: points.to_vec(),
    };

    assert_eq!(ledger.append(&record(&["A", "B"], &[1, 2])).unwrap(), 1);
    assert_eq!(ledger.append(&record(&["A", "B"], &[3, 0])).unwrap(), 2);
    assert!(matches!(
        ledger.append(&record(&["A", "C"], &[3, 0])),
        Err(StoreError::HeaderMismatch { .. })
    ));
    let contents = ledger.read().unwrap().expect("ledger exists");
    assert_eq!(contents.header, vec!["A", "B"]);
    assert_eq!(contents.rows, vec![vec![1, 2], vec![3, 0]]);
}

#[test]
fn ledger_reports_bad_values() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("votes.csv");
    fs::write(&path, "A,B\n1,x\n").unwrap();
    assert!(matches!(
        VoteLedger::new(&path).read(),
        Err(StoreError::BadLedgerValue { row: 1, .. })
    ));
}

#[test]
fn admin_reset_archives_and_reconfigures() {
    let (_dir, paths, mut controller) = open();
    vote(&controller, "alpha", [5, 5]);
    vote(&controller, "bravo", [1, 9]);
    let before = fs::read_to_string(&paths.votes_file).unwrap();

    let mut admin = logged_in(&controller, "boss");
    let view = controller.admin_reset(&mut admin, &["Park".into(), " Pool ".into()]).unwrap();
    assert_eq!(view.state, SessionState::AwaitingLogin);
    assert_eq!(view.project_names, vec!["Park", "Pool"]);
    assert_eq!(view.points_limit, 1);

    assert!(ledger_rows(&paths.votes_file).is_empty());
    let archived: Vec<_> = fs::read_dir(&paths.archive_dir).unwrap().collect();
    assert_eq!(archived.len(), 1);
    let archived_path = archived[0].as_ref().unwrap().path();
    assert_eq!(fs::read_to_string(archived_path).unwrap(), before);

    let logins = LoginStore::new(&paths.logins_file).load().unwrap();
    assert!(logins.iter()
        .filter(|(code, _)| code.as_str() != RESULTS_ONLY_CODE)
        .all(|(_, e)| !e.has_voted));

    let reloaded = crate::store::ConfigStore::new(&paths.config_file).load().unwrap();
    assert_eq!(reloaded.project_names, vec!["Park", "Pool"]);
    assert_eq!(reloaded.points, 1);
    assert_eq!(reloaded.admin.as_deref(), Some("boss"));
    assert!(!reloaded.logins.contains_key(RESULTS_ONLY_CODE));
    assert!(reloaded.logins.values().all(|e| !e.has_voted));

    let mut session = logged_in(&controller, "charlie");
    assert_eq!(controller.state(&session).unwrap(), SessionState::Voting);
    controller.change_allocation(&mut session, 1, 4).unwrap();
    controller.submit(&mut session).unwrap();
    assert_eq!(ledger_rows(&paths.votes_file), vec![vec![0, 1]]);
}

#[test]
fn sessions_from_before_a_reset_start_over_within_the_new_limit() {
    let (_dir, paths, mut controller) = open();
    let mut drafting = logged_in(&controller, "alpha");
    controller.change_allocation(&mut drafting, 0, 7).unwrap();
    controller.change_allocation(&mut drafting, 1, 2).unwrap();

    let mut submitted = logged_in(&controller, "bravo");
    controller.change_allocation(&mut submitted, 0, 10).unwrap();
    controller.submit(&mut submitted).unwrap();

    let mut admin = logged_in(&controller, "boss");
    controller.admin_reset(&mut admin, &["Park".into(), "Pool".into()]).unwrap();

    for session in [&mut drafting, &mut submitted] {
        let view = controller.view(session).unwrap();
        assert_eq!(view.state, SessionState::Voting);
        assert_eq!(view.allocation, vec![0, 0]);
        assert!(view.total <= view.points_limit);
    }

    let update = controller.change_allocation(&mut drafting, 0, 0).unwrap();
    assert!(update.total <= 1);
    let update = controller.change_allocation(&mut submitted, 1, 3).unwrap();
    assert_eq!(update.allocation, vec![0, 1]);
    controller.submit(&mut submitted).unwrap();
    assert_eq!(ledger_rows(&paths.votes_file), vec![vec![0, 1]]);
}

#[test]
fn failed_reset_leaves_stores_untouched() {
    let (_dir, paths, mut controller) = open();
    vote(&controller, "alpha", [4, 6]);

    let store = LoginStore::new(&paths.logins_file);
    let mut logins = store.load().unwrap();
    logins.insert("boss".into(), LoginEntry::new("Shadow"));
    store.save(&logins).unwrap();

    let mut admin = logged_in(&controller, "boss");
    assert!(matches!(
        controller.admin_reset(&mut admin, &["Park".into(), "Pool".into()]),
        Err(ApiError::InvalidInput(_))
    ));

    assert_eq!(ledger_rows(&paths.votes_file), vec![vec![4, 6]]);
    assert!(!paths.archive_dir.exists());
    assert!(store.load().unwrap()["alpha"].has_voted);
    let reloaded = crate::store::ConfigStore::new(&paths.config_file).load().unwrap();
    assert_eq!(reloaded.project_names, vec!["Garden", "Library"]);
    assert_eq!(controller.config().points, 10);
}

#[test]
fn full_session_table_keeps_logged_in_sessions() {
    let mut table = SessionTable::with_capacity(3);
    table.insert("a".into());
    table.insert("b".into());
    table.insert("c".into());
    table.touch("a").unwrap().login = Some(Login::Voter("alpha".into()));
    table.touch("b").unwrap().login = Some(Login::Admin);

    table.insert("d".into());
    assert_eq!(table.len(), 3);
    assert!(table.contains("a") && table.contains("b") && table.contains("d"));
    assert!(!table.contains("c"));

    table.touch("d").unwrap().login = Some(Login::Viewer);
    table.touch("a");
    table.insert("e".into());
    assert_eq!(table.len(), 3);
    assert!(!table.contains("b"));
    assert!(table.contains("a") && table.contains("d") && table.contains("e"));
}

#[test]
fn admin_reset_validates_names_and_role() {
    let (_dir, paths, mut controller) = open();
    let mut admin = logged_in(&controller, "boss");
    assert!(matches!(
        controller.admin_reset(&mut admin, &["Only".into()]),
        Err(ApiError::InvalidInput(_))
    ));
    assert!(matches!(
        controller.admin_reset(&mut admin, &["Same".into(), "same".into()]),
        Err(ApiError::InvalidInput(_))
    ));

    let mut voter = logged_in(&controller, "alpha");
    assert!(matches!(
        controller.admin_reset(&mut voter, &["X".into(), "Y".into()]),
        Err(ApiError::NotAllowed(_))
    ));
    assert_eq!(controller.config().project_names, vec!["Garden", "Library"]);
    assert!(!paths.archive_dir.exists());
}
