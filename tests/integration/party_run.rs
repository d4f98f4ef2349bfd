//! End-to-end runs of the party loop against mock and real backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use celebration::config::{AppConfig, Backend};
use celebration::content::Content;
use celebration::engine::pacer::PauseKind;
use celebration::engine::runner::{PartyLoop, Schedule};
use celebration::status;
use celebration::status::command::CommandStatusSetter;
use celebration::types::Status;

use crate::mock_status::{Event, MockPacer, MockStatus, Reply, Timeline};

fn fast_schedule(iterations: u64) -> Schedule {
    Schedule {
        iterations,
        interval: Duration::ZERO,
        backoff_multiplier: 2,
        status_ttl: None,
    }
}

fn timeline() -> Timeline {
    Arc::new(Mutex::new(Vec::new()))
}

fn updates(tl: &Timeline) -> Vec<Status> {
    tl.lock()
        .unwrap()
        .iter()
        .filter_map(|e| match e {
            Event::Update(s) => Some(s.clone()),
            Event::Pause(..) => None,
        })
        .collect()
}

#[tokio::test]
async fn test_generic_failures_never_back_off() {
    let tl = timeline();
    let mut party = PartyLoop::new(
        &Content::default(),
        fast_schedule(3),
        MockStatus::new(tl.clone(), Reply::Fail),
        MockPacer::new(tl.clone()),
    )
    .unwrap();

    let report = party.run().await;
    assert_eq!(report.iterations, 3);
    assert_eq!(report.updates_failed, 3);
    assert_eq!(report.backoffs, 0);

    let events = tl.lock().unwrap().clone();
    assert_eq!(events.len(), 6);
    assert!(!events
        .iter()
        .any(|e| matches!(e, Event::Pause(PauseKind::Backoff, _))));
}

#[tokio::test]
async fn test_backoff_between_second_and_third_update() {
    let tl = timeline();
    let mut party = PartyLoop::new(
        &Content::default(),
        fast_schedule(3),
        MockStatus::new(tl.clone(), Reply::Ok).on_call(2, Reply::RateLimited),
        MockPacer::new(tl.clone()),
    )
    .unwrap();

    let report = party.run().await;
    assert_eq!(report.updates_ok, 2);
    assert_eq!(report.rate_limited, 1);
    assert_eq!(report.backoffs, 1);

    let shape: Vec<&str> = tl
        .lock()
        .unwrap()
        .iter()
        .map(|e| match e {
            Event::Pause(PauseKind::Interval, _) => "wait",
            Event::Pause(PauseKind::Backoff, _) => "backoff",
            Event::Update(_) => "update",
        })
        .collect();
    assert_eq!(
        shape,
        vec!["wait", "update", "wait", "update", "backoff", "wait", "update"]
    );
}

#[tokio::test]
async fn test_backoff_is_twice_the_interval() {
    let tl = timeline();
    let schedule = Schedule {
        interval: Duration::from_secs(10),
        ..fast_schedule(1)
    };
    let mut party = PartyLoop::new(
        &Content::default(),
        schedule,
        MockStatus::new(tl.clone(), Reply::RateLimited),
        MockPacer::new(tl.clone()),
    )
    .unwrap();
    party.run().await;

    let events = tl.lock().unwrap().clone();
    assert_eq!(events[0], Event::Pause(PauseKind::Interval, Duration::from_secs(10)));
    assert_eq!(events[2], Event::Pause(PauseKind::Backoff, Duration::from_secs(20)));
}

#[tokio::test]
async fn test_default_content_rotation() {
    let tl = timeline();
    let content = Content::default();
    let mut party = PartyLoop::new(
        &content,
        fast_schedule(9),
        MockStatus::new(tl.clone(), Reply::Ok),
        MockPacer::new(tl.clone()),
    )
    .unwrap();
    party.run().await;

    let got = updates(&tl);
    assert_eq!(got[0], Status::from_pair("partyparrot", &content.lines[1]));
    assert_eq!(got[6], Status::from_pair("champagne", &content.lines[7]));
    // Eight emojis: the eighth update wraps to index 0.
    assert_eq!(got[7].emoji.as_deref(), Some(":tada:"));
    assert_eq!(got[8].emoji.as_deref(), Some(":partyparrot:"));
}

#[tokio::test]
async fn test_fresh_runs_are_identical() {
    async fn run_once() -> Vec<Status> {
        let tl = timeline();
        let mut party = PartyLoop::new(
            &Content::default(),
            fast_schedule(250),
            MockStatus::new(tl.clone(), Reply::Ok),
            MockPacer::new(tl.clone()),
        )
        .unwrap();
        party.run().await;
        updates(&tl)
    }

    let first = run_once().await;
    let second = run_once().await;
    assert_eq!(first.len(), 250);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_dry_run_backend_from_config() {
    let mut cfg: AppConfig = toml::from_str(
        r#"
        [party]
        iterations = 4
        interval_secs = 0

        [status]
        backend = "dry-run"

        [content]
        emojis = ["tada"]
        lines = ["one", "two"]
        "#,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.status.backend, Backend::DryRun);

    let tl = timeline();
    let setter = status::from_config(&cfg).unwrap();
    let mut party = PartyLoop::new(
        &cfg.content,
        Schedule::from_config(&cfg.party),
        setter,
        MockPacer::new(tl.clone()),
    )
    .unwrap();

    let report = party.run().await;
    assert_eq!(report.updates_ok, 4);
    assert_eq!(report.updates_failed, 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_backend_receives_status_arguments() {
    let mut log = std::env::temp_dir();
    log.push(format!("celebration_args_{}.log", uuid::Uuid::new_v4()));
    let log = log.to_string_lossy().to_string();

    let script = format!(r#"printf '%s|' "$@" >> '{log}'; echo >> '{log}'"#);
    let setter = CommandStatusSetter::new("sh").with_args(vec![
        "-c".into(),
        script,
        "slack_update".into(),
    ]);

    let tl = timeline();
    let content = Content::new(
        vec!["tada".into(), "dancer".into()],
        vec!["Yahoo!".into(), "Celebration".into()],
    );
    let mut party =
        PartyLoop::new(&content, fast_schedule(2), setter, MockPacer::new(tl.clone())).unwrap();

    let report = party.run().await;
    assert_eq!(report.updates_ok, 2);

    let written = std::fs::read_to_string(&log).unwrap();
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(
        lines,
        vec![
            "status|-e|:dancer:|-t|\"Celebration\"|",
            "status|-e|:tada:|-t|\"Yahoo!\"|",
        ]
    );

    std::fs::remove_file(&log).unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn test_command_rate_limit_output_triggers_backoff() {
    let setter = CommandStatusSetter::new("sh").with_args(vec![
        "-c".into(),
        "echo 'Error: ratelimited' >&2; exit 2".into(),
        "slack_update".into(),
    ]);

    let tl = timeline();
    let mut party = PartyLoop::new(
        &Content::default(),
        fast_schedule(2),
        setter,
        MockPacer::new(tl.clone()),
    )
    .unwrap();

    let report = party.run().await;
    assert_eq!(report.updates_failed, 2);
    assert_eq!(report.rate_limited, 2);
    assert_eq!(report.backoffs, 2);
}
