//! Mock status backend and pacer for integration testing.
//!
//! Both write into one shared timeline so tests can assert the exact
//! interleaving of updates and pauses. All state is in-memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use celebration::engine::pacer::{Pacer, PauseKind};
use celebration::status::StatusSetter;
use celebration::types::{Status, StatusError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Pause(PauseKind, Duration),
    Update(Status),
}

pub type Timeline = Arc<Mutex<Vec<Event>>>;

/// How the mock answers a given call (1-based).
#[derive(Debug, Clone, Copy)]
pub enum Reply {
    Ok,
    Fail,
    RateLimited,
}

pub struct MockStatus {
    timeline: Timeline,
    calls: Mutex<u64>,
    default_reply: Reply,
    overrides: HashMap<u64, Reply>,
}

impl MockStatus {
    pub fn new(timeline: Timeline, default_reply: Reply) -> Self {
        Self {
            timeline,
            calls: Mutex::new(0),
            default_reply,
            overrides: HashMap::new(),
        }
    }

    /// Answer call number `n` (1-based) with `reply`.
    pub fn on_call(mut self, n: u64, reply: Reply) -> Self {
        self.overrides.insert(n, reply);
        self
    }
}

#[async_trait]
impl StatusSetter for MockStatus {
    async fn set_status(&self, status: &Status) -> Result<(), StatusError> {
        let n = {
            let mut calls = self.calls.lock().unwrap();
            *calls += 1;
            *calls
        };
        self.timeline.lock().unwrap().push(Event::Update(status.clone()));

        match self.overrides.get(&n).copied().unwrap_or(self.default_reply) {
            Reply::Ok => Ok(()),
            Reply::Fail => Err(StatusError::Exit {
                code: Some(1),
                output: "boom".into(),
            }),
            Reply::RateLimited => Err(StatusError::RateLimited {
                backend: "mock".into(),
                detail: "ratelimited".into(),
            }),
        }
    }
}

pub struct MockPacer {
    timeline: Timeline,
}

impl MockPacer {
    pub fn new(timeline: Timeline) -> Self {
        Self { timeline }
    }
}

#[async_trait]
impl Pacer for MockPacer {
    async fn pause(&self, kind: PauseKind, duration: Duration) {
        self.timeline.lock().unwrap().push(Event::Pause(kind, duration));
    }
}
