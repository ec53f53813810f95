//! Lifecycle state of a coordinator
//!
//! `NotStarted -> Running -> Stopping -> Stopped`. The phase and the intake
//! sender live behind one lock so that closing the intake and changing the
//! phase are a single step: a Submit either clones a live sender (and its call
//! is drained by Stop) or observes a closed gate and is rejected.

use super::types::PendingCall;
use crate::utils::error::{BatchError, Result};
use parking_lot::RwLock;
use serde::Serialize;
use std::future::Future;
use tokio::sync::{OnceCell, mpsc};

/// Coordinator lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecyclePhase {
    NotStarted,
    Running,
    Stopping,
    Stopped,
}

impl LifecyclePhase {
    pub fn accepts_calls(&self) -> bool {
        matches!(self, LifecyclePhase::Running)
    }
}

struct GateState {
    phase: LifecyclePhase,
    sender: Option<mpsc::Sender<PendingCall>>,
}

/// Guards the intake sender
pub(crate) struct IntakeGate {
    state: RwLock<GateState>,
}

impl IntakeGate {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(GateState {
                phase: LifecyclePhase::NotStarted,
                sender: None,
            }),
        }
    }

    pub(crate) fn phase(&self) -> LifecyclePhase {
        self.state.read().phase
    }

    /// `NotStarted -> Running`
    pub(crate) fn open(&self, sender: mpsc::Sender<PendingCall>) -> bool {
        let mut state = self.state.write();
        if state.phase != LifecyclePhase::NotStarted {
            return false;
        }
        state.phase = LifecyclePhase::Running;
        state.sender = Some(sender);
        true
    }

    /// A sender to submit through, if the gate is open
    pub(crate) fn sender(&self) -> Option<mpsc::Sender<PendingCall>> {
        let state = self.state.read();
        match state.phase {
            LifecyclePhase::Running => state.sender.clone(),
            _ => None,
        }
    }

    /// `Running -> Stopping`; hands back the gate's sender so the caller
    /// controls when it is dropped
    pub(crate) fn close(&self) -> Option<mpsc::Sender<PendingCall>> {
        let mut state = self.state.write();
        if state.phase == LifecyclePhase::Running {
            state.phase = LifecyclePhase::Stopping;
        }
        state.sender.take()
    }

    /// `Stopping -> Stopped`
    pub(crate) fn finish(&self) {
        let mut state = self.state.write();
        if state.phase != LifecyclePhase::NotStarted {
            state.phase = LifecyclePhase::Stopped;
        }
    }
}

/// One-shot initialization shared by every concurrent Start caller
pub(crate) struct StartBarrier {
    outcome: OnceCell<std::result::Result<(), String>>,
}

impl StartBarrier {
    pub(crate) fn new() -> Self {
        Self {
            outcome: OnceCell::new(),
        }
    }

    /// Run `init` at most once; every caller observes its outcome
    pub(crate) async fn run<F, Fut>(&self, init: F) -> Result<()>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<(), String>>,
    {
        self.outcome
            .get_or_init(init)
            .await
            .clone()
            .map_err(BatchError::Startup)
    }
}
