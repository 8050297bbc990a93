//! Deferred layout orchestration.
//!
//! A rendering surface only learns node sizes after its own asynchronous
//! first paint, so layout cannot run at mount time. The orchestrator polls
//! the surface until the viewport is initialized and every node reports a
//! measured width, then runs the layout engine once, commits the positions,
//! and requests a single viewport fit.
//!
//! The poll is a bounded-retry loop with exponential backoff rather than a
//! fixed-interval busy wait; a surface that never produces measurements
//! surfaces a [`LayoutError::ReadinessTimeout`] instead of stalling the
//! diagram forever.
//!
//! # Cancellation
//!
//! There is no cancel operation. The returned future is mount-lifetime
//! bound: dropping it (unmounting the owning view) abandons all pending
//! ticks, and the one-shot phase latch guarantees a later call cannot
//! commit a second layout.

use std::{future::Future, time::Duration};

use log::{debug, error, info, trace};

use rampart_core::flow::FlowNode;

use super::{GraphLayout, LayoutError};
use crate::surface::FlowSurface;

/// Backoff schedule for readiness polling.
#[derive(Debug, Clone, Copy)]
pub struct PollPolicy {
    initial_interval: Duration,
    max_interval: Duration,
    max_wait: Duration,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            initial_interval: Duration::from_millis(1),
            max_interval: Duration::from_millis(250),
            max_wait: Duration::from_secs(5),
        }
    }
}

impl PollPolicy {
    /// Create a policy with the default schedule: 1 ms doubling to a 250 ms
    /// cap, giving up after 5 s of accumulated waiting.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first tick's delay.
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    /// Set the backoff ceiling.
    pub fn with_max_interval(mut self, interval: Duration) -> Self {
        self.max_interval = interval;
        self
    }

    /// Set the total wait budget before reporting a readiness timeout.
    pub fn with_max_wait(mut self, wait: Duration) -> Self {
        self.max_wait = wait;
        self
    }
}

/// Lifecycle of one diagram mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No layout attempt has started.
    NotStarted,
    /// Waiting for the surface to measure its nodes.
    Polling,
    /// A layout attempt finished (committed, failed, or timed out);
    /// nothing further will run for this mount.
    Done,
}

/// What a completed [`LayoutOrchestrator::run`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Positions were committed and one viewport fit was requested.
    Committed,
    /// The engine rejected; the surface keeps its pre-layout positions.
    LayoutFailed,
    /// A previous call already moved past `NotStarted`; nothing was done.
    AlreadyRan,
}

/// One-shot controller that runs layout once per diagram mount.
#[derive(Debug)]
pub struct LayoutOrchestrator<L> {
    engine: L,
    policy: PollPolicy,
    phase: Phase,
}

impl<L: GraphLayout> LayoutOrchestrator<L> {
    /// Create an orchestrator around a layout engine with the default poll
    /// policy.
    pub fn new(engine: L) -> Self {
        Self {
            engine,
            policy: PollPolicy::default(),
            phase: Phase::NotStarted,
        }
    }

    /// Replace the poll policy.
    pub fn with_policy(mut self, policy: PollPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Polls the surface until it is ready, runs the engine, and commits
    /// positions. At most one call per orchestrator does any work; the
    /// phase latch makes later calls return [`Outcome::AlreadyRan`].
    ///
    /// `sleep` supplies the delay between poll ticks and is provided by the
    /// host so the crate stays runtime-agnostic.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::ReadinessTimeout`] when measurements never
    /// arrive within the policy's wait budget. Engine rejection is *not* an
    /// error here: it is logged and reported as [`Outcome::LayoutFailed`],
    /// leaving the diagram at its pre-layout positions.
    pub async fn run<S, D, F>(&mut self, surface: &mut S, sleep: D) -> Result<Outcome, LayoutError>
    where
        S: FlowSurface,
        D: Fn(Duration) -> F,
        F: Future<Output = ()>,
    {
        if self.phase != Phase::NotStarted {
            trace!(phase:? = self.phase; "Layout already ran for this mount");
            return Ok(Outcome::AlreadyRan);
        }
        self.phase = Phase::Polling;

        let mut waited = Duration::ZERO;
        let mut interval = self.policy.initial_interval;
        loop {
            if surface.viewport_initialized()
                && surface.nodes().iter().all(FlowNode::is_measured)
            {
                break;
            }
            if waited >= self.policy.max_wait {
                self.phase = Phase::Done;
                return Err(LayoutError::ReadinessTimeout {
                    waited_ms: waited.as_millis() as u64,
                });
            }
            trace!(waited_ms = waited.as_millis() as u64; "Nodes not measured yet; scheduling tick");
            sleep(interval).await;
            waited += interval;
            interval = interval.saturating_mul(2).min(self.policy.max_interval);
        }

        let nodes = surface.nodes();
        let edges = surface.edges();
        debug!(nodes = nodes.len(), edges = edges.len(); "Surface ready; computing layout");

        match self.engine.layout(nodes, &edges).await {
            Ok(positioned) => {
                surface.set_nodes(positioned);
                surface.fit_view();
                self.phase = Phase::Done;
                info!("Layout committed");
                Ok(Outcome::Committed)
            }
            Err(err) => {
                // The diagram stays connected and visible at its pre-layout
                // positions; a failed layout must not blank the view.
                error!(err:%; "Layout computation failed; keeping prior positions");
                self.phase = Phase::Done;
                Ok(Outcome::LayoutFailed)
            }
        }
    }
}
