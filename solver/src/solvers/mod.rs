mod navigator;
pub mod omniscient;
mod tracker;
mod wall_follower;

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::maze::{GoalSet, WallMap};

pub use navigator::Navigator;
pub use tracker::Tracker;
pub use wall_follower::WallFollower;

pub const DEFAULT_MAX_MOVES: usize = 10_000;

/// a blind strategy driving one mouse through the movement interface
#[allow(async_fn_in_trait)]
pub trait Solver {
    /// one attempt from the start cell
    async fn run(&mut self) -> eyre::Result<RunReport>;

    fn name(&self) -> &'static str;

    fn walls(&self) -> &WallMap;

    fn tracker(&self) -> &Tracker;
}

/// per-run settings, owned by each solver instance
#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub size: usize,
    pub goals: GoalSet,
    pub max_moves: usize,
    pub delay: Duration,
}

impl SolverConfig {
    pub fn new(size: usize, goals: GoalSet) -> Self {
        Self {
            size,
            goals,
            max_moves: DEFAULT_MAX_MOVES,
            delay: Duration::ZERO,
        }
    }

    pub fn with_max_moves(mut self, max_moves: usize) -> Self {
        self.max_moves = max_moves;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// caller-side safeguard against runs that never terminate
    pub(crate) fn check_budget(&self, moves: usize) -> eyre::Result<()> {
        if moves >= self.max_moves {
            eyre::bail!("too many moves ({}) - possible infinite loop", moves);
        }
        Ok(())
    }

    pub(crate) async fn pause(&self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Reached { flag: Option<String> },
    /// every possibly-open edge explored without finding a goal
    Stuck,
}

impl Outcome {
    pub fn is_reached(&self) -> bool {
        matches!(self, Self::Reached { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Counters {
    /// every move issued, accepted or not
    pub moves: usize,
    pub sensor_reads: usize,
    pub goal_plans: usize,
    pub frontier_plans: usize,
    pub fallback_steps: usize,
    pub replans: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub strategy: &'static str,
    pub outcome: Outcome,
    #[serde(flatten)]
    pub counters: Counters,
    pub cells_known: usize,
    pub planning_time: Duration,
    pub execution_time: Duration,
    pub total_time: Duration,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

/// wall-clock bookkeeping for one run
pub(crate) struct RunClock {
    started: Instant,
    started_at: DateTime<Utc>,
    planning: Duration,
}

impl RunClock {
    pub(crate) fn start() -> Self {
        Self {
            started: Instant::now(),
            started_at: Utc::now(),
            planning: Duration::ZERO,
        }
    }

    /// runs `f`, charging its duration to planning
    pub(crate) fn plan<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let planning_start = Instant::now();
        let result = f();
        self.planning += planning_start.elapsed();
        result
    }

    pub(crate) fn finish(
        self,
        strategy: &'static str,
        outcome: Outcome,
        counters: Counters,
        cells_known: usize,
    ) -> RunReport {
        let total_time = self.started.elapsed();
        RunReport {
            strategy,
            outcome,
            counters,
            cells_known,
            planning_time: self.planning,
            execution_time: total_time.saturating_sub(self.planning),
            total_time,
            started_at: self.started_at,
            finished_at: Utc::now(),
        }
    }
}
