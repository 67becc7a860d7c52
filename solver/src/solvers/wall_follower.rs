use log::{debug, info, warn};

use super::{Counters, Outcome, RunClock, RunReport, Solver, SolverConfig, Tracker};
use crate::api::MouseApi;
use crate::maze::{Relative, WallMap};

/// wall follower using the left-hand rule, kept as a baseline
pub struct WallFollower<A: MouseApi> {
    api: A,
    config: SolverConfig,
    walls: WallMap,
    tracker: Tracker,
}

impl<A: MouseApi> WallFollower<A> {
    pub fn new(api: A, config: SolverConfig) -> Self {
        Self {
            api,
            config,
            walls: WallMap::new(),
            tracker: Tracker::new(),
        }
    }
}

impl<A: MouseApi> Solver for WallFollower<A> {
    fn name(&self) -> &'static str {
        "wall-follower"
    }

    fn walls(&self) -> &WallMap {
        &self.walls
    }

    fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    async fn run(&mut self) -> eyre::Result<RunReport> {
        self.api.reset().await?;
        self.tracker.reset();

        let mut counters = Counters::default();
        let mut clock = RunClock::start();
        info!("following the left wall");

        let outcome = loop {
            let walls = self.api.surroundings().await?;
            counters.sensor_reads += 1;
            self.walls
                .record(self.tracker.position(), self.tracker.facing(), &walls)?;

            let Some(relative) = clock.plan(|| walls.first_open(&Relative::LEFT_HAND_ORDER))
            else {
                warn!("completely blocked at {}", self.tracker.position());
                break Outcome::Stuck;
            };

            self.config.check_budget(counters.moves)?;
            self.config.pause().await;

            let response = self.api.move_mouse(relative).await?;
            counters.moves += 1;
            self.tracker.on_move_result(relative, response.success);
            debug!(
                "step {}: {} to {}",
                counters.moves,
                relative,
                self.tracker.position()
            );

            if response.goal_reached {
                let walls = self.api.surroundings().await?;
                counters.sensor_reads += 1;
                self.walls
                    .record(self.tracker.position(), self.tracker.facing(), &walls)?;
                break Outcome::Reached {
                    flag: response.flag,
                };
            }
        };

        info!("{:?} after {} moves", outcome, counters.moves);
        Ok(clock.finish(
            self.name(),
            outcome,
            counters,
            self.walls.fully_known_cells(self.config.size),
        ))
    }
}
