use std::collections::VecDeque;

use log::{debug, info, trace, warn};

use super::{Counters, Outcome, RunClock, RunReport, Solver, SolverConfig, Tracker};
use crate::algorithms::pathfinding::{AStar, Dijkstra, PathfindingAlgorithm, Step};
use crate::api::{MouseApi, Surroundings};
use crate::maze::{Cardinal, Relative, WallMap};

enum Phase {
    Sense,
    Plan,
    Execute(VecDeque<Step>),
    Done(Option<String>),
    Stuck,
}

/// blind navigator: maps the maze from its own sensor readings and
/// alternates between a confirmed route to the goal and a route to the
/// nearest unexplored cell
pub struct Navigator<A: MouseApi> {
    api: A,
    config: SolverConfig,
    walls: WallMap,
    tracker: Tracker,
    goal_search: AStar,
    frontier_search: Dijkstra,
    counters: Counters,
}

impl<A: MouseApi> Navigator<A> {
    pub fn new(api: A, config: SolverConfig) -> Self {
        Self {
            goal_search: AStar::new(config.goals.clone()),
            frontier_search: Dijkstra::new(config.size),
            api,
            config,
            walls: WallMap::new(),
            tracker: Tracker::new(),
            counters: Counters::default(),
        }
    }

    /// reads the sensors and folds the snapshot into the wall map
    async fn sense(&mut self) -> eyre::Result<Surroundings> {
        let walls = self.api.surroundings().await?;
        self.counters.sensor_reads += 1;
        trace!(
            "sensed at {} facing {}: {:?}",
            self.tracker.position(),
            self.tracker.facing(),
            walls
        );
        self.walls
            .record(self.tracker.position(), self.tracker.facing(), &walls)?;
        Ok(walls)
    }

    async fn plan(&mut self, clock: &mut RunClock) -> eyre::Result<Phase> {
        let start = self.tracker.position();

        if let Some(path) = clock.plan(|| self.goal_search.find_path(&self.walls, start)) {
            if path.is_empty() {
                info!("already standing on a goal cell at {}", start);
                return Ok(Phase::Done(None));
            }
            self.counters.goal_plans += 1;
            debug!("goal path from {}: {} steps", start, path.len());
            return Ok(Phase::Execute(path.into()));
        }

        let frontier = clock
            .plan(|| self.frontier_search.find_path(&self.walls, start))
            .filter(|path| !path.is_empty());
        if let Some(path) = frontier {
            self.counters.frontier_plans += 1;
            if let Some(target) = path.last() {
                debug!(
                    "no known route to goal, exploring {} ({} steps)",
                    target.cell,
                    path.len()
                );
            }
            return Ok(Phase::Execute(path.into()));
        }

        // nothing reachable in the model, read the cell itself; only a
        // direction this read reveals as open is worth a step
        let unknown: Vec<Cardinal> = Cardinal::ALL
            .into_iter()
            .filter(|dir| !self.walls.get(start, *dir).is_known())
            .collect();
        let walls = self.sense().await?;
        let facing = self.tracker.facing();
        let opening = Relative::FALLBACK_ORDER
            .into_iter()
            .find(|relative| {
                !walls.is_walled(*relative) && unknown.contains(&facing.apply(*relative))
            });

        match opening {
            Some(relative) => {
                let direction = facing.apply(relative);
                self.counters.fallback_steps += 1;
                debug!("fallback step {} ({}) from {}", relative, direction, start);
                Ok(Phase::Execute(VecDeque::from([Step {
                    cell: start.step(direction),
                    direction,
                }])))
            }
            None => {
                debug!("nothing left to explore from {}", start);
                Ok(Phase::Stuck)
            }
        }
    }

    async fn execute_step(&mut self, mut queue: VecDeque<Step>) -> eyre::Result<Phase> {
        let Some(step) = queue.pop_front() else {
            return Ok(Phase::Sense);
        };

        let walls = self.sense().await?;
        let from = self.tracker.position();
        let relative = self.tracker.facing().relative_to_reach(step.direction);

        if walls.is_walled(relative) {
            self.counters.replans += 1;
            debug!(
                "plan invalidated: {} of {} is walled, {} steps dropped",
                step.direction,
                from,
                queue.len() + 1
            );
            return Ok(Phase::Plan);
        }

        self.config.check_budget(self.counters.moves)?;
        self.config.pause().await;

        let response = self.api.move_mouse(relative).await?;
        self.counters.moves += 1;
        self.tracker.on_move_result(relative, response.success);

        if response.success {
            eyre::ensure!(
                self.tracker.position() == step.cell,
                "belief drifted: moved {} from {} but planned to reach {}",
                step.direction,
                from,
                step.cell
            );
            debug!(
                "move {}: {} {} -> {}",
                self.counters.moves, relative, from, step.cell
            );
        } else {
            warn!("move {} from {} rejected", relative, from);
        }

        if response.goal_reached {
            // confirm every wall of the goal cell before stopping
            self.sense().await?;
            return Ok(Phase::Done(response.flag));
        }

        if !response.success || queue.is_empty() {
            return Ok(Phase::Sense);
        }
        Ok(Phase::Execute(queue))
    }
}

impl<A: MouseApi> Solver for Navigator<A> {
    fn name(&self) -> &'static str {
        "frontier"
    }

    fn walls(&self) -> &WallMap {
        &self.walls
    }

    fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// one run from the start cell; the wall map carries over between runs
    async fn run(&mut self) -> eyre::Result<RunReport> {
        self.api.reset().await?;
        self.tracker.reset();
        self.counters = Counters::default();

        let mut clock = RunClock::start();
        info!(
            "navigating with {} known cells, goal search {} and frontier search {}",
            self.walls.fully_known_cells(self.config.size),
            self.goal_search.name(),
            self.frontier_search.name()
        );

        let mut phase = Phase::Sense;
        let outcome = loop {
            phase = match phase {
                Phase::Sense => {
                    self.sense().await?;
                    Phase::Plan
                }
                Phase::Plan => self.plan(&mut clock).await?,
                Phase::Execute(queue) => self.execute_step(queue).await?,
                Phase::Done(flag) => break Outcome::Reached { flag },
                Phase::Stuck => break Outcome::Stuck,
            };
        };

        match &outcome {
            Outcome::Reached { .. } => info!(
                "reached goal at {} after {} moves",
                self.tracker.position(),
                self.counters.moves
            ),
            Outcome::Stuck => warn!(
                "stuck at {} after {} moves: nothing left to explore",
                self.tracker.position(),
                self.counters.moves
            ),
        }

        Ok(clock.finish(
            self.name(),
            outcome,
            self.counters,
            self.walls.fully_known_cells(self.config.size),
        ))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::maze::{Cardinal, GoalSet, Layout, Position, SimulatedMaze, WallState};
    use crate::solvers::omniscient;

    fn config(size: usize, goals: GoalSet) -> SolverConfig {
        SolverConfig::new(size, goals).with_max_moves(500)
    }

    #[tokio::test]
    async fn walled_in_start_is_stuck_without_moving() {
        let goals = GoalSet::center(4);
        let maze = SimulatedMaze::new(Layout::sealed(4, goals.clone()), None);
        let mut navigator = Navigator::new(maze.mouse("boxed"), config(4, goals));

        let report = navigator.run().await.unwrap();
        assert_eq!(report.outcome, Outcome::Stuck);
        assert_eq!(report.counters.moves, 0);
        assert_eq!(maze.moves("boxed"), 0);
        assert_eq!(report.counters.goal_plans + report.counters.frontier_plans, 0);
    }

    #[tokio::test]
    async fn follows_a_corridor_to_the_goal() {
        let goals = GoalSet::new([Position::new(2, 2)]).unwrap();
        let mut layout = Layout::sealed(3, goals.clone());
        layout.remove_wall(Position::new(0, 0), Cardinal::North);
        layout.remove_wall(Position::new(0, 1), Cardinal::North);
        layout.remove_wall(Position::new(0, 2), Cardinal::East);
        layout.remove_wall(Position::new(1, 2), Cardinal::East);
        let maze = SimulatedMaze::new(layout, Some("FLAG{hall}".to_string()));

        let mut navigator = Navigator::new(maze.mouse("tom"), config(3, goals));
        let report = navigator.run().await.unwrap();

        assert_eq!(
            report.outcome,
            Outcome::Reached {
                flag: Some("FLAG{hall}".to_string())
            }
        );
        assert_eq!(report.counters.moves, 4);
        assert_eq!(navigator.tracker().position(), Position::new(2, 2));
        assert_eq!(
            maze.true_state("tom"),
            Some((navigator.tracker().position(), navigator.tracker().facing()))
        );
    }

    #[tokio::test]
    async fn exhausted_region_without_a_goal_is_stuck() {
        // goal cell exists but is cut off from the start region
        let goals = GoalSet::new([Position::new(2, 2)]).unwrap();
        let mut layout = Layout::sealed(3, goals.clone());
        layout.remove_wall(Position::new(0, 0), Cardinal::East);
        let maze = SimulatedMaze::new(layout, None);

        let mut navigator =
            Navigator::new(maze.mouse("tom"), SolverConfig::new(3, goals));
        let report = navigator.run().await.unwrap();

        assert_eq!(report.outcome, Outcome::Stuck);
        assert_eq!(report.counters.moves, 1);
        assert_eq!(report.counters.frontier_plans, 1);
        // every reachable cell was already known, the last read taught nothing
        assert_eq!(report.counters.fallback_steps, 0);
        assert_eq!(maze.moves("tom"), 1);
        assert_eq!(navigator.walls().fully_known_cells(3), 2);
        assert_eq!(
            maze.true_state("tom"),
            Some((navigator.tracker().position(), navigator.tracker().facing()))
        );
    }

    #[tokio::test]
    async fn fallback_steps_into_a_freshly_revealed_opening() {
        let goals = GoalSet::new([Position::new(2, 2)]).unwrap();
        let maze = SimulatedMaze::new(Layout::open(3, goals.clone()), None);
        let mut navigator = Navigator::new(maze.mouse("tom"), config(3, goals));
        let mut clock = RunClock::start();

        // planning on an empty map: no goal route, the start is its own frontier
        let phase = navigator.plan(&mut clock).await.unwrap();
        let Phase::Execute(queue) = phase else {
            panic!("expected a fallback step");
        };
        assert_eq!(
            Vec::from(queue.clone()),
            vec![Step {
                cell: Position::new(0, 1),
                direction: Cardinal::North,
            }]
        );
        assert_eq!(navigator.counters.fallback_steps, 1);
        assert!(!navigator.walls().is_frontier(Position::ORIGIN));

        let next = navigator.execute_step(queue).await.unwrap();
        assert!(matches!(next, Phase::Sense));
        assert_eq!(navigator.tracker().position(), Position::new(0, 1));
        assert_eq!(
            maze.true_state("tom"),
            Some((Position::new(0, 1), Cardinal::North))
        );
    }

    #[tokio::test]
    async fn walled_step_drops_the_rest_of_the_plan() {
        // the only way out of (0,0) is east
        let goals = GoalSet::new([Position::new(2, 0)]).unwrap();
        let mut layout = Layout::sealed(3, goals.clone());
        layout.remove_wall(Position::new(0, 0), Cardinal::East);
        layout.remove_wall(Position::new(1, 0), Cardinal::East);
        let maze = SimulatedMaze::new(layout, Some("FLAG{detour}".to_string()));

        let mut navigator = Navigator::new(maze.mouse("tom"), config(3, goals));
        let stale = VecDeque::from([
            Step {
                cell: Position::new(0, 1),
                direction: Cardinal::North,
            },
            Step {
                cell: Position::new(0, 2),
                direction: Cardinal::North,
            },
        ]);

        let next = navigator.execute_step(stale).await.unwrap();
        assert!(matches!(next, Phase::Plan));
        assert_eq!(navigator.counters.replans, 1);
        assert_eq!(maze.moves("tom"), 0);
        assert_eq!(
            navigator.walls().get(Position::ORIGIN, Cardinal::North),
            WallState::Closed
        );

        let report = navigator.run().await.unwrap();
        assert_eq!(
            report.outcome,
            Outcome::Reached {
                flag: Some("FLAG{detour}".to_string())
            }
        );
        assert_eq!(report.counters.moves, 2);
        assert_eq!(
            maze.true_state("tom"),
            Some((navigator.tracker().position(), navigator.tracker().facing()))
        );
    }

    #[tokio::test]
    async fn second_run_goes_straight_to_the_goal() {
        let layout = Layout::generate(8, &mut StdRng::seed_from_u64(11));
        let goals = layout.goals().clone();
        let optimal = omniscient::optimal_moves(&layout)
            .unwrap()
            .unwrap();
        let maze = SimulatedMaze::new(layout, None);

        let mut navigator = Navigator::new(maze.mouse("tom"), config(8, goals));
        let first = navigator.run().await.unwrap();
        assert!(first.outcome.is_reached());
        assert!(first.counters.moves >= optimal);

        let second = navigator.run().await.unwrap();
        assert!(second.outcome.is_reached());
        assert!(second.counters.moves <= first.counters.moves);
        assert_eq!(second.counters.replans, 0);
    }
}
