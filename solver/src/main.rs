mod cli;
mod logging;

use std::time::Duration;

use clap::Parser;
use eyre::Result;
use futures::future::join_all;
use log::{debug, error, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;

use cli::{Args, Command, ManualAction, Strategy};
use logging::Logger;
use micromouse::api::{HttpMouse, MouseApi};
use micromouse::maze::render::render;
use micromouse::maze::{GoalSet, Layout, Relative, SimulatedMaze};
use micromouse::solvers::{
    Navigator, Outcome, RunReport, Solver, SolverConfig, WallFollower, omniscient,
};

#[derive(Debug, Clone, Copy)]
struct View {
    json: bool,
    render: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    Logger::init(args.verbosity);

    info!("no map, no compass, just walls.");

    let config = build_config(&args)?;
    let mut view = View {
        json: args.json,
        render: false,
    };

    match args.command {
        Command::Remote {
            url,
            name,
            runs,
            timeout_ms,
        } => {
            info!("navigating {} on {} with {}", name, url, args.strategy.name());
            let api = HttpMouse::new(&url, &name, Duration::from_millis(timeout_ms))?;
            solve(api, args.strategy, config, runs, view).await?;
        }
        Command::Simulate {
            seed,
            runs,
            mice,
            flag,
            render,
        } => {
            view.render = render;
            let seed = seed.unwrap_or_else(rand::random);
            info!("simulating {}x{} maze with seed {}", config.size, config.size, seed);

            let layout = Layout::generate(config.size, &mut StdRng::seed_from_u64(seed))
                .with_goals(config.goals.clone());
            report_optimum(&layout)?;

            let maze = SimulatedMaze::new(layout, flag);
            let tasks = mice.iter().map(|name| {
                solve(maze.mouse(name), args.strategy, config.clone(), runs, view)
            });

            for (name, result) in mice.iter().zip(join_all(tasks).await) {
                match result {
                    Ok(()) => debug!(
                        "{} done: {} moves, {} sensor reads",
                        name,
                        maze.moves(name),
                        maze.sensor_reads(name)
                    ),
                    Err(e) => error!("{} failed: {}", name, e),
                }
            }
        }
        Command::Benchmark { seed, mazes } => {
            run_benchmark(config, seed.unwrap_or_else(rand::random), mazes).await?;
        }
        Command::Manual {
            action,
            url,
            name,
            timeout_ms,
        } => {
            let api = HttpMouse::new(&url, &name, Duration::from_millis(timeout_ms))?;
            run_manual(&api, action).await?;
        }
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<SolverConfig> {
    let goals = if args.goals.is_empty() {
        GoalSet::center(args.size)
    } else {
        GoalSet::new(args.goals.iter().copied())?
    };

    if let Some(outside) = goals.iter().find(|goal| !goal.in_bounds(args.size)) {
        eyre::bail!("goal {} is outside the {}x{} maze", outside, args.size, args.size);
    }

    if args.delay > 0 {
        debug!("delay: {}ms", args.delay);
    }

    Ok(SolverConfig::new(args.size, goals)
        .with_max_moves(args.max_moves)
        .with_delay(Duration::from_millis(args.delay)))
}

async fn solve<A: MouseApi>(
    api: A,
    strategy: Strategy,
    config: SolverConfig,
    runs: usize,
    view: View,
) -> Result<()> {
    let size = config.size;
    let goals = config.goals.clone();
    match strategy {
        Strategy::Frontier => {
            drive(Navigator::new(api, config), runs, view, size, &goals).await
        }
        Strategy::WallFollower => {
            drive(WallFollower::new(api, config), runs, view, size, &goals).await
        }
    }
}

/// runs the solver repeatedly, keeping the map it builds between runs
async fn drive<S: Solver>(
    mut solver: S,
    runs: usize,
    view: View,
    size: usize,
    goals: &GoalSet,
) -> Result<()> {
    for run in 1..=runs.max(1) {
        let report = solver.run().await?;
        print_report(run, &report, view)?;

        let map = render(solver.walls(), size, goals, Some(solver.tracker().position()));
        if view.render {
            println!("{}", map);
        } else {
            debug!("discovered map:\n{}", map);
        }
    }
    Ok(())
}

fn print_report(run: usize, report: &RunReport, view: View) -> Result<()> {
    if view.json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    match &report.outcome {
        Outcome::Reached { flag } => {
            info!(
                "run {}: goal reached in {} moves ({:?})",
                run, report.counters.moves, report.total_time
            );
            if let Some(flag) = flag {
                info!("flag: {}", flag);
            }
        }
        Outcome::Stuck => {
            warn!(
                "run {}: no reachable goal after {} moves",
                run, report.counters.moves
            );
        }
    }
    debug!(
        "{} sensor reads, {} goal plans, {} frontier plans, {} fallback steps, {} replans",
        report.counters.sensor_reads,
        report.counters.goal_plans,
        report.counters.frontier_plans,
        report.counters.fallback_steps,
        report.counters.replans
    );
    debug!("planning: {:?}", report.planning_time);
    debug!("execution: {:?}", report.execution_time);
    debug!("{} cells fully known", report.cells_known);
    Ok(())
}

fn report_optimum(layout: &Layout) -> Result<()> {
    match omniscient::optimal_moves(layout)? {
        Some(moves) => info!(
            "shortest possible route in the {}x{} maze: {} moves",
            layout.size(),
            layout.size(),
            moves
        ),
        None => warn!("no goal is reachable from the start"),
    }
    Ok(())
}

async fn run_benchmark(config: SolverConfig, seed: u64, mazes: usize) -> Result<()> {
    info!("benchmarking {} mazes from seed {}", mazes, seed);

    let mut results = Vec::new();
    for offset in 0..mazes as u64 {
        let maze_seed = seed.wrapping_add(offset);
        let layout = Layout::generate(config.size, &mut StdRng::seed_from_u64(maze_seed))
            .with_goals(config.goals.clone());
        let optimum = omniscient::optimal_moves(&layout)?;
        let maze = SimulatedMaze::new(layout, None);

        for strategy in Strategy::all() {
            let mouse = maze.mouse(&format!("{}-{}", strategy.name(), maze_seed));
            let report = match strategy {
                Strategy::Frontier => Navigator::new(mouse, config.clone()).run().await,
                Strategy::WallFollower => WallFollower::new(mouse, config.clone()).run().await,
            };

            match report {
                Ok(report) => results.push((maze_seed, optimum, report)),
                Err(e) => error!("{} failed on seed {}: {}", strategy.name(), maze_seed, e),
            }
        }
    }

    print_benchmark_summary(&results);
    Ok(())
}

fn print_benchmark_summary(results: &[(u64, Option<usize>, RunReport)]) {
    info!("\nbenchmark results:");
    info!(
        "{:<20} {:>20} {:>8} {:>8}  {:>12}  {:>12}",
        "strategy", "seed", "optimal", "moves", "plan", "total"
    );
    info!("{:-<90}", "");

    for (seed, optimum, report) in results {
        let optimum = optimum.map_or_else(|| "-".to_string(), |moves| moves.to_string());
        info!(
            "{:<20} {:>20} {:>8} {:>8}  {:>12?}  {:>12?}",
            report.strategy,
            seed,
            optimum,
            report.counters.moves,
            report.planning_time,
            report.total_time,
        );
    }

    for strategy in Strategy::all() {
        let runs: Vec<_> = results
            .iter()
            .filter(|(_, _, report)| report.strategy == strategy.name())
            .collect();
        if runs.is_empty() {
            continue;
        }

        let reached = runs.iter().filter(|(_, _, r)| r.outcome.is_reached()).count();
        let moves: usize = runs.iter().map(|(_, _, r)| r.counters.moves).sum();
        info!(
            "{}: reached {}/{}, {:.1} moves on average",
            strategy.name(),
            reached,
            runs.len(),
            moves as f64 / runs.len() as f64
        );
    }

    if let Some((seed, _, report)) = results
        .iter()
        .filter(|(_, _, r)| r.outcome.is_reached())
        .min_by_key(|(_, _, r)| r.counters.moves)
    {
        info!(
            "\nbest: {} on seed {} ({} moves)",
            report.strategy, seed, report.counters.moves
        );
    }
}

async fn run_manual(api: &HttpMouse, action: ManualAction) -> Result<()> {
    let relative = match action {
        ManualAction::Walls => {
            let walls = api.surroundings().await?;
            for (relative, walled) in walls.readings() {
                info!("{:<8} {}", relative.as_str(), if walled { "wall" } else { "open" });
            }
            return Ok(());
        }
        ManualAction::Reset => {
            api.reset().await?;
            info!("{} is back at the start", api.name());
            return Ok(());
        }
        ManualAction::Forward => Relative::Forward,
        ManualAction::Back => Relative::Back,
        ManualAction::Left => Relative::Left,
        ManualAction::Right => Relative::Right,
    };

    let outcome = api.move_mouse(relative).await?;
    if !outcome.success {
        warn!("{} is blocked", relative);
    } else if outcome.goal_reached {
        info!("goal reached");
        if let Some(flag) = outcome.flag {
            info!("flag: {}", flag);
        }
    } else {
        info!("moved {}", relative);
    }
    Ok(())
}
