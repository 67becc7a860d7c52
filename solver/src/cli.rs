use clap::{Parser, Subcommand, ValueEnum};
use log::LevelFilter;

use micromouse::maze::Position;
use micromouse::solvers::DEFAULT_MAX_MOVES;

#[derive(Parser, Debug)]
#[command(name = "micromouse")]
#[command(about = "Blind maze navigator that maps the maze from its own sensor readings")]
pub struct Args {
    /// Sets the logger's verbosity level
    #[arg(short, long, value_name = "VERBOSITY", default_value_t = LevelFilter::Info)]
    pub verbosity: LevelFilter,

    /// Maze size (NxN)
    #[arg(short, long, default_value_t = 32)]
    pub size: usize,

    /// Goal cell as x,y (repeatable, defaults to the centre 2x2 block)
    #[arg(long = "goal", value_name = "X,Y", value_parser = parse_cell)]
    pub goals: Vec<Position>,

    /// Give up after this many moves
    #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
    pub max_moves: usize,

    /// Delay between moves in milliseconds (0 = no delay)
    #[arg(short, long, default_value_t = 0)]
    pub delay: u64,

    /// Navigation strategy
    #[arg(long, value_enum, default_value_t = Strategy::Frontier)]
    pub strategy: Strategy,

    /// Print run reports as JSON
    #[arg(long)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Navigate a mouse on a remote maze server
    Remote {
        /// Base URL of the maze server
        #[arg(long, default_value = "http://127.0.0.1:8000")]
        url: String,

        /// Mouse name, each name has its own position on the server
        #[arg(short, long, default_value = "astar")]
        name: String,

        /// Number of runs; later runs reuse the map built so far
        #[arg(long, default_value_t = 1)]
        runs: usize,

        /// Per-request timeout in milliseconds
        #[arg(long, default_value_t = 5_000)]
        timeout_ms: u64,
    },

    /// Generate a maze in-process and navigate it
    Simulate {
        /// Seed for maze generation (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Number of runs per mouse
        #[arg(long, default_value_t = 1)]
        runs: usize,

        /// Mice to run concurrently, each with its own map
        #[arg(long, value_delimiter = ',', default_value = "mouse")]
        mice: Vec<String>,

        /// Completion flag handed out at the goal
        #[arg(long)]
        flag: Option<String>,

        /// Print the discovered map after each run
        #[arg(long)]
        render: bool,
    },

    /// Benchmark mode: run every strategy on generated mazes
    Benchmark {
        /// Seed of the first maze
        #[arg(long)]
        seed: Option<u64>,

        /// Number of mazes
        #[arg(long, default_value_t = 5)]
        mazes: usize,
    },

    /// Issue a single request against a remote maze server
    Manual {
        #[arg(value_enum)]
        action: ManualAction,

        #[arg(long, default_value = "http://127.0.0.1:8000")]
        url: String,

        #[arg(short, long, default_value = "manual")]
        name: String,

        #[arg(long, default_value_t = 5_000)]
        timeout_ms: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Strategy {
    /// Goal search over confirmed walls, frontier exploration otherwise
    Frontier,

    /// Left-hand wall follower
    #[value(name = "wall-follower")]
    WallFollower,
}

impl Strategy {
    pub fn all() -> impl Iterator<Item = Self> {
        [Self::Frontier, Self::WallFollower].into_iter()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Frontier => "frontier",
            Self::WallFollower => "wall-follower",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ManualAction {
    Forward,
    Back,
    Left,
    Right,
    Reset,
    Walls,
}

fn parse_cell(s: &str) -> Result<Position, String> {
    s.parse().map_err(|e: eyre::Report| e.to_string())
}
