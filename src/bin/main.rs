use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anstream::eprintln;
use anstream::println;
use clap::Parser;
use hrsw::Stopwatch;
use human_duration::human_duration;
use owo_colors::OwoColorize;
use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::SeedableRng;
use thiserror::Error;
use thousands::Separable;

use gps_search::algorithms::Algorithm;
use gps_search::algorithms::SearchOutcome;
use gps_search::problem::Problem;
use gps_search::problems::map::ConfigurationError;
use gps_search::problems::map::LocationId;
use gps_search::problems::map::MapAction;
use gps_search::problems::map::MapCost;
use gps_search::problems::map::MapParseError;
use gps_search::problems::map::MapProblem;
use gps_search::problems::map::MapSpace;
use gps_search::problems::map::StraightLineDistance;
use gps_search::problems::romania::romania;
use gps_search::problems::romania::romania_city;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

/// Finds routes between locations with each search algorithm in turn.
#[derive(Parser, Debug)]
#[clap(long_version = gps_search::build::CLAP_LONG_VERSION)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Map to search. Defaults to the road map of Romania.
    #[arg(short, long, env = "GPS_MAP")]
    pub map: Option<PathBuf>,

    #[arg(short, long, default_value = "M")]
    pub start: String,
    /// Any of these ends the search.
    #[arg(short, long, default_values_t = ["F".to_string()])]
    pub goal: Vec<String>,

    /// Algorithms to run. Defaults to all of them.
    #[arg(short, long, value_enum)]
    pub algorithm: Vec<Algorithm>,

    /// Searches a random map between random locations instead.
    #[arg(long, conflicts_with_all = ["map", "start", "goal"])]
    pub random: Option<u64>,
    #[arg(long, default_value_t = 1_000usize)]
    pub random_locations: usize,
    #[arg(long, default_value_t = 2_500usize)]
    pub random_roads: usize,

    /// Log filter, overridden by RUST_LOG.
    #[arg(long, default_value = "warn")]
    pub log_level: String,

    #[command(flatten)]
    color: colorchoice_clap::Color,
}

#[derive(Debug, Error)]
enum DriverError {
    #[error("Can't set up logging: {0}")]
    Logger(#[from] flexi_logger::FlexiLoggerError),
    #[error("Can't load map: {0}")]
    Map(#[from] MapParseError),
    #[error("Invalid problem: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Can't pick a random problem on a map with {0} locations")]
    NoRandomProblem(usize),
}

fn load_problem(args: &Args) -> Result<MapProblem, DriverError> {
    if let Some(seed) = args.random {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let space = MapSpace::random(&mut rng, args.random_locations, args.random_roads);
        let len = space.len();
        return MapProblem::randomize(space, &mut rng).ok_or(DriverError::NoRandomProblem(len));
    }

    let space = match &args.map {
        Some(path) => MapSpace::try_from(path.as_path())?,
        None => romania(),
    };
    let problem = MapProblem::with_goals(space, &args.start, args.goal.iter().map(String::as_str))?;
    Ok(problem)
}

/// A location's name, spelled out for the built-in map.
fn display_name(problem: &MapProblem, s: LocationId, builtin: bool) -> String {
    let name = problem.space().name(s);
    match romania_city(name) {
        Some(city) if builtin => format!("{city} ({name})"),
        _ => name.to_string(),
    }
}

fn report(
    problem: &MapProblem,
    algorithm: Algorithm,
    outcome: &SearchOutcome<LocationId, MapAction, MapCost>,
    elapsed: Duration,
) {
    println!(
        "{}: generated {:>7} visited {:>7} in {}",
        format!("{:>32}", algorithm.name()).bold(),
        outcome.generated().separate_with_commas(),
        outcome.visited().separate_with_commas(),
        human_duration(&elapsed).dimmed(),
    );

    match (outcome.cost(), outcome.states()) {
        (Some(cost), Some(states)) => {
            println!("{:>32}  cost {}", "", cost.green());
            println!(
                "{:>32}  route {}",
                "",
                problem.space().route(&states).join(" -> ")
            );
        }
        _ => println!("{:>32}  {}", "", "no solution".red()),
    }
    log::debug!("{algorithm}: {}", outcome.statistics());
}

fn run(args: Args) -> Result<(), DriverError> {
    let _logger = flexi_logger::Logger::try_with_env_or_str(&args.log_level)?
        .log_to_stderr()
        .start()?;

    let problem = load_problem(&args)?;
    let builtin = args.map.is_none() && args.random.is_none();
    let goals: Vec<String> = problem
        .goals()
        .iter()
        .map(|g| display_name(&problem, *g, builtin))
        .collect();
    println!("{}", problem.space().yellow());
    println!(
        "{} -> {}",
        display_name(&problem, problem.initial(), builtin).bold(),
        goals.join(" | ").bold()
    );

    let algorithms = if args.algorithm.is_empty() {
        Algorithm::ALL.to_vec()
    } else {
        args.algorithm.clone()
    };
    for algorithm in algorithms {
        let mut stopwatch = Stopwatch::new_started();
        let outcome = algorithm.run(&problem, StraightLineDistance);
        stopwatch.stop();
        report(&problem, algorithm, &outcome, stopwatch.elapsed());
    }

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    args.color.write_global();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.red());
            ExitCode::FAILURE
        }
    }
}
