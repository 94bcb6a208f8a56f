use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::{debug, info, warn};
use slider_astar::{
    parse_grid,
    puzzle_set::{list_files, read_set, write_set},
    report::{append_log, run_set},
    validator::{moves, optimal_depth, path},
    Generator, Heuristic, PuzzleConfig, Searcher,
};

const CONFIG_DIR: &str = "data/puzzleConfig";
const SET_DIR: &str = "data/puzzleSet";
const LOG_FILE: &str = "data/log.txt";

// With no subcommand, generates the puzzle sets and then runs them,
// using the default data directories.
#[derive(Parser)]
#[command(version, about = "A* solver for 2x2, 3x3 and 4x4 sliding-tile puzzles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Turn every puzzle config file into a puzzle set file
    Generate {
        #[arg(long, default_value = CONFIG_DIR)]
        config_dir: PathBuf,
        #[arg(long, default_value = SET_DIR)]
        out_dir: PathBuf,
    },
    /// Solve every puzzle set and append the averages to the log
    Run {
        #[arg(long, default_value = SET_DIR)]
        set_dir: PathBuf,
        #[arg(long, default_value = LOG_FILE)]
        log: PathBuf,
        /// Only this heuristic instead of all of them
        #[arg(long)]
        heuristic: Option<Heuristic>,
        /// Give up on a puzzle after this many expansions
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Solve one puzzle given as `[[1, 2, 3], [0, 4, 5], [7, 8, 6]]`
    Solve {
        grid: String,
        #[arg(long, default_value = "manhattan-distance")]
        heuristic: Heuristic,
        #[arg(long)]
        limit: Option<usize>,
        /// Also compute a shortest solution for comparison
        #[arg(long)]
        optimal: bool,
    },
}

fn searcher(limit: Option<usize>) -> Searcher {
    limit.map_or_else(Searcher::new, Searcher::with_limit)
}

fn generate(config_dir: &Path, out_dir: &Path) -> anyhow::Result<()> {
    let configs = list_files(config_dir)
        .with_context(|| format!("reading config directory {:?}", config_dir))?;

    for file in configs {
        let config = PuzzleConfig::read(&file).with_context(|| format!("reading {:?}", file))?;
        let puzzles = Generator::new(config.seed)
            .make_puzzles(config.size, config.swaps, config.number)
            .with_context(|| format!("generating from {:?}", file))?;
        let written = write_set(out_dir, &config, &puzzles)
            .with_context(|| format!("writing puzzles for {:?}", file))?;
        debug!("{:?} -> {:?}", file, written);
    }

    Ok(())
}

fn run(
    set_dir: &Path,
    log: &Path,
    heuristic: Option<Heuristic>,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    let searcher = searcher(limit);
    let heuristics = Heuristic::selected(heuristic).collect::<Vec<_>>();
    let sets = list_files(set_dir).with_context(|| format!("reading set directory {:?}", set_dir))?;

    println!("progress: ");
    for file in sets {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let config = match PuzzleConfig::from_set_file_name(&name) {
            Ok(config) => config,
            Err(err) => {
                warn!("skipping {:?}: {}", file, err);
                continue;
            }
        };

        let puzzles = read_set(&file).with_context(|| format!("reading {:?}", file))?;
        for puzzle in puzzles.iter().filter(|p| !p.is_solvable()) {
            warn!("{:?} in {} cannot reach the goal", puzzle, name);
        }

        print!("{}: ", name);
        io::stdout().flush()?;
        let report = run_set(&searcher, config, &puzzles, &heuristics, || {
            print!("#");
            if let Err(err) = io::stdout().flush() {
                warn!("flushing progress: {}", err);
            }
        })?;
        println!();

        append_log(log, &report).with_context(|| format!("appending to {:?}", log))?;
    }
    println!();

    info!("results appended to {:?}", log);
    Ok(())
}

fn solve(grid: &str, heuristic: Heuristic, limit: Option<usize>, optimal: bool) -> anyhow::Result<()> {
    let start = parse_grid(grid).context("parsing grid")?;
    if !start.is_solvable() {
        warn!("{:?} cannot reach the goal, expect an exhausted frontier", start);
    }

    let solution = searcher(limit).search(start.clone(), heuristic)?;
    let tree = solution.tree();
    println!(
        "Found a solution in {} moves with {}:",
        solution.goal().path_cost(),
        heuristic
    );
    println!(
        "Expanded {} states (generated {} total).",
        solution.expanded(),
        tree.len()
    );

    println!("----");
    println!("{}", start);
    for (id, direction) in path(tree, solution.goal_id())
        .into_iter()
        .skip(1)
        .zip(moves(tree, solution.goal_id()))
    {
        println!("---- {}", direction);
        println!("{}", tree[id].grid());
    }
    println!("----");

    if optimal {
        match optimal_depth(&start) {
            Some(depth) => println!("Shortest solution: {} moves", depth),
            None => println!("No solution exists"),
        }
    }

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Generate {
            config_dir,
            out_dir,
        }) => generate(&config_dir, &out_dir),
        Some(Command::Run {
            set_dir,
            log,
            heuristic,
            limit,
        }) => run(&set_dir, &log, heuristic, limit),
        Some(Command::Solve {
            grid,
            heuristic,
            limit,
            optimal,
        }) => solve(&grid, heuristic, limit, optimal),
        None => {
            generate(Path::new(CONFIG_DIR), Path::new(SET_DIR))?;
            run(Path::new(SET_DIR), Path::new(LOG_FILE), None, None)
        }
    }
}
