use std::{
    fmt::Display,
    fs::OpenOptions,
    io::Write,
    path::Path,
    time::{Duration, Instant},
};

use log::warn;

use crate::{
    error::{Error, Result},
    grid::Grid,
    heuristic::Heuristic,
    puzzle_set::PuzzleConfig,
    search::Searcher,
    validator::is_valid,
};

/// Outcome of solving one puzzle with one heuristic.
#[derive(Clone, Copy, Debug)]
pub struct RunRecord {
    pub expanded: usize,
    pub depth: usize,
    pub elapsed: Duration,
    pub valid: bool,
}

/// Times one search and checks its parent chain against `initial`.
pub fn solve_and_validate(
    searcher: &Searcher,
    initial: &Grid,
    heuristic: Heuristic,
) -> Result<RunRecord> {
    let start = Instant::now();
    let solution = searcher.search(initial.clone(), heuristic)?;
    let elapsed = start.elapsed();

    let valid = is_valid(solution.tree(), solution.goal_id(), initial);
    Ok(RunRecord {
        expanded: solution.expanded(),
        depth: solution.reconstruct().depth,
        elapsed,
        valid,
    })
}

#[derive(Clone, Debug, Default)]
pub struct Summary {
    pub solved: usize,
    pub unsolved: usize,
    pub invalid: usize,
    expanded: usize,
    depth: usize,
    elapsed: Duration,
}

impl Summary {
    pub fn add(&mut self, record: &RunRecord) {
        self.solved += 1;
        self.expanded += record.expanded;
        self.depth += record.depth;
        self.elapsed += record.elapsed;
        if !record.valid {
            self.invalid += 1;
        }
    }

    fn mean(&self, total: f64) -> f64 {
        if self.solved == 0 {
            0.0
        } else {
            total / self.solved as f64
        }
    }

    pub fn average_expanded(&self) -> f64 {
        self.mean(self.expanded as f64)
    }

    pub fn average_depth(&self) -> f64 {
        self.mean(self.depth as f64)
    }

    pub fn average_millis(&self) -> f64 {
        self.mean(self.elapsed.as_secs_f64() * 1000.0)
    }
}

/// Averages for one puzzle set, per heuristic.
#[derive(Clone, Debug)]
pub struct SetReport {
    pub config: PuzzleConfig,
    pub summaries: Vec<(Heuristic, Summary)>,
}

fn title(heuristic: Heuristic) -> &'static str {
    match heuristic {
        Heuristic::MisplacedTiles => "H1: Number Misplaced",
        Heuristic::ManhattanDistance => "H2: Manhattan Distance",
    }
}

/// Solves every puzzle with every heuristic in `heuristics`.
///
/// Puzzles the searcher gives up on are counted as unsolved. `on_puzzle` runs
/// once per puzzle, after all heuristics had their turn.
pub fn run_set(
    searcher: &Searcher,
    config: PuzzleConfig,
    puzzles: &[Grid],
    heuristics: &[Heuristic],
    mut on_puzzle: impl FnMut(),
) -> Result<SetReport> {
    let mut summaries: Vec<(Heuristic, Summary)> = heuristics
        .iter()
        .map(|&h| (h, Summary::default()))
        .collect();

    for puzzle in puzzles {
        for (heuristic, summary) in summaries.iter_mut() {
            match solve_and_validate(searcher, puzzle, *heuristic) {
                Ok(record) => {
                    if !record.valid {
                        warn!("solution invalid for {:?} with {}", puzzle, heuristic);
                    }
                    summary.add(&record);
                }
                Err(err @ (Error::NotFound { .. } | Error::ExpansionLimit { .. })) => {
                    warn!("{:?} with {}: {}", puzzle, heuristic, err);
                    summary.unsolved += 1;
                }
                Err(err) => return Err(err),
            }
        }
        on_puzzle();
    }

    Ok(SetReport { config, summaries })
}

const STARS: &str = "************************";
const EQUALS: &str = "========================";
const DASHES: &str = "------------------------";

impl Display for SetReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", STARS)?;
        writeln!(f, "size:          {}", self.config.size)?;
        writeln!(f, "seed:          {}", self.config.seed)?;
        writeln!(f, "swaps:         {}", self.config.swaps)?;
        writeln!(f, "number:        {}", self.config.number)?;
        writeln!(f, "{}", EQUALS)?;

        let mut first = true;
        for (heuristic, summary) in &self.summaries {
            if !first {
                writeln!(f, "{}", DASHES)?;
            } else {
                first = false;
            }

            writeln!(f, "{}", title(*heuristic))?;
            writeln!(f, "{}", DASHES)?;
            writeln!(f, "expanded:      {}", summary.average_expanded())?;
            writeln!(f, "treeDepth:     {}", summary.average_depth())?;
            writeln!(f, "execTime (ms): {}", summary.average_millis())?;
            if summary.unsolved > 0 || summary.invalid > 0 {
                writeln!(f, "unsolved:      {}", summary.unsolved)?;
                writeln!(f, "invalid:       {}", summary.invalid)?;
            }
        }

        writeln!(f, "{}", STARS)
    }
}

/// Appends `report` and a blank line to the log at `path`.
pub fn append_log(path: &Path, report: &SetReport) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{}", report)?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::grid;

    fn config() -> PuzzleConfig {
        PuzzleConfig {
            size: 3,
            seed: 1,
            swaps: 10,
            number: 2,
        }
    }

    #[test]
    fn averages() {
        let mut summary = Summary::default();
        assert_eq!(summary.average_depth(), 0.0);

        for (expanded, depth) in [(10, 4), (20, 6)] {
            summary.add(&RunRecord {
                expanded,
                depth,
                elapsed: Duration::from_millis(3),
                valid: true,
            });
        }
        assert_eq!(summary.solved, 2);
        assert_eq!(summary.average_expanded(), 15.0);
        assert_eq!(summary.average_depth(), 5.0);
        assert!((summary.average_millis() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn runs_set() {
        let puzzles = [
            grid(&[&[1, 2, 3], &[0, 4, 5], &[7, 8, 6]]),
            grid(&[&[0, 1, 2], &[4, 5, 3], &[6, 7, 8]]),
        ];
        let mut ticks = 0;
        let report = run_set(&Searcher::new(), config(), &puzzles, &Heuristic::ALL, || ticks += 1).unwrap();

        assert_eq!(ticks, 2);
        assert_eq!(report.summaries.len(), 2);
        for (_, summary) in &report.summaries {
            assert_eq!(summary.solved, 2);
            assert_eq!(summary.invalid, 0);
            assert_eq!(summary.unsolved, 0);
        }
    }

    #[test]
    fn unsolvable_counted() {
        let puzzles = [grid(&[&[0, 2, 1], &[3, 4, 5], &[6, 7, 8]])];
        let report = run_set(
            &Searcher::with_limit(50),
            config(),
            &puzzles,
            &[Heuristic::ManhattanDistance],
            || {},
        )
        .unwrap();
        assert_eq!(report.summaries[0].1.unsolved, 1);
        assert_eq!(report.summaries[0].1.solved, 0);
    }

    #[test]
    fn log_block() {
        let report = SetReport {
            config: config(),
            summaries: vec![(Heuristic::MisplacedTiles, Summary::default())],
        };
        let text = report.to_string();
        assert!(text.starts_with(STARS));
        assert!(text.contains("size:          3\n"));
        assert!(text.contains("H1: Number Misplaced\n"));
        assert!(text.contains("treeDepth:     0\n"));
        assert!(!text.contains("H2"));
    }

    #[test]
    fn appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("log.txt");
        let report = SetReport {
            config: config(),
            summaries: vec![(Heuristic::ManhattanDistance, Summary::default())],
        };
        append_log(&path, &report).unwrap();
        append_log(&path, &report).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.matches("H2: Manhattan Distance").count(), 2);
        assert!(text.ends_with(&format!("{}\n\n", STARS)));
    }
}
