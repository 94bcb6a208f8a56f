//! Puzzle config files, puzzle set files and the grid literal format.
//!
//! A config file holds `key: value` lines for `size`, `seed`, `swaps` and
//! `number`. A puzzle set file holds one grid literal per line, e.g.
//! `[[5, 3, 4], [0, 6, 1], [7, 8, 2]]`, and is named after its config:
//! `puzzleSet-{size}-{seed}-{swaps}-{number}.txt`.

use std::{
    fs,
    path::{Path, PathBuf},
};

use itertools::Itertools;
use log::{info, warn};

use crate::{
    error::{Error, Result},
    grid::Grid,
};

const SET_PREFIX: &str = "puzzleSet-";
const SET_SUFFIX: &str = ".txt";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PuzzleConfig {
    pub size: usize,
    pub seed: u64,
    pub swaps: usize,
    pub number: usize,
}

fn parse_error(line: usize, message: impl Into<String>) -> Error {
    Error::Parse {
        line,
        message: message.into(),
    }
}

fn parse_value<T: std::str::FromStr>(line: usize, key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| parse_error(line, format!("bad value {:?} for {}", value.trim(), key)))
}

impl PuzzleConfig {
    pub fn parse(text: &str) -> Result<PuzzleConfig> {
        let mut size = None;
        let mut seed = None;
        let mut swaps = None;
        let mut number = None;

        for (ix, line) in text.lines().enumerate() {
            let line_no = ix + 1;
            if line.trim().is_empty() {
                continue;
            }

            let (key, value) = line
                .split_once(':')
                .ok_or_else(|| parse_error(line_no, format!("expected `key: value`, got {:?}", line)))?;
            match key.trim() {
                "size" => size = Some(parse_value(line_no, "size", value)?),
                "seed" => seed = Some(parse_value(line_no, "seed", value)?),
                "swaps" => swaps = Some(parse_value(line_no, "swaps", value)?),
                "number" => number = Some(parse_value(line_no, "number", value)?),
                other => warn!("line {}: unknown key {:?}", line_no, other),
            }
        }

        let last = text.lines().count();
        let missing = |key: &str| parse_error(last, format!("missing {}", key));
        Ok(PuzzleConfig {
            size: size.ok_or_else(|| missing("size"))?,
            seed: seed.ok_or_else(|| missing("seed"))?,
            swaps: swaps.ok_or_else(|| missing("swaps"))?,
            number: number.ok_or_else(|| missing("number"))?,
        })
    }

    pub fn read(path: &Path) -> Result<PuzzleConfig> {
        PuzzleConfig::parse(&fs::read_to_string(path)?)
    }

    pub fn set_file_name(&self) -> String {
        format!(
            "{}{}-{}-{}-{}{}",
            SET_PREFIX, self.size, self.seed, self.swaps, self.number, SET_SUFFIX
        )
    }

    /// Inverse of [`PuzzleConfig::set_file_name`].
    pub fn from_set_file_name(name: &str) -> Result<PuzzleConfig> {
        let bad = || Error::SetFileName(name.to_string());
        let fields = name
            .strip_prefix(SET_PREFIX)
            .and_then(|rest| rest.strip_suffix(SET_SUFFIX))
            .ok_or_else(bad)?;

        let (size, seed, swaps, number) = fields.split('-').collect_tuple().ok_or_else(bad)?;
        Ok(PuzzleConfig {
            size: size.parse().map_err(|_| bad())?,
            seed: seed.parse().map_err(|_| bad())?,
            swaps: swaps.parse().map_err(|_| bad())?,
            number: number.parse().map_err(|_| bad())?,
        })
    }
}

pub fn parse_grid(literal: &str) -> Result<Grid> {
    parse_grid_line(literal, 1)
}

fn parse_grid_line(literal: &str, line: usize) -> Result<Grid> {
    let inner = literal
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| parse_error(line, "grid must be wrapped in [ ]"))?;

    let rows = inner
        .split("],")
        .map(|row| {
            row.trim()
                .trim_start_matches('[')
                .trim_end_matches(']')
                .split(',')
                .map(|cell| {
                    cell.trim()
                        .parse::<u8>()
                        .map_err(|_| parse_error(line, format!("bad cell {:?}", cell.trim())))
                })
                .collect::<Result<Vec<u8>>>()
        })
        .collect::<Result<Vec<Vec<u8>>>>()?;

    Grid::new(rows)
}

pub fn read_set(path: &Path) -> Result<Vec<Grid>> {
    fs::read_to_string(path)?
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(ix, line)| parse_grid_line(line, ix + 1))
        .collect()
}

/// Writes `puzzles` into `dir`, named after `config`. Returns the file path.
pub fn write_set(dir: &Path, config: &PuzzleConfig, puzzles: &[Grid]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let path = dir.join(config.set_file_name());
    let existed = path.exists();

    let mut text = puzzles.iter().map(Grid::to_literal).join("\n");
    text.push('\n');
    fs::write(&path, text)?;

    if !existed {
        info!("file {:?} created", path);
    }
    Ok(path)
}

/// Regular files of `dir` in name order, dot files skipped.
pub fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if !hidden && entry.file_type()?.is_file() {
            files.push(entry.path());
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::grid::grid;

    #[test]
    fn parses_config() {
        let config = PuzzleConfig::parse("size: 3\nseed: 2424\nswaps: 80\nnumber: 100\n").unwrap();
        assert_eq!(
            config,
            PuzzleConfig {
                size: 3,
                seed: 2424,
                swaps: 80,
                number: 100
            }
        );
        assert_eq!(config.set_file_name(), "puzzleSet-3-2424-80-100.txt");
    }

    #[test]
    fn config_errors() {
        assert!(matches!(
            PuzzleConfig::parse("size: 3\nseed: x\nswaps: 8\nnumber: 1"),
            Err(Error::Parse { line: 2, .. })
        ));
        assert!(matches!(
            PuzzleConfig::parse("size: 3\nseed: 1\nswaps: 8"),
            Err(Error::Parse { .. })
        ));
        assert!(matches!(
            PuzzleConfig::parse("size 3"),
            Err(Error::Parse { line: 1, .. })
        ));
        // unknown keys are skipped
        assert!(PuzzleConfig::parse("size: 2\ncolor: red\nseed: 1\nswaps: 8\nnumber: 1").is_ok());
    }

    #[test]
    fn file_names() {
        let config = PuzzleConfig::from_set_file_name("puzzleSet-4-17-30-5.txt").unwrap();
        assert_eq!(
            config,
            PuzzleConfig {
                size: 4,
                seed: 17,
                swaps: 30,
                number: 5
            }
        );
        assert!(PuzzleConfig::from_set_file_name("puzzleSet-4-17-30.txt").is_err());
        assert!(PuzzleConfig::from_set_file_name("log.txt").is_err());
        assert!(PuzzleConfig::from_set_file_name("puzzleSet-4-a-30-5.txt").is_err());
    }

    #[test]
    fn grid_literals() {
        assert_eq!(
            parse_grid("[[5, 3, 4], [0, 6, 1], [7, 8, 2]]").unwrap(),
            grid(&[&[5, 3, 4], &[0, 6, 1], &[7, 8, 2]])
        );
        assert_eq!(parse_grid(" [[0,1],[2,3]] ").unwrap(), Grid::goal(2).unwrap());
        assert!(matches!(parse_grid("[[0, 1], [2, x]]"), Err(Error::Parse { .. })));
        assert!(matches!(parse_grid("0, 1, 2, 3"), Err(Error::Parse { .. })));
        assert!(matches!(
            parse_grid("[[0, 1, 2, 3, 4], [5, 6, 7, 8, 9], [10, 11, 12, 13, 14], [15, 16, 17, 18, 19], [20, 21, 22, 23, 24]]"),
            Err(Error::UnsupportedPuzzleSize { size: 5 })
        ));

        let g = grid(&[&[2, 3, 5], &[1, 8, 4], &[7, 6, 0]]);
        assert_eq!(parse_grid(&g.to_literal()).unwrap(), g);
    }
}
