use std::{fmt::Display, str::FromStr};

use crate::{
    error::Error,
    grid::Grid,
    state::PuzzleState,
};

/// Cost-to-goal estimates. Both count the blank as a tile, so both are zero
/// exactly at the goal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    MisplacedTiles,
    ManhattanDistance,
}

impl Heuristic {
    pub const ALL: [Heuristic; 2] = [Heuristic::MisplacedTiles, Heuristic::ManhattanDistance];

    pub fn evaluate(self, grid: &Grid) -> u32 {
        match self {
            Heuristic::MisplacedTiles => misplaced_tiles(grid),
            Heuristic::ManhattanDistance => manhattan_distance(grid),
        }
    }

    pub fn score(self, state: &PuzzleState) -> u32 {
        self.evaluate(state.grid())
    }

    /// Either the one requested heuristic or all of them.
    #[auto_enums::auto_enum(Iterator)]
    pub fn selected(choice: Option<Heuristic>) -> impl Iterator<Item = Heuristic> {
        match choice {
            Some(h) => std::iter::once(h),
            None => Heuristic::ALL.into_iter(),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Heuristic::MisplacedTiles => "misplaced-count",
            Heuristic::ManhattanDistance => "manhattan-distance",
        }
    }
}

impl Display for Heuristic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Heuristic {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "misplaced-count" | "misplaced" | "nMisplaced" | "h1" => Ok(Heuristic::MisplacedTiles),
            "manhattan-distance" | "manhattan" | "manhattanDist" | "h2" => {
                Ok(Heuristic::ManhattanDistance)
            }
            _ => Err(Error::UnknownHeuristic(s.to_string())),
        }
    }
}

// cells whose value differs from their row-major index, blank included
fn misplaced_tiles(grid: &Grid) -> u32 {
    grid.cells()
        .iter()
        .enumerate()
        .filter(|&(ix, &c)| c as usize != ix)
        .count() as u32
}

// for every misplaced position, the distance from the cell currently holding
// the value that belongs there, blank included
fn manhattan_distance(grid: &Grid) -> u32 {
    let side = grid.side();
    let mut position = [0usize; 16];
    for (ix, &c) in grid.cells().iter().enumerate() {
        position[c as usize] = ix;
    }

    (0..side * side)
        .filter(|&ix| position[ix] != ix)
        .map(|ix| offset(ix, position[ix], side))
        .sum()
}

/// Manhattan distance over the numbered tiles only. Never overestimates the
/// number of moves left, unlike the blank-counting variants.
pub fn tile_distance(grid: &Grid) -> u32 {
    let side = grid.side();
    grid.cells()
        .iter()
        .enumerate()
        .filter(|&(_, &c)| c != 0)
        .map(|(ix, &c)| offset(ix, c as usize, side))
        .sum()
}

fn offset(from: usize, to: usize, side: usize) -> u32 {
    ((from / side).abs_diff(to / side) + (from % side).abs_diff(to % side)) as u32
}
