use std::{
    fmt::{Debug, Display, Write},
    ops::Index,
};

use itertools::Itertools;

use crate::error::{Error, Result};

pub const SUPPORTED_SIZES: [usize; 3] = [2, 3, 4];

const BLANK: u8 = 0;

/// The direction the blank travels in a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// Expansion order. Also the order of a state's child slots.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    pub fn slot(self) -> usize {
        self as usize
    }

    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

impl Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        })
    }
}

/// An `n×n` arrangement of the values `0..n²`, stored row-major. `0` is the blank.
///
/// Grids are never mutated once built; a move produces a new grid.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Grid {
    side: usize,
    cells: Vec<u8>,
}

fn check_side(side: usize) -> Result<()> {
    if SUPPORTED_SIZES.contains(&side) {
        Ok(())
    } else {
        Err(Error::UnsupportedPuzzleSize { size: side })
    }
}

impl Grid {
    pub fn new(from: Vec<Vec<u8>>) -> Result<Grid> {
        let side = from.len();
        check_side(side)?;
        if let Some((ix, row)) = from.iter().enumerate().find(|(_, row)| row.len() != side) {
            return Err(Error::InvalidGrid(format!(
                "row {} has {} cells, expected {}",
                ix,
                row.len(),
                side
            )));
        }

        Grid::from_cells(side, from.into_iter().flatten().collect())
    }

    pub fn from_cells(side: usize, cells: Vec<u8>) -> Result<Grid> {
        check_side(side)?;
        if cells.len() != side * side {
            return Err(Error::InvalidGrid(format!(
                "{} cells for a {}x{} grid",
                cells.len(),
                side,
                side
            )));
        }

        let mut seen = [false; 16];
        for &c in &cells {
            let value = c as usize;
            if value >= cells.len() || seen[value] {
                return Err(Error::InvalidGrid(format!(
                    "value {} is out of range or repeated",
                    c
                )));
            }
            seen[value] = true;
        }

        Ok(Grid { side, cells })
    }

    /// The solved configuration: `grid[r][c] == r * n + c`.
    pub fn goal(side: usize) -> Result<Grid> {
        check_side(side)?;
        Ok(Grid {
            side,
            cells: (0..(side * side) as u8).collect(),
        })
    }

    pub fn side(&self) -> usize {
        self.side
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.side)
    }

    pub fn is_goal(&self) -> bool {
        self.cells
            .iter()
            .enumerate()
            .all(|(ix, &c)| c as usize == ix)
    }

    pub fn find_blank(&self) -> (usize, usize) {
        for (ix, &c) in self.cells.iter().enumerate() {
            if c == BLANK {
                return (ix / self.side, ix % self.side);
            }
        }

        // construction guarantees a blank
        unreachable!("grid without a blank")
    }

    /// Moves the blank one cell in `direction`, or `None` if that leaves the grid.
    pub fn slide(&self, direction: Direction) -> Option<Grid> {
        self.slide_from(self.find_blank(), direction)
    }

    pub(crate) fn slide_from(&self, blank: (usize, usize), direction: Direction) -> Option<Grid> {
        let (dr, dc) = direction.delta();
        let target = (
            blank.0.checked_add_signed(dr)?,
            blank.1.checked_add_signed(dc)?,
        );
        if target.0 >= self.side || target.1 >= self.side {
            return None;
        }

        let mut moved = self.clone();
        moved
            .cells
            .swap(blank.0 * self.side + blank.1, target.0 * self.side + target.1);
        Some(moved)
    }

    /// Packs the cells four bits apiece. Distinct for distinct grids of one side.
    pub fn key(&self) -> u64 {
        self.cells
            .iter()
            .fold(0u64, |acc, &c| (acc << 4) | u64::from(c))
    }

    /// Whether the goal is reachable by legal moves, decided by inversion parity.
    ///
    /// Horizontal moves keep the tile order. A vertical move jumps a tile over
    /// `n - 1` others, so for odd `n` the inversion parity is invariant, and for
    /// even `n` the parity of inversions plus the blank's row is.
    pub fn is_solvable(&self) -> bool {
        let tiles = self.cells.iter().filter(|&&c| c != BLANK).collect_vec();
        let inversions = tiles
            .iter()
            .tuple_combinations()
            .filter(|(a, b)| a > b)
            .count();

        let parity = if self.side % 2 == 0 {
            inversions + self.find_blank().0
        } else {
            inversions
        };

        parity % 2 == 0
    }

    /// One-line form, e.g. `[[0, 1], [2, 3]]`.
    pub fn to_literal(&self) -> String {
        format!(
            "[{}]",
            self.rows()
                .map(|row| format!("[{}]", row.iter().join(", ")))
                .join(", ")
        )
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for row in self.rows() {
            if !first {
                f.write_char('\n')?;
            } else {
                first = false;
            }

            for c in row {
                if *c == BLANK {
                    f.write_str("  .")?;
                } else {
                    write!(f, "{:>3}", c)?;
                }
            }
        }

        Ok(())
    }
}

impl Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_literal())
    }
}

impl Index<(usize, usize)> for Grid {
    type Output = u8;
    fn index(&self, index: (usize, usize)) -> &Self::Output {
        &self.cells[index.0 * self.side + index.1]
    }
}

#[cfg(test)]
pub(crate) fn grid(rows: &[&[u8]]) -> Grid {
    Grid::new(rows.iter().map(|r| r.to_vec()).collect()).unwrap()
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn goal_is_ascending() {
        for side in SUPPORTED_SIZES {
            let goal = Grid::goal(side).unwrap();
            assert!(goal.is_goal());
            for r in 0..side {
                for c in 0..side {
                    assert_eq!(goal[(r, c)] as usize, r * side + c);
                }
            }
        }
    }

    #[test]
    fn rejects_unsupported_sizes() {
        assert!(matches!(
            Grid::goal(5),
            Err(Error::UnsupportedPuzzleSize { size: 5 })
        ));
        assert!(matches!(
            Grid::new(vec![vec![0]]),
            Err(Error::UnsupportedPuzzleSize { size: 1 })
        ));
        assert!(matches!(
            Grid::new(vec![]),
            Err(Error::UnsupportedPuzzleSize { size: 0 })
        ));
    }

    #[test]
    fn rejects_non_permutations() {
        assert!(matches!(
            Grid::new(vec![vec![0, 1], vec![1, 3]]),
            Err(Error::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::new(vec![vec![0, 1], vec![2, 4]]),
            Err(Error::InvalidGrid(_))
        ));
        assert!(matches!(
            Grid::new(vec![vec![0, 1], vec![2]]),
            Err(Error::InvalidGrid(_))
        ));
    }

    #[test]
    fn find_blank_examples() {
        assert_eq!(grid(&[&[2, 3, 5], &[1, 8, 4], &[7, 6, 0]]).find_blank(), (2, 2));
        assert_eq!(grid(&[&[1, 2, 3], &[0, 4, 5], &[7, 8, 6]]).find_blank(), (1, 0));
    }

    #[test]
    fn slide_stays_in_bounds() {
        let corner = grid(&[&[2, 3, 5], &[1, 8, 4], &[7, 6, 0]]);
        assert_eq!(corner.slide(Direction::Right), None);
        assert_eq!(corner.slide(Direction::Down), None);
        assert_eq!(
            corner.slide(Direction::Left),
            Some(grid(&[&[2, 3, 5], &[1, 8, 4], &[7, 0, 6]]))
        );

        let goal = Grid::goal(4).unwrap();
        assert_eq!(goal.slide(Direction::Left), None);
        assert_eq!(goal.slide(Direction::Up), None);
        let moved = goal.slide(Direction::Down).unwrap();
        assert_eq!(moved.find_blank(), (1, 0));
        assert_eq!(moved.slide(Direction::Up), Some(goal));
    }

    #[test]
    fn keys_separate_grids() {
        let a = grid(&[&[0, 1, 2], &[3, 4, 5], &[6, 7, 8]]);
        let b = grid(&[&[1, 0, 2], &[3, 4, 5], &[6, 7, 8]]);
        assert_ne!(a.key(), b.key());
        assert_eq!(a.key(), a.clone().key());

        // fifteen puzzle uses all 64 bits
        let goal = Grid::goal(4).unwrap();
        assert_eq!(goal.key(), 0x0123_4567_89ab_cdef);
    }

    #[test]
    fn solvability_parity() {
        assert!(Grid::goal(2).unwrap().is_solvable());
        assert!(Grid::goal(3).unwrap().is_solvable());
        assert!(Grid::goal(4).unwrap().is_solvable());
        assert!(grid(&[&[1, 2, 3], &[0, 4, 5], &[7, 8, 6]]).is_solvable());
        assert!(grid(&[&[7, 4, 3], &[1, 0, 5], &[8, 2, 6]]).is_solvable());
        assert!(!grid(&[&[0, 2, 1], &[3, 4, 5], &[6, 7, 8]]).is_solvable());
        assert!(!grid(&[&[0, 2], &[1, 3]]).is_solvable());
        assert!(!grid(&[&[0, 1], &[3, 2]]).is_solvable());

        let shifted = Grid::goal(4).unwrap().slide(Direction::Down).unwrap();
        assert!(shifted.is_solvable());
    }

    #[test]
    fn literal_form() {
        let g = grid(&[&[5, 3, 4], &[0, 6, 1], &[7, 8, 2]]);
        assert_eq!(g.to_literal(), "[[5, 3, 4], [0, 6, 1], [7, 8, 2]]");
        assert_eq!(format!("{:?}", g), g.to_literal());
        assert_eq!(g.to_string(), "  5  3  4\n  .  6  1\n  7  8  2");
    }
}
