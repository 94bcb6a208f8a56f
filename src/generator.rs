use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::{
    error::Result,
    grid::{Direction, Grid},
};

/// Scrambles goal grids with random blank moves. Same seed, same puzzles.
pub struct Generator {
    rng: StdRng,
}

impl Generator {
    pub fn new(seed: u64) -> Generator {
        Generator {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Starts from the goal and makes `swaps` random draws of a direction.
    /// A draw that would push the blank off the grid is wasted.
    pub fn make_puzzle(&mut self, size: usize, swaps: usize) -> Result<Grid> {
        let mut grid = Grid::goal(size)?;
        for _ in 0..swaps {
            let direction = *Direction::ALL
                .choose(&mut self.rng)
                .unwrap_or(&Direction::Left);
            if let Some(next) = grid.slide(direction) {
                grid = next;
            }
        }

        Ok(grid)
    }

    pub fn make_puzzles(&mut self, size: usize, swaps: usize, number: usize) -> Result<Vec<Grid>> {
        debug!("generating {} puzzles of size {} with {} swaps", number, size, swaps);
        (0..number).map(|_| self.make_puzzle(size, swaps)).collect()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::error::Error;

    #[test]
    fn same_seed_same_puzzles() {
        let a = Generator::new(2424).make_puzzles(3, 80, 10).unwrap();
        let b = Generator::new(2424).make_puzzles(3, 80, 10).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn always_solvable() {
        let mut generator = Generator::new(7);
        for size in [2, 3, 4] {
            for puzzle in generator.make_puzzles(size, 50, 20).unwrap() {
                assert_eq!(puzzle.side(), size);
                assert!(puzzle.is_solvable(), "{:?}", puzzle);
            }
        }
    }

    #[test]
    fn zero_swaps_is_goal() {
        let puzzle = Generator::new(1).make_puzzle(4, 0).unwrap();
        assert!(puzzle.is_goal());
    }

    #[test]
    fn bad_size() {
        assert!(matches!(
            Generator::new(1).make_puzzle(6, 10),
            Err(Error::UnsupportedPuzzleSize { size: 6 })
        ));
    }
}
