//! A* for the 3-, 8- and 15-puzzle.
//!
//! [`search`] takes a starting [`Grid`] and a [`Heuristic`] and returns a
//! [`Solution`]: the goal state plus the tree of every state generated on the
//! way. [`validator`] walks that tree back to the start.
//!
//! ```
//! use slider_astar::{parse_grid, search, Heuristic};
//!
//! let start = parse_grid("[[1, 2, 3], [0, 4, 5], [7, 8, 6]]").unwrap();
//! let solution = search(start, Heuristic::ManhattanDistance).unwrap();
//! assert!(solution.goal().grid().is_goal());
//! assert_eq!(solution.reconstruct().depth, solution.goal().path_cost() as usize);
//! ```

pub mod error;
pub mod generator;
pub mod grid;
pub mod heuristic;
pub mod puzzle_set;
pub mod report;
pub mod search;
pub mod state;
pub mod validator;

pub use error::{Error, Result};
pub use generator::Generator;
pub use grid::{Direction, Grid, SUPPORTED_SIZES};
pub use heuristic::Heuristic;
pub use puzzle_set::{parse_grid, PuzzleConfig};
pub use search::{search, Searcher, Solution};
pub use state::{PuzzleState, SearchTree, StateId};
pub use validator::{reconstruct, Reconstruction};
