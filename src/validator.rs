use itertools::Itertools;
use log::warn;
use pathfinding::directed::astar::astar;
use smallvec::SmallVec;

use crate::{
    grid::{Direction, Grid},
    heuristic::tile_distance,
    state::{SearchTree, StateId},
};

/// Where a parent chain ends and how long it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reconstruction {
    pub root: StateId,
    pub depth: usize,
}

/// Follows parent links from `from` up to the parentless root, counting hops.
///
/// A state with no parent is its own root at depth 0.
pub fn reconstruct(tree: &SearchTree, from: StateId) -> Reconstruction {
    let mut current = from;
    let mut depth = 0;
    while let Some(parent) = tree[current].parent() {
        // ids only grow away from the root
        assert!(parent < current, "parent link {:?} -> {:?} loops", current, parent);
        current = parent;
        depth += 1;
    }

    Reconstruction {
        root: current,
        depth,
    }
}

/// States from the root down to `to`, both included.
pub fn path(tree: &SearchTree, to: StateId) -> Vec<StateId> {
    let mut states = vec![to];
    let mut current = to;
    while let Some(parent) = tree[current].parent() {
        states.push(parent);
        current = parent;
    }

    states.reverse();
    states
}

/// The blank's moves along the path from the root to `to`.
pub fn moves(tree: &SearchTree, to: StateId) -> Vec<Direction> {
    path(tree, to)
        .into_iter()
        .tuple_windows()
        // every child sits in exactly one slot of its parent
        .filter_map(|(parent, child)| {
            Direction::ALL
                .into_iter()
                .find(|&d| tree[parent].child(d) == Some(child))
        })
        .collect()
}

/// Whether the chain above `goal` leads back to `initial` in exactly
/// `path_cost` moves.
pub fn is_valid(tree: &SearchTree, goal: StateId, initial: &Grid) -> bool {
    let back = reconstruct(tree, goal);
    let root_matches = tree[back.root].grid() == initial;
    let depth_matches = back.depth == tree[goal].path_cost() as usize;
    if !root_matches || !depth_matches {
        warn!(
            "invalid solution: root {:?} (expected {:?}), depth {} vs path cost {}",
            tree[back.root].grid(),
            initial,
            back.depth,
            tree[goal].path_cost()
        );
    }

    root_matches && depth_matches
}

/// Length of a shortest solution, found independently of [`crate::search()`]
/// with the tiles-only Manhattan bound. `None` when the goal is unreachable.
pub fn optimal_depth(initial: &Grid) -> Option<usize> {
    astar(
        initial,
        |g| {
            Direction::ALL
                .iter()
                .filter_map(|&d| g.slide(d))
                .map(|g| (g, 1u32))
                .collect::<SmallVec<[(Grid, u32); 4]>>()
        },
        tile_distance,
        Grid::is_goal,
    )
    .map(|(_, cost)| cost as usize)
}
