use std::{cmp::Reverse, collections::BinaryHeap};

use fxhash::FxHashSet;
use log::{debug, trace};

use crate::{
    error::{Error, Result},
    grid::Grid,
    heuristic::Heuristic,
    state::{PuzzleState, SearchTree, StateId},
    validator::{reconstruct, Reconstruction},
};

/// Min-queue on `eval_value`; equal values come out in insertion order.
struct Frontier {
    heap: BinaryHeap<Reverse<(u32, u64, StateId)>>,
    pushed: u64,
}

impl Frontier {
    fn new() -> Frontier {
        Frontier {
            heap: BinaryHeap::with_capacity(64),
            pushed: 0,
        }
    }

    fn push(&mut self, state: &PuzzleState, id: StateId) {
        self.heap.push(Reverse((state.eval_value(), self.pushed, id)));
        self.pushed += 1;
    }

    fn pop(&mut self) -> Option<StateId> {
        self.heap.pop().map(|Reverse((_, _, id))| id)
    }

    fn len(&self) -> usize {
        self.heap.len()
    }
}

/// A goal state together with the tree that leads to it.
#[derive(Clone, Debug)]
pub struct Solution {
    tree: SearchTree,
    goal: StateId,
    heuristic: Heuristic,
}

impl Solution {
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    pub fn goal_id(&self) -> StateId {
        self.goal
    }

    pub fn goal(&self) -> &PuzzleState {
        &self.tree[self.goal]
    }

    pub fn heuristic(&self) -> Heuristic {
        self.heuristic
    }

    /// Number of states popped from the frontier, the goal included.
    pub fn expanded(&self) -> usize {
        self.goal().ordinal()
    }

    pub fn reconstruct(&self) -> Reconstruction {
        reconstruct(&self.tree, self.goal)
    }
}

/// A* over sliding-tile grids.
///
/// Every call owns its frontier, reached set and expansion counter, so one
/// `Searcher` can serve any number of calls, from any number of threads.
#[derive(Clone, Copy, Debug, Default)]
pub struct Searcher {
    limit: Option<usize>,
}

impl Searcher {
    pub fn new() -> Searcher {
        Searcher::default()
    }

    /// Give up with [`Error::ExpansionLimit`] once `limit` states have been expanded.
    pub fn with_limit(limit: usize) -> Searcher {
        Searcher { limit: Some(limit) }
    }

    pub fn search(&self, initial: Grid, heuristic: Heuristic) -> Result<Solution> {
        let mut tree = SearchTree::new(initial);
        let mut frontier = Frontier::new();
        let mut reached = FxHashSet::<u64>::default();
        let mut ordinal = 0;
        let mut expansions = 0;

        let root = tree.root();
        let h = heuristic.score(&tree[root]);
        let state = tree.get_mut(root);
        state.set_path_cost(0);
        state.set_heuristic_value(h);
        state.set_ordinal(ordinal);
        ordinal += 1;
        frontier.push(&tree[root], root);

        debug!(
            "searching {}x{} with {}, h = {}",
            tree[root].size(),
            tree[root].size(),
            heuristic,
            h
        );

        while let Some(curr) = frontier.pop() {
            tree.get_mut(curr).set_ordinal(ordinal);
            ordinal += 1;

            let state = &tree[curr];
            if state.grid().is_goal() {
                debug!(
                    "solved at depth {} after {} pops, {} states generated",
                    state.path_cost(),
                    state.ordinal(),
                    tree.len()
                );
                return Ok(Solution {
                    tree,
                    goal: curr,
                    heuristic,
                });
            }

            // the reached set records every popped grid, expanded or not
            if !reached.insert(state.grid().key()) {
                continue;
            }

            if let Some(limit) = self.limit {
                if expansions >= limit {
                    debug!("expansion limit {} hit", limit);
                    return Err(Error::ExpansionLimit { limit });
                }
            }

            let path_cost = state.path_cost() + 1;
            trace!(
                "expanding #{} g = {} f = {}, frontier {}",
                state.ordinal(),
                state.path_cost(),
                state.eval_value(),
                frontier.len()
            );

            for child in tree.expand(curr) {
                let h = heuristic.score(&tree[child]);
                let state = tree.get_mut(child);
                state.set_path_cost(path_cost);
                state.set_heuristic_value(h);
                frontier.push(&tree[child], child);
            }
            expansions += 1;
        }

        debug!("frontier exhausted after {} pops", ordinal - 1);
        Err(Error::NotFound {
            expanded: ordinal - 1,
        })
    }
}

/// Searches without an expansion limit.
pub fn search(initial: Grid, heuristic: Heuristic) -> Result<Solution> {
    Searcher::new().search(initial, heuristic)
}
