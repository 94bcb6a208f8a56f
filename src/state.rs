use std::ops::Index;

use smallvec::SmallVec;

use crate::grid::{Direction, Grid};

/// Index of a state inside its [`SearchTree`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StateId(usize);

/// A grid plus the bookkeeping A* attaches to it.
///
/// Only the cost fields, the ordinal and the child slots change after
/// construction. `eval_value` is always `path_cost + heuristic_value`.
#[derive(Clone, Debug)]
pub struct PuzzleState {
    grid: Grid,
    path_cost: u32,
    heuristic_value: u32,
    eval_value: u32,
    ordinal: usize,
    children: [Option<StateId>; 4],
    parent: Option<StateId>,
}

impl PuzzleState {
    fn new(grid: Grid, parent: Option<StateId>) -> PuzzleState {
        PuzzleState {
            grid,
            path_cost: 0,
            heuristic_value: 0,
            eval_value: 0,
            ordinal: 0,
            children: [None; 4],
            parent,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.side()
    }

    pub fn path_cost(&self) -> u32 {
        self.path_cost
    }

    pub fn heuristic_value(&self) -> u32 {
        self.heuristic_value
    }

    pub fn eval_value(&self) -> u32 {
        self.eval_value
    }

    /// Expansion counter value assigned when this state left the frontier.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }

    pub fn parent(&self) -> Option<StateId> {
        self.parent
    }

    pub fn child(&self, direction: Direction) -> Option<StateId> {
        self.children[direction.slot()]
    }

    /// Present children in slot order.
    pub fn children(&self) -> impl Iterator<Item = StateId> + '_ {
        self.children.iter().flatten().copied()
    }

    pub fn set_path_cost(&mut self, path_cost: u32) {
        self.path_cost = path_cost;
        self.eval_value = self.path_cost + self.heuristic_value;
    }

    pub fn set_heuristic_value(&mut self, heuristic_value: u32) {
        self.heuristic_value = heuristic_value;
        self.eval_value = self.path_cost + self.heuristic_value;
    }

    pub fn set_ordinal(&mut self, ordinal: usize) {
        self.ordinal = ordinal;
    }
}

/// Arena owning every state derived from one root.
///
/// A state owns its child slots; the parent link is a plain id used for
/// walking back to the root. Ids grow monotonically, so a parent's id is
/// always below its children's and the links cannot form a cycle.
#[derive(Clone, Debug)]
pub struct SearchTree {
    states: Vec<PuzzleState>,
}

impl SearchTree {
    pub fn new(root: Grid) -> SearchTree {
        SearchTree {
            states: vec![PuzzleState::new(root, None)],
        }
    }

    pub fn root(&self) -> StateId {
        StateId(0)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get_mut(&mut self, id: StateId) -> &mut PuzzleState {
        &mut self.states[id.0]
    }

    /// Creates `grid` as the child of `parent` in `direction`'s slot.
    ///
    /// # Panics
    ///
    /// If the slot is already filled. Child slots are written once and states
    /// are never re-parented.
    pub fn attach(&mut self, parent: StateId, direction: Direction, grid: Grid) -> StateId {
        let id = StateId(self.states.len());
        let slot = &mut self.states[parent.0].children[direction.slot()];
        assert!(slot.is_none(), "child slot {} already taken", direction);
        *slot = Some(id);
        self.states.push(PuzzleState::new(grid, Some(parent)));
        id
    }

    /// Fills the child slots of `id` with every legal move of the blank.
    ///
    /// A direction whose move would leave the grid gets no child.
    ///
    /// # Panics
    ///
    /// If `id` was already expanded with at least one child, see [`SearchTree::attach`].
    pub fn expand(&mut self, id: StateId) -> SmallVec<[StateId; 4]> {
        let grid = &self.states[id.0].grid;
        let blank = grid.find_blank();
        let moves: SmallVec<[(Direction, Grid); 4]> = Direction::ALL
            .iter()
            .filter_map(|&d| grid.slide_from(blank, d).map(|g| (d, g)))
            .collect();

        moves
            .into_iter()
            .map(|(direction, grid)| self.attach(id, direction, grid))
            .collect()
    }
}

impl Index<StateId> for SearchTree {
    type Output = PuzzleState;
    fn index(&self, index: StateId) -> &Self::Output {
        &self.states[index.0]
    }
}
