use fxhash::FxBuildHasher;
use grid_util::Point;
use indexmap::IndexSet;
use log::{debug, info};

use crate::error::Result;
use crate::node::SearchState;
use crate::open_set::OpenSet;
use crate::pathing_grid::PathingGrid;
use crate::solver::SearchConfig;

type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Transient state of the solver, indexed like the cells of the grid it last searched.
/// Every cell opened or closed by a search is recorded as dirty so the next search only
/// has to reset those.
#[derive(Clone, Debug, Default)]
pub struct SearchContext {
    states: Vec<SearchState>,
    dirty: FxIndexSet<usize>,
    open: OpenSet<usize>,
    expanded: usize,
}

impl SearchContext {
    /// Resets the cells touched by the previous search.
    pub fn clean(&mut self) {
        for &ix in &self.dirty {
            self.states[ix] = SearchState::default();
        }
        self.dirty.clear();
        self.open.clear();
        self.expanded = 0;
    }
    /// Resets every cell, resizing the table to `size` cells.
    pub fn reset(&mut self, size: usize) {
        self.states.clear();
        self.states.resize(size, SearchState::default());
        self.dirty.clear();
        self.open.clear();
        self.expanded = 0;
    }
    fn prepare(&mut self, size: usize) {
        if self.states.len() == size {
            self.clean();
        } else {
            debug!("Resizing search context from {} to {size} cells", self.states.len());
            self.reset(size);
        }
    }
    fn touch(&mut self, ix: usize) {
        self.dirty.insert(ix);
    }
}

/// A* over a [PathingGrid]. Owns the per-cell search table; the grid itself is only read.
#[derive(Clone, Debug, Default)]
pub struct AstarSolver {
    pub config: SearchConfig,
    context: SearchContext,
}

impl AstarSolver {
    pub fn new(config: SearchConfig) -> AstarSolver {
        AstarSolver {
            config,
            context: SearchContext::default(),
        }
    }

    /// Searches a path from `start` to `goal`. Returns `Ok(false)` if the open set runs out
    /// before reaching the goal; on success the cells of the path are flagged
    /// `on_optimal_path` and can be retrieved with [path](Self::path).
    ///
    /// Any state left by the previous search is reset first. `g` holds the plain step cost
    /// from the start, while the weight of a cell only enters its `f`, as
    /// `f = weight + g + estimate`.
    pub fn find_path(&mut self, grid: &PathingGrid, start: Point, goal: Point) -> Result<bool> {
        let start_ix = grid.index(start)?;
        grid.index(goal)?;
        let config = &self.config;
        let ct = &mut self.context;
        ct.prepare(grid.len());

        let start_state = &mut ct.states[start_ix];
        start_state.g = 0.0;
        start_state.f = config.estimate(&start, &goal);
        start_state.open = true;
        ct.open.insert(start_state.f, start_ix);
        ct.touch(start_ix);

        while !ct.open.is_empty() {
            let current_ix = ct.open.extract_min()?;
            ct.expanded += 1;
            let current_state = &mut ct.states[current_ix];
            current_state.open = false;
            current_state.closed = true;
            let current_g = current_state.g;
            let current = grid.point(current_ix);

            if current == goal {
                let mut next = Some(current_ix);
                while let Some(ix) = next {
                    let state = &mut ct.states[ix];
                    state.on_optimal_path = true;
                    next = state.parent;
                }
                ct.open.clear();
                info!(
                    "Found path from {} to {} with cost {} after {} expansions",
                    start, goal, current_g, ct.expanded
                );
                return Ok(true);
            }

            for neighbour in
                grid.neighbours(&current, config.allow_diagonal, config.forbid_corner_cutting)
            {
                let n_ix = grid.get_ix_point(&neighbour);
                let state = &mut ct.states[n_ix];
                if state.closed {
                    continue;
                }
                let g = current_g + config.cost(&current, &neighbour);
                if !state.open || g < state.g {
                    let old_f = state.f;
                    state.parent = Some(current_ix);
                    state.g = g;
                    state.f = grid.cell_at(n_ix).weight + g + config.estimate(&neighbour, &goal);
                    if state.open {
                        ct.open.decrease_key(old_f, state.f, n_ix);
                    } else {
                        state.open = true;
                        ct.open.insert(state.f, n_ix);
                    }
                    ct.touch(n_ix);
                }
            }
        }
        info!("No path from {} to {} after {} expansions", start, goal, ct.expanded);
        Ok(false)
    }

    /// The path found by the last successful search ending in `goal`, from start to goal.
    /// Empty if `goal` is not on such a path.
    pub fn path(&self, grid: &PathingGrid, goal: Point) -> Vec<Point> {
        let Ok(goal_ix) = grid.index(goal) else {
            return Vec::new();
        };
        let mut path = Vec::new();
        let mut next = Some(goal_ix);
        while let Some(ix) = next {
            match self.context.states.get(ix) {
                Some(state) if state.on_optimal_path => {
                    path.push(grid.point(ix));
                    next = state.parent;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }

    /// Search state of the cell at `ix`; unvisited cells and cells beyond the table report
    /// the default state.
    pub fn state(&self, ix: usize) -> SearchState {
        self.context.states.get(ix).copied().unwrap_or_default()
    }

    /// Cells opened or closed by the last search, in the order they were first touched.
    pub fn dirty(&self) -> impl Iterator<Item = usize> + '_ {
        self.context.dirty.iter().copied()
    }

    /// Number of cells expanded by the last search.
    pub fn expanded(&self) -> usize {
        self.context.expanded
    }

    /// Drops the results of the last search, touching only the cells it visited.
    pub fn clean(&mut self) {
        self.context.clean();
    }

    /// Clears the search state of every cell of `grid`.
    pub fn reset(&mut self, grid: &PathingGrid) {
        debug!("Resetting search state of all {} cells", grid.len());
        self.context.reset(grid.len());
    }
}
