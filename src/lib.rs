//! # grid_astar
//!
//! A* pathfinding on a fixed-size 2D grid of walkable, blocked and weighted cells.
//! Movement is either 4-directional or 8-directional, with an optional rule that forbids
//! diagonal steps past a blocked corner.
//!
//! The [PathingGrid] stores the persistent cells, the [AstarSolver] owns the transient
//! search table and [Pathfinder] ties both together with a start and goal.
//!
//! Two properties of the search are deliberate and worth knowing about:
//! - The weight of a cell is added to the `f` of that cell only, not to `g`. Weights
//!   therefore steer which cells are expanded first, while `g` at the goal is the plain
//!   step cost of the route.
//! - The default [Heuristic::Manhattan] can overestimate when diagonal steps are allowed,
//!   so 8-directional paths are not guaranteed to be the cheapest. Use
//!   [Heuristic::Euclidean] when that matters.
pub mod error;
pub mod node;
pub mod open_set;
pub mod pathing_grid;
pub mod solver;

pub use crate::error::{GridError, Result};
pub use crate::node::{Cell, Node, SearchState};
pub use crate::pathing_grid::PathingGrid;
pub use crate::solver::astar::AstarSolver;
pub use crate::solver::{Heuristic, SearchConfig};

use core::fmt;
use grid_util::Point;
use log::{info, warn};

pub const COST_STRAIGHT: f32 = 1.0;
pub const COST_DIAGONAL: f32 = std::f32::consts::SQRT_2;
/// Weight given to an unweighted cell by [Pathfinder::toggle_weight].
pub const DEFAULT_TOGGLE_WEIGHT: f32 = 16.0;
pub const N_SMALLVEC_SIZE: usize = 8;

/// A [PathingGrid] together with an [AstarSolver] and the current start and goal cells.
///
/// The start defaults to the top-left corner and the goal to the bottom-right one.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    pub grid: PathingGrid,
    pub solver: AstarSolver,
    start: Point,
    goal: Point,
    found_goal: Option<Point>,
    searched: Option<(Point, Point)>,
}

impl Pathfinder {
    /// Builds a `width x height` grid of walkable cells. The default goal saturates at 0, so
    /// on an empty grid both endpoints are `(0, 0)` and searching fails with
    /// [GridError::OutOfBounds].
    pub fn new(width: usize, height: usize) -> Pathfinder {
        Pathfinder::with_config(width, height, SearchConfig::default())
    }

    pub fn with_config(width: usize, height: usize, config: SearchConfig) -> Pathfinder {
        let grid = PathingGrid::new(width, height);
        let mut solver = AstarSolver::new(config);
        solver.reset(&grid);
        Pathfinder {
            grid,
            solver,
            start: Point::new(0, 0),
            goal: Point::new((width as i32 - 1).max(0), (height as i32 - 1).max(0)),
            found_goal: None,
            searched: None,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.solver.config
    }

    pub fn config_mut(&mut self) -> &mut SearchConfig {
        &mut self.solver.config
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn goal(&self) -> Point {
        self.goal
    }

    pub fn set_start(&mut self, start: Point) -> Result<()> {
        self.grid.index(start)?;
        self.start = start;
        Ok(())
    }

    pub fn set_goal(&mut self, goal: Point) -> Result<()> {
        self.grid.index(goal)?;
        self.goal = goal;
        Ok(())
    }

    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> Result<()> {
        self.grid.set_walkable(x, y, walkable)
    }

    pub fn set_weight(&mut self, x: i32, y: i32, weight: f32) -> Result<()> {
        self.grid.set_weight(x, y, weight)
    }

    /// Flips a cell between walkable and blocked and returns the new walkability.
    pub fn toggle_walkable(&mut self, x: i32, y: i32) -> Result<bool> {
        let walkable = !self.grid.cell(Point::new(x, y))?.walkable;
        self.grid.set_walkable(x, y, walkable)?;
        Ok(walkable)
    }

    /// Gives an unweighted cell [DEFAULT_TOGGLE_WEIGHT] and clears the weight of a weighted
    /// one. Returns the new weight.
    pub fn toggle_weight(&mut self, x: i32, y: i32) -> Result<f32> {
        let weight = if self.grid.cell(Point::new(x, y))?.weight > 0.0 {
            0.0
        } else {
            DEFAULT_TOGGLE_WEIGHT
        };
        self.grid.set_weight(x, y, weight)?;
        Ok(weight)
    }

    /// Snapshot of the cell at `(x, y)` including the results of the last search.
    pub fn node(&self, x: i32, y: i32) -> Result<Node> {
        let point = Point::new(x, y);
        let ix = self.grid.index(point)?;
        let state = self.solver.state(ix);
        let parent = state.parent.map(|p| self.grid.point(p));
        Ok(Node::new(point, self.grid.cell_at(ix), state, parent))
    }

    /// Searches a path between the stored start and goal.
    pub fn find_path_default(&mut self) -> Result<bool> {
        self.find_path(self.start, self.goal)
    }

    /// Searches a path from `start` to `goal`, replacing the results of the previous search.
    /// `Ok(false)` means there is no path; errors are reserved for out of bounds endpoints.
    pub fn find_path(&mut self, start: Point, goal: Point) -> Result<bool> {
        self.grid.index(start)?;
        self.grid.index(goal)?;
        self.found_goal = None;
        self.searched = Some((start, goal));
        let check_components =
            self.solver.config.check_components && self.grid.can_move_to(start);
        if check_components {
            self.grid.update();
            if self.grid.unreachable(&start, &goal) {
                info!("{} is not reachable from {}", goal, start);
                self.solver.clean();
                return Ok(false);
            }
        }
        let found = self.solver.find_path(&self.grid, start, goal)?;
        if found {
            self.found_goal = Some(goal);
        } else if check_components {
            warn!(
                "Reachable goal {} could not be pathed to from {}, are the components correct?",
                goal, start
            );
        }
        Ok(found)
    }

    /// Cells of the last found path from start to goal; empty if the last search failed.
    pub fn path(&self) -> Vec<Point> {
        match self.found_goal {
            Some(goal) => self.solver.path(&self.grid, goal),
            None => Vec::new(),
        }
    }

    /// `g` at the goal of the last found path.
    pub fn path_cost(&self) -> Option<f32> {
        let goal = self.found_goal?;
        let ix = self.grid.index(goal).ok()?;
        Some(self.solver.state(ix).g)
    }

    /// Clears the search state of every cell.
    pub fn reset_search_state(&mut self) {
        self.found_goal = None;
        self.searched = None;
        self.solver.reset(&self.grid);
    }

    /// Resets every cell to a fresh state while keeping walkability and weights, and
    /// regenerates the components.
    pub fn reset_map(&mut self) {
        self.reset_search_state();
        self.grid.generate_components();
    }
}

/// Draws the endpoints of the last search, or the stored start and goal if there was none.
impl fmt::Display for Pathfinder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (start, goal) = self.searched.unwrap_or((self.start, self.goal));
        for y in 0..self.grid.height() as i32 {
            let row = (0..self.grid.width() as i32)
                .map(|x| {
                    let p = Point::new(x, y);
                    let ix = self.grid.get_ix_point(&p);
                    let cell = self.grid.cell_at(ix);
                    if p == start {
                        'S'
                    } else if p == goal {
                        'G'
                    } else if !cell.walkable {
                        '#'
                    } else if self.solver.state(ix).on_optimal_path {
                        '*'
                    } else if cell.weight > 0.0 {
                        'w'
                    } else {
                        '.'
                    }
                })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}
