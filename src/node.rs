use grid_util::Point;

/// Persistent state of a lattice cell. Only edits from outside the search touch it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub walkable: bool,
    /// Non-negative surcharge added to the estimate of any path entering this cell.
    pub weight: f32,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            walkable: true,
            weight: 0.0,
        }
    }
}

/// Bookkeeping kept by the solver for a single cell during one search.
///
/// `parent` is the index of the predecessor cell on the best known route. It never
/// owns anything and is only meaningful for the grid the search ran on.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SearchState {
    pub g: f32,
    pub f: f32,
    pub parent: Option<usize>,
    pub open: bool,
    pub closed: bool,
    pub on_optimal_path: bool,
}

impl SearchState {
    pub fn is_unvisited(&self) -> bool {
        !self.open && !self.closed
    }
}

/// Snapshot of a cell combining its persistent fields with the results of the last search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub point: Point,
    pub walkable: bool,
    pub weight: f32,
    pub g: f32,
    pub f: f32,
    pub parent: Option<Point>,
    pub is_open: bool,
    pub is_closed: bool,
    pub is_on_optimal_path: bool,
}

impl Node {
    pub(crate) fn new(point: Point, cell: Cell, state: SearchState, parent: Option<Point>) -> Node {
        Node {
            point,
            walkable: cell.walkable,
            weight: cell.weight,
            g: state.g,
            f: state.f,
            parent,
            is_open: state.open,
            is_closed: state.closed,
            is_on_optimal_path: state.on_optimal_path,
        }
    }
}
