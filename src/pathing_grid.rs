use crate::error::{GridError, Result};
use crate::node::Cell;
use crate::N_SMALLVEC_SIZE;
use core::fmt;
use grid_util::Point;
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// Offsets of the straight neighbours in scan order: up, right, down, left.
const STRAIGHT: [(i32, i32); 4] = [(0, -1), (1, 0), (0, 1), (-1, 0)];
/// Offsets of the diagonal neighbours in scan order: up-left, up-right, down-right, down-left.
/// Diagonal `i` is flanked by straight neighbours `(i + 3) % 4` and `i`.
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (1, 1), (-1, 1)];

/// [PathingGrid] is a fixed `width x height` lattice of [Cell]s. Besides the raw cells it
/// maintains connected components of walkable cells in a [UnionFind] structure so that
/// reachability can be answered without searching.
#[derive(Clone, Debug)]
pub struct PathingGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl Default for PathingGrid {
    fn default() -> PathingGrid {
        PathingGrid::new(0, 0)
    }
}

impl PathingGrid {
    /// Allocates a grid in which every cell is walkable and has weight 0.
    pub fn new(width: usize, height: usize) -> PathingGrid {
        let mut grid = PathingGrid {
            width,
            height,
            cells: vec![Cell::default(); width * height],
            components: UnionFind::new(width * height),
            components_dirty: false,
        };
        grid.generate_components();
        grid
    }
    pub fn width(&self) -> usize {
        self.width
    }
    pub fn height(&self) -> usize {
        self.height
    }
    /// Number of cells in the lattice.
    pub fn len(&self) -> usize {
        self.cells.len()
    }
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
    pub fn point_in_bounds(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as usize) < self.width
            && (point.y as usize) < self.height
    }
    fn out_of_bounds(&self, point: Point) -> GridError {
        GridError::OutOfBounds {
            x: point.x,
            y: point.y,
            width: self.width,
            height: self.height,
        }
    }
    /// Index of `point` in the cell array, or [GridError::OutOfBounds].
    pub fn index(&self, point: Point) -> Result<usize> {
        if self.point_in_bounds(point) {
            Ok(self.get_ix_point(&point))
        } else {
            Err(self.out_of_bounds(point))
        }
    }
    pub(crate) fn get_ix_point(&self, point: &Point) -> usize {
        debug_assert!(self.point_in_bounds(*point));
        point.y as usize * self.width + point.x as usize
    }
    /// Inverse of [index](Self::index).
    pub fn point(&self, ix: usize) -> Point {
        Point::new((ix % self.width) as i32, (ix / self.width) as i32)
    }
    pub fn cell(&self, point: Point) -> Result<Cell> {
        self.index(point).map(|ix| self.cells[ix])
    }
    pub(crate) fn cell_at(&self, ix: usize) -> Cell {
        self.cells[ix]
    }
    /// A cell can be entered if it lies on the grid and is walkable.
    pub fn can_move_to(&self, point: Point) -> bool {
        self.point_in_bounds(point) && self.cells[self.get_ix_point(&point)].walkable
    }

    /// Marks a cell walkable or blocked. Joins components when a cell opens up and flags
    /// the components as dirty when a cell closes, as that may split a component apart.
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> Result<()> {
        let p = Point::new(x, y);
        let ix = self.index(p)?;
        let was_walkable = self.cells[ix].walkable;
        self.cells[ix].walkable = walkable;
        if walkable && !was_walkable {
            for (dx, dy) in STRAIGHT {
                let n = Point::new(p.x + dx, p.y + dy);
                if self.can_move_to(n) {
                    let n_ix = self.get_ix_point(&n);
                    self.components.union(ix, n_ix);
                }
            }
        } else if !walkable && was_walkable {
            self.components_dirty = true;
        }
        Ok(())
    }
    pub fn set_weight(&mut self, x: i32, y: i32, weight: f32) -> Result<()> {
        debug_assert!(
            weight.is_finite() && weight >= 0.0,
            "cell weights must be finite and non-negative, got {weight}"
        );
        let ix = self.index(Point::new(x, y))?;
        self.cells[ix].weight = weight;
        Ok(())
    }

    /// Admissible neighbours of `point` in scan order: up, right, down, left and, if
    /// `allow_diagonal`, up-left, up-right, down-right, down-left.
    ///
    /// A diagonal step needs its target to be enterable and, depending on
    /// `forbid_corner_cutting`, both or at least one of the two straight cells flanking it.
    /// The flanks are the straight results already computed for `point`.
    pub fn neighbours(
        &self,
        point: &Point,
        allow_diagonal: bool,
        forbid_corner_cutting: bool,
    ) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let mut neighbours = SmallVec::new();
        let mut straight = [false; 4];
        for (i, (dx, dy)) in STRAIGHT.into_iter().enumerate() {
            let n = Point::new(point.x + dx, point.y + dy);
            if self.can_move_to(n) {
                straight[i] = true;
                neighbours.push(n);
            }
        }
        if !allow_diagonal {
            return neighbours;
        }
        for (i, (dx, dy)) in DIAGONAL.into_iter().enumerate() {
            let (a, b) = (straight[(i + 3) % 4], straight[i]);
            let corner_free = if forbid_corner_cutting { a && b } else { a || b };
            let n = Point::new(point.x + dx, point.y + dy);
            if corner_free && self.can_move_to(n) {
                neighbours.push(n);
            }
        }
        neighbours
    }

    /// Retrieves the component id a given [Point] belongs to.
    pub fn get_component(&self, point: &Point) -> Result<usize> {
        self.index(*point).map(|ix| self.components.find(ix))
    }
    /// Checks if start and goal are on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        !self.unreachable(start, goal)
    }
    /// Checks if start and goal are not on the same component. Blocked or out of bounds
    /// endpoints are unreachable unless they coincide.
    pub fn unreachable(&self, start: &Point, goal: &Point) -> bool {
        if start == goal && self.point_in_bounds(*start) {
            return false;
        }
        if self.can_move_to(*start) && self.can_move_to(*goal) {
            let start_ix = self.get_ix_point(start);
            let goal_ix = self.get_ix_point(goal);
            !self.components.equiv(start_ix, goal_ix)
        } else {
            true
        }
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up walkable cells.
    ///
    /// Every admissible diagonal step has at least one admissible straight flank, so the
    /// components under any topology are those of straight adjacency alone.
    pub fn generate_components(&mut self) {
        debug!(
            "Generating connected components for {}x{} grid",
            self.width, self.height
        );
        self.components = UnionFind::new(self.len());
        self.components_dirty = false;
        for y in 0..self.height as i32 {
            for x in 0..self.width as i32 {
                let point = Point::new(x, y);
                if !self.can_move_to(point) {
                    continue;
                }
                let ix = self.get_ix_point(&point);
                // Right and down cover every straight pair exactly once
                for n in [Point::new(x + 1, y), Point::new(x, y + 1)] {
                    if self.can_move_to(n) {
                        let n_ix = self.get_ix_point(&n);
                        self.components.union(ix, n_ix);
                    }
                }
            }
        }
    }
}

impl fmt::Display for PathingGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height {
            let row = self.cells[y * self.width..(y + 1) * self.width]
                .iter()
                .map(|cell| match cell {
                    Cell {
                        walkable: false, ..
                    } => '#',
                    Cell { weight, .. } if *weight > 0.0 => 'w',
                    _ => '.',
                })
                .collect::<String>();
            writeln!(f, "{row}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn new_grid_is_open() {
        let grid = PathingGrid::new(4, 3);
        assert_eq!(grid.len(), 12);
        for ix in 0..grid.len() {
            assert_eq!(grid.cell_at(ix), Cell::default());
            assert_eq!(grid.index(grid.point(ix)), Ok(ix));
        }
    }

    #[test]
    fn accessors_reject_out_of_bounds() {
        let mut grid = PathingGrid::new(3, 2);
        let err = GridError::OutOfBounds {
            x: 3,
            y: 0,
            width: 3,
            height: 2,
        };
        assert_eq!(grid.set_walkable(3, 0, false), Err(err));
        assert_eq!(grid.set_weight(3, 0, 1.0), Err(err));
        assert_eq!(grid.cell(Point::new(3, 0)), Err(err));
        assert!(grid.set_walkable(-1, 1, true).is_err());
        assert!(grid.set_weight(0, 2, 1.0).is_err());
        assert!(grid.index(Point::new(0, -1)).is_err());
    }

    #[test]
    fn mutations_touch_single_cell() {
        let mut grid = PathingGrid::new(3, 3);
        grid.set_walkable(1, 2, false).unwrap();
        grid.set_weight(2, 0, 4.5).unwrap();
        assert!(!grid.cell(Point::new(1, 2)).unwrap().walkable);
        assert_eq!(grid.cell(Point::new(2, 0)).unwrap().weight, 4.5);
        assert_eq!(grid.cells.iter().filter(|c| !c.walkable).count(), 1);
        assert_eq!(grid.cells.iter().filter(|c| c.weight > 0.0).count(), 1);
    }

    #[test]
    fn neighbours_follow_scan_order() {
        let grid = PathingGrid::new(3, 3);
        let centre = Point::new(1, 1);
        assert_eq!(
            grid.neighbours(&centre, false, false).to_vec(),
            points(&[(1, 0), (2, 1), (1, 2), (0, 1)])
        );
        assert_eq!(
            grid.neighbours(&centre, true, true).to_vec(),
            points(&[
                (1, 0),
                (2, 1),
                (1, 2),
                (0, 1),
                (0, 0),
                (2, 0),
                (2, 2),
                (0, 2)
            ])
        );
    }

    #[test]
    fn neighbours_stay_in_bounds() {
        let grid = PathingGrid::new(2, 2);
        assert_eq!(
            grid.neighbours(&Point::new(0, 0), true, false).to_vec(),
            points(&[(1, 0), (0, 1), (1, 1)])
        );
    }

    /// One blocked flank only stops the diagonal when corner cutting is forbidden.
    #[test]
    fn corner_cutting_with_one_flank_blocked() {
        let mut grid = PathingGrid::new(2, 2);
        grid.set_walkable(1, 0, false).unwrap();
        let origin = Point::new(0, 0);
        assert_eq!(
            grid.neighbours(&origin, true, false).to_vec(),
            points(&[(0, 1), (1, 1)])
        );
        assert_eq!(
            grid.neighbours(&origin, true, true).to_vec(),
            points(&[(0, 1)])
        );
    }

    /// With both flanks blocked no diagonal is admissible in either mode.
    #[test]
    fn corner_cutting_with_both_flanks_blocked() {
        //  ___
        // | #|
        // |# |
        //  __
        let mut grid = PathingGrid::new(2, 2);
        grid.set_walkable(1, 0, false).unwrap();
        grid.set_walkable(0, 1, false).unwrap();
        let origin = Point::new(0, 0);
        for forbid in [false, true] {
            assert!(grid.neighbours(&origin, true, forbid).is_empty());
        }
    }

    #[test]
    fn blocked_diagonal_target_is_skipped() {
        let mut grid = PathingGrid::new(3, 3);
        grid.set_walkable(2, 2, false).unwrap();
        let n = grid.neighbours(&Point::new(1, 1), true, false);
        assert_eq!(n.len(), 7);
        assert!(!n.contains(&Point::new(2, 2)));
    }

    /// Tests whether points are correctly mapped to different connected components
    #[test]
    fn test_component_generation() {
        //  ___
        // | # |
        // | # |
        //  ___
        let mut grid = PathingGrid::new(3, 2);
        grid.set_walkable(1, 0, false).unwrap();
        grid.set_walkable(1, 1, false).unwrap();
        grid.update();
        let p1 = Point::new(0, 0);
        let p2 = Point::new(1, 1);
        let p3 = Point::new(0, 1);
        let p4 = Point::new(2, 0);
        assert!(grid.unreachable(&p1, &p2));
        assert!(grid.reachable(&p1, &p3));
        assert!(grid.unreachable(&p1, &p4));
        assert_ne!(grid.get_component(&p1), grid.get_component(&p4));
    }

    #[test]
    fn blocking_marks_components_dirty() {
        let mut grid = PathingGrid::new(3, 1);
        assert!(!grid.components_dirty);
        grid.set_walkable(1, 0, false).unwrap();
        assert!(grid.components_dirty);
        grid.update();
        assert!(!grid.components_dirty);
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(2, 0)));
        // Reopening joins the halves again without a regeneration
        grid.set_walkable(1, 0, true).unwrap();
        assert!(!grid.components_dirty);
        assert!(grid.reachable(&Point::new(0, 0), &Point::new(2, 0)));
    }

    /// Diagonal corner touching does not connect components.
    #[test]
    fn diagonal_touch_is_not_connected() {
        let mut grid = PathingGrid::new(2, 2);
        grid.set_walkable(1, 0, false).unwrap();
        grid.set_walkable(0, 1, false).unwrap();
        grid.update();
        assert!(grid.unreachable(&Point::new(0, 0), &Point::new(1, 1)));
    }

    #[test]
    fn display_marks_blocked_and_weighted() {
        let mut grid = PathingGrid::new(3, 2);
        grid.set_walkable(0, 0, false).unwrap();
        grid.set_weight(2, 1, 16.0).unwrap();
        assert_eq!(grid.to_string(), "#..\n..w\n");
    }
}
