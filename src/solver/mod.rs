use crate::{COST_DIAGONAL, COST_STRAIGHT};
use grid_util::Point;
use itertools::Itertools;

pub mod astar;

/// Estimate of the remaining cost from a cell to the goal.
///
/// [Heuristic::Manhattan] is the default. It overestimates once diagonal steps of cost
/// `√2` are allowed, so with diagonals enabled the returned path is not guaranteed to be
/// the cheapest one. [Heuristic::Euclidean] never overestimates on either topology.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// `|dx| + |dy|`
    #[default]
    Manhattan,
    /// `max(|dx|, |dy|)`
    Chebyshev,
    /// `sqrt(dx² + dy²)`
    Euclidean,
    /// Always 0, which expands cells in plain Dijkstra order.
    Zero,
}

impl Heuristic {
    pub fn distance(&self, p1: &Point, p2: &Point) -> f32 {
        let delta_x = (p1.x - p2.x).abs();
        let delta_y = (p1.y - p2.y).abs();
        match self {
            Heuristic::Manhattan => p1.manhattan_distance(p2) as f32,
            Heuristic::Chebyshev => delta_x.max(delta_y) as f32,
            Heuristic::Euclidean => (delta_x as f32).hypot(delta_y as f32),
            Heuristic::Zero => 0.0,
        }
    }
}

/// Settings of a search. All fields are public and may be changed between searches.
#[derive(Clone, Debug, PartialEq)]
pub struct SearchConfig {
    /// Enables the four diagonal directions (8-neighbourhood).
    pub allow_diagonal: bool,
    /// Requires both straight cells flanking a diagonal step to be walkable instead of one.
    pub forbid_corner_cutting: bool,
    pub heuristic: Heuristic,
    pub heuristic_factor: f32,
    pub cost_straight: f32,
    pub cost_diagonal: f32,
    /// Rejects start/goal pairs on different connected components before searching.
    pub check_components: bool,
}

impl Default for SearchConfig {
    fn default() -> SearchConfig {
        SearchConfig {
            allow_diagonal: false,
            forbid_corner_cutting: false,
            heuristic: Heuristic::default(),
            heuristic_factor: 1.0,
            cost_straight: COST_STRAIGHT,
            cost_diagonal: COST_DIAGONAL,
            check_components: false,
        }
    }
}

impl SearchConfig {
    pub fn with_diagonal(mut self, allow_diagonal: bool) -> Self {
        self.allow_diagonal = allow_diagonal;
        self
    }

    pub fn with_corner_cutting_forbidden(mut self, forbid: bool) -> Self {
        self.forbid_corner_cutting = forbid;
        self
    }

    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    pub fn with_component_check(mut self, check_components: bool) -> Self {
        self.check_components = check_components;
        self
    }

    /// Cost of a single step between two adjacent cells. Weights are not included.
    pub fn cost(&self, p1: &Point, p2: &Point) -> f32 {
        if p1.x == p2.x || p1.y == p2.y {
            self.cost_straight
        } else {
            self.cost_diagonal
        }
    }

    /// The heuristic scaled by the heuristic factor.
    pub fn estimate(&self, p1: &Point, p2: &Point) -> f32 {
        self.heuristic.distance(p1, p2) * self.heuristic_factor
    }

    /// Sum of the step costs along `path`, ignoring weights.
    pub fn path_cost(&self, path: &[Point]) -> f32 {
        path.iter()
            .tuple_windows()
            .map(|(p1, p2)| self.cost(p1, p2))
            .sum()
    }
}
