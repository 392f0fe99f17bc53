use grid_astar::{Pathfinder, SearchConfig};
use grid_util::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S# |
// |   |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Nodes have an 8-neighborhood. With corner cutting allowed the first step goes
// diagonally past the obstacle, without it the path walks around the corner.

fn main() -> grid_astar::Result<()> {
    let start = Point::new(0, 0);
    let goal = Point::new(2, 2);
    for forbid in [false, true] {
        let config = SearchConfig::default()
            .with_diagonal(true)
            .with_corner_cutting_forbidden(forbid);
        let mut pathfinder = Pathfinder::with_config(3, 3, config);
        pathfinder.set_walkable(1, 0, false)?;
        if pathfinder.find_path(start, goal)? {
            println!("Corner cutting forbidden: {forbid}");
            println!("{}", pathfinder);
            println!("Cost: {:?}", pathfinder.path_cost());
        }
    }
    Ok(())
}
