use grid_astar::Pathfinder;
use grid_util::Point;

// In this example a path is found on a 3x3 grid with shape
//  ___
// |S  |
// | # |
// |  G|
//  ___
// where
// - # marks an obstacle
// - S marks the start
// - G marks the goal
//
// Nodes have a 4-neighborhood

fn main() -> grid_astar::Result<()> {
    let mut pathfinder = Pathfinder::new(3, 3);
    pathfinder.set_walkable(1, 1, false)?;
    let start = Point::new(0, 0);
    let goal = Point::new(2, 2);
    if pathfinder.find_path(start, goal)? {
        println!("{}", pathfinder);
        println!("Path:");
        for p in pathfinder.path() {
            println!("{:?}", p);
        }
    }
    Ok(())
}
