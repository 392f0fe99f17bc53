use grid_astar::{Pathfinder, SearchConfig};

// A 16x16 map with a wall and a band of weighted cells. The search goes around the
// weighted band when that is cheap enough, and the g/f values of the cells it touched
// are printed afterwards.

fn main() -> grid_astar::Result<()> {
    let config = SearchConfig::default().with_diagonal(true);
    let mut pathfinder = Pathfinder::with_config(16, 16, config);
    for y in 0..12 {
        pathfinder.set_walkable(6, y, false)?;
    }
    for x in 8..16 {
        pathfinder.toggle_weight(x, 8)?;
    }
    let found = pathfinder.find_path_default()?;
    println!("{}", pathfinder);
    println!("Found: {found}; cost: {:?}", pathfinder.path_cost());
    for p in pathfinder.path() {
        let node = pathfinder.node(p.x, p.y)?;
        println!("{}: g = {:.2}, f = {:.2}", p, node.g, node.f);
    }
    Ok(())
}
