//! Space-time planning walkthrough in a small walled room.
//!
//! Plans through a wall gap three times: with static obstacles only,
//! with a blocker patrolling the gap, and with the gap closing for
//! good partway through.
//!
//! Usage:
//!   cargo run --example corridor
//!   RUST_LOG=debug cargo run --example corridor   # planner internals

use kala_plan::{
    DynamicObstacles, PlannedPath, Planner, PlannerConfig, Point2, SemiDynamicObstacles,
};

const ROOM_WIDTH: f32 = 12.0;
const ROOM_HEIGHT: f32 = 6.0;
const WALL_X: f32 = 6.0;
const GAP_Y: f32 = 3.5;

/// Room boundary plus a dividing wall at `WALL_X`, open around
/// `GAP_Y`.
fn build_obstacles() -> Vec<Point2> {
    let mut points = Vec::new();
    let mut v = 0.0;
    while v <= ROOM_WIDTH {
        points.push(Point2::new([v, 0.0]));
        points.push(Point2::new([v, ROOM_HEIGHT]));
        if v <= ROOM_HEIGHT {
            points.push(Point2::new([0.0, v]));
            points.push(Point2::new([ROOM_WIDTH, v]));
        }
        if v <= ROOM_HEIGHT && (v - GAP_Y).abs() > 0.3 {
            points.push(Point2::new([WALL_X, v]));
        }
        v += 0.5;
    }
    points
}

/// Render the workspace top to bottom with the path overlaid.
fn render(planner: &Planner<2>, path: &PlannedPath<2>, start: Point2, goal: Point2) {
    let [columns, rows] = planner.grid().extents();
    for row in (0..rows).rev() {
        let mut line = String::new();
        for column in 0..columns {
            let center = planner.grid().center_at(&[column, row]);
            let glyph = if center == start {
                'S'
            } else if center == goal {
                'G'
            } else if path.waypoints.contains(&center) {
                '*'
            } else if !planner.safe_static(&center) {
                '#'
            } else {
                '.'
            };
            line.push(glyph);
            line.push(' ');
        }
        println!("  {}", line);
    }
}

fn print_path(path: &PlannedPath<2>) {
    if path.is_empty() {
        println!("No path found ({} expansions)", path.expansions);
        return;
    }
    for (step, waypoint) in path.waypoints.iter().enumerate() {
        println!("  step {:2}: ({:.1}, {:.1})", step, waypoint.0[0], waypoint.0[1]);
    }
    println!(
        "{} waypoints, {:.1} units, {} expansions",
        path.len(),
        path.length(),
        path.expansions
    );
}

fn main() {
    env_logger::init();

    let obstacles = build_obstacles();
    let planner = Planner::<2>::new(PlannerConfig::default(), &obstacles)
        .expect("Failed to build planner");
    println!(
        "Workspace: {}x{} cells, {} obstacle points",
        planner.grid().extents()[0],
        planner.grid().extents()[1],
        obstacles.len()
    );

    let start = Point2::new([2.5, 1.5]);
    let goal = Point2::new([9.5, 1.5]);
    let no_dynamic = DynamicObstacles::new();
    let no_semi = SemiDynamicObstacles::new();

    println!("\n=== Static obstacles only ===");
    let path = planner
        .plan(start, goal, &no_dynamic, &no_semi)
        .expect("Endpoints are inside the workspace");
    print_path(&path);
    render(&planner, &path, start, goal);

    println!("\n=== Blocker patrolling the gap at steps 3..6 ===");
    let mut patrol = DynamicObstacles::new();
    for step in 3..6 {
        patrol.block_at(step, Point2::new([6.5, GAP_Y]));
    }
    let path = planner
        .plan(start, goal, &patrol, &no_semi)
        .expect("Endpoints are inside the workspace");
    print_path(&path);
    render(&planner, &path, start, goal);

    println!("\n=== Gap closing for good at step 2 ===");
    let mut closing = SemiDynamicObstacles::new();
    closing.block_from(2, Point2::new([6.5, GAP_Y]));
    closing.block_from(2, Point2::new([5.5, GAP_Y]));
    let path = planner
        .plan(start, goal, &no_dynamic, &closing)
        .expect("Endpoints are inside the workspace");
    print_path(&path);
}
