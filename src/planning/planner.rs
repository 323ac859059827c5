//! Space-time A* search.
//!
//! Nodes are (cell center, time step) pairs, so the same cell can be
//! occupied at different steps and waiting in place is a legal move.
//! This is what lets the planner sidestep, outwait, or outrun
//! obstacles that appear and disappear over time.

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::core::Point;
use crate::error::{PlanError, Result};
use crate::planning::grid::Grid;
use crate::planning::neighbours::NeighbourTable;
use crate::planning::obstacles::{
    elliptical_distance_sq, DynamicObstacles, SemiDynamicObstacles, StaticObstacleIndex,
};
use crate::planning::state::{OpenEntry, SearchState, StateKey};

/// Default expansion budget for [`Planner::plan`].
pub const DEFAULT_MAX_ITERATIONS: usize = 500;

/// Planner configuration.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Edge length of one grid cell, in world units.
    pub cell_size: f32,
    /// Robot clearance radius, in world units.
    pub robot_radius: f32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            cell_size: 1.0,
            robot_radius: 0.5,
        }
    }
}

impl PlannerConfig {
    /// Check that both fields are positive and finite.
    pub fn validate(&self) -> Result<()> {
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(PlanError::Config(format!(
                "cell_size must be positive and finite, got {}",
                self.cell_size
            )));
        }
        if !self.robot_radius.is_finite() || self.robot_radius <= 0.0 {
            return Err(PlanError::Config(format!(
                "robot_radius must be positive and finite, got {}",
                self.robot_radius
            )));
        }
        Ok(())
    }
}

/// A planned space-time path.
///
/// The waypoint at index `i` is where the agent stands at step `i`, so
/// consecutive equal waypoints mean the agent waits in place. An empty
/// waypoint list means no path was found, which is a normal outcome,
/// not an error.
#[derive(Clone, Debug, PartialEq)]
pub struct PlannedPath<const N: usize> {
    /// Cell-center waypoints in travel order, one per time step.
    pub waypoints: Vec<Point<N>>,
    /// Number of nodes expanded during the search.
    pub expansions: usize,
}

impl<const N: usize> PlannedPath<N> {
    fn not_found(expansions: usize) -> Self {
        Self {
            waypoints: Vec::new(),
            expansions,
        }
    }

    /// True when no path was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Number of waypoints.
    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Euclidean length of the waypoint polyline, in world units.
    pub fn length(&self) -> f32 {
        if self.waypoints.len() < 2 {
            return 0.0;
        }

        let mut total = 0.0;
        for i in 1..self.waypoints.len() {
            total += self.waypoints[i - 1].distance(&self.waypoints[i]);
        }
        total
    }
}

/// Space-time A* planner over a uniform grid.
///
/// Construction discretizes the workspace, precomputes the adjacency
/// table, and indexes the static obstacles. All three are immutable
/// afterwards, so a single planner can serve any number of `plan`
/// calls; each call keeps its own open set, closed set, and parent
/// map.
pub struct Planner<const N: usize> {
    config: PlannerConfig,
    grid: Grid<N>,
    neighbours: NeighbourTable<N>,
    static_index: StaticObstacleIndex<N>,
}

impl Planner<2> {
    /// Build a 2D planner over `static_obstacles`.
    ///
    /// The obstacle field must include the workspace boundary points;
    /// its bounding box becomes the planning area.
    pub fn new(config: PlannerConfig, static_obstacles: &[Point<2>]) -> Result<Self> {
        config.validate()?;
        let grid = Grid::<2>::from_obstacles(config.cell_size, static_obstacles)?;
        Ok(Self::assemble(config, grid, static_obstacles))
    }
}

impl Planner<3> {
    /// Build a 3D planner over `static_obstacles`.
    ///
    /// The obstacle field must include the workspace boundary points;
    /// its bounding box becomes the planning area.
    pub fn new(config: PlannerConfig, static_obstacles: &[Point<3>]) -> Result<Self> {
        config.validate()?;
        let grid = Grid::<3>::from_obstacles(config.cell_size, static_obstacles)?;
        Ok(Self::assemble(config, grid, static_obstacles))
    }
}

impl<const N: usize> Planner<N> {
    fn assemble(config: PlannerConfig, grid: Grid<N>, static_obstacles: &[Point<N>]) -> Self {
        let neighbours = NeighbourTable::build(&grid);
        let static_index = StaticObstacleIndex::build(static_obstacles);
        debug!(
            "[SpaceTimeAStar] planner ready: {} cells, {} static obstacles, cell_size={}",
            grid.len(),
            static_index.len(),
            config.cell_size
        );
        Self {
            config,
            grid,
            neighbours,
            static_index,
        }
    }

    /// Grid the planner searches over.
    #[inline]
    pub fn grid(&self) -> &Grid<N> {
        &self.grid
    }

    /// Adjacency table the planner expands neighbours from.
    #[inline]
    pub fn neighbour_table(&self) -> &NeighbourTable<N> {
        &self.neighbours
    }

    /// Configuration the planner was built with.
    #[inline]
    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// True when `position` keeps more than the robot radius of
    /// Euclidean clearance from every static obstacle.
    #[inline]
    pub fn safe_static(&self, position: &Point<N>) -> bool {
        self.static_index.is_safe(position, self.config.robot_radius)
    }

    /// True when `position` violates no dynamic obstacle margin at
    /// `time`.
    pub fn safe_dynamic(
        &self,
        position: &Point<N>,
        time: u32,
        dynamic: &DynamicObstacles<N>,
    ) -> bool {
        dynamic.at_step(time).iter().all(|obstacle| {
            elliptical_distance_sq(position, obstacle, self.config.robot_radius) > 1.0
        })
    }

    /// True when `position` violates no semi-dynamic obstacle margin
    /// at `time`.
    pub fn safe_semi_dynamic(
        &self,
        position: &Point<N>,
        time: u32,
        semi_dynamic: &SemiDynamicObstacles<N>,
    ) -> bool {
        semi_dynamic.active_at(time).all(|obstacle| {
            elliptical_distance_sq(position, obstacle, self.config.robot_radius) > 1.0
        })
    }

    /// Plan from `start` to `goal` with the default expansion budget.
    ///
    /// See [`Planner::plan_with_limit`].
    pub fn plan(
        &self,
        start: Point<N>,
        goal: Point<N>,
        dynamic: &DynamicObstacles<N>,
        semi_dynamic: &SemiDynamicObstacles<N>,
    ) -> Result<PlannedPath<N>> {
        self.plan_with_limit(start, goal, dynamic, semi_dynamic, DEFAULT_MAX_ITERATIONS)
    }

    /// Plan from `start` to `goal` with an explicit expansion budget.
    ///
    /// Both endpoints are snapped to their cell centers first; a
    /// position below the workspace minimum is an error. The search
    /// starts at step 0 and advances one step per move, waiting
    /// included. The first state reaching the goal cell at any step
    /// ends the search; a (position, time) node keeps the cost it was
    /// first discovered with.
    ///
    /// Exhausting the budget or the open set yields an empty path.
    pub fn plan_with_limit(
        &self,
        start: Point<N>,
        goal: Point<N>,
        dynamic: &DynamicObstacles<N>,
        semi_dynamic: &SemiDynamicObstacles<N>,
        max_iterations: usize,
    ) -> Result<PlannedPath<N>> {
        let start = self.grid.snap(&start)?;
        let goal = self.grid.snap(&goal)?;
        trace!(
            "[SpaceTimeAStar] plan: start={:?} goal={:?} max_iterations={}",
            start.0,
            goal.0,
            max_iterations
        );

        let mut open = BinaryHeap::new();
        let mut open_keys: HashSet<StateKey<N>> = HashSet::new();
        let mut closed: HashSet<StateKey<N>> = HashSet::new();
        let mut parents: HashMap<StateKey<N>, SearchState<N>> = HashMap::new();
        let mut seq: u64 = 0;

        let root = SearchState {
            pos: start,
            time: 0,
            g: 0,
            f: self.heuristic(&start, &goal),
        };
        open.push(OpenEntry { state: root, seq });
        seq += 1;
        open_keys.insert(root.key());

        let mut expansions = 0usize;

        while let Some(entry) = open.pop() {
            let current = entry.state;
            let key = current.key();
            open_keys.remove(&key);

            if expansions >= max_iterations {
                debug!(
                    "[SpaceTimeAStar] FAILED: iteration budget {} exhausted",
                    max_iterations
                );
                return Ok(PlannedPath::not_found(expansions));
            }
            expansions += 1;

            // Goal test is on position only; arrival time is free
            if current.pos == goal {
                let waypoints = reconstruct_path(&parents, &current);
                trace!(
                    "[SpaceTimeAStar] SUCCESS: {} waypoints, {} nodes expanded",
                    waypoints.len(),
                    expansions
                );
                return Ok(PlannedPath {
                    waypoints,
                    expansions,
                });
            }

            closed.insert(key);

            let time = current.time + 1;
            let g = current.g + 1;
            for neighbour in self.neighbours.neighbours(&current.pos) {
                let candidate = SearchState {
                    pos: *neighbour,
                    time,
                    g,
                    f: g as f32 + self.heuristic(neighbour, &goal),
                };
                let candidate_key = candidate.key();

                if closed.contains(&candidate_key) {
                    continue;
                }
                if !self.safe_static(neighbour)
                    || !self.safe_dynamic(neighbour, time, dynamic)
                    || !self.safe_semi_dynamic(neighbour, time, semi_dynamic)
                {
                    continue;
                }
                // First discovery of a (position, time) node is final
                if open_keys.contains(&candidate_key) {
                    continue;
                }

                parents.insert(candidate_key, current);
                open.push(OpenEntry {
                    state: candidate,
                    seq,
                });
                seq += 1;
                open_keys.insert(candidate_key);
            }
        }

        debug!(
            "[SpaceTimeAStar] FAILED: open set exhausted after {} expansions",
            expansions
        );
        Ok(PlannedPath::not_found(expansions))
    }

    /// Manhattan distance to the goal in grid-cell units.
    #[inline]
    fn heuristic(&self, from: &Point<N>, to: &Point<N>) -> f32 {
        from.manhattan_distance(to) / self.config.cell_size
    }
}

/// Walk the parent map back from the goal state and reverse.
fn reconstruct_path<const N: usize>(
    parents: &HashMap<StateKey<N>, SearchState<N>>,
    goal_state: &SearchState<N>,
) -> Vec<Point<N>> {
    let mut waypoints = vec![goal_state.pos];
    let mut current = *goal_state;

    while let Some(&previous) = parents.get(&current.key()) {
        waypoints.push(previous.pos);
        current = previous;
    }
    waypoints.reverse();
    waypoints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point2, Point3};

    fn create_test_planner() -> Planner<2> {
        let obstacles = vec![Point2::new([0.0, 0.0]), Point2::new([6.0, 6.0])];
        Planner::<2>::new(PlannerConfig::default(), &obstacles).unwrap()
    }

    fn create_corridor_planner() -> Planner<2> {
        // One row of five cells with centers y = 0.5, x = 0.5..4.5
        let obstacles = vec![Point2::new([0.0, 0.0]), Point2::new([5.0, 1.0])];
        Planner::<2>::new(PlannerConfig::default(), &obstacles).unwrap()
    }

    fn no_dynamic() -> (DynamicObstacles<2>, SemiDynamicObstacles<2>) {
        (DynamicObstacles::new(), SemiDynamicObstacles::new())
    }

    #[test]
    fn test_config_default() {
        let config = PlannerConfig::default();
        assert_eq!(config.cell_size, 1.0);
        assert_eq!(config.robot_radius, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_bad_values() {
        let bad_cell = PlannerConfig {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(bad_cell.validate().is_err());

        let bad_radius = PlannerConfig {
            robot_radius: f32::NAN,
            ..Default::default()
        };
        assert!(bad_radius.validate().is_err());

        let negative_radius = PlannerConfig {
            robot_radius: -0.5,
            ..Default::default()
        };
        assert!(matches!(
            Planner::<2>::new(negative_radius, &[Point2::new([0.0, 0.0])]),
            Err(PlanError::Config(_))
        ));
    }

    #[test]
    fn test_rejects_non_finite_obstacles() {
        let infinite = vec![Point2::new([0.0, 0.0]), Point2::new([f32::INFINITY, 3.0])];
        assert!(matches!(
            Planner::<2>::new(PlannerConfig::default(), &infinite),
            Err(PlanError::Config(_))
        ));

        let nan = vec![Point2::new([0.0, f32::NAN]), Point2::new([6.0, 6.0])];
        assert!(matches!(
            Planner::<2>::new(PlannerConfig::default(), &nan),
            Err(PlanError::Config(_))
        ));
    }

    #[test]
    fn test_simple_axial_path() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([0.6, 0.6]), Point2::new([5.4, 0.6]), &dynamic, &semi)
            .unwrap();

        // Five cells apart on one axis: Manhattan distance plus one
        assert_eq!(path.len(), 6);
        assert_eq!(path.waypoints[0], Point2::new([0.5, 0.5]));
        assert_eq!(path.waypoints[5], Point2::new([5.5, 0.5]));
        assert!((path.length() - 5.0).abs() < 1e-5);
        for waypoint in &path.waypoints {
            assert!(planner.grid().bounds().contains(waypoint));
        }
    }

    #[test]
    fn test_diagonal_path_uses_diagonal_moves() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([5.5, 5.5]), &dynamic, &semi)
            .unwrap();

        // Corner to corner: Chebyshev distance plus one
        assert_eq!(path.len(), 6);
    }

    #[test]
    fn test_three_by_three_path_shapes() {
        let obstacles = vec![Point2::new([0.0, 0.0]), Point2::new([3.0, 3.0])];
        let planner = Planner::<2>::new(PlannerConfig::default(), &obstacles).unwrap();
        let (dynamic, semi) = no_dynamic();

        let axial = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([2.5, 0.5]), &dynamic, &semi)
            .unwrap();
        assert_eq!(axial.len(), 3);

        let diagonal = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([2.5, 2.5]), &dynamic, &semi)
            .unwrap();
        assert_eq!(diagonal.len(), 3);
    }

    #[test]
    fn test_start_equals_goal() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([2.2, 2.2]), Point2::new([2.4, 2.3]), &dynamic, &semi)
            .unwrap();

        assert_eq!(path.len(), 1);
        assert_eq!(path.waypoints[0], Point2::new([2.5, 2.5]));
        assert_eq!(path.expansions, 1);
        assert_eq!(path.length(), 0.0);
    }

    #[test]
    fn test_consecutive_waypoints_are_adjacent() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([5.5, 2.5]), &dynamic, &semi)
            .unwrap();

        assert!(!path.is_empty());
        for pair in path.waypoints.windows(2) {
            assert!(planner.neighbour_table().neighbours(&pair[0]).contains(&pair[1]));
        }
    }

    #[test]
    fn test_blocked_goal_returns_empty_path() {
        let obstacles = vec![
            Point2::new([0.0, 0.0]),
            Point2::new([6.0, 6.0]),
            Point2::new([5.5, 0.5]),
        ];
        let planner = Planner::<2>::new(PlannerConfig::default(), &obstacles).unwrap();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([5.5, 0.5]), &dynamic, &semi)
            .unwrap();

        assert!(path.is_empty());
        assert_eq!(path.expansions, DEFAULT_MAX_ITERATIONS);
    }

    #[test]
    fn test_budget_limit_is_respected() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan_with_limit(
                Point2::new([0.5, 0.5]),
                Point2::new([5.5, 5.5]),
                &dynamic,
                &semi,
                3,
            )
            .unwrap();

        assert!(path.is_empty());
        assert_eq!(path.expansions, 3);
    }

    #[test]
    fn test_waits_out_dynamic_obstacle() {
        let planner = create_corridor_planner();
        let mut dynamic = DynamicObstacles::new();
        dynamic.block_at(2, Point2::new([2.5, 0.5]));
        let semi = SemiDynamicObstacles::new();

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([4.5, 0.5]), &dynamic, &semi)
            .unwrap();

        // The margin covers x = 1.5..3.5 at step 2, so the agent burns
        // two extra steps on the left before crossing
        assert_eq!(path.len(), 7);
        assert_eq!(path.waypoints[2], Point2::new([0.5, 0.5]));
        assert_eq!(path.waypoints[6], Point2::new([4.5, 0.5]));
        for (step, waypoint) in path.waypoints.iter().enumerate() {
            for obstacle in dynamic.at_step(step as u32) {
                assert!(
                    elliptical_distance_sq(waypoint, obstacle, planner.config().robot_radius)
                        > 1.0
                );
            }
        }
    }

    #[test]
    fn test_semi_dynamic_crossable_before_threshold() {
        let planner = create_corridor_planner();
        let dynamic = DynamicObstacles::new();
        let mut semi = SemiDynamicObstacles::new();
        semi.block_from(10, Point2::new([2.5, 0.5]));

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([4.5, 0.5]), &dynamic, &semi)
            .unwrap();

        // The crossing happens at step 2, well before the threshold
        assert_eq!(path.len(), 5);
        for (step, waypoint) in path.waypoints.iter().enumerate() {
            for obstacle in semi.active_at(step as u32) {
                assert!(
                    elliptical_distance_sq(waypoint, obstacle, planner.config().robot_radius)
                        > 1.0
                );
            }
        }
    }

    #[test]
    fn test_semi_dynamic_blocks_after_threshold() {
        let planner = create_corridor_planner();
        let dynamic = DynamicObstacles::new();
        let mut semi = SemiDynamicObstacles::new();
        semi.block_from(1, Point2::new([2.5, 0.5]));

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([4.5, 0.5]), &dynamic, &semi)
            .unwrap();

        assert!(path.is_empty());
    }

    #[test]
    fn test_identical_calls_return_identical_paths() {
        let planner = create_test_planner();
        let mut dynamic = DynamicObstacles::new();
        dynamic.block_at(3, Point2::new([3.5, 0.5]));
        let semi = SemiDynamicObstacles::new();

        let first = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([5.5, 0.5]), &dynamic, &semi)
            .unwrap();
        let second = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([5.5, 0.5]), &dynamic, &semi)
            .unwrap();

        assert!(!first.is_empty());
        assert_eq!(first, second);
    }

    #[test]
    fn test_out_of_bounds_endpoints_fail() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let below_start = planner.plan(
            Point2::new([-1.0, 0.5]),
            Point2::new([5.5, 0.5]),
            &dynamic,
            &semi,
        );
        assert!(matches!(below_start, Err(PlanError::OutOfBounds(_))));

        let below_goal = planner.plan(
            Point2::new([0.5, 0.5]),
            Point2::new([0.5, -3.0]),
            &dynamic,
            &semi,
        );
        assert!(matches!(below_goal, Err(PlanError::OutOfBounds(_))));
    }

    #[test]
    fn test_overflowing_endpoints_clamp() {
        let planner = create_test_planner();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([0.5, 0.5]), Point2::new([50.0, 0.5]), &dynamic, &semi)
            .unwrap();

        assert_eq!(path.waypoints.last(), Some(&Point2::new([5.5, 0.5])));
    }

    #[test]
    fn test_non_unit_cell_size() {
        let obstacles = vec![Point2::new([0.0, 0.0]), Point2::new([3.0, 3.0])];
        let config = PlannerConfig {
            cell_size: 0.5,
            robot_radius: 0.25,
        };
        let planner = Planner::<2>::new(config, &obstacles).unwrap();
        let (dynamic, semi) = no_dynamic();

        let path = planner
            .plan(Point2::new([0.3, 0.3]), Point2::new([2.8, 0.3]), &dynamic, &semi)
            .unwrap();

        assert_eq!(path.len(), 6);
        assert_eq!(path.waypoints[0], Point2::new([0.25, 0.25]));
        assert_eq!(path.waypoints[5], Point2::new([2.75, 0.25]));
    }

    #[test]
    fn test_3d_diagonal_path() {
        let obstacles = vec![Point3::new([0.0, 0.0, 0.0]), Point3::new([3.2, 3.2, 3.2])];
        let planner = Planner::<3>::new(PlannerConfig::default(), &obstacles).unwrap();

        let path = planner
            .plan(
                Point3::new([0.5, 0.5, 0.5]),
                Point3::new([2.5, 2.5, 2.5]),
                &DynamicObstacles::new(),
                &SemiDynamicObstacles::new(),
            )
            .unwrap();

        assert_eq!(path.len(), 3);
        assert_eq!(path.waypoints[0], Point3::new([0.5, 0.5, 0.5]));
        assert_eq!(path.waypoints[2], Point3::new([2.5, 2.5, 2.5]));
    }

    #[test]
    fn test_3d_dynamic_obstacle_forces_detour() {
        let obstacles = vec![Point3::new([0.0, 0.0, 0.0]), Point3::new([5.2, 5.2, 5.2])];
        let planner = Planner::<3>::new(PlannerConfig::default(), &obstacles).unwrap();
        let mut dynamic = DynamicObstacles::new();
        // Sits on the straight-line route at the step the agent would
        // reach it
        dynamic.block_at(2, Point3::new([2.5, 2.5, 2.5]));
        let semi = SemiDynamicObstacles::new();

        let path = planner
            .plan(
                Point3::new([0.5, 0.5, 0.5]),
                Point3::new([4.5, 4.5, 4.5]),
                &dynamic,
                &semi,
            )
            .unwrap();

        assert!(!path.is_empty());
        for (step, waypoint) in path.waypoints.iter().enumerate() {
            for obstacle in dynamic.at_step(step as u32) {
                assert!(
                    elliptical_distance_sq(waypoint, obstacle, planner.config().robot_radius)
                        > 1.0
                );
            }
        }
    }
}
