//! How a Path can move along the Grid.
//!
//! Agents move along the 4 cardinal directions and the 4 diagonals, also known as the
//! [Moore Neighborhood](https://en.wikipedia.org/wiki/Moore_neighborhood):
//!
//! ```no_code
//! A: Agent, o: reachable in one step
//! o o o
//!  \|/
//! o-A-o
//!  /|\
//! o o o
//! ```
//!
//! A cardinal step costs `1.0`, a diagonal step costs `√2`.

use crate::grid::in_bounds;
use crate::GridPoint;

use std::f64::consts::SQRT_2;

/// The cost of a step up, down, left or right
pub const CARDINAL_COST: f64 = 1.0;
/// The cost of a diagonal step
pub const DIAGONAL_COST: f64 = SQRT_2;

const MOORE_OFFSETS: [(i32, i32); 8] = [
	(0, -1),
	(1, -1),
	(1, 0),
	(1, 1),
	(0, 1),
	(-1, 1),
	(-1, 0),
	(-1, -1),
];

/// The cost of a single step by `(dx, dy)`
pub fn step_cost(dx: i32, dy: i32) -> f64 {
	if dx != 0 && dy != 0 {
		DIAGONAL_COST
	} else {
		CARDINAL_COST
	}
}

/// Provides all Neighbors of a Point that lie on a Grid of size `(width, height)`, together
/// with the cost of stepping there.
///
/// Note that this does not check whether or not the Neighbors are walkable.
///
/// Neighbors that can not be represented as a [`GridPoint`] are left out, so a Grid wider or
/// taller than `i32::MAX` simply ends there.
pub fn moore_neighbors(
	point: GridPoint,
	(width, height): (usize, usize),
) -> impl Iterator<Item = (GridPoint, f64)> {
	MOORE_OFFSETS
		.iter()
		.filter_map(move |&(dx, dy)| Some((point.checked_offset(dx, dy)?, step_cost(dx, dy))))
		.filter(move |(neighbor, _)| in_bounds(*neighbor, (width, height)))
}

/// The Octile Distance between two Points: the cost of the shortest Path between them on an
/// empty Grid.
///
/// It never overestimates the real cost and is consistent, which makes A* return optimal Paths.
pub fn octile_distance(a: GridPoint, b: GridPoint) -> f64 {
	let dx = (i64::from(a.x) - i64::from(b.x)).abs() as f64;
	let dy = (i64::from(a.y) - i64::from(b.y)).abs() as f64;
	(dx + dy) + (DIAGONAL_COST - 2.0) * dx.min(dy)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn neighbors_at_edge() {
		let neighbors: Vec<_> = moore_neighbors(GridPoint::new(0, 2), (5, 5))
			.map(|(p, _)| (p.x, p.y))
			.collect();
		assert_eq!(neighbors, vec![(0, 1), (1, 1), (1, 2), (1, 3), (0, 3)]);
	}

	#[test]
	fn neighbors_at_end_of_coordinates() {
		let edge = GridPoint::new(i32::MAX, 0);
		let neighbors: Vec<_> = moore_neighbors(edge, (usize::MAX, 2))
			.map(|(p, _)| (p.x, p.y))
			.collect();
		assert_eq!(neighbors, vec![(i32::MAX, 1), (i32::MAX - 1, 1), (i32::MAX - 1, 0)]);
	}

	#[test]
	fn neighbors_in_corner_of_single_tile() {
		assert_eq!(moore_neighbors(GridPoint::new(0, 0), (1, 1)).count(), 0);
	}

	#[test]
	fn neighbor_costs() {
		for (neighbor, cost) in moore_neighbors(GridPoint::new(2, 2), (5, 5)) {
			let diagonal = neighbor.x != 2 && neighbor.y != 2;
			assert_eq!(cost, if diagonal { SQRT_2 } else { 1.0 });
		}
	}

	#[test]
	fn octile() {
		let origin = GridPoint::new(0, 0);
		assert_eq!(octile_distance(origin, GridPoint::new(3, 0)), 3.0);
		assert_eq!(octile_distance(origin, GridPoint::new(0, -3)), 3.0);
		assert!((octile_distance(origin, GridPoint::new(4, 4)) - 4.0 * SQRT_2).abs() < 1e-9);
		assert!(
			(octile_distance(GridPoint::new(1, 5), GridPoint::new(4, 4)) - (2.0 + SQRT_2)).abs()
				< 1e-9
		);
		let far = octile_distance(GridPoint::new(i32::MIN, 0), GridPoint::new(i32::MAX, 0));
		assert_eq!(far, u32::MAX as f64);
	}
}
