//! Path smoothing by line-of-sight shortcuts ("string pulling").
//!
//! A Path found on the Grid moves from Tile to Tile and often zig-zags where a straight line
//! would do. Smoothing walks the Path from the start and, from every kept Waypoint, jumps to the
//! furthest later Waypoint that can be seen from it. Whether a straight line is clear is decided
//! by the Tiles a [Bresenham line](https://en.wikipedia.org/wiki/Bresenham%27s_line_algorithm)
//! between the two Points passes through.

use crate::{GridMap, GridPoint};

/// The Tiles on the straight line from one Point to another, both included.
///
/// ```
/// # use tile_pathfinding::{smoothing::Line, GridPoint};
/// let tiles: Vec<_> = Line::new(GridPoint::new(0, 0), GridPoint::new(3, 1))
/// 	.map(|p| (p.x, p.y))
/// 	.collect();
/// assert_eq!(tiles, vec![(0, 0), (1, 0), (2, 1), (3, 1)]);
/// ```
#[allow(missing_copy_implementations)]
#[derive(Clone, Debug)]
pub struct Line {
	x: i64,
	y: i64,
	end: (i64, i64),
	dx: i64,
	dy: i64,
	step_x: i64,
	step_y: i64,
	err: i64,
	done: bool,
}

impl Line {
	/// Creates the Line from `from` to `to`
	pub fn new(from: GridPoint, to: GridPoint) -> Line {
		let (x0, y0) = (i64::from(from.x), i64::from(from.y));
		let (x1, y1) = (i64::from(to.x), i64::from(to.y));
		let dx = (x1 - x0).abs();
		let dy = -(y1 - y0).abs();
		Line {
			x: x0,
			y: y0,
			end: (x1, y1),
			dx,
			dy,
			step_x: if x0 < x1 { 1 } else { -1 },
			step_y: if y0 < y1 { 1 } else { -1 },
			err: dx + dy,
			done: false,
		}
	}
}

impl Iterator for Line {
	type Item = GridPoint;
	fn next(&mut self) -> Option<GridPoint> {
		if self.done {
			return None;
		}
		// both coordinates stay between the two i32 endpoints
		let current = GridPoint::new(self.x as i32, self.y as i32);
		if (self.x, self.y) == self.end {
			self.done = true;
		} else {
			let e2 = 2 * self.err;
			if e2 >= self.dy {
				self.err += self.dy;
				self.x += self.step_x;
			}
			if e2 <= self.dx {
				self.err += self.dx;
				self.y += self.step_y;
			}
		}
		Some(current)
	}
}

impl std::iter::FusedIterator for Line {}

/// Whether or not every Tile on the straight line from `from` to `to` can be walked on
pub fn has_line_of_sight<M: GridMap + ?Sized>(map: &M, from: GridPoint, to: GridPoint) -> bool {
	Line::new(from, to).all(|p| map.is_walkable(p))
}

/// Removes all Waypoints of `path` that can be skipped by walking in a straight line.
///
/// The first and last Waypoint are always kept. Between every two consecutive Waypoints of the
/// result, every Tile on the straight [`Line`] after the first one is walkable. The first Tile
/// is already occupied by whoever walks the Path, so a Path starting on a solid Tile is
/// smoothed like any other. For walkable starts this is the same as
/// [`has_line_of_sight`].
///
/// `path` is expected to be a Path of neighboring, walkable Tiles, as returned by
/// [`a_star_search`](crate::a_star::a_star_search).
///
/// ## Examples
/// ```
/// # use tile_pathfinding::{smoothing::smooth_path, Grid, GridPoint};
/// let grid = Grid::from_rows(&[
/// 	"....",
/// 	".#..",
/// 	"....",
/// ]);
/// let path: Vec<GridPoint> = [(0, 0), (1, 0), (2, 0), (3, 1), (3, 2)]
/// 	.iter()
/// 	.map(|&p| p.into())
/// 	.collect();
///
/// let smoothed = smooth_path(&grid, &path);
/// assert_eq!(smoothed, vec![GridPoint::new(0, 0), GridPoint::new(3, 1), GridPoint::new(3, 2)]);
/// ```
pub fn smooth_path<M: GridMap + ?Sized>(map: &M, path: &[GridPoint]) -> Vec<GridPoint> {
	if path.len() <= 2 {
		return path.to_vec();
	}

	let mut smoothed = vec![path[0]];
	let mut anchor = 0;

	while anchor < path.len() - 1 {
		let furthest = ((anchor + 2)..path.len())
			.rev()
			.find(|&candidate| clear_line_from(map, path[anchor], path[candidate]))
			.unwrap_or(anchor + 1);

		smoothed.push(path[furthest]);
		anchor = furthest;
	}

	smoothed
}

fn clear_line_from<M: GridMap + ?Sized>(map: &M, from: GridPoint, to: GridPoint) -> bool {
	Line::new(from, to).skip(1).all(|p| map.is_walkable(p))
}
