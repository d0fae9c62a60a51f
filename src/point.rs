use std::fmt;

/// A Position on the Grid.
///
/// Coordinates are signed so that any Point can be asked about, even ones left of or above the
/// Grid. Those are simply never walkable.
///
/// Points are ordered row by row (`y` first, then `x`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPoint {
	/// the vertical coordinate. Declared first so that the derived ordering is row-major
	pub y: i32,
	/// the horizontal coordinate
	pub x: i32,
}

impl GridPoint {
	/// Creates a new GridPoint
	pub const fn new(x: i32, y: i32) -> GridPoint {
		GridPoint { x, y }
	}

	/// Moves the Point by the given offset
	///
	/// ## Panics
	/// in debug builds, if the result does not fit into an `i32`. See
	/// [`checked_offset`](GridPoint::checked_offset).
	pub const fn offset(self, dx: i32, dy: i32) -> GridPoint {
		GridPoint::new(self.x + dx, self.y + dy)
	}

	/// Moves the Point by the given offset, or returns `None` if the result does not fit into
	/// an `i32`
	pub fn checked_offset(self, dx: i32, dy: i32) -> Option<GridPoint> {
		Some(GridPoint::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
	}

	/// The straight line distance between two Points
	pub fn distance(self, other: GridPoint) -> f64 {
		let dx = (i64::from(self.x) - i64::from(other.x)) as f64;
		let dy = (i64::from(self.y) - i64::from(other.y)) as f64;
		dx.hypot(dy)
	}
}

impl From<(i32, i32)> for GridPoint {
	fn from((x, y): (i32, i32)) -> GridPoint {
		GridPoint::new(x, y)
	}
}

impl From<GridPoint> for (i32, i32) {
	fn from(point: GridPoint) -> (i32, i32) {
		(point.x, point.y)
	}
}

impl fmt::Display for GridPoint {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "({}, {})", self.x, self.y)
	}
}

/// A [`HashMap`](hashbrown::HashMap) keyed by [`GridPoint`]
pub type PointMap<V> = hashbrown::HashMap<GridPoint, V>;
/// A [`HashSet`](hashbrown::HashSet) of [`GridPoint`]s
pub type PointSet = hashbrown::HashSet<GridPoint>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn row_major_order() {
		let mut points = vec![
			GridPoint::new(2, 1),
			GridPoint::new(0, 2),
			GridPoint::new(5, 0),
			GridPoint::new(1, 1),
		];
		points.sort();
		assert_eq!(
			points,
			vec![
				GridPoint::new(5, 0),
				GridPoint::new(1, 1),
				GridPoint::new(2, 1),
				GridPoint::new(0, 2),
			]
		);
	}

	#[test]
	fn display() {
		assert_eq!(&format!("{}", GridPoint::new(3, -1)), "(3, -1)");
	}

	#[test]
	fn distance() {
		assert_eq!(GridPoint::new(0, 0).distance(GridPoint::new(3, 4)), 5.0);
		let far = GridPoint::new(i32::MIN, 0).distance(GridPoint::new(i32::MAX, 0));
		assert_eq!(far, u32::MAX as f64);
	}

	#[test]
	fn checked_offset() {
		let edge = GridPoint::new(i32::MAX, i32::MIN);
		assert_eq!(edge.checked_offset(-1, 1), Some(GridPoint::new(i32::MAX - 1, i32::MIN + 1)));
		assert_eq!(edge.checked_offset(1, 0), None);
		assert_eq!(edge.checked_offset(0, -1), None);
	}
}
