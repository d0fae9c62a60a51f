use crate::GridPoint;

use std::fmt;
use std::ops::Index;
use std::sync::Arc;

/// A Path on the Grid: an ordered list of Waypoints from the start to the goal.
///
/// The Waypoints are shared between clones, so cloning a Path is cheap. A Path can not be
/// modified once created, which is what allows the [`PathCache`](crate::PathCache) to hand out
/// the Paths it stores.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
	points: Arc<[GridPoint]>,
	cost: f64,
}

impl Path {
	/// Creates a Path with a known cost
	pub fn new(points: Vec<GridPoint>, cost: f64) -> Path {
		Path {
			points: points.into(),
			cost,
		}
	}

	/// Creates a Path whose cost is the length of the straight lines between its Waypoints
	pub fn from_waypoints(points: Vec<GridPoint>) -> Path {
		let cost = points.windows(2).map(|w| w[0].distance(w[1])).sum();
		Path::new(points, cost)
	}

	/// The total cost of walking along the Path
	pub fn cost(&self) -> f64 {
		self.cost
	}

	/// The number of Waypoints
	pub fn len(&self) -> usize {
		self.points.len()
	}

	/// Whether or not the Path has no Waypoints
	pub fn is_empty(&self) -> bool {
		self.points.is_empty()
	}

	/// The start of the Path
	pub fn first(&self) -> Option<GridPoint> {
		self.points.first().copied()
	}

	/// The goal of the Path
	pub fn last(&self) -> Option<GridPoint> {
		self.points.last().copied()
	}

	/// The Waypoints as a slice
	pub fn as_slice(&self) -> &[GridPoint] {
		&self.points
	}

	/// Copies the Waypoints into a Vec
	pub fn to_vec(&self) -> Vec<GridPoint> {
		self.points.to_vec()
	}

	/// Returns an Iterator over the Waypoints
	pub fn iter(&self) -> Iter<'_> {
		Iter {
			iter: self.points.iter(),
		}
	}
}

impl Index<usize> for Path {
	type Output = GridPoint;
	fn index(&self, index: usize) -> &GridPoint {
		&self.points[index]
	}
}

/// An Iterator over the Waypoints of a [`Path`]
#[derive(Debug, Clone)]
pub struct Iter<'a> {
	iter: std::slice::Iter<'a, GridPoint>,
}

impl Iterator for Iter<'_> {
	type Item = GridPoint;
	fn next(&mut self) -> Option<Self::Item> {
		self.iter.next().copied()
	}
	fn size_hint(&self) -> (usize, Option<usize>) {
		self.iter.size_hint()
	}
}

impl DoubleEndedIterator for Iter<'_> {
	fn next_back(&mut self) -> Option<Self::Item> {
		self.iter.next_back().copied()
	}
}
impl ExactSizeIterator for Iter<'_> {}
impl std::iter::FusedIterator for Iter<'_> {}

impl<'a> IntoIterator for &'a Path {
	type Item = GridPoint;
	type IntoIter = Iter<'a>;
	fn into_iter(self) -> Iter<'a> {
		self.iter()
	}
}

impl PartialEq<Vec<GridPoint>> for Path {
	fn eq(&self, rhs: &Vec<GridPoint>) -> bool {
		*self.points == **rhs
	}
}

impl<'a> PartialEq<&'a [GridPoint]> for Path {
	fn eq(&self, rhs: &&'a [GridPoint]) -> bool {
		*self.points == **rhs
	}
}

impl fmt::Display for Path {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		write!(fmt, "Path[Cost = {:.3}]: ", self.cost)?;
		if self.points.is_empty() {
			write!(fmt, "<empty>")
		} else {
			write!(fmt, "{}", self.points[0])?;
			for p in self.points.iter().skip(1) {
				write!(fmt, " -> {}", p)?;
			}
			Ok(())
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn points(raw: &[(i32, i32)]) -> Vec<GridPoint> {
		raw.iter().map(|&p| p.into()).collect()
	}

	#[test]
	fn index() {
		let path = Path::new(points(&[(4, 0), (2, 1), (0, 0)]), 42.0);

		assert_eq!(path[0], GridPoint::new(4, 0));
		assert_eq!(path[1], GridPoint::new(2, 1));
		assert_eq!(path[2], GridPoint::new(0, 0));
	}

	#[test]
	fn waypoint_cost() {
		let path = Path::from_waypoints(points(&[(0, 0), (3, 4), (3, 6)]));
		assert_eq!(path.cost(), 7.0);

		let single = Path::from_waypoints(points(&[(1, 1)]));
		assert_eq!(single.cost(), 0.0);
		assert_eq!(single.first(), single.last());
	}

	#[test]
	fn clones_share_points() {
		let path = Path::from_waypoints(points(&[(0, 0), (1, 1)]));
		let copy = path.clone();
		assert!(std::ptr::eq(path.as_slice(), copy.as_slice()));
		assert_eq!(copy, points(&[(0, 0), (1, 1)]));
	}

	#[test]
	fn display() {
		let path = Path::new(points(&[(4, 2), (0, 0)]), 4.5);

		assert_eq!(
			&format!("{}", path),
			"Path[Cost = 4.500]: (4, 2) -> (0, 0)"
		);
	}

	#[test]
	fn display_empty() {
		let path = Path::new(Vec::new(), 0.0);

		assert_eq!(&format!("{}", path), "Path[Cost = 0.000]: <empty>");
	}
}
