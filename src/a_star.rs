//! The [A* search](https://en.wikipedia.org/wiki/A*_search_algorithm) on a [`GridMap`].
//!
//! This is the uncached, unsmoothed search behind the [`Pathfinder`](crate::Pathfinder). It can
//! be used directly when the raw, Tile by Tile Path is needed.

use crate::neighbors::{moore_neighbors, octile_distance};
use crate::{GridMap, GridPoint, Path, PointMap, PointSet};

use slab::Slab;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;

/// The reason why [`a_star_search`] did not return a Path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchFailure {
	/// The start lies outside of the Grid
	StartOutOfBounds,
	/// The goal can not be walked on
	GoalBlocked,
	/// Every Tile reachable from the start was visited without finding the goal
	Exhausted,
	/// The search visited the maximum number of Tiles it was allowed to
	BudgetExceeded,
}

impl fmt::Display for SearchFailure {
	fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
		let text = match self {
			SearchFailure::StartOutOfBounds => "start is outside of the grid",
			SearchFailure::GoalBlocked => "goal is not walkable",
			SearchFailure::Exhausted => "goal is unreachable",
			SearchFailure::BudgetExceeded => "search budget exceeded",
		};
		fmt.write_str(text)
	}
}

/// The result of [`a_star_search`]
#[derive(Clone, Debug, PartialEq)]
pub struct SearchOutcome {
	/// The Path from start to goal, or why there is none
	pub path: Result<Path, SearchFailure>,
	/// The number of Tiles that were expanded
	pub expanded: usize,
}

impl SearchOutcome {
	/// Discards the failure reason
	pub fn into_path(self) -> Option<Path> {
		self.path.ok()
	}

	fn failed(reason: SearchFailure, expanded: usize) -> SearchOutcome {
		SearchOutcome {
			path: Err(reason),
			expanded,
		}
	}
}

/// A Tile discovered during one search. Parents are referenced by their key in the arena.
#[derive(Clone, Copy, Debug)]
struct SearchNode {
	pos: GridPoint,
	parent: Option<usize>,
	g: f64,
	h: f64,
	f: f64,
	closed: bool,
}

/// An entry of the open set. Ordered so that the [`BinaryHeap`] pops the lowest `f` first,
/// preferring lower `h` and then the lower Point (row-major) on ties.
#[derive(Clone, Copy, Debug)]
struct OpenEntry {
	f: f64,
	h: f64,
	pos: GridPoint,
	key: usize,
}

impl Ord for OpenEntry {
	fn cmp(&self, rhs: &Self) -> Ordering {
		rhs.f
			.total_cmp(&self.f)
			.then_with(|| rhs.h.total_cmp(&self.h))
			.then_with(|| rhs.pos.cmp(&self.pos))
	}
}
impl PartialOrd for OpenEntry {
	fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
		Some(self.cmp(rhs))
	}
}
impl PartialEq for OpenEntry {
	fn eq(&self, rhs: &Self) -> bool {
		self.cmp(rhs) == Ordering::Equal
	}
}
impl Eq for OpenEntry {}

/// Searches the shortest Path from `start` to `goal`.
///
/// Movement is allowed in all 8 directions; see [`neighbors`](crate::neighbors) for the costs.
/// The returned Path contains every Tile from `start` to `goal` (both included) and its cost is
/// the exact cost of walking it.
///
/// The goal is checked first: if it can not be walked on, no other Tile is looked at. The start
/// only has to lie on the Grid, it does not have to be walkable itself.
///
/// ## Arguments
/// - `map` - the Grid to search
/// - `start` - the Point where the search starts
/// - `goal` - the Point to search for
/// - `max_expansions` - if set, the search gives up after expanding that many Tiles
///
/// ## Examples
/// ```
/// # use tile_pathfinding::{a_star::a_star_search, Grid, GridPoint};
/// let grid = Grid::from_rows(&[
/// 	"...",
/// 	"##.",
/// 	"...",
/// ]);
/// let outcome = a_star_search(&grid, GridPoint::new(0, 0), GridPoint::new(0, 2), None);
///
/// let path = outcome.into_path().unwrap();
/// assert_eq!(path.len(), 5);
/// assert_eq!(path[2], GridPoint::new(2, 1));
/// ```
pub fn a_star_search<M: GridMap + ?Sized>(
	map: &M,
	start: GridPoint,
	goal: GridPoint,
	max_expansions: Option<usize>,
) -> SearchOutcome {
	if !map.contains(start) {
		debug!("search from {} failed: start is outside of the grid", start);
		return SearchOutcome::failed(SearchFailure::StartOutOfBounds, 0);
	}
	if start == goal {
		return SearchOutcome {
			path: Ok(Path::new(vec![start], 0.0)),
			expanded: 0,
		};
	}
	if !map.is_walkable(goal) {
		debug!("search from {} failed: goal {} is not walkable", start, goal);
		return SearchOutcome::failed(SearchFailure::GoalBlocked, 0);
	}

	#[cfg(feature = "log")]
	let timer = std::time::Instant::now();

	let size = (map.width(), map.height());
	let mut nodes: Slab<SearchNode> = Slab::new();
	let mut index: PointMap<usize> = PointMap::new();
	let mut blocked = PointSet::new();
	let mut open = BinaryHeap::new();
	let mut expanded = 0;

	let h = octile_distance(start, goal);
	let start_key = nodes.insert(SearchNode {
		pos: start,
		parent: None,
		g: 0.0,
		h,
		f: h,
		closed: false,
	});
	index.insert(start, start_key);
	open.push(OpenEntry {
		f: h,
		h,
		pos: start,
		key: start_key,
	});

	while let Some(OpenEntry { key, .. }) = open.pop() {
		let current = nodes[key];
		if current.closed {
			// a better entry for this Tile was already expanded
			continue;
		}
		if current.pos == goal {
			let path = reconstruct(&nodes, key);
			trace!(
				"search from {} to {} expanded {} tiles in {:?}",
				start,
				goal,
				expanded,
				timer.elapsed()
			);
			return SearchOutcome {
				path: Ok(path),
				expanded,
			};
		}
		if max_expansions.map_or(false, |limit| expanded >= limit) {
			debug!(
				"search from {} to {} gave up after {} tiles",
				start, goal, expanded
			);
			return SearchOutcome::failed(SearchFailure::BudgetExceeded, expanded);
		}

		nodes[key].closed = true;
		expanded += 1;

		for (neighbor, step) in moore_neighbors(current.pos, size) {
			let known = index.get(&neighbor).copied();
			match known {
				Some(other) if nodes[other].closed => continue,
				Some(_) => {}
				None => {
					if blocked.contains(&neighbor) {
						continue;
					}
					if !map.is_walkable(neighbor) {
						blocked.insert(neighbor);
						continue;
					}
				}
			}

			let g = current.g + step;
			let (other, h) = match known {
				Some(other) => {
					let node = &mut nodes[other];
					if g >= node.g {
						continue;
					}
					node.parent = Some(key);
					node.g = g;
					node.f = g + node.h;
					(other, node.h)
				}
				None => {
					let h = octile_distance(neighbor, goal);
					let other = nodes.insert(SearchNode {
						pos: neighbor,
						parent: Some(key),
						g,
						h,
						f: g + h,
						closed: false,
					});
					index.insert(neighbor, other);
					(other, h)
				}
			};
			open.push(OpenEntry {
				f: nodes[other].f,
				h,
				pos: neighbor,
				key: other,
			});
		}
	}

	debug!(
		"search from {} to {} failed: goal unreachable after {} tiles",
		start, goal, expanded
	);
	SearchOutcome::failed(SearchFailure::Exhausted, expanded)
}

fn reconstruct(nodes: &Slab<SearchNode>, goal_key: usize) -> Path {
	let mut steps = vec![];
	let mut current = Some(goal_key);
	while let Some(key) = current {
		steps.push(nodes[key].pos);
		current = nodes[key].parent;
	}
	steps.reverse();
	Path::new(steps, nodes[goal_key].g)
}
