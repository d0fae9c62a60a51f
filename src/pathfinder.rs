use crate::a_star::a_star_search;
use crate::smoothing::smooth_path;
use crate::{
	CacheStats, GridMap, GridPoint, Path, PathCache, PathfinderConfig, SharedClock, SystemClock,
};

/// Finds Paths on a [`GridMap`] and remembers them for a while.
///
/// Every call to [`find_path`](Pathfinder::find_path) runs to completion before returning.
/// Since it takes `&mut self`, a single Pathfinder can only be used by one caller at a time;
/// share it behind a `Mutex` or give every thread its own.
///
/// ## Examples
/// ```
/// # use tile_pathfinding::prelude::*;
/// let grid = Grid::from_rows(&[
/// 	"..#..",
/// 	"..#..",
/// 	".....",
/// ]);
/// let mut pathfinder = Pathfinder::new(grid);
///
/// let start = GridPoint::new(0, 0);
/// let goal = GridPoint::new(4, 0);
/// let path = pathfinder.find_path(start, goal).unwrap();
///
/// assert_eq!(path.first(), Some(start));
/// assert_eq!(path.last(), Some(goal));
/// assert!(path.iter().any(|p| p == GridPoint::new(2, 2)));
///
/// // the second search is answered by the cache
/// assert_eq!(pathfinder.find_path(start, goal), Some(path));
/// assert_eq!(pathfinder.cache_stats().hits, 1);
/// ```
#[derive(Debug)]
pub struct Pathfinder<M> {
	map: M,
	config: PathfinderConfig,
	cache: PathCache,
}

impl<M: GridMap> Pathfinder<M> {
	/// Creates a new Pathfinder with the default [`PathfinderConfig`]
	pub fn new(map: M) -> Pathfinder<M> {
		Pathfinder::with_config(map, PathfinderConfig::default())
	}

	/// Creates a new Pathfinder
	pub fn with_config(map: M, config: PathfinderConfig) -> Pathfinder<M> {
		Pathfinder::with_clock(map, config, SystemClock::shared())
	}

	/// Creates a new Pathfinder whose cache uses `clock` to expire Paths
	pub fn with_clock(map: M, config: PathfinderConfig, clock: SharedClock) -> Pathfinder<M> {
		Pathfinder {
			map,
			config,
			cache: PathCache::new(config.cache_ttl, config.cache_capacity, clock),
		}
	}

	/// Calculates the Path from `start` to `goal`.
	///
	/// If the goal can not be walked on or can not be reached, `None` is returned.
	///
	/// The Path starts with `start` and ends with `goal`. Unless
	/// [`smooth_paths`](PathfinderConfig::smooth_paths) is disabled, it only contains the
	/// Waypoints where the direction changes, and there is a clear straight line between any two
	/// consecutive Waypoints.
	///
	/// If the same Path was found recently, the cached Path is returned without searching.
	pub fn find_path(&mut self, start: GridPoint, goal: GridPoint) -> Option<Path> {
		if start == goal {
			if !self.map.contains(start) {
				return None;
			}
			let path = Path::new(vec![start], 0.0);
			self.cache.put(start, goal, path.clone());
			return Some(path);
		}

		if let Some(path) = self.cache.get(start, goal) {
			trace!("cache hit for {} -> {}", start, goal);
			return Some(path);
		}

		let raw = self.find_raw_path(start, goal)?;
		let path = if self.config.smooth_paths && raw.len() > 2 {
			Path::from_waypoints(smooth_path(&self.map, raw.as_slice()))
		} else {
			raw
		};

		self.cache.put(start, goal, path.clone());
		Some(path)
	}

	/// Calculates the Path from `start` to `goal`, without the cache and without smoothing.
	///
	/// The result contains every Tile along the Path and its cost is the exact cost of walking
	/// it. See [`a_star_search`] for details.
	pub fn find_raw_path(&self, start: GridPoint, goal: GridPoint) -> Option<Path> {
		a_star_search(&self.map, start, goal, self.config.max_expansions).into_path()
	}

	/// Forgets all cached Paths
	pub fn clear_cache(&mut self) {
		self.cache.clear();
	}

	/// Drops all expired Paths from the cache. Returns how many were dropped.
	///
	/// Expired Paths are never returned either way, this only frees their memory early.
	pub fn sweep_cache(&mut self) -> usize {
		self.cache.sweep()
	}

	/// Usage counters of the cache
	pub fn cache_stats(&self) -> CacheStats {
		self.cache.stats()
	}

	/// The Path cache
	pub fn cache(&self) -> &PathCache {
		&self.cache
	}

	/// The Grid being searched
	pub fn map(&self) -> &M {
		&self.map
	}

	/// Mutable access to the Grid.
	///
	/// Since the Grid is about to change, all cached Paths are dropped.
	pub fn map_mut(&mut self) -> &mut M {
		self.cache.clear();
		&mut self.map
	}

	/// Returns the Grid, dropping the Pathfinder
	pub fn into_map(self) -> M {
		self.map
	}

	/// The config this Pathfinder was created with
	pub fn config(&self) -> PathfinderConfig {
		self.config
	}
}
