use std::time::Duration;

/// Options for configuring the [`Pathfinder`](crate::Pathfinder)
///
/// Default options:
/// ```
/// # use tile_pathfinding::PathfinderConfig;
/// # use std::time::Duration;
/// assert_eq!(
/// 	PathfinderConfig {
/// 		cache_ttl: Duration::from_millis(5000),
/// 		cache_capacity: 100,
/// 		smooth_paths: true,
/// 		max_expansions: None,
/// 	},
/// 	Default::default()
/// );
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathfinderConfig {
	/// How long a Path stays in the cache after it was inserted (defaults to `5s`).
	///
	/// Reading a Path does not extend its lifetime.
	pub cache_ttl: Duration,
	/// The maximum number of Paths in the cache (defaults to `100`).
	///
	/// When full, the oldest Path is evicted to make room. `0` disables the cache.
	pub cache_capacity: usize,
	/// `true` (default): remove redundant Waypoints from the found Paths, leaving only the
	/// corners where the direction has to change.
	///
	/// `false`: return every Tile along the Path.
	pub smooth_paths: bool,
	/// `None` (default): a search runs until it either finds the Goal or runs out of Tiles.
	///
	/// `Some(n)`: a search gives up after expanding `n` Tiles and reports that no Path exists.
	/// This bounds the time spent on huge, open Maps at the price of missing long Paths.
	pub max_expansions: Option<usize>,
}

impl PathfinderConfig {
	/// The default lifetime of a cached Path
	pub const DEFAULT_TTL: Duration = Duration::from_millis(5000);

	/// an example PathfinderConfig without a cache
	///
	/// Values:
	/// ```
	/// # use tile_pathfinding::PathfinderConfig;
	/// # use std::time::Duration;
	/// assert_eq!(
	/// 	PathfinderConfig {
	/// 		cache_ttl: Duration::from_millis(5000),
	/// 		cache_capacity: 0,
	/// 		smooth_paths: true,
	/// 		max_expansions: None,
	/// 	},
	/// 	PathfinderConfig::UNCACHED
	/// );
	/// ```
	pub const UNCACHED: PathfinderConfig = PathfinderConfig {
		cache_ttl: PathfinderConfig::DEFAULT_TTL,
		cache_capacity: 0,
		smooth_paths: true,
		max_expansions: None,
	};
	/// an example PathfinderConfig that returns the unsmoothed Grid Paths
	///
	/// Values:
	/// ```
	/// # use tile_pathfinding::PathfinderConfig;
	/// # use std::time::Duration;
	/// assert_eq!(
	/// 	PathfinderConfig {
	/// 		cache_ttl: Duration::from_millis(5000),
	/// 		cache_capacity: 100,
	/// 		smooth_paths: false,
	/// 		max_expansions: None,
	/// 	},
	/// 	PathfinderConfig::RAW
	/// );
	/// ```
	pub const RAW: PathfinderConfig = PathfinderConfig {
		cache_ttl: PathfinderConfig::DEFAULT_TTL,
		cache_capacity: 100,
		smooth_paths: false,
		max_expansions: None,
	};
	/// an example PathfinderConfig with a search budget for large open Maps
	///
	/// Values:
	/// ```
	/// # use tile_pathfinding::PathfinderConfig;
	/// # use std::time::Duration;
	/// assert_eq!(
	/// 	PathfinderConfig {
	/// 		cache_ttl: Duration::from_millis(5000),
	/// 		cache_capacity: 100,
	/// 		smooth_paths: true,
	/// 		max_expansions: Some(10_000),
	/// 	},
	/// 	PathfinderConfig::BOUNDED
	/// );
	/// ```
	pub const BOUNDED: PathfinderConfig = PathfinderConfig {
		cache_ttl: PathfinderConfig::DEFAULT_TTL,
		cache_capacity: 100,
		smooth_paths: true,
		max_expansions: Some(10_000),
	};

	/// Creates a default config with a different cache lifetime
	pub fn with_ttl(cache_ttl: Duration) -> PathfinderConfig {
		PathfinderConfig {
			cache_ttl,
			..Default::default()
		}
	}
}

impl Default for PathfinderConfig {
	fn default() -> PathfinderConfig {
		PathfinderConfig {
			cache_ttl: PathfinderConfig::DEFAULT_TTL,
			cache_capacity: 100,
			smooth_paths: true,
			max_expansions: None,
		}
	}
}
