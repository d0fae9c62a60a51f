#![warn(
	missing_docs,
	missing_debug_implementations,
	missing_copy_implementations,
	trivial_casts,
	trivial_numeric_casts,
	unsafe_code,
	unstable_features,
	unused_import_braces,
	unused_qualifications
)]

//! A crate to find and cache Paths on a walkable Grid.
//!
//! ## Introduction
//! Characters in a tile based World usually need to walk from one Tile to another without
//! running into Walls. This crate provides an A* search over such a Grid, where every Tile is
//! either walkable or solid, and movement is allowed in all 8 directions (the 4 cardinal
//! directions cost `1.0`, the 4 diagonals cost `√2`).
//!
//! The raw result of a Grid search zig-zags from Tile to Tile. Unless disabled, the Path is
//! "string pulled" afterwards: any Waypoints that can be skipped because there is a straight,
//! unobstructed line between their neighbors are removed.
//!
//! Since the same Paths tend to be requested over and over again (e.g. every Enemy walking
//! towards the Player), finished Paths are stored in a small [`PathCache`] for a few seconds.
//!
//! The Grid itself is never owned in a specific format. Anything that implements [`GridMap`]
//! can be searched, including [`ChunkedMap`], which splits a large Grid into square Chunks that
//! are only materialized when they are first touched.
//!
//! ## Examples
//! Finding a Path:
//! ```
//! use tile_pathfinding::prelude::*;
//!
//! let grid = Grid::from_rows(&[
//!     ".....",
//!     ".....",
//!     "##.##",
//!     ".....",
//!     ".....",
//! ]);
//!
//! let mut pathfinder = Pathfinder::new(grid);
//!
//! // find_path returns Some(Path) on success
//! let path = pathfinder.find_path((0, 0).into(), (4, 4).into());
//!
//! assert!(path.is_some());
//! let path = path.unwrap();
//! assert_eq!(path.first(), Some(GridPoint::new(0, 0)));
//! assert_eq!(path.last(), Some(GridPoint::new(4, 4)));
//! ```
//!
//! An unreachable or solid Goal results in `None`:
//! ```
//! # use tile_pathfinding::prelude::*;
//! let grid = Grid::from_rows(&[
//!     "..#..",
//!     "..#..",
//!     "..#..",
//! ]);
//! let mut pathfinder = Pathfinder::new(grid);
//!
//! assert!(pathfinder.find_path((0, 0).into(), (4, 2).into()).is_none());
//! assert!(pathfinder.find_path((0, 0).into(), (2, 1).into()).is_none());
//! ```
//!
//! ### Updating the Grid
//! Cached Paths know nothing about the Grid they were computed on. Any change to the Grid
//! therefore needs to clear the cache, which [`map_mut`](Pathfinder::map_mut) does on its own:
//! ```
//! # use tile_pathfinding::prelude::*;
//! let mut pathfinder = Pathfinder::new(Grid::new(5, 5));
//! let (start, goal) = (GridPoint::new(0, 0), GridPoint::new(4, 0));
//!
//! assert_eq!(pathfinder.find_path(start, goal).unwrap().len(), 2);
//!
//! pathfinder.map_mut().set_walkable(GridPoint::new(2, 0), false);
//!
//! assert_eq!(pathfinder.find_path(start, goal).unwrap().len(), 3);
//! ```
//!
//! ### Configuration
//! The second parameter of [`Pathfinder::with_config`] is a [`PathfinderConfig`] with options
//! for the cache, the smoothing and the search budget:
//! ```
//! # use tile_pathfinding::prelude::*;
//! let pathfinder = Pathfinder::with_config(
//!     Grid::new(8, 8),
//!     PathfinderConfig {
//!         smooth_paths: false,
//!         ..PathfinderConfig::UNCACHED
//!     },
//! );
//!
//! assert_eq!(pathfinder.config().cache_capacity, 0);
//! ```

#[cfg(feature = "log")]
macro_rules! trace {
	($($arg:tt)*) => { log::trace!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! trace {
	($($arg:tt)*) => {};
}

#[cfg(feature = "log")]
macro_rules! debug {
	($($arg:tt)*) => { log::debug!($($arg)*) };
}
#[cfg(not(feature = "log"))]
macro_rules! debug {
	($($arg:tt)*) => {};
}

mod point;
pub use self::point::{GridPoint, PointMap, PointSet};

mod clock;
pub use self::clock::{Clock, ManualClock, SharedClock, SystemClock};

mod config;
pub use self::config::PathfinderConfig;

mod grid;
pub use self::grid::{grid_fn, Grid, GridFn, GridMap, TileSource};

mod chunk;
pub use self::chunk::{ChunkedMap, MapChunk};

mod path;
pub use self::path::{Iter, Path};

mod cache;
pub use self::cache::{CacheStats, PathCache};

pub mod neighbors;

pub mod a_star;

pub mod smoothing;

mod pathfinder;
pub use self::pathfinder::Pathfinder;

/// The most commonly used Types and Traits
pub mod prelude {
	pub use crate::{
		ChunkedMap, Grid, GridMap, GridPoint, Path, PathCache, Pathfinder, PathfinderConfig,
		TileSource,
	};
}
