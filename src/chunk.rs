use crate::clock::to_nanos;
use crate::grid::in_bounds;
use crate::{GridMap, GridPoint, SharedClock, TileSource};

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::time::Duration;

/// The Position of a Chunk, counted in Chunks rather than Tiles
type ChunkPos = (i32, i32);

/// A square section of a [`ChunkedMap`] with a copy of the Tile data it covers.
///
/// Chunks are immutable once loaded, except for the time they were last read from, which
/// is updated by every call to [`is_walkable`](MapChunk::is_walkable) or
/// [`tile_id`](MapChunk::tile_id). The Chunk never removes itself; that is left to whoever
/// owns it (see [`ChunkedMap::evict_idle`]).
#[derive(Debug)]
pub struct MapChunk {
	pos: ChunkPos,
	size: usize,
	tile_ids: Box<[u32]>,
	walkable: Box<[bool]>,
	last_access: AtomicU64,
	clock: SharedClock,
}

impl MapChunk {
	/// Copies the Tiles of Chunk `pos` out of `source`.
	///
	/// Parts of the Chunk that lie outside of the Grid are filled with solid Tiles of type `0`,
	/// so a Chunk entirely outside of the Grid is valid, just not walkable.
	pub fn load<S: TileSource + ?Sized>(
		source: &S,
		pos: ChunkPos,
		size: usize,
		clock: SharedClock,
	) -> MapChunk {
		let mut tile_ids = vec![0; size * size].into_boxed_slice();
		let mut walkable = vec![false; size * size].into_boxed_slice();

		let grid_size = (source.width(), source.height());
		let origin_x = i64::from(pos.0) * size as i64;
		let origin_y = i64::from(pos.1) * size as i64;

		for local_y in 0..size {
			for local_x in 0..size {
				let x = i32::try_from(origin_x + local_x as i64);
				let y = i32::try_from(origin_y + local_y as i64);
				let point = match (x, y) {
					(Ok(x), Ok(y)) => GridPoint::new(x, y),
					_ => continue,
				};
				if !in_bounds(point, grid_size) {
					continue;
				}
				let index = local_y * size + local_x;
				tile_ids[index] = source.tile_id(point);
				walkable[index] = source.is_walkable(point);
			}
		}

		let now = to_nanos(clock.now());
		MapChunk {
			pos,
			size,
			tile_ids,
			walkable,
			last_access: AtomicU64::new(now),
			clock,
		}
	}

	/// The Position of this Chunk in Chunk coordinates
	pub fn pos(&self) -> (i32, i32) {
		self.pos
	}

	/// The width and height of this Chunk in Tiles
	pub fn size(&self) -> usize {
		self.size
	}

	/// Whether or not a Tile of this Chunk can be walked on.
	///
	/// `local_x` and `local_y` are relative to the top-left corner of the Chunk.
	/// Anything outside of `[0, size)` is not walkable.
	pub fn is_walkable(&self, local_x: i32, local_y: i32) -> bool {
		self.touch();
		self.local_index(local_x, local_y)
			.map_or(false, |i| self.walkable[i])
	}

	/// The type of a Tile of this Chunk, or `0` outside of `[0, size)`.
	pub fn tile_id(&self, local_x: i32, local_y: i32) -> u32 {
		self.touch();
		self.local_index(local_x, local_y)
			.map_or(0, |i| self.tile_ids[i])
	}

	/// The last time this Chunk was read from or loaded, according to its Clock
	pub fn last_access(&self) -> Duration {
		Duration::from_nanos(self.last_access.load(Ordering::Relaxed))
	}

	fn touch(&self) {
		self.last_access
			.store(to_nanos(self.clock.now()), Ordering::Relaxed);
	}

	fn local_index(&self, local_x: i32, local_y: i32) -> Option<usize> {
		if in_bounds(GridPoint::new(local_x, local_y), (self.size, self.size)) {
			Some(local_y as usize * self.size + local_x as usize)
		} else {
			None
		}
	}
}

/// A [`GridMap`] that loads its Tiles in square Chunks on first use.
///
/// Every query is answered by the Chunk covering the Point. Chunks are loaded from the
/// [`TileSource`] the first time any of their Tiles is asked for and kept until they are
/// evicted with [`evict_idle`](ChunkedMap::evict_idle) or invalidated by
/// [`tiles_changed`](ChunkedMap::tiles_changed).
///
/// The Chunks are behind a lock, so a ChunkedMap can be searched through a shared reference
/// from several threads at once.
///
/// ## Examples
/// ```
/// # use tile_pathfinding::{prelude::*, SystemClock};
/// let map = ChunkedMap::with_chunk_size(Grid::new(40, 40), 8, SystemClock::shared());
///
/// assert!(map.is_walkable(GridPoint::new(10, 20)));
/// assert_eq!(map.loaded_chunks(), 1);
///
/// let chunk = map.get_chunk(1, 2);
/// assert!(chunk.is_walkable(2, 4));
/// assert!(!chunk.is_walkable(8, 0));
/// ```
#[derive(Debug)]
pub struct ChunkedMap<S> {
	source: S,
	chunk_size: usize,
	chunks: RwLock<hashbrown::HashMap<ChunkPos, Arc<MapChunk>>>,
	clock: SharedClock,
}

impl<S: TileSource> ChunkedMap<S> {
	/// The width and height of a Chunk unless configured otherwise
	pub const DEFAULT_CHUNK_SIZE: usize = 16;

	/// Creates a new ChunkedMap with Chunks of [`DEFAULT_CHUNK_SIZE`](Self::DEFAULT_CHUNK_SIZE)
	pub fn new(source: S, clock: SharedClock) -> ChunkedMap<S> {
		ChunkedMap::with_chunk_size(source, Self::DEFAULT_CHUNK_SIZE, clock)
	}

	/// Creates a new ChunkedMap with Chunks of `chunk_size × chunk_size` Tiles
	///
	/// ## Panics
	/// if `chunk_size` is `0` or larger than `i32::MAX`
	pub fn with_chunk_size(source: S, chunk_size: usize, clock: SharedClock) -> ChunkedMap<S> {
		assert!(chunk_size > 0, "chunk_size must be positive");
		assert!(
			i32::try_from(chunk_size).is_ok(),
			"chunk_size must fit into an i32"
		);
		ChunkedMap {
			source,
			chunk_size,
			chunks: RwLock::new(hashbrown::HashMap::new()),
			clock,
		}
	}

	/// The width and height of a Chunk in Tiles
	pub fn chunk_size(&self) -> usize {
		self.chunk_size
	}

	/// Returns the Chunk at `(chunk_x, chunk_y)`, loading it if necessary.
	///
	/// Chunks outside of the Grid are loaded like any other and are entirely solid.
	pub fn get_chunk(&self, chunk_x: i32, chunk_y: i32) -> Arc<MapChunk> {
		let pos = (chunk_x, chunk_y);
		if let Some(chunk) = self.read().get(&pos) {
			return Arc::clone(chunk);
		}
		let chunk = Arc::new(self.load(pos));
		Arc::clone(self.write().entry(pos).or_insert(chunk))
	}

	/// The Chunk coordinates containing `point`, and the Position of `point` within that Chunk
	pub fn chunk_of(&self, point: GridPoint) -> ((i32, i32), (i32, i32)) {
		// checked in with_chunk_size
		let size = self.chunk_size as i32;
		(
			(point.x.div_euclid(size), point.y.div_euclid(size)),
			(point.x.rem_euclid(size), point.y.rem_euclid(size)),
		)
	}

	/// The number of Chunks currently in memory
	pub fn loaded_chunks(&self) -> usize {
		self.read().len()
	}

	/// Whether or not the Chunk at `(chunk_x, chunk_y)` is currently in memory
	pub fn is_loaded(&self, chunk_x: i32, chunk_y: i32) -> bool {
		self.read().contains_key(&(chunk_x, chunk_y))
	}

	/// Loads all of the given Chunks that are not already in memory
	pub fn preload(&self, chunks: &[(i32, i32)]) {
		for &(chunk_x, chunk_y) in chunks {
			self.get_chunk(chunk_x, chunk_y);
		}
	}

	/// Loads all of the given Chunks that are not already in memory, using all available threads
	#[cfg(feature = "parallel")]
	pub fn preload_parallel(&self, chunks: &[(i32, i32)])
	where
		S: Sync,
	{
		use rayon::prelude::*;

		let missing: Vec<ChunkPos> = {
			let loaded = self.read();
			chunks
				.iter()
				.copied()
				.filter(|pos| !loaded.contains_key(pos))
				.collect()
		};
		let new_chunks: Vec<(ChunkPos, MapChunk)> = missing
			.into_par_iter()
			.map(|pos| (pos, self.load(pos)))
			.collect();

		let mut loaded = self.write();
		for (pos, chunk) in new_chunks {
			loaded.entry(pos).or_insert_with(|| Arc::new(chunk));
		}
	}

	/// Drops every Chunk that has not been read from within `max_idle`.
	///
	/// Returns the number of Chunks that were dropped. Copies of a dropped Chunk that were
	/// handed out by [`get_chunk`](ChunkedMap::get_chunk) stay valid.
	pub fn evict_idle(&self, max_idle: Duration) -> usize {
		let now = self.clock.now();
		let mut chunks = self.write();
		let before = chunks.len();
		chunks.retain(|_, chunk| now.saturating_sub(chunk.last_access()) < max_idle);
		let evicted = before - chunks.len();
		if evicted > 0 {
			debug!("evicted {} idle chunks, {} remaining", evicted, chunks.len());
		}
		evicted
	}

	/// Tells the Map that the Tiles at the given Points have changed in the [`TileSource`].
	///
	/// The Chunks covering those Points are dropped and will be loaded again on their next use.
	pub fn tiles_changed(&mut self, tiles: &[GridPoint]) {
		let positions: Vec<ChunkPos> = tiles.iter().map(|&p| self.chunk_of(p).0).collect();
		let chunks = self.chunks.get_mut().unwrap_or_else(PoisonError::into_inner);
		for pos in positions {
			chunks.remove(&pos);
		}
	}

	/// The underlying Tile data
	pub fn source(&self) -> &S {
		&self.source
	}

	/// Mutable access to the underlying Tile data.
	///
	/// Since any Tile might change, all Chunks are dropped. Use
	/// [`tiles_changed`](ChunkedMap::tiles_changed) instead if only a few Tiles change.
	pub fn source_mut(&mut self) -> &mut S {
		self.chunks
			.get_mut()
			.unwrap_or_else(PoisonError::into_inner)
			.clear();
		&mut self.source
	}

	fn load(&self, pos: ChunkPos) -> MapChunk {
		trace!("loading chunk ({}, {})", pos.0, pos.1);
		MapChunk::load(&self.source, pos, self.chunk_size, Arc::clone(&self.clock))
	}

	// Chunks never change once loaded, so a poisoned lock still holds valid data
	fn read(&self) -> RwLockReadGuard<'_, hashbrown::HashMap<ChunkPos, Arc<MapChunk>>> {
		self.chunks.read().unwrap_or_else(PoisonError::into_inner)
	}
	fn write(&self) -> RwLockWriteGuard<'_, hashbrown::HashMap<ChunkPos, Arc<MapChunk>>> {
		self.chunks.write().unwrap_or_else(PoisonError::into_inner)
	}
}

impl<S: TileSource> GridMap for ChunkedMap<S> {
	fn width(&self) -> usize {
		self.source.width()
	}
	fn height(&self) -> usize {
		self.source.height()
	}
	fn is_walkable(&self, point: GridPoint) -> bool {
		if !self.contains(point) {
			return false;
		}
		let ((chunk_x, chunk_y), (local_x, local_y)) = self.chunk_of(point);
		self.get_chunk(chunk_x, chunk_y)
			.is_walkable(local_x, local_y)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Grid, ManualClock};

	fn map(rows: &[&str], chunk_size: usize) -> (ChunkedMap<Grid>, ManualClock) {
		let clock = ManualClock::new();
		let map = ChunkedMap::with_chunk_size(
			Grid::from_rows(rows),
			chunk_size,
			Arc::new(clock.clone()),
		);
		(map, clock)
	}

	#[test]
	fn loads_on_first_use() {
		let (map, _) = map(&["....", "..#.", "....", "...."], 2);
		assert_eq!(map.loaded_chunks(), 0);

		assert!(!map.is_walkable(GridPoint::new(2, 1)));
		assert!(map.is_loaded(1, 0));
		assert_eq!(map.loaded_chunks(), 1);

		assert!(map.is_walkable(GridPoint::new(3, 1)));
		assert_eq!(map.loaded_chunks(), 1);
	}

	#[test]
	fn out_of_bounds_queries_load_nothing() {
		let (map, _) = map(&["...", "..."], 2);
		assert!(!map.is_walkable(GridPoint::new(-1, 0)));
		assert!(!map.is_walkable(GridPoint::new(3, 0)));
		assert!(!map.is_walkable(GridPoint::new(0, 2)));
		assert_eq!(map.loaded_chunks(), 0);
	}

	#[test]
	fn partial_chunk_is_padded() {
		let (map, _) = map(&["123", "456", "789"], 2);
		let chunk = map.get_chunk(1, 1);

		assert!(chunk.is_walkable(0, 0));
		assert_eq!(chunk.tile_id(0, 0), 9);
		assert!(!chunk.is_walkable(1, 0));
		assert_eq!(chunk.tile_id(1, 0), 0);
		assert!(!chunk.is_walkable(0, 1));
	}

	#[test]
	fn chunk_outside_of_grid() {
		let (map, _) = map(&["..", ".."], 2);
		for (chunk_x, chunk_y) in [(-1, 0), (5, 5), (0, -3), (i32::MAX, i32::MIN)] {
			let chunk = map.get_chunk(chunk_x, chunk_y);
			for y in 0..2 {
				for x in 0..2 {
					assert!(!chunk.is_walkable(x, y));
					assert_eq!(chunk.tile_id(x, y), 0);
				}
			}
		}
	}

	#[test]
	fn local_bounds() {
		let (map, _) = map(&["22", "22"], 2);
		let chunk = map.get_chunk(0, 0);
		assert_eq!(chunk.tile_id(1, 1), 2);
		for (x, y) in [(-1, 0), (0, -1), (2, 0), (0, 2)] {
			assert!(!chunk.is_walkable(x, y));
			assert_eq!(chunk.tile_id(x, y), 0);
		}
	}

	#[test]
	fn access_updates_timestamp() {
		let (map, clock) = map(&["....", "...."], 2);
		let chunk = map.get_chunk(0, 0);
		assert_eq!(chunk.last_access(), Duration::ZERO);

		clock.advance(Duration::from_millis(40));
		chunk.tile_id(0, 0);
		assert_eq!(chunk.last_access(), Duration::from_millis(40));

		clock.advance(Duration::from_millis(10));
		assert!(map.is_walkable(GridPoint::new(1, 1)));
		assert_eq!(chunk.last_access(), Duration::from_millis(50));
	}

	#[test]
	fn evict_idle_chunks() {
		let (map, clock) = map(&["....", "...."], 2);
		map.is_walkable(GridPoint::new(0, 0));
		map.is_walkable(GridPoint::new(2, 0));

		clock.advance(Duration::from_secs(5));
		map.is_walkable(GridPoint::new(3, 1));

		assert_eq!(map.evict_idle(Duration::from_secs(1)), 1);
		assert!(!map.is_loaded(0, 0));
		assert!(map.is_loaded(1, 0));
	}

	#[test]
	fn tiles_changed_reloads_chunk() {
		let (mut map, _) = map(&["....", "...."], 2);
		assert!(map.is_walkable(GridPoint::new(3, 0)));
		assert!(map.is_walkable(GridPoint::new(0, 0)));

		map.source_mut().set_walkable(GridPoint::new(0, 0), false);
		assert_eq!(map.loaded_chunks(), 0);
		assert!(!map.is_walkable(GridPoint::new(0, 0)));
		assert!(map.is_walkable(GridPoint::new(3, 0)));
		assert_eq!(map.loaded_chunks(), 2);

		let stale = map.get_chunk(1, 0);
		assert!(stale.is_walkable(1, 0));
		map.tiles_changed(&[GridPoint::new(3, 0)]);
		assert!(!map.is_loaded(1, 0));
		assert!(map.is_loaded(0, 0));
	}

	#[test]
	fn chunk_of_extreme_points() {
		let (map, _) = map(&["."], 16);
		assert_eq!(
			map.chunk_of(GridPoint::new(i32::MIN, i32::MAX)),
			((-134_217_728, 134_217_727), (0, 15))
		);
	}

	#[test]
	#[should_panic(expected = "chunk_size must fit into an i32")]
	fn oversized_chunks() {
		ChunkedMap::with_chunk_size(
			Grid::new(1, 1),
			i32::MAX as usize + 1,
			Arc::new(ManualClock::new()),
		);
	}

	#[test]
	fn preload() {
		let (map, _) = map(&["....", "....", "....", "...."], 2);
		map.preload(&[(0, 0), (1, 1), (0, 0)]);
		assert_eq!(map.loaded_chunks(), 2);
	}

	#[cfg(feature = "parallel")]
	#[test]
	fn preload_parallel() {
		let (map, _) = map(&["....", "....", "....", "...."], 2);
		map.is_walkable(GridPoint::new(0, 0));
		map.preload_parallel(&[(0, 0), (1, 0), (0, 1), (1, 1)]);
		assert_eq!(map.loaded_chunks(), 4);
		assert!(map.get_chunk(1, 1).is_walkable(1, 1));
	}
}
