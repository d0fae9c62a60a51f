use crate::{GridPoint, Path, SharedClock};

use std::collections::VecDeque;
use std::time::Duration;

type Key = (GridPoint, GridPoint);

#[derive(Clone, Debug)]
struct Entry {
	path: Path,
	inserted_at: Duration,
	generation: u64,
}

/// Counters describing how a [`PathCache`] has been used so far
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
	/// Lookups that returned a Path
	pub hits: u64,
	/// Lookups that found nothing, including expired entries
	pub misses: u64,
	/// Entries removed because they outlived the time-to-live
	pub expired: u64,
	/// Entries removed to make room for new ones
	pub evicted: u64,
}

/// Remembers recently found Paths by their start and goal.
///
/// Every entry expires a fixed time after it was inserted, whether or not it was read since.
/// Expired entries are dropped when they are looked up, or all at once by
/// [`sweep`](PathCache::sweep). When the cache is full, the entry that was inserted first is
/// evicted to make room.
///
/// The cache knows nothing about the Grid: it has to be [`clear`](PathCache::clear)ed whenever
/// the Grid changes.
///
/// ```
/// # use tile_pathfinding::{GridPoint, ManualClock, Path, PathCache};
/// # use std::{sync::Arc, time::Duration};
/// let clock = ManualClock::new();
/// let mut cache = PathCache::new(Duration::from_secs(5), 100, Arc::new(clock.clone()));
///
/// let (start, goal) = (GridPoint::new(0, 0), GridPoint::new(3, 3));
/// cache.put(start, goal, Path::from_waypoints(vec![start, goal]));
/// assert!(cache.get(start, goal).is_some());
///
/// clock.advance(Duration::from_secs(5));
/// assert!(cache.get(start, goal).is_none());
/// ```
#[derive(Debug)]
pub struct PathCache {
	entries: hashbrown::HashMap<Key, Entry>,
	insertion_order: VecDeque<(Key, u64)>,
	next_generation: u64,
	ttl: Duration,
	capacity: usize,
	clock: SharedClock,
	stats: CacheStats,
}

impl PathCache {
	/// Creates a new PathCache
	///
	/// ## Arguments
	/// - `ttl` - how long an entry lives after being inserted
	/// - `capacity` - the maximum number of entries. `0` means nothing is ever stored.
	/// - `clock` - the source of time for expiring entries
	pub fn new(ttl: Duration, capacity: usize, clock: SharedClock) -> PathCache {
		PathCache {
			entries: hashbrown::HashMap::with_capacity(capacity),
			insertion_order: VecDeque::with_capacity(capacity),
			next_generation: 0,
			ttl,
			capacity,
			clock,
			stats: CacheStats::default(),
		}
	}

	/// Looks up the Path from `start` to `goal`.
	///
	/// Only an exact match of both Points counts. The returned Path shares its Waypoints with
	/// the cached one, but can not be used to modify it.
	pub fn get(&mut self, start: GridPoint, goal: GridPoint) -> Option<Path> {
		let now = self.clock.now();
		let key = (start, goal);
		let expired = match self.entries.get(&key) {
			None => {
				self.stats.misses += 1;
				return None;
			}
			Some(entry) => self.is_expired(entry, now),
		};
		if expired {
			self.entries.remove(&key);
			self.stats.expired += 1;
			self.stats.misses += 1;
			return None;
		}
		self.stats.hits += 1;
		self.entries.get(&key).map(|entry| entry.path.clone())
	}

	/// Stores the Path from `start` to `goal`, replacing any previous one.
	///
	/// If the cache is full, the oldest entry is evicted first.
	pub fn put(&mut self, start: GridPoint, goal: GridPoint, path: Path) {
		if self.capacity == 0 {
			return;
		}
		let key = (start, goal);
		let now = self.clock.now();
		if !self.entries.contains_key(&key) {
			while self.entries.len() >= self.capacity {
				if !self.evict_oldest(now) {
					break;
				}
			}
		}

		let generation = self.next_generation;
		self.next_generation += 1;
		self.entries.insert(
			key,
			Entry {
				path,
				inserted_at: now,
				generation,
			},
		);
		self.insertion_order.push_back((key, generation));
		self.compact_order();
	}

	/// Removes every expired entry. Returns the number of entries removed.
	pub fn sweep(&mut self) -> usize {
		let now = self.clock.now();
		let ttl = self.ttl;
		let before = self.entries.len();
		self.entries
			.retain(|_, entry| now.saturating_sub(entry.inserted_at) < ttl);
		let removed = before - self.entries.len();
		self.stats.expired += removed as u64;
		self.compact_order();
		removed
	}

	/// Removes all entries. Required whenever the Grid changes.
	pub fn clear(&mut self) {
		self.entries.clear();
		self.insertion_order.clear();
	}

	/// The number of stored entries, including expired ones that were not yet removed
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether or not there are no stored entries
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// How long an entry lives after being inserted
	pub fn ttl(&self) -> Duration {
		self.ttl
	}

	/// The maximum number of entries
	pub fn capacity(&self) -> usize {
		self.capacity
	}

	/// Usage counters since the cache was created
	pub fn stats(&self) -> CacheStats {
		self.stats
	}

	fn is_expired(&self, entry: &Entry, now: Duration) -> bool {
		now.saturating_sub(entry.inserted_at) >= self.ttl
	}

	/// Removes the entry that was inserted first. Returns `false` if there was none.
	fn evict_oldest(&mut self, now: Duration) -> bool {
		while let Some((key, generation)) = self.insertion_order.pop_front() {
			let current = match self.entries.get(&key) {
				Some(entry) => entry.generation == generation,
				None => false,
			};
			if !current {
				// replaced or removed since
				continue;
			}
			if let Some(entry) = self.entries.remove(&key) {
				if self.is_expired(&entry, now) {
					self.stats.expired += 1;
				} else {
					self.stats.evicted += 1;
					debug!("path cache full, evicting {} -> {}", key.0, key.1);
				}
			}
			return true;
		}
		false
	}

	/// Drops stale records from the insertion order once they outnumber the live entries
	fn compact_order(&mut self) {
		if self.insertion_order.len() <= 2 * self.entries.len() + 16 {
			return;
		}
		let entries = &self.entries;
		self.insertion_order.retain(|(key, generation)| {
			entries
				.get(key)
				.map_or(false, |entry| entry.generation == *generation)
		});
	}
}
