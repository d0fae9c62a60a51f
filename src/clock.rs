use std::fmt::Debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A source of time for the [`PathCache`](crate::PathCache) and the
/// [`ChunkedMap`](crate::ChunkedMap).
///
/// `now` returns the time since an arbitrary, fixed epoch. Only differences between two calls
/// are ever used, so the epoch does not matter as long as it does not change.
pub trait Clock: Debug + Send + Sync {
	/// The current time since the epoch of this Clock
	fn now(&self) -> Duration;
}

/// A Clock that can be shared between the cache and the Chunks of a Map
pub type SharedClock = Arc<dyn Clock>;

/// The monotonic system clock. The epoch is the moment the Clock was created.
#[derive(Clone, Copy, Debug)]
pub struct SystemClock {
	epoch: Instant,
}

impl SystemClock {
	/// Creates a new SystemClock starting at zero
	pub fn new() -> SystemClock {
		SystemClock {
			epoch: Instant::now(),
		}
	}

	/// Creates a new SystemClock behind an [`Arc`]
	pub fn shared() -> SharedClock {
		Arc::new(SystemClock::new())
	}
}

impl Default for SystemClock {
	fn default() -> SystemClock {
		SystemClock::new()
	}
}

impl Clock for SystemClock {
	fn now(&self) -> Duration {
		self.epoch.elapsed()
	}
}

/// A Clock that only moves when told to.
///
/// Clones share the same time, so a clone can be handed to a [`Pathfinder`](crate::Pathfinder)
/// while the original is used to advance it.
///
/// ```
/// # use tile_pathfinding::{Clock, ManualClock};
/// # use std::time::Duration;
/// let clock = ManualClock::new();
/// let handle = clock.clone();
///
/// clock.advance(Duration::from_millis(1500));
/// assert_eq!(handle.now(), Duration::from_millis(1500));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
	nanos: Arc<AtomicU64>,
}

impl ManualClock {
	/// Creates a new ManualClock at time zero
	pub fn new() -> ManualClock {
		ManualClock::default()
	}

	/// Moves the Clock forward
	pub fn advance(&self, by: Duration) {
		self.nanos.fetch_add(to_nanos(by), Ordering::SeqCst);
	}

	/// Sets the Clock to an absolute time
	pub fn set(&self, to: Duration) {
		self.nanos.store(to_nanos(to), Ordering::SeqCst);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Duration {
		Duration::from_nanos(self.nanos.load(Ordering::SeqCst))
	}
}

pub(crate) fn to_nanos(duration: Duration) -> u64 {
	u64::try_from(duration.as_nanos()).unwrap_or(u64::MAX)
}
