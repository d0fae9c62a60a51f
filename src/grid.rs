//! The Grid side of the search: what is walkable and how large the Grid is.

use crate::GridPoint;

/// A Grid that can be searched for Paths.
///
/// Implementors only need to know their size and which Tiles can be walked on. The search never
/// asks for Tiles outside of `[0, width) × [0, height)`, but [`is_walkable`](GridMap::is_walkable)
/// must still return `false` for them if asked, instead of panicking.
///
/// The size of a Grid must not change while a [`Pathfinder`](crate::Pathfinder) uses it.
pub trait GridMap {
	/// The number of Tiles in x direction
	fn width(&self) -> usize;
	/// The number of Tiles in y direction
	fn height(&self) -> usize;
	/// Whether or not the Tile at `point` can be walked on. `false` outside of the Grid.
	fn is_walkable(&self, point: GridPoint) -> bool;

	/// Whether or not `point` lies on the Grid
	fn contains(&self, point: GridPoint) -> bool {
		in_bounds(point, (self.width(), self.height()))
	}
}

impl<G: GridMap + ?Sized> GridMap for &G {
	fn width(&self) -> usize {
		(**self).width()
	}
	fn height(&self) -> usize {
		(**self).height()
	}
	fn is_walkable(&self, point: GridPoint) -> bool {
		(**self).is_walkable(point)
	}
}

impl<G: GridMap + ?Sized> GridMap for Box<G> {
	fn width(&self) -> usize {
		(**self).width()
	}
	fn height(&self) -> usize {
		(**self).height()
	}
	fn is_walkable(&self, point: GridPoint) -> bool {
		(**self).is_walkable(point)
	}
}

/// The raw Tile data behind a [`ChunkedMap`](crate::ChunkedMap).
///
/// Unlike [`GridMap`], these accessors are only ever called for Points on the Grid.
pub trait TileSource {
	/// The number of Tiles in x direction
	fn width(&self) -> usize;
	/// The number of Tiles in y direction
	fn height(&self) -> usize;
	/// The Tile type at `point`
	fn tile_id(&self, point: GridPoint) -> u32;
	/// Whether or not the Tile at `point` can be walked on
	fn is_walkable(&self, point: GridPoint) -> bool;
}

pub(crate) fn in_bounds(point: GridPoint, (width, height): (usize, usize)) -> bool {
	point.x >= 0 && point.y >= 0 && (point.x as usize) < width && (point.y as usize) < height
}

/// A dense Grid storing a Tile type and a walkable flag for every Tile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
	width: usize,
	height: usize,
	tiles: Vec<u32>,
	walkable: Vec<bool>,
}

impl Grid {
	/// Creates a new Grid where every Tile is walkable and of type `0`
	pub fn new(width: usize, height: usize) -> Grid {
		Grid {
			width,
			height,
			tiles: vec![0; width * height],
			walkable: vec![true; width * height],
		}
	}

	/// Creates a Grid from rows of text.
	///
	/// `#` is a wall, `.` is walkable ground of type `0` and a digit is walkable ground of that
	/// type. Any other character is treated as a wall of type `0`.
	/// Rows shorter than the first one are padded with walls.
	///
	/// ```
	/// # use tile_pathfinding::{Grid, GridMap, TileSource, GridPoint};
	/// let grid = Grid::from_rows(&[
	/// 	"..#",
	/// 	".3.",
	/// ]);
	/// assert_eq!((GridMap::width(&grid), GridMap::height(&grid)), (3, 2));
	/// assert!(!GridMap::is_walkable(&grid, GridPoint::new(2, 0)));
	/// assert_eq!(grid.tile_id(GridPoint::new(1, 1)), 3);
	/// ```
	pub fn from_rows(rows: &[&str]) -> Grid {
		let width = rows.first().map_or(0, |row| row.chars().count());
		let height = rows.len();
		let mut grid = Grid {
			width,
			height,
			tiles: vec![0; width * height],
			walkable: vec![false; width * height],
		};
		for (y, row) in rows.iter().enumerate() {
			for (x, c) in row.chars().take(width).enumerate() {
				let index = y * width + x;
				match c {
					'.' => grid.walkable[index] = true,
					'0'..='9' => {
						grid.walkable[index] = true;
						grid.tiles[index] = c.to_digit(10).unwrap_or(0);
					}
					_ => {}
				}
			}
		}
		grid
	}

	/// Changes whether or not a Tile can be walked on. Points outside the Grid are ignored.
	pub fn set_walkable(&mut self, point: GridPoint, walkable: bool) {
		if let Some(index) = self.index(point) {
			self.walkable[index] = walkable;
		}
	}

	/// Changes the type of a Tile. Points outside the Grid are ignored.
	pub fn set_tile(&mut self, point: GridPoint, tile_id: u32) {
		if let Some(index) = self.index(point) {
			self.tiles[index] = tile_id;
		}
	}

	fn index(&self, point: GridPoint) -> Option<usize> {
		if in_bounds(point, (self.width, self.height)) {
			Some(point.y as usize * self.width + point.x as usize)
		} else {
			None
		}
	}
}

impl GridMap for Grid {
	fn width(&self) -> usize {
		self.width
	}
	fn height(&self) -> usize {
		self.height
	}
	fn is_walkable(&self, point: GridPoint) -> bool {
		self.index(point).map_or(false, |i| self.walkable[i])
	}
}

impl TileSource for Grid {
	fn width(&self) -> usize {
		self.width
	}
	fn height(&self) -> usize {
		self.height
	}
	fn tile_id(&self, point: GridPoint) -> u32 {
		self.index(point).map_or(0, |i| self.tiles[i])
	}
	fn is_walkable(&self, point: GridPoint) -> bool {
		GridMap::is_walkable(self, point)
	}
}

/// A [`GridMap`] made from a size and a walkability function. See [`grid_fn`].
#[derive(Clone, Copy)]
pub struct GridFn<F> {
	width: usize,
	height: usize,
	walkable: F,
}

/// Turns a function into a [`GridMap`] of the given size.
///
/// The function is only called for Points on the Grid, everything else is not walkable.
///
/// ```
/// # use tile_pathfinding::{grid_fn, GridMap, GridPoint};
/// let walls = [[false, true], [false, false]];
/// let grid = grid_fn(2, 2, |p: GridPoint| !walls[p.y as usize][p.x as usize]);
///
/// assert!(grid.is_walkable(GridPoint::new(0, 0)));
/// assert!(!grid.is_walkable(GridPoint::new(1, 0)));
/// assert!(!grid.is_walkable(GridPoint::new(-1, 0)));
/// ```
pub fn grid_fn<F: Fn(GridPoint) -> bool>(width: usize, height: usize, walkable: F) -> GridFn<F> {
	GridFn {
		width,
		height,
		walkable,
	}
}

impl<F: Fn(GridPoint) -> bool> GridMap for GridFn<F> {
	fn width(&self) -> usize {
		self.width
	}
	fn height(&self) -> usize {
		self.height
	}
	fn is_walkable(&self, point: GridPoint) -> bool {
		in_bounds(point, (self.width, self.height)) && (self.walkable)(point)
	}
}

impl<F> std::fmt::Debug for GridFn<F> {
	fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
		fmt.debug_struct("GridFn")
			.field("width", &self.width)
			.field("height", &self.height)
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn out_of_bounds_is_solid() {
		let grid = Grid::new(3, 3);
		for point in [(-1, 0), (0, -1), (3, 0), (0, 3), (i32::MIN, i32::MAX)] {
			assert!(!GridMap::is_walkable(&grid, point.into()), "{:?}", point);
		}
		assert!(GridMap::is_walkable(&grid, (2, 2).into()));
	}

	#[test]
	fn from_rows_pads_short_rows() {
		let grid = Grid::from_rows(&["...", "."]);
		assert!(GridMap::is_walkable(&grid, (0, 1).into()));
		assert!(!GridMap::is_walkable(&grid, (1, 1).into()));
		assert!(!GridMap::is_walkable(&grid, (2, 1).into()));
	}

	#[test]
	fn set_walkable_and_tile() {
		let mut grid = Grid::new(2, 2);
		grid.set_walkable((1, 0).into(), false);
		grid.set_tile((0, 1).into(), 7);
		grid.set_tile((5, 5).into(), 7);

		assert!(!GridMap::is_walkable(&grid, (1, 0).into()));
		assert_eq!(grid.tile_id((0, 1).into()), 7);
		assert_eq!(grid.tile_id((5, 5).into()), 0);
	}

	#[test]
	fn references_are_grids() {
		fn size(map: impl GridMap) -> (usize, usize) {
			(map.width(), map.height())
		}
		let grid = Grid::new(4, 2);
		assert_eq!(size(&grid), (4, 2));
		assert_eq!(size(Box::new(grid)), (4, 2));
	}
}
