//! Three-dimensional tile coordinates in a Web Mercator tile pyramid
//!
//! This module provides the [`TileCoord`] type, the identity of a tile inside a quad-tree
//! pyramid. It includes methods for:
//! - Creating and validating tile coordinates
//! - Descending to the four children and ascending to the parent
//!
//! # Examples
//!
//! ```
//! use vtpyramid_core::TileCoord;
//!
//! let coord = TileCoord::new(5, 6, 7).unwrap();
//! assert_eq!(coord.level, 5);
//!
//! let children = coord.children().unwrap();
//! assert_eq!(children[0], TileCoord::new(6, 12, 14).unwrap());
//! assert_eq!(children[3], TileCoord::new(6, 13, 15).unwrap());
//! ```

use anyhow::{Result, ensure};
use std::{
	cmp::Ordering,
	fmt::{self, Debug},
};

/// Highest zoom level whose x/y indices still fit into `u32`.
pub const MAX_LEVEL: u8 = 31;

/// A 3D tile coordinate in a Web Mercator tile pyramid, with zoom level, x, and y indices.
#[derive(Eq, PartialEq, Clone, Hash, Copy)]
pub struct TileCoord {
	/// The zoom level of the tile.
	pub level: u8,
	/// The x index of the tile (column, growing eastwards).
	pub x: u32,
	/// The y index of the tile (row, growing southwards).
	pub y: u32,
}

impl TileCoord {
	/// Create a new `TileCoord` at the given zoom `level` and tile indices `x`, `y`.
	///
	/// # Errors
	/// Returns an error if `level` > 31 or if `x`/`y` are not below `2^level`.
	pub fn new(level: u8, x: u32, y: u32) -> Result<TileCoord> {
		ensure!(level <= MAX_LEVEL, "level ({level}) must be <= {MAX_LEVEL}");
		let max = 1u64 << level;
		ensure!(u64::from(x) < max, "x ({x}) out of bounds for level {level}");
		ensure!(u64::from(y) < max, "y ({y}) out of bounds for level {level}");
		Ok(TileCoord { level, x, y })
	}

	/// The four tiles at `level + 1` covering the same area, in the order
	/// `(2x, 2y)`, `(2x+1, 2y)`, `(2x, 2y+1)`, `(2x+1, 2y+1)`.
	///
	/// # Errors
	/// Returns an error if the tile is already at level 31.
	pub fn children(&self) -> Result<[TileCoord; 4]> {
		ensure!(self.level < MAX_LEVEL, "cannot descend below level {MAX_LEVEL}");
		let level = self.level + 1;
		let x = self.x * 2;
		let y = self.y * 2;
		Ok([
			TileCoord { level, x, y },
			TileCoord { level, x: x + 1, y },
			TileCoord { level, x, y: y + 1 },
			TileCoord {
				level,
				x: x + 1,
				y: y + 1,
			},
		])
	}

	/// Return a new coordinate at the parent zoom level (level - 1).
	///
	/// # Errors
	/// Returns an error if the current level is 0.
	pub fn parent(&self) -> Result<TileCoord> {
		ensure!(self.level > 0, "cannot decrease level below 0");
		TileCoord::new(self.level - 1, self.x / 2, self.y / 2)
	}
}

/// Custom `Debug` format as `TileCoord(z, [x, y])` for readability.
impl Debug for TileCoord {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_fmt(format_args!("TileCoord({}, [{}, {}])", &self.level, &self.x, &self.y))
	}
}

/// Lexicographic ordering: first by zoom `level`, then `y`, then `x`.
impl Ord for TileCoord {
	fn cmp(&self, other: &Self) -> Ordering {
		self
			.level
			.cmp(&other.level)
			.then(self.y.cmp(&other.y))
			.then(self.x.cmp(&other.x))
	}
}

impl PartialOrd for TileCoord {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cmp::Ordering::*;

	#[rstest]
	#[case(0, 0, 0, true)]
	#[case(0, 1, 0, false)]
	#[case(1, 1, 1, true)]
	#[case(1, 2, 0, false)]
	#[case(3, 7, 7, true)]
	#[case(3, 0, 8, false)]
	#[case(31, 2147483647, 0, true)]
	#[case(32, 0, 0, false)]
	fn new_validates_bounds(#[case] level: u8, #[case] x: u32, #[case] y: u32, #[case] ok: bool) {
		assert_eq!(TileCoord::new(level, x, y).is_ok(), ok);
	}

	#[test]
	fn children_are_the_four_quadrants() {
		let coord = TileCoord::new(3, 2, 5).unwrap();
		let children = coord.children().unwrap();
		let expected = [(4, 10), (5, 10), (4, 11), (5, 11)];
		for (child, (x, y)) in children.iter().zip(expected) {
			assert_eq!(child.level, 4);
			assert_eq!((child.x, child.y), (x, y));
			assert_eq!(child.parent().unwrap(), coord);
		}
	}

	#[test]
	fn children_of_level_31_fail() {
		let coord = TileCoord::new(31, 0, 0).unwrap();
		assert!(coord.children().is_err());
	}

	#[test]
	fn parent_of_root_fails() {
		assert!(TileCoord::new(0, 0, 0).unwrap().parent().is_err());
	}

	#[test]
	fn debug_format() {
		let coord = TileCoord::new(4, 7, 8).unwrap();
		assert_eq!(format!("{coord:?}"), "TileCoord(4, [7, 8])");
	}

	#[rstest]
	#[case(1, 1, 1, Less)]
	#[case(2, 1, 3, Greater)]
	#[case(2, 3, 1, Less)]
	#[case(2, 2, 2, Equal)]
	#[case(3, 0, 0, Greater)]
	fn ordering(#[case] level: u8, #[case] x: u32, #[case] y: u32, #[case] expected: Ordering) {
		let c1 = TileCoord::new(2, 2, 2).unwrap();
		let c2 = TileCoord::new(level, x, y).unwrap();
		assert_eq!(c2.cmp(&c1), expected);
	}
}
