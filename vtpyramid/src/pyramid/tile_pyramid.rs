use anyhow::{Result, ensure};
use std::fmt::Debug;
use vtpyramid_core::{MAX_LEVEL, TileCoord};

/// All tiles from `root` down to `max_level` that cover the area of `root`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TilePyramid {
	pub root: TileCoord,
	pub max_level: u8,
}

impl TilePyramid {
	/// # Errors
	/// Fails if `max_level` is above 31 or below the level of `root`.
	pub fn new(root: TileCoord, max_level: u8) -> Result<TilePyramid> {
		ensure!(max_level <= MAX_LEVEL, "max zoom ({max_level}) must be <= {MAX_LEVEL}");
		ensure!(
			root.level <= max_level,
			"min zoom ({}) must be <= max zoom ({max_level})",
			root.level
		);
		Ok(TilePyramid { root, max_level })
	}

	pub fn min_level(&self) -> u8 {
		self.root.level
	}

	/// Number of levels below the root.
	pub fn depth(&self) -> u8 {
		self.max_level - self.root.level
	}

	/// `1 + 4 + 16 + ... + 4^depth`.
	pub fn count_tiles(&self) -> u64 {
		let depth = u32::from(self.depth());
		let count = (4u128.pow(depth + 1) - 1) / 3;
		u64::try_from(count).unwrap_or(u64::MAX)
	}

	/// Whether `coord` is one of the tiles of this pyramid.
	pub fn contains(&self, coord: &TileCoord) -> bool {
		if coord.level < self.root.level || coord.level > self.max_level {
			return false;
		}
		let shift = coord.level - self.root.level;
		(coord.x >> shift) == self.root.x && (coord.y >> shift) == self.root.y
	}
}

impl Debug for TilePyramid {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "TilePyramid({:?} .. {})", self.root, self.max_level)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	fn coord(level: u8, x: u32, y: u32) -> TileCoord {
		TileCoord::new(level, x, y).unwrap()
	}

	#[rstest]
	#[case(0, 0, 1)]
	#[case(0, 1, 5)]
	#[case(3, 5, 21)]
	#[case(0, 10, 1398101)]
	#[case(0, 31, 6148914691236517205)]
	fn count_tiles(#[case] min: u8, #[case] max: u8, #[case] expected: u64) {
		let pyramid = TilePyramid::new(coord(min, 0, 0), max).unwrap();
		assert_eq!(pyramid.count_tiles(), expected);
	}

	#[test]
	fn validates_levels() {
		assert!(TilePyramid::new(coord(3, 1, 1), 2).is_err());
		assert!(TilePyramid::new(coord(3, 1, 1), 32).is_err());
		assert_eq!(TilePyramid::new(coord(3, 1, 1), 3).unwrap().min_level(), 3);
	}

	#[test]
	fn contains() {
		let pyramid = TilePyramid::new(coord(2, 1, 2), 5).unwrap();
		assert!(pyramid.contains(&coord(2, 1, 2)));
		assert!(pyramid.contains(&coord(3, 3, 5)));
		assert!(pyramid.contains(&coord(5, 15, 23)));
		assert!(!pyramid.contains(&coord(3, 4, 5)));
		assert!(!pyramid.contains(&coord(1, 0, 1)));
		assert!(!pyramid.contains(&coord(6, 16, 32)));
		assert_eq!(format!("{pyramid:?}"), "TilePyramid(TileCoord(2, [1, 2]) .. 5)");
	}
}
