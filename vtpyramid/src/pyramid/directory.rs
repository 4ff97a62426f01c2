//! Maps tiles to files in a `<root>/<z>/<x>/<y>.pbf` tree.
//!
//! Column directories are created ahead of time through [`TileDirectory::ensure_column`];
//! [`TileDirectory::write_tile`] only writes the file and expects its column to exist.

use anyhow::{Context, Result};
use log::debug;
use std::{
	fs,
	path::{Path, PathBuf},
};
use vtpyramid_core::{Blob, TileCoord};

/// The file extension of every tile, compressed or not.
pub const TILE_EXTENSION: &str = ".pbf";

#[derive(Clone, Debug)]
pub struct TileDirectory {
	base: PathBuf,
}

impl TileDirectory {
	pub fn new(base: &Path) -> TileDirectory {
		TileDirectory {
			base: base.to_path_buf(),
		}
	}

	/// `<base>/<level>/<x>`
	pub fn column_path(&self, level: u8, x: u32) -> PathBuf {
		self.base.join(level.to_string()).join(x.to_string())
	}

	/// `<base>/<level>/<x>/<y>.pbf`
	pub fn tile_path(&self, coord: &TileCoord) -> PathBuf {
		self
			.column_path(coord.level, coord.x)
			.join(format!("{}{TILE_EXTENSION}", coord.y))
	}

	/// Creates the column directory including missing parents. Existing directories are fine.
	pub fn ensure_column(&self, level: u8, x: u32) -> Result<()> {
		debug!("Making path {level}/{x}");
		let path = self.column_path(level, x);
		fs::create_dir_all(&path).with_context(|| format!("Failed to create directory {path:?}"))
	}

	/// Writes `blob` to the tile's file, replacing an existing file.
	pub fn write_tile(&self, coord: &TileCoord, blob: &Blob) -> Result<()> {
		let path = self.tile_path(coord);
		fs::write(&path, blob.as_slice()).with_context(|| format!("Failed to write tile {coord:?} to {path:?}"))
	}
}
