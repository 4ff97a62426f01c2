use crate::render::DEFAULT_TILE_SIZE;
use anyhow::{Context, Result, ensure};
use std::path::PathBuf;
use vtpyramid_core::{MAX_LEVEL, TileCompression, TileCoord};

/// Everything one pyramid run needs. Built and validated once, never changed afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct PyramidParameters {
	pub max_level: u8,
	/// Root tile. Its level is the lowest zoom level rendered.
	pub root: TileCoord,
	pub stylesheet: PathBuf,
	pub compression: TileCompression,
	pub output_dir: PathBuf,
	/// Tiles rendered in parallel. `1` renders on a single thread.
	pub concurrency: usize,
	pub tile_size: u32,
}

impl PyramidParameters {
	/// # Errors
	/// Fails if the zoom range is reversed or above 31, or if `x`/`y` do not address a tile at `min_level`.
	pub fn new(min_level: u8, max_level: u8, x: u32, y: u32, stylesheet: PathBuf) -> Result<PyramidParameters> {
		ensure!(
			min_level <= max_level,
			"min zoom ({min_level}) must be <= max zoom ({max_level})"
		);
		ensure!(max_level <= MAX_LEVEL, "max zoom ({max_level}) must be <= {MAX_LEVEL}");
		let root = TileCoord::new(min_level, x, y).with_context(|| format!("Invalid root tile {x}/{y}"))?;
		Ok(PyramidParameters {
			max_level,
			root,
			stylesheet,
			compression: TileCompression::Uncompressed,
			output_dir: PathBuf::from("."),
			concurrency: 1,
			tile_size: DEFAULT_TILE_SIZE,
		})
	}

	#[must_use]
	pub fn with_compression(mut self, compression: TileCompression) -> Self {
		self.compression = compression;
		self
	}

	#[must_use]
	pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
		self.output_dir = output_dir;
		self
	}

	pub fn with_concurrency(mut self, concurrency: usize) -> Result<Self> {
		ensure!(concurrency > 0, "concurrency must be at least 1");
		self.concurrency = concurrency;
		Ok(self)
	}

	pub fn with_tile_size(mut self, tile_size: u32) -> Result<Self> {
		ensure!(tile_size > 0, "tile size must be greater than 0");
		self.tile_size = tile_size;
		Ok(self)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, 1, 0, 0, true)]
	#[case(3, 3, 7, 7, true)]
	#[case(2, 1, 0, 0, false)]
	#[case(0, 32, 0, 0, false)]
	#[case(2, 5, 4, 0, false)]
	#[case(2, 5, 0, 4, false)]
	#[case(31, 31, 2147483647, 2147483647, true)]
	fn validation(#[case] min: u8, #[case] max: u8, #[case] x: u32, #[case] y: u32, #[case] ok: bool) {
		assert_eq!(PyramidParameters::new(min, max, x, y, PathBuf::from("s.yml")).is_ok(), ok);
	}

	#[test]
	fn defaults_and_builders() -> Result<()> {
		let parameters = PyramidParameters::new(1, 4, 1, 0, PathBuf::from("s.yml"))?;
		assert_eq!(parameters.root, TileCoord::new(1, 1, 0)?);
		assert_eq!(parameters.compression, TileCompression::Uncompressed);
		assert_eq!(parameters.output_dir, PathBuf::from("."));
		assert_eq!((parameters.concurrency, parameters.tile_size), (1, 256));

		let parameters = parameters
			.with_compression(TileCompression::Brotli)
			.with_output_dir(PathBuf::from("out"))
			.with_concurrency(8)?
			.with_tile_size(512)?;
		assert_eq!(parameters.compression, TileCompression::Brotli);
		assert_eq!(parameters.output_dir, PathBuf::from("out"));
		assert_eq!((parameters.concurrency, parameters.tile_size), (8, 512));
		Ok(())
	}

	#[test]
	fn rejects_zero_values() -> Result<()> {
		let parameters = PyramidParameters::new(0, 0, 0, 0, PathBuf::from("s.yml"))?;
		assert!(parameters.clone().with_concurrency(0).is_err());
		assert!(parameters.with_tile_size(0).is_err());
		Ok(())
	}

	#[test]
	fn reversed_zoom_message() {
		let error = PyramidParameters::new(5, 2, 0, 0, PathBuf::from("s.yml")).unwrap_err();
		assert_eq!(error.to_string(), "min zoom (5) must be <= max zoom (2)");
	}
}
