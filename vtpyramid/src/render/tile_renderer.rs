//! Renders, encodes, compresses and stores single tiles.
//!
//! ```no_run
//! use vtpyramid::{pyramid::TileDirectory, render::*};
//! use vtpyramid_core::{TileCompression, TileCoord};
//! use std::path::Path;
//!
//! let renderer = TileRenderer::new(
//! 	Box::new(SphericalMercator),
//! 	Box::new(StyleRenderer::from_path(Path::new("style.yml"))?),
//! 	Box::new(VectorTileEncoder::default()),
//! 	TileDirectory::new(Path::new("tiles")),
//! )
//! .with_compression(TileCompression::Gzip);
//!
//! let blob = renderer.render_tile(&TileCoord::new(3, 4, 2)?)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::{SceneEncoder, SceneRenderer, SphericalMercator, StyleRenderer, TileProjection, VectorTileEncoder};
use crate::{
	PyramidParameters,
	pyramid::{PyramidVisitor, TileDirectory},
};
use anyhow::{Context, Result, ensure};
use log::{info, trace};
use vtpyramid_core::{Blob, TileCompression, TileCoord, utils::compress};

pub const DEFAULT_TILE_SIZE: u32 = 256;

pub struct TileRenderer {
	projection: Box<dyn TileProjection>,
	renderer: Box<dyn SceneRenderer>,
	encoder: Box<dyn SceneEncoder>,
	directory: TileDirectory,
	compression: TileCompression,
	tile_size: u32,
}

impl TileRenderer {
	pub fn new(
		projection: Box<dyn TileProjection>,
		renderer: Box<dyn SceneRenderer>,
		encoder: Box<dyn SceneEncoder>,
		directory: TileDirectory,
	) -> TileRenderer {
		TileRenderer {
			projection,
			renderer,
			encoder,
			directory,
			compression: TileCompression::Uncompressed,
			tile_size: DEFAULT_TILE_SIZE,
		}
	}

	/// The production setup: spherical Mercator, the stylesheet's layers and vector tile encoding.
	pub fn from_parameters(parameters: &PyramidParameters) -> Result<TileRenderer> {
		let style = StyleRenderer::from_path(&parameters.stylesheet)?;
		Ok(TileRenderer::new(
			Box::new(SphericalMercator),
			Box::new(style),
			Box::new(VectorTileEncoder::default()),
			TileDirectory::new(&parameters.output_dir),
		)
		.with_compression(parameters.compression)
		.with_tile_size(parameters.tile_size))
	}

	#[must_use]
	pub fn with_compression(mut self, compression: TileCompression) -> TileRenderer {
		self.compression = compression;
		self
	}

	#[must_use]
	pub fn with_tile_size(mut self, tile_size: u32) -> TileRenderer {
		self.tile_size = tile_size;
		self
	}

	pub fn directory(&self) -> &TileDirectory {
		&self.directory
	}

	pub fn compression(&self) -> TileCompression {
		self.compression
	}

	/// The bytes that end up in the tile's file.
	pub fn render_tile(&self, coord: &TileCoord) -> Result<Blob> {
		ensure!(self.tile_size > 0, "tile size must be greater than 0");
		let bbox = self.projection.tile_bbox(coord, self.tile_size)?;
		let scene = self
			.renderer
			.render(&bbox, self.tile_size)
			.with_context(|| format!("Failed to render tile {coord:?}"))?;
		trace!("{coord:?}: {} features in {} layers", scene.feature_count(), scene.layers.len());
		let blob = self
			.encoder
			.encode(&scene)
			.with_context(|| format!("Failed to encode tile {coord:?}"))?;
		compress(blob, &self.compression)
	}

	/// Renders the tile and writes it. Its column directory must exist already.
	pub fn write_tile(&self, coord: &TileCoord) -> Result<()> {
		info!(
			"Creating {}tile for z = {} ; x = {} ; y = {} ; stylesheet: {}",
			if self.compression.is_compressed() { "compressed " } else { "" },
			coord.level,
			coord.x,
			coord.y,
			self.renderer.stylesheet()
		);
		let blob = self.render_tile(coord)?;
		self.directory.write_tile(coord, &blob)
	}
}

impl PyramidVisitor for TileRenderer {
	fn prepare_column(&self, level: u8, x: u32) -> Result<()> {
		self.directory.ensure_column(level, x)
	}

	fn visit_tile(&self, coord: &TileCoord) -> Result<()> {
		self.write_tile(coord)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::{Scene, SceneLayer};
	use anyhow::bail;
	use assert_fs::TempDir;
	use std::{fs, path::Path};
	use vtpyramid_core::{MercatorBBox, utils::decompress};
	use vtpyramid_geometry::{GeoFeature, Geometry, vector_tile::VectorTile};

	/// Draws one point in the tile center and refuses the level given in `fail_at_level`.
	struct CenterDot {
		fail_at_level: Option<u8>,
	}

	impl SceneRenderer for CenterDot {
		fn stylesheet(&self) -> &str {
			"dots.yml"
		}

		fn render(&self, bbox: &MercatorBBox, tile_size: u32) -> Result<Scene> {
			if Some(bbox.level_estimate()) == self.fail_at_level {
				bail!("no dots here");
			}
			let half = f64::from(tile_size) / 2.0;
			Ok(Scene {
				tile_size,
				layers: vec![SceneLayer {
					name: "dots".to_string(),
					features: vec![GeoFeature::new(Geometry::MultiPoint(vec![[half, half]]))],
				}],
			})
		}
	}

	fn tile_renderer(path: &Path, fail_at_level: Option<u8>) -> TileRenderer {
		TileRenderer::new(
			Box::new(SphericalMercator),
			Box::new(CenterDot { fail_at_level }),
			Box::new(VectorTileEncoder::default()),
			TileDirectory::new(path),
		)
	}

	#[test]
	fn renders_through_all_steps() -> Result<()> {
		let temp = TempDir::new()?;
		let blob = tile_renderer(temp.path(), None).render_tile(&TileCoord::new(2, 1, 3)?)?;
		let tile = VectorTile::from_blob(&blob)?;
		let features = tile.find_layer("dots").unwrap().to_features()?;
		assert_eq!(features[0].geometry, Geometry::MultiPoint(vec![[2048.0, 2048.0]]));
		Ok(())
	}

	#[test]
	fn tile_size_changes_the_extent() -> Result<()> {
		let temp = TempDir::new()?;
		let renderer = tile_renderer(temp.path(), None).with_tile_size(512);
		let tile = VectorTile::from_blob(&renderer.render_tile(&TileCoord::new(0, 0, 0)?)?)?;
		assert_eq!(tile.layers[0].extent, 8192);
		Ok(())
	}

	#[test]
	fn compressed_tiles_decompress_to_the_plain_tile() -> Result<()> {
		let temp = TempDir::new()?;
		let coord = TileCoord::new(4, 9, 5)?;
		let plain = tile_renderer(temp.path(), None).render_tile(&coord)?;
		for compression in [TileCompression::Gzip, TileCompression::Brotli] {
			let renderer = tile_renderer(temp.path(), None).with_compression(compression);
			assert_eq!(renderer.compression(), compression);
			let compressed = renderer.render_tile(&coord)?;
			assert_ne!(compressed, plain);
			assert_eq!(decompress(compressed, &compression)?, plain);
		}
		Ok(())
	}

	#[test]
	fn visitor_writes_into_prepared_columns() -> Result<()> {
		let temp = TempDir::new()?;
		let renderer = tile_renderer(temp.path(), None);
		let coord = TileCoord::new(1, 1, 0)?;
		assert!(renderer.visit_tile(&coord).is_err());

		renderer.prepare_column(1, 1)?;
		renderer.visit_tile(&coord)?;
		let written = Blob::from(fs::read(temp.path().join("1/1/0.pbf"))?);
		assert_eq!(written, renderer.render_tile(&coord)?);
		Ok(())
	}

	#[test]
	fn errors_name_the_tile() -> Result<()> {
		let temp = TempDir::new()?;
		let renderer = tile_renderer(temp.path(), Some(3));
		let error = renderer.render_tile(&TileCoord::new(3, 2, 1)?).unwrap_err();
		assert_eq!(error.to_string(), "Failed to render tile TileCoord(3, [2, 1])");
		assert_eq!(error.root_cause().to_string(), "no dots here");
		Ok(())
	}

	#[test]
	fn zero_tile_size_fails() -> Result<()> {
		let temp = TempDir::new()?;
		let renderer = tile_renderer(temp.path(), None).with_tile_size(0);
		assert!(renderer.render_tile(&TileCoord::new(0, 0, 0)?).is_err());
		Ok(())
	}
}
