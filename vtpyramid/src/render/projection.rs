use super::TileProjection;
use anyhow::{Result, ensure};
use vtpyramid_core::{MercatorBBox, TileCoord, WORLD_SIZE};

/// The XYZ tiling of EPSG:3857: tile `(0, 0)` is the north-western corner, y grows southwards.
#[derive(Clone, Copy, Debug, Default)]
pub struct SphericalMercator;

impl TileProjection for SphericalMercator {
	fn tile_bbox(&self, coord: &TileCoord, tile_size: u32) -> Result<MercatorBBox> {
		ensure!(tile_size > 0, "tile size must be greater than 0");
		let resolution = WORLD_SIZE / (1u64 << coord.level) as f64;
		let x_min = -WORLD_SIZE / 2.0 + f64::from(coord.x) * resolution;
		let y_max = WORLD_SIZE / 2.0 - f64::from(coord.y) * resolution;
		MercatorBBox::new(x_min, y_max - resolution, x_min + resolution, y_max)
	}
}
