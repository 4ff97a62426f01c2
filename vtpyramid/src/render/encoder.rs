use super::{Scene, SceneEncoder};
use anyhow::{Context, Result, ensure};
use log::trace;
use vtpyramid_core::Blob;
use vtpyramid_geometry::{
	GeoFeature,
	vector_tile::{VectorTile, VectorTileLayer},
};

/// Encodes scenes as Mapbox Vector Tiles (version 2).
///
/// Pixel coordinates are multiplied by `multiplier` before they are rounded to the integer
/// grid, so a 256 pixel tile with the default multiplier of 16 has an extent of 4096.
#[derive(Clone, Copy, Debug)]
pub struct VectorTileEncoder {
	multiplier: u32,
}

pub const DEFAULT_PATH_MULTIPLIER: u32 = 16;
pub const VECTOR_TILE_VERSION: u32 = 2;

impl VectorTileEncoder {
	pub fn new(multiplier: u32) -> Result<VectorTileEncoder> {
		ensure!(multiplier > 0, "path multiplier must be greater than 0");
		Ok(VectorTileEncoder { multiplier })
	}

	pub fn multiplier(&self) -> u32 {
		self.multiplier
	}

	pub fn extent(&self, tile_size: u32) -> Result<u32> {
		tile_size
			.checked_mul(self.multiplier)
			.with_context(|| format!("extent of tile size {tile_size} times {} overflows", self.multiplier))
	}
}

impl Default for VectorTileEncoder {
	fn default() -> Self {
		VectorTileEncoder {
			multiplier: DEFAULT_PATH_MULTIPLIER,
		}
	}
}

impl SceneEncoder for VectorTileEncoder {
	fn encode(&self, scene: &Scene) -> Result<Blob> {
		let extent = self.extent(scene.tile_size)?;
		let factor = f64::from(self.multiplier);

		let mut layers = Vec::new();
		for layer in &scene.layers {
			if layer.is_empty() {
				trace!("skipping empty layer '{}'", layer.name);
				continue;
			}
			let features: Vec<GeoFeature> = layer
				.features
				.iter()
				.map(|feature| GeoFeature {
					id: feature.id,
					geometry: feature.geometry.clone().map_coords(|[x, y]| [x * factor, y * factor]),
					properties: feature.properties.clone(),
				})
				.collect();
			let layer = VectorTileLayer::from_features(layer.name.clone(), &features, extent, VECTOR_TILE_VERSION)?;
			if layer.features.is_empty() {
				trace!("skipping layer '{}', all features collapsed", layer.name);
				continue;
			}
			layers.push(layer);
		}

		VectorTile::new(layers).to_blob().context("Failed to encode vector tile")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::render::SceneLayer;
	use pretty_assertions::assert_eq;
	use vtpyramid_geometry::Geometry;

	fn scene() -> Scene {
		let mut city = GeoFeature::new(Geometry::MultiPoint(vec![[128.0, 64.5]]));
		city.set_id(7);
		city.set_property("name", "Berlin");
		let road = GeoFeature::new(Geometry::MultiLineString(vec![vec![[0.0, 0.0], [256.0, 256.0]]]));
		Scene {
			tile_size: 256,
			layers: vec![
				SceneLayer {
					name: "cities".to_string(),
					features: vec![city],
				},
				SceneLayer::new("water"),
				SceneLayer {
					name: "roads".to_string(),
					features: vec![road],
				},
			],
		}
	}

	#[test]
	fn encodes_scaled_layers() -> Result<()> {
		let blob = VectorTileEncoder::default().encode(&scene())?;
		let tile = VectorTile::from_blob(&blob)?;

		let names: Vec<&str> = tile.layers.iter().map(|l| l.name.as_str()).collect();
		assert_eq!(names, vec!["cities", "roads"]);

		let cities = tile.find_layer("cities").unwrap();
		assert_eq!(cities.extent, 4096);
		assert_eq!(cities.version, 2);
		let features = cities.to_features()?;
		assert_eq!(features[0].id, Some(7));
		assert_eq!(features[0].geometry, Geometry::MultiPoint(vec![[2048.0, 1032.0]]));
		assert_eq!(features[0].properties.get("name").unwrap().to_string(), "Berlin");

		let roads = tile.find_layer("roads").unwrap().to_features()?;
		assert_eq!(
			roads[0].geometry,
			Geometry::MultiLineString(vec![vec![[0.0, 0.0], [4096.0, 4096.0]]])
		);
		Ok(())
	}

	#[test]
	fn extent_follows_tile_size_and_multiplier() -> Result<()> {
		assert_eq!(VectorTileEncoder::default().extent(512)?, 8192);
		assert_eq!(VectorTileEncoder::new(1)?.extent(256)?, 256);
		assert!(VectorTileEncoder::new(0).is_err());
		assert!(VectorTileEncoder::default().extent(u32::MAX).is_err());
		Ok(())
	}

	#[test]
	fn empty_scene_is_an_empty_tile() -> Result<()> {
		let blob = VectorTileEncoder::default().encode(&Scene::new(256))?;
		assert!(blob.is_empty());
		Ok(())
	}

	#[test]
	fn collapsed_features_are_dropped() -> Result<()> {
		let tiny = GeoFeature::new(Geometry::MultiLineString(vec![vec![[1.0, 1.0], [1.01, 1.01]]]));
		let scene = Scene {
			tile_size: 256,
			layers: vec![SceneLayer {
				name: "dust".to_string(),
				features: vec![tiny],
			}],
		};
		let tile = VectorTile::from_blob(&VectorTileEncoder::default().encode(&scene)?)?;
		assert!(tile.layers.is_empty());
		Ok(())
	}
}
