//! The production [`SceneRenderer`]: GeoJSON layers filtered, clipped and projected per tile.

use super::{LayerStyle, Scene, SceneLayer, SceneRenderer, Stylesheet, clip_geometry};
use anyhow::{Context, Result, ensure};
use log::{debug, trace};
use std::path::Path;
use vtpyramid_core::{MercatorBBox, lon_lat_to_mercator};
use vtpyramid_geometry::{Coordinates1, GeoFeature, Geometry, geojson::read_geojson, math::area_ring};

struct SourceFeature {
	bbox: MercatorBBox,
	feature: GeoFeature,
}

struct StyledLayer {
	style: LayerStyle,
	features: Vec<SourceFeature>,
}

/// Holds every layer's features in Mercator meters. Immutable once loaded.
pub struct StyleRenderer {
	name: String,
	buffer: f64,
	layers: Vec<StyledLayer>,
}

impl StyleRenderer {
	/// Loads the stylesheet and all of its GeoJSON sources.
	pub fn from_path(path: &Path) -> Result<StyleRenderer> {
		let stylesheet = Stylesheet::from_path(path)?;
		StyleRenderer::from_stylesheet(&path.to_string_lossy(), stylesheet)
	}

	pub fn from_stylesheet(name: &str, stylesheet: Stylesheet) -> Result<StyleRenderer> {
		let layers = stylesheet
			.layers
			.into_iter()
			.map(|style| {
				let features = read_geojson(&style.source)
					.with_context(|| format!("Failed to load source of layer '{}'", style.name))?;
				debug!("layer '{}': {} features from {:?}", style.name, features.len(), style.source);
				Ok(StyledLayer::new(style, features))
			})
			.collect::<Result<Vec<_>>>()?;

		Ok(StyleRenderer {
			name: name.to_string(),
			buffer: stylesheet.buffer,
			layers,
		})
	}

	pub fn layer_names(&self) -> Vec<&str> {
		self.layers.iter().map(|layer| layer.style.name.as_str()).collect()
	}
}

impl StyledLayer {
	fn new(style: LayerStyle, features: Vec<GeoFeature>) -> StyledLayer {
		let features = features
			.into_iter()
			.filter_map(|mut feature| {
				feature.geometry = feature.geometry.map_coords(lon_lat_to_mercator);
				if let Some(fields) = &style.fields {
					feature.properties.retain_keys(fields);
				}
				let [x_min, y_min, x_max, y_max] = feature.geometry.compute_bounds()?;
				Some(SourceFeature {
					bbox: MercatorBBox {
						x_min,
						y_min,
						x_max,
						y_max,
					},
					feature,
				})
			})
			.collect();
		StyledLayer { style, features }
	}

	fn render(&self, bbox: &MercatorBBox, clip_bbox: &MercatorBBox, tile_size: u32) -> SceneLayer {
		let mut layer = SceneLayer::new(&self.style.name);
		let scale_x = f64::from(tile_size) / bbox.width();
		let scale_y = f64::from(tile_size) / bbox.height();
		let to_pixel = |[x, y]: [f64; 2]| [(x - bbox.x_min) * scale_x, (bbox.y_max - y) * scale_y];

		for source in &self.features {
			if !clip_bbox.intersects(&source.bbox) {
				continue;
			}
			let geometry = if is_inside(&source.bbox, clip_bbox) {
				source.feature.geometry.clone().into_multi()
			} else {
				clip_geometry(&source.feature.geometry, clip_bbox)
			};
			if geometry.is_empty() {
				trace!("feature {:?} of layer '{}' clipped away", source.feature.id, self.style.name);
				continue;
			}
			layer.features.push(GeoFeature {
				id: source.feature.id,
				geometry: orient_rings(geometry.map_coords(to_pixel)),
				properties: source.feature.properties.clone(),
			});
		}
		layer
	}
}

fn is_inside(inner: &MercatorBBox, outer: &MercatorBBox) -> bool {
	outer.contains([inner.x_min, inner.y_min]) && outer.contains([inner.x_max, inner.y_max])
}

/// Exterior rings get a positive area in pixel space, holes a negative one.
fn orient_rings(geometry: Geometry) -> Geometry {
	fn orient(mut ring: Coordinates1, exterior: bool) -> Coordinates1 {
		if (area_ring(&ring) > 0.0) != exterior {
			ring.reverse();
		}
		ring
	}

	match geometry {
		Geometry::Polygon(polygon) => Geometry::Polygon(
			polygon
				.into_iter()
				.enumerate()
				.map(|(i, ring)| orient(ring, i == 0))
				.collect(),
		),
		Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
			polygons
				.into_iter()
				.map(|polygon| {
					polygon
						.into_iter()
						.enumerate()
						.map(|(i, ring)| orient(ring, i == 0))
						.collect()
				})
				.collect(),
		),
		other => other,
	}
}

impl SceneRenderer for StyleRenderer {
	fn stylesheet(&self) -> &str {
		&self.name
	}

	fn render(&self, bbox: &MercatorBBox, tile_size: u32) -> Result<Scene> {
		ensure!(tile_size > 0, "tile size must be greater than 0");
		ensure!(bbox.width() > 0.0 && bbox.height() > 0.0, "cannot render the empty area {bbox:?}");

		let level = bbox.level_estimate();
		let clip_bbox = bbox.buffered(self.buffer, tile_size);
		let mut scene = Scene::new(tile_size);
		for layer in &self.layers {
			if !layer.style.is_visible_at(level) {
				trace!("layer '{}' is not visible at zoom {level}", layer.style.name);
				continue;
			}
			scene.layers.push(layer.render(bbox, &clip_bbox, tile_size));
		}
		Ok(scene)
	}
}
