use vtpyramid_geometry::GeoFeature;

/// The drawn content of one tile. Coordinates are pixels, `[0, 0]` is the top left corner.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
	pub tile_size: u32,
	pub layers: Vec<SceneLayer>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneLayer {
	pub name: String,
	pub features: Vec<GeoFeature>,
}

impl Scene {
	pub fn new(tile_size: u32) -> Scene {
		Scene {
			tile_size,
			layers: Vec::new(),
		}
	}

	pub fn feature_count(&self) -> usize {
		self.layers.iter().map(|layer| layer.features.len()).sum()
	}
}

impl SceneLayer {
	pub fn new(name: &str) -> SceneLayer {
		SceneLayer {
			name: name.to_string(),
			features: Vec::new(),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.features.is_empty()
	}
}
