use super::*;

/// One GeoJSON feature, either in source metres or in tile pixels after rendering.
#[derive(Clone, Debug, PartialEq)]
pub struct GeoFeature {
	/// Carried into the tile when the source feature has an integer id.
	pub id: Option<u64>,
	pub geometry: Geometry,
	pub properties: GeoProperties,
}

impl GeoFeature {
	#[must_use]
	pub fn new(geometry: Geometry) -> GeoFeature {
		GeoFeature {
			id: None,
			geometry,
			properties: GeoProperties::new(),
		}
	}

	pub fn set_id(&mut self, id: u64) {
		self.id = Some(id);
	}

	pub fn set_property(&mut self, key: &str, value: impl Into<GeoValue>) {
		self.properties.insert(key.to_string(), value.into());
	}

	#[cfg(test)]
	pub fn new_example() -> GeoFeature {
		let mut feature = GeoFeature::new(Geometry::new_example());
		feature.set_id(13);
		feature.set_property("name", "Squareland");
		feature.set_property("population", 348085);
		feature.set_property("coastal", true);
		feature
	}
}
