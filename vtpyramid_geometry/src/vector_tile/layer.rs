//! A single layer of a vector tile.
//!
//! Wire layout:
//!  * field 1: `name` (string)
//!  * field 2: repeated `feature` (embedded message)
//!  * field 3: repeated `keys` (string)
//!  * field 4: repeated `values` (embedded message)
//!  * field 5: `extent` (varint, default 4096)
//!  * field 15: `version` (varint, default 1)

use super::{feature::VectorTileFeature, property_manager::PropertyManager, value::GeoValuePBF};
use crate::geo::{GeoFeature, GeoProperties, GeoValue};
use anyhow::{Context, Result, anyhow, bail};
use byteorder::LE;
use vtpyramid_core::{
	Blob,
	io::{ValueReader, ValueWriter, ValueWriterBlob, WIRE_LENGTH_DELIMITED, WIRE_VARINT},
};

pub const DEFAULT_EXTENT: u32 = 4096;

#[derive(Clone, Debug, PartialEq)]
pub struct VectorTileLayer {
	pub extent: u32,
	pub features: Vec<VectorTileFeature>,
	pub name: String,
	pub property_manager: PropertyManager,
	pub version: u32,
}

impl VectorTileLayer {
	#[must_use]
	pub fn new(name: String, extent: u32, version: u32) -> VectorTileLayer {
		VectorTileLayer {
			extent,
			features: vec![],
			name,
			property_manager: PropertyManager::default(),
			version,
		}
	}

	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileLayer> {
		let mut extent = DEFAULT_EXTENT;
		let mut features: Vec<VectorTileFeature> = Vec::new();
		let mut name = None;
		let mut property_manager = PropertyManager::new();
		let mut version = 1;

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_LENGTH_DELIMITED) => name = Some(reader.read_pbf_string().context("Failed to read layer name")?),
				(2, WIRE_LENGTH_DELIMITED) => features.push(
					VectorTileFeature::read(
						reader
							.get_pbf_sub_reader()
							.context("Failed to get PBF sub-reader for feature")?
							.as_mut(),
					)
					.context("Failed to read VectorTileFeature")?,
				),
				(3, WIRE_LENGTH_DELIMITED) => {
					property_manager.add_key(reader.read_pbf_string().context("Failed to read property key")?);
				}
				(4, WIRE_LENGTH_DELIMITED) => {
					property_manager.add_val(
						GeoValue::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader for property value")?
								.as_mut(),
						)
						.context("Failed to read GeoValue")?,
					);
				}
				(5, WIRE_VARINT) => extent = u32::try_from(reader.read_varint().context("Failed to read extent")?)?,
				(15, WIRE_VARINT) => version = u32::try_from(reader.read_varint().context("Failed to read version")?)?,
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(VectorTileLayer {
			extent,
			features,
			name: name.ok_or(anyhow!("Layer name is required"))?,
			property_manager,
			version,
		})
	}

	/// Writes name, features, key/value tables and the non-default extent and version.
	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		writer.write_pbf_key(1, WIRE_LENGTH_DELIMITED)?;
		writer
			.write_pbf_string(&self.name)
			.context("Failed to write layer name")?;

		for feature in &self.features {
			writer.write_pbf_key(2, WIRE_LENGTH_DELIMITED)?;
			writer
				.write_pbf_blob(&feature.to_blob().context("Failed to convert feature to blob")?)
				.context("Failed to write feature blob")?;
		}

		for key in self.property_manager.iter_key() {
			writer.write_pbf_key(3, WIRE_LENGTH_DELIMITED)?;
			writer.write_pbf_string(key).context("Failed to write property key")?;
		}

		for value in self.property_manager.iter_val() {
			writer.write_pbf_key(4, WIRE_LENGTH_DELIMITED)?;
			writer
				.write_pbf_blob(&value.to_blob().context("Failed to convert property value to blob")?)
				.context("Failed to write property value blob")?;
		}

		if self.extent != DEFAULT_EXTENT {
			writer.write_pbf_key(5, WIRE_VARINT)?;
			writer
				.write_varint(u64::from(self.extent))
				.context("Failed to write extent")?;
		}

		if self.version != 1 {
			writer.write_pbf_key(15, WIRE_VARINT)?;
			writer
				.write_varint(u64::from(self.version))
				.context("Failed to write version")?;
		}

		Ok(writer.into_blob())
	}

	pub fn to_features(&self) -> Result<Vec<GeoFeature>> {
		self
			.features
			.iter()
			.map(|feature| feature.to_feature(self).context("Failed to convert VectorTileFeature to GeoFeature"))
			.collect()
	}

	pub fn decode_tag_ids(&self, tag_ids: &[u32]) -> Result<GeoProperties> {
		self.property_manager.decode_tag_ids(tag_ids)
	}

	/// Builds a layer from features whose coordinates are already in tile space.
	pub fn from_features(name: String, features: &[GeoFeature], extent: u32, version: u32) -> Result<VectorTileLayer> {
		let mut encoded = Vec::with_capacity(features.len());
		for feature in features {
			let tile_feature = VectorTileFeature::from_geometry(feature.id, vec![], &feature.geometry)
				.with_context(|| format!("Failed to encode features of layer '{name}'"))?;
			// geometries can collapse to nothing once rounded to the integer grid
			if !tile_feature.geom_data.is_empty() {
				encoded.push((feature, tile_feature));
			}
		}

		let mut property_manager = PropertyManager::from_properties(encoded.iter().map(|(f, _)| &f.properties));
		let features = encoded
			.into_iter()
			.map(|(feature, mut tile_feature)| {
				tile_feature.tag_ids = property_manager.encode_tag_ids(feature.properties.clone());
				tile_feature
			})
			.collect();

		Ok(VectorTileLayer {
			extent,
			features,
			name,
			property_manager,
			version,
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Geometry;
	use pretty_assertions::assert_eq;
	use vtpyramid_core::io::ValueReaderSlice;

	fn example_layer() -> Result<VectorTileLayer> {
		VectorTileLayer::from_features("places".to_string(), &[GeoFeature::new_example()], 4096, 2)
	}

	#[test]
	fn layer_round_trip() -> Result<()> {
		let layer = example_layer()?;
		let blob = layer.to_blob()?;
		let decoded = VectorTileLayer::read(&mut ValueReaderSlice::new_le(blob.as_slice()))?;
		assert_eq!(decoded, layer);
		assert_eq!(decoded.version, 2);
		assert_eq!(decoded.extent, 4096);

		let features = decoded.to_features()?;
		assert_eq!(features.len(), 1);
		let example = GeoFeature::new_example();
		assert_eq!(features[0].id, example.id);
		assert_eq!(features[0].properties, example.properties);
		assert_eq!(
			features[0].geometry,
			example.geometry.map_coords(|[x, y]| [x.round(), y.round()])
		);
		Ok(())
	}

	#[test]
	fn extent_and_version_defaults_are_omitted() -> Result<()> {
		let layer = VectorTileLayer::new("a".to_string(), 4096, 1);
		assert_eq!(layer.to_blob()?.as_slice(), &[0x0A, 0x01, b'a']);

		let layer = VectorTileLayer::new("a".to_string(), 8192, 2);
		assert_eq!(
			layer.to_blob()?.as_slice(),
			&[0x0A, 0x01, b'a', 0x28, 0x80, 0x40, 0x78, 0x02]
		);
		Ok(())
	}

	#[test]
	fn shared_values_are_stored_once() -> Result<()> {
		let mut a = GeoFeature::new(Geometry::Point([1.0, 1.0]));
		a.set_property("kind", "tree");
		let mut b = GeoFeature::new(Geometry::Point([2.0, 2.0]));
		b.set_property("kind", "tree");
		let layer = VectorTileLayer::from_features("trees".to_string(), &[a, b], 4096, 2)?;
		assert_eq!(layer.property_manager.iter_key().count(), 1);
		assert_eq!(layer.property_manager.iter_val().count(), 1);
		assert_eq!(layer.features[0].tag_ids, layer.features[1].tag_ids);
		Ok(())
	}

	#[test]
	fn collapsed_features_leave_no_properties() -> Result<()> {
		let mut dot = GeoFeature::new(Geometry::LineString(vec![[1.0, 1.0], [1.2, 1.1]]));
		dot.set_property("kind", "dot");
		let mut road = GeoFeature::new(Geometry::LineString(vec![[0.0, 0.0], [8.0, 0.0]]));
		road.set_property("lanes", 2u32);
		let layer = VectorTileLayer::from_features("roads".to_string(), &[dot, road], 4096, 2)?;
		assert_eq!(layer.features.len(), 1);
		assert_eq!(layer.property_manager.iter_key().collect::<Vec<_>>(), vec!["lanes"]);
		assert_eq!(layer.property_manager.iter_val().count(), 1);
		assert_eq!(layer.to_features()?[0].properties, layer.decode_tag_ids(&layer.features[0].tag_ids)?);
		Ok(())
	}

	#[test]
	fn missing_name_fails() {
		let data = [0x78, 0x02];
		assert!(VectorTileLayer::read(&mut ValueReaderSlice::new_le(&data)).is_err());
	}
}
