use super::layer::VectorTileLayer;
use anyhow::{Context, Result, bail};
use vtpyramid_core::{Blob, io::*};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTile {
	pub layers: Vec<VectorTileLayer>,
}

impl VectorTile {
	#[must_use]
	pub fn new(layers: Vec<VectorTileLayer>) -> VectorTile {
		VectorTile { layers }
	}

	pub fn from_blob(blob: &Blob) -> Result<VectorTile> {
		let mut reader = ValueReaderSlice::new_le(blob.as_slice());

		let mut tile = VectorTile::default();
		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(3, WIRE_LENGTH_DELIMITED) => {
					tile.layers.push(
						VectorTileLayer::read(
							reader
								.get_pbf_sub_reader()
								.context("Failed to get PBF sub-reader")?
								.as_mut(),
						)
						.context("Failed to read VectorTileLayer")?,
					);
				}
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(tile)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		for layer in &self.layers {
			writer.write_pbf_key(3, WIRE_LENGTH_DELIMITED)?;
			writer
				.write_pbf_blob(&layer.to_blob().with_context(|| format!("Failed to encode layer '{}'", layer.name))?)
				.context("Failed to write PBF blob")?;
		}

		Ok(writer.into_blob())
	}

	pub fn find_layer(&self, name: &str) -> Option<&VectorTileLayer> {
		self.layers.iter().find(|layer| layer.name == name)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{GeoFeature, Geometry};

	#[test]
	fn tile_round_trip() -> Result<()> {
		let mut feature = GeoFeature::new(Geometry::LineString(vec![[0.0, 0.0], [4096.0, 4096.0]]));
		feature.set_property("name", "diagonal");
		let tile = VectorTile::new(vec![
			VectorTileLayer::from_features("lines".to_string(), &[feature], 4096, 2)?,
			VectorTileLayer::new("empty".to_string(), 4096, 2),
		]);
		let decoded = VectorTile::from_blob(&tile.to_blob()?)?;
		assert_eq!(decoded, tile);
		assert!(decoded.find_layer("lines").is_some());
		assert!(decoded.find_layer("roads").is_none());
		Ok(())
	}

	#[test]
	fn empty_tile_is_empty_blob() -> Result<()> {
		assert!(VectorTile::default().to_blob()?.is_empty());
		assert_eq!(VectorTile::from_blob(&Blob::new_empty())?, VectorTile::default());
		Ok(())
	}

	#[test]
	fn garbage_fails() {
		assert!(VectorTile::from_blob(&Blob::from(vec![0x08, 0x01])).is_err());
	}
}
