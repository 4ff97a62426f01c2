use super::{geometry_type::GeomType, layer::VectorTileLayer};
use crate::{geo::*, math::area_ring};
use anyhow::{Context, Result, bail, ensure};
use byteorder::LE;
use log::trace;
use vtpyramid_core::{
	Blob,
	io::{ValueReader, ValueReaderSlice, ValueWriter, ValueWriterBlob, WIRE_LENGTH_DELIMITED, WIRE_VARINT},
};

const COMMAND_MOVE_TO: u64 = 1;
const COMMAND_LINE_TO: u64 = 2;
const COMMAND_CLOSE_PATH: u64 = 7;

fn command(id: u64, count: usize) -> u64 {
	((count as u64) << 3) | id
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct VectorTileFeature {
	pub id: Option<u64>,
	pub tag_ids: Vec<u32>,
	pub geom_type: GeomType,
	pub geom_data: Blob,
}

impl VectorTileFeature {
	pub fn read(reader: &mut dyn ValueReader<'_, LE>) -> Result<VectorTileFeature> {
		let mut f = VectorTileFeature::default();

		while reader.has_remaining() {
			match reader.read_pbf_key().context("Failed to read PBF key")? {
				(1, WIRE_VARINT) => f.id = Some(reader.read_varint().context("Failed to read feature ID")?),
				(2, WIRE_LENGTH_DELIMITED) => f.tag_ids = reader.read_pbf_packed_uint32().context("Failed to read tag IDs")?,
				(3, WIRE_VARINT) => f.geom_type = GeomType::from(reader.read_varint().context("Failed to read geometry type")?),
				(4, WIRE_LENGTH_DELIMITED) => f.geom_data = reader.read_pbf_blob().context("Failed to read geometry data")?,
				(f, w) => bail!("Unexpected combination of field number ({f}) and wire type ({w})"),
			}
		}

		Ok(f)
	}

	pub fn to_blob(&self) -> Result<Blob> {
		let mut writer = ValueWriterBlob::new_le();

		if let Some(id) = self.id {
			writer.write_pbf_key(1, WIRE_VARINT)?;
			writer.write_varint(id).context("Failed to write feature ID")?;
		}

		if !self.tag_ids.is_empty() {
			writer.write_pbf_key(2, WIRE_LENGTH_DELIMITED)?;
			writer
				.write_pbf_packed_uint32(&self.tag_ids)
				.context("Failed to write tag IDs")?;
		}

		writer.write_pbf_key(3, WIRE_VARINT)?;
		writer
			.write_varint(self.geom_type.as_u64())
			.context("Failed to write geometry type")?;

		if !self.geom_data.is_empty() {
			writer.write_pbf_key(4, WIRE_LENGTH_DELIMITED)?;
			writer
				.write_pbf_blob(&self.geom_data)
				.context("Failed to write geometry data")?;
		}

		Ok(writer.into_blob())
	}

	/// Decodes the command stream back into a multi geometry in tile coordinates.
	pub fn to_geometry(&self) -> Result<Geometry> {
		let lines = {
			let mut reader = ValueReaderSlice::new_le(self.geom_data.as_slice());

			let mut lines: Coordinates2 = Vec::new();
			let mut line: Coordinates1 = Vec::new();
			let mut x = 0;
			let mut y = 0;

			while reader.has_remaining() {
				let value = reader
					.read_varint()
					.context("Failed to read varint for geometry command")?;
				let command = value & 0x7;
				let count = value >> 3;

				match command {
					COMMAND_MOVE_TO | COMMAND_LINE_TO => {
						for _ in 0..count {
							if command == COMMAND_MOVE_TO && !line.is_empty() {
								lines.push(line);
								line = Vec::new();
							}
							x += reader.read_svarint().context("Failed to read x coordinate")?;
							y += reader.read_svarint().context("Failed to read y coordinate")?;
							line.push([x as f64, y as f64]);
						}
					}
					COMMAND_CLOSE_PATH => {
						ensure!(!line.is_empty(), "ClosePath command found on an empty linestring");
						line.push(line[0]);
					}
					_ => bail!("Unknown command {command}"),
				}
			}

			if !line.is_empty() {
				lines.push(line);
			}
			lines
		};

		match self.geom_type {
			GeomType::Unknown => bail!("Unknown geometry type"),

			GeomType::MultiPoint => {
				ensure!(!lines.is_empty(), "(Multi)Points must not be empty");
				let mut points = Vec::with_capacity(lines.len());
				for line in lines {
					match line.as_slice() {
						[point] => points.push(*point),
						_ => bail!("(Multi)Point entries must have exactly one entry"),
					}
				}
				Ok(Geometry::MultiPoint(points))
			}

			GeomType::MultiLineString => {
				ensure!(!lines.is_empty(), "MultiLineStrings must have at least one entry");
				for line in &lines {
					ensure!(
						line.len() >= 2,
						"Each entry in MultiLineStrings must have at least two points"
					);
				}
				Ok(Geometry::MultiLineString(lines))
			}

			GeomType::MultiPolygon => {
				ensure!(!lines.is_empty(), "Polygons must have at least one entry");
				let mut current_polygon: Coordinates2 = Vec::new();
				let mut polygons: Coordinates3 = Vec::new();

				for ring in lines {
					ensure!(
						ring.len() >= 4,
						"Each ring in Polygons must have at least four points (A,B,C,A)"
					);
					ensure!(
						ring[0] == ring[ring.len() - 1],
						"First and last point of the ring must be the same"
					);

					let area = area_ring(&ring);
					if area > 1e-14 {
						if !current_polygon.is_empty() {
							polygons.push(current_polygon);
							current_polygon = Vec::new();
						}
						current_polygon.push(ring);
					} else if area < -1e-14 {
						if current_polygon.is_empty() {
							trace!("An outer ring must precede inner rings");
						} else {
							current_polygon.push(ring);
						}
					} else {
						trace!("Ring with zero area");
					}
				}

				if !current_polygon.is_empty() {
					polygons.push(current_polygon);
				}
				Ok(Geometry::MultiPolygon(polygons))
			}
		}
	}

	pub fn to_feature(&self, layer: &VectorTileLayer) -> Result<GeoFeature> {
		let mut feature = GeoFeature::new(self.to_geometry().context("Failed to convert to geometry")?);
		feature.id = self.id;
		feature.properties = layer.decode_tag_ids(&self.tag_ids)?;
		Ok(feature)
	}

	/// Encodes a geometry whose coordinates are already in integer tile space.
	///
	/// Coordinates are rounded. Lines with fewer than two points and rings that enclose no area
	/// after rounding are left out, together with the holes of a dropped exterior ring.
	pub fn from_geometry(id: Option<u64>, tag_ids: Vec<u32>, geometry: &Geometry) -> Result<VectorTileFeature> {
		struct Encoder {
			writer: ValueWriterBlob<LE>,
			cursor: [i64; 2],
		}

		fn round(point: &Coordinates0) -> [i64; 2] {
			[point[0].round() as i64, point[1].round() as i64]
		}

		/// Rounds to the integer grid and drops points that repeat their predecessor.
		fn snap(points: &[Coordinates0]) -> Vec<[i64; 2]> {
			let mut result: Vec<[i64; 2]> = points.iter().map(round).collect();
			result.dedup();
			result
		}

		impl Encoder {
			fn point(&mut self, point: [i64; 2]) -> Result<()> {
				self.writer.write_svarint(point[0] - self.cursor[0])?;
				self.writer.write_svarint(point[1] - self.cursor[1])?;
				self.cursor = point;
				Ok(())
			}

			fn points(&mut self, points: &[Coordinates0]) -> Result<()> {
				if points.is_empty() {
					return Ok(());
				}
				self.writer.write_varint(command(COMMAND_MOVE_TO, points.len()))?;
				for point in points {
					self.point(round(point))?;
				}
				Ok(())
			}

			fn path(&mut self, points: &[[i64; 2]], close: bool) -> Result<()> {
				let Some((first, rest)) = points.split_first() else {
					return Ok(());
				};
				self.writer.write_varint(command(COMMAND_MOVE_TO, 1))?;
				self.point(*first)?;
				if !rest.is_empty() {
					self.writer.write_varint(command(COMMAND_LINE_TO, rest.len()))?;
					for point in rest {
						self.point(*point)?;
					}
				}
				if close {
					self.writer.write_varint(command(COMMAND_CLOSE_PATH, 1))?;
				}
				Ok(())
			}

			fn line_strings(&mut self, lines: &[Coordinates1]) -> Result<()> {
				for line in lines {
					let line = snap(line);
					if line.len() >= 2 {
						self.path(&line, false)?;
					}
				}
				Ok(())
			}

			fn polygons(&mut self, polygons: &[Coordinates2]) -> Result<()> {
				for polygon in polygons {
					for (index, ring) in polygon.iter().enumerate() {
						let mut ring = snap(ring);
						if ring.len() > 1 && ring.first() == ring.last() {
							ring.pop();
						}
						let area = area_ring(&ring.iter().map(|p| [p[0] as f64, p[1] as f64]).collect::<Vec<_>>());
						if ring.len() < 3 || area == 0.0 {
							// holes of a collapsed exterior go with it
							if index == 0 {
								break;
							}
							continue;
						}
						self.path(&ring, true)?;
					}
				}
				Ok(())
			}
		}

		let mut encoder = Encoder {
			writer: ValueWriterBlob::new_le(),
			cursor: [0, 0],
		};

		use Geometry::*;
		match geometry {
			Point(g) => encoder.points(std::slice::from_ref(g))?,
			MultiPoint(g) => encoder.points(g)?,
			LineString(g) => encoder.line_strings(std::slice::from_ref(g))?,
			MultiLineString(g) => encoder.line_strings(g)?,
			Polygon(g) => encoder.polygons(std::slice::from_ref(g))?,
			MultiPolygon(g) => encoder.polygons(g)?,
		}

		Ok(VectorTileFeature {
			id,
			tag_ids,
			geom_type: GeomType::from(geometry),
			geom_data: encoder.writer.into_blob(),
		})
	}
}
