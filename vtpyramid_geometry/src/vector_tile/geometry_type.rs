use crate::geo::Geometry;

/// Wire-level geometry type of a feature.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum GeomType {
	#[default]
	Unknown = 0,
	MultiPoint = 1,
	MultiLineString = 2,
	MultiPolygon = 3,
}

impl GeomType {
	pub fn as_u64(&self) -> u64 {
		*self as u64
	}
}

impl From<u64> for GeomType {
	fn from(value: u64) -> Self {
		match value {
			1 => GeomType::MultiPoint,
			2 => GeomType::MultiLineString,
			3 => GeomType::MultiPolygon,
			_ => GeomType::Unknown,
		}
	}
}

impl From<&Geometry> for GeomType {
	fn from(geometry: &Geometry) -> Self {
		use Geometry::*;
		match geometry {
			Point(_) | MultiPoint(_) => GeomType::MultiPoint,
			LineString(_) | MultiLineString(_) => GeomType::MultiLineString,
			Polygon(_) | MultiPolygon(_) => GeomType::MultiPolygon,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn from_u64() {
		assert_eq!(GeomType::from(0), GeomType::Unknown);
		assert_eq!(GeomType::from(3), GeomType::MultiPolygon);
		assert_eq!(GeomType::from(99), GeomType::Unknown);
		assert_eq!(GeomType::MultiLineString.as_u64(), 2);
	}

	#[test]
	fn from_geometry() {
		assert_eq!(GeomType::from(&Geometry::Point([1.0, 2.0])), GeomType::MultiPoint);
		assert_eq!(GeomType::from(&Geometry::LineString(vec![])), GeomType::MultiLineString);
		assert_eq!(GeomType::from(&Geometry::new_example()), GeomType::MultiPolygon);
	}
}
