use std::fmt::Debug;

pub type Coordinates0 = [f64; 2];
pub type Coordinates1 = Vec<Coordinates0>;
pub type Coordinates2 = Vec<Coordinates1>;
pub type Coordinates3 = Vec<Coordinates2>;

/// A simple-features geometry. Polygons are lists of closed rings, the first one being the exterior.
#[derive(Clone, PartialEq)]
pub enum Geometry {
	Point(Coordinates0),
	LineString(Coordinates1),
	Polygon(Coordinates2),
	MultiPoint(Coordinates1),
	MultiLineString(Coordinates2),
	MultiPolygon(Coordinates3),
}

impl Geometry {
	pub fn get_type(&self) -> &str {
		match self {
			Geometry::Point(_) => "Point",
			Geometry::LineString(_) => "LineString",
			Geometry::Polygon(_) => "Polygon",
			Geometry::MultiPoint(_) => "MultiPoint",
			Geometry::MultiLineString(_) => "MultiLineString",
			Geometry::MultiPolygon(_) => "MultiPolygon",
		}
	}

	#[must_use]
	pub fn into_multi(self) -> Self {
		match self {
			Geometry::Point(g) => Geometry::MultiPoint(vec![g]),
			Geometry::LineString(g) => Geometry::MultiLineString(vec![g]),
			Geometry::Polygon(g) => Geometry::MultiPolygon(vec![g]),
			Geometry::MultiPoint(_) | Geometry::MultiLineString(_) | Geometry::MultiPolygon(_) => self,
		}
	}

	pub fn is_empty(&self) -> bool {
		match self {
			Geometry::Point(_) => false,
			Geometry::LineString(g) | Geometry::MultiPoint(g) => g.is_empty(),
			Geometry::Polygon(g) | Geometry::MultiLineString(g) => g.is_empty(),
			Geometry::MultiPolygon(g) => g.is_empty(),
		}
	}

	/// Applies `f` to every coordinate.
	#[must_use]
	pub fn map_coords<F>(self, f: F) -> Self
	where
		F: Fn(Coordinates0) -> Coordinates0,
	{
		let c1 = |c: Coordinates1| -> Coordinates1 { c.into_iter().map(&f).collect() };
		let c2 = |c: Coordinates2| -> Coordinates2 { c.into_iter().map(&c1).collect() };
		match self {
			Geometry::Point(g) => Geometry::Point(f(g)),
			Geometry::LineString(g) => Geometry::LineString(c1(g)),
			Geometry::Polygon(g) => Geometry::Polygon(c2(g)),
			Geometry::MultiPoint(g) => Geometry::MultiPoint(c1(g)),
			Geometry::MultiLineString(g) => Geometry::MultiLineString(c2(g)),
			Geometry::MultiPolygon(g) => Geometry::MultiPolygon(g.into_iter().map(&c2).collect()),
		}
	}

	/// `[x_min, y_min, x_max, y_max]` of all coordinates, `None` if there are none.
	pub fn compute_bounds(&self) -> Option<[f64; 4]> {
		let mut bounds = [f64::MAX, f64::MAX, f64::MIN, f64::MIN];
		let mut include = |c: &Coordinates0| {
			bounds[0] = bounds[0].min(c[0]);
			bounds[1] = bounds[1].min(c[1]);
			bounds[2] = bounds[2].max(c[0]);
			bounds[3] = bounds[3].max(c[1]);
		};
		match self {
			Geometry::Point(g) => include(g),
			Geometry::LineString(g) | Geometry::MultiPoint(g) => g.iter().for_each(include),
			Geometry::Polygon(g) | Geometry::MultiLineString(g) => g.iter().flatten().for_each(include),
			Geometry::MultiPolygon(g) => g.iter().flatten().flatten().for_each(include),
		}
		if bounds[0] > bounds[2] {
			return None;
		}
		Some(bounds)
	}

	#[cfg(test)]
	pub fn new_example() -> Self {
		Geometry::MultiPolygon(vec![
			vec![
				vec![[0.0, 0.0], [5.0, 0.0], [2.5, 4.0], [0.0, 0.0]],
				vec![[2.0, 1.0], [2.5, 2.0], [3.0, 1.0], [2.0, 1.0]],
			],
			vec![
				vec![[6.0, 0.0], [9.0, 0.0], [9.0, 4.0], [6.0, 4.0], [6.0, 0.0]],
				vec![[7.0, 1.0], [7.0, 3.0], [8.0, 3.0], [8.0, 1.0], [7.0, 1.0]],
			],
		])
	}
}

impl Debug for Geometry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let (type_name, inner): (&str, &dyn Debug) = match self {
			Geometry::Point(g) => ("Point", g),
			Geometry::LineString(g) => ("LineString", g),
			Geometry::Polygon(g) => ("Polygon", g),
			Geometry::MultiPoint(g) => ("MultiPoint", g),
			Geometry::MultiLineString(g) => ("MultiLineString", g),
			Geometry::MultiPolygon(g) => ("MultiPolygon", g),
		};
		f.debug_tuple(type_name).field(inner).finish()
	}
}
