//! Cutting geometries down to a rectangle.
//!
//! Points are kept when they lie inside, lines are clipped segment by segment (Liang–Barsky) and
//! split where they leave the rectangle, polygon rings are clipped with Sutherland–Hodgman.
//! The result is always a multi geometry and may be empty.

use vtpyramid_core::MercatorBBox;
use vtpyramid_geometry::{Coordinates0, Coordinates1, Coordinates2, Geometry};

pub fn clip_geometry(geometry: &Geometry, bbox: &MercatorBBox) -> Geometry {
	match geometry {
		Geometry::Point(point) => Geometry::MultiPoint(clip_points(std::slice::from_ref(point), bbox)),
		Geometry::MultiPoint(points) => Geometry::MultiPoint(clip_points(points, bbox)),
		Geometry::LineString(line) => Geometry::MultiLineString(clip_line(line, bbox)),
		Geometry::MultiLineString(lines) => {
			Geometry::MultiLineString(lines.iter().flat_map(|line| clip_line(line, bbox)).collect())
		}
		Geometry::Polygon(polygon) => Geometry::MultiPolygon(clip_polygon(polygon, bbox).into_iter().collect()),
		Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
			polygons
				.iter()
				.filter_map(|polygon| clip_polygon(polygon, bbox))
				.collect(),
		),
	}
}

fn clip_points(points: &[Coordinates0], bbox: &MercatorBBox) -> Coordinates1 {
	points.iter().copied().filter(|p| bbox.contains(*p)).collect()
}

/// Clips one segment. Returns the clipped end points and the parameters `t0 <= t1` along `a -> b`.
fn clip_segment(a: Coordinates0, b: Coordinates0, bbox: &MercatorBBox) -> Option<(Coordinates0, Coordinates0, f64, f64)> {
	let dx = b[0] - a[0];
	let dy = b[1] - a[1];
	let mut t0 = 0.0f64;
	let mut t1 = 1.0f64;

	for (p, q) in [
		(-dx, a[0] - bbox.x_min),
		(dx, bbox.x_max - a[0]),
		(-dy, a[1] - bbox.y_min),
		(dy, bbox.y_max - a[1]),
	] {
		if p == 0.0 {
			if q < 0.0 {
				return None;
			}
			continue;
		}
		let t = q / p;
		if p < 0.0 {
			if t > t1 {
				return None;
			}
			t0 = t0.max(t);
		} else {
			if t < t0 {
				return None;
			}
			t1 = t1.min(t);
		}
	}

	let at = |t: f64| [a[0] + t * dx, a[1] + t * dy];
	let start = if t0 > 0.0 { at(t0) } else { a };
	let end = if t1 < 1.0 { at(t1) } else { b };
	Some((start, end, t0, t1))
}

pub fn clip_line(line: &[Coordinates0], bbox: &MercatorBBox) -> Coordinates2 {
	let mut result = Vec::new();
	let mut run: Coordinates1 = Vec::new();

	let finish = |run: &mut Coordinates1, result: &mut Coordinates2| {
		if run.len() >= 2 {
			result.push(std::mem::take(run));
		} else {
			run.clear();
		}
	};

	for segment in line.windows(2) {
		match clip_segment(segment[0], segment[1], bbox) {
			Some((start, end, t0, t1)) => {
				if t0 > 0.0 || run.is_empty() {
					finish(&mut run, &mut result);
					run.push(start);
				}
				run.push(end);
				if t1 < 1.0 {
					finish(&mut run, &mut result);
				}
			}
			None => finish(&mut run, &mut result),
		}
	}
	finish(&mut run, &mut result);
	result
}

#[derive(Clone, Copy)]
enum Edge {
	Left(f64),
	Right(f64),
	Bottom(f64),
	Top(f64),
}

impl Edge {
	fn inside(self, p: Coordinates0) -> bool {
		match self {
			Edge::Left(v) => p[0] >= v,
			Edge::Right(v) => p[0] <= v,
			Edge::Bottom(v) => p[1] >= v,
			Edge::Top(v) => p[1] <= v,
		}
	}

	fn intersect(self, a: Coordinates0, b: Coordinates0) -> Coordinates0 {
		match self {
			Edge::Left(v) | Edge::Right(v) => {
				let t = (v - a[0]) / (b[0] - a[0]);
				[v, a[1] + t * (b[1] - a[1])]
			}
			Edge::Bottom(v) | Edge::Top(v) => {
				let t = (v - a[1]) / (b[1] - a[1]);
				[a[0] + t * (b[0] - a[0]), v]
			}
		}
	}
}

/// Clips a ring and returns it closed again, or empty if fewer than three points remain.
pub fn clip_ring(ring: &[Coordinates0], bbox: &MercatorBBox) -> Coordinates1 {
	let mut points: Coordinates1 = match ring {
		[first, .., last] if first == last => ring[..ring.len() - 1].to_vec(),
		_ => ring.to_vec(),
	};

	for edge in [
		Edge::Left(bbox.x_min),
		Edge::Right(bbox.x_max),
		Edge::Bottom(bbox.y_min),
		Edge::Top(bbox.y_max),
	] {
		if points.is_empty() {
			break;
		}
		let input = std::mem::take(&mut points);
		let mut previous = input[input.len() - 1];
		for &current in &input {
			match (edge.inside(previous), edge.inside(current)) {
				(true, true) => points.push(current),
				(true, false) => points.push(edge.intersect(previous, current)),
				(false, true) => {
					points.push(edge.intersect(previous, current));
					points.push(current);
				}
				(false, false) => {}
			}
			previous = current;
		}
	}

	points.dedup();
	if points.len() > 1 && points.first() == points.last() {
		points.pop();
	}
	if points.len() < 3 {
		return Vec::new();
	}
	points.push(points[0]);
	points
}

/// Clips all rings of a polygon. Holes that vanish are dropped, `None` if the exterior vanishes.
pub fn clip_polygon(polygon: &[Coordinates1], bbox: &MercatorBBox) -> Option<Coordinates2> {
	let (exterior, holes) = polygon.split_first()?;
	let exterior = clip_ring(exterior, bbox);
	if exterior.is_empty() {
		return None;
	}
	let mut rings = vec![exterior];
	rings.extend(holes.iter().map(|hole| clip_ring(hole, bbox)).filter(|ring| !ring.is_empty()));
	Some(rings)
}
