use crate::geo::{Coordinates1, Coordinates2};

/// Twice the signed area of a ring (surveyor's formula).
///
/// In a y-down tile frame a clockwise ring on screen yields a positive value, which is what
/// vector tiles expect for exterior rings.
pub fn area_ring(c: &Coordinates1) -> f64 {
	let Some(mut p2) = c.last() else {
		return 0.0;
	};
	let mut sum = 0f64;
	for p1 in c {
		sum += (p2[0] - p1[0]) * (p1[1] + p2[1]);
		p2 = p1;
	}
	sum
}

/// Twice the area of the exterior ring minus its holes. Holes run opposite to the exterior, so
/// their signed areas are added.
pub fn area_polygon(c: &Coordinates2) -> f64 {
	let mut rings = c.iter();
	let Some(outer) = rings.next() else {
		return 0.0;
	};
	rings.fold(area_ring(outer), |sum, ring| sum + area_ring(ring))
}
