use anyhow::{Result, ensure};
use std::fmt::Debug;

/// Equatorial radius of the spherical Mercator projection (EPSG:3857), in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Width (and height) of the whole projected world, in meters.
pub const WORLD_SIZE: f64 = 2.0 * std::f64::consts::PI * EARTH_RADIUS;

/// Latitude limit of the Web Mercator projection, in degrees.
pub const MAX_MERCATOR_LAT: f64 = 85.051_128_779_806_59;

/// A rectangle in projected spherical Mercator coordinates (meters).
///
/// `y` grows northwards, so `y_max` is the northern edge.
///
/// # Examples
///
/// ```
/// use vtpyramid_core::MercatorBBox;
///
/// let bbox = MercatorBBox::new(0.0, 0.0, 100.0, 50.0).unwrap();
/// assert_eq!(bbox.width(), 100.0);
/// assert!(bbox.contains([10.0, 10.0]));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct MercatorBBox {
	pub x_min: f64,
	pub y_min: f64,
	pub x_max: f64,
	pub y_max: f64,
}

impl MercatorBBox {
	/// Creates a new `MercatorBBox` from `minx, miny, maxx, maxy`.
	///
	/// # Errors
	/// Fails if a value is not finite or if a minimum exceeds its maximum.
	pub fn new(x_min: f64, y_min: f64, x_max: f64, y_max: f64) -> Result<MercatorBBox> {
		ensure!(
			[x_min, y_min, x_max, y_max].iter().all(|v| v.is_finite()),
			"bbox values must be finite"
		);
		ensure!(x_min <= x_max, "x_min ({x_min}) must be <= x_max ({x_max})");
		ensure!(y_min <= y_max, "y_min ({y_min}) must be <= y_max ({y_max})");
		Ok(MercatorBBox {
			x_min,
			y_min,
			x_max,
			y_max,
		})
	}

	pub fn width(&self) -> f64 {
		self.x_max - self.x_min
	}

	pub fn height(&self) -> f64 {
		self.y_max - self.y_min
	}

	/// Returns the box grown on every side by `pixels`, measured in a tile of `tile_size` pixels
	/// that spans this box.
	#[must_use]
	pub fn buffered(&self, pixels: f64, tile_size: u32) -> MercatorBBox {
		let dx = self.width() * pixels / f64::from(tile_size);
		let dy = self.height() * pixels / f64::from(tile_size);
		MercatorBBox {
			x_min: self.x_min - dx,
			y_min: self.y_min - dy,
			x_max: self.x_max + dx,
			y_max: self.y_max + dy,
		}
	}

	/// Whether the point lies inside the box, edges included.
	pub fn contains(&self, point: [f64; 2]) -> bool {
		point[0] >= self.x_min && point[0] <= self.x_max && point[1] >= self.y_min && point[1] <= self.y_max
	}

	/// Whether both boxes share at least one point.
	pub fn intersects(&self, other: &MercatorBBox) -> bool {
		self.x_min <= other.x_max && other.x_min <= self.x_max && self.y_min <= other.y_max && other.y_min <= self.y_max
	}

	/// The zoom level at which one tile spans the width of this box, rounded to the nearest level.
	pub fn level_estimate(&self) -> u8 {
		if self.width() <= 0.0 {
			return 31;
		}
		(WORLD_SIZE / self.width()).log2().round().clamp(0.0, 31.0) as u8
	}

	pub fn as_array(&self) -> [f64; 4] {
		[self.x_min, self.y_min, self.x_max, self.y_max]
	}
}

/// Projects WGS84 longitude/latitude in degrees to spherical Mercator meters.
///
/// Latitudes beyond the Mercator limit are clamped.
pub fn lon_lat_to_mercator(point: [f64; 2]) -> [f64; 2] {
	let lat = point[1].clamp(-MAX_MERCATOR_LAT, MAX_MERCATOR_LAT);
	[
		EARTH_RADIUS * point[0].to_radians(),
		EARTH_RADIUS * (std::f64::consts::FRAC_PI_4 + lat.to_radians() / 2.0).tan().ln(),
	]
}

impl Debug for MercatorBBox {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"MercatorBBox[{}, {}, {}, {}]",
			self.x_min, self.y_min, self.x_max, self.y_max
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use approx::assert_relative_eq;

	#[test]
	fn creation_checks() {
		assert!(MercatorBBox::new(0.0, 0.0, 1.0, 1.0).is_ok());
		assert!(MercatorBBox::new(1.0, 0.0, 0.0, 1.0).is_err());
		assert!(MercatorBBox::new(0.0, 1.0, 1.0, 0.0).is_err());
		assert!(MercatorBBox::new(0.0, 0.0, f64::NAN, 1.0).is_err());
	}

	#[test]
	fn buffered_grows_by_pixels() {
		let bbox = MercatorBBox::new(0.0, 0.0, 256.0, 512.0).unwrap();
		let grown = bbox.buffered(4.0, 256);
		assert_eq!(grown.as_array(), [-4.0, -8.0, 260.0, 520.0]);
	}

	#[test]
	fn contains_and_intersects() {
		let a = MercatorBBox::new(0.0, 0.0, 10.0, 10.0).unwrap();
		let b = MercatorBBox::new(10.0, 10.0, 20.0, 20.0).unwrap();
		let c = MercatorBBox::new(11.0, 0.0, 20.0, 5.0).unwrap();
		assert!(a.contains([10.0, 0.0]));
		assert!(!a.contains([10.1, 0.0]));
		assert!(a.intersects(&b));
		assert!(!a.intersects(&c));
	}

	#[test]
	fn level_estimate() {
		let world = MercatorBBox::new(-WORLD_SIZE / 2.0, -WORLD_SIZE / 2.0, WORLD_SIZE / 2.0, WORLD_SIZE / 2.0).unwrap();
		assert_eq!(world.level_estimate(), 0);
		let quarter = MercatorBBox::new(0.0, 0.0, WORLD_SIZE / 8.0, WORLD_SIZE / 8.0).unwrap();
		assert_eq!(quarter.level_estimate(), 3);
	}

	#[test]
	fn projection_of_known_points() {
		let [x, y] = lon_lat_to_mercator([0.0, 0.0]);
		assert_relative_eq!(x, 0.0, epsilon = 1e-6);
		assert_relative_eq!(y, 0.0, epsilon = 1e-6);
		let [x, y] = lon_lat_to_mercator([180.0, MAX_MERCATOR_LAT]);
		assert_relative_eq!(x, WORLD_SIZE / 2.0, epsilon = 1e-6);
		assert_relative_eq!(y, WORLD_SIZE / 2.0, epsilon = 1e-3);
		let [_, y] = lon_lat_to_mercator([0.0, 90.0]);
		assert_relative_eq!(y, WORLD_SIZE / 2.0, epsilon = 1e-3);
	}
}
