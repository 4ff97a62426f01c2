//! Feature model, GeoJSON input and the Mapbox Vector Tile codec.

mod geo;
pub mod geojson;
pub mod math;
pub mod vector_tile;

pub use geo::*;
