//! Mapbox Vector Tile (MVT 2.1) encoding and decoding.
//!
//! - [`VectorTile`] holds the layers of one tile.
//! - [`VectorTileLayer`] holds features, the key/value tables, the extent and the version.
//! - [`VectorTileFeature`] stores one feature as tag indices plus command-encoded geometry.

mod feature;
mod geometry_type;
mod layer;
mod property_manager;
mod tile;
mod value;

pub use feature::VectorTileFeature;
pub use geometry_type::GeomType;
pub use layer::VectorTileLayer;
pub use tile::VectorTile;
