//! Enumerating a quad-tree of tiles and laying them out on disk.
//!
//! A [`TilePyramid`] names the tiles, the [`PyramidWalker`] visits each of them exactly once and
//! the [`TileDirectory`] maps a tile to its `<z>/<x>/<y>.pbf` path.

mod directory;
mod tile_pyramid;
mod visitor;
mod walker;

pub use directory::*;
pub use tile_pyramid::*;
pub use visitor::*;
pub use walker::*;
