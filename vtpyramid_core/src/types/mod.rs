mod blob;
mod mercator_bbox;
mod tile_compression;
mod tile_coord;

pub use blob::*;
pub use mercator_bbox::*;
pub use tile_compression::*;
pub use tile_coord::*;
