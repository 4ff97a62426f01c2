//! Contains the tile coordinate and bounding-box types, the `Blob` byte container,
//! protobuf value readers/writers and the tile compression utilities.

pub mod io;
pub mod types;
pub mod utils;

pub use types::*;
