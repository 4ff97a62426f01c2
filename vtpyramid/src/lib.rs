//! Renders a quad-tree pyramid of vector tiles below one root tile into a `<z>/<x>/<y>.pbf` tree.

mod create;
mod parameters;
pub mod pyramid;
pub mod render;

pub use create::*;
pub use parameters::*;
