//! Turning a tile address into an encoded, optionally compressed payload.
//!
//! Rendering is split into three swappable steps, each behind a trait:
//! [`TileProjection`] computes the tile's bounding box, [`SceneRenderer`] draws the stylesheet
//! into a [`Scene`] and [`SceneEncoder`] serialises the scene. [`TileRenderer`] chains them,
//! compresses the result and stores it through a [`TileDirectory`](crate::pyramid::TileDirectory).

mod clip;
mod encoder;
mod projection;
mod scene;
mod style_renderer;
mod stylesheet;
mod tile_renderer;
mod traits;

pub use clip::*;
pub use encoder::*;
pub use projection::*;
pub use scene::*;
pub use style_renderer::*;
pub use stylesheet::*;
pub use tile_renderer::*;
pub use traits::*;
