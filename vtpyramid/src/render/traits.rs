use super::Scene;
use anyhow::Result;
use vtpyramid_core::{Blob, MercatorBBox, TileCoord};

/// Maps a tile address to the area it covers.
pub trait TileProjection: Send + Sync {
	fn tile_bbox(&self, coord: &TileCoord, tile_size: u32) -> Result<MercatorBBox>;
}

/// Draws a stylesheet's features into a tile-sized scene.
pub trait SceneRenderer: Send + Sync {
	/// Identifies the stylesheet, used in log messages.
	fn stylesheet(&self) -> &str;

	/// Renders everything visible inside `bbox` into pixel coordinates `[0, tile_size]`.
	fn render(&self, bbox: &MercatorBBox, tile_size: u32) -> Result<Scene>;
}

/// Serialises a scene into the tile payload.
pub trait SceneEncoder: Send + Sync {
	fn encode(&self, scene: &Scene) -> Result<Blob>;
}
