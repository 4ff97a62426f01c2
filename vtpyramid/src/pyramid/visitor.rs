use anyhow::Result;
use vtpyramid_core::TileCoord;

/// Receives the walker's callbacks.
///
/// `prepare_column` is called for both child columns of a tile before any of its children is
/// handed to `visit_tile`. Implementations must be safe to call from several threads.
pub trait PyramidVisitor: Send + Sync {
	fn prepare_column(&self, level: u8, x: u32) -> Result<()>;

	fn visit_tile(&self, coord: &TileCoord) -> Result<()>;
}
