use crate::{
	PyramidParameters,
	pyramid::{PyramidWalker, TilePyramid},
	render::TileRenderer,
};
use anyhow::{Context, Result};
use log::info;
use std::{sync::Arc, time::Instant};

/// Renders every tile of the pyramid described by `parameters` and returns the number of tiles.
///
/// The stylesheet is loaded once up front. The root column is created before the walk, the
/// walker creates all deeper columns before their tiles are rendered.
pub async fn create_pyramid(parameters: &PyramidParameters) -> Result<u64> {
	let start = Instant::now();
	let pyramid = TilePyramid::new(parameters.root, parameters.max_level)?;
	let renderer = Arc::new(TileRenderer::from_parameters(parameters)?);
	info!(
		"rendering {} tiles of {pyramid:?} into {:?}",
		pyramid.count_tiles(),
		parameters.output_dir
	);

	renderer
		.directory()
		.ensure_column(pyramid.min_level(), pyramid.root.x)?;

	let walker = PyramidWalker::new(pyramid);
	let count = if parameters.concurrency <= 1 {
		tokio::task::spawn_blocking(move || walker.walk(renderer.as_ref()))
			.await
			.context("Rendering task did not complete")??
	} else {
		walker.walk_concurrent(renderer, parameters.concurrency).await?
	};

	info!("created {count} tiles in {:.1?}", start.elapsed());
	Ok(count)
}
