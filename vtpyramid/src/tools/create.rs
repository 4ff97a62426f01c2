use anyhow::Result;
use std::path::PathBuf;
use vtpyramid::{PyramidParameters, create_pyramid};
use vtpyramid_core::TileCompression;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true)]
pub struct Arguments {
	/// zoom level of the root tile
	#[arg(value_name = "MIN_ZOOM")]
	min_zoom: u8,

	/// deepest zoom level to render
	#[arg(value_name = "MAX_ZOOM")]
	max_zoom: u8,

	/// column of the root tile at MIN_ZOOM
	#[arg(value_name = "X")]
	x: u32,

	/// row of the root tile at MIN_ZOOM
	#[arg(value_name = "Y")]
	y: u32,

	/// YAML stylesheet listing the layers and their GeoJSON sources
	#[arg(value_name = "STYLESHEET")]
	stylesheet: PathBuf,

	/// compress every tile (gzip)
	#[arg(long, display_order = 1)]
	compress: bool,

	/// pick the compression explicitly, overrides --compress
	#[arg(long, value_enum, value_name = "COMPRESSION", display_order = 1)]
	compression: Option<TileCompression>,

	/// directory that receives the z/x/y tree
	#[arg(long, short, value_name = "DIR", default_value = ".", display_order = 2)]
	output_dir: PathBuf,

	/// number of tiles rendered in parallel, 1 renders sequentially [default: number of CPUs]
	#[arg(long, short = 'j', value_name = "int", display_order = 2)]
	concurrency: Option<usize>,

	/// tile size in pixels
	#[arg(long, value_name = "int", default_value_t = 256, display_order = 2)]
	tile_size: u32,
}

impl Arguments {
	fn compression(&self) -> TileCompression {
		match (self.compression, self.compress) {
			(Some(compression), _) => compression,
			(None, true) => TileCompression::Gzip,
			(None, false) => TileCompression::Uncompressed,
		}
	}

	fn to_parameters(&self) -> Result<PyramidParameters> {
		PyramidParameters::new(self.min_zoom, self.max_zoom, self.x, self.y, self.stylesheet.clone())?
			.with_compression(self.compression())
			.with_output_dir(self.output_dir.clone())
			.with_concurrency(self.concurrency.unwrap_or_else(num_cpus::get))?
			.with_tile_size(self.tile_size)
	}
}

#[tokio::main]
pub async fn run(arguments: &Arguments) -> Result<()> {
	let parameters = arguments.to_parameters()?;
	create_pyramid(&parameters).await?;
	println!("Tiles created.");
	Ok(())
}
