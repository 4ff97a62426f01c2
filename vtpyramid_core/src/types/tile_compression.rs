//! The [`TileCompression`] enum selects how an encoded tile is compressed before it is written.
//!
//! Every variant still produces a file with the `.pbf` extension.
//!
//! # Examples
//!
//! ```
//! use vtpyramid_core::TileCompression;
//!
//! assert_eq!(TileCompression::Gzip.as_str(), "gzip");
//! assert!(TileCompression::Brotli.is_compressed());
//! ```

#[cfg(feature = "cli")]
use clap::ValueEnum;
use std::fmt::Display;

/// Possible compression algorithms for tile payloads.
#[cfg_attr(feature = "cli", derive(ValueEnum))]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TileCompression {
	#[default]
	#[cfg_attr(feature = "cli", value(name = "none"))]
	Uncompressed,
	Gzip,
	Brotli,
}

impl TileCompression {
	pub fn as_str(&self) -> &str {
		match self {
			TileCompression::Uncompressed => "none",
			TileCompression::Gzip => "gzip",
			TileCompression::Brotli => "brotli",
		}
	}

	pub fn is_compressed(&self) -> bool {
		*self != TileCompression::Uncompressed
	}
}

impl Display for TileCompression {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}
