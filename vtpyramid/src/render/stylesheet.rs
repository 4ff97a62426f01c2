use anyhow::{Context, Result, ensure};
use serde::Deserialize;
use std::{
	collections::HashSet,
	fs::File,
	io::{BufReader, Read},
	path::{Path, PathBuf},
};

fn default_buffer() -> f64 {
	4.0
}

/// Which features go into which layer at which zoom levels.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Stylesheet {
	/// Pixels around the tile edge that are still drawn
	#[serde(default = "default_buffer")]
	pub buffer: f64,

	#[serde(default)]
	pub layers: Vec<LayerStyle>,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LayerStyle {
	/// Name of the vector tile layer
	pub name: String,

	/// GeoJSON file with the layer's features
	pub source: PathBuf,

	/// Lowest zoom level the layer is drawn at, inclusive
	#[serde(default)]
	pub min_zoom: u8,

	/// Highest zoom level the layer is drawn at, inclusive
	#[serde(default = "LayerStyle::default_max_zoom")]
	pub max_zoom: u8,

	/// Properties to keep. All properties are kept if missing.
	#[serde(default)]
	pub fields: Option<Vec<String>>,
}

impl LayerStyle {
	fn default_max_zoom() -> u8 {
		31
	}

	pub fn is_visible_at(&self, level: u8) -> bool {
		(self.min_zoom..=self.max_zoom).contains(&level)
	}
}

impl Stylesheet {
	pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
		let stylesheet: Stylesheet = serde_yaml_ng::from_reader(reader)?;
		stylesheet.check()?;
		Ok(stylesheet)
	}

	pub fn from_string(text: &str) -> Result<Self> {
		let stylesheet: Stylesheet = serde_yaml_ng::from_str(text)?;
		stylesheet.check()?;
		Ok(stylesheet)
	}

	/// Parses the file and resolves layer sources relative to its directory.
	pub fn from_path(path: &Path) -> Result<Self> {
		let file = File::open(path).with_context(|| format!("Failed to open stylesheet {path:?}"))?;
		let mut stylesheet =
			Stylesheet::from_reader(BufReader::new(file)).with_context(|| format!("Failed to parse stylesheet {path:?}"))?;
		if let Some(base) = path.parent() {
			stylesheet.resolve_paths(base);
		}
		Ok(stylesheet)
	}

	pub fn resolve_paths(&mut self, base: &Path) {
		for layer in &mut self.layers {
			if layer.source.is_relative() {
				layer.source = base.join(&layer.source);
			}
		}
	}

	fn check(&self) -> Result<()> {
		ensure!(
			self.buffer.is_finite() && self.buffer >= 0.0,
			"buffer ({}) must be a finite number >= 0",
			self.buffer
		);
		let mut names = HashSet::new();
		for layer in &self.layers {
			ensure!(names.insert(layer.name.as_str()), "layer '{}' is defined twice", layer.name);
			ensure!(
				layer.min_zoom <= layer.max_zoom,
				"min_zoom ({}) of layer '{}' must be <= max_zoom ({})",
				layer.min_zoom,
				layer.name,
				layer.max_zoom
			);
		}
		Ok(())
	}
}
