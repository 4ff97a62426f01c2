use super::parse_geojson;
use crate::GeoFeature;
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Reads and parses a GeoJSON file.
pub fn read_geojson(path: &Path) -> Result<Vec<GeoFeature>> {
	let json = fs::read_to_string(path).with_context(|| format!("Failed to read GeoJSON file {path:?}"))?;
	parse_geojson(&json).with_context(|| format!("Failed to parse GeoJSON file {path:?}"))
}
