use crate::{Coordinates0, Coordinates1, Coordinates2, Coordinates3, GeoFeature, GeoProperties, GeoValue, Geometry};
use anyhow::{Context, Result, anyhow, bail};
use log::trace;
use serde_json::{Map, Value};

pub fn parse_geojson(json: &str) -> Result<Vec<GeoFeature>> {
	let value: Value = serde_json::from_str(json).context("Failed to parse JSON")?;
	let object = as_object(&value, "GeoJSON root")?;

	match get_type(object)? {
		"FeatureCollection" => {
			let features = object
				.get("features")
				.and_then(Value::as_array)
				.ok_or_else(|| anyhow!("FeatureCollection must have a 'features' array"))?;
			let mut result = Vec::with_capacity(features.len());
			for (index, feature) in features.iter().enumerate() {
				if let Some(feature) = parse_geojson_feature(feature).with_context(|| format!("Failed to parse feature {index}"))? {
					result.push(feature);
				}
			}
			Ok(result)
		}
		"Feature" => Ok(parse_geojson_feature(&value)?.into_iter().collect()),
		_ => Ok(vec![GeoFeature::new(parse_geojson_geometry(&value)?)]),
	}
}

fn as_object<'a>(value: &'a Value, name: &str) -> Result<&'a Map<String, Value>> {
	value.as_object().ok_or_else(|| anyhow!("{name} must be an object"))
}

fn get_type(object: &Map<String, Value>) -> Result<&str> {
	object
		.get("type")
		.and_then(Value::as_str)
		.ok_or_else(|| anyhow!("object must have a 'type'"))
}

fn check_type(object: &Map<String, Value>, name: &str) -> Result<()> {
	let object_type = get_type(object)?;
	if object_type != name {
		bail!("type must be '{name}', but is '{object_type}'")
	}
	Ok(())
}

/// Returns `None` for features without geometry.
pub fn parse_geojson_feature(value: &Value) -> Result<Option<GeoFeature>> {
	let object = as_object(value, "feature")?;
	check_type(object, "Feature")?;

	let geometry = match object.get("geometry") {
		None | Some(Value::Null) => {
			trace!("skipping feature without geometry");
			return Ok(None);
		}
		Some(geometry) => parse_geojson_geometry(geometry)?,
	};

	let mut feature = GeoFeature::new(geometry);
	if let Some(id) = object.get("id").and_then(Value::as_u64) {
		feature.set_id(id);
	}
	if let Some(properties) = object.get("properties").filter(|p| !p.is_null()) {
		feature.properties = parse_geojson_properties(properties)?;
	}
	Ok(Some(feature))
}

fn parse_geojson_properties(value: &Value) -> Result<GeoProperties> {
	let object = as_object(value, "properties")?;
	Ok(object
		.iter()
		.filter_map(|(key, value)| parse_geojson_value(value).map(|v| (key.clone(), v)))
		.collect())
}

/// Nulls are dropped, nested arrays and objects are kept as their JSON text.
fn parse_geojson_value(value: &Value) -> Option<GeoValue> {
	match value {
		Value::Null => None,
		Value::Bool(b) => Some(GeoValue::Bool(*b)),
		Value::Number(n) => {
			if let Some(u) = n.as_u64() {
				Some(GeoValue::UInt(u))
			} else if let Some(i) = n.as_i64() {
				Some(GeoValue::Int(i))
			} else {
				n.as_f64().map(GeoValue::Double)
			}
		}
		Value::String(s) => Some(GeoValue::String(s.clone())),
		Value::Array(_) | Value::Object(_) => Some(GeoValue::String(value.to_string())),
	}
}

pub fn parse_geojson_geometry(value: &Value) -> Result<Geometry> {
	let object = as_object(value, "geometry")?;
	let geometry_type = get_type(object)?;
	let coordinates = object
		.get("coordinates")
		.ok_or_else(|| anyhow!("{geometry_type} is missing 'coordinates'"))?;

	let geometry = match geometry_type {
		"Point" => Geometry::Point(parse_coordinates0(coordinates)?),
		"LineString" => Geometry::LineString(parse_coordinates1(coordinates)?),
		"Polygon" => Geometry::Polygon(parse_coordinates2(coordinates)?),
		"MultiPoint" => Geometry::MultiPoint(parse_coordinates1(coordinates)?),
		"MultiLineString" => Geometry::MultiLineString(parse_coordinates2(coordinates)?),
		"MultiPolygon" => Geometry::MultiPolygon(parse_coordinates3(coordinates)?),
		_ => bail!("unknown geometry type '{geometry_type}'"),
	};
	Ok(geometry)
}

fn parse_coordinates0(value: &Value) -> Result<Coordinates0> {
	let array = value
		.as_array()
		.ok_or_else(|| anyhow!("a position must be an array"))?;
	match array.as_slice() {
		[x, y, ..] => Ok([
			x.as_f64().ok_or_else(|| anyhow!("x must be a number"))?,
			y.as_f64().ok_or_else(|| anyhow!("y must be a number"))?,
		]),
		_ => bail!("a position must have at least two numbers"),
	}
}

fn parse_list<T>(value: &Value, parse: fn(&Value) -> Result<T>) -> Result<Vec<T>> {
	value
		.as_array()
		.ok_or_else(|| anyhow!("coordinates must be an array"))?
		.iter()
		.map(parse)
		.collect()
}

fn parse_coordinates1(value: &Value) -> Result<Coordinates1> {
	parse_list(value, parse_coordinates0)
}

fn parse_coordinates2(value: &Value) -> Result<Coordinates2> {
	parse_list(value, parse_coordinates1)
}

fn parse_coordinates3(value: &Value) -> Result<Coordinates3> {
	parse_list(value, parse_coordinates2)
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn feature_collection() -> Result<()> {
		let features = parse_geojson(
			r#"{"type":"FeatureCollection","features":[
				{"type":"Feature","id":7,"geometry":{"type":"Point","coordinates":[8.5,47.3,410]},
				 "properties":{"name":"Zürich","rank":-2,"pop":421878,"area":87.88,"capital":false,"note":null,"tags":["a"]}},
				{"type":"Feature","geometry":null,"properties":{}},
				{"type":"Feature","geometry":{"type":"LineString","coordinates":[[0,0],[1,1]]}}
			]}"#,
		)?;
		assert_eq!(features.len(), 2);
		assert_eq!(features[0].id, Some(7));
		assert_eq!(features[0].geometry, Geometry::Point([8.5, 47.3]));
		assert_eq!(
			features[0].properties,
			GeoProperties::from(vec![
				("area", GeoValue::Double(87.88)),
				("capital", GeoValue::Bool(false)),
				("name", GeoValue::from("Zürich")),
				("pop", GeoValue::UInt(421878)),
				("rank", GeoValue::Int(-2)),
				("tags", GeoValue::from("[\"a\"]")),
			])
		);
		assert_eq!(features[1].id, None);
		assert_eq!(features[1].geometry, Geometry::LineString(vec![[0.0, 0.0], [1.0, 1.0]]));
		Ok(())
	}

	#[test]
	fn single_feature_and_bare_geometry() -> Result<()> {
		let feature = parse_geojson(
			r#"{"type":"Feature","geometry":{"type":"Polygon","coordinates":[[[0,0],[1,0],[1,1],[0,0]]]},"properties":null}"#,
		)?;
		assert_eq!(feature.len(), 1);
		assert!(feature[0].properties.is_empty());

		let bare = parse_geojson(r#"{"type":"MultiPoint","coordinates":[[1,2],[3,4]]}"#)?;
		assert_eq!(bare[0].geometry, Geometry::MultiPoint(vec![[1.0, 2.0], [3.0, 4.0]]));
		Ok(())
	}

	#[test]
	fn errors() {
		assert!(parse_geojson("[]").is_err());
		assert!(parse_geojson("{").is_err());
		assert!(parse_geojson(r#"{"type":"FeatureCollection"}"#).is_err());
		assert!(parse_geojson(r#"{"type":"Circle","coordinates":[0,0]}"#).is_err());
		assert!(parse_geojson(r#"{"type":"Point","coordinates":[0]}"#).is_err());
		assert!(parse_geojson(r#"{"type":"LineString","coordinates":[[0,"a"]]}"#).is_err());
		let error = parse_geojson(r#"{"type":"FeatureCollection","features":[{"type":"Thing"}]}"#).unwrap_err();
		assert_eq!(error.to_string(), "Failed to parse feature 0");
	}
}
