//! Reading GeoJSON into [`GeoFeature`](crate::GeoFeature)s.
//!
//! A document may be a `FeatureCollection`, a single `Feature` or a bare geometry object.

mod parse;
mod read;

pub use parse::*;
pub use read::*;
