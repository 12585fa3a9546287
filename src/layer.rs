//! Layer blueprints and the legacy vector-layer records derived from them.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::Shape;

/// Tag classifying a layer's geometry kind.
///
/// The numeric codes are a wire contract: they are persisted in serialized
/// documents read by other systems and must stay stable across versions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum DrawType {
    /// Collection of points
    Points = 1,
    /// Collection of lines
    Lines = 2,
    /// Collection of polygons
    Polygons = 3,
    /// Collection of 3D points
    Points3D = 4,
    /// Collection of 3D lines
    Lines3D = 5,
    /// Collection of 3D polygons
    Polygons3D = 6,
    /// Raster imagery
    Raster = 7,
    /// Gridded data
    Grid = 8,
}

impl From<DrawType> for u8 {
    fn from(draw_type: DrawType) -> Self {
        draw_type as u8
    }
}

impl TryFrom<u8> for DrawType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, u8> {
        Ok(match code {
            1 => DrawType::Points,
            2 => DrawType::Lines,
            3 => DrawType::Polygons,
            4 => DrawType::Points3D,
            5 => DrawType::Lines3D,
            6 => DrawType::Polygons3D,
            7 => DrawType::Raster,
            8 => DrawType::Grid,
            other => return Err(other),
        })
    }
}

impl Serialize for DrawType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(*self as u8)
    }
}

impl<'de> Deserialize<'de> for DrawType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code: u8 = Deserialize::deserialize(deserializer)?;
        DrawType::try_from(code)
            .map_err(|c| serde::de::Error::custom(format!("unknown draw type code: {c}")))
    }
}

/// Metadata describing one named vector layer, defined as a blueprint
/// before the layer's tiles are constructed.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct LayerMetaData {
    /// Human-readable description of the layer
    pub description: Option<String>,
    /// Lowest zoom level at which the layer is available
    pub minzoom: u8,
    /// Highest zoom level at which the layer is available
    pub maxzoom: u8,
    /// Geometry kinds present in the layer
    #[serde(rename = "drawTypes", default)]
    pub draw_types: Vec<DrawType>,
    /// Schema of the layer's per-feature properties
    #[serde(default)]
    pub shape: Shape,
    /// Schema of the layer's per-feature moving/mutable properties, if any
    #[serde(rename = "mShape")]
    pub m_shape: Option<Shape>,
}

/// Layer name to layer metadata.
pub type LayersMetaData = BTreeMap<String, LayerMetaData>;

/// Simplified per-layer record from the legacy format.
///
/// Unknown keys round-trip through `other` so no information is dropped
/// when legacy documents are converted.
#[serde_with::skip_serializing_none]
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq)]
pub struct VectorLayer {
    /// Layer id
    pub id: String,
    /// Human-readable description of the layer
    pub description: Option<String>,
    /// Lowest zoom level at which the layer is available
    pub minzoom: Option<u8>,
    /// Highest zoom level at which the layer is available
    pub maxzoom: Option<u8>,
    /// Per-field descriptions
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Any additional keys, carried through unchanged
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}
