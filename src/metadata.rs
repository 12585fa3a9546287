//! The canonical metadata document and its scalar vocabulary.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::{Face, FaceBounds, LayersMetaData, LonLatBounds, VectorLayer, WmBounds};

/// Tile addressing scheme.
///
/// `fzxy` is the default S2 scheme, `xyz` the default Web-Mercator scheme.
/// A `t` prefix marks a time-sensitive variant; `tms` is the outdated
/// inverted-y scheme.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    /// Face/zoom/x/y (S2)
    #[default]
    Fzxy,
    /// Time-sensitive face/zoom/x/y (S2)
    Tfzxy,
    /// Zoom/x/y (Web-Mercator)
    Xyz,
    /// Time-sensitive zoom/x/y (Web-Mercator)
    Txyz,
    /// TMS
    Tms,
}

impl Scheme {
    /// The scheme's wire string.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Fzxy => "fzxy",
            Scheme::Tfzxy => "tfzxy",
            Scheme::Xyz => "xyz",
            Scheme::Txyz => "txyz",
            Scheme::Tms => "tms",
        }
    }
}

impl From<&str> for Scheme {
    /// Unknown values degrade silently to the default scheme.
    fn from(scheme: &str) -> Self {
        match scheme {
            "fzxy" => Scheme::Fzxy,
            "tfzxy" => Scheme::Tfzxy,
            "xyz" => Scheme::Xyz,
            "txyz" => Scheme::Txyz,
            "tms" => Scheme::Tms,
            _ => Scheme::default(),
        }
    }
}

impl Display for Scheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of data a tile set carries.
#[derive(Serialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    /// Vector data
    #[default]
    Vector,
    /// JSON data
    Json,
    /// Raster data
    Raster,
    /// Raster DEM data
    #[serde(rename = "raster-dem")]
    RasterDem,
    /// Sensor data
    Sensor,
    /// Marker data
    Markers,
    /// Anything else, including the legacy `overlay` type
    Unknown,
}

impl From<&str> for SourceType {
    fn from(source_type: &str) -> Self {
        match source_type {
            "vector" => SourceType::Vector,
            "json" => SourceType::Json,
            "raster" => SourceType::Raster,
            "raster-dem" => SourceType::RasterDem,
            "sensor" => SourceType::Sensor,
            "markers" => SourceType::Markers,
            _ => SourceType::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for SourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s: String = Deserialize::deserialize(deserializer)?;
        Ok(SourceType::from(s.as_str()))
    }
}

/// Content encoding of each tile.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// No encoding
    #[default]
    None,
    /// Gzip
    #[serde(alias = "gz")]
    Gzip,
    /// Brotli
    #[serde(rename = "br")]
    Brotli,
    /// Zstd
    Zstd,
}

impl From<&str> for Encoding {
    fn from(encoding: &str) -> Self {
        match encoding {
            "gz" | "gzip" => Encoding::Gzip,
            "br" => Encoding::Brotli,
            "zstd" => Encoding::Zstd,
            _ => Encoding::None,
        }
    }
}

/// Derived midpoint of the data: where a viewer should start.
#[derive(Serialize, Deserialize, Debug, Default, Clone, Copy, PartialEq)]
pub struct Center {
    /// Longitude of the center
    pub lon: f64,
    /// Latitude of the center
    pub lat: f64,
    /// Display zoom for the center
    pub zoom: u8,
}

/// Attribution name to href.
pub type Attribution = BTreeMap<String, String>;

/// Tile counters per face plus a grand total; a tracker of where the
/// tiles live. Counters only ever increase.
#[derive(Serialize, Deserialize, Debug, Default, Clone, PartialEq, Eq)]
pub struct TileStats {
    /// Total number of tiles across all faces
    #[serde(default)]
    pub total: u64,
    /// Number of tiles on face 0
    #[serde(rename = "0", default)]
    pub total_0: u64,
    /// Number of tiles on face 1
    #[serde(rename = "1", default)]
    pub total_1: u64,
    /// Number of tiles on face 2
    #[serde(rename = "2", default)]
    pub total_2: u64,
    /// Number of tiles on face 3
    #[serde(rename = "3", default)]
    pub total_3: u64,
    /// Number of tiles on face 4
    #[serde(rename = "4", default)]
    pub total_4: u64,
    /// Number of tiles on face 5
    #[serde(rename = "5", default)]
    pub total_5: u64,
}

impl TileStats {
    /// Tile count for one face.
    #[must_use]
    pub fn get(&self, face: Face) -> u64 {
        match face {
            Face::Face0 => self.total_0,
            Face::Face1 => self.total_1,
            Face::Face2 => self.total_2,
            Face::Face3 => self.total_3,
            Face::Face4 => self.total_4,
            Face::Face5 => self.total_5,
        }
    }

    /// Increments one face's counter and the grand total.
    pub fn increment(&mut self, face: Face) {
        match face {
            Face::Face0 => self.total_0 += 1,
            Face::Face1 => self.total_1 += 1,
            Face::Face2 => self.total_2 += 1,
            Face::Face3 => self.total_3 += 1,
            Face::Face4 => self.total_4 += 1,
            Face::Face5 => self.total_5 += 1,
        }
        self.total += 1;
    }
}

fn default_format_version() -> String {
    "1.0.0".to_string()
}

fn default_bounds() -> LonLatBounds {
    LonLatBounds::WORLD
}

fn default_maxzoom() -> u8 {
    27
}

/// The canonical metadata document for a tiled dataset.
///
/// A permissive superset: keys this crate does not know about survive
/// (de)serialization unchanged via [`Metadata::other`]. All known fields
/// are individually defaulted so partial or legacy-flavored documents
/// deserialize leniently.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Metadata {
    /// Version of the metadata format itself; the canonical-format marker
    #[serde(default = "default_format_version")]
    pub s2tilejson: String,
    /// Version of the data
    #[serde(default = "default_format_version")]
    pub version: String,
    /// Name of the data
    #[serde(default)]
    pub name: String,
    /// Tile addressing scheme
    #[serde(default)]
    pub scheme: Scheme,
    /// Description of the data
    #[serde(default)]
    pub description: String,
    /// Kind of data
    #[serde(rename = "type", default)]
    pub source_type: SourceType,
    /// File extension to use when requesting a tile
    #[serde(default)]
    pub extension: String,
    /// Content encoding of each tile
    #[serde(default)]
    pub encoding: Encoding,
    /// Faces that have data, in ascending order
    #[serde(default)]
    pub faces: Vec<Face>,
    /// Geographic bounds of the data in WGS84 degrees
    #[serde(default = "default_bounds")]
    pub bounds: LonLatBounds,
    /// Web-Mercator tile-index bounds per zoom; lets clients skip requests
    /// for tiles known not to exist
    #[serde(default)]
    pub wmbounds: WmBounds,
    /// S2 tile-index bounds per face and zoom
    #[serde(default)]
    pub s2bounds: FaceBounds,
    /// Lowest zoom at which to request tiles
    #[serde(default)]
    pub minzoom: u8,
    /// Highest zoom at which to request tiles
    #[serde(default = "default_maxzoom")]
    pub maxzoom: u8,
    /// Derived center of the data
    #[serde(default)]
    pub centerpoint: Center,
    /// Attribution name to href
    #[serde(default)]
    pub attributions: Attribution,
    /// Layer blueprints keyed by layer name
    #[serde(default)]
    pub layers: LayersMetaData,
    /// Tile counters per face
    #[serde(default)]
    pub tilestats: TileStats,
    /// Legacy-compatible flat layer records
    #[serde(default)]
    pub vector_layers: Vec<VectorLayer>,
    /// Any additional keys, carried through unchanged
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            s2tilejson: default_format_version(),
            version: default_format_version(),
            name: "default".to_string(),
            scheme: Scheme::default(),
            description: String::new(),
            source_type: SourceType::default(),
            extension: "pbf".to_string(),
            encoding: Encoding::default(),
            faces: Vec::new(),
            bounds: LonLatBounds::WORLD,
            wmbounds: WmBounds::default(),
            s2bounds: FaceBounds::default(),
            minzoom: 0,
            maxzoom: default_maxzoom(),
            centerpoint: Center::default(),
            attributions: Attribution::new(),
            layers: LayersMetaData::default(),
            tilestats: TileStats::default(),
            vector_layers: Vec::new(),
            other: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("fzxy", Scheme::Fzxy)]
    #[case("tfzxy", Scheme::Tfzxy)]
    #[case("xyz", Scheme::Xyz)]
    #[case("txyz", Scheme::Txyz)]
    #[case("tms", Scheme::Tms)]
    #[case("slippy", Scheme::Fzxy)]
    fn scheme_from_str(#[case] input: &str, #[case] expected: Scheme) {
        assert_eq!(Scheme::from(input), expected);
    }

    #[test]
    fn scheme_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Scheme::Tfzxy).unwrap(), "\"tfzxy\"");
        let back: Scheme = serde_json::from_str("\"tms\"").unwrap();
        assert_eq!(back, Scheme::Tms);
        assert_eq!(Scheme::Xyz.to_string(), "xyz");
    }

    #[rstest]
    #[case("vector", SourceType::Vector)]
    #[case("raster-dem", SourceType::RasterDem)]
    #[case("overlay", SourceType::Unknown)]
    fn source_type_is_lenient(#[case] input: &str, #[case] expected: SourceType) {
        assert_eq!(SourceType::from(input), expected);
        let json = format!("\"{input}\"");
        let back: SourceType = serde_json::from_str(&json).unwrap();
        assert_eq!(back, expected);
    }

    #[test]
    fn encoding_accepts_legacy_alias() {
        assert_eq!(Encoding::from("gz"), Encoding::Gzip);
        let back: Encoding = serde_json::from_str("\"gz\"").unwrap();
        assert_eq!(back, Encoding::Gzip);
        assert_eq!(serde_json::to_string(&Encoding::Brotli).unwrap(), "\"br\"");
    }

    #[test]
    fn tilestats_increment_and_wire_keys() {
        let mut stats = TileStats::default();
        stats.increment(Face::Face1);
        stats.increment(Face::Face1);
        stats.increment(Face::Face4);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.get(Face::Face1), 2);
        assert_eq!(stats.get(Face::Face4), 1);

        let json = serde_json::to_string(&stats).unwrap();
        assert_eq!(json, r#"{"total":3,"0":0,"1":2,"2":0,"3":0,"4":1,"5":0}"#);
        let back: TileStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn metadata_round_trips_with_unknown_keys() {
        let mut meta = Metadata::default();
        meta.other
            .insert("generator".to_string(), Value::from("tilegen 2.0"));

        let value = serde_json::to_value(&meta).unwrap();
        assert_eq!(value["generator"], "tilegen 2.0");
        assert_eq!(value["type"], "vector");
        assert_eq!(value["bounds"], serde_json::json!([-180.0, -90.0, 180.0, 90.0]));

        let back: Metadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, meta);
    }

    #[test]
    fn metadata_deserializes_leniently_from_foreign_documents() {
        // A tippecanoe-style document: unknown keys everywhere, a
        // differently-shaped tilestats object, no canonical fields.
        let text = r#"{
            "name": "test_fixture_1.pmtiles",
            "description": "test_fixture_1.pmtiles",
            "version": "2",
            "generator": "tippecanoe v2.5.0",
            "vector_layers": [
                { "id": "l1", "description": "", "minzoom": 0, "maxzoom": 0, "fields": {} }
            ],
            "tilestats": { "layerCount": 1 }
        }"#;
        let meta: Metadata = serde_json::from_str(text).unwrap();
        assert_eq!(meta.name, "test_fixture_1.pmtiles");
        assert_eq!(meta.vector_layers.len(), 1);
        assert_eq!(meta.tilestats, TileStats::default());
        assert!(meta.other.contains_key("generator"));
    }
}
