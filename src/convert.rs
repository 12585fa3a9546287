//! Best-effort conversion of legacy TileJSON-style documents into the
//! canonical [`Metadata`] form.
//!
//! Conversion never fails. Every missing or malformed field falls back to a
//! documented default with a warning, and keys with no canonical meaning are
//! carried through unchanged so no information is dropped.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{Attribution, Center, Encoding, Face, LonLatBounds, Metadata, Scheme, VectorLayer};

/// Matches one HTML anchor, capturing the href and the display text.
static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a[^>]*href=['"]([^'"]*)['"][^>]*>([^<]*)</a>"#)
        .expect("anchor pattern is valid")
});

/// Legacy keys whose values the conversion maps into canonical fields.
/// Consumed rather than carried through, so the result never serializes
/// the same key twice.
const MAPPED_KEYS: &[&str] = &[
    "name",
    "description",
    "version",
    "scheme",
    "minzoom",
    "maxzoom",
    "bounds",
    "center",
    "vector_layers",
];

/// Canonical field names the conversion overwrites without reading the
/// legacy value. Also consumed to keep serialized keys unique, but the
/// legacy value is lost, so the drop is logged.
const DISCARDED_KEYS: &[&str] = &[
    "s2tilejson",
    "type",
    "extension",
    "encoding",
    "faces",
    "wmbounds",
    "s2bounds",
    "centerpoint",
    "attributions",
    "layers",
    "tilestats",
];

/// Converts a legacy metadata document into the canonical form.
///
/// A document already carrying the `s2tilejson` marker passes through
/// unchanged. Anything else is converted field by field: recognized legacy
/// fields are mapped, everything unrecognized lands in [`Metadata::other`].
#[must_use]
pub fn to_metadata(value: &Value) -> Metadata {
    if value.get("s2tilejson").is_some() {
        match serde_json::from_value::<Metadata>(value.clone()) {
            Ok(meta) => return meta,
            Err(e) => {
                log::warn!("document has the s2tilejson marker but does not parse: {e}");
            }
        }
    }
    convert_legacy(value)
}

fn convert_legacy(value: &Value) -> Metadata {
    let mut meta = Metadata {
        // Legacy documents always describe flat tile sets on face 0.
        faces: vec![Face::Face0],
        scheme: Scheme::Xyz,
        encoding: Encoding::None,
        ..Metadata::default()
    };

    if let Some(name) = str_field(value, "name") {
        meta.name = name.to_string();
    }
    if let Some(description) = str_field(value, "description") {
        meta.description = description.to_string();
    }
    if let Some(version) = str_field(value, "version") {
        meta.version = version.to_string();
    }
    if let Some(scheme) = str_field(value, "scheme") {
        meta.scheme = Scheme::from(scheme);
    }
    meta.minzoom = zoom_field(value, "minzoom").unwrap_or(0);
    meta.maxzoom = zoom_field(value, "maxzoom").unwrap_or(27);
    meta.bounds = bounds_field(value).unwrap_or(LonLatBounds::WORLD);
    meta.extension = extension_from_tiles(value).unwrap_or_else(|| "pbf".to_string());
    meta.centerpoint = center_field(value).unwrap_or_default();
    if let Some(attribution) = str_field(value, "attribution") {
        meta.attributions = extract_attributions(attribution);
    }
    meta.vector_layers = vector_layers_field(value);

    if let Some(obj) = value.as_object() {
        for (key, v) in obj {
            if MAPPED_KEYS.contains(&key.as_str()) {
                continue;
            }
            if DISCARDED_KEYS.contains(&key.as_str()) {
                log::warn!("dropping legacy `{key}` field superseded by a canonical value: {v}");
                continue;
            }
            // `attribution` stays carried even though it was parsed above.
            meta.other.insert(key.clone(), v.clone());
        }
    }

    meta
}

fn str_field<'a>(value: &'a Value, key: &str) -> Option<&'a str> {
    match value.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.as_str()),
        Some(other) => {
            log::warn!("ignoring non-string `{key}` field: {other}");
            None
        }
    }
}

fn zoom_field(value: &Value, key: &str) -> Option<u8> {
    let v = value.get(key)?;
    if v.is_null() {
        return None;
    }
    match v.as_u64().and_then(|z| u8::try_from(z).ok()) {
        Some(zoom) => Some(zoom),
        None => {
            log::warn!("ignoring out-of-range `{key}` field: {v}");
            None
        }
    }
}

fn bounds_field(value: &Value) -> Option<LonLatBounds> {
    let v = value.get("bounds")?;
    if v.is_null() {
        return None;
    }
    match serde_json::from_value::<LonLatBounds>(v.clone()) {
        Ok(bounds) => Some(bounds),
        Err(e) => {
            log::warn!("ignoring malformed `bounds` field: {e}");
            None
        }
    }
}

/// Reads the legacy `center` 3-tuple `[lon, lat, zoom]`.
fn center_field(value: &Value) -> Option<Center> {
    let v = value.get("center")?;
    if v.is_null() {
        return None;
    }
    let parsed = v.as_array().and_then(|tuple| {
        let lon = tuple.first()?.as_f64()?;
        let lat = tuple.get(1)?.as_f64()?;
        let zoom = tuple.get(2)?.as_u64().and_then(|z| u8::try_from(z).ok())?;
        Some(Center { lon, lat, zoom })
    });
    if parsed.is_none() {
        log::warn!("ignoring malformed `center` field: {v}");
    }
    parsed
}

/// Derives the tile extension from the first tile URL, the way the legacy
/// format implied it. `None` when there is no usable URL.
fn extension_from_tiles(value: &Value) -> Option<String> {
    let url = value.get("tiles")?.as_array()?.first()?.as_str()?;
    url.split('.').nth(1).map(str::to_string)
}

/// Pulls `name -> href` pairs out of an HTML attribution string.
///
/// Anchors missing either part are skipped; a string with no anchors yields
/// an empty map.
fn extract_attributions(attribution: &str) -> Attribution {
    let mut attributions = Attribution::new();
    for caps in ANCHOR_RE.captures_iter(attribution) {
        let href = &caps[1];
        let name = caps[2].trim();
        if !name.is_empty() && !href.is_empty() {
            attributions.insert(name.to_string(), href.to_string());
        }
    }
    attributions
}

fn vector_layers_field(value: &Value) -> Vec<VectorLayer> {
    let Some(layers) = value.get("vector_layers").and_then(Value::as_array) else {
        return Vec::new();
    };
    let mut result = Vec::with_capacity(layers.len());
    for layer in layers {
        match serde_json::from_value::<VectorLayer>(layer.clone()) {
            Ok(l) => result.push(l),
            Err(e) => log::warn!("skipping malformed vector layer: {e}"),
        }
    }
    result
}
