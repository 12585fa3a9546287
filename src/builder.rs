//! Incremental construction of a [`Metadata`] document for a growing tile set.

use std::collections::BTreeSet;

use crate::{
    Center, Encoding, Face, LayerMetaData, LonLatBounds, Metadata, Scheme, SourceType, TileBounds,
    VectorLayer,
};

/// Accumulates descriptive fields and per-tile registrations, then derives
/// the finished [`Metadata`] on [`commit`](MetadataBuilder::commit).
///
/// Tile registrations only widen state, so they may arrive in any order.
/// `commit` does not consume the builder; registering more tiles and
/// committing again yields a consistent, fully re-derived document.
#[derive(Debug)]
pub struct MetadataBuilder {
    /// Running geographic bounds over every registered tile.
    lon_lat_bounds: LonLatBounds,
    /// Faces that have received at least one tile.
    faces: BTreeSet<Face>,
    metadata: Metadata,
}

impl Default for MetadataBuilder {
    fn default() -> Self {
        MetadataBuilder {
            lon_lat_bounds: LonLatBounds::empty(),
            faces: BTreeSet::new(),
            // Inverted zoom sentinels so the first registered tile or layer
            // snaps both zooms to its own. An empty commit leaves them
            // inverted, which is how "no tiles registered" stays visible.
            metadata: Metadata {
                minzoom: 30,
                maxzoom: 0,
                ..Metadata::default()
            },
        }
    }
}

impl MetadataBuilder {
    /// Finalizes the document and returns a snapshot of it.
    ///
    /// Derives the center point from the accumulated geographic bounds and
    /// zoom range, and publishes the face list in ascending order. The
    /// builder stays usable afterwards.
    pub fn commit(&mut self) -> Metadata {
        let meta = &mut self.metadata;
        meta.centerpoint = Center {
            lon: self.lon_lat_bounds.center_lon(),
            lat: self.lon_lat_bounds.center_lat(),
            // Widened before averaging: the sum of two u8 zooms can exceed
            // u8::MAX, and the midpoint itself always fits.
            zoom: ((u16::from(meta.minzoom) + u16::from(meta.maxzoom)) >> 1) as u8,
        };
        meta.bounds = self.lon_lat_bounds;
        meta.faces = self.faces.iter().copied().collect();
        meta.clone()
    }

    /// Sets the name of the data.
    pub fn set_name(&mut self, name: String) {
        self.metadata.name = name;
    }

    /// Sets the tile addressing scheme.
    pub fn set_scheme(&mut self, scheme: Scheme) {
        self.metadata.scheme = scheme;
    }

    /// Sets the kind of data.
    pub fn set_type(&mut self, source_type: SourceType) {
        self.metadata.source_type = source_type;
    }

    /// Sets the version of the data.
    pub fn set_version(&mut self, version: String) {
        self.metadata.version = version;
    }

    /// Sets the description of the data.
    pub fn set_description(&mut self, description: String) {
        self.metadata.description = description;
    }

    /// Sets the file extension used when requesting a tile.
    pub fn set_extension(&mut self, extension: String) {
        self.metadata.extension = extension;
    }

    /// Sets the content encoding of each tile.
    pub fn set_encoding(&mut self, encoding: Encoding) {
        self.metadata.encoding = encoding;
    }

    /// Records an attribution: display name to href.
    pub fn add_attribution(&mut self, display_name: &str, href: &str) {
        self.metadata
            .attributions
            .insert(display_name.to_string(), href.to_string());
    }

    /// Registers a layer blueprint under `name` and widens the document's
    /// zoom range to cover the layer's.
    ///
    /// Also appends a legacy-compatible `vector_layers` record; calling this
    /// again with the same name appends another one, matching how the
    /// serialized format has always behaved.
    pub fn add_layer(&mut self, name: &str, layer: &LayerMetaData) {
        self.metadata.layers.insert(name.to_string(), layer.clone());
        self.metadata.vector_layers.push(VectorLayer {
            id: name.to_string(),
            description: layer.description.clone(),
            minzoom: Some(layer.minzoom),
            maxzoom: Some(layer.maxzoom),
            ..VectorLayer::default()
        });
        self.update_zoom_range(layer.minzoom);
        self.update_zoom_range(layer.maxzoom);
    }

    /// Registers a Web-Mercator tile at `zoom/x/y` covering `bounds`.
    ///
    /// Flat tile sets live on face 0.
    pub fn add_tile_wm(&mut self, zoom: u8, x: u64, y: u64, bounds: &LonLatBounds) {
        self.faces.insert(Face::Face0);
        self.metadata.tilestats.increment(Face::Face0);
        self.metadata
            .wmbounds
            .entry(zoom)
            .or_insert_with(TileBounds::empty)
            .include(x, y);
        self.lon_lat_bounds.expand(bounds);
        self.update_zoom_range(zoom);
    }

    /// Registers an S2 tile at `face/zoom/x/y` covering `bounds`.
    pub fn add_tile_s2(&mut self, face: Face, zoom: u8, x: u64, y: u64, bounds: &LonLatBounds) {
        self.faces.insert(face);
        self.metadata.tilestats.increment(face);
        self.metadata
            .s2bounds
            .get_mut(face)
            .entry(zoom)
            .or_insert_with(TileBounds::empty)
            .include(x, y);
        self.lon_lat_bounds.expand(bounds);
        self.update_zoom_range(zoom);
    }

    fn update_zoom_range(&mut self, zoom: u8) {
        let meta = &mut self.metadata;
        if zoom < meta.minzoom {
            meta.minzoom = zoom;
        }
        if zoom > meta.maxzoom {
            meta.maxzoom = zoom;
        }
    }
}
