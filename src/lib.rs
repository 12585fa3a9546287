#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

mod bbox;
mod builder;
mod convert;
mod face;
mod layer;
mod metadata;
mod shape;

pub use bbox::{BBox, LonLatBounds, TileBounds};
pub use builder::MetadataBuilder;
pub use convert::to_metadata;
pub use face::{Face, FaceBounds, WmBounds};
pub use layer::{DrawType, LayerMetaData, LayersMetaData, VectorLayer};
pub use metadata::{
    Attribution, Center, Encoding, Metadata, Scheme, SourceType, TileStats,
};
pub use shape::{
    PrimitiveShape, SHAPE_SCHEMA, Shape, ShapeError, ShapePrimitiveType, ShapeType,
    validate_shape,
};
