//! The recursive shape grammar describing a layer's per-feature properties.
//!
//! Shapes exist solely to deconstruct and rebuild property bags. All keys
//! are strings; every value is a primitive type tag, a nested shape, or a
//! single-element array denoting a homogeneous array of a primitive or a
//! primitive-valued object.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON-schema document for the shape grammar, part of the public
/// contract so callers can validate shapes with any schema validator.
pub const SHAPE_SCHEMA: &str = include_str!("shape.schema.json");

/// Primitive type tags that can appear in a shape.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveShape {
    /// UTF-8 string
    String,
    /// 32-bit float
    F32,
    /// 64-bit float
    F64,
    /// Unsigned 64-bit integer
    U64,
    /// Signed 64-bit integer
    I64,
    /// Boolean
    Bool,
    /// Null
    Null,
}

impl PrimitiveShape {
    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "string" => Self::String,
            "f32" => Self::F32,
            "f64" => Self::F64,
            "u64" => Self::U64,
            "i64" => Self::I64,
            "bool" => Self::Bool,
            "null" => Self::Null,
            _ => return None,
        })
    }
}

/// Element type of a shape array: a primitive or an object whose values
/// are all primitives.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ShapePrimitiveType {
    /// A bare primitive tag
    Primitive(PrimitiveShape),
    /// A nested object restricted to primitive values
    NestedPrimitive(BTreeMap<String, PrimitiveShape>),
}

/// A value in a shape: a primitive tag, a homogeneous array, or a nested shape.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ShapeType {
    /// A bare primitive tag
    Primitive(PrimitiveShape),
    /// A single-element array naming the element type
    Array(Vec<ShapePrimitiveType>),
    /// A nested shape
    Nested(Shape),
}

/// The shape object: property name to value type.
pub type Shape = BTreeMap<String, ShapeType>;

/// Why a JSON value failed shape validation.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ShapeError {
    #[error("shape must be a JSON object")]
    NotAnObject,

    #[error("unknown primitive type tag `{1}` at key `{0}`")]
    UnknownPrimitive(String, String),

    #[error("array at key `{0}` must contain exactly one element type")]
    BadArrayArity(String),

    #[error("array element at key `{0}` must be a primitive tag or a primitive-valued object")]
    BadArrayElement(String),

    #[error("value at key `{0}` must be a primitive tag, an array, or a nested shape")]
    BadValue(String),
}

/// Validates that `value` conforms to the shape grammar.
///
/// This is the native, recursive-descent equivalent of [`SHAPE_SCHEMA`].
/// Validation cost is O(depth of the nested shape).
pub fn validate_shape(value: &Value) -> Result<(), ShapeError> {
    let obj = value.as_object().ok_or(ShapeError::NotAnObject)?;
    for (key, v) in obj {
        match v {
            Value::String(tag) => {
                if PrimitiveShape::from_tag(tag).is_none() {
                    return Err(ShapeError::UnknownPrimitive(key.clone(), tag.clone()));
                }
            }
            Value::Array(elements) => {
                if elements.len() != 1 {
                    return Err(ShapeError::BadArrayArity(key.clone()));
                }
                validate_array_element(key, &elements[0])?;
            }
            Value::Object(_) => validate_shape(v)?,
            _ => return Err(ShapeError::BadValue(key.clone())),
        }
    }
    Ok(())
}

fn validate_array_element(key: &str, element: &Value) -> Result<(), ShapeError> {
    match element {
        Value::String(tag) => {
            if PrimitiveShape::from_tag(tag).is_none() {
                return Err(ShapeError::UnknownPrimitive(key.to_string(), tag.clone()));
            }
            Ok(())
        }
        Value::Object(obj) => {
            for (nested_key, v) in obj {
                let tag = v
                    .as_str()
                    .ok_or_else(|| ShapeError::BadArrayElement(key.to_string()))?;
                if PrimitiveShape::from_tag(tag).is_none() {
                    return Err(ShapeError::UnknownPrimitive(
                        nested_key.clone(),
                        tag.to_string(),
                    ));
                }
            }
            Ok(())
        }
        _ => Err(ShapeError::BadArrayElement(key.to_string())),
    }
}
