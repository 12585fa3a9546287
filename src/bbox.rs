//! Bounding boxes in geographic and tile-index space.
//!
//! Both flavors share one generic type serialized as the 4-element JSON
//! array `[left, bottom, right, top]`. Widening starts from an "empty"
//! sentinel box and takes the element-wise min of the lower corner and max
//! of the upper corner, so the result is the smallest enclosing box over
//! all observed inputs regardless of arrival order.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, SeqAccess, Visitor};
use serde::ser::SerializeTuple;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// An axis-aligned bounding box: `(left, bottom, right, top)`.
///
/// For geographic boxes the axes are longitude/latitude; for tile-index
/// boxes they are x/y tile columns and rows. The ordering invariant
/// (`left <= right`, `bottom <= top`) holds for any finalized box but is
/// not enforced while a box is being widened from its empty sentinel.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct BBox<T = f64> {
    /// Left-most point; the west-most longitude for geographic boxes.
    pub left: T,
    /// Bottom-most point; the south-most latitude for geographic boxes.
    pub bottom: T,
    /// Right-most point; the east-most longitude for geographic boxes.
    pub right: T,
    /// Top-most point; the north-most latitude for geographic boxes.
    pub top: T,
}

/// Geographic bounds in degrees: `[west, south, east, north]`.
pub type LonLatBounds = BBox<f64>;

/// Tile-index bounds: `[min_x, min_y, max_x, max_y]` of tile columns/rows.
pub type TileBounds = BBox<u64>;

impl<T> BBox<T> {
    /// Creates a new box from its four corners, in `(left, bottom, right, top)` order.
    pub fn new(left: T, bottom: T, right: T, top: T) -> Self {
        BBox {
            left,
            bottom,
            right,
            top,
        }
    }
}

impl<T: PartialOrd + Copy> BBox<T> {
    /// Widens this box in place so it encloses `other`.
    ///
    /// Element-wise min on `(left, bottom)`, max on `(right, top)`. The
    /// operation is associative and commutative, so boxes accumulated in
    /// parallel shards can be merged with the same rule.
    pub fn expand(&mut self, other: &Self) {
        if other.left < self.left {
            self.left = other.left;
        }
        if other.bottom < self.bottom {
            self.bottom = other.bottom;
        }
        if other.right > self.right {
            self.right = other.right;
        }
        if other.top > self.top {
            self.top = other.top;
        }
    }

    /// Widens this box in place so it encloses the point `(x, y)`.
    pub fn include(&mut self, x: T, y: T) {
        if x < self.left {
            self.left = x;
        }
        if y < self.bottom {
            self.bottom = y;
        }
        if x > self.right {
            self.right = x;
        }
        if y > self.top {
            self.top = y;
        }
    }

    /// Returns the box as `[left, bottom, right, top]`.
    pub fn as_array(&self) -> [T; 4] {
        [self.left, self.bottom, self.right, self.top]
    }
}

impl LonLatBounds {
    /// The whole world in WGS84 degrees.
    pub const WORLD: LonLatBounds = BBox {
        left: -180.0,
        bottom: -90.0,
        right: 180.0,
        top: 90.0,
    };

    /// The empty sentinel: `(+inf, +inf, -inf, -inf)`.
    ///
    /// Any `expand`/`include` replaces the sentinel corners, and a box that
    /// never saw an update keeps them, which is how "no data registered"
    /// stays detectable downstream.
    #[must_use]
    pub fn empty() -> Self {
        BBox {
            left: f64::INFINITY,
            bottom: f64::INFINITY,
            right: f64::NEG_INFINITY,
            top: f64::NEG_INFINITY,
        }
    }

    /// Longitude midpoint.
    #[must_use]
    pub fn center_lon(&self) -> f64 {
        (self.left + self.right) / 2.0
    }

    /// Latitude midpoint.
    #[must_use]
    pub fn center_lat(&self) -> f64 {
        (self.bottom + self.top) / 2.0
    }
}

impl TileBounds {
    /// The empty sentinel for tile-index space: `(u64::MAX, u64::MAX, 0, 0)`.
    #[must_use]
    pub fn empty() -> Self {
        BBox {
            left: u64::MAX,
            bottom: u64::MAX,
            right: 0,
            top: 0,
        }
    }
}

impl<T: Copy> From<[T; 4]> for BBox<T> {
    fn from(v: [T; 4]) -> Self {
        BBox::new(v[0], v[1], v[2], v[3])
    }
}

impl<T: Serialize> Serialize for BBox<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_tuple(4)?;
        seq.serialize_element(&self.left)?;
        seq.serialize_element(&self.bottom)?;
        seq.serialize_element(&self.right)?;
        seq.serialize_element(&self.top)?;
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for BBox<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BBoxVisitor<T> {
            marker: PhantomData<T>,
        }

        impl<'de, T: Deserialize<'de>> Visitor<'de> for BBoxVisitor<T> {
            type Value = BBox<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a sequence of four numbers")
            }

            fn visit_seq<V>(self, mut seq: V) -> Result<BBox<T>, V::Error>
            where
                V: SeqAccess<'de>,
            {
                let left = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let bottom = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let right = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let top = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                Ok(BBox {
                    left,
                    bottom,
                    right,
                    top,
                })
            }
        }

        deserializer.deserialize_tuple(
            4,
            BBoxVisitor {
                marker: PhantomData,
            },
        )
    }
}
