//! Dynamic value representation for ZON data.
//!
//! [`ZonValue`] (also exported as [`Value`](crate::Value)) holds any ZON
//! document when the destination shape isn't known at compile time. It is what
//! decoding produces for a dynamic slot.
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_zon::{zon, ZonValue};
//!
//! let null = ZonValue::Null;
//! let number = ZonValue::from(42);
//! let text = ZonValue::from("hello");
//!
//! let obj = zon!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! assert!(obj.is_object());
//! ```
//!
//! ### Decoding Without a Schema
//!
//! ```rust
//! use serde_zon::{from_str, ZonValue};
//!
//! let value: ZonValue = from_str(".{ .color = .red, .mask = 0xFF, .tags = .{1, 2} }").unwrap();
//! let obj = value.as_object().unwrap();
//! assert_eq!(obj.get("color"), Some(&ZonValue::String("red".to_string())));
//! assert_eq!(obj.get("mask"), Some(&ZonValue::UInt(255)));
//! ```
//!
//! ### Numeric Kinds
//!
//! Integers decode as [`ZonValue::Int`], hex literals as [`ZonValue::UInt`], and
//! anything with a fraction or exponent as [`ZonValue::Float`]. Equality does not
//! coerce between kinds: `Int(1) != UInt(1) != Float(1.0)`.

use crate::ZonMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed representation of any valid ZON value.
///
/// # Examples
///
/// ```rust
/// use serde_zon::ZonValue;
///
/// let null = ZonValue::Null;
/// let num = ZonValue::Int(42);
/// let text = ZonValue::String("hello".to_string());
///
/// assert!(null.is_null());
/// assert!(num.is_number());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum ZonValue {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    /// Unsigned integers; hex literals decode to this kind.
    UInt(u64),
    Float(f64),
    String(String),
    Array(Vec<ZonValue>),
    Object(ZonMap),
}

impl ZonValue {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, ZonValue::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self, ZonValue::Bool(_))
    }

    /// Returns `true` for any of the three numeric kinds.
    #[inline]
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            ZonValue::Int(_) | ZonValue::UInt(_) | ZonValue::Float(_)
        )
    }

    #[inline]
    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self, ZonValue::Float(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, ZonValue::String(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, ZonValue::Array(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, ZonValue::Object(_))
    }

    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ZonValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Returns the value as `i64` when it is an integer that fits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::ZonValue;
    ///
    /// assert_eq!(ZonValue::Int(-3).as_i64(), Some(-3));
    /// assert_eq!(ZonValue::UInt(31).as_i64(), Some(31));
    /// assert_eq!(ZonValue::UInt(u64::MAX).as_i64(), None);
    /// assert_eq!(ZonValue::Float(1.0).as_i64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            ZonValue::Int(i) => Some(*i),
            ZonValue::UInt(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    /// Returns the value as `u64` when it is a non-negative integer.
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            ZonValue::Int(i) => u64::try_from(*i).ok(),
            ZonValue::UInt(u) => Some(*u),
            _ => None,
        }
    }

    /// Returns any numeric value widened to `f64`.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            ZonValue::Int(i) => Some(*i as f64),
            ZonValue::UInt(u) => Some(*u as f64),
            ZonValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ZonValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<ZonValue>> {
        match self {
            ZonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array_mut(&mut self) -> Option<&mut Vec<ZonValue>> {
        match self {
            ZonValue::Array(arr) => Some(arr),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ZonMap> {
        match self {
            ZonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object_mut(&mut self) -> Option<&mut ZonMap> {
        match self {
            ZonValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Looks up `key` when the value is an object.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::zon;
    ///
    /// let value = zon!({ "port": 8080 });
    /// assert_eq!(value.get("port").and_then(|v| v.as_i64()), Some(8080));
    /// assert!(value.get("host").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&ZonValue> {
        self.as_object().and_then(|obj| obj.get(key))
    }

    /// Replaces the value with `Null` and returns the previous one.
    pub fn take(&mut self) -> ZonValue {
        std::mem::take(self)
    }
}

/// Renders ZON text through the same encoder as [`crate::to_string`]; the
/// alternate form (`{:#}`) is pretty-printed.
///
/// Values the encoder rejects, such as a string holding `"` or a key that is
/// not an identifier, make formatting fail with [`fmt::Error`].
impl fmt::Display for ZonValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = if f.alternate() {
            crate::ZonOptions::pretty()
        } else {
            crate::ZonOptions::new()
        };
        let mut ser = crate::ser::Serializer::new(options);
        self.serialize(&mut ser).map_err(|_| fmt::Error)?;
        f.write_str(&ser.into_inner())
    }
}

impl Serialize for ZonValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            ZonValue::Null => serializer.serialize_unit(),
            ZonValue::Bool(b) => serializer.serialize_bool(*b),
            ZonValue::Int(i) => serializer.serialize_i64(*i),
            ZonValue::UInt(u) => serializer.serialize_u64(*u),
            ZonValue::Float(f) => serializer.serialize_f64(*f),
            ZonValue::String(s) => serializer.serialize_str(s),
            ZonValue::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            ZonValue::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for ZonValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ZonValueVisitor;

        impl<'de> Visitor<'de> for ZonValueVisitor {
            type Value = ZonValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any valid ZON value")
            }

            fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E> {
                Ok(ZonValue::Bool(value))
            }

            fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E> {
                Ok(ZonValue::Int(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E> {
                Ok(ZonValue::UInt(value))
            }

            fn visit_i128<E: de::Error>(self, value: i128) -> Result<Self::Value, E> {
                i64::try_from(value)
                    .map(ZonValue::Int)
                    .map_err(|_| E::custom(format!("integer {} out of range", value)))
            }

            fn visit_u128<E: de::Error>(self, value: u128) -> Result<Self::Value, E> {
                u64::try_from(value)
                    .map(ZonValue::UInt)
                    .map_err(|_| E::custom(format!("integer {} out of range", value)))
            }

            fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E> {
                Ok(ZonValue::Float(value))
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E> {
                Ok(ZonValue::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> Result<Self::Value, E> {
                Ok(ZonValue::String(value))
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E> {
                Ok(ZonValue::Null)
            }

            fn visit_none<E>(self) -> Result<Self::Value, E> {
                Ok(ZonValue::Null)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(ZonValue::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ZonMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(ZonValue::Object(values))
            }
        }

        deserializer.deserialize_any(ZonValueVisitor)
    }
}

impl TryFrom<ZonValue> for i64 {
    type Error = crate::Error;

    fn try_from(value: ZonValue) -> crate::Result<Self> {
        match value {
            ZonValue::Float(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
                Ok(f as i64)
            }
            other => other.as_i64().ok_or_else(|| {
                crate::Error::custom(format!("expected integer, found {:?}", other))
            }),
        }
    }
}

impl TryFrom<ZonValue> for u64 {
    type Error = crate::Error;

    fn try_from(value: ZonValue) -> crate::Result<Self> {
        value.as_u64().ok_or_else(|| {
            crate::Error::custom(format!("expected unsigned integer, found {:?}", value))
        })
    }
}

impl TryFrom<ZonValue> for f64 {
    type Error = crate::Error;

    fn try_from(value: ZonValue) -> crate::Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| crate::Error::custom(format!("expected number, found {:?}", value)))
    }
}

impl TryFrom<ZonValue> for bool {
    type Error = crate::Error;

    fn try_from(value: ZonValue) -> crate::Result<Self> {
        match value {
            ZonValue::Bool(b) => Ok(b),
            _ => Err(crate::Error::custom(format!(
                "expected bool, found {:?}",
                value
            ))),
        }
    }
}

impl TryFrom<ZonValue> for String {
    type Error = crate::Error;

    fn try_from(value: ZonValue) -> crate::Result<Self> {
        match value {
            ZonValue::String(s) => Ok(s),
            _ => Err(crate::Error::custom(format!(
                "expected string, found {:?}",
                value
            ))),
        }
    }
}

macro_rules! from_signed {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for ZonValue {
                fn from(value: $ty) -> Self {
                    ZonValue::Int(i64::from(value))
                }
            }
        )*
    };
}

macro_rules! from_unsigned {
    ($($ty:ty)*) => {
        $(
            impl From<$ty> for ZonValue {
                fn from(value: $ty) -> Self {
                    ZonValue::UInt(u64::from(value))
                }
            }
        )*
    };
}

from_signed!(i8 i16 i32 i64);
from_unsigned!(u8 u16 u32 u64);

impl From<bool> for ZonValue {
    fn from(value: bool) -> Self {
        ZonValue::Bool(value)
    }
}

impl From<f32> for ZonValue {
    fn from(value: f32) -> Self {
        ZonValue::Float(f64::from(value))
    }
}

impl From<f64> for ZonValue {
    fn from(value: f64) -> Self {
        ZonValue::Float(value)
    }
}

impl From<String> for ZonValue {
    fn from(value: String) -> Self {
        ZonValue::String(value)
    }
}

impl From<&str> for ZonValue {
    fn from(value: &str) -> Self {
        ZonValue::String(value.to_string())
    }
}

impl<T: Into<ZonValue>> From<Option<T>> for ZonValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ZonValue::Null, Into::into)
    }
}

impl From<Vec<ZonValue>> for ZonValue {
    fn from(value: Vec<ZonValue>) -> Self {
        ZonValue::Array(value)
    }
}

impl From<ZonMap> for ZonValue {
    fn from(value: ZonMap) -> Self {
        ZonValue::Object(value)
    }
}

impl FromIterator<ZonValue> for ZonValue {
    fn from_iter<I: IntoIterator<Item = ZonValue>>(iter: I) -> Self {
        ZonValue::Array(iter.into_iter().collect())
    }
}
