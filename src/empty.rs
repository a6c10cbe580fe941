//! The omit-empty predicate.
//!
//! [`is_empty`] reports whether a value is the zero or empty form of its
//! shape. Pair it with `skip_serializing_if` to leave such fields out of the
//! output, and with `default` so decoding fills them back in:
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_zon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
//! struct Server {
//!     host: String,
//!     #[serde(default, skip_serializing_if = "serde_zon::is_empty")]
//!     port: u16,
//!     #[serde(default, skip_serializing_if = "serde_zon::is_empty")]
//!     tags: Vec<String>,
//! }
//!
//! let server = Server { host: "localhost".into(), ..Default::default() };
//! let text = to_string(&server).unwrap();
//! assert_eq!(text, ".{.host = \"localhost\"}");
//! assert_eq!(from_str::<Server>(&text).unwrap(), server);
//! ```

use crate::Error;
use serde::ser::{self, Serialize};

/// Returns `true` when `value` is empty.
///
/// Empty means: a zero number, `false`, an empty string, a sequence or map
/// with no entries, `None`, unit, or a struct whose fields are all empty.
/// `Some(_)` and enum variants other than unit-like `()` are never empty.
///
/// # Examples
///
/// ```rust
/// use serde_zon::is_empty;
///
/// assert!(is_empty(&0));
/// assert!(is_empty(""));
/// assert!(is_empty(&Vec::<i32>::new()));
/// assert!(is_empty(&None::<i32>));
/// assert!(!is_empty(&Some(0)));
/// assert!(!is_empty(&0.5));
/// ```
pub fn is_empty<T>(value: &T) -> bool
where
    T: ?Sized + Serialize,
{
    value.serialize(EmptyProbe).unwrap_or(false)
}

struct EmptyProbe;

/// Tracks emptiness of a compound while its members are visited.
struct Probe {
    empty: bool,
}

impl ser::Serializer for EmptyProbe {
    type Ok = bool;
    type Error = Error;

    type SerializeSeq = Probe;
    type SerializeTuple = Probe;
    type SerializeTupleStruct = Probe;
    type SerializeTupleVariant = Probe;
    type SerializeMap = Probe;
    type SerializeStruct = Probe;
    type SerializeStructVariant = Probe;

    fn serialize_bool(self, v: bool) -> Result<bool, Error> {
        Ok(!v)
    }

    fn serialize_i8(self, v: i8) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_i16(self, v: i16) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_i32(self, v: i32) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_i64(self, v: i64) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_i128(self, v: i128) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_u8(self, v: u8) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_u16(self, v: u16) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_u32(self, v: u32) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_u64(self, v: u64) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_u128(self, v: u128) -> Result<bool, Error> {
        Ok(v == 0)
    }

    fn serialize_f32(self, v: f32) -> Result<bool, Error> {
        Ok(v == 0.0)
    }

    fn serialize_f64(self, v: f64) -> Result<bool, Error> {
        Ok(v == 0.0)
    }

    fn serialize_char(self, v: char) -> Result<bool, Error> {
        Ok(v == '\0')
    }

    fn serialize_str(self, v: &str) -> Result<bool, Error> {
        Ok(v.is_empty())
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<bool, Error> {
        Ok(v.is_empty())
    }

    fn serialize_none(self) -> Result<bool, Error> {
        Ok(true)
    }

    fn serialize_some<T>(self, _value: &T) -> Result<bool, Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(false)
    }

    fn serialize_unit(self) -> Result<bool, Error> {
        Ok(true)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<bool, Error> {
        Ok(true)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<bool, Error> {
        Ok(false)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<bool, Error>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<bool, Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(false)
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Probe, Error> {
        Ok(Probe { empty: true })
    }

    fn serialize_tuple(self, _len: usize) -> Result<Probe, Error> {
        Ok(Probe { empty: true })
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<Probe, Error> {
        Ok(Probe { empty: true })
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Probe, Error> {
        Ok(Probe { empty: false })
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Probe, Error> {
        Ok(Probe { empty: true })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Probe, Error> {
        Ok(Probe { empty: true })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Probe, Error> {
        Ok(Probe { empty: false })
    }
}

impl ser::SerializeSeq for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.empty = false;
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}

impl ser::SerializeTuple for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_element<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.empty = false;
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}

impl ser::SerializeTupleStruct for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.empty = false;
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}

impl ser::SerializeTupleVariant for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_field<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}

impl ser::SerializeMap for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_key<T>(&mut self, _key: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        self.empty = false;
        Ok(())
    }

    fn serialize_value<T>(&mut self, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}

impl ser::SerializeStruct for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        if self.empty {
            self.empty = is_empty(value);
        }
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}

impl ser::SerializeStructVariant for Probe {
    type Ok = bool;
    type Error = Error;

    fn serialize_field<T>(&mut self, _key: &'static str, _value: &T) -> Result<(), Error>
    where
        T: ?Sized + Serialize,
    {
        Ok(())
    }

    fn end(self) -> Result<bool, Error> {
        Ok(self.empty)
    }
}
