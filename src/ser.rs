//! ZON serialization.
//!
//! This module provides the [`Serializer`] implementation that converts Rust
//! data structures into ZON text.
//!
//! ## Overview
//!
//! - **Composites**: sequences, maps and structs all become `.{ ... }`
//! - **Keys**: map keys and field names are written as `.identifier`
//! - **Literal strings**: strings that already look like a hex literal (`0x1F`)
//!   or a dot-atom (`.red`) are written bare, everything else is quoted
//! - **Field order**: struct fields keep declaration order; generic maps keep
//!   their own iteration order unless [`ZonOptions::sort_keys`] is set
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_zon::{to_string, to_string_pretty};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! assert_eq!(to_string(&data).unwrap(), ".{.x = 1, .y = 2}");
//! assert_eq!(to_string_pretty(&data).unwrap(), ".{\n    .x = 1,\n    .y = 2,\n}");
//! ```
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use serde_zon::{Serializer, ZonOptions};
//! use serde::Serialize;
//!
//! let mut serializer = Serializer::new(ZonOptions::new());
//! vec![1, 2, 3].serialize(&mut serializer).unwrap();
//! assert_eq!(serializer.into_inner(), ".{1, 2, 3}");
//! ```

use crate::scanner::{is_dot_atom, is_hex_literal, is_identifier};
use crate::{Error, Result, ZonMap, ZonOptions, ZonValue};
use serde::ser::{Impossible, SerializeSeq, Serializer as _};
use serde::{ser, Serialize};

/// The ZON serializer.
///
/// Converts Rust values implementing `Serialize` into ZON text. Created via
/// [`Serializer::new`] with customizable options.
pub struct Serializer {
    output: String,
    options: ZonOptions,
    depth: usize,
}

impl Serializer {
    pub fn new(options: ZonOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            depth: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    fn begin_composite(&mut self) {
        self.output.push_str(".{");
        self.depth += 1;
    }

    fn begin_member(&mut self, first: bool) {
        if self.options.is_pretty() {
            self.output.push('\n');
            self.write_indent();
        } else if !first {
            self.output.push_str(", ");
        }
    }

    fn end_member(&mut self) {
        if self.options.is_pretty() {
            self.output.push(',');
        }
    }

    fn end_composite(&mut self, empty: bool) {
        self.depth -= 1;
        if self.options.is_pretty() && !empty {
            self.output.push('\n');
            self.write_indent();
        }
        self.output.push('}');
    }

    fn write_indent(&mut self) {
        for _ in 0..self.depth {
            self.output.push_str(&self.options.indent);
        }
    }

    /// Writes `.key = `. A leading dot already present on `key` is not doubled.
    fn write_key(&mut self, key: &str) -> Result<()> {
        let name = key.strip_prefix('.').unwrap_or(key);
        if !is_identifier(name) {
            return Err(Error::InvalidKey(key.to_string()));
        }
        self.output.push('.');
        self.output.push_str(name);
        self.output.push_str(" = ");
        Ok(())
    }

    /// Opens `.{.Variant = ` for an externally tagged variant.
    fn begin_variant(&mut self, variant: &str) -> Result<()> {
        self.begin_composite();
        self.begin_member(true);
        self.write_key(variant)
    }

    fn end_variant(&mut self) {
        self.end_member();
        self.end_composite(false);
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        if s.contains('"') {
            return Err(Error::UnrepresentableString(s.to_string()));
        }
        if is_hex_literal(s) || is_dot_atom(s) {
            self.output.push_str(s);
        } else {
            self.output.push('"');
            self.output.push_str(s);
            self.output.push('"');
        }
        Ok(())
    }

    #[inline]
    fn write_integer<I: itoa::Integer>(&mut self, v: I) {
        let mut buffer = itoa::Buffer::new();
        self.output.push_str(buffer.format(v));
    }

    /// Non-finite floats have no literal form and are written as `null`.
    #[inline]
    fn write_float<F: ryu::Float>(&mut self, v: F, finite: bool) {
        if finite {
            let mut buffer = ryu::Buffer::new();
            self.output.push_str(buffer.format_finite(v));
        } else {
            self.output.push_str("null");
        }
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Compound<'a>;
    type SerializeTuple = Compound<'a>;
    type SerializeTupleStruct = Compound<'a>;
    type SerializeTupleVariant = Compound<'a>;
    type SerializeMap = MapCompound<'a>;
    type SerializeStruct = Compound<'a>;
    type SerializeStructVariant = Compound<'a>;

    fn serialize_bool(self, v: bool) -> Result<Self::Ok> {
        self.output.push_str(if v { "true" } else { "false" });
        Ok(())
    }

    fn serialize_i8(self, v: i8) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_i16(self, v: i16) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_i32(self, v: i32) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_i64(self, v: i64) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_i128(self, v: i128) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_u8(self, v: u8) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_u16(self, v: u16) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_u32(self, v: u32) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_u64(self, v: u64) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_u128(self, v: u128) -> Result<Self::Ok> {
        self.write_integer(v);
        Ok(())
    }

    fn serialize_f32(self, v: f32) -> Result<Self::Ok> {
        self.write_float(v, v.is_finite());
        Ok(())
    }

    fn serialize_f64(self, v: f64) -> Result<Self::Ok> {
        self.write_float(v, v.is_finite());
        Ok(())
    }

    fn serialize_char(self, v: char) -> Result<Self::Ok> {
        let mut buf = [0u8; 4];
        self.write_string(v.encode_utf8(&mut buf))
    }

    fn serialize_str(self, v: &str) -> Result<Self::Ok> {
        self.write_string(v)
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Self::Ok> {
        let mut seq = self.serialize_seq(Some(v.len()))?;
        for byte in v {
            seq.serialize_element(byte)?;
        }
        seq.end()
    }

    fn serialize_none(self) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_some<T>(self, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Self::Ok> {
        self.output.push_str("null");
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Self::Ok> {
        self.serialize_unit()
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Self::Ok> {
        if !is_identifier(variant) {
            return Err(Error::InvalidKey(variant.to_string()));
        }
        self.output.push('.');
        self.output.push_str(variant);
        Ok(())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Self::Ok>
    where
        T: ?Sized + Serialize,
    {
        self.begin_variant(variant)?;
        value.serialize(&mut *self)?;
        self.end_variant();
        Ok(())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        self.begin_composite();
        Ok(Compound::new(self, false))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        self.serialize_seq(Some(len))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        self.begin_variant(variant)?;
        self.begin_composite();
        Ok(Compound::new(self, true))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        self.begin_composite();
        let sorted = if self.options.sort_keys {
            Some(Vec::new())
        } else {
            None
        };
        Ok(MapCompound {
            ser: self,
            first: true,
            sorted,
            pending_key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        self.begin_composite();
        Ok(Compound::new(self, false))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        self.begin_variant(variant)?;
        self.begin_composite();
        Ok(Compound::new(self, true))
    }
}

/// Writes the members of a sequence, tuple or struct composite.
///
/// For variants the composite sits inside `.{.Variant = ...}`, which `end`
/// closes as well.
pub struct Compound<'a> {
    ser: &'a mut Serializer,
    first: bool,
    variant: bool,
}

impl<'a> Compound<'a> {
    fn new(ser: &'a mut Serializer, variant: bool) -> Self {
        Compound {
            ser,
            first: true,
            variant,
        }
    }

    fn element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.begin_member(self.first);
        self.first = false;
        value.serialize(&mut *self.ser)?;
        self.ser.end_member();
        Ok(())
    }

    fn field<T>(&mut self, key: &str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.ser.begin_member(self.first);
        self.first = false;
        self.ser.write_key(key)?;
        value.serialize(&mut *self.ser)?;
        self.ser.end_member();
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.ser.end_composite(self.first);
        if self.variant {
            self.ser.end_variant();
        }
        Ok(())
    }
}

impl<'a> ser::SerializeSeq for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTuple for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleStruct for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeTupleVariant for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.element(value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeStruct for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

impl<'a> ser::SerializeStructVariant for Compound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.field(key, value)
    }

    fn end(self) -> Result<Self::Ok> {
        self.finish()
    }
}

/// Writes a generic map. With `sort_keys` set, entries are rendered into a
/// buffer first and written in key order at the end.
pub struct MapCompound<'a> {
    ser: &'a mut Serializer,
    first: bool,
    sorted: Option<Vec<(String, String)>>,
    pending_key: Option<String>,
}

impl<'a> ser::SerializeMap for MapCompound<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = key.serialize(MapKeySerializer)?;
        if self.sorted.is_some() {
            self.pending_key = Some(key);
        } else {
            self.ser.begin_member(self.first);
            self.first = false;
            self.ser.write_key(&key)?;
        }
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match self.sorted.as_mut() {
            Some(entries) => {
                let key = self
                    .pending_key
                    .take()
                    .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
                let outer = std::mem::take(&mut self.ser.output);
                let result = value.serialize(&mut *self.ser);
                let rendered = std::mem::replace(&mut self.ser.output, outer);
                result?;
                entries.push((key, rendered));
            }
            None => {
                value.serialize(&mut *self.ser)?;
                self.ser.end_member();
            }
        }
        Ok(())
    }

    fn end(self) -> Result<Self::Ok> {
        let mut first = self.first;
        if let Some(mut entries) = self.sorted {
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (key, rendered) in entries {
                self.ser.begin_member(first);
                first = false;
                self.ser.write_key(&key)?;
                self.ser.output.push_str(&rendered);
                self.ser.end_member();
            }
        }
        self.ser.end_composite(first);
        Ok(())
    }
}

fn key_must_be_a_string() -> Error {
    Error::unsupported_type("map keys must be strings, integers, chars or bools")
}

/// Turns a map key into its text. Validation as an identifier happens when
/// the key is written.
struct MapKeySerializer;

impl ser::Serializer for MapKeySerializer {
    type Ok = String;
    type Error = Error;

    type SerializeSeq = Impossible<String, Error>;
    type SerializeTuple = Impossible<String, Error>;
    type SerializeTupleStruct = Impossible<String, Error>;
    type SerializeTupleVariant = Impossible<String, Error>;
    type SerializeMap = Impossible<String, Error>;
    type SerializeStruct = Impossible<String, Error>;
    type SerializeStructVariant = Impossible<String, Error>;

    fn serialize_bool(self, v: bool) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_i8(self, v: i8) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_i16(self, v: i16) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_i32(self, v: i32) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_i64(self, v: i64) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_u16(self, v: u16) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_u32(self, v: u32) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_u64(self, v: u64) -> Result<String> {
        Ok(itoa::Buffer::new().format(v).to_string())
    }

    fn serialize_f32(self, _v: f32) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_f64(self, _v: f64) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_char(self, v: char) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<String> {
        Ok(v.to_string())
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_none(self) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_some<T>(self, value: &T) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<String> {
        Err(key_must_be_a_string())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<String> {
        Ok(variant.to_string())
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<String>
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
    ) -> Result<String>
    where
        T: ?Sized + Serialize,
    {
        Err(key_must_be_a_string())
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(key_must_be_a_string())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(key_must_be_a_string())
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(key_must_be_a_string())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(key_must_be_a_string())
    }
}

/// Serializer producing a [`ZonValue`] tree, for [`to_value`](crate::to_value).
///
/// Unit variants become strings holding the variant name, as a decoded
/// `.Variant` would; other variants become single-entry objects keyed by the
/// variant name.
pub struct ZonValueSerializer;

pub struct SerializeVec {
    vec: Vec<ZonValue>,
    variant: Option<String>,
}

pub struct SerializeMap {
    map: ZonMap,
    current_key: Option<String>,
    variant: Option<String>,
}

/// Wraps a variant payload as `{Variant: payload}`.
fn tagged(variant: &str, payload: ZonValue) -> ZonValue {
    let mut map = ZonMap::with_capacity(1);
    map.insert(variant.to_string(), payload);
    ZonValue::Object(map)
}

fn strip_key_dot(key: String) -> String {
    match key.strip_prefix('.') {
        Some(name) => name.to_string(),
        None => key,
    }
}

impl ser::Serializer for ZonValueSerializer {
    type Ok = ZonValue;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<ZonValue> {
        Ok(ZonValue::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<ZonValue> {
        Ok(ZonValue::Int(i64::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<ZonValue> {
        Ok(ZonValue::Int(i64::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<ZonValue> {
        Ok(ZonValue::Int(i64::from(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<ZonValue> {
        Ok(ZonValue::Int(v))
    }

    fn serialize_i128(self, v: i128) -> Result<ZonValue> {
        i64::try_from(v)
            .map(ZonValue::Int)
            .map_err(|_| Error::unsupported_type("i128 outside the i64 range"))
    }

    fn serialize_u8(self, v: u8) -> Result<ZonValue> {
        Ok(ZonValue::UInt(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<ZonValue> {
        Ok(ZonValue::UInt(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<ZonValue> {
        Ok(ZonValue::UInt(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<ZonValue> {
        Ok(ZonValue::UInt(v))
    }

    fn serialize_u128(self, v: u128) -> Result<ZonValue> {
        u64::try_from(v)
            .map(ZonValue::UInt)
            .map_err(|_| Error::unsupported_type("u128 outside the u64 range"))
    }

    fn serialize_f32(self, v: f32) -> Result<ZonValue> {
        Ok(ZonValue::Float(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<ZonValue> {
        Ok(ZonValue::Float(v))
    }

    fn serialize_char(self, v: char) -> Result<ZonValue> {
        Ok(ZonValue::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<ZonValue> {
        Ok(ZonValue::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<ZonValue> {
        Ok(v.iter().map(|&b| ZonValue::UInt(u64::from(b))).collect())
    }

    fn serialize_none(self) -> Result<ZonValue> {
        Ok(ZonValue::Null)
    }

    fn serialize_some<T>(self, value: &T) -> Result<ZonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<ZonValue> {
        Ok(ZonValue::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<ZonValue> {
        Ok(ZonValue::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<ZonValue> {
        Ok(ZonValue::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<ZonValue>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<ZonValue>
    where
        T: ?Sized + Serialize,
    {
        Ok(tagged(variant, to_zon_value(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<SerializeVec> {
        Ok(SerializeVec::new(len, Some(variant.to_string())))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new(None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Ok(SerializeMap::new(Some(variant.to_string())))
    }
}

impl SerializeVec {
    fn new(capacity: usize, variant: Option<String>) -> Self {
        SerializeVec {
            vec: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn finish(self) -> ZonValue {
        let array = ZonValue::Array(self.vec);
        match self.variant {
            Some(variant) => tagged(&variant, array),
            None => array,
        }
    }
}

impl SerializeMap {
    fn new(variant: Option<String>) -> Self {
        SerializeMap {
            map: ZonMap::new(),
            current_key: None,
            variant,
        }
    }

    fn finish(self) -> ZonValue {
        let object = ZonValue::Object(self.map);
        match self.variant {
            Some(variant) => tagged(&variant, object),
            None => object,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.current_key = Some(strip_key_dot(key.serialize(MapKeySerializer)?));
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(strip_key_dot(key.to_string()), to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = ZonValue;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map
            .insert(strip_key_dot(key.to_string()), to_zon_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<ZonValue> {
        Ok(self.finish())
    }
}

fn to_zon_value<T: Serialize + ?Sized>(value: &T) -> Result<ZonValue> {
    value.serialize(ZonValueSerializer)
}
