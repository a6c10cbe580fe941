//! ZON deserialization.
//!
//! This module provides the [`Deserializer`] implementation that parses ZON
//! text into Rust data structures.
//!
//! ## Overview
//!
//! - **Shape-driven parsing**: a `.{ ... }` composite is read as a sequence or as
//!   a map depending on what the destination asks for
//! - **Streaming composites**: elements are decoded straight from the input, so
//!   nested destinations keep steering the grammar
//! - **Dynamic fallback**: `deserialize_any` infers the shape from the text
//! - **Null as zero**: `null` into a non-optional destination yields its zero value
//! - **Unknown fields**: struct fields absent from the destination are skipped
//!
//! ## Usage
//!
//! Most users should use the high-level functions in the crate root:
//!
//! ```rust
//! use serde_zon::from_str;
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Data { x: i32, y: i32 }
//!
//! let data: Data = from_str(".{ .x = 1, .y = 2, .z = 3 }").unwrap();
//! assert_eq!(data, Data { x: 1, y: 2 });
//! ```
//!
//! ## Numbers
//!
//! ```rust
//! use serde_zon::from_str;
//!
//! let nums: Vec<u8> = from_str(".{0x1F, 2, 3,}").unwrap();
//! assert_eq!(nums, vec![31, 2, 3]);
//!
//! // Overflow is an error, never a silent truncation
//! assert!(from_str::<u8>("256").is_err());
//! ```

use crate::scanner::{is_hex_literal, NumberToken, Scanner};
use crate::{Error, Result, ZonMap, ZonValue};
use serde::de::value::{BorrowedStrDeserializer, StringDeserializer};
use serde::de::{self, Deserializer as _, IntoDeserializer};
use serde::forward_to_deserialize_any;

/// Composites nested deeper than this fail with [`Error::DepthLimitExceeded`].
pub const DEFAULT_DEPTH_LIMIT: usize = 128;

/// The ZON deserializer.
///
/// Parses ZON text into Rust values implementing `Deserialize`. Created via
/// [`Deserializer::from_slice`] or [`Deserializer::from_str`]; call
/// [`Deserializer::end`] after the value to reject trailing input.
pub struct Deserializer<'de> {
    scanner: Scanner<'de>,
    depth: usize,
    depth_limit: usize,
}

impl<'de> Deserializer<'de> {
    pub fn from_slice(input: &'de [u8]) -> Self {
        Deserializer {
            scanner: Scanner::new(input),
            depth: 0,
            depth_limit: DEFAULT_DEPTH_LIMIT,
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'de str) -> Self {
        Self::from_slice(input.as_bytes())
    }

    /// Overrides the maximum composite nesting depth.
    #[must_use]
    pub fn with_depth_limit(mut self, depth_limit: usize) -> Self {
        self.depth_limit = depth_limit;
        self
    }

    /// Checks that only whitespace and comments remain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::{Deserializer, Error};
    /// use serde::Deserialize;
    ///
    /// let mut de = Deserializer::from_str("42 // answer\n");
    /// let n = i32::deserialize(&mut de).unwrap();
    /// assert_eq!(n, 42);
    /// assert!(de.end().is_ok());
    ///
    /// let mut de = Deserializer::from_str("42 43");
    /// i32::deserialize(&mut de).unwrap();
    /// assert!(matches!(de.end(), Err(Error::TrailingCharacters { .. })));
    /// ```
    pub fn end(&mut self) -> Result<()> {
        self.scanner.skip_trivia();
        if self.scanner.at_end() {
            Ok(())
        } else {
            Err(Error::TrailingCharacters {
                position: self.scanner.position(),
            })
        }
    }

    /// Skips trivia and returns the first byte of the next value.
    fn begin_value(&mut self) -> Result<u8> {
        self.scanner.skip_trivia();
        self.scanner.peek().ok_or_else(|| self.scanner.error_end())
    }

    fn eat_null(&mut self) -> bool {
        self.scanner.eat_keyword("null")
    }

    fn enter(&mut self) -> Result<()> {
        if self.depth >= self.depth_limit {
            return Err(Error::DepthLimitExceeded {
                position: self.scanner.position(),
            });
        }
        self.depth += 1;
        Ok(())
    }

    /// Consumes any separators left after the last member, then the closer.
    fn end_composite(&mut self) -> Result<()> {
        self.scanner.skip_separators();
        self.scanner.expect(b'}', "`}`")?;
        self.depth -= 1;
        Ok(())
    }

    fn invalid_number(&self, token: &NumberToken<'_>) -> Error {
        Error::InvalidNumber {
            position: self.scanner.position_at(token.start),
            literal: token.text.to_string(),
        }
    }

    fn parse_bool(&mut self) -> Result<bool> {
        if self.scanner.eat_keyword("true") {
            Ok(true)
        } else if self.scanner.eat_keyword("false") {
            Ok(false)
        } else {
            Err(Error::InvalidBoolean {
                position: self.scanner.position(),
            })
        }
    }

    fn parse_signed<T: TryFrom<i128>>(&mut self) -> Result<T> {
        let token = self.scanner.scan_integer(true);
        if token.text.is_empty() {
            return Err(self.scanner.error_expected("integer"));
        }
        let value = match token.hex_digits {
            // Negated in unsigned space so `-0x8000...` reaches i128::MIN.
            Some(digits) => u128::from_str_radix(digits, 16).ok().and_then(|m| {
                if token.negative {
                    0i128.checked_sub_unsigned(m)
                } else {
                    i128::try_from(m).ok()
                }
            }),
            None => token.text.parse::<i128>().ok(),
        };
        value
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| self.invalid_number(&token))
    }

    /// Unsigned destinations take no sign, not even `+`.
    fn parse_unsigned<T: TryFrom<u128>>(&mut self) -> Result<T> {
        let token = self.scanner.scan_integer(true);
        if token.text.is_empty() {
            return Err(self.scanner.error_expected("integer"));
        }
        let value = if token.text.starts_with(['+', '-']) {
            None
        } else {
            match token.hex_digits {
                Some(digits) => u128::from_str_radix(digits, 16).ok(),
                None => token.text.parse::<u128>().ok(),
            }
        };
        value
            .and_then(|v| T::try_from(v).ok())
            .ok_or_else(|| self.invalid_number(&token))
    }

    /// Floats are read from a run of digits and `. e E + -`. A hex integer
    /// literal is also accepted and converted. A literal out of range for `F`
    /// is an error rather than an infinity.
    fn parse_float<F>(&mut self, from_hex: fn(u128) -> F) -> Result<F>
    where
        F: std::str::FromStr + std::ops::Neg<Output = F> + Copy + Into<f64>,
    {
        let token = self.scanner.scan_number();
        if token.text.is_empty() {
            return Err(self.scanner.error_expected("number"));
        }
        let value = match token.hex_digits {
            Some(digits) => u128::from_str_radix(digits, 16).ok().map(|m| {
                let f = from_hex(m);
                if token.negative {
                    -f
                } else {
                    f
                }
            }),
            None => token.text.parse::<F>().ok(),
        };
        value
            .filter(|v| Into::<f64>::into(*v).is_finite())
            .ok_or_else(|| self.invalid_number(&token))
    }

    /// String destinations read a quoted string. Dot-atoms and hex literals are
    /// accepted as their own text, since that is how such strings are encoded.
    fn parse_str(&mut self) -> Result<&'de str> {
        match self.scanner.peek() {
            Some(b'"') => self.scanner.scan_quoted(),
            Some(b'.') if self.scanner.at_dot_atom() => self.scanner.scan_dot_atom(),
            Some(b'0') if matches!(self.scanner.peek_at(1), Some(b'x' | b'X')) => {
                let token = self.scanner.scan_integer(false);
                if is_hex_literal(token.text) {
                    Ok(token.text)
                } else {
                    Err(self.invalid_number(&token))
                }
            }
            _ => Err(self.scanner.error_expected("string")),
        }
    }

    /// Reads a bare number and picks its kind from the text: hex is unsigned,
    /// a `.`, `e` or `E` makes a float, anything else is a signed integer.
    fn parse_number_dynamic<V>(&mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let token = self.scanner.scan_number();
        if let Some(digits) = token.hex_digits {
            let magnitude =
                u64::from_str_radix(digits, 16).map_err(|_| self.invalid_number(&token))?;
            return if token.negative {
                let value = i64::try_from(-i128::from(magnitude))
                    .map_err(|_| self.invalid_number(&token))?;
                visitor.visit_i64(value)
            } else {
                visitor.visit_u64(magnitude)
            };
        }
        if token.is_float() {
            return match token.text.parse::<f64>() {
                Ok(value) if value.is_finite() => visitor.visit_f64(value),
                _ => Err(self.invalid_number(&token)),
            };
        }
        match token.text.parse::<i64>() {
            Ok(value) => visitor.visit_i64(value),
            // Past i64::MAX but still representable unsigned.
            Err(_) => match token.text.trim_start_matches('+').parse::<u64>() {
                Ok(value) => visitor.visit_u64(value),
                Err(_) => Err(self.invalid_number(&token)),
            },
        }
    }

    /// Reads a composite whose shape is unknown: a `.key =` right after the
    /// opener makes it a map, anything else (including `.{}`) a sequence.
    fn parse_composite_dynamic<V>(&mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.scanner.expect_composite()?;
        self.enter()?;
        self.scanner.skip_separators();
        let value = if self.scanner.looks_like_key() {
            visitor.visit_map(Composite::new(self))?
        } else {
            visitor.visit_seq(Composite::new(self))?
        };
        self.end_composite()?;
        Ok(value)
    }

    fn parse_seq<V>(&mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.scanner.expect_composite()?;
        self.enter()?;
        let value = visitor.visit_seq(Composite::new(self))?;
        self.end_composite()?;
        Ok(value)
    }

    fn parse_map<V>(&mut self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.scanner.expect_composite()?;
        self.enter()?;
        let value = visitor.visit_map(Composite::new(self))?;
        self.end_composite()?;
        Ok(value)
    }
}

macro_rules! deserialize_integer {
    ($($method:ident => $visit:ident, $parse:ident::<$ty:ty>;)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                self.begin_value()?;
                if self.eat_null() {
                    return ZeroDeserializer.$method(visitor);
                }
                visitor.$visit(self.$parse::<$ty>()?)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for &mut Deserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.begin_value()? {
            b'"' => visitor.visit_borrowed_str(self.scanner.scan_quoted()?),
            b'.' if self.scanner.at_composite() => self.parse_composite_dynamic(visitor),
            b'.' => {
                let atom = self.scanner.scan_dot_atom()?;
                visitor.visit_borrowed_str(&atom[1..])
            }
            b'0'..=b'9' | b'+' | b'-' => self.parse_number_dynamic(visitor),
            _ if self.eat_null() => visitor.visit_unit(),
            _ if self.scanner.eat_keyword("true") => visitor.visit_bool(true),
            _ if self.scanner.eat_keyword("false") => visitor.visit_bool(false),
            _ => {
                // Bare identifiers are taken as opaque strings.
                let ident = self.scanner.scan_identifier();
                if ident.is_empty() {
                    Err(self.scanner.error_expected("value"))
                } else {
                    visitor.visit_borrowed_str(ident)
                }
            }
        }
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_bool(visitor);
        }
        visitor.visit_bool(self.parse_bool()?)
    }

    deserialize_integer! {
        deserialize_i8 => visit_i8, parse_signed::<i8>;
        deserialize_i16 => visit_i16, parse_signed::<i16>;
        deserialize_i32 => visit_i32, parse_signed::<i32>;
        deserialize_i64 => visit_i64, parse_signed::<i64>;
        deserialize_i128 => visit_i128, parse_signed::<i128>;
        deserialize_u8 => visit_u8, parse_unsigned::<u8>;
        deserialize_u16 => visit_u16, parse_unsigned::<u16>;
        deserialize_u32 => visit_u32, parse_unsigned::<u32>;
        deserialize_u64 => visit_u64, parse_unsigned::<u64>;
        deserialize_u128 => visit_u128, parse_unsigned::<u128>;
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_f32(visitor);
        }
        visitor.visit_f32(self.parse_float(|m| m as f32)?)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_f64(visitor);
        }
        visitor.visit_f64(self.parse_float(|m| m as f64)?)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_str(visitor);
        }
        visitor.visit_borrowed_str(self.parse_str()?)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_seq(visitor)
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            visitor.visit_unit()
        } else {
            Err(self.scanner.error_expected("`null`"))
        }
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_unit(visitor)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_seq(visitor);
        }
        self.parse_seq(visitor)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_tuple(len, visitor);
        }
        self.parse_seq(visitor)
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_map(visitor);
        }
        self.parse_map(visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.begin_value()?;
        if self.eat_null() {
            return ZeroDeserializer.deserialize_struct(name, fields, visitor);
        }
        self.parse_map(visitor)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.begin_value()? {
            b'"' => {
                let variant = self.scanner.scan_quoted()?;
                visitor.visit_enum(BorrowedStrDeserializer::new(variant))
            }
            b'.' if self.scanner.at_composite() => {
                self.scanner.expect_composite()?;
                self.enter()?;
                self.scanner.skip_separators();
                let variant = self.scanner.scan_key()?;
                self.scanner.skip_trivia();
                self.scanner.expect(b'=', "`=`")?;
                let value = visitor.visit_enum(Variant {
                    de: &mut *self,
                    variant,
                })?;
                self.end_composite()?;
                Ok(value)
            }
            b'.' => {
                let atom = self.scanner.scan_dot_atom()?;
                visitor.visit_enum(BorrowedStrDeserializer::new(&atom[1..]))
            }
            _ if self.eat_null() => ZeroDeserializer.deserialize_enum(name, variants, visitor),
            _ => {
                let ident = self.scanner.scan_identifier();
                if ident.is_empty() {
                    Err(self.scanner.error_expected("enum variant"))
                } else {
                    visitor.visit_enum(BorrowedStrDeserializer::new(ident))
                }
            }
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_str(visitor)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_any(visitor)
    }
}

/// Members of one `.{ ... }` composite, read from the live input.
///
/// Bare commas between members are skipped, so empty elements and a trailing
/// comma are tolerated. The closer is left for [`Deserializer::end_composite`].
struct Composite<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
}

impl<'a, 'de> Composite<'a, 'de> {
    fn new(de: &'a mut Deserializer<'de>) -> Self {
        Composite { de }
    }

    /// Returns `false` at the closer.
    fn has_next(&mut self) -> Result<bool> {
        self.de.scanner.skip_separators();
        match self.de.scanner.peek() {
            None => Err(self.de.scanner.error_end()),
            Some(b'}') => Ok(false),
            Some(_) => Ok(true),
        }
    }
}

impl<'de, 'a> de::SeqAccess<'de> for Composite<'a, 'de> {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if !self.has_next()? {
            return Ok(None);
        }
        seed.deserialize(&mut *self.de).map(Some)
    }
}

impl<'de, 'a> de::MapAccess<'de> for Composite<'a, 'de> {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        if !self.has_next()? {
            return Ok(None);
        }
        let key = self.de.scanner.scan_key()?;
        seed.deserialize(KeyDeserializer { key }).map(Some)
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        self.de.scanner.skip_trivia();
        self.de.scanner.expect(b'=', "`=`")?;
        seed.deserialize(&mut *self.de)
    }
}

/// The payload of an externally tagged `.{.Variant = value}`.
struct Variant<'a, 'de: 'a> {
    de: &'a mut Deserializer<'de>,
    variant: &'de str,
}

impl<'de, 'a> de::EnumAccess<'de> for Variant<'a, 'de> {
    type Error = Error;
    type Variant = Self;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(BorrowedStrDeserializer::<Error>::new(self.variant))?;
        Ok((variant, self))
    }
}

impl<'de, 'a> de::VariantAccess<'de> for Variant<'a, 'de> {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        de::Deserialize::deserialize(&mut *self.de)
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        seed.deserialize(&mut *self.de)
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(&mut *self.de, visitor)
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(&mut *self.de, visitor)
    }
}

/// Deserializes a map key (the identifier after `.`). Integer destinations
/// parse the identifier text, so `.{.1 = "a"}` fills a `HashMap<u32, String>`.
struct KeyDeserializer<'de> {
    key: &'de str,
}

macro_rules! deserialize_key_integer {
    ($($method:ident => $visit:ident: $ty:ty,)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                match self.key.parse::<$ty>() {
                    Ok(value) => visitor.$visit(value),
                    Err(_) => Err(Error::InvalidKey(self.key.to_string())),
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for KeyDeserializer<'de> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str(self.key)
    }

    deserialize_key_integer! {
        deserialize_i8 => visit_i8: i8,
        deserialize_i16 => visit_i16: i16,
        deserialize_i32 => visit_i32: i32,
        deserialize_i64 => visit_i64: i64,
        deserialize_u8 => visit_u8: u8,
        deserialize_u16 => visit_u16: u16,
        deserialize_u32 => visit_u32: u32,
        deserialize_u64 => visit_u64: u64,
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_enum(BorrowedStrDeserializer::new(self.key))
    }

    forward_to_deserialize_any! {
        bool i128 u128 f32 f64 char str string bytes byte_buf unit unit_struct
        seq tuple tuple_struct map struct identifier ignored_any
    }
}

/// Produces the zero value of whatever shape is requested. Used when `null`
/// meets a destination that cannot hold null.
///
/// Structs are zeroed field by field; tuples get one zero per slot. Enums have
/// no zero value and report [`Error::InvalidDestination`].
struct ZeroDeserializer;

impl<'de> de::Deserializer<'de> for ZeroDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_bool(false)
    }

    fn deserialize_i8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i8(0)
    }

    fn deserialize_i16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i16(0)
    }

    fn deserialize_i32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i32(0)
    }

    fn deserialize_i64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i64(0)
    }

    fn deserialize_i128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_i128(0)
    }

    fn deserialize_u8<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u8(0)
    }

    fn deserialize_u16<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u16(0)
    }

    fn deserialize_u32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u32(0)
    }

    fn deserialize_u64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u64(0)
    }

    fn deserialize_u128<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_u128(0)
    }

    fn deserialize_f32<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f32(0.0)
    }

    fn deserialize_f64<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_f64(0.0)
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_char('\0')
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str("")
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str("")
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: 0 })
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: 0 })
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_none()
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: 0 })
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_seq(ZeroSeq { remaining: len })
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(ZeroFields { fields: &[] })
    }

    fn deserialize_struct<V>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_map(ZeroFields { fields })
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        _variants: &'static [&'static str],
        _visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        Err(Error::InvalidDestination(format!(
            "enum `{}` has no zero value to take from `null`",
            name
        )))
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_borrowed_str("")
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}

struct ZeroSeq {
    remaining: usize,
}

impl<'de> de::SeqAccess<'de> for ZeroSeq {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        if self.remaining == 0 {
            return Ok(None);
        }
        self.remaining -= 1;
        seed.deserialize(ZeroDeserializer).map(Some)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.remaining)
    }
}

struct ZeroFields {
    fields: &'static [&'static str],
}

impl<'de> de::MapAccess<'de> for ZeroFields {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.fields.split_first() {
            Some((field, rest)) => {
                self.fields = rest;
                seed.deserialize(BorrowedStrDeserializer::<Error>::new(*field))
                    .map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        seed.deserialize(ZeroDeserializer)
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.fields.len())
    }
}

struct SeqDeserializer {
    iter: std::vec::IntoIter<ZonValue>,
}

impl SeqDeserializer {
    fn new(vec: Vec<ZonValue>) -> Self {
        SeqDeserializer {
            iter: vec.into_iter(),
        }
    }
}

impl<'de> de::SeqAccess<'de> for SeqDeserializer {
    type Error = Error;

    fn next_element_seed<T>(&mut self, seed: T) -> Result<Option<T::Value>>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)).map(Some),
            None => Ok(None),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct MapDeserializer {
    iter: indexmap::map::IntoIter<String, ZonValue>,
    value: Option<ZonValue>,
}

impl MapDeserializer {
    fn new(map: ZonMap) -> Self {
        MapDeserializer {
            iter: map.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for MapDeserializer {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, value)) => {
                self.value = Some(value);
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        match self.iter.size_hint() {
            (lower, Some(upper)) if lower == upper => Some(upper),
            _ => None,
        }
    }
}

struct EnumDeserializer {
    variant: String,
    value: Option<ZonValue>,
}

impl<'de> de::EnumAccess<'de> for EnumDeserializer {
    type Error = Error;
    type Variant = VariantDeserializer;

    fn variant_seed<V>(self, seed: V) -> Result<(V::Value, Self::Variant)>
    where
        V: de::DeserializeSeed<'de>,
    {
        let variant = seed.deserialize(StringDeserializer::<Error>::new(self.variant))?;
        let visitor = VariantDeserializer { value: self.value };
        Ok((variant, visitor))
    }
}

struct VariantDeserializer {
    value: Option<ZonValue>,
}

impl<'de> de::VariantAccess<'de> for VariantDeserializer {
    type Error = Error;

    fn unit_variant(self) -> Result<()> {
        match self.value {
            Some(ZonValue::Null) | None => Ok(()),
            _ => Err(Error::custom("Expected unit variant")),
        }
    }

    fn newtype_variant_seed<T>(self, seed: T) -> Result<T::Value>
    where
        T: de::DeserializeSeed<'de>,
    {
        match self.value {
            Some(value) => seed.deserialize(ValueDeserializer::new(value)),
            None => Err(Error::custom("Expected newtype variant")),
        }
    }

    fn tuple_variant<V>(self, _len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(ZonValue::Array(arr)) => visitor.visit_seq(SeqDeserializer::new(arr)),
            _ => Err(Error::custom("Expected tuple variant")),
        }
    }

    fn struct_variant<V>(self, _fields: &'static [&'static str], visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            Some(ZonValue::Object(obj)) => visitor.visit_map(MapDeserializer::new(obj)),
            _ => Err(Error::custom("Expected struct variant")),
        }
    }
}

/// Deserializes typed values out of a [`ZonValue`] tree, for
/// [`from_value`](crate::from_value). `Null` fills non-optional destinations
/// with their zero value, as it does when decoding text.
pub(crate) struct ValueDeserializer {
    value: ZonValue,
}

impl ValueDeserializer {
    pub(crate) fn new(value: ZonValue) -> Self {
        ValueDeserializer { value }
    }
}

macro_rules! value_null_as_zero {
    ($($method:ident)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                if self.value.is_null() {
                    ZeroDeserializer.$method(visitor)
                } else {
                    self.deserialize_any(visitor)
                }
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for ValueDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZonValue::Null => visitor.visit_unit(),
            ZonValue::Bool(b) => visitor.visit_bool(b),
            ZonValue::Int(i) => visitor.visit_i64(i),
            ZonValue::UInt(u) => visitor.visit_u64(u),
            ZonValue::Float(f) => visitor.visit_f64(f),
            ZonValue::String(s) => visitor.visit_string(s),
            ZonValue::Array(arr) => visitor.visit_seq(SeqDeserializer::new(arr)),
            ZonValue::Object(obj) => visitor.visit_map(MapDeserializer::new(obj)),
        }
    }

    value_null_as_zero! {
        deserialize_bool deserialize_i8 deserialize_i16 deserialize_i32 deserialize_i64
        deserialize_i128 deserialize_u8 deserialize_u16 deserialize_u32 deserialize_u64
        deserialize_u128 deserialize_f32 deserialize_f64 deserialize_char deserialize_str
        deserialize_string deserialize_bytes deserialize_byte_buf deserialize_seq deserialize_map
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZonValue::Null => visitor.visit_none(),
            _ => visitor.visit_some(self),
        }
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_null() {
            ZeroDeserializer.deserialize_tuple(len, visitor)
        } else {
            self.deserialize_any(visitor)
        }
    }

    fn deserialize_tuple_struct<V>(
        self,
        _name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        self.deserialize_tuple(len, visitor)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.value.is_null() {
            ZeroDeserializer.deserialize_struct(name, fields, visitor)
        } else {
            self.deserialize_any(visitor)
        }
    }

    fn deserialize_enum<V>(
        self,
        _name: &'static str,
        _variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.value {
            ZonValue::String(s) => {
                let variant = match s.strip_prefix('.') {
                    Some(atom) => atom.to_string(),
                    None => s,
                };
                visitor.visit_enum(variant.into_deserializer())
            }
            ZonValue::Object(obj) if obj.len() == 1 => {
                let mut entries = obj.into_iter();
                match entries.next() {
                    Some((variant, value)) => visitor.visit_enum(EnumDeserializer {
                        variant,
                        value: Some(value),
                    }),
                    None => Err(Error::custom("Expected enum variant")),
                }
            }
            _ => Err(Error::custom("Expected enum")),
        }
    }

    forward_to_deserialize_any! {
        unit unit_struct identifier ignored_any
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::{BTreeMap, HashMap};

    fn decode<'a, T: Deserialize<'a>>(input: &'a str) -> Result<T> {
        let mut de = Deserializer::from_str(input);
        let value = T::deserialize(&mut de)?;
        de.end()?;
        Ok(value)
    }

    #[derive(Deserialize, Debug, PartialEq, Default)]
    struct Person {
        name: String,
        age: u32,
    }

    #[test]
    fn test_scalars() {
        assert!(decode::<bool>("true").unwrap());
        assert_eq!(decode::<i32>("  -42 ").unwrap(), -42);
        assert_eq!(decode::<i64>("+7").unwrap(), 7);
        assert_eq!(decode::<f64>("1.5e3").unwrap(), 1500.0);
        assert_eq!(decode::<f32>("0.25").unwrap(), 0.25);
        assert_eq!(decode::<String>("\"hi there\"").unwrap(), "hi there");
        assert_eq!(decode::<char>("\"x\"").unwrap(), 'x');
    }

    #[test]
    fn test_hex_integers() {
        assert_eq!(decode::<i32>("0x1F").unwrap(), 31);
        assert_eq!(decode::<u8>("0XfF").unwrap(), 255);
        assert_eq!(decode::<i32>("-0x10").unwrap(), -16);
        assert_eq!(decode::<f64>("0x10").unwrap(), 16.0);
    }

    #[test]
    fn test_integer_overflow_is_error() {
        assert!(matches!(
            decode::<u8>("256"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<i8>("0x80"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<u32>("-1"),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_hex_reaches_signed_minimum() {
        assert_eq!(
            decode::<i128>("-0x80000000000000000000000000000000").unwrap(),
            i128::MIN
        );
        assert_eq!(
            decode::<i128>("-170141183460469231731687303715884105728").unwrap(),
            i128::MIN
        );
        assert_eq!(decode::<i64>("-0x8000000000000000").unwrap(), i64::MIN);
        assert_eq!(decode::<i8>("-0x80").unwrap(), i8::MIN);
        assert!(matches!(
            decode::<i128>("-0x80000000000000000000000000000001"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<i128>("0x80000000000000000000000000000000"),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_float_out_of_range_is_error() {
        assert!(matches!(
            decode::<f64>("1e400"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<f64>("-1e400"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<f32>("1e39"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<ZonValue>("1e400"),
            Err(Error::InvalidNumber { .. })
        ));
        assert_eq!(decode::<f32>("3.0e38").unwrap(), 3.0e38);
        assert_eq!(decode::<f64>("1e308").unwrap(), 1e308);
        assert_eq!(decode::<f64>("1e-400").unwrap(), 0.0);
    }

    #[test]
    fn test_malformed_scalars() {
        assert!(matches!(
            decode::<bool>("yes"),
            Err(Error::InvalidBoolean { .. })
        ));
        assert!(matches!(
            decode::<f64>("-"),
            Err(Error::InvalidNumber { .. })
        ));
        assert!(matches!(
            decode::<String>("\"open"),
            Err(Error::UnterminatedString { .. })
        ));
        assert!(matches!(
            decode::<String>("open"),
            Err(Error::ExpectedToken { .. })
        ));
        assert!(matches!(decode::<i32>(""), Err(Error::UnexpectedEnd { .. })));
    }

    #[test]
    fn test_string_accepts_atoms() {
        assert_eq!(decode::<String>(".red").unwrap(), ".red");
        assert_eq!(decode::<String>("0x1F").unwrap(), "0x1F");
        let s: &str = decode("\"borrowed\"").unwrap();
        assert_eq!(s, "borrowed");
    }

    #[test]
    fn test_sequences() {
        assert_eq!(decode::<Vec<i32>>(".{1, 2, 3}").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode::<Vec<i32>>(".{1,2,3,}").unwrap(), vec![1, 2, 3]);
        assert_eq!(decode::<Vec<i32>>(".{}").unwrap(), Vec::<i32>::new());
        assert_eq!(decode::<Vec<i32>>(".{ , 1,, 2 ,}").unwrap(), vec![1, 2]);
        assert_eq!(
            decode::<Vec<i32>>(".{\n  1, // one\n  2,\n}").unwrap(),
            vec![1, 2]
        );
    }

    #[test]
    fn test_tuples() {
        assert_eq!(decode::<(i32, String)>(".{1, \"a\"}").unwrap(), (1, "a".into()));
        assert_eq!(decode::<[u8; 3]>(".{1, 2, 3,}").unwrap(), [1, 2, 3]);
        assert!(decode::<(i32, i32)>(".{1, 2, 3}").is_err());
    }

    #[test]
    fn test_struct_and_unknown_fields() {
        let p: Person = decode(".{ .name = \"Peter\", .age = 42 }").unwrap();
        assert_eq!(p, Person { name: "Peter".into(), age: 42 });

        let p: Person =
            decode(".{ .extra = .{ .deep = .{1, 2} }, .name = \"A\", .x = .y, .age = 1 }")
                .unwrap();
        assert_eq!(p, Person { name: "A".into(), age: 1 });
    }

    #[test]
    fn test_maps_strip_leading_dot() {
        let map: HashMap<String, i32> = decode(".{ .a = 1, .b = 2 }").unwrap();
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_map_integer_keys() {
        let map: BTreeMap<u32, String> = decode(".{ .1 = \"one\", .2 = \"two\" }").unwrap();
        assert_eq!(map.get(&1).map(String::as_str), Some("one"));
    }

    #[test]
    fn test_destination_drives_composite_shape() {
        let rows: Vec<HashMap<String, Vec<u8>>> =
            decode(".{ .{ .a = .{1, 2} }, .{ .b = .{} } }").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["a"], vec![1, 2]);
        assert!(rows[1]["b"].is_empty());
    }

    #[test]
    fn test_null_into_non_optional_gives_zero() {
        assert_eq!(decode::<i32>("null").unwrap(), 0);
        assert!(!decode::<bool>("null").unwrap());
        assert_eq!(decode::<String>("null").unwrap(), "");
        assert!(decode::<Vec<i32>>("null").unwrap().is_empty());
        assert_eq!(decode::<Person>("null").unwrap(), Person::default());
        assert_eq!(decode::<(u8, bool)>("null").unwrap(), (0, false));

        let p: Person = decode(".{ .name = null, .age = null }").unwrap();
        assert_eq!(p, Person::default());
    }

    #[test]
    fn test_options() {
        assert_eq!(decode::<Option<i32>>("null").unwrap(), None);
        assert_eq!(decode::<Option<i32>>("5").unwrap(), Some(5));
        assert_eq!(
            decode::<Option<Box<i32>>>("5").unwrap(),
            Some(Box::new(5))
        );
    }

    #[test]
    fn test_missing_separators_and_closers() {
        assert!(matches!(
            decode::<Vec<i32>>(".{1, 2"),
            Err(Error::UnexpectedEnd { .. })
        ));
        assert!(matches!(
            decode::<Person>(".{ .name \"x\" }"),
            Err(Error::ExpectedToken { expected: "`=`", .. })
        ));
        assert!(matches!(
            decode::<Person>(".{ . = 1 }"),
            Err(Error::ExpectedToken { .. })
        ));
        assert!(matches!(
            decode::<Vec<i32>>("{1}"),
            Err(Error::ExpectedToken { .. })
        ));
    }

    #[test]
    fn test_trailing_characters() {
        assert!(matches!(
            decode::<i32>("1 2"),
            Err(Error::TrailingCharacters { .. })
        ));
        assert_eq!(decode::<i32>("1 // done").unwrap(), 1);
    }

    #[test]
    fn test_dynamic_kinds() {
        assert_eq!(decode::<ZonValue>("0x1F").unwrap(), ZonValue::UInt(31));
        assert_eq!(decode::<ZonValue>("-0x1F").unwrap(), ZonValue::Int(-31));
        assert_eq!(decode::<ZonValue>("42").unwrap(), ZonValue::Int(42));
        assert_eq!(decode::<ZonValue>("4.5").unwrap(), ZonValue::Float(4.5));
        assert_eq!(decode::<ZonValue>("1e2").unwrap(), ZonValue::Float(100.0));
        assert_eq!(
            decode::<ZonValue>("18446744073709551615").unwrap(),
            ZonValue::UInt(u64::MAX)
        );
        assert_eq!(decode::<ZonValue>(".red").unwrap(), ZonValue::from("red"));
        assert_eq!(decode::<ZonValue>("bare_word").unwrap(), ZonValue::from("bare_word"));
        assert_eq!(decode::<ZonValue>("nullable").unwrap(), ZonValue::from("nullable"));
        assert_eq!(decode::<ZonValue>("null").unwrap(), ZonValue::Null);
        assert_eq!(decode::<ZonValue>("false").unwrap(), ZonValue::Bool(false));
    }

    #[test]
    fn test_dynamic_composites() {
        let value: ZonValue = decode(".{ .a = 1, .b = .{ 1, 2, } }").unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj.get("a"), Some(&ZonValue::Int(1)));
        assert_eq!(
            obj.get("b"),
            Some(&ZonValue::Array(vec![ZonValue::Int(1), ZonValue::Int(2)]))
        );

        assert_eq!(decode::<ZonValue>(".{}").unwrap(), ZonValue::Array(vec![]));
        assert_eq!(
            decode::<ZonValue>(".{ .a, .b }").unwrap(),
            ZonValue::Array(vec![ZonValue::from("a"), ZonValue::from("b")])
        );
    }

    #[test]
    fn test_dynamic_errors() {
        assert!(matches!(
            decode::<ZonValue>(".{ .a = 1, 2 }"),
            Err(Error::ExpectedToken { .. })
        ));
        assert!(matches!(decode::<ZonValue>("."), Err(Error::UnexpectedEnd { .. })));
        assert!(matches!(
            decode::<ZonValue>("?"),
            Err(Error::ExpectedToken { expected: "value", .. })
        ));
        assert!(matches!(
            decode::<ZonValue>("0x"),
            Err(Error::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_depth_limit() {
        let deep = ".{".repeat(200) + &"}".repeat(200);
        assert!(matches!(
            decode::<ZonValue>(&deep),
            Err(Error::DepthLimitExceeded { .. })
        ));

        let ok = ".{".repeat(10) + &"}".repeat(10);
        assert!(decode::<ZonValue>(&ok).is_ok());

        let mut de = Deserializer::from_str(".{.{}}").with_depth_limit(1);
        assert!(ZonValue::deserialize(&mut de).is_err());
    }

    #[derive(Deserialize, Debug, PartialEq)]
    enum Shape {
        Empty,
        Circle(f64),
        Point(i32, i32),
        Rect { w: u32, h: u32 },
    }

    #[test]
    fn test_enums() {
        assert_eq!(decode::<Shape>(".Empty").unwrap(), Shape::Empty);
        assert_eq!(decode::<Shape>("\"Empty\"").unwrap(), Shape::Empty);
        assert_eq!(decode::<Shape>(".{ .Circle = 1.5 }").unwrap(), Shape::Circle(1.5));
        assert_eq!(decode::<Shape>(".{.Point = .{1, -2}}").unwrap(), Shape::Point(1, -2));
        assert_eq!(
            decode::<Shape>(".{ .Rect = .{ .w = 2, .h = 3 }, }").unwrap(),
            Shape::Rect { w: 2, h: 3 }
        );
        assert!(matches!(
            decode::<Shape>("null"),
            Err(Error::InvalidDestination(_))
        ));
    }

    #[test]
    fn test_value_deserializer() {
        let mut obj = ZonMap::new();
        obj.insert("name".into(), ZonValue::from("Ann"));
        obj.insert("age".into(), ZonValue::Null);
        let p = Person::deserialize(ValueDeserializer::new(ZonValue::Object(obj))).unwrap();
        assert_eq!(p, Person { name: "Ann".into(), age: 0 });

        let shape = Shape::deserialize(ValueDeserializer::new(ZonValue::from(".Empty"))).unwrap();
        assert_eq!(shape, Shape::Empty);

        let opt = Option::<u8>::deserialize(ValueDeserializer::new(ZonValue::UInt(4))).unwrap();
        assert_eq!(opt, Some(4));
    }
}
