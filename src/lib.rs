//! # serde_zon
//!
//! A Serde-compatible serialization library for ZON, the dot-prefixed
//! composite literal text format.
//!
//! ## What is ZON?
//!
//! ZON writes every sequence, map and record as a `.{ ... }` composite. Keyed
//! members are written `.name = value`, positional members are written bare:
//!
//! ```text
//! .{
//!     .name = "serde_zon",
//!     .version = "0.1.0",
//!     .paths = .{"src", "Cargo.toml"},
//!     .kind = .library,
//! }
//! ```
//!
//! Scalars are `null`, `true`/`false`, decimal or `0x` hex numbers, and
//! double-quoted strings. A bare `.identifier` outside key position is a
//! dot-atom. `//` starts a line comment. See [`grammar`] for the full grammar.
//!
//! ## Key Features
//!
//! - **Serde Compatible**: works with existing Rust types via `#[derive(Serialize, Deserialize)]`
//! - **Shape-driven decoding**: the destination type decides whether a composite is a sequence or a map
//! - **Dynamic values**: decode unknown input into [`ZonValue`] and build values with [`zon!`]
//! - **Omit-empty fields**: [`is_empty`] plugs into `skip_serializing_if`
//! - **Never aborts**: malformed input yields an [`Error`] with a [`Position`]
//!
//! ## Quick Start
//!
//! ```rust
//! use serde::{Deserialize, Serialize};
//! use serde_zon::{from_str, to_string};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Person {
//!     name: String,
//!     age: u32,
//! }
//!
//! let person = Person { name: "Peter".to_string(), age: 42 };
//!
//! let zon = to_string(&person).unwrap();
//! assert_eq!(zon, ".{.name = \"Peter\", .age = 42}");
//!
//! let back: Person = from_str(&zon).unwrap();
//! assert_eq!(person, back);
//! ```
//!
//! ### Dynamic values
//!
//! ```rust
//! use serde_zon::{from_str, Value};
//!
//! let value: Value = from_str(".{ .id = 0x1F, .tags = .{ \"a\", \"b\" }, .mode = .fast }").unwrap();
//! assert_eq!(value.get("id"), Some(&Value::UInt(31)));
//! assert_eq!(value.get("mode").and_then(Value::as_str), Some("fast"));
//! ```
//!
//! ## Known format restrictions
//!
//! ZON strings have no escape sequences. A string containing `"` cannot be
//! encoded and fails with [`Error::UnrepresentableString`].
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - basic serialization and deserialization
//! - **`macro.rs`** - building values with the zon! macro
//! - **`dynamic_values.rs`** - working with ZonValue dynamically
//! - **`custom_options.rs`** - indentation and key ordering
//! - **`omit_empty.rs`** - leaving empty fields out of the output
//!
//! Run any demo with: `cargo run --example <name>`

pub mod de;
pub mod empty;
pub mod error;
pub mod grammar;
pub mod macros;
pub mod map;
pub mod options;
mod scanner;
pub mod ser;
pub mod stream;
pub mod value;

pub use de::Deserializer;
pub use empty::is_empty;
pub use error::{Error, Position, Result};
pub use map::ZonMap;
pub use options::ZonOptions;
pub use ser::{Serializer, ZonValueSerializer};
pub use stream::{Decoder, Encoder};
pub use value::ZonValue;
pub use value::ZonValue as Value;

use log::{debug, error, trace};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::io;
use std::panic::{self, AssertUnwindSafe};

/// Serialize any `T: Serialize` to a compact ZON string.
///
/// # Examples
///
/// ```rust
/// use serde_zon::to_string;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// assert_eq!(to_string(&point).unwrap(), ".{.x = 1, .y = 2}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized (e.g., unsupported types,
/// strings containing `"`, map keys that are not identifiers).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ZonOptions::default())
}

/// Serialize any `T: Serialize` to a pretty-printed ZON string.
///
/// Each member goes on its own line, indented four spaces per level.
///
/// # Examples
///
/// ```rust
/// use serde_zon::to_string_pretty;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let zon = to_string_pretty(&point).unwrap();
/// assert_eq!(zon, ".{\n    .x = 1,\n    .y = 2,\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, ZonOptions::pretty())
}

/// Serialize any `T: Serialize` to a ZON string with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{to_string_with_options, ZonOptions};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let options = ZonOptions::new().with_indent("\t");
/// let zon = to_string_with_options(&point, options).unwrap();
/// assert_eq!(zon, ".{\n\t.x = 1,\n\t.y = 2,\n}");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized. No partial output is
/// returned.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: ZonOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    trace!("encoding with options {options:?}");
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    let output = serializer.into_inner();
    debug!("encoded {} bytes of ZON", output.len());
    Ok(output)
}

/// Serialize any `T: Serialize` to a compact ZON byte vector.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec<T>(value: &T) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_vec_with_options(value, ZonOptions::default())
}

/// Serialize any `T: Serialize` to a ZON byte vector with custom options.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_vec_with_options<T>(value: &T, options: ZonOptions) -> Result<Vec<u8>>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, options).map(String::into_bytes)
}

/// Convert any `T: Serialize` to a `ZonValue`.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{to_value, ZonValue};
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let value: ZonValue = to_value(&point).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be serialized.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<ZonValue>
where
    T: ?Sized + Serialize,
{
    value.serialize(ZonValueSerializer)
}

/// Interpret a `ZonValue` as an instance of type `T`.
///
/// `Null` fills a non-optional destination with its zero value, the same way
/// decoding `null` from text does.
///
/// # Examples
///
/// ```rust
/// use serde_zon::{from_value, zon};
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_value(zon!({ "x": 1, "y": 2 })).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the value does not fit the shape of `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_value<T>(value: ZonValue) -> Result<T>
where
    T: DeserializeOwned,
{
    guard(|| T::deserialize(de::ValueDeserializer::new(value)))
}

/// Serialize any `T: Serialize` to a writer in compact ZON.
///
/// # Examples
///
/// ```rust
/// use serde_zon::to_writer;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Point { x: i32, y: i32 }
///
/// let point = Point { x: 1, y: 2 };
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &point).unwrap();
/// assert_eq!(buffer, b".{.x = 1, .y = 2}");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, ZonOptions::default())
}

/// Serialize any `T: Serialize` to a writer in ZON with custom options.
///
/// The whole document is rendered before anything is written, so a
/// serialization error leaves the writer untouched.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: ZonOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let zon_string = to_string_with_options(value, options)?;
    writer
        .write_all(zon_string.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Deserialize an instance of type `T` from a string of ZON text.
///
/// # Examples
///
/// ```rust
/// use serde_zon::from_str;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_str(".{ .x = 1, .y = 2 }").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the input is not valid ZON or cannot be deserialized to
/// type `T`. Decoding errors carry the line and column of the fault.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str<'a, T>(s: &'a str) -> Result<T>
where
    T: Deserialize<'a>,
{
    from_slice(s.as_bytes())
}

/// Deserialize an instance of type `T` from an I/O stream of ZON.
///
/// The reader is read to the end before decoding starts.
///
/// # Examples
///
/// ```rust
/// use serde_zon::from_reader;
/// use serde::Deserialize;
/// use std::io::Cursor;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let cursor = Cursor::new(b".{ .x = 1, .y = 2 }");
/// let point: Point = from_reader(cursor).unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if reading from the reader fails, the input is not valid
/// ZON, or the data cannot be deserialized to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R, T>(mut reader: R) -> Result<T>
where
    R: io::Read,
    T: DeserializeOwned,
{
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io(&e.to_string()))?;
    from_slice(&bytes)
}

/// Deserialize an instance of type `T` from bytes of ZON text.
///
/// Quoted strings must be valid UTF-8; everything else in the grammar is ASCII.
///
/// # Examples
///
/// ```rust
/// use serde_zon::from_slice;
/// use serde::Deserialize;
///
/// #[derive(Deserialize, PartialEq, Debug)]
/// struct Point { x: i32, y: i32 }
///
/// let point: Point = from_slice(b".{ .x = 1, .y = 2 }").unwrap();
/// assert_eq!(point, Point { x: 1, y: 2 });
/// ```
///
/// # Errors
///
/// Returns an error if the bytes are not valid ZON or cannot be deserialized
/// to type `T`.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice<'a, T>(v: &'a [u8]) -> Result<T>
where
    T: Deserialize<'a>,
{
    trace!("decoding {} bytes of ZON", v.len());
    let value = guard(|| {
        let mut deserializer = Deserializer::from_slice(v);
        let value = T::deserialize(&mut deserializer)?;
        deserializer.end()?;
        Ok(value)
    });
    if let Err(err) = &value {
        debug!("decode failed: {err}");
    }
    value
}

/// Runs a decode, turning an escaped panic into [`Error::Internal`].
fn guard<T>(decode: impl FnOnce() -> Result<T>) -> Result<T> {
    panic::catch_unwind(AssertUnwindSafe(decode)).unwrap_or_else(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown fault".to_string());
        error!("recovered from fault while decoding: {message}");
        Err(Error::Internal(message))
    })
}
