//! ZON Format Grammar
//!
//! This module documents the ZON text format as read and written by this
//! library. It contains no code.
//!
//! # Overview
//!
//! A ZON document is a single value. Composite values (sequences, maps and
//! records) share one delimiter pair, `.{` and `}`. Whether a composite is a
//! sequence or a map is decided by the destination type when decoding into a
//! typed value, and by the first member when decoding into a [`ZonValue`].
//!
//! # Grammar
//!
//! ```text
//! value      := "null" | bool | number | string | composite | dot-atom
//! bool       := "true" | "false"
//! number     := ["+"|"-"] ( "0x"|"0X" hexdigit+ | decimal )
//! decimal    := digit+ ["." digit+] [("e"|"E") ["+"|"-"] digit+]
//! string     := '"' byte-except-quote* '"'
//! dot-atom   := "." identifier
//! composite  := ".{" ws ( member ( "," ws member )* [","] )? ws "}"
//! member     := ( "." identifier ws "=" ws value ) | value
//! identifier := (letter|"_") (letter|digit|"_")*
//! ws         := (whitespace | "//" line-comment)*
//! ```
//!
//! Whitespace and `//` comments may appear between any two tokens. Only
//! whitespace and comments may follow the top-level value.
//!
//! # Scalars
//!
//! | Kind    | Example              | Notes                                              |
//! |---------|----------------------|----------------------------------------------------|
//! | Null    | `null`               | Fills a non-optional destination with its zero value |
//! | Boolean | `true`, `false`      | Keywords need a word boundary: `trueish` is not `true` |
//! | Integer | `42`, `-7`, `+3`     | Out-of-range values are an error, never truncated  |
//! | Hex     | `0x1F`, `-0x10`      | Accepted by integer and float destinations         |
//! | Float   | `1.5`, `2e-3`        | Non-finite floats encode as `null`                 |
//! | String  | `"hello"`            | No escape sequences; `"` cannot appear inside      |
//!
//! # Composites
//!
//! ```text
//! .{1, 2, 3}                      // sequence
//! .{.name = "Peter", .age = 42}   // map or record
//! .{}                             // empty
//! .{1, 2, 3,}                     // trailing comma
//! ```
//!
//! Keys are written with a leading `.`. Decoding into a generic map stores
//! the key without the dot; encoding adds it back exactly once. Map keys that
//! are not identifiers cannot be written.
//!
//! Fields the destination does not know are skipped. Fields absent from the
//! input need `#[serde(default)]` (or an `Option` type) on the destination.
//!
//! # Dot-atoms
//!
//! A bare `.identifier` in value position is a dot-atom. Decoded into a
//! [`Value`](crate::Value) it becomes the identifier text (`.red` becomes
//! `"red"`). A `String` destination keeps the dot (`".red"`), and a string of
//! that form is written back bare, so typed strings round-trip as the same
//! token. Unit enum variants are written as dot-atoms.
//!
//! # Enums
//!
//! ```text
//! .Off                            // unit variant
//! .{.Level = 3}                   // newtype variant
//! .{.Move = .{1, 2}}              // tuple variant
//! .{.Resize = .{.w = 4, .h = 3}}  // struct variant
//! ```
//!
//! Unit variants also decode from `"Off"` and a bare `Off`.
//!
//! # Dynamic decoding
//!
//! When decoding into [`ZonValue`]:
//!
//! - a hex literal becomes `UInt` (or `Int` when negative)
//! - a decimal with `.`, `e` or `E` becomes `Float`
//! - other decimals become `Int`, or `UInt` above `i64::MAX`
//! - `.{}` becomes an empty `Array`
//! - a composite whose first member is `.key =` becomes an `Object`, otherwise an `Array`
//! - a bare word of letters, digits and `_` becomes a `String`
//!
//! [`ZonValue`]: crate::ZonValue
