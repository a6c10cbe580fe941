//! Configuration options for ZON serialization.
//!
//! [`ZonOptions`] only affects emitted whitespace and the order of generic map
//! entries; the decoded data is the same for every setting.
//!
//! ## Examples
//!
//! ```rust
//! use serde_zon::{ZonOptions, to_string_with_options};
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Data { x: i32, y: i32 }
//!
//! let data = Data { x: 1, y: 2 };
//!
//! // Two-space indentation
//! let options = ZonOptions::new().with_indent("  ");
//! let zon = to_string_with_options(&data, options).unwrap();
//! assert_eq!(zon, ".{\n  .x = 1,\n  .y = 2,\n}");
//! ```

/// Indentation used by [`ZonOptions::pretty`].
pub const DEFAULT_INDENT: &str = "    ";

/// Configuration options for ZON serialization.
///
/// An empty `indent` produces compact single-line output. A non-empty `indent`
/// puts each member on its own line, prefixed by `indent` repeated once per
/// nesting level, with a trailing comma before the closer.
///
/// # Examples
///
/// ```rust
/// use serde_zon::ZonOptions;
///
/// // Compact output
/// let options = ZonOptions::new();
/// assert!(!options.is_pretty());
///
/// // Pretty-printed with 4-space indentation
/// let options = ZonOptions::pretty();
/// assert_eq!(options.indent, "    ");
///
/// // Tabs, with generic map keys sorted
/// let options = ZonOptions::new().with_indent("\t").with_sorted_keys(true);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ZonOptions {
    pub indent: String,
    /// Sort the keys of generic maps. Struct fields always keep declaration order.
    pub sort_keys: bool,
}

impl ZonOptions {
    /// Creates default options (compact output, native map order).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for pretty-printed output with four-space indentation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::ZonOptions;
    ///
    /// let options = ZonOptions::pretty();
    /// assert!(options.is_pretty());
    /// ```
    #[must_use]
    pub fn pretty() -> Self {
        ZonOptions {
            indent: DEFAULT_INDENT.to_string(),
            ..Default::default()
        }
    }

    /// Sets the string repeated per nesting level. An empty string means compact output.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enables or disables sorting of generic map keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_zon::{ZonOptions, to_string_with_options};
    /// use std::collections::HashMap;
    ///
    /// let map: HashMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
    /// let options = ZonOptions::new().with_sorted_keys(true);
    /// assert_eq!(to_string_with_options(&map, options).unwrap(), ".{.a = 1, .b = 2}");
    /// ```
    #[must_use]
    pub fn with_sorted_keys(mut self, sort_keys: bool) -> Self {
        self.sort_keys = sort_keys;
        self
    }

    #[inline]
    #[must_use]
    pub fn is_pretty(&self) -> bool {
        !self.indent.is_empty()
    }
}
