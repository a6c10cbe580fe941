//! Reader and writer adapters.
//!
//! [`Encoder`] renders a whole document before writing it in one call.
//! [`Decoder`] reads its source to the end before decoding. Neither adds any
//! framing, and errors from the codec are returned unchanged.
//!
//! ```rust
//! use serde_zon::{Decoder, Encoder};
//! use std::collections::BTreeMap;
//!
//! let mut scores = BTreeMap::new();
//! scores.insert("ada", 3);
//! scores.insert("bob", 5);
//!
//! let mut buffer = Vec::new();
//! Encoder::new(&mut buffer).encode(&scores).unwrap();
//! assert_eq!(buffer, b".{.ada = 3, .bob = 5}");
//!
//! let decoded: BTreeMap<String, i32> = Decoder::new(buffer.as_slice()).decode().unwrap();
//! assert_eq!(decoded.get("bob"), Some(&5));
//! ```

use crate::{Error, Result, ZonOptions};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Writes ZON documents to an [`io::Write`].
pub struct Encoder<W> {
    writer: W,
    options: ZonOptions,
}

impl<W: io::Write> Encoder<W> {
    /// Creates an encoder producing compact output.
    pub fn new(writer: W) -> Self {
        Self::with_options(writer, ZonOptions::default())
    }

    pub fn with_options(writer: W, options: ZonOptions) -> Self {
        Encoder { writer, options }
    }

    /// Serializes `value` and writes the complete document.
    ///
    /// # Errors
    ///
    /// Returns the serialization error if `value` cannot be encoded, in which
    /// case nothing is written, or an I/O error from the writer.
    pub fn encode<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        crate::to_writer_with_options(&mut self.writer, value, self.options.clone())
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Reads ZON documents from an [`io::Read`].
pub struct Decoder<R> {
    reader: R,
}

impl<R: io::Read> Decoder<R> {
    pub fn new(reader: R) -> Self {
        Decoder { reader }
    }

    /// Reads the remaining input and decodes it as one document.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if reading fails, otherwise the decoding error.
    pub fn decode<T>(&mut self) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let mut bytes = Vec::new();
        self.reader
            .read_to_end(&mut bytes)
            .map_err(|e| Error::io(&e.to_string()))?;
        crate::from_slice(&bytes)
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}
