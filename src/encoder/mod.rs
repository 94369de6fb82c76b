//! # Encoders
//!
//! Four encodings are supported:
//!
//! | encoding                      | array data                           | `format`   |
//! |-------------------------------|--------------------------------------|------------|
//! | [`Ascii`]                     | inline, space separated text         | `ascii`    |
//! | [`Base64`]                    | inline, base64 of header + bytes     | `binary`   |
//! | [`AppendedBase64`]            | appended, base64 of header + bytes   | `appended` |
//! | [`AppendedRaw`]               | appended, raw header + bytes         | `appended` |
//!
//! Each type implements [`Encode`](crate::Encode) and can be used on its own. When the
//! encoding is only known at runtime, [`Encoder`] wraps any of the four and forwards every
//! call to it.

mod appended;
pub mod base64;
mod inline;
mod ledger;

pub use appended::{AppendedBase64, AppendedRaw};
pub use inline::{Ascii, Base64};

use crate::array::ArrayRef;
use crate::traits::Encode;
use crate::types::WriterOptions;
use crate::Attributes;
use crate::Error;

use std::io::Write;
use std::str::FromStr;

/// the encoding to use for every data array of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Encoding {
    Ascii,
    Base64,
    AppendedBase64,
    AppendedRaw,
}

impl Default for Encoding {
    fn default() -> Self {
        Encoding::AppendedRaw
    }
}

impl Encoding {
    /// value of the `format` attribute of arrays written with this encoding
    pub fn to_str(&self) -> &'static str {
        match &self {
            Self::Ascii => "ascii",
            Self::Base64 => "binary",
            Self::AppendedBase64 | Self::AppendedRaw => "appended",
        }
    }
}

impl FromStr for Encoding {
    type Err = Error;

    /// accepts `ascii`, `base64`, `appended-base64`, and `binary` / `raw` / `appended-raw`
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "ascii" => Ok(Encoding::Ascii),
            "base64" => Ok(Encoding::Base64),
            "appended-base64" => Ok(Encoding::AppendedBase64),
            "binary" | "raw" | "appended-raw" => Ok(Encoding::AppendedRaw),
            _ => Err(Error::InvalidEncoding(name.to_string())),
        }
    }
}

/// Any of the four encoders, chosen when the file is created
#[derive(Debug)]
pub enum Encoder<'a> {
    Ascii(Ascii),
    Base64(Base64),
    AppendedBase64(AppendedBase64<'a>),
    AppendedRaw(AppendedRaw<'a>),
}

impl<'a> Encoder<'a> {
    pub fn new(encoding: Encoding, options: WriterOptions) -> Self {
        match encoding {
            Encoding::Ascii => Self::Ascii(Ascii::new(options)),
            Encoding::Base64 => Self::Base64(Base64::new(options)),
            Encoding::AppendedBase64 => Self::AppendedBase64(AppendedBase64::new(options)),
            Encoding::AppendedRaw => Self::AppendedRaw(AppendedRaw::new(options)),
        }
    }

    pub fn encoding(&self) -> Encoding {
        match self {
            Self::Ascii(_) => Encoding::Ascii,
            Self::Base64(_) => Encoding::Base64,
            Self::AppendedBase64(_) => Encoding::AppendedBase64,
            Self::AppendedRaw(_) => Encoding::AppendedRaw,
        }
    }

    /// number of bytes already claimed in the appended section. Always zero for inline encodings
    pub fn offset(&self) -> u64 {
        match self {
            Self::AppendedBase64(encoder) => encoder.offset(),
            Self::AppendedRaw(encoder) => encoder.offset(),
            Self::Ascii(_) | Self::Base64(_) => 0,
        }
    }
}

macro_rules! forward {
    ($encoder:expr, $inner:ident => $body:expr) => {
        match $encoder {
            Encoder::Ascii($inner) => $body,
            Encoder::Base64($inner) => $body,
            Encoder::AppendedBase64($inner) => $body,
            Encoder::AppendedRaw($inner) => $body,
        }
    };
}

impl<'a> Encode<'a> for Encoder<'a> {
    fn is_appended(&self) -> bool {
        forward!(self, inner => inner.is_appended())
    }

    fn add_header_attributes(&self, attributes: &mut Attributes) {
        forward!(self, inner => inner.add_header_attributes(attributes))
    }

    fn write_data<W: Write>(&mut self, writer: &mut W, data: ArrayRef<'a>) -> Result<(), Error> {
        forward!(self, inner => inner.write_data(writer, data))
    }

    fn add_data_attributes(&self, attributes: &mut Attributes) {
        forward!(self, inner => inner.add_data_attributes(attributes))
    }

    fn appended_attributes(&self) -> Attributes {
        forward!(self, inner => inner.appended_attributes())
    }

    fn write_appended<W: Write>(self, writer: &mut W) -> Result<(), Error> {
        forward!(self, inner => inner.write_appended(writer))
    }
}
