use crate::format::FloatFormat;
use crate::Error;

use derive_more::{Constructor, Display};
use num_traits::ToPrimitive;
use std::io::Write;

/// value of the `byte_order` attribute matching every binary payload this crate writes
pub const BYTE_ORDER: &str = "LittleEndian";

/// Canonical VTK type name of each numeric kind that can be written.
///
/// The `Display` output is the string expected in `type` and `header_type` attributes.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl DataType {
    /// size of a single scalar of this type in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::Int8 | Self::UInt8 => 1,
            Self::Int16 | Self::UInt16 => 2,
            Self::Int32 | Self::UInt32 | Self::Float32 => 4,
            Self::Int64 | Self::UInt64 | Self::Float64 => 8,
        }
    }
}

/// Unsigned integer type used to prefix every binary payload with its length in bytes.
///
/// The width is shared by every array in a document and must agree with the
/// `header_type` attribute on the root element.
#[derive(Display, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeaderType {
    UInt32,
    UInt64,
}

impl Default for HeaderType {
    fn default() -> Self {
        HeaderType::UInt64
    }
}

impl HeaderType {
    /// number of bytes the length prefix occupies
    pub fn width(&self) -> usize {
        match self {
            Self::UInt32 => 4,
            Self::UInt64 => 8,
        }
    }

    /// type name used for the `header_type` attribute
    pub fn data_type(&self) -> DataType {
        match self {
            Self::UInt32 => DataType::UInt32,
            Self::UInt64 => DataType::UInt64,
        }
    }

    /// make sure a payload of `bytes` length can be described by this header
    pub(crate) fn check(&self, bytes: usize) -> Result<(), Error> {
        let fits = match self {
            Self::UInt32 => bytes.to_u32().is_some(),
            Self::UInt64 => bytes.to_u64().is_some(),
        };

        if fits {
            Ok(())
        } else {
            Err(Error::HeaderOverflow {
                bytes,
                header: *self,
            })
        }
    }

    /// write the little endian length prefix for a payload of `bytes` length
    pub(crate) fn write_length<W: Write>(&self, writer: &mut W, bytes: usize) -> Result<(), Error> {
        let overflow = || Error::HeaderOverflow {
            bytes,
            header: *self,
        };

        match self {
            Self::UInt32 => {
                let length = bytes.to_u32().ok_or_else(overflow)?;
                writer.write_all(&length.to_le_bytes())?;
            }
            Self::UInt64 => {
                let length = bytes.to_u64().ok_or_else(overflow)?;
                writer.write_all(&length.to_le_bytes())?;
            }
        }

        Ok(())
    }
}

#[derive(Constructor, Debug, Clone, Copy, PartialEq, Default)]
/// Options every encoder of a single document is constructed with.
///
/// Nothing here is global, so two documents may be written side by side with
/// different settings.
pub struct WriterOptions {
    /// how floating point values are formatted by the ascii encoder
    pub float_format: FloatFormat,
    /// width of the length prefix written before binary payloads
    pub header_type: HeaderType,
}

impl WriterOptions {
    pub fn with_float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }

    pub fn with_header_type(mut self, header_type: HeaderType) -> Self {
        self.header_type = header_type;
        self
    }
}
