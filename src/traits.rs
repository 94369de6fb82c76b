//! # Traits
//!
//! `Numeric` describes the scalar types that can be written to a file, and `Encode` is the
//! contract shared by every data encoding. A document writer holds exactly one encoder and
//! drives it through the same sequence of calls regardless of which encoding was chosen:
//!
//! ```ignore
//! let mut encoder = vtk_encode::Encoder::new(vtk_encode::Encoding::AppendedRaw, options);
//!
//! // once per document, before any array
//! encoder.add_header_attributes(&mut file_attributes);
//!
//! // once per array
//! encoder.write_data(&mut writer, ArrayRef::from(&x_locations))?;
//! encoder.add_data_attributes(&mut array_attributes);
//!
//! // once per document, after every array has been declared
//! let appended = encoder.appended_attributes();
//! encoder.write_appended(&mut writer)?;
//! ```

use crate::array::ArrayRef;
use crate::format::FloatFormat;
use crate::types::DataType;
use crate::Attributes;
use crate::Error;

use std::io;
use std::io::Write;

mod private {
    pub trait Sealed {}
}

/// A scalar type with a binary and a text representation in a vtk file.
///
/// This trait is sealed: arrays can only be made from the integer types
/// `i8 u8 i16 u16 i32 u32 i64 u64` and the floating point types `f32 f64`.
pub trait Numeric: private::Sealed + Copy + PartialEq + std::fmt::Debug + 'static {
    /// size of the scalar in bytes
    const SIZE: usize;

    /// type name written in the `type` attribute of the data array
    const DATA_TYPE: DataType;

    /// copy the little endian bytes of `self` into `out`, which is exactly `SIZE` long
    fn put_le_bytes(self, out: &mut [u8]);

    /// write the text form of `self`. Floating point types use `format`,
    /// integers always use decimal notation
    fn write_ascii<W: Write>(self, writer: &mut W, format: &FloatFormat) -> io::Result<()>;

    /// borrow a slice of this type as the matching `ArrayRef` variant
    fn array_ref(data: &[Self]) -> ArrayRef<'_>;
}

macro_rules! impl_numeric {
    ($num:ty, $variant:ident) => {
        impl private::Sealed for $num {}

        impl Numeric for $num {
            const SIZE: usize = std::mem::size_of::<$num>();
            const DATA_TYPE: DataType = DataType::$variant;

            fn put_le_bytes(self, out: &mut [u8]) {
                out.copy_from_slice(&self.to_le_bytes());
            }

            // i8 and u8 go through `Display` as well, so they are written as
            // numbers instead of characters
            fn write_ascii<W: Write>(self, writer: &mut W, _: &FloatFormat) -> io::Result<()> {
                write!(writer, "{}", self)
            }

            fn array_ref(data: &[Self]) -> ArrayRef<'_> {
                ArrayRef::$variant(data)
            }
        }
    };
}

impl_numeric!(i8, Int8);
impl_numeric!(u8, UInt8);
impl_numeric!(i16, Int16);
impl_numeric!(u16, UInt16);
impl_numeric!(i32, Int32);
impl_numeric!(u32, UInt32);
impl_numeric!(i64, Int64);
impl_numeric!(u64, UInt64);

impl private::Sealed for f32 {}

impl Numeric for f32 {
    const SIZE: usize = 4;
    const DATA_TYPE: DataType = DataType::Float32;

    fn put_le_bytes(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn write_ascii<W: Write>(self, writer: &mut W, format: &FloatFormat) -> io::Result<()> {
        format.write_f32(writer, self)
    }

    fn array_ref(data: &[Self]) -> ArrayRef<'_> {
        ArrayRef::Float32(data)
    }
}

impl private::Sealed for f64 {}

impl Numeric for f64 {
    const SIZE: usize = 8;
    const DATA_TYPE: DataType = DataType::Float64;

    fn put_le_bytes(self, out: &mut [u8]) {
        out.copy_from_slice(&self.to_le_bytes());
    }

    fn write_ascii<W: Write>(self, writer: &mut W, format: &FloatFormat) -> io::Result<()> {
        format.write_f64(writer, self)
    }

    fn array_ref(data: &[Self]) -> ArrayRef<'_> {
        ArrayRef::Float64(data)
    }
}

/// Describes how arrays are encoded in a vtk file.
///
/// There are two main ways to write data to a vtk file. Either the data is written inline
/// within the `DataArray` element (ascii text or base64) or only the offset of the data is
/// written in the element and the bytes are emitted later in the `AppendedData` section.
/// Inline encoders write in [`write_data`](Encode::write_data) and do nothing in
/// [`write_appended`](Encode::write_appended). Appended encoders only remember the array in
/// `write_data` and emit every remembered array, in the order it was declared, in
/// `write_appended`.
///
/// The lifetime `'a` is the lifetime of every array handed to the encoder. Appended encoders
/// borrow the arrays until they are flushed, and flushing consumes the encoder, so no array
/// can be declared after the appended data has been written.
pub trait Encode<'a> {
    /// `true` if array data is deferred to the `AppendedData` section
    fn is_appended(&self) -> bool;

    /// add the attributes of the root element that this encoding depends on (`header_type`)
    fn add_header_attributes(&self, attributes: &mut Attributes);

    /// write (inline encodings) or record (appended encodings) a single array
    fn write_data<W: Write>(&mut self, writer: &mut W, data: ArrayRef<'a>) -> Result<(), Error>;

    /// add the attributes describing the array most recently passed to `write_data`
    /// (`format`, and `offset` for appended encodings)
    fn add_data_attributes(&self, attributes: &mut Attributes);

    /// attributes of the `AppendedData` element. Empty for inline encodings
    fn appended_attributes(&self) -> Attributes;

    /// write every recorded array to the appended section
    fn write_appended<W: Write>(self, writer: &mut W) -> Result<(), Error>
    where
        Self: Sized;

    /// `write_data` followed by `add_data_attributes` on a fresh attribute set
    fn declare_array<W: Write>(
        &mut self,
        writer: &mut W,
        data: ArrayRef<'a>,
    ) -> Result<Attributes, Error> {
        self.write_data(writer, data)?;
        let mut attributes = Attributes::default();
        self.add_data_attributes(&mut attributes);
        Ok(attributes)
    }
}
