//! borrowed numeric arrays handed to an encoder

use crate::format::FloatFormat;
use crate::traits::Numeric;
use crate::types::DataType;
use crate::Error;

use ndarray::{ArrayBase, Data, Dimension};
use std::io::Write;

/// bytes converted per `write_all` call when writing an array in binary form
const CHUNK_BYTES: usize = 4096;

/// A contiguous, borrowed run of scalars of a single numeric type.
///
/// The variant carries the type information that is needed for the `type` attribute and for
/// the size of the payload. Build one with `From` on a slice or `Vec` of any [`Numeric`] type,
/// or with [`ArrayRef::from_ndarray`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrayRef<'a> {
    Int8(&'a [i8]),
    UInt8(&'a [u8]),
    Int16(&'a [i16]),
    UInt16(&'a [u16]),
    Int32(&'a [i32]),
    UInt32(&'a [u32]),
    Int64(&'a [i64]),
    UInt64(&'a [u64]),
    Float32(&'a [f32]),
    Float64(&'a [f64]),
}

macro_rules! with_slice {
    ($array:expr, $slice:ident => $body:expr) => {
        match $array {
            ArrayRef::Int8($slice) => $body,
            ArrayRef::UInt8($slice) => $body,
            ArrayRef::Int16($slice) => $body,
            ArrayRef::UInt16($slice) => $body,
            ArrayRef::Int32($slice) => $body,
            ArrayRef::UInt32($slice) => $body,
            ArrayRef::Int64($slice) => $body,
            ArrayRef::UInt64($slice) => $body,
            ArrayRef::Float32($slice) => $body,
            ArrayRef::Float64($slice) => $body,
        }
    };
}

impl<'a> ArrayRef<'a> {
    /// Borrow the elements of an ndarray.
    ///
    /// The array must be laid out contiguously in standard (row major) order, otherwise
    /// [`Error::NonContiguous`] is returned.
    pub fn from_ndarray<N, S, D>(array: &'a ArrayBase<S, D>) -> Result<Self, Error>
    where
        N: Numeric,
        S: Data<Elem = N>,
        D: Dimension,
    {
        array
            .as_slice()
            .map(N::array_ref)
            .ok_or(Error::NonContiguous)
    }

    /// number of scalars in the array
    pub fn len(&self) -> usize {
        with_slice!(*self, slice => slice.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        with_slice!(*self, slice => element_type(slice))
    }

    /// size of the raw (unencoded) payload in bytes
    pub fn byte_len(&self) -> usize {
        self.len() * self.data_type().size()
    }

    /// write every scalar as little endian bytes
    pub fn write_le_bytes<W: Write>(&self, writer: &mut W) -> Result<(), Error> {
        with_slice!(*self, slice => write_slice_le(slice, writer))
    }

    /// write every scalar as text followed by a single space
    pub fn write_ascii<W: Write>(&self, writer: &mut W, format: &FloatFormat) -> Result<(), Error> {
        with_slice!(*self, slice => write_slice_ascii(slice, writer, format))
    }
}

impl<'a, N: Numeric> From<&'a [N]> for ArrayRef<'a> {
    fn from(data: &'a [N]) -> Self {
        N::array_ref(data)
    }
}

impl<'a, N: Numeric> From<&'a Vec<N>> for ArrayRef<'a> {
    fn from(data: &'a Vec<N>) -> Self {
        N::array_ref(data.as_slice())
    }
}

impl<'a, N: Numeric, const LEN: usize> From<&'a [N; LEN]> for ArrayRef<'a> {
    fn from(data: &'a [N; LEN]) -> Self {
        N::array_ref(data.as_slice())
    }
}

fn element_type<N: Numeric>(_: &[N]) -> DataType {
    N::DATA_TYPE
}

fn write_slice_le<N: Numeric, W: Write>(slice: &[N], writer: &mut W) -> Result<(), Error> {
    let mut buffer = [0u8; CHUNK_BYTES];

    for chunk in slice.chunks(CHUNK_BYTES / N::SIZE) {
        let mut end = 0;
        for value in chunk {
            value.put_le_bytes(&mut buffer[end..end + N::SIZE]);
            end += N::SIZE;
        }
        writer.write_all(&buffer[..end])?;
    }

    Ok(())
}

fn write_slice_ascii<N: Numeric, W: Write>(
    slice: &[N],
    writer: &mut W,
    format: &FloatFormat,
) -> Result<(), Error> {
    for value in slice {
        value.write_ascii(writer, format)?;
        writer.write_all(b" ")?;
    }

    Ok(())
}
