#![doc = include_str!("../README.md")]

pub mod array;
mod attributes;
pub mod encoder;
pub mod format;
pub mod prelude;
mod traits;
mod types;
mod write_vtk;

pub use array::ArrayRef;
pub use attributes::Attributes;
pub use encoder::base64::{encoded_number_of_bytes, Base64Output};
pub use encoder::{AppendedBase64, AppendedRaw, Ascii, Base64, Encoder, Encoding};
pub use format::FloatFormat;
pub use traits::{Encode, Numeric};
pub use types::{DataType, HeaderType, WriterOptions, BYTE_ORDER};
pub use write_vtk::{end_file, start_file, write_appended_data, write_data_array};

pub use ndarray;

pub use quick_xml::writer::Writer;

/// general purpose error enumeration for possible causes of failure.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("An io error occured: `{0}`")]
    Io(#[from] std::io::Error),
    #[error("Could not write XML data to file: `{0}`")]
    XmlWrite(#[from] quick_xml::Error),
    #[error("payload of {bytes} bytes does not fit in a `{header}` length header")]
    HeaderOverflow { bytes: usize, header: HeaderType },
    #[error("array is not laid out contiguously in standard order and cannot be borrowed as a slice")]
    NonContiguous,
    #[error("unknown encoding `{0}`, expected one of ascii, base64, appended-base64, binary")]
    InvalidEncoding(String),
    #[error("unsupported floating point format `{0}`, expected one of %g %e %f (with optional .precision) or `shortest`")]
    InvalidFloatFormat(String),
}
