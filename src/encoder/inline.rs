//! encodings that write array data inside the `DataArray` element

use super::base64::Base64Output;
use crate::array::ArrayRef;
use crate::format::FloatFormat;
use crate::traits::Encode;
use crate::types::{HeaderType, WriterOptions};
use crate::Attributes;
use crate::Error;

use std::io::Write;

/// Write every scalar as text, separated by spaces
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ascii {
    float_format: FloatFormat,
}

impl Ascii {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            float_format: options.float_format,
        }
    }
}

impl<'a> Encode<'a> for Ascii {
    fn is_appended(&self) -> bool {
        false
    }

    fn add_header_attributes(&self, _: &mut Attributes) {}

    fn write_data<W: Write>(&mut self, writer: &mut W, data: ArrayRef<'a>) -> Result<(), Error> {
        data.write_ascii(writer, &self.float_format)?;
        writer.write_all(b"\n")?;
        Ok(())
    }

    fn add_data_attributes(&self, attributes: &mut Attributes) {
        attributes.set("format", "ascii");
    }

    fn appended_attributes(&self) -> Attributes {
        Attributes::new()
    }

    fn write_appended<W: Write>(self, _: &mut W) -> Result<(), Error> {
        Ok(())
    }
}

/// Write the length header and the little endian bytes of an array as a single base64 run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Base64 {
    header_type: HeaderType,
}

impl Base64 {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            header_type: options.header_type,
        }
    }
}

impl<'a> Encode<'a> for Base64 {
    fn is_appended(&self) -> bool {
        false
    }

    fn add_header_attributes(&self, attributes: &mut Attributes) {
        attributes.set("header_type", self.header_type.data_type().to_string());
    }

    fn write_data<W: Write>(&mut self, writer: &mut W, data: ArrayRef<'a>) -> Result<(), Error> {
        let bytes = data.byte_len();
        self.header_type.check(bytes)?;

        let mut output = Base64Output::new(&mut *writer);
        self.header_type.write_length(&mut output, bytes)?;
        output.write_output_data(data)?;
        output.close_output_data()?;

        writer.write_all(b"\n")?;
        Ok(())
    }

    fn add_data_attributes(&self, attributes: &mut Attributes) {
        attributes.set("format", "binary");
    }

    fn appended_attributes(&self) -> Attributes {
        Attributes::new()
    }

    fn write_appended<W: Write>(self, _: &mut W) -> Result<(), Error> {
        Ok(())
    }
}
