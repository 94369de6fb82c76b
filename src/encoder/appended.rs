//! encodings that defer array data to the `AppendedData` section
//!
//! Only the offset of an array is known when its `DataArray` element is written, so both
//! encoders here predict where each array will end up. Every array is written as its length
//! header followed by its bytes. The base64 encoder writes each of these as a separate base64
//! run, so a record takes `encoded_number_of_bytes(header + payload)` bytes. The raw encoder
//! writes the bytes unchanged, so a record takes `header + payload` bytes.

use super::base64::{encoded_number_of_bytes, Base64Output};
use super::ledger::Ledger;
use crate::array::ArrayRef;
use crate::traits::Encode;
use crate::types::{HeaderType, WriterOptions};
use crate::Attributes;
use crate::Error;

use std::io::Write;

/// Record arrays and write them, base64 encoded, to the appended section
#[derive(Debug, Default)]
pub struct AppendedBase64<'a> {
    header_type: HeaderType,
    ledger: Ledger<'a>,
}

impl<'a> AppendedBase64<'a> {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            header_type: options.header_type,
            ledger: Ledger::default(),
        }
    }

    /// number of bytes the appended section will hold once written
    pub fn offset(&self) -> u64 {
        self.ledger.offset()
    }

    /// number of arrays waiting to be written
    pub fn pending(&self) -> usize {
        self.ledger.len()
    }
}

impl<'a> Encode<'a> for AppendedBase64<'a> {
    fn is_appended(&self) -> bool {
        true
    }

    fn add_header_attributes(&self, attributes: &mut Attributes) {
        attributes.set("header_type", self.header_type.data_type().to_string());
    }

    fn write_data<W: Write>(&mut self, _: &mut W, data: ArrayRef<'a>) -> Result<(), Error> {
        let bytes = data.byte_len();
        self.header_type.check(bytes)?;

        let encoded = encoded_number_of_bytes(bytes + self.header_type.width());
        let offset = self.ledger.record(data, encoded);

        log::trace!(
            "recorded {} array of {bytes} bytes at base64 offset {offset}",
            data.data_type()
        );

        Ok(())
    }

    fn add_data_attributes(&self, attributes: &mut Attributes) {
        attributes.set("format", "appended");
        attributes.set("offset", self.ledger.last_offset().to_string());
    }

    fn appended_attributes(&self) -> Attributes {
        [("encoding", "base64")].into_iter().collect()
    }

    fn write_appended<W: Write>(self, writer: &mut W) -> Result<(), Error> {
        log::debug!(
            "writing {} base64 appended arrays ({} bytes)",
            self.ledger.len(),
            self.ledger.offset()
        );

        for record in self.ledger.records() {
            let mut output = Base64Output::new(&mut *writer);
            self.header_type
                .write_length(&mut output, record.data.byte_len())?;
            output.write_output_data(record.data)?;
            output.close_output_data()?;
        }

        Ok(())
    }
}

/// Record arrays and write their raw bytes to the appended section
#[derive(Debug, Default)]
pub struct AppendedRaw<'a> {
    header_type: HeaderType,
    ledger: Ledger<'a>,
}

impl<'a> AppendedRaw<'a> {
    pub fn new(options: WriterOptions) -> Self {
        Self {
            header_type: options.header_type,
            ledger: Ledger::default(),
        }
    }

    /// number of bytes the appended section will hold once written
    pub fn offset(&self) -> u64 {
        self.ledger.offset()
    }

    /// number of arrays waiting to be written
    pub fn pending(&self) -> usize {
        self.ledger.len()
    }
}

impl<'a> Encode<'a> for AppendedRaw<'a> {
    fn is_appended(&self) -> bool {
        true
    }

    fn add_header_attributes(&self, attributes: &mut Attributes) {
        attributes.set("header_type", self.header_type.data_type().to_string());
    }

    fn write_data<W: Write>(&mut self, _: &mut W, data: ArrayRef<'a>) -> Result<(), Error> {
        let bytes = data.byte_len();
        self.header_type.check(bytes)?;

        let offset = self.ledger.record(data, self.header_type.width() + bytes);

        log::trace!(
            "recorded {} array of {bytes} bytes at raw offset {offset}",
            data.data_type()
        );

        Ok(())
    }

    fn add_data_attributes(&self, attributes: &mut Attributes) {
        attributes.set("format", "appended");
        attributes.set("offset", self.ledger.last_offset().to_string());
    }

    fn appended_attributes(&self) -> Attributes {
        [("encoding", "raw")].into_iter().collect()
    }

    fn write_appended<W: Write>(self, writer: &mut W) -> Result<(), Error> {
        log::debug!(
            "writing {} raw appended arrays ({} bytes)",
            self.ledger.len(),
            self.ledger.offset()
        );

        for record in self.ledger.records() {
            self.header_type
                .write_length(writer, record.data.byte_len())?;
            record.data.write_le_bytes(writer)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uint32() -> WriterOptions {
        WriterOptions::default().with_header_type(HeaderType::UInt32)
    }

    #[test]
    fn base64_single_array() {
        let data = [1i32, 2];
        let mut encoder = AppendedBase64::new(uint32());
        let mut out = Vec::new();

        let attributes = encoder.declare_array(&mut out, ArrayRef::from(&data)).unwrap();
        assert!(out.is_empty());
        assert_eq!(attributes.value("format"), Some("appended"));
        assert_eq!(attributes.value("offset"), Some("0"));
        assert_eq!(encoder.offset(), 16);

        encoder.write_appended(&mut out).unwrap();
        assert_eq!(out.len(), 16);

        let decoded = base64::decode(&out).unwrap();
        assert_eq!(decoded, vec![8, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0]);
    }

    #[test]
    fn base64_offsets_use_encoded_size() {
        let a = [0u8; 1];
        let b = [0u16; 5];
        let c = [0f64; 3];
        let mut encoder = AppendedBase64::new(uint32());
        let mut sink = std::io::sink();

        let offsets: Vec<String> = [ArrayRef::from(&a), ArrayRef::from(&b), ArrayRef::from(&c)]
            .into_iter()
            .map(|data| {
                let attributes = encoder.declare_array(&mut sink, data).unwrap();
                attributes.value("offset").unwrap().to_string()
            })
            .collect();

        // 4 + 1 -> 8 chars, 4 + 10 -> 20 chars, 4 + 24 -> 40 chars
        assert_eq!(offsets, vec!["0", "8", "28"]);
        assert_eq!(encoder.offset(), 68);

        let mut out = Vec::new();
        encoder.write_appended(&mut out).unwrap();
        assert_eq!(out.len(), 68);
    }

    #[test]
    fn raw_offsets() {
        let a = [1i32, 2];
        let b = [3i32, 4, 5, 6];
        let mut encoder = AppendedRaw::new(uint32());
        let mut sink = std::io::sink();

        let first = encoder.declare_array(&mut sink, ArrayRef::from(&a)).unwrap();
        let second = encoder.declare_array(&mut sink, ArrayRef::from(&b)).unwrap();

        assert_eq!(first.value("offset"), Some("0"));
        assert_eq!(second.value("offset"), Some("12"));
        assert_eq!(encoder.offset(), 32);
        assert_eq!(encoder.pending(), 2);
    }

    #[test]
    fn raw_flush_in_declaration_order() {
        let a = [1i32, 2];
        let b = [3u8];
        let mut encoder = AppendedRaw::new(uint32());
        let mut sink = std::io::sink();

        encoder.write_data(&mut sink, ArrayRef::from(&a)).unwrap();
        encoder.write_data(&mut sink, ArrayRef::from(&b)).unwrap();
        let total = encoder.offset();

        let mut out = Vec::new();
        encoder.write_appended(&mut out).unwrap();

        assert_eq!(out.len() as u64, total);
        assert_eq!(
            out,
            vec![8, 0, 0, 0, 1, 0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 3]
        );
    }

    #[test]
    fn appended_attributes() {
        let raw = AppendedRaw::default();
        assert_eq!(raw.appended_attributes().value("encoding"), Some("raw"));

        let base64 = AppendedBase64::default();
        assert_eq!(base64.appended_attributes().value("encoding"), Some("base64"));

        let mut header = Attributes::new();
        base64.add_header_attributes(&mut header);
        assert_eq!(header.value("header_type"), Some("UInt64"));
    }

    #[test]
    fn empty_ledger_writes_nothing() {
        let mut out = Vec::new();
        AppendedRaw::default().write_appended(&mut out).unwrap();
        AppendedBase64::default().write_appended(&mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn empty_array_still_has_header() {
        let empty: [f32; 0] = [];
        let mut encoder = AppendedRaw::default();
        let mut sink = std::io::sink();

        encoder.write_data(&mut sink, ArrayRef::from(&empty)).unwrap();
        assert_eq!(encoder.offset(), 8);

        let mut out = Vec::new();
        encoder.write_appended(&mut out).unwrap();
        assert_eq!(out, vec![0; 8]);
    }
}
