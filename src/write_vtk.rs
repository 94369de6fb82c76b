use crate::array::ArrayRef;
use crate::traits::Encode;
use crate::types::BYTE_ORDER;
use crate::Attributes;
use crate::Error;

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::writer::Writer;

const VERSION: &str = "1.0";

/// Write the xml declaration and open the `VTKFile` element.
///
/// `file_type` is the vtk dataset type such as `UnstructuredGrid` or `RectilinearGrid`. The
/// header attributes of the encoder (`header_type`) are added to the element.
pub fn start_file<'a, W: Write, E: Encode<'a>>(
    writer: &mut Writer<W>,
    encoder: &E,
    file_type: &str,
) -> Result<(), Error> {
    writer.write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

    let mut attributes = Attributes::new();
    attributes.set("type", file_type);
    attributes.set("version", VERSION);
    attributes.set("byte_order", BYTE_ORDER);
    encoder.add_header_attributes(&mut attributes);

    let start = BytesStart::new("VTKFile").with_attributes(attributes.pairs());
    writer.write_event(Event::Start(start))?;

    Ok(())
}

/// close the `VTKFile` element
pub fn end_file<W: Write>(writer: &mut Writer<W>) -> Result<(), Error> {
    writer.write_event(Event::End(BytesEnd::new("VTKFile")))?;
    Ok(())
}

/// Write a single `DataArray` element.
///
/// For inline encodings the array data is written inside the element. For appended
/// encodings the array is only recorded and an empty element carrying the offset of the data
/// is written. In that case you are also responsible for calling [`write_appended_data`] once
/// every array of the file has been declared.
pub fn write_data_array<'a, W: Write, E: Encode<'a>>(
    writer: &mut Writer<W>,
    encoder: &mut E,
    name: &str,
    components: usize,
    data: ArrayRef<'a>,
) -> Result<(), Error> {
    let mut attributes = Attributes::new();
    attributes.set("type", data.data_type().to_string());
    attributes.set("Name", name);
    attributes.set("NumberOfComponents", components.to_string());

    if encoder.is_appended() {
        // the offset is only known once the array has been recorded
        encoder.write_data(writer.inner(), data)?;
        encoder.add_data_attributes(&mut attributes);

        let element = BytesStart::new("DataArray").with_attributes(attributes.pairs());
        writer.write_event(Event::Empty(element))?;
    } else {
        encoder.add_data_attributes(&mut attributes);

        let element = BytesStart::new("DataArray").with_attributes(attributes.pairs());
        writer.write_event(Event::Start(element))?;
        encoder.write_data(writer.inner(), data)?;
        writer.write_event(Event::End(BytesEnd::new("DataArray")))?;
    }

    Ok(())
}

/// Write the `AppendedData` element holding every array recorded by an appended encoder.
///
/// Offsets in the `DataArray` elements are counted from the byte after the leading `_`.
/// Inline encoders have nothing to append and write nothing.
pub fn write_appended_data<'a, W: Write, E: Encode<'a>>(
    writer: &mut Writer<W>,
    encoder: E,
) -> Result<(), Error> {
    if !encoder.is_appended() {
        return encoder.write_appended(writer.inner());
    }

    let attributes = encoder.appended_attributes();
    let start = BytesStart::new("AppendedData").with_attributes(attributes.pairs());
    writer.write_event(Event::Start(start))?;

    let inner = writer.inner();
    inner.write_all(b"_")?;
    encoder.write_appended(inner)?;
    inner.write_all(b"\n")?;

    writer.write_event(Event::End(BytesEnd::new("AppendedData")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Encoder, Encoding, HeaderType, WriterOptions};

    fn write_document(encoding: Encoding, options: WriterOptions) -> String {
        let x = [0.5f64, 1.5];
        let ids = [7i64];

        let mut writer = Writer::new(Vec::new());
        let mut encoder = Encoder::new(encoding, options);

        start_file(&mut writer, &encoder, "UnstructuredGrid").unwrap();
        write_data_array(&mut writer, &mut encoder, "x", 1, ArrayRef::from(&x)).unwrap();
        write_data_array(&mut writer, &mut encoder, "ids", 1, ArrayRef::from(&ids)).unwrap();
        write_appended_data(&mut writer, encoder).unwrap();
        end_file(&mut writer).unwrap();

        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn ascii_document() {
        let text = write_document(Encoding::Ascii, WriterOptions::default());

        assert!(text.starts_with("<?xml version=\"1.0\"?>"));
        assert!(text.contains(
            "<VTKFile byte_order=\"LittleEndian\" type=\"UnstructuredGrid\" version=\"1.0\">"
        ));
        assert!(text.contains(
            "<DataArray Name=\"x\" NumberOfComponents=\"1\" format=\"ascii\" type=\"Float64\">0.5 1.5 \n</DataArray>"
        ));
        assert!(text.contains(">7 \n</DataArray>"));
        assert!(!text.contains("AppendedData"));
        assert!(text.ends_with("</VTKFile>"));
    }

    #[test]
    fn base64_document() {
        let options = WriterOptions::default().with_header_type(HeaderType::UInt32);
        let text = write_document(Encoding::Base64, options);

        assert!(text.contains("header_type=\"UInt32\""));
        assert!(text.contains("format=\"binary\""));
        assert!(!text.contains("AppendedData"));
    }

    #[test]
    fn appended_base64_document() {
        let options = WriterOptions::default().with_header_type(HeaderType::UInt32);
        let text = write_document(Encoding::AppendedBase64, options);

        // x: 4 + 16 bytes -> 28 chars
        assert!(text.contains(
            "<DataArray Name=\"x\" NumberOfComponents=\"1\" format=\"appended\" offset=\"0\" type=\"Float64\"/>"
        ));
        assert!(text.contains("Name=\"ids\" NumberOfComponents=\"1\" format=\"appended\" offset=\"28\""));
        let opening = "<AppendedData encoding=\"base64\">_";
        let start = text.find(opening).unwrap() + opening.len();
        let end = text.find("\n</AppendedData>").unwrap();
        assert_eq!(end - start, 28 + 16);
    }
}
