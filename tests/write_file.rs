use quick_xml::events::{BytesEnd, BytesStart, Event};
use vtk_encode::prelude::*;

struct Grid {
    points: Vec<f64>,
    connectivity: Vec<i64>,
    offsets: Vec<i64>,
    types: Vec<u8>,
    pressure: Vec<f32>,
}

fn grid() -> Grid {
    Grid {
        points: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        connectivity: vec![0, 1, 2, 3],
        offsets: vec![4],
        types: vec![10],
        pressure: vec![1.0, 2.5, -3.0, 0.0],
    }
}

fn write_grid(grid: &Grid, encoding: Encoding, options: WriterOptions) -> Vec<u8> {
    let mut writer = Writer::new(Vec::new());
    let mut encoder = Encoder::new(encoding, options);

    vtk_encode::start_file(&mut writer, &encoder, "UnstructuredGrid").unwrap();

    writer
        .write_event(Event::Start(BytesStart::new("UnstructuredGrid")))
        .unwrap();
    let piece = BytesStart::new("Piece")
        .with_attributes([("NumberOfPoints", "4"), ("NumberOfCells", "1")]);
    writer.write_event(Event::Start(piece)).unwrap();

    writer.write_event(Event::Start(BytesStart::new("Points"))).unwrap();
    vtk_encode::write_data_array(&mut writer, &mut encoder, "Points", 3, ArrayRef::from(&grid.points))
        .unwrap();
    writer.write_event(Event::End(BytesEnd::new("Points"))).unwrap();

    writer.write_event(Event::Start(BytesStart::new("Cells"))).unwrap();
    vtk_encode::write_data_array(
        &mut writer,
        &mut encoder,
        "connectivity",
        1,
        ArrayRef::from(&grid.connectivity),
    )
    .unwrap();
    vtk_encode::write_data_array(&mut writer, &mut encoder, "offsets", 1, ArrayRef::from(&grid.offsets))
        .unwrap();
    vtk_encode::write_data_array(&mut writer, &mut encoder, "types", 1, ArrayRef::from(&grid.types))
        .unwrap();
    writer.write_event(Event::End(BytesEnd::new("Cells"))).unwrap();

    writer.write_event(Event::Start(BytesStart::new("PointData"))).unwrap();
    vtk_encode::write_data_array(&mut writer, &mut encoder, "pressure", 1, ArrayRef::from(&grid.pressure))
        .unwrap();
    writer.write_event(Event::End(BytesEnd::new("PointData"))).unwrap();

    writer.write_event(Event::End(BytesEnd::new("Piece"))).unwrap();
    writer
        .write_event(Event::End(BytesEnd::new("UnstructuredGrid")))
        .unwrap();

    vtk_encode::write_appended_data(&mut writer, encoder).unwrap();
    vtk_encode::end_file(&mut writer).unwrap();

    writer.into_inner()
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// offset attribute of the named data array
fn offset_of(file: &[u8], name: &str) -> usize {
    let tag = format!("Name=\"{name}\"");
    let start = find(file, tag.as_bytes()).unwrap();
    let rest = &file[start..];
    let offset = find(rest, b"offset=\"").unwrap() + "offset=\"".len();
    let end = offset + find(&rest[offset..], b"\"").unwrap();
    std::str::from_utf8(&rest[offset..end]).unwrap().parse().unwrap()
}

fn appended_section<'a>(file: &'a [u8], encoding: &str) -> &'a [u8] {
    let opening = format!("<AppendedData encoding=\"{encoding}\">_");
    let start = find(file, opening.as_bytes()).unwrap() + opening.len();
    let end = find(file, b"\n</AppendedData>").unwrap();
    &file[start..end]
}

#[test]
fn raw_appended_file() {
    let grid = grid();
    let options = WriterOptions::default().with_header_type(HeaderType::UInt32);
    let file = write_grid(&grid, Encoding::AppendedRaw, options);

    assert!(find(&file, b"header_type=\"UInt32\"").is_some());
    assert!(find(&file, b"byte_order=\"LittleEndian\"").is_some());

    let appended = appended_section(&file, "raw");

    // points: 4 + 96, connectivity: 4 + 32, offsets: 4 + 8, types: 4 + 1, pressure: 4 + 16
    assert_eq!(offset_of(&file, "Points"), 0);
    assert_eq!(offset_of(&file, "connectivity"), 100);
    assert_eq!(offset_of(&file, "offsets"), 136);
    assert_eq!(offset_of(&file, "types"), 148);
    assert_eq!(offset_of(&file, "pressure"), 153);
    assert_eq!(appended.len(), 173);

    let pressure = &appended[153..];
    assert_eq!(&pressure[..4], &16u32.to_le_bytes());
    let values: Vec<f32> = pressure[4..]
        .chunks(4)
        .map(|bytes| f32::from_le_bytes(bytes.try_into().unwrap()))
        .collect();
    assert_eq!(values, grid.pressure);

    let types = &appended[148..153];
    assert_eq!(types, &[1u8, 0, 0, 0, 10]);
}

#[test]
fn base64_appended_file() {
    let grid = grid();
    let file = write_grid(&grid, Encoding::AppendedBase64, WriterOptions::default());
    let appended = appended_section(&file, "base64");

    let offset = offset_of(&file, "connectivity");
    assert_eq!(offset, vtk_encode::encoded_number_of_bytes(8 + 96));

    let len = vtk_encode::encoded_number_of_bytes(8 + 32);
    let decoded = base64::decode(&appended[offset..offset + len]).unwrap();
    assert_eq!(&decoded[..8], &32u64.to_le_bytes());

    let connectivity: Vec<i64> = decoded[8..]
        .chunks(8)
        .map(|bytes| i64::from_le_bytes(bytes.try_into().unwrap()))
        .collect();
    assert_eq!(connectivity, grid.connectivity);

    let pressure = offset_of(&file, "pressure");
    assert_eq!(
        appended.len(),
        pressure + vtk_encode::encoded_number_of_bytes(8 + 16)
    );
}

#[test]
fn inline_files_parse_as_xml() {
    let grid = grid();

    for encoding in [Encoding::Ascii, Encoding::Base64] {
        let file = write_grid(&grid, encoding, WriterOptions::default());
        let text = String::from_utf8(file).unwrap();

        let mut reader = quick_xml::Reader::from_reader(text.as_bytes());
        let mut buffer = Vec::new();
        let mut arrays = 0;
        loop {
            match reader.read_event_into(&mut buffer).unwrap() {
                Event::Start(element) if element.name().as_ref() == b"DataArray" => {
                    let format = element
                        .attributes()
                        .map(|attribute| attribute.unwrap())
                        .find(|attribute| attribute.key.as_ref() == b"format")
                        .unwrap();
                    assert_eq!(format.value.as_ref(), encoding.to_str().as_bytes());
                    arrays += 1;
                }
                Event::Start(element) if element.name().as_ref() == b"AppendedData" => {
                    panic!("inline encodings do not write appended data")
                }
                Event::Eof => break,
                _ => (),
            }
            buffer.clear();
        }

        assert_eq!(arrays, 5);
    }
}

#[test]
fn ascii_file_contents() {
    let grid = grid();
    let file = write_grid(&grid, Encoding::Ascii, WriterOptions::default());
    let text = String::from_utf8(file).unwrap();

    assert!(text.contains(
        "<DataArray Name=\"pressure\" NumberOfComponents=\"1\" format=\"ascii\" type=\"Float32\">1 2.5 -3 0 \n</DataArray>"
    ));
    assert!(text.contains(">10 \n</DataArray>"));
    assert!(text.contains("type=\"UInt8\""));
    assert!(!text.contains("header_type"));
}
