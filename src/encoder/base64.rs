//! streaming base64 output of binary payloads

use crate::array::ArrayRef;
use crate::Error;

use base64::write::EncoderWriter;
use std::io::Write;

/// Number of base64 characters produced for `raw_bytes` bytes of input, including padding.
///
/// Base64 turns every group of three bytes into four characters and pads a trailing partial
/// group to a full four characters, so this is `4 * ceil(raw_bytes / 3)`.
pub fn encoded_number_of_bytes(raw_bytes: usize) -> usize {
    (raw_bytes + 2) / 3 * 4
}

/// A single base64 run bound to one writer.
///
/// Several writes can be made into the same run, for example the length header followed by
/// the payload, and they are encoded as one contiguous unit. Bytes are encoded as they arrive
/// and at most two bytes are carried between writes, so the encoded payload is never held in
/// memory as a whole. [`close_output_data`](Base64Output::close_output_data) encodes the
/// carried bytes with `=` padding and must be called to finish the run.
pub struct Base64Output<W: Write> {
    encoder: EncoderWriter<W>,
}

impl<W: Write> Base64Output<W> {
    pub fn new(writer: W) -> Self {
        Self {
            encoder: EncoderWriter::new(writer, base64::STANDARD),
        }
    }

    /// append raw bytes to the run
    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.encoder.write_all(bytes)?;
        Ok(())
    }

    /// append the little endian bytes of every scalar in `data` to the run
    pub fn write_output_data(&mut self, data: ArrayRef<'_>) -> Result<(), Error> {
        data.write_le_bytes(&mut self.encoder)
    }

    /// encode any carried bytes, pad, and end the run
    pub fn close_output_data(mut self) -> Result<(), Error> {
        self.encoder.finish()?;
        Ok(())
    }
}

impl<W: Write> Write for Base64Output<W> {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.encoder.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.encoder.flush()
    }
}
