//! # Number Formatting
//!
//! Ascii output writes every scalar as text. Integers are written in decimal while floating
//! point numbers follow a configurable [`FloatFormat`] that mirrors the printf conversions
//! `%g`, `%e` and `%f` (the default is `%.6g`). The text for a single value is built in a fixed
//! size stack buffer, so formatting large arrays does not allocate.

use crate::Error;

use std::fmt;
use std::fmt::Write as _;
use std::io;
use std::str::FromStr;

/// largest precision accepted by any format. 17 significant digits are
/// enough to round trip any `f64`
pub const MAX_PRECISION: usize = 17;

/// sized to hold `%.17f` of `f64::MAX`
const NUMBER_BUFFER_LEN: usize = 352;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// text representation used for floating point values in ascii encoded arrays
pub enum FloatFormat {
    /// shortest representation that parses back to the same value
    Shortest,
    /// `%.<precision>g`
    General { precision: usize },
    /// `%.<precision>e`
    Scientific { precision: usize },
    /// `%.<precision>f`
    Fixed { precision: usize },
}

impl Default for FloatFormat {
    fn default() -> Self {
        FloatFormat::General { precision: 6 }
    }
}

impl FromStr for FloatFormat {
    type Err = Error;

    /// parse a printf style pattern such as `%.6g`, `%e` or `%.3f`
    fn from_str(pattern: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidFloatFormat(pattern.to_string());

        if pattern.eq_ignore_ascii_case("shortest") {
            return Ok(FloatFormat::Shortest);
        }

        let directive = pattern.strip_prefix('%').ok_or_else(invalid)?;
        let conversion = directive.chars().last().ok_or_else(invalid)?;
        let precision = &directive[..directive.len() - conversion.len_utf8()];

        let precision = if precision.is_empty() {
            6
        } else {
            precision
                .strip_prefix('.')
                .and_then(|digits| digits.parse::<usize>().ok())
                .ok_or_else(invalid)?
        };

        let precision = precision.min(MAX_PRECISION);

        match conversion {
            'g' => Ok(FloatFormat::General { precision }),
            'e' => Ok(FloatFormat::Scientific { precision }),
            'f' => Ok(FloatFormat::Fixed { precision }),
            _ => Err(invalid()),
        }
    }
}

impl FloatFormat {
    /// write the text form of an `f64` to the writer
    pub fn write_f64<W: io::Write>(&self, writer: &mut W, value: f64) -> io::Result<()> {
        if let FloatFormat::Shortest = self {
            return write_shortest(writer, value, |buffer| buffer.format_finite(value));
        }

        let mut buffer = NumberBuffer::new();
        self.format_into(&mut buffer, value).map_err(fmt_error)?;
        writer.write_all(buffer.as_bytes())
    }

    /// write the text form of an `f32` to the writer
    ///
    /// printf style formats widen the value to `f64` first, `Shortest` keeps
    /// single precision so that `0.1f32` is written as `0.1`
    pub fn write_f32<W: io::Write>(&self, writer: &mut W, value: f32) -> io::Result<()> {
        if let FloatFormat::Shortest = self {
            return write_shortest(writer, value as f64, |buffer| buffer.format_finite(value));
        }

        self.write_f64(writer, value as f64)
    }

    fn format_into(&self, buffer: &mut NumberBuffer, value: f64) -> fmt::Result {
        if !value.is_finite() {
            return buffer.write_str(non_finite(value));
        }

        match *self {
            FloatFormat::General { precision } => write_general(buffer, value, precision),
            FloatFormat::Scientific { precision } => {
                let mut scratch = NumberBuffer::new();
                write!(scratch, "{:.*e}", precision.min(MAX_PRECISION), value)?;
                write_c_exponent(buffer, scratch.as_str(), false)
            }
            FloatFormat::Fixed { precision } => {
                write!(buffer, "{:.*}", precision.min(MAX_PRECISION), value)
            }
            FloatFormat::Shortest => {
                let mut ryu_buffer = ryu::Buffer::new();
                buffer.write_str(ryu_buffer.format_finite(value))
            }
        }
    }
}

fn write_shortest<W, F>(writer: &mut W, value: f64, format: F) -> io::Result<()>
where
    W: io::Write,
    F: for<'b> FnOnce(&'b mut ryu::Buffer) -> &'b str,
{
    if !value.is_finite() {
        return writer.write_all(non_finite(value).as_bytes());
    }

    let mut buffer = ryu::Buffer::new();
    writer.write_all(format(&mut buffer).as_bytes())
}

fn non_finite(value: f64) -> &'static str {
    if value.is_nan() {
        "nan"
    } else if value.is_sign_negative() {
        "-inf"
    } else {
        "inf"
    }
}

fn fmt_error(_: fmt::Error) -> io::Error {
    io::Error::new(io::ErrorKind::Other, "number does not fit in the formatting buffer")
}

/// `%g`: scientific notation when the decimal exponent is below -4 or not smaller than the
/// precision, fixed notation otherwise. Trailing zeros of the fraction are removed
fn write_general(buffer: &mut NumberBuffer, value: f64, precision: usize) -> fmt::Result {
    let precision = precision.clamp(1, MAX_PRECISION);

    let mut scratch = NumberBuffer::new();
    write!(scratch, "{:.*e}", precision - 1, value)?;

    let exponent = scratch.exponent().ok_or(fmt::Error)?;

    if exponent < -4 || exponent >= precision as i32 {
        write_c_exponent(buffer, scratch.as_str(), true)
    } else {
        let decimals = (precision as i32 - 1 - exponent) as usize;
        scratch.clear();
        write!(scratch, "{:.*}", decimals, value)?;
        buffer.write_str(trim_fraction(scratch.as_str()))
    }
}

/// rewrite rust's `1.5e3` exponent notation to the C form `1.5e+03`
fn write_c_exponent(buffer: &mut NumberBuffer, scientific: &str, trim: bool) -> fmt::Result {
    let (mantissa, exponent) = scientific.split_once('e').ok_or(fmt::Error)?;
    let exponent: i32 = exponent.parse().map_err(|_| fmt::Error)?;

    let mantissa = if trim { trim_fraction(mantissa) } else { mantissa };
    let sign = if exponent < 0 { '-' } else { '+' };

    write!(buffer, "{}e{}{:02}", mantissa, sign, exponent.abs())
}

fn trim_fraction(number: &str) -> &str {
    if number.contains('.') {
        number.trim_end_matches('0').trim_end_matches('.')
    } else {
        number
    }
}

/// fixed capacity text buffer for a single number
struct NumberBuffer {
    bytes: [u8; NUMBER_BUFFER_LEN],
    len: usize,
}

impl NumberBuffer {
    fn new() -> Self {
        Self {
            bytes: [0; NUMBER_BUFFER_LEN],
            len: 0,
        }
    }

    fn clear(&mut self) {
        self.len = 0;
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len]
    }

    fn as_str(&self) -> &str {
        // only ever filled through `fmt::Write`
        std::str::from_utf8(self.as_bytes()).unwrap_or_default()
    }

    fn exponent(&self) -> Option<i32> {
        let (_, exponent) = self.as_str().split_once('e')?;
        exponent.parse().ok()
    }
}

impl fmt::Write for NumberBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.len + s.len();
        if end > NUMBER_BUFFER_LEN {
            return Err(fmt::Error);
        }

        self.bytes[self.len..end].copy_from_slice(s.as_bytes());
        self.len = end;
        Ok(())
    }
}
