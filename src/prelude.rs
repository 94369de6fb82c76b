//! Common traits and types that are useful for working with `vtk_encode`
#![allow(unused_imports)]

pub use crate::array::ArrayRef;
pub use crate::encoder::{AppendedBase64, AppendedRaw, Ascii, Base64, Encoder, Encoding};
pub use crate::traits::{Encode, Numeric};
pub use crate::types::{HeaderType, WriterOptions};
pub use crate::{Attributes, FloatFormat};
pub use crate::Writer;
