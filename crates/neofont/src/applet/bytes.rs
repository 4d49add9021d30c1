//! Checked big-endian byte access for the applet codec.
//!
//! All endianness handling is isolated here. Reads are bounds checked and
//! surface [`NeoFontError::OutOfBounds`] instead of panicking, so corrupt
//! table offsets in an applet become decode errors. The write helpers are
//! only used on buffers the encoder has already sized.

use byteorder::{BigEndian, ByteOrder};

use crate::{NeoFontError, Result};

pub(crate) fn read_u8(data: &[u8], offset: usize) -> Result<u8> {
    data.get(offset).copied().ok_or(NeoFontError::OutOfBounds { offset })
}

pub(crate) fn read_u16(data: &[u8], offset: usize) -> Result<u16> {
    let bytes = data.get(offset..offset + 2).ok_or(NeoFontError::OutOfBounds { offset })?;
    Ok(BigEndian::read_u16(bytes))
}

pub(crate) fn read_u32(data: &[u8], offset: usize) -> Result<u32> {
    let bytes = data.get(offset..offset + 4).ok_or(NeoFontError::OutOfBounds { offset })?;
    Ok(BigEndian::read_u32(bytes))
}

/// Read a zero-terminated string of at most `max_len` bytes.
///
/// A string running to the end of the buffer is accepted; only an offset
/// past the end is an error.
pub(crate) fn read_cstr(data: &[u8], offset: usize, max_len: usize) -> Result<String> {
    let bytes = data.get(offset..).ok_or(NeoFontError::OutOfBounds { offset })?;
    let bytes = &bytes[..bytes.len().min(max_len)];
    let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
    Ok(String::from_utf8_lossy(&bytes[..end]).into_owned())
}

pub(crate) fn write_u16(data: &mut [u8], offset: usize, value: u16) {
    BigEndian::write_u16(&mut data[offset..offset + 2], value);
}

pub(crate) fn write_u32(data: &mut [u8], offset: usize, value: u32) {
    BigEndian::write_u32(&mut data[offset..offset + 4], value);
}
