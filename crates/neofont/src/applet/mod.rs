//! Encode/decode between [`NeoFont`] and the Neo smart-applet container.
//!
//! Applet layout (all multi-byte integers big-endian):
//!
//! ```text
//! 0x0000  magic 0xc0ffeead
//! 0x0004  total file size
//! 0x0014  16-bit ident
//! 0x0018  applet name, <= 31 bytes, zero terminated by the template
//! 0x003c  version major, minor, build letter
//! 0x0040  applet info, <= 63 bytes
//! 0x0142  loader machine code with seven patched operand fields
//! 0x01f2  font name, zero terminated, then padded to an even offset
//! ....    bitmap data for glyphs 0..255, padded to a 4 byte boundary
//! ....    width table (256 bytes)
//! ....    location table (256 x u16 cumulative bitmap offsets)
//! ....    font-info block (16 bytes), trailing magic 0xcafefeed
//! ```
//!
//! Bitmaps pack `ceil(height / 8)` bytes per pixel column: byte `b` of a
//! glyph covers column `b % width`, rows `(b / width) * 8` through `+7`,
//! least significant bit first. Bits addressing rows past the font height
//! are padding.
//!
//! The loader code computes the addresses of seven font-info sub-fields from
//! literal operands baked into its instructions; the encoder patches those
//! operands for the font's final layout and the decoder reads the first pair
//! back to locate the font-info block. See [`prefix`] for the offset tables.

mod bytes;
mod prefix;

pub use prefix::{APPLET_MAGIC, APPLET_TRAILING_MAGIC};

use prefix::{
    APPLET_INFO_FIELD_LEN, APPLET_NAME_FIELD_LEN, APPLET_PREFIX, CODE_LEA_EXT, CODE_LEA_PC, CODE_MOVEA_L, FONT_INFO_LEN, FONT_INFO_PATCHES, OFF_APPLET_INFO,
    OFF_APPLET_NAME, OFF_FILE_SIZE, OFF_FONT_NAME, OFF_IDENT, OFF_LOADER_CODE, OFF_MAGIC, OFF_VERSION_BUILD, OFF_VERSION_MAJOR, OFF_VERSION_MINOR,
    REL_BITMAPS, REL_FONT_HEIGHT, REL_LOCATION_TABLE, REL_WIDTH_TABLE,
};

use crate::{APPLET_INFO_CAPACITY, APPLET_NAME_CAPACITY, CHAR_COUNT, FONT_NAME_CAPACITY, NeoFont, NeoFontError, Result};

/// Bytes of bitmap data per pixel column, common to all glyphs of a font.
fn bytes_per_column(height: u8) -> usize {
    (height as usize + 7) / 8
}

impl NeoFont {
    /// Calculate how large an applet encoded from the current font will be.
    /// This depends on the font name length and on every glyph's width.
    pub fn applet_size(&self) -> usize {
        let mut size = APPLET_PREFIX.len();
        size += self.font_name().len() + 1;
        if size % 2 != 0 {
            size += 1;
        }
        let column_bytes = bytes_per_column(self.height());
        for glyph in self.glyphs().iter() {
            size += glyph.width() as usize * column_bytes;
        }
        while size % 4 != 0 {
            size += 1;
        }
        size += CHAR_COUNT; // width table
        size += CHAR_COUNT * 2; // location table
        size += FONT_INFO_LEN;
        size += 4; // trailing magic
        size
    }

    /// Encode the font into `data` as a smart applet.
    ///
    /// Returns the number of bytes written, which always equals
    /// [`NeoFont::applet_size`].
    ///
    /// # Errors
    /// Fails with [`NeoFontError::BufferTooSmall`] -- checked before anything
    /// is written, so a failed encode leaves `data` untouched.
    pub fn encode_applet(&self, data: &mut [u8]) -> Result<usize> {
        let needed = self.applet_size();
        if data.len() < needed {
            return Err(NeoFontError::BufferTooSmall { needed, actual: data.len() });
        }

        // The prefix template carries the outline header and loader code.
        data[..APPLET_PREFIX.len()].copy_from_slice(&APPLET_PREFIX);

        bytes::write_u16(data, OFF_IDENT, self.ident());

        data[OFF_VERSION_MAJOR] = self.version_major();
        data[OFF_VERSION_MINOR] = self.version_minor();
        data[OFF_VERSION_BUILD] = self.version_build() as u8;

        // Overlay the name and info strings. The template is zero filled
        // here, so shorter strings stay terminated.
        for (i, &b) in self.applet_name().as_bytes().iter().take(APPLET_NAME_FIELD_LEN).enumerate() {
            data[OFF_APPLET_NAME + i] = b;
        }
        for (i, &b) in self.applet_info().as_bytes().iter().take(APPLET_INFO_FIELD_LEN).enumerate() {
            data[OFF_APPLET_INFO + i] = b;
        }

        // Font name, zero terminated, padded to the next word boundary.
        let mut offset = APPLET_PREFIX.len();
        for &b in self.font_name().as_bytes() {
            data[offset] = b;
            offset += 1;
        }
        data[offset] = 0;
        offset += 1;
        while offset % 2 != 0 {
            data[offset] = 0;
            offset += 1;
        }

        // Bitmap data for all 256 glyphs.
        let column_bytes = bytes_per_column(self.height());
        let bitmap_offset = offset;
        for glyph in self.glyphs().iter() {
            let width = glyph.width() as usize;
            for byte in 0..width * column_bytes {
                let x = byte % width;
                let row_base = (byte / width) * 8;
                let mut b = 0u8;
                for bit in 0..8 {
                    if glyph.get_pixel(x, row_base + bit) {
                        b |= 1 << bit;
                    }
                }
                data[offset] = b;
                offset += 1;
            }
        }
        while offset % 4 != 0 {
            data[offset] = 0;
            offset += 1;
        }

        let width_table_offset = offset;
        for glyph in self.glyphs().iter() {
            data[offset] = glyph.width();
            offset += 1;
        }

        // Cumulative bitmap offsets. The device field is 16 bits wide, so
        // offsets wrap for pathological fonts, exactly as the format does.
        let location_table_offset = offset;
        let mut glyph_offset = 0usize;
        for glyph in self.glyphs().iter() {
            bytes::write_u16(data, offset, glyph_offset as u16);
            offset += 2;
            glyph_offset += column_bytes * glyph.width() as usize;
        }

        let font_info_offset = offset;
        data[offset + REL_FONT_HEIGHT] = self.height();
        data[offset + 1] = self.max_width();
        // Maximum bitmap bytes in any glyph; an 8-bit device field.
        data[offset + 2] = (self.max_width() as usize * column_bytes) as u8;
        data[offset + 3] = 0;
        bytes::write_u32(data, offset + REL_WIDTH_TABLE, width_table_offset as u32);
        bytes::write_u32(data, offset + REL_LOCATION_TABLE, location_table_offset as u32);
        bytes::write_u32(data, offset + REL_BITMAPS, bitmap_offset as u32);
        offset += FONT_INFO_LEN;

        bytes::write_u32(data, offset, APPLET_TRAILING_MAGIC);
        offset += 4;

        bytes::write_u32(data, OFF_FILE_SIZE, offset as u32);

        // Patch the loader's address-computation operands so each one
        // resolves to its font-info sub-field at the final layout offset.
        for patch in &FONT_INFO_PATCHES {
            let operand = (font_info_offset + patch.field_offset - patch.pc_base) as u32;
            bytes::write_u32(data, patch.operand_offset, operand);
        }

        Ok(offset)
    }

    /// Encode the font into a freshly allocated applet byte buffer.
    pub fn to_applet_bytes(&self) -> Vec<u8> {
        let mut data = vec![0; self.applet_size()];
        let written = self.encode_applet(&mut data).expect("buffer sized by applet_size");
        debug_assert_eq!(written, data.len());
        data
    }

    /// Decode a smart applet into a new font.
    ///
    /// Validation order: head magic, size field against the buffer length,
    /// then the shape of the patched loader instructions. Every table and
    /// bitmap access afterwards is bounds checked, so corrupt offsets are
    /// reported as [`NeoFontError::OutOfBounds`] rather than read blindly.
    ///
    /// # Errors
    /// [`NeoFontError::MagicMismatch`], [`NeoFontError::SizeMismatch`],
    /// [`NeoFontError::UnexpectedCodeLayout`] or [`NeoFontError::OutOfBounds`].
    pub fn from_applet_bytes(data: &[u8]) -> Result<Self> {
        if bytes::read_u32(data, OFF_MAGIC)? != APPLET_MAGIC {
            return Err(NeoFontError::MagicMismatch);
        }

        let file_size = bytes::read_u32(data, OFF_FILE_SIZE)? as usize;
        if file_size != data.len() {
            return Err(NeoFontError::SizeMismatch {
                expected: file_size,
                actual: data.len(),
            });
        }

        // The first patched instruction pair: movea.l #imm,a0 followed by
        // lea (disp,pc,a0.l),a0. Refuse anything with a different shape; a
        // rebuilt loader would move these offsets.
        let move_op = bytes::read_u16(data, OFF_LOADER_CODE)?;
        let operand = bytes::read_u32(data, OFF_LOADER_CODE + 2)?;
        let lea_op = bytes::read_u16(data, OFF_LOADER_CODE + 6)?;
        let lea_ext = bytes::read_u8(data, OFF_LOADER_CODE + 8)?;
        let displacement = bytes::read_u8(data, OFF_LOADER_CODE + 9)? as i8;
        if move_op != CODE_MOVEA_L || lea_op != CODE_LEA_PC || lea_ext != CODE_LEA_EXT {
            return Err(NeoFontError::UnexpectedCodeLayout { offset: OFF_LOADER_CODE });
        }

        // The lea's program counter points just past its extension word.
        let pc = (OFF_LOADER_CODE + 8) as i64;
        let font_info_offset = pc + i64::from(displacement) + i64::from(operand);
        let font_info_offset =
            usize::try_from(font_info_offset).map_err(|_| NeoFontError::OutOfBounds { offset: OFF_LOADER_CODE + 2 })?;

        let height = bytes::read_u8(data, font_info_offset + REL_FONT_HEIGHT)?;
        let width_table = bytes::read_u32(data, font_info_offset + REL_WIDTH_TABLE)? as usize;
        let location_table = bytes::read_u32(data, font_info_offset + REL_LOCATION_TABLE)? as usize;
        let bitmap_start = bytes::read_u32(data, font_info_offset + REL_BITMAPS)? as usize;

        // Build a fresh font: a decode that fails below never leaves a
        // half-populated container behind.
        let mut font = NeoFont::default();
        font.set_height(i32::from(height));
        // The clamped height governs how many rows each glyph decodes.
        let height = usize::from(font.height());

        let applet_name = bytes::read_cstr(data, OFF_APPLET_NAME, APPLET_NAME_CAPACITY)?;
        font.set_applet_name(&applet_name);
        let applet_info = bytes::read_cstr(data, OFF_APPLET_INFO, APPLET_INFO_CAPACITY)?;
        font.set_applet_info(&applet_info);

        // Historical heuristic: applet names longer than the "Neo Font - "
        // prefix embed the font name from byte 11 on; only shorter names
        // fall back to the dedicated field. Known to drop trailing
        // characters of names the 31-byte applet-name field truncated.
        if applet_name.len() > 11 {
            let name = bytes::read_cstr(data, OFF_APPLET_NAME + 11, FONT_NAME_CAPACITY)?;
            log::debug!("deriving font name {name:?} from applet name {applet_name:?}");
            font.set_font_name(&name);
        } else {
            let name = bytes::read_cstr(data, OFF_FONT_NAME, FONT_NAME_CAPACITY)?;
            log::debug!("reading font name {name:?} from its own field");
            font.set_font_name(&name);
        }

        font.set_version_raw(
            bytes::read_u8(data, OFF_VERSION_MAJOR)?,
            bytes::read_u8(data, OFF_VERSION_MINOR)?,
            bytes::read_u8(data, OFF_VERSION_BUILD)?,
        );

        font.set_ident(u32::from(bytes::read_u16(data, OFF_IDENT)?));

        // Reset all bitmaps so only set pixels need programming.
        font.clear();

        for i in 0..CHAR_COUNT {
            let width = bytes::read_u8(data, width_table + i)?;
            let location = bytes::read_u16(data, location_table + i * 2)? as usize;
            let bits = bitmap_start + location;

            font.glyphs[i].set_width(i32::from(width));

            for x in 0..width as usize {
                for y in 0..height {
                    let byte_index = (y / 8) * width as usize + x;
                    let b = bytes::read_u8(data, bits + byte_index)?;
                    if b & (1 << (y % 8)) != 0 {
                        font.glyphs[i].set_pixel(x, y);
                    }
                }
            }
        }

        Ok(font)
    }

    /// Decode a smart applet, replacing this font's contents.
    ///
    /// `self` is only modified when the whole decode succeeds.
    ///
    /// # Errors
    /// Same as [`NeoFont::from_applet_bytes`].
    pub fn load_applet(&mut self, data: &[u8]) -> Result<()> {
        *self = Self::from_applet_bytes(data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_length_matches_font_name_offset() {
        assert_eq!(APPLET_PREFIX.len(), OFF_FONT_NAME);
    }

    #[test]
    fn test_prefix_carries_expected_code_shape() {
        assert_eq!(u16::from_be_bytes([APPLET_PREFIX[0x142], APPLET_PREFIX[0x143]]), CODE_MOVEA_L);
        assert_eq!(u16::from_be_bytes([APPLET_PREFIX[0x148], APPLET_PREFIX[0x149]]), CODE_LEA_PC);
        assert_eq!(APPLET_PREFIX[0x14a], CODE_LEA_EXT);
    }

    #[test]
    fn test_every_patch_site_is_an_address_computation() {
        for patch in &FONT_INFO_PATCHES {
            let op = patch.operand_offset;
            assert_eq!(u16::from_be_bytes([APPLET_PREFIX[op - 2], APPLET_PREFIX[op - 1]]), CODE_MOVEA_L);
            assert_eq!(u16::from_be_bytes([APPLET_PREFIX[op + 4], APPLET_PREFIX[op + 5]]), CODE_LEA_PC);
            assert_eq!(APPLET_PREFIX[op + 6], CODE_LEA_EXT);
            assert_eq!(patch.pc_base, op + 4);
        }
    }

    #[test]
    fn test_patch_operands_point_at_font_info() {
        let font = NeoFont::default();
        let data = font.to_applet_bytes();

        // The font-info block sits right before the trailing magic.
        let font_info_offset = data.len() - 4 - FONT_INFO_LEN;
        for patch in &FONT_INFO_PATCHES {
            let operand = bytes::read_u32(&data, patch.operand_offset).unwrap() as usize;
            assert_eq!(operand + patch.pc_base, font_info_offset + patch.field_offset);
        }
    }

    #[test]
    fn test_encoded_layout_fields() {
        let mut font = NeoFont::default();
        font.set_font_name("Test");
        let data = font.to_applet_bytes();

        assert_eq!(bytes::read_u32(&data, OFF_MAGIC).unwrap(), APPLET_MAGIC);
        assert_eq!(bytes::read_u32(&data, OFF_FILE_SIZE).unwrap() as usize, data.len());
        assert_eq!(bytes::read_u32(&data, data.len() - 4).unwrap(), APPLET_TRAILING_MAGIC);

        // Font name directly after the prefix, zero terminated.
        assert_eq!(&data[OFF_FONT_NAME..OFF_FONT_NAME + 5], b"Test\0");

        let font_info_offset = data.len() - 4 - FONT_INFO_LEN;
        assert_eq!(data[font_info_offset], 16); // height
        assert_eq!(data[font_info_offset + 1], 8); // max width
        assert_eq!(data[font_info_offset + 2], 16); // max bitmap bytes (8 * 2)
        assert_eq!(data[font_info_offset + 3], 0);

        let width_table = bytes::read_u32(&data, font_info_offset + REL_WIDTH_TABLE).unwrap() as usize;
        let location_table = bytes::read_u32(&data, font_info_offset + REL_LOCATION_TABLE).unwrap() as usize;
        assert_eq!(location_table, width_table + CHAR_COUNT);
        assert_eq!(font_info_offset, location_table + CHAR_COUNT * 2);
        assert!(data[width_table..width_table + CHAR_COUNT].iter().all(|&w| w == 8));

        // Cumulative location entries: 16 bytes per 8x16 glyph.
        assert_eq!(bytes::read_u16(&data, location_table).unwrap(), 0);
        assert_eq!(bytes::read_u16(&data, location_table + 2).unwrap(), 16);
        assert_eq!(bytes::read_u16(&data, location_table + 510).unwrap(), 255 * 16);
    }

    #[test]
    fn test_bitmap_bit_packing() {
        let mut font = NeoFont::default();
        font.set_height(16); // two bytes per column
        let glyph = font.glyph_mut(0).unwrap();
        glyph.set_width(4);
        glyph.set_pixel(2, 0); // column 2, row band 0, bit 0
        glyph.set_pixel(1, 9); // column 1, row band 1, bit 1

        let data = font.to_applet_bytes();
        let font_info_offset = data.len() - 4 - FONT_INFO_LEN;
        let bitmap_start = bytes::read_u32(&data, font_info_offset + REL_BITMAPS).unwrap() as usize;

        // Glyph 0: 4 columns x 2 bytes. Byte b covers column b % 4, rows
        // (b / 4) * 8 + bit.
        assert_eq!(data[bitmap_start + 2], 0x01);
        assert_eq!(data[bitmap_start + 4 + 1], 0x02);
        assert_eq!(data[bitmap_start], 0);
        assert_eq!(data[bitmap_start + 1], 0);
        assert_eq!(data[bitmap_start + 3], 0);
    }

    #[test]
    fn test_odd_height_bytes_per_column() {
        let mut font = NeoFont::default();
        font.set_height(12); // still two bytes per column
        assert_eq!(bytes_per_column(font.height()), 2);
        font.set_height(17);
        assert_eq!(bytes_per_column(font.height()), 3);

        let size = font.applet_size();
        assert_eq!(size, font.to_applet_bytes().len());
    }
}
