//! The fixed applet prefix and its layout constants.
//!
//! Everything position-dependent about the container lives here: the 498-byte
//! template (outline header plus the 68k loader code), the fixed field
//! offsets, the opcode words the decoder sanity-checks, and the table of
//! operand patches the encoder applies so the loader's address computations
//! resolve to the font-info block's final location.

/// Magic constant at the start of every applet (big-endian).
pub const APPLET_MAGIC: u32 = 0xc0ff_eead;

/// Magic constant at the very end of every applet (big-endian).
pub const APPLET_TRAILING_MAGIC: u32 = 0xcafe_feed;

// Fixed offsets within the prefix.
pub(crate) const OFF_MAGIC: usize = 0x0000;
pub(crate) const OFF_FILE_SIZE: usize = 0x0004;
pub(crate) const OFF_IDENT: usize = 0x0014;
pub(crate) const OFF_APPLET_NAME: usize = 0x0018;
pub(crate) const OFF_VERSION_MAJOR: usize = 0x003c;
pub(crate) const OFF_VERSION_MINOR: usize = 0x003d;
pub(crate) const OFF_VERSION_BUILD: usize = 0x003e;
pub(crate) const OFF_APPLET_INFO: usize = 0x0040;
/// First of the loader's patched address-computation instruction pairs.
pub(crate) const OFF_LOADER_CODE: usize = 0x0142;
/// The zero-terminated font name directly follows the prefix.
pub(crate) const OFF_FONT_NAME: usize = 0x01f2;

// Byte counts of the string fields inside the prefix. Shorter strings are
// terminated by the template's own zero bytes.
pub(crate) const APPLET_NAME_FIELD_LEN: usize = 31;
pub(crate) const APPLET_INFO_FIELD_LEN: usize = 63;

// Offsets of the font-info sub-fields, relative to the font-info block.
pub(crate) const REL_FONT_HEIGHT: usize = 0x00;
pub(crate) const REL_WIDTH_TABLE: usize = 0x04;
pub(crate) const REL_LOCATION_TABLE: usize = 0x08;
pub(crate) const REL_BITMAPS: usize = 0x0c;

/// Size of the font-info block.
pub(crate) const FONT_INFO_LEN: usize = 16;

// Opcode words of the patched instruction pair: `movea.l #imm,a0` followed
// by `lea (disp,pc,a0.l),a0`. The decoder refuses anything else.
pub(crate) const CODE_MOVEA_L: u16 = 0x207c;
pub(crate) const CODE_LEA_PC: u16 = 0x41fb;
pub(crate) const CODE_LEA_EXT: u8 = 0x88;

/// One operand patch: the loader computes `operand + pc_base` at runtime, so
/// the encoder stores `font_info_offset + field_offset - pc_base` at
/// `operand_offset` (big-endian, 4 bytes).
pub(crate) struct FontInfoPatch {
    pub operand_offset: usize,
    pub pc_base: usize,
    pub field_offset: usize,
}

/// The seven address computations in the loader code, one per font-info
/// sub-field it reads. Offsets are fixed by the hand-written loader; they
/// must be reproduced exactly for device compatibility.
pub(crate) const FONT_INFO_PATCHES: [FontInfoPatch; 7] = [
    FontInfoPatch { operand_offset: 0x144, pc_base: 0x148, field_offset: 0 },
    FontInfoPatch { operand_offset: 0x150, pc_base: 0x154, field_offset: 1 },
    FontInfoPatch { operand_offset: 0x15e, pc_base: 0x162, field_offset: 2 },
    FontInfoPatch { operand_offset: 0x16c, pc_base: 0x170, field_offset: 3 },
    FontInfoPatch { operand_offset: 0x17a, pc_base: 0x17e, field_offset: 4 },
    FontInfoPatch { operand_offset: 0x1a2, pc_base: 0x1a6, field_offset: 8 },
    FontInfoPatch { operand_offset: 0x1ca, pc_base: 0x1ce, field_offset: 12 },
];

/// The applet file prefix: outline header plus the font loader machine code.
/// Copied verbatim into every encoded applet before the variable region is
/// appended and the operand fields are patched.
pub(crate) const APPLET_PREFIX: [u8; 498] = [
    0xc0, 0xff, 0xee, 0xad, 0x00, 0x00, 0x10, 0x44, 0x00, 0x00, 0x00, 0x10,
    0x00, 0x00, 0x00, 0x00, 0xff, 0x00, 0x00, 0x31, 0xaf, 0x00, 0x01, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x20, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
    0x00, 0x00, 0x00, 0x94, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x01,
    0x00, 0x00, 0x00, 0x02, 0x48, 0xe7, 0x03, 0x00, 0x2e, 0x2f, 0x00, 0x0c,
    0x2c, 0x2f, 0x00, 0x10, 0x20, 0x6f, 0x00, 0x14, 0x42, 0x90, 0x20, 0x3c,
    0xff, 0x00, 0x00, 0x00, 0xc0, 0x87, 0x67, 0x6e, 0x20, 0x7c, 0x00, 0x00,
    0x00, 0x82, 0x4e, 0xbb, 0x88, 0xfe, 0x02, 0x87, 0x00, 0xff, 0xff, 0xff,
    0x20, 0x07, 0x0c, 0x80, 0x00, 0x01, 0x00, 0x00, 0x64, 0x4e, 0x0c, 0x40,
    0x00, 0x01, 0x67, 0x0e, 0x0c, 0x40, 0x00, 0x02, 0x67, 0x18, 0x0c, 0x40,
    0x00, 0x06, 0x67, 0x20, 0x60, 0x3a, 0x20, 0x46, 0x22, 0x7c, 0x00, 0x00,
    0x01, 0x0c, 0x43, 0xfb, 0x98, 0xfe, 0x20, 0x89, 0x60, 0x44, 0x20, 0x3c,
    0x00, 0x00, 0x00, 0x00, 0xd0, 0x8d, 0x20, 0x46, 0x20, 0x80, 0x60, 0x36,
    0x20, 0x7c, 0x00, 0x00, 0x00, 0x36, 0x4e, 0xbb, 0x88, 0xfe, 0x22, 0x3c,
    0x00, 0x00, 0x00, 0x00, 0x70, 0x00, 0x10, 0x35, 0x18, 0x00, 0x20, 0x46,
    0x20, 0x80, 0x60, 0x1a, 0x20, 0x46, 0x42, 0x90, 0x60, 0x14, 0x20, 0x07,
    0x72, 0x18, 0xb0, 0x81, 0x67, 0x02, 0x60, 0x0a, 0x20, 0x7c, 0x00, 0x00,
    0x00, 0x0a, 0x4e, 0xbb, 0x88, 0xfe, 0x4c, 0xdf, 0x00, 0xc0, 0x4e, 0x75,
    0x20, 0x3c, 0x00, 0x00, 0x00, 0x00, 0xd0, 0x8d, 0x22, 0x40, 0x20, 0x7c,
    0x00, 0x00, 0x0e, 0xe8, 0x41, 0xfb, 0x88, 0xfe, 0x12, 0x90, 0x20, 0x7c,
    0x00, 0x00, 0x0e, 0xdd, 0x41, 0xfb, 0x88, 0xfe, 0x13, 0x50, 0x00, 0x01,
    0x20, 0x7c, 0x00, 0x00, 0x0e, 0xd0, 0x41, 0xfb, 0x88, 0xfe, 0x13, 0x50,
    0x00, 0x02, 0x20, 0x7c, 0x00, 0x00, 0x0e, 0xc3, 0x41, 0xfb, 0x88, 0xfe,
    0x13, 0x50, 0x00, 0x03, 0x20, 0x7c, 0x00, 0x00, 0x0e, 0xb6, 0x41, 0xfb,
    0x88, 0xfe, 0x23, 0x50, 0x00, 0x04, 0x4a, 0xa9, 0x00, 0x04, 0x67, 0x14,
    0x20, 0x10, 0x20, 0x7c, 0xff, 0xff, 0xfe, 0x6c, 0x41, 0xfb, 0x88, 0xfe,
    0x22, 0x08, 0xd0, 0x81, 0x23, 0x40, 0x00, 0x04, 0x20, 0x7c, 0x00, 0x00,
    0x0e, 0x92, 0x41, 0xfb, 0x88, 0xfe, 0x23, 0x50, 0x00, 0x08, 0x4a, 0xa9,
    0x00, 0x08, 0x67, 0x14, 0x20, 0x10, 0x20, 0x7c, 0xff, 0xff, 0xfe, 0x44,
    0x41, 0xfb, 0x88, 0xfe, 0x22, 0x08, 0xd0, 0x81, 0x23, 0x40, 0x00, 0x08,
    0x20, 0x7c, 0x00, 0x00, 0x0e, 0x6e, 0x41, 0xfb, 0x88, 0xfe, 0x23, 0x50,
    0x00, 0x0c, 0x4a, 0xa9, 0x00, 0x0c, 0x67, 0x14, 0x20, 0x10, 0x20, 0x7c,
    0xff, 0xff, 0xfe, 0x1c, 0x41, 0xfb, 0x88, 0xfe, 0x22, 0x08, 0xd0, 0x81,
    0x23, 0x40, 0x00, 0x0c, 0x4e, 0x75,
];
