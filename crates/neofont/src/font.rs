//! Neo font container: 256 glyph slots plus applet metadata.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::{Glyph, MAX_GLYPH_HEIGHT, MIN_GLYPH_HEIGHT, NeoFontError, Result};

/// The number of characters in a Neo font (one per 8-bit code point).
pub const CHAR_COUNT: usize = 256;

/// Visible-character capacity of the font name (plus NUL on disk)
pub const FONT_NAME_CAPACITY: usize = 23;
/// Visible-character capacity of the applet name
pub const APPLET_NAME_CAPACITY: usize = 35;
/// Visible-character capacity of the applet info text
pub const APPLET_INFO_CAPACITY: usize = 59;

/// Smallest permitted unregistered-user applet id.
pub const IDENT_USER_MIN: u16 = 0x7170;
/// Largest permitted unregistered-user applet id.
pub const IDENT_USER_MAX: u16 = 0x717f;
/// Smallest permitted group applet id.
pub const IDENT_GROUP_MIN: u16 = 0x7100;
/// Largest permitted group applet id.
pub const IDENT_GROUP_MAX: u16 = 0x717f;
/// Smallest AS/RL applet id.
pub const IDENT_AS_MIN: u16 = 0xa000;
/// Largest AS/RL applet id.
pub const IDENT_AS_MAX: u16 = 0xafff;

/// A complete Neo font.
///
/// All 256 glyphs always share the font height. Metadata strings are kept
/// within their fixed on-device capacities by the setters; the `ident` is a
/// 16-bit unique id (the `IDENT_*` range constants document the registry
/// conventions, the codec only enforces 16-bit truncation).
#[derive(Debug, Clone)]
pub struct NeoFont {
    /// Name seen in the AlphaSmart manager, derived from the font name
    pub(crate) applet_name: String,
    /// Copyright / description text
    pub(crate) applet_info: String,
    /// Name visible on the Neo itself
    pub(crate) font_name: String,
    pub(crate) version_major: u8,
    pub(crate) version_minor: u8,
    /// Build code (ASCII character), `' '` when absent
    pub(crate) version_build: char,
    /// Cached version display string
    pub(crate) version_string: String,
    /// 16 bit unique id
    pub(crate) ident: u16,
    /// Font height in pixels, shared by all glyphs
    pub(crate) height: u8,
    pub(crate) glyphs: Box<[Glyph; CHAR_COUNT]>,
}

impl Default for NeoFont {
    fn default() -> Self {
        let mut font = Self {
            applet_name: String::new(),
            applet_info: String::new(),
            font_name: String::new(),
            version_major: 1,
            version_minor: 0,
            version_build: ' ',
            version_string: String::new(),
            ident: IDENT_USER_MIN,
            height: 16,
            glyphs: Box::new(std::array::from_fn(|_| Glyph::new(8, 16))),
        };
        font.set_font_name("Unnamed");
        font.set_applet_info("Neo Custom Font. Copyright (c) 2008 [author].");
        font.remake_version_string();
        font
    }
}

impl PartialEq for NeoFont {
    fn eq(&self, other: &Self) -> bool {
        self.applet_name == other.applet_name
            && self.applet_info == other.applet_info
            && self.font_name == other.font_name
            && self.version_major == other.version_major
            && self.version_minor == other.version_minor
            && self.version_build == other.version_build
            && self.ident == other.ident
            && self.height == other.height
            && self.glyphs == other.glyphs
    }
}

impl NeoFont {
    /// Name of the applet, as shown by the AlphaSmart manager.
    pub fn applet_name(&self) -> &str {
        &self.applet_name
    }

    /// The applet info (copyright) text.
    pub fn applet_info(&self) -> &str {
        &self.applet_info
    }

    /// Name of the font, as shown on the device.
    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// The version display string, `"major.minor"` plus the build letter
    /// when one is set.
    pub fn version(&self) -> &str {
        &self.version_string
    }

    pub fn version_major(&self) -> u8 {
        self.version_major
    }

    pub fn version_minor(&self) -> u8 {
        self.version_minor
    }

    pub fn version_build(&self) -> char {
        self.version_build
    }

    /// The 16-bit unique applet id.
    pub fn ident(&self) -> u16 {
        self.ident
    }

    /// Font height in pixels.
    pub fn height(&self) -> u8 {
        self.height
    }

    /// Set the applet name, truncated to its capacity.
    ///
    /// Returns the name actually stored. Note that [`NeoFont::set_font_name`]
    /// rewrites the applet name.
    pub fn set_applet_name(&mut self, name: &str) -> &str {
        self.applet_name = truncated(name, APPLET_NAME_CAPACITY);
        &self.applet_name
    }

    /// Set the applet info text, truncated to its capacity.
    pub fn set_applet_info(&mut self, info: &str) -> &str {
        self.applet_info = truncated(info, APPLET_INFO_CAPACITY);
        &self.applet_info
    }

    /// Set the font name, truncated to its capacity. The applet name is
    /// rewritten to `"Neo Font - "` plus the font name, truncated to the
    /// applet name capacity.
    pub fn set_font_name(&mut self, name: &str) -> &str {
        self.font_name = truncated(name, FONT_NAME_CAPACITY);
        self.applet_name = truncated(&format!("Neo Font - {}", self.font_name), APPLET_NAME_CAPACITY);
        &self.font_name
    }

    /// Set the version from a string in the form `"major.minorBuild"`,
    /// e.g. `"1.2"` or `"2.05b"`.
    ///
    /// The minor component is parsed as a plain decimal number, so `"2.05"`
    /// becomes minor version 5 and displays as `"2.5"`. This loses the
    /// leading-zero significance the device convention assigns to minor
    /// versions; it is a long-standing quirk of the format tooling and is
    /// kept for compatibility. Components that fail to parse keep their
    /// previous values; a missing build letter resets the build to `' '`.
    ///
    /// Returns the resulting display string.
    pub fn set_version(&mut self, version: &str) -> &str {
        let mut major = i32::from(self.version_major);
        let mut minor = i32::from(self.version_minor);
        let mut build = ' ';

        if let Some((value, rest)) = take_int(version.trim_start()) {
            major = value;
            if let Some(rest) = rest.strip_prefix('.') {
                if let Some((value, rest)) = take_int(rest) {
                    minor = value;
                    if let Some(c) = rest.chars().next() {
                        build = c;
                    }
                }
            }
        }

        self.version_major = (major & 255) as u8;
        self.version_minor = (minor & 255) as u8;
        self.version_build = build;
        self.remake_version_string();
        self.version()
    }

    /// Set the unique id. Only the low 16 bits are used.
    pub fn set_ident(&mut self, ident: u32) -> u16 {
        self.ident = ident as u16;
        self.ident
    }

    /// Set the font height, clamped to [1, 66], and propagate it to all 256
    /// glyphs. Returns the height actually applied.
    pub fn set_height(&mut self, height: i32) -> u8 {
        let height = height.clamp(MIN_GLYPH_HEIGHT as i32, MAX_GLYPH_HEIGHT as i32) as u8;
        for glyph in self.glyphs.iter_mut() {
            glyph.set_height(i32::from(height));
        }
        self.height = height;
        self.height
    }

    /// Reset every glyph to width 8 and an empty bitmap. The font height and
    /// all metadata are left unchanged.
    pub fn clear(&mut self) {
        for glyph in self.glyphs.iter_mut() {
            glyph.set_width(8);
            glyph.clear();
        }
    }

    /// Get the glyph for a character code point.
    ///
    /// # Errors
    /// Fails with [`NeoFontError::GlyphIndexOutOfRange`] for indices >= 256.
    pub fn glyph(&self, index: usize) -> Result<&Glyph> {
        self.glyphs.get(index).ok_or(NeoFontError::GlyphIndexOutOfRange { index })
    }

    /// Get mutable access to the glyph for a character code point.
    ///
    /// # Errors
    /// Fails with [`NeoFontError::GlyphIndexOutOfRange`] for indices >= 256.
    pub fn glyph_mut(&mut self, index: usize) -> Result<&mut Glyph> {
        self.glyphs.get_mut(index).ok_or(NeoFontError::GlyphIndexOutOfRange { index })
    }

    /// All 256 glyphs, in code point order.
    pub fn glyphs(&self) -> &[Glyph; CHAR_COUNT] {
        &self.glyphs
    }

    /// Width of the widest glyph in the font, in pixels.
    pub fn max_width(&self) -> u8 {
        self.glyphs.iter().map(Glyph::width).max().unwrap_or(0)
    }

    /// Install raw version bytes read from an applet and rebuild the display
    /// string (which clamps the components into range).
    pub(crate) fn set_version_raw(&mut self, major: u8, minor: u8, build: u8) {
        self.version_major = major;
        self.version_minor = minor;
        self.version_build = char::from(build);
        self.remake_version_string();
    }

    /// Rebuild the cached version string from the numeric components. Also
    /// forces the components back into their valid ranges; must be called
    /// whenever one of them changes.
    fn remake_version_string(&mut self) {
        if self.version_major > 99 {
            self.version_major = 99;
        }
        if self.version_minor > 99 {
            self.version_minor = 99;
        }
        if !matches!(self.version_build, ' '..='~') {
            self.version_build = '?';
        }
        self.version_string = if self.version_build == ' ' {
            format!("{}.{}", self.version_major, self.version_minor)
        } else {
            format!("{}.{}{}", self.version_major, self.version_minor, self.version_build)
        };
    }
}

/// Copy `text` truncated to at most `capacity` bytes, on a char boundary.
fn truncated(text: &str, capacity: usize) -> String {
    let mut end = text.len().min(capacity);
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text[..end].to_string()
}

/// Parse a leading (optionally signed) decimal integer, returning the value
/// and the rest of the string.
fn take_int(text: &str) -> Option<(i32, &str)> {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    let digits = unsigned.len() - unsigned.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return None;
    }
    let end = text.len() - (unsigned.len() - digits);
    let value = text[..end].parse::<i32>().ok()?;
    Some((value, &text[end..]))
}

/// Serializable representation of a `NeoFont`: the applet bytes themselves,
/// so serialized fonts round trip through the same codec the device uses.
#[derive(Serialize, Deserialize)]
struct NeoFontSerde {
    data: Vec<u8>,
}

impl Serialize for NeoFont {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        NeoFontSerde { data: self.to_applet_bytes() }.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NeoFont {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let serde_font = NeoFontSerde::deserialize(deserializer)?;
        NeoFont::from_applet_bytes(&serde_font.data).map_err(serde::de::Error::custom)
    }
}
