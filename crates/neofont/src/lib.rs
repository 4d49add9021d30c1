#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::too_many_lines,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use
)]

//! Data model and smart-applet codec for AlphaSmart Neo bitmap fonts.
//!
//! A Neo font is a fixed set of 256 bitmapped glyphs plus applet metadata
//! (names, version, unique id, shared height). The device's firmware loads
//! fonts packaged as "smart applet" files; [`NeoFont::from_applet_bytes`] and
//! [`NeoFont::to_applet_bytes`] convert between the two representations.

mod error;
pub use error::*;

mod glyph;
pub use glyph::*;

mod font;
pub use font::*;

pub mod applet;
pub use applet::{APPLET_MAGIC, APPLET_TRAILING_MAGIC};
