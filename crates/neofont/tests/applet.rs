use neofont::{NeoFont, NeoFontError};

/// Flip one byte of an encoded applet, keeping the size field intact.
fn corrupted(mut data: Vec<u8>, offset: usize, value: u8) -> Vec<u8> {
    data[offset] = value;
    data
}

#[test]
fn test_default_font_round_trip() {
    // The concrete scenario from the format notes: a default container with
    // one pixel set on glyph 65.
    let mut font = NeoFont::default();
    assert_eq!(font.ident(), 0x7170);
    font.glyph_mut(65).unwrap().set_pixel(0, 0);

    let data = font.to_applet_bytes();
    let decoded = NeoFont::from_applet_bytes(&data).unwrap();

    assert!(decoded.glyph(65).unwrap().get_pixel(0, 0));
    for (i, glyph) in decoded.glyphs().iter().enumerate() {
        assert_eq!(glyph.width(), 8);
        if i != 65 {
            assert!(glyph.is_empty(), "glyph {i} should be empty");
        }
    }
    assert_eq!(decoded.ident(), 0x7170);
    assert_eq!(decoded.height(), 16);
    assert_eq!(decoded.font_name(), "Unnamed");
    assert_eq!(decoded.version(), "1.0");
}

#[test]
fn test_full_round_trip() {
    let mut font = NeoFont::default();
    font.set_font_name("Grids");
    font.set_version("2.14c");
    font.set_ident(0x7174);
    font.set_height(24);

    for i in 0..256 {
        let glyph = font.glyph_mut(i).unwrap();
        glyph.set_width(((i % 12) + 1) as i32);
        for y in 0..24 {
            if (i + y) % 3 == 0 {
                glyph.set_pixel(i % glyph.width() as usize, y);
            }
        }
    }

    let data = font.to_applet_bytes();
    let decoded = NeoFont::from_applet_bytes(&data).unwrap();

    assert_eq!(decoded, font);
    assert_eq!(decoded.applet_name(), "Neo Font - Grids");
    assert_eq!(decoded.version_major(), 2);
    assert_eq!(decoded.version_minor(), 14);
    assert_eq!(decoded.version_build(), 'c');
    assert_eq!(decoded.version(), "2.14c");
}

#[test]
fn test_applet_size_matches_encoded_length() {
    let mut font = NeoFont::default();
    assert_eq!(font.applet_size(), font.to_applet_bytes().len());

    // Odd font name length flips the word padding.
    font.set_font_name("Odd");
    assert_eq!(font.applet_size(), font.to_applet_bytes().len());

    // Mixed widths and a height that needs three bytes per column.
    font.set_height(22);
    for i in 0..256 {
        font.glyph_mut(i).unwrap().set_width((i % 128 + 1) as i32);
    }
    assert_eq!(font.applet_size(), font.to_applet_bytes().len());

    font.set_height(66);
    assert_eq!(font.applet_size(), font.to_applet_bytes().len());
}

#[test]
fn test_encode_into_short_buffer_fails_untouched() {
    let font = NeoFont::default();
    let needed = font.applet_size();
    let mut buffer = vec![0xAA; needed - 1];

    let err = font.encode_applet(&mut buffer).unwrap_err();
    assert_eq!(
        err,
        NeoFontError::BufferTooSmall {
            needed,
            actual: needed - 1
        }
    );
    assert!(buffer.iter().all(|&b| b == 0xAA));
}

#[test]
fn test_encode_into_exact_buffer() {
    let font = NeoFont::default();
    let mut buffer = vec![0; font.applet_size()];
    let written = font.encode_applet(&mut buffer).unwrap();
    assert_eq!(written, buffer.len());
    assert_eq!(buffer, font.to_applet_bytes());
}

#[test]
fn test_bad_magic_is_rejected() {
    let data = corrupted(NeoFont::default().to_applet_bytes(), 0, 0xde);
    assert_eq!(NeoFont::from_applet_bytes(&data).unwrap_err(), NeoFontError::MagicMismatch);
}

#[test]
fn test_size_field_mismatch_is_rejected() {
    let mut data = NeoFont::default().to_applet_bytes();
    let actual = data.len();
    data.push(0);
    assert_eq!(
        NeoFont::from_applet_bytes(&data).unwrap_err(),
        NeoFontError::SizeMismatch {
            expected: actual,
            actual: actual + 1
        }
    );
}

#[test]
fn test_unexpected_code_layout_is_rejected() {
    let data = corrupted(NeoFont::default().to_applet_bytes(), 0x142, 0x4e);
    assert_eq!(
        NeoFont::from_applet_bytes(&data).unwrap_err(),
        NeoFontError::UnexpectedCodeLayout { offset: 0x142 }
    );
}

#[test]
fn test_failed_decode_leaves_target_untouched() {
    let mut font = NeoFont::default();
    font.set_font_name("Keep me");
    font.glyph_mut(1).unwrap().set_pixel(2, 2);
    let before = font.clone();

    let data = corrupted(NeoFont::default().to_applet_bytes(), 0, 0xde);
    assert!(font.load_applet(&data).is_err());
    assert_eq!(font, before);
}

#[test]
fn test_corrupt_table_offset_is_out_of_bounds() {
    let mut data = NeoFont::default().to_applet_bytes();
    // Point the width table far outside the buffer; the size field and the
    // loader code stay intact, so validation passes and the table read must
    // be the thing that fails.
    let font_info_offset = data.len() - 20;
    data[font_info_offset + 4..font_info_offset + 8].copy_from_slice(&0x00ff_ffffu32.to_be_bytes());

    match NeoFont::from_applet_bytes(&data) {
        Err(NeoFontError::OutOfBounds { offset }) => assert!(offset >= 0x00ff_ffff),
        other => panic!("expected OutOfBounds, got {other:?}"),
    }
}

#[test]
fn test_truncated_buffer_with_matching_size_field() {
    let mut data = NeoFont::default().to_applet_bytes();
    data.truncate(0x40);
    data[4..8].copy_from_slice(&0x0000_0040u32.to_be_bytes());
    // Magic and size check out; the loader-code read runs off the end.
    assert!(matches!(
        NeoFont::from_applet_bytes(&data),
        Err(NeoFontError::OutOfBounds { .. })
    ));
}

#[test]
fn test_font_name_derived_from_applet_name() {
    let mut font = NeoFont::default();
    font.set_font_name("Skyline");
    let decoded = NeoFont::from_applet_bytes(&font.to_applet_bytes()).unwrap();
    // "Neo Font - Skyline" is longer than 11 bytes, so the name comes back
    // out of the applet name field.
    assert_eq!(decoded.font_name(), "Skyline");
    assert_eq!(decoded.applet_name(), "Neo Font - Skyline");
}

#[test]
fn test_empty_font_name_uses_dedicated_field() {
    let mut font = NeoFont::default();
    font.set_font_name("");
    // Applet name is now exactly "Neo Font - " (11 bytes), so decode falls
    // back to the dedicated font name field, which holds the empty string.
    let decoded = NeoFont::from_applet_bytes(&font.to_applet_bytes()).unwrap();
    assert_eq!(decoded.font_name(), "");
}

#[test]
fn test_serde_round_trip() {
    let mut font = NeoFont::default();
    font.set_font_name("Serde");
    font.glyph_mut(42).unwrap().set_pixel(3, 3);

    let json = serde_json::to_string(&font).unwrap();
    let decoded: NeoFont = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, font);
}

#[test]
fn test_minimum_and_maximum_heights() {
    for height in [1, 8, 9, 65, 66] {
        let mut font = NeoFont::default();
        font.set_height(height);
        font.glyph_mut(0).unwrap().set_pixel(0, height as usize - 1);

        let decoded = NeoFont::from_applet_bytes(&font.to_applet_bytes()).unwrap();
        assert_eq!(decoded.height(), height as u8);
        assert!(decoded.glyph(0).unwrap().get_pixel(0, height as usize - 1), "height {height}");
    }
}

#[test]
fn test_widest_glyph_round_trip() {
    let mut font = NeoFont::default();
    font.set_height(66);
    let glyph = font.glyph_mut(200).unwrap();
    glyph.set_width(128);
    glyph.set_pixel(127, 65);
    glyph.set_pixel(0, 0);

    let decoded = NeoFont::from_applet_bytes(&font.to_applet_bytes()).unwrap();
    let glyph = decoded.glyph(200).unwrap();
    assert_eq!(glyph.width(), 128);
    assert!(glyph.get_pixel(127, 65));
    assert!(glyph.get_pixel(0, 0));
}
