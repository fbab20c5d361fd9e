//! Conversion of text into the byte forms accepted by PDF text strings.

/// Byte-order mark that prefixes UTF-16BE text strings.
const UTF16_BOM: [u8; 2] = [0xFE, 0xFF];

/// Encodes `text` for a PDF text string.
///
/// With `utf8` set the text is transcoded to UTF-16BE with a byte-order mark,
/// which every reader decodes as Unicode. Otherwise the text is handed over
/// byte-for-byte as Latin-1, see [`latin1_bytes`].
pub fn pdf_text_bytes(text: &str, utf8: bool) -> Vec<u8> {
    if utf8 {
        utf16be_bytes(text)
    } else {
        latin1_bytes(text)
    }
}

/// UTF-16BE with a leading byte-order mark.
pub fn utf16be_bytes(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(2 + text.len() * 2);
    bytes.extend_from_slice(&UTF16_BOM);
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    bytes
}

/// One byte per character; characters outside Latin-1 become `?`.
pub fn latin1_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| u8::try_from(u32::from(ch)).unwrap_or(b'?'))
        .collect()
}
