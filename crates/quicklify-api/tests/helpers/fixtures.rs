//! Test fixtures: image blobs recognized by their leading signature.

/// Minimal valid 1x1 PNG bytes.
pub fn create_minimal_png() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
        0x77, 0x53, 0xDE, 0x00, 0x00, 0x00, 0x0C, 0x49, 0x44, 0x41, 0x54, 0x08, 0xD7, 0x63, 0xF8,
        0x00, 0x00, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x18, 0xDD, 0x8D, 0x89, 0x00, 0x00, 0x00,
        0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
    ]
}

/// JPEG/JFIF header followed by filler.
pub fn create_minimal_jpeg() -> Vec<u8> {
    let mut jpeg = vec![
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0x01, 0x01, 0x00, 0x00,
        0x01, 0x00, 0x01, 0x00, 0x00,
    ];
    jpeg.extend_from_slice(&[0xFF, 0xD9]);
    jpeg
}

/// GIF89a header for a 1x1 image.
pub fn create_minimal_gif() -> Vec<u8> {
    let mut gif = b"GIF89a".to_vec();
    gif.extend_from_slice(&[0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00]);
    gif.extend_from_slice(&[0x00, 0x00, 0x00, 0xFF, 0xFF, 0xFF, 0x3B]);
    gif
}

/// RIFF/WEBP container header.
pub fn create_minimal_webp() -> Vec<u8> {
    let mut webp = b"RIFF".to_vec();
    webp.extend_from_slice(&26u32.to_le_bytes());
    webp.extend_from_slice(b"WEBPVP8 ");
    webp.extend_from_slice(&[0u8; 18]);
    webp
}

/// Pad `head` with zeros to exactly `size` bytes.
pub fn padded(mut head: Vec<u8>, size: usize) -> Vec<u8> {
    assert!(size >= head.len(), "fixture larger than requested size");
    head.resize(size, 0);
    head
}

/// Plain text that no image signature matches.
pub fn create_text_file() -> Vec<u8> {
    b"<?php echo 'definitely not an image'; ?>\n".to_vec()
}
