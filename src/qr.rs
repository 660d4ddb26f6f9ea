use image::Luma;
use qrcode::QrCode;
use std::io::Cursor;

#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("qr encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("png rendering failed: {0}")]
    Image(#[from] image::ImageError),
}

/// Render the given payload as a PNG QR code.
pub fn render_png(data: &str) -> Result<Vec<u8>, QrError> {
    let code = QrCode::new(data.as_bytes())?;
    let img = code.render::<Luma<u8>>().min_dimensions(300, 300).build();

    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), image::ImageFormat::Png)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_a_png() {
        let bytes = render_png("https://example.com/artisan/mobile-login?artisan_id=x").unwrap();
        // PNG magic bytes
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}
