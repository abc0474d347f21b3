use qrcode::render::svg;
use qrcode::types::QrError;
use qrcode::QrCode;

pub const DEFAULT_QR_SIZE: u32 = 128;
pub const MIN_QR_SIZE: u32 = 64;
pub const MAX_QR_SIZE: u32 = 1024;

/// Encodes `data` as a square SVG QR code about `size` pixels wide.
///
/// The XML prolog is stripped so the result can be inlined into HTML.
pub fn render_qr_svg(data: &str, size: u32) -> Result<String, QrError> {
    let size = size.clamp(MIN_QR_SIZE, MAX_QR_SIZE);
    let code = QrCode::new(data.as_bytes())?;
    let image = code
        .render::<svg::Color>()
        .min_dimensions(size, size)
        .max_dimensions(size, size)
        .build();
    Ok(match image.find("<svg") {
        Some(start) => image[start..].to_string(),
        None => image,
    })
}
