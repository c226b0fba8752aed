use std::io::Cursor;
use value_study::Raster;

use crate::error::RenderError;

/// Encode an RGBA raster as an 8-bit RGBA PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, RenderError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = ::png::Encoder::new(&mut buf, raster.width(), raster.height());
        encoder.set_color(::png::ColorType::Rgba);
        encoder.set_depth(::png::BitDepth::Eight);
        encoder.set_compression(::png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(raster.as_bytes())
            .map_err(|e| RenderError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
