// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Surface adapters — move pixels between raster buffers and the `image`
// crate: decode from bytes or files, encode to PNG/JPEG, save to disk.

use image::{DynamicImage, ImageFormat, RgbaImage};
use rasterwerk_core::error::{RasterError, Result};
use rasterwerk_core::RasterBuffer;
use tracing::{debug, info, instrument};

// -- Conversions --------------------------------------------------------------

/// Take ownership of an `RgbaImage`'s pixels without copying.
pub fn from_rgba_image(image: RgbaImage) -> Result<RasterBuffer> {
    let (width, height) = image.dimensions();
    RasterBuffer::new(width, height, image.into_raw())
}

/// Convert any decoded image to RGBA8.
pub fn from_dynamic(image: &DynamicImage) -> Result<RasterBuffer> {
    from_rgba_image(image.to_rgba8())
}

/// Hand the pixels back to the `image` crate.
pub fn into_rgba_image(buffer: RasterBuffer) -> Result<RgbaImage> {
    let (width, height) = buffer.dimensions();
    RgbaImage::from_raw(width, height, buffer.into_raw()).ok_or_else(|| {
        RasterError::Image(format!("buffer does not fit a {width}x{height} RGBA image"))
    })
}

// -- Decoding -----------------------------------------------------------------

/// Decode encoded bytes (PNG, JPEG, etc.) into a raster.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode(data: &[u8]) -> Result<RasterBuffer> {
    let image = image::load_from_memory(data)
        .map_err(|err| RasterError::Image(format!("failed to decode image: {}", err)))?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Image decoded from bytes"
    );
    from_dynamic(&image)
}

/// Load an image file into a raster.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<std::path::Path>) -> Result<RasterBuffer> {
    let image = image::open(path.as_ref()).map_err(|err| {
        RasterError::Image(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );
    from_dynamic(&image)
}

// -- Encoding -----------------------------------------------------------------

/// Encode a raster in `format`. JPEG drops the alpha channel.
pub fn encode(buffer: &RasterBuffer, format: ImageFormat) -> Result<Vec<u8>> {
    let image = flatten_for(format, to_dynamic(buffer)?);
    let mut bytes = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut bytes);
    image
        .write_to(&mut cursor, format)
        .map_err(|err| RasterError::Image(format!("image encoding failed: {}", err)))?;
    Ok(bytes)
}

/// Encode a raster as PNG bytes.
pub fn to_png_bytes(buffer: &RasterBuffer) -> Result<Vec<u8>> {
    encode(buffer, ImageFormat::Png)
}

/// Encode a raster as JPEG bytes with the given quality (1-100).
pub fn to_jpeg_bytes(buffer: &RasterBuffer, quality: u8) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let rgb = to_dynamic(buffer)?.to_rgb8();
    let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(&mut bytes, quality);
    rgb.write_with_encoder(encoder)
        .map_err(|err| RasterError::Image(format!("JPEG encoding failed: {}", err)))?;
    Ok(bytes)
}

/// Write a raster to disk. The format is inferred from the file extension.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn save(buffer: &RasterBuffer, path: impl AsRef<std::path::Path>) -> Result<()> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path).map_err(|err| {
        RasterError::Image(format!("unknown image format for {}: {}", path.display(), err))
    })?;
    let image = flatten_for(format, to_dynamic(buffer)?);
    image
        .save_with_format(path, format)
        .map_err(|err| {
            RasterError::Image(format!(
                "failed to save image to {}: {}",
                path.display(),
                err
            ))
        })?;
    info!(
        width = buffer.width(),
        height = buffer.height(),
        "Image saved"
    );
    Ok(())
}

fn to_dynamic(buffer: &RasterBuffer) -> Result<DynamicImage> {
    Ok(DynamicImage::ImageRgba8(into_rgba_image(buffer.clone())?))
}

/// Drop alpha for formats that cannot store it.
fn flatten_for(format: ImageFormat, image: DynamicImage) -> DynamicImage {
    match format {
        ImageFormat::Jpeg => DynamicImage::ImageRgb8(image.to_rgb8()),
        _ => image,
    }
}
