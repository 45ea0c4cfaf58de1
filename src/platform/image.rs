//! 画像ファイルと `DrawBuf` の相互変換

use std::io::Cursor;
use std::path::Path;

use image::{ImageFormat, ImageReader, RgbaImage};
use thiserror::Error;

use crate::engine::raster::{ArgbBuf, DrawBuf};
use crate::engine::types::Color;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Codec error: {0}")]
    Codec(#[from] image::ImageError),

    #[error("Image is too large: {0}x{1}")]
    TooLarge(u32, u32),

    #[error("Buffer is empty")]
    Empty,
}

// メモリを食い潰さないための上限
const MAX_DIM: u32 = 16384;

/// バイト列をデコードして ARGB バッファにする
pub fn load_image_bytes(bytes: &[u8]) -> Result<ArgbBuf, ImageError> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    let rgba = reader.decode()?.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width > MAX_DIM || height > MAX_DIM {
        return Err(ImageError::TooLarge(width, height));
    }
    let pixels = rgba
        .pixels()
        .map(|p| Color(p.0[0], p.0[1], p.0[2], p.0[3]).to_argb())
        .collect();
    log::debug!(target: "Platform::Image", "decoded {}x{}", width, height);
    ArgbBuf::from_pixels(width as i32, height as i32, pixels).ok_or(ImageError::TooLarge(width, height))
}

/// ファイルから読み込む
pub fn load_image(path: &Path) -> Result<ArgbBuf, ImageError> {
    let bytes = std::fs::read(path)?;
    load_image_bytes(&bytes)
}

/// Copies any buffer into an RGBA image.
pub fn to_rgba_image(buf: &dyn DrawBuf) -> Result<RgbaImage, ImageError> {
    if buf.is_null() {
        return Err(ImageError::Empty);
    }
    let (w, h) = (buf.width() as u32, buf.height() as u32);
    Ok(RgbaImage::from_fn(w, h, |x, y| {
        let c = buf.pixel(x as i32, y as i32);
        image::Rgba([c.0, c.1, c.2, c.3])
    }))
}

/// PNG として保存する
pub fn save_png(buf: &dyn DrawBuf, path: &Path) -> Result<(), ImageError> {
    let img = to_rgba_image(buf)?;
    img.save_with_format(path, ImageFormat::Png)?;
    log::debug!(target: "Platform::Image", "saved {}x{} to {}", img.width(), img.height(), path.display());
    Ok(())
}

/// PNG にエンコードしたバイト列を返す
pub fn encode_png(buf: &dyn DrawBuf) -> Result<Vec<u8>, ImageError> {
    let img = to_rgba_image(buf)?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}
