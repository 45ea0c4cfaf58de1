//! glyphline: a text layout engine and CPU raster target.
//!
//! `engine` is platform independent: measuring, wrapping, markup and line
//! rendering on top of a [`engine::raster::DrawBuf`]. `platform` adapts real
//! fonts (fontdue), system font lookup and image files.

pub mod engine;
pub mod platform;
