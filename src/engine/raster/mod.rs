//! CPU raster target.
//!
//! # Data Flow
//!
//! ```text
//! fill / glyph / blit / vector op
//!     -> intersect with clip rect (always within bounds)
//!     -> fold in global alpha
//!     -> DrawBuf::blend_row  (format specific: ArgbBuf / GrayBuf)
//! ```

pub mod argb;
pub mod blend;
pub mod blit;
pub mod clip;
pub mod draw_buf;
pub mod gray;
pub mod nine_patch;
pub mod vector;

pub use argb::ArgbBuf;
pub use blit::Blit;
pub use clip::DrawStateGuard;
pub use draw_buf::{DrawBuf, DrawState, PixelFormat, create_draw_buf};
pub use gray::GrayBuf;
pub use nine_patch::NinePatch;
pub use vector::{CornerRadii, VectorDraw};
