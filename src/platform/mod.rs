//! Adapters to the outside world: real fonts, system font lookup, image files.

pub mod font;
pub mod image;
pub(crate) mod os;
