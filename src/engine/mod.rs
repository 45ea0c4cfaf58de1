pub mod raster;
pub mod text;
pub mod types;
