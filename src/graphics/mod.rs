//! Raster-side handling for sprite conversion: the fixed palette and the
//! pixel-index <-> RGBA image adapter.

pub mod palette;
pub mod raster;
