//! Terminal drawing surface for orbita.
//!
//! [`Raster`] implements [`orbita_core::Surface`] over an RGB pixel grid
//! sized to the terminal, two pixels per cell vertically. Rendering `&Raster`
//! as a ratatui widget paints each cell as an upper half block whose
//! foreground is the top pixel and background the bottom one, with text
//! runs overlaid as plain characters.

mod raster;
mod widget;

pub use raster::{Affine, Raster, TextRun};
