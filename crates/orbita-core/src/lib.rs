//! Core types shared by the orbita crates.
//!
//! The scene never talks to a terminal directly. It draws through the
//! [`Surface`] trait using the [`Color`] model defined here, and reads the
//! current [`Viewport`] every frame.

mod color;
mod surface;
mod viewport;

pub use color::{Color, Rgba, hsl_to_rgb};
pub use surface::{Font, Pen, Shadow, Surface, TextAlign, TextBaseline};
pub use viewport::Viewport;
