//! The drawing-surface contract the scene renders against.

use std::ops::{Deref, DerefMut};

use crate::color::Color;

/// Horizontal anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchoring of a text run relative to its position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Bottom,
}

/// Font settings for [`Surface::fill_text`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Font {
    /// Size in scene units.
    pub size: f64,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            size: 10.0,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }
}

/// Glow drawn behind subsequent fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shadow {
    pub color: Color,
    /// Blur radius in scene units. Zero disables the glow.
    pub blur: f64,
}

impl Shadow {
    /// No glow.
    pub const NONE: Shadow = Shadow {
        color: Color::TRANSPARENT,
        blur: 0.0,
    };

    /// True when this shadow paints nothing.
    pub fn is_none(&self) -> bool {
        self.blur <= 0.0 || self.color.to_rgba().a <= 0.0
    }
}

/// A 2D drawing surface with canvas-style state.
///
/// Paint settings (fill, stroke, font, shadow) and the current transform
/// persist between calls until changed. `save` and `restore` push and pop
/// all of them together.
pub trait Surface {
    /// Reset the pixels of a rectangle to the empty background.
    fn clear_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Blend the current fill over a rectangle.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Blend the current fill over a disc.
    fn fill_circle(&mut self, x: f64, y: f64, radius: f64);

    /// Draw a segment with the current stroke color and width.
    fn stroke_line(&mut self, from: (f64, f64), to: (f64, f64));

    /// Draw text with the current fill, font and shadow.
    fn fill_text(&mut self, text: &str, x: f64, y: f64);

    fn set_fill(&mut self, color: Color);

    fn set_stroke(&mut self, color: Color, width: f64);

    fn set_font(&mut self, font: Font);

    fn set_shadow(&mut self, shadow: Shadow);

    fn save(&mut self);

    /// Pop the last saved state. Unbalanced calls are ignored.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);

    fn scale(&mut self, sx: f64, sy: f64);

    /// Put paint settings back to the neutral baseline: opaque black fill
    /// and stroke, one unit line width, no shadow.
    fn reset_paint(&mut self) {
        self.set_fill(Color::Rgb(0, 0, 0));
        self.set_stroke(Color::Rgb(0, 0, 0), 1.0);
        self.set_shadow(Shadow::NONE);
    }
}

/// Scoped drawing handle handed to one entity for one draw.
///
/// Dropping the pen resets the surface's paint settings, so whatever an
/// entity leaves behind never leaks into the next entity's draw.
pub struct Pen<'s> {
    surface: &'s mut dyn Surface,
}

impl<'s> Pen<'s> {
    pub fn new(surface: &'s mut dyn Surface) -> Self {
        Self { surface }
    }
}

impl<'s> Deref for Pen<'s> {
    type Target = dyn Surface + 's;

    fn deref(&self) -> &Self::Target {
        &*self.surface
    }
}

impl DerefMut for Pen<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.surface
    }
}

impl Drop for Pen<'_> {
    fn drop(&mut self) {
        self.surface.reset_paint();
    }
}
