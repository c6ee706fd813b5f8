//! Twinkling background stars.

use orbita_core::{Color, Pen};

/// Where a star sits and how big it is. Fixed for the star's lifetime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StarPlacement {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

/// A fixed point of light whose opacity fades in and out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwinklingStar {
    placement: StarPlacement,
    alpha: f64,
    alpha_change: f64,
}

impl TwinklingStar {
    pub fn new(placement: StarPlacement, alpha: f64, alpha_change: f64) -> Self {
        Self {
            placement,
            alpha,
            alpha_change,
        }
    }

    pub fn placement(&self) -> StarPlacement {
        self.placement
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn alpha_change(&self) -> f64 {
        self.alpha_change
    }

    /// Step the opacity, reversing direction once it reaches either end.
    ///
    /// The value is not clamped, so it may sit up to one step outside
    /// 0.0-1.0 for a tick before heading back.
    pub fn update(&mut self) {
        self.alpha += self.alpha_change;
        if self.alpha <= 0.0 || self.alpha >= 1.0 {
            self.alpha_change = -self.alpha_change;
        }
    }

    pub fn draw(&self, pen: &mut Pen<'_>) {
        let StarPlacement { x, y, radius } = self.placement;
        pen.set_fill(Color::Rgba(255, 255, 255, self.alpha));
        pen.fill_circle(x, y, radius);
    }
}
