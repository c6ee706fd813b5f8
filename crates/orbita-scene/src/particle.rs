//! Orbiting text particles.

use std::sync::Arc;

use orbita_core::{Color, Font, Pen, Shadow, TextAlign, TextBaseline};

/// Radius wobble amplitude around the base orbit.
pub const RADIUS_WOBBLE: f64 = 10.0;

/// Vertical squash of the orbit, so the disk reads as tilted.
const ORBIT_TILT: f64 = 0.6;

/// Pulse advance per tick, in radians.
const PULSE_STEP: f64 = 0.07;

/// Glow tint. Independent of the text hue.
const GLOW: Color = Color::Rgba(179, 102, 255, 0.9);

/// Attributes fixed when a particle is created.
#[derive(Debug, Clone, PartialEq)]
pub struct Orbit {
    /// Orbit radius before the wobble is applied.
    pub base_radius: f64,
    /// Angle advance per tick, in radians.
    pub speed: f64,
    pub font_size: f64,
    /// Label, shared with every other particle using the same message.
    pub message: Arc<str>,
}

/// A label circling the center of the viewport on a tilted ellipse.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitingParticle {
    orbit: Orbit,
    angle: f64,
    radius: f64,
    pulse: f64,
    /// Hue in whole degrees, 0-359.
    color_phase: u16,
}

impl OrbitingParticle {
    pub fn new(orbit: Orbit, angle: f64, pulse: f64, color_phase: u16) -> Self {
        Self {
            radius: orbit.base_radius,
            orbit,
            angle,
            pulse,
            color_phase: color_phase % 360,
        }
    }

    pub fn orbit(&self) -> &Orbit {
        &self.orbit
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Current orbit radius, always within `base_radius ± RADIUS_WOBBLE`.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn pulse(&self) -> f64 {
        self.pulse
    }

    pub fn color_phase(&self) -> u16 {
        self.color_phase
    }

    /// Current glow blur radius, between 0 and 30.
    pub fn glow_blur(&self) -> f64 {
        15.0 + 15.0 * self.pulse.sin()
    }

    /// Screen position for the given viewport center.
    pub fn position(&self, center: (f64, f64)) -> (f64, f64) {
        let (cx, cy) = center;
        (
            cx + self.angle.cos() * self.radius,
            cy + self.angle.sin() * self.radius * ORBIT_TILT,
        )
    }

    /// Advance one tick.
    pub fn update(&mut self) {
        self.angle += self.orbit.speed;
        self.pulse += PULSE_STEP;
        self.color_phase = (self.color_phase + 1) % 360;
        self.radius = self.orbit.base_radius + RADIUS_WOBBLE * (self.angle * 3.0).sin();
    }

    pub fn draw(&self, pen: &mut Pen<'_>, center: (f64, f64)) {
        let (x, y) = self.position(center);

        pen.set_shadow(Shadow {
            color: GLOW,
            blur: self.glow_blur(),
        });
        pen.set_fill(Color::Hsl(f64::from(self.color_phase), 0.7, 0.8));
        pen.set_font(Font {
            size: self.orbit.font_size,
            align: TextAlign::Center,
            baseline: TextBaseline::Middle,
        });
        pen.fill_text(&self.orbit.message, x, y);

        pen.set_shadow(Shadow {
            color: GLOW,
            blur: 0.0,
        });
    }
}
