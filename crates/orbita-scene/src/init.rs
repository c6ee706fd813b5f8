//! Randomized birth attributes for scene entities.

use std::f64::consts::TAU;
use std::sync::Arc;

use orbita_core::Viewport;
use rand::Rng;

use crate::particle::{Orbit, OrbitingParticle};
use crate::shooting::{Launch, Streak};
use crate::star::{StarPlacement, TwinklingStar};

/// Angular spread of particles inside one galaxy arm, in radians.
const ARM_SPREAD: f64 = 0.5;

/// Closest a particle orbit gets to the center.
const MIN_ORBIT_RADIUS: f64 = 50.0;

/// Draws every random attribute the scene needs from a single source.
#[derive(Debug, Clone)]
pub struct RandomInitializer<R> {
    rng: R,
}

impl<R: Rng> RandomInitializer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform draw in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform draw in `[low, low + span)`.
    fn span(&mut self, low: f64, span: f64) -> f64 {
        low + self.unit() * span
    }

    /// Particle `index` of a galaxy with `arms` arms, seeded inside its arm.
    ///
    /// `arms` must be non-zero; the composer checks this before populating.
    pub fn particle(
        &mut self,
        index: usize,
        arms: usize,
        viewport: Viewport,
        message: Arc<str>,
    ) -> OrbitingParticle {
        let arm = index % arms;
        let arm_separation = TAU / arms as f64;
        let angle = self.span(arm as f64 * arm_separation, ARM_SPREAD);
        let base_radius = self.span(MIN_ORBIT_RADIUS, viewport.width / 3.0);
        let speed = self.span(0.001, 0.002);
        let font_size = self.span(14.0, 8.0);
        let pulse = self.span(0.0, TAU);
        let color_phase = self.span(0.0, 360.0) as u16;

        OrbitingParticle::new(
            Orbit {
                base_radius,
                speed,
                font_size,
                message,
            },
            angle,
            pulse,
            color_phase,
        )
    }

    /// A star anywhere in the viewport.
    pub fn star(&mut self, viewport: Viewport) -> TwinklingStar {
        let placement = StarPlacement {
            x: self.span(0.0, viewport.width),
            y: self.span(0.0, viewport.height),
            radius: self.span(0.0, 1.5),
        };
        let alpha = self.unit();
        let alpha_change = self.span(0.01, 0.02);
        TwinklingStar::new(placement, alpha, alpha_change)
    }

    /// A shooting-star start in the upper half of the viewport.
    pub fn launch(&mut self, viewport: Viewport) -> Launch {
        Launch {
            x: self.span(0.0, viewport.width),
            y: self.span(0.0, viewport.height / 2.0),
            streak: Streak {
                len: self.span(100.0, 100.0),
                speed: self.span(10.0, 10.0),
                size: self.span(1.0, 2.0),
            },
        }
    }
}
