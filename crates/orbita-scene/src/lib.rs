//! Galaxy scene simulation for orbita.
//!
//! A [`SceneComposer`] owns three fixed populations (twinkling stars,
//! orbiting text particles and shooting stars) and advances and draws all
//! of them once per call to [`SceneComposer::render_frame`], under a slow
//! breathing zoom.

mod composer;
mod init;
mod particle;
mod shooting;
mod star;
mod zoom;

#[cfg(test)]
mod testing;

pub use composer::{SceneComposer, SceneError, SceneSettings, TRAIL_WASH};
pub use init::RandomInitializer;
pub use particle::{Orbit, OrbitingParticle};
pub use shooting::{ACTIVATION_DELAY, Launch, Phase, ShootingStar, Streak};
pub use star::{StarPlacement, TwinklingStar};
pub use zoom::BreathingZoom;
