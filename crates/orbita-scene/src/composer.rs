//! Scene ownership and the per-frame update-then-draw pass.

use std::sync::Arc;

use orbita_core::{Color, Pen, Surface, Viewport};
use rand::Rng;
use tracing::{debug, info};

use crate::init::RandomInitializer;
use crate::particle::OrbitingParticle;
use crate::shooting::ShootingStar;
use crate::star::TwinklingStar;
use crate::zoom::BreathingZoom;

/// Low-alpha violet painted over the whole viewport every frame.
pub const TRAIL_WASH: Color = Color::Rgba(26, 0, 26, 0.15);

/// Errors raised while building a scene.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SceneError {
    #[error("at least one display message is required")]
    NoMessages,
    #[error("the galaxy needs at least one arm")]
    NoArms,
}

/// Population sizes for a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSettings {
    pub particles: usize,
    pub stars: usize,
    pub shooting_stars: usize,
    /// Number of galaxy arms the particles are spread across.
    pub arms: usize,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            particles: 60,
            stars: 150,
            shooting_stars: 5,
            arms: 4,
        }
    }
}

/// Owns every entity of the scene and renders one frame at a time.
#[derive(Debug)]
pub struct SceneComposer<R> {
    stars: Vec<TwinklingStar>,
    particles: Vec<OrbitingParticle>,
    shooting_stars: Vec<ShootingStar>,
    zoom: BreathingZoom,
    init: RandomInitializer<R>,
    /// Viewport seen by the previous frame.
    last_viewport: Viewport,
    frames: u64,
}

impl<R: Rng> SceneComposer<R> {
    /// Populate a scene for `viewport`.
    ///
    /// Messages are handed to particles round-robin by index.
    pub fn new<S: AsRef<str>>(
        settings: SceneSettings,
        messages: &[S],
        rng: R,
        viewport: Viewport,
    ) -> Result<Self, SceneError> {
        if messages.is_empty() {
            return Err(SceneError::NoMessages);
        }
        if settings.arms == 0 {
            return Err(SceneError::NoArms);
        }

        let pool: Vec<Arc<str>> = messages.iter().map(|m| Arc::from(m.as_ref())).collect();
        let mut init = RandomInitializer::new(rng);

        let particles = (0..settings.particles)
            .map(|i| {
                let message = Arc::clone(&pool[i % pool.len()]);
                init.particle(i, settings.arms, viewport, message)
            })
            .collect();
        let stars = (0..settings.stars).map(|_| init.star(viewport)).collect();
        let shooting_stars = (0..settings.shooting_stars)
            .map(|_| ShootingStar::new(init.launch(viewport)))
            .collect();

        info!(
            particles = settings.particles,
            stars = settings.stars,
            shooting_stars = settings.shooting_stars,
            arms = settings.arms,
            width = viewport.width,
            height = viewport.height,
            "scene populated"
        );

        Ok(Self {
            stars,
            particles,
            shooting_stars,
            zoom: BreathingZoom::default(),
            init,
            last_viewport: viewport,
            frames: 0,
        })
    }

    pub fn stars(&self) -> &[TwinklingStar] {
        &self.stars
    }

    pub fn particles(&self) -> &[OrbitingParticle] {
        &self.particles
    }

    pub fn shooting_stars(&self) -> &[ShootingStar] {
        &self.shooting_stars
    }

    pub fn zoom(&self) -> BreathingZoom {
        self.zoom
    }

    /// Frames rendered so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Advance every entity one tick and draw the frame onto `surface`.
    ///
    /// Layering is fixed: wash, stars, particles, shooting stars. Each entity
    /// draws through its own [`Pen`], so paint settings are back at the
    /// baseline before the next one starts.
    pub fn render_frame<S: Surface>(&mut self, surface: &mut S, viewport: Viewport) {
        if viewport != self.last_viewport {
            debug!(
                width = viewport.width,
                height = viewport.height,
                "viewport changed"
            );
            self.last_viewport = viewport;
        }

        let Viewport { width, height } = viewport;
        surface.clear_rect(0.0, 0.0, width, height);

        let zoom = self.zoom.advance();
        let center = viewport.center();

        surface.save();
        surface.translate(center.0, center.1);
        surface.scale(zoom, zoom);
        surface.translate(-center.0, -center.1);

        surface.set_fill(TRAIL_WASH);
        surface.fill_rect(0.0, 0.0, width, height);

        for star in &mut self.stars {
            star.update();
            star.draw(&mut Pen::new(&mut *surface));
        }

        for particle in &mut self.particles {
            particle.update();
            particle.draw(&mut Pen::new(&mut *surface), center);
        }

        for shooting_star in &mut self.shooting_stars {
            shooting_star.update(viewport, &mut self.init);
            shooting_star.draw(&mut Pen::new(&mut *surface));
        }

        surface.restore();
        self.frames += 1;
    }
}
