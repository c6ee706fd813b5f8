//! Shooting stars: long dormant stretches, then a fast diagonal streak.

use orbita_core::{Color, Pen, Viewport};
use rand::Rng;

use crate::init::RandomInitializer;

/// Ticks a shooting star waits before it may fire. It fires on the tick
/// its counter exceeds this value.
pub const ACTIVATION_DELAY: u32 = 100;

const STREAK_COLOR: Color = Color::Rgba(255, 255, 255, 0.8);

/// Shape and pace of one streak. Redrawn every time the star resets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Streak {
    /// Tail length in scene units.
    pub len: f64,
    /// Horizontal advance per tick. Vertical advance is half of it.
    pub speed: f64,
    /// Line thickness.
    pub size: f64,
}

/// Starting point plus streak shape for one activation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Launch {
    pub x: f64,
    pub y: f64,
    pub streak: Streak,
}

/// Lifecycle state of a [`ShootingStar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Invisible, counting ticks until launch.
    Dormant { waited: u32 },
    /// Moving and visible.
    Active,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShootingStar {
    x: f64,
    y: f64,
    streak: Streak,
    phase: Phase,
}

impl ShootingStar {
    /// A dormant star that will start from `launch`.
    pub fn new(launch: Launch) -> Self {
        Self {
            x: launch.x,
            y: launch.y,
            streak: launch.streak,
            phase: Phase::Dormant { waited: 0 },
        }
    }

    pub fn position(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    pub fn streak(&self) -> Streak {
        self.streak
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Advance one tick. An active star that leaves the viewport is reborn
    /// in place with fresh geometry from `init`.
    pub fn update<R: Rng>(&mut self, viewport: Viewport, init: &mut RandomInitializer<R>) {
        match self.phase {
            Phase::Dormant { waited } => {
                let waited = waited + 1;
                self.phase = if waited > ACTIVATION_DELAY {
                    Phase::Active
                } else {
                    Phase::Dormant { waited }
                };
            }
            Phase::Active => {
                self.x += self.streak.speed;
                self.y += self.streak.speed * 0.5;
                if self.x > viewport.width || self.y > viewport.height {
                    *self = Self::new(init.launch(viewport));
                }
            }
        }
    }

    /// Stroke the streak with its tail trailing up and to the left.
    pub fn draw(&self, pen: &mut Pen<'_>) {
        if self.phase != Phase::Active {
            return;
        }
        let Streak { len, size, .. } = self.streak;
        pen.set_stroke(STREAK_COLOR, size);
        pen.stroke_line((self.x, self.y), (self.x - len, self.y - len * 0.5));
    }
}

#[cfg(test)]
mod tests {
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::testing::{Call, Recorder};

    fn launch(x: f64, y: f64) -> Launch {
        Launch {
            x,
            y,
            streak: Streak {
                len: 150.0,
                speed: 12.0,
                size: 2.0,
            },
        }
    }

    fn initializer() -> RandomInitializer<StdRng> {
        RandomInitializer::new(StdRng::seed_from_u64(7))
    }

    #[test]
    fn test_waits_more_than_delay_before_activating() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut init = initializer();
        let mut s = ShootingStar::new(launch(10.0, 10.0));
        assert_eq!(s.phase(), Phase::Dormant { waited: 0 });

        for tick in 1..=ACTIVATION_DELAY {
            s.update(viewport, &mut init);
            assert_eq!(s.phase(), Phase::Dormant { waited: tick });
            assert_eq!(s.position(), (10.0, 10.0));
        }
        s.update(viewport, &mut init);
        assert!(s.is_active());
        assert_eq!(s.position(), (10.0, 10.0));
    }

    #[test]
    fn test_active_moves_down_right() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut init = initializer();
        let mut s = ShootingStar::new(launch(10.0, 10.0));
        for _ in 0..=ACTIVATION_DELAY {
            s.update(viewport, &mut init);
        }
        s.update(viewport, &mut init);
        assert_eq!(s.position(), (22.0, 16.0));
        s.update(viewport, &mut init);
        assert_eq!(s.position(), (34.0, 22.0));
    }

    #[test]
    fn test_exit_resets_with_fresh_geometry() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut init = initializer();
        let mut s = ShootingStar::new(launch(795.0, 10.0));
        for _ in 0..=ACTIVATION_DELAY {
            s.update(viewport, &mut init);
        }
        assert!(s.is_active());

        s.update(viewport, &mut init);
        assert_eq!(s.phase(), Phase::Dormant { waited: 0 });
        let (x, y) = s.position();
        assert!((0.0..800.0).contains(&x));
        assert!((0.0..300.0).contains(&y));
        let streak = s.streak();
        assert!((100.0..200.0).contains(&streak.len));
        assert!((10.0..20.0).contains(&streak.speed));
        assert!((1.0..3.0).contains(&streak.size));
    }

    #[test]
    fn test_exit_through_bottom_edge() {
        let viewport = Viewport::new(800.0, 100.0);
        let mut init = initializer();
        let mut s = ShootingStar::new(launch(10.0, 95.0));
        for _ in 0..=ACTIVATION_DELAY {
            s.update(viewport, &mut init);
        }
        s.update(viewport, &mut init);
        assert!(!s.is_active());
    }

    #[test]
    fn test_zero_viewport_keeps_cycling() {
        let viewport = Viewport::new(0.0, 0.0);
        let mut init = initializer();
        let mut s = ShootingStar::new(init.launch(viewport));
        for _ in 0..1_000 {
            s.update(viewport, &mut init);
        }
        assert_eq!(s.position(), (0.0, 0.0));
    }

    #[test]
    fn test_draw_only_when_active() {
        let viewport = Viewport::new(800.0, 600.0);
        let mut init = initializer();
        let mut s = ShootingStar::new(launch(300.0, 100.0));

        let mut recorder = Recorder::default();
        s.draw(&mut Pen::new(&mut recorder));
        assert_eq!(recorder.count(|c| matches!(c, Call::Line { .. })), 0);

        for _ in 0..=ACTIVATION_DELAY {
            s.update(viewport, &mut init);
        }
        let mut recorder = Recorder::default();
        s.draw(&mut Pen::new(&mut recorder));
        assert_eq!(recorder.calls[0], Call::Stroke(STREAK_COLOR, 2.0));
        assert_eq!(
            recorder.calls[1],
            Call::Line {
                from: (300.0, 100.0),
                to: (150.0, 25.0),
            }
        );
    }
}
