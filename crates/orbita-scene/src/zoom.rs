//! Slow triangle-wave zoom applied to the whole scene.

/// Zoom change per frame.
pub const ZOOM_STEP: f64 = 0.0005;
/// Lower turning point.
pub const ZOOM_MIN: f64 = 0.95;
/// Upper turning point.
pub const ZOOM_MAX: f64 = 1.05;

/// Breathing zoom level. Starts at 1.0 and heading outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathingZoom {
    level: f64,
    /// +1.0 while growing, -1.0 while shrinking.
    direction: f64,
}

impl Default for BreathingZoom {
    fn default() -> Self {
        Self {
            level: 1.0,
            direction: 1.0,
        }
    }
}

impl BreathingZoom {
    pub fn level(&self) -> f64 {
        self.level
    }

    pub fn direction(&self) -> f64 {
        self.direction
    }

    /// Step one frame and return the new level.
    ///
    /// The direction flips on the frame that first passes a bound, so the
    /// level can overshoot by at most one step.
    pub fn advance(&mut self) -> f64 {
        self.level += ZOOM_STEP * self.direction;
        if self.level > ZOOM_MAX || self.level < ZOOM_MIN {
            self.direction = -self.direction;
        }
        self.level
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_one_growing() {
        let zoom = BreathingZoom::default();
        assert_eq!(zoom.level(), 1.0);
        assert_eq!(zoom.direction(), 1.0);
    }

    #[test]
    fn test_stays_within_one_step_of_bounds() {
        let mut zoom = BreathingZoom::default();
        let mut flips = 0;
        for _ in 0..100_000 {
            let before = zoom.direction();
            let level = zoom.advance();
            assert!(level >= ZOOM_MIN - ZOOM_STEP - 1e-9);
            assert!(level <= ZOOM_MAX + ZOOM_STEP + 1e-9);

            let past_bound = level > ZOOM_MAX || level < ZOOM_MIN;
            assert_eq!(zoom.direction() != before, past_bound);
            if past_bound {
                flips += 1;
            }
        }
        // One full sweep between the bounds is roughly 200 frames.
        assert!(flips > 400);
    }

    #[test]
    fn test_first_flip_happens_past_upper_bound() {
        let mut zoom = BreathingZoom::default();
        let mut frames = 0;
        while zoom.direction() > 0.0 {
            zoom.advance();
            frames += 1;
        }
        assert!(zoom.level() > ZOOM_MAX);
        assert!((99..=102).contains(&frames));
    }
}
