//! Time-driven color animation.

use std::time;

/// How fast the triangle fades in and out; lower is slower.
pub const BREATHE_MULTIPLIER: f32 = 2.0;

/// Maps elapsed time onto a color intensity in `[0, 1]`.
///
/// ```rust
/// use glitter::animation::breathe;
///
/// assert_eq!(breathe(0.0, 2.0), 0.5);
/// ```
pub fn breathe(elapsed: f32, multiplier: f32) -> f32 {
    ((elapsed * multiplier).sin() + 1.0) / 2.0
}

/// Wall-clock time since the render loop started.
#[derive(Clone, Copy, Debug)]
pub struct Clock {
    start: time::Instant,
}

impl Clock {
    /// Starts the clock.
    pub fn start() -> Self {
        Clock { start: time::Instant::now() }
    }

    /// Seconds elapsed since `start`.
    pub fn elapsed(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const EPSILON: f32 = 1.0e-6;

    #[test]
    fn breathe_hits_extremes_at_quarter_periods() {
        let quarter = PI / 2.0 / BREATHE_MULTIPLIER;
        assert!((breathe(quarter, BREATHE_MULTIPLIER) - 1.0).abs() < EPSILON);
        assert!((breathe(3.0 * quarter, BREATHE_MULTIPLIER)).abs() < EPSILON);
    }

    #[test]
    fn breathe_stays_in_unit_range() {
        for step in 0 .. 10_000 {
            let value = breathe(step as f32 * 0.0137, BREATHE_MULTIPLIER);
            assert!(value >= 0.0 && value <= 1.0, "{} out of range", value);
        }
    }

    #[test]
    fn breathe_matches_formula() {
        let t = 1.25;
        let expected = ((t * 2.0f32).sin() + 1.0) / 2.0;
        assert_eq!(breathe(t, 2.0), expected);
    }

    #[test]
    fn clock_is_monotonic() {
        let clock = Clock::start();
        let first = clock.elapsed();
        let second = clock.elapsed();
        assert!(first >= 0.0);
        assert!(second >= first);
    }
}
