//! Fixed-step frame clock

use std::time::Instant;

/// Counts simulated frames advanced at a fixed step.
///
/// The game is stepped deterministically, so simulated time only moves
/// when [`FrameClock::tick`] is called. Wall time is tracked alongside for
/// reporting.
#[derive(Debug, Clone)]
pub struct FrameClock {
    fixed_dt: f32,
    simulated_time: f32,
    frame_count: u64,
    started: Instant,
}

impl FrameClock {
    /// Create a clock stepping `fixed_dt` seconds per frame
    #[must_use]
    pub fn new(fixed_dt: f32) -> Self {
        Self {
            fixed_dt,
            simulated_time: 0.0,
            frame_count: 0,
            started: Instant::now(),
        }
    }

    /// Advance one frame and return its delta time
    pub fn tick(&mut self) -> f32 {
        self.simulated_time += self.fixed_dt;
        self.frame_count += 1;
        self.fixed_dt
    }

    /// Seconds per frame
    #[must_use]
    pub const fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    /// Total simulated seconds
    #[must_use]
    pub const fn simulated_time(&self) -> f32 {
        self.simulated_time
    }

    /// Frames advanced so far
    #[must_use]
    pub const fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Wall-clock seconds since the clock was created
    #[must_use]
    pub fn wall_time(&self) -> f32 {
        self.started.elapsed().as_secs_f32()
    }

    /// Simulated frames per wall-clock second
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn average_fps(&self) -> f32 {
        let wall = self.wall_time();
        if wall > 0.0 {
            self.frame_count as f32 / wall
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_tick_accumulates_fixed_steps() {
        let mut clock = FrameClock::new(0.5);
        assert_relative_eq!(clock.tick(), 0.5);
        clock.tick();
        clock.tick();
        assert_eq!(clock.frame_count(), 3);
        assert_relative_eq!(clock.simulated_time(), 1.5);
    }
}
