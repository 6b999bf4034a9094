//! Frames-per-second counter.

use std::time::{Duration, Instant};

use log::info;

/// Counts frames and reports the rate once per reporting interval.
pub struct FpsCounter {
    interval: Duration,
    window_start: Instant,
    frames: u32,
    last_fps: f32,
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl FpsCounter {
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(interval, Instant::now())
    }

    fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            window_start: now,
            frames: 0,
            last_fps: 0.0,
        }
    }

    /// Count one frame. Logs and returns the rate when an interval closes.
    pub fn tick(&mut self) -> Option<f32> {
        self.tick_at(Instant::now())
    }

    fn tick_at(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.duration_since(self.window_start);
        if elapsed < self.interval {
            return None;
        }

        self.last_fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.window_start = now;
        info!("FPS: {:.1}", self.last_fps);
        Some(self.last_fps)
    }

    /// Rate measured over the last completed interval.
    pub fn fps(&self) -> f32 {
        self.last_fps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn reports_once_per_interval() {
        let start = Instant::now();
        let mut counter = FpsCounter::starting_at(Duration::from_secs(1), start);

        for i in 1..30 {
            assert_eq!(counter.tick_at(start + Duration::from_millis(i * 20)), None);
        }
        let fps = counter.tick_at(start + Duration::from_secs(1)).unwrap();
        assert_relative_eq!(fps, 30.0, epsilon = 1e-3);
        assert_relative_eq!(counter.fps(), 30.0, epsilon = 1e-3);

        // A fresh interval starts after reporting.
        assert_eq!(counter.tick_at(start + Duration::from_millis(1500)), None);
    }
}
