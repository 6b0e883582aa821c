//! Frame timing.
//!
//! One `FrameClock` per render loop; call `tick()` once per presented frame.

use std::time::{Duration, Instant};

/// Per-frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time since the previous tick, in seconds, clamped.
    pub dt: f32,

    /// Monotonic frame counter.
    pub frame_index: u64,

    /// Achieved frame rate, reported once per second of wall time.
    pub rate: Option<f32>,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a debugger pause or a minimized window cannot
/// produce pathological values downstream.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    window_start: Instant,
    window_frames: u32,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            last: now,
            window_start: now,
            window_frames: 0,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            last: now,
            window_start: now,
            window_frames: 0,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Advances the clock and returns the snapshot for this frame.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        self.window_frames += 1;
        let window_elapsed = now.saturating_duration_since(self.window_start);
        let rate = if window_elapsed >= Duration::from_secs(1) {
            let fps = self.window_frames as f32 / window_elapsed.as_secs_f32();
            self.window_start = now;
            self.window_frames = 0;
            Some(fps)
        } else {
            None
        };

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            frame_index: self.frame_index,
            rate,
        };

        self.frame_index = self.frame_index.wrapping_add(1);

        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_index_is_monotonic() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
        assert_eq!(clock.tick().frame_index, 2);
    }

    #[test]
    fn dt_respects_lower_clamp() {
        let mut clock = FrameClock::new();
        // Back-to-back ticks elapse far less than dt_min.
        let ft = clock.tick();
        assert!(ft.dt >= Duration::from_micros(100).as_secs_f32());
    }

    #[test]
    fn dt_respects_upper_clamp() {
        let mut clock = FrameClock::with_clamps(Duration::ZERO, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        let ft = clock.tick();
        assert!(ft.dt <= Duration::from_millis(1).as_secs_f32());
    }

    #[test]
    fn rate_is_absent_before_a_second_elapses() {
        let mut clock = FrameClock::new();
        assert!(clock.tick().rate.is_none());
        assert!(clock.tick().rate.is_none());
    }
}
