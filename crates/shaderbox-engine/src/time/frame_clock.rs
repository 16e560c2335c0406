use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Seconds since the clock was created. Feeds the time uniform.
    pub elapsed: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter, starting at 0 for the first tick.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped to avoid pathological values when the application is
/// paused by the debugger, minimized, or stalls. The elapsed time is never
/// clamped; it is the wall-clock offset from the clock's start and therefore
/// non-decreasing across ticks.
///
/// `tick_at` accepts an explicit timestamp so tests can single-step frames
/// deterministically instead of relying on display-refresh timing.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// The minimum prevents zero-dt behavior from tight loops on some
    /// platforms; the maximum prevents simulation jumps after long stalls.
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min: Duration::from_micros(100),
            dt_max: Duration::from_millis(250),
        }
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            start: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline without touching the start timestamp.
    ///
    /// Useful after surface reconfigure events or when resuming from
    /// suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    /// Advances the clock as if the frame happened at `now`.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let mut dt = now.saturating_duration_since(self.last);

        if dt < self.dt_min {
            dt = self.dt_min;
        } else if dt > self.dt_max {
            dt = self.dt_max;
        }

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.start).as_secs_f32(),
            now,
            frame_index: self.frame_index,
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

    // ── frame counter ─────────────────────────────────────────────────────

    #[test]
    fn frame_index_increments_per_tick() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        for expected in 0..5u64 {
            let ft = clock.tick_at(base + Duration::from_millis(16 * (expected + 1)));
            assert_eq!(ft.frame_index, expected);
        }
    }

    // ── elapsed ───────────────────────────────────────────────────────────

    #[test]
    fn elapsed_is_non_decreasing() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        let mut prev = 0.0f32;
        for i in 1..10u64 {
            let ft = clock.tick_at(base + Duration::from_millis(7 * i));
            assert!(ft.elapsed >= prev);
            prev = ft.elapsed;
        }
    }

    #[test]
    fn elapsed_tracks_wall_clock_offset() {
        let mut clock = FrameClock::new();
        let base = Instant::now();
        let ft = clock.tick_at(base + Duration::from_secs(2));
        // `base` is taken after the clock's internal start, so at least 2s.
        assert!(ft.elapsed >= 2.0);
    }

    // ── delta clamping ────────────────────────────────────────────────────

    #[test]
    fn dt_clamped_to_maximum() {
        let mut clock = FrameClock::new();
        let ft = clock.tick_at(Instant::now() + Duration::from_secs(10));
        assert!(ft.dt <= 0.25 + f32::EPSILON);
    }

    #[test]
    fn dt_clamped_to_minimum() {
        let mut clock = FrameClock::new();
        let now = Instant::now();
        clock.tick_at(now);
        // Same timestamp twice: raw dt is zero, clamp kicks in.
        let ft = clock.tick_at(now);
        assert!(ft.dt >= 0.0001 - f32::EPSILON);
    }

    #[test]
    fn custom_clamps_respected() {
        let mut clock =
            FrameClock::with_clamps(Duration::from_millis(1), Duration::from_millis(20));
        let ft = clock.tick_at(Instant::now() + Duration::from_secs(1));
        assert!(ft.dt <= 0.020 + f32::EPSILON);
    }
}
