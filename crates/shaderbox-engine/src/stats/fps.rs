use std::time::{Duration, Instant};

const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Frame-rate counter.
///
/// Call [`update`](Self::update) once per frame; the reported rate is the
/// frame count over the last completed one-second window. `update_at` accepts
/// an explicit timestamp for deterministic tests.
#[derive(Debug, Clone)]
pub struct FpsCounter {
    window_start: Instant,
    frames: u32,
    fps: f32,
    label: String,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(now: Instant) -> Self {
        Self {
            window_start: now,
            frames: 0,
            fps: 0.0,
            label: "-- FPS".to_string(),
        }
    }

    pub fn update(&mut self) {
        self.update_at(Instant::now());
    }

    pub fn update_at(&mut self, now: Instant) {
        self.frames += 1;

        let window = now.saturating_duration_since(self.window_start);
        if window >= SAMPLE_WINDOW {
            self.fps = self.frames as f32 / window.as_secs_f32();
            self.label = format!("{:.0} FPS", self.fps);
            self.frames = 0;
            self.window_start = now;
        }
    }

    /// Latest completed-window rate; 0 until the first window closes.
    pub fn fps(&self) -> f32 {
        self.fps
    }

    /// Display string for the overlay.
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_zero_before_the_first_window_closes() {
        let base = Instant::now();
        let mut counter = FpsCounter::starting_at(base);
        counter.update_at(base + Duration::from_millis(16));
        assert_eq!(counter.fps(), 0.0);
        assert_eq!(counter.label(), "-- FPS");
    }

    #[test]
    fn sixty_updates_over_a_second_report_sixty() {
        let base = Instant::now();
        let mut counter = FpsCounter::starting_at(base);

        for i in 1..=60u64 {
            counter.update_at(base + Duration::from_nanos(i * 1_000_000_000 / 60));
        }

        assert!((counter.fps() - 60.0).abs() < 1.0, "fps = {}", counter.fps());
        assert_eq!(counter.label(), "60 FPS");
    }

    #[test]
    fn windows_are_independent() {
        let base = Instant::now();
        let mut counter = FpsCounter::starting_at(base);

        // First window: 10 frames over one second.
        for i in 1..=10u64 {
            counter.update_at(base + Duration::from_millis(i * 100));
        }
        assert!((counter.fps() - 10.0).abs() < 1.0);

        // Second window: 30 frames over the next second.
        let second = base + Duration::from_secs(1);
        for i in 1..=30u64 {
            counter.update_at(second + Duration::from_nanos(i * 1_000_000_000 / 30));
        }
        assert!((counter.fps() - 30.0).abs() < 1.0, "fps = {}", counter.fps());
    }
}
