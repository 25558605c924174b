use std::collections::VecDeque;

/// Frame and update counters with a rolling frame-time average.
#[derive(Debug, Clone)]
pub struct FrameStats {
    frames: u64,
    updates: u64,
    window: usize,
    frame_times: VecDeque<f32>,
}

impl FrameStats {
    pub const DEFAULT_WINDOW: usize = 120;

    pub fn new() -> Self {
        Self::with_window(Self::DEFAULT_WINDOW)
    }

    /// Average over the last `window` frames (at least 1).
    pub fn with_window(window: usize) -> Self {
        let window = window.max(1);
        Self {
            frames: 0,
            updates: 0,
            window,
            frame_times: VecDeque::with_capacity(window),
        }
    }

    /// Record a rendered frame that took `dt` seconds.
    pub fn record_frame(&mut self, dt: f32) {
        self.frames += 1;
        if !dt.is_finite() || dt < 0.0 {
            return;
        }
        if self.frame_times.len() == self.window {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(dt);
    }

    /// Record one fixed-timestep update.
    pub fn record_update(&mut self) {
        self.updates += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }

    /// Mean frame time in milliseconds over the window, 0 before any frame.
    pub fn average_frame_ms(&self) -> f32 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        let sum: f32 = self.frame_times.iter().sum();
        sum / self.frame_times.len() as f32 * 1000.0
    }

    pub fn fps(&self) -> f32 {
        let ms = self.average_frame_ms();
        if ms > 0.0 { 1000.0 / ms } else { 0.0 }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for FrameStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Application average {:.3} ms/frame ({:.1} FPS)",
            self.average_frame_ms(),
            self.fps()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_stats() {
        let stats = FrameStats::new();
        assert_eq!(stats.frames(), 0);
        assert_eq!(stats.average_frame_ms(), 0.0);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn average_over_window() {
        let mut stats = FrameStats::with_window(2);
        stats.record_frame(1.0);
        stats.record_frame(0.010);
        stats.record_frame(0.030);
        assert_eq!(stats.frames(), 3);
        assert!((stats.average_frame_ms() - 20.0).abs() < 1e-3);
        assert!((stats.fps() - 50.0).abs() < 1e-2);
    }

    #[test]
    fn bad_frame_times_are_counted_but_not_averaged() {
        let mut stats = FrameStats::new();
        stats.record_frame(f32::NAN);
        stats.record_frame(-1.0);
        assert_eq!(stats.frames(), 2);
        assert_eq!(stats.average_frame_ms(), 0.0);
    }

    #[test]
    fn updates_counted_separately() {
        let mut stats = FrameStats::new();
        stats.record_update();
        stats.record_update();
        stats.record_frame(0.016);
        assert_eq!(stats.updates(), 2);
        assert_eq!(stats.frames(), 1);
    }

    #[test]
    fn display_mentions_fps() {
        let mut stats = FrameStats::new();
        stats.record_frame(0.016);
        assert!(format!("{stats}").contains("FPS"));
    }
}
