//! Frame time and FPS bookkeeping (diagnostics only)

use std::time::Duration;

/// Rolling frame statistics with a once-per-second report
#[derive(Debug, Default)]
pub struct FrameStats {
    /// Last frame time in milliseconds
    pub frame_ms: f64,
    /// Instantaneous frames per second of the last frame
    pub fps: f64,
    window: Duration,
    window_frames: u32,
    report: Option<(f64, f64)>,
}

impl FrameStats {
    const REPORT_INTERVAL: Duration = Duration::from_secs(1);

    pub fn new() -> Self {
        Self::default()
    }

    /// Record the wall-clock time of one finished frame
    pub fn record(&mut self, elapsed: Duration) {
        let secs = elapsed.as_secs_f64();
        self.frame_ms = secs * 1000.0;
        self.fps = if secs > 0.0 { 1.0 / secs } else { 0.0 };

        self.window += elapsed;
        self.window_frames += 1;
        if self.window >= Self::REPORT_INTERVAL {
            let window_secs = self.window.as_secs_f64();
            let frames = self.window_frames as f64;
            self.report = Some((window_secs * 1000.0 / frames, frames / window_secs));
            self.window = Duration::ZERO;
            self.window_frames = 0;
        }
    }

    /// Average (ms per frame, fps) over the last second, once per second
    pub fn take_report(&mut self) -> Option<(f64, f64)> {
        self.report.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_frame() {
        let mut stats = FrameStats::new();
        stats.record(Duration::from_millis(20));
        assert!((stats.frame_ms - 20.0).abs() < 1e-9);
        assert!((stats.fps - 50.0).abs() < 1e-9);
        assert!(stats.take_report().is_none());
    }

    #[test]
    fn test_report_once_per_second() {
        let mut stats = FrameStats::new();
        for _ in 0..40 {
            stats.record(Duration::from_millis(25));
        }
        let (ms, fps) = stats.take_report().unwrap();
        assert!((ms - 25.0).abs() < 1e-6);
        assert!((fps - 40.0).abs() < 1e-6);
        assert!(stats.take_report().is_none());
    }

    #[test]
    fn test_zero_duration_frame() {
        let mut stats = FrameStats::new();
        stats.record(Duration::ZERO);
        assert_eq!(stats.fps, 0.0);
    }
}
