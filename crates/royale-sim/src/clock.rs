//! Wall-clock frame timing for real-time drivers.
//!
//! Turns display-refresh callbacks into clamped simulation deltas. Time
//! spent paused is excluded: while the match is not running the reference
//! instant keeps moving, so the first frame after a resume reports only the
//! time since that frame.

use std::time::Instant;

use royale_core::constants::MAX_FRAME_DELTA_SECS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Option<Instant>,
    max_delta_secs: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DELTA_SECS)
    }
}

impl FrameClock {
    pub fn new(max_delta_secs: f64) -> Self {
        Self {
            last: None,
            max_delta_secs,
        }
    }

    /// Seconds to simulate for the frame at `now`. Returns 0 for the first
    /// frame and for frames where the match is not `running`.
    pub fn delta(&mut self, now: Instant, running: bool) -> f64 {
        let previous = self.last.replace(now);
        if !running {
            return 0.0;
        }
        previous
            .map(|prev| now.saturating_duration_since(prev).as_secs_f64())
            .unwrap_or(0.0)
            .min(self.max_delta_secs)
    }

    /// Forget the reference instant; the next frame reports 0.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::default();
        assert_eq!(clock.delta(Instant::now(), true), 0.0);
    }

    #[test]
    fn test_regular_frames() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        clock.delta(t0, true);
        let dt = clock.delta(t0 + Duration::from_millis(16), true);
        assert!((dt - 0.016).abs() < 1e-9);
    }

    #[test]
    fn test_long_gap_is_clamped() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        clock.delta(t0, true);
        let dt = clock.delta(t0 + Duration::from_secs(30), true);
        assert_eq!(dt, MAX_FRAME_DELTA_SECS);
    }

    #[test]
    fn test_paused_time_excluded() {
        let mut clock = FrameClock::default();
        let t0 = Instant::now();
        clock.delta(t0, true);
        // Paused for two seconds of frames.
        assert_eq!(clock.delta(t0 + Duration::from_secs(1), false), 0.0);
        assert_eq!(clock.delta(t0 + Duration::from_secs(2), false), 0.0);
        let dt = clock.delta(t0 + Duration::from_millis(2020), true);
        assert!((dt - 0.020).abs() < 1e-9, "only the post-resume frame counts, got {dt}");
    }
}
