use std::time::Duration;

/// `1 - (1 - p)^3`, clamped to `[0, 1]`.
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// A count-up from `start` to `target` over `duration`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberAnimation {
    pub start: f64,
    pub target: f64,
    pub duration: Duration,
}

impl NumberAnimation {
    pub fn count_up(target: f64, duration: Duration) -> Self {
        Self {
            start: 0.0,
            target,
            duration,
        }
    }

    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
    }

    /// Displayed value after `elapsed`, rounded to the nearest integer.
    pub fn value_at(&self, elapsed: Duration) -> i64 {
        let eased = ease_out_cubic(self.progress(elapsed));
        (self.start + (self.target - self.start) * eased).round() as i64
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        self.progress(elapsed) >= 1.0
    }
}

/// Dash offset that leaves `score`% of a ring of `radius` stroked.
pub fn ring_dash_offset(score: f64, radius: f64) -> f64 {
    let circumference = ring_circumference(radius);
    circumference - (score / 100.0) * circumference
}

pub fn ring_circumference(radius: f64) -> f64 {
    2.0 * std::f64::consts::PI * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ease_out_cubic() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(0.5), 0.875);
        assert_eq!(ease_out_cubic(3.0), 1.0);
    }

    #[test]
    fn test_count_up() {
        let anim = NumberAnimation::count_up(78.0, Duration::from_millis(1000));
        assert_eq!(anim.value_at(Duration::ZERO), 0);
        assert_eq!(anim.value_at(Duration::from_millis(500)), 68);
        assert_eq!(anim.value_at(Duration::from_millis(1000)), 78);
        assert_eq!(anim.value_at(Duration::from_secs(5)), 78);
        assert!(!anim.is_finished(Duration::from_millis(999)));
        assert!(anim.is_finished(Duration::from_millis(1000)));
    }

    #[test]
    fn test_zero_duration_jumps_to_target() {
        let anim = NumberAnimation::count_up(42.0, Duration::ZERO);
        assert_eq!(anim.value_at(Duration::ZERO), 42);
    }

    #[test]
    fn test_ring_dash_offset() {
        let circ = ring_circumference(70.0);
        assert!((circ - 439.822971502571).abs() < 1e-9);
        assert!((ring_dash_offset(78.0, 70.0) - circ * 0.22).abs() < 1e-9);
        assert_eq!(ring_dash_offset(0.0, 70.0), circ);
        assert_eq!(ring_dash_offset(100.0, 70.0), 0.0);
    }
}
