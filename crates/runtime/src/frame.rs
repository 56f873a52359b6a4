/// Frame metadata handed to the per-frame callback.
///
/// Easing in this workspace is defined per frame, not per second, so `dt_s`
/// is informational (logs, traces) and never scales the camera motion.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Frame {
    /// 0-based frame index.
    pub index: u64,
    /// Duration of the previous frame (seconds).
    pub dt_s: f64,
    /// Session time at the start of the frame (seconds).
    pub time_s: f64,
}

impl Frame {
    pub fn first(dt_s: f64) -> Self {
        Self {
            index: 0,
            dt_s: sanitize_dt(dt_s),
            time_s: 0.0,
        }
    }

    /// Next frame with the same duration.
    pub fn next(self) -> Self {
        self.next_with_dt(self.dt_s)
    }

    /// Next frame with a measured duration.
    pub fn next_with_dt(self, dt_s: f64) -> Self {
        let dt_s = sanitize_dt(dt_s);
        Self {
            index: self.index + 1,
            dt_s,
            time_s: self.time_s + dt_s,
        }
    }
}

/// Negative or non-finite durations (clock hiccups in the host) count as zero.
fn sanitize_dt(dt_s: f64) -> f64 {
    if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 }
}

impl Default for Frame {
    fn default() -> Self {
        Self::first(1.0 / 60.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Frame;

    #[test]
    fn next_advances_index_and_time() {
        let f0 = Frame::first(0.5);
        let f1 = f0.next();
        let f2 = f1.next();
        assert_eq!(f1.index, 1);
        assert_eq!(f2.index, 2);
        assert_eq!(f2.time_s, 1.0);
    }

    #[test]
    fn measured_dt_is_sanitized() {
        let f = Frame::first(0.016).next_with_dt(-3.0).next_with_dt(f64::NAN);
        assert_eq!(f.index, 2);
        assert_eq!(f.time_s, 0.0);
        assert_eq!(f.dt_s, 0.0);
    }

    #[test]
    fn first_frame_dt_is_sanitized() {
        assert_eq!(Frame::first(-0.5).dt_s, 0.0);
        assert_eq!(Frame::first(f64::INFINITY).dt_s, 0.0);
        let f = Frame::first(f64::NAN).next();
        assert_eq!(f.dt_s, 0.0);
        assert_eq!(f.time_s, 0.0);
    }
}
