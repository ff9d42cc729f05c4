//! Frame arithmetic for stepping through video.

/// Direction of a single-frame step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepDirection {
    Backward,
    Forward,
}

impl StepDirection {
    pub fn sign(self) -> f64 {
        match self {
            StepDirection::Backward => -1.0,
            StepDirection::Forward => 1.0,
        }
    }
}

/// Length of one frame in seconds. Rates below 1 fps are treated as 1.
pub fn frame_duration(fps: f64) -> f64 {
    1.0 / fps.max(1.0)
}

/// Index of the frame showing at `time_seconds`, with the same fps floor as
/// [`frame_duration`].
pub fn frame_index(time_seconds: f64, fps: f64) -> u64 {
    (time_seconds.max(0.0) * fps.max(1.0)).floor() as u64
}
