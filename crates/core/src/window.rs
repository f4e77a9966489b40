use tnav_transport::{WindowBounds, frame_to_time, time_to_frame};

/// Length of the viewport in seconds, always inside its bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSize {
    seconds: f64,
    /// Exact frame count when the window was taken from a frame span.
    span_frames: Option<i64>,
}

impl WindowSize {
    /// Clamp `seconds` into `bounds`. Non-finite values have no window.
    pub fn new(seconds: f64, bounds: &WindowBounds) -> Option<Self> {
        bounds.clamp(seconds).map(|seconds| Self {
            seconds,
            span_frames: None,
        })
    }

    /// Window covering `frames` samples. The frame count is kept as is unless
    /// clamping changed the length.
    pub fn from_frames(
        frames: i64,
        sampling_frequency: f64,
        bounds: &WindowBounds,
    ) -> Option<Self> {
        let seconds = frame_to_time(frames, sampling_frequency);
        let clamped = bounds.clamp(seconds)?;
        Some(Self {
            seconds: clamped,
            span_frames: (clamped == seconds).then_some(frames),
        })
    }

    pub fn seconds(&self) -> f64 {
        self.seconds
    }

    pub fn frames(&self, sampling_frequency: f64) -> i64 {
        self.span_frames
            .unwrap_or_else(|| time_to_frame(self.seconds, sampling_frequency))
    }
}
