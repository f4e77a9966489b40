mod step;

pub use step::{Direction, StepError, StepSize};

/// Smallest window the navigation surfaces accept, in seconds.
pub const MIN_WINDOW_SECS: f64 = 0.01;
/// Largest window the navigation surfaces accept, in seconds.
pub const MAX_WINDOW_SECS: f64 = 30.0;

/// Convert a sample index to wall-clock seconds.
#[inline]
pub fn frame_to_time(frame: i64, sampling_frequency: f64) -> f64 {
    frame as f64 / sampling_frequency
}

/// Convert wall-clock seconds to a sample index, rounding toward negative infinity.
///
/// Non-finite input is a caller bug; the saturating `as` cast maps NaN to 0.
#[inline]
pub fn time_to_frame(seconds: f64, sampling_frequency: f64) -> i64 {
    (seconds * sampling_frequency).floor() as i64
}

/// Render a start time the way the time text field displays it.
pub fn format_time(seconds: f64) -> String {
    format!("{seconds}")
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum RecordingError {
    #[error("sampling frequency must be a positive finite number, got {0}")]
    InvalidSamplingFrequency(f64),

    #[error("segment {segment} has invalid length {length}")]
    InvalidSegmentLength { segment: usize, length: f64 },

    #[error("a recording needs at least one segment")]
    NoSegments,
}

/// Immutable description of a multi-segment recording.
///
/// Every segment has its own length in frames; navigation positions are
/// always relative to one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    sampling_frequency: f64,
    segment_lengths: Vec<i64>,
}

impl Recording {
    /// Build a recording from per-segment lengths in frames.
    pub fn new(
        sampling_frequency: f64,
        segment_lengths: Vec<i64>,
    ) -> Result<Self, RecordingError> {
        if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
            return Err(RecordingError::InvalidSamplingFrequency(sampling_frequency));
        }
        if segment_lengths.is_empty() {
            return Err(RecordingError::NoSegments);
        }
        if let Some((segment, &length)) =
            segment_lengths.iter().enumerate().find(|(_, l)| **l < 0)
        {
            return Err(RecordingError::InvalidSegmentLength {
                segment,
                length: length as f64,
            });
        }

        Ok(Self {
            sampling_frequency,
            segment_lengths,
        })
    }

    /// Build a recording from per-segment durations in seconds.
    pub fn from_durations(
        durations: &[f64],
        sampling_frequency: f64,
    ) -> Result<Self, RecordingError> {
        if !sampling_frequency.is_finite() || sampling_frequency <= 0.0 {
            return Err(RecordingError::InvalidSamplingFrequency(sampling_frequency));
        }

        let mut lengths = Vec::with_capacity(durations.len());
        for (segment, &duration) in durations.iter().enumerate() {
            if !duration.is_finite() || duration < 0.0 {
                return Err(RecordingError::InvalidSegmentLength {
                    segment,
                    length: duration,
                });
            }
            lengths.push(time_to_frame(duration, sampling_frequency));
        }

        Self::new(sampling_frequency, lengths)
    }

    #[inline]
    pub fn sampling_frequency(&self) -> f64 {
        self.sampling_frequency
    }

    #[inline]
    pub fn num_segments(&self) -> usize {
        self.segment_lengths.len()
    }

    /// Length of a segment in frames, or `None` if the index is out of range.
    #[inline]
    pub fn segment_length(&self, segment_index: usize) -> Option<i64> {
        self.segment_lengths.get(segment_index).copied()
    }

    pub fn segment_lengths(&self) -> &[i64] {
        &self.segment_lengths
    }

    pub fn frame_to_time(&self, frame: i64) -> f64 {
        frame_to_time(frame, self.sampling_frequency)
    }

    pub fn time_to_frame(&self, seconds: f64) -> i64 {
        time_to_frame(seconds, self.sampling_frequency)
    }
}

/// The viewport: a half-open frame range within one segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub start_frame: i64,
    pub end_frame: i64,
    pub segment_index: usize,
}

impl Position {
    pub fn new(start_frame: i64, end_frame: i64, segment_index: usize) -> Self {
        Self {
            start_frame,
            end_frame,
            segment_index,
        }
    }

    /// Number of frames covered by the viewport.
    pub fn len(&self) -> i64 {
        self.end_frame - self.start_frame
    }

    pub fn is_empty(&self) -> bool {
        self.end_frame <= self.start_frame
    }
}

impl From<(i64, i64, usize)> for Position {
    fn from((start_frame, end_frame, segment_index): (i64, i64, usize)) -> Self {
        Self::new(start_frame, end_frame, segment_index)
    }
}

impl From<Position> for (i64, i64, usize) {
    fn from(p: Position) -> Self {
        (p.start_frame, p.end_frame, p.segment_index)
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "segment {} [{}, {})",
            self.segment_index, self.start_frame, self.end_frame
        )
    }
}

/// Inclusive bounds applied to every window-size value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowBounds {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl WindowBounds {
    pub fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    /// Clamp a window length into the bounds. Returns `None` for non-finite input.
    pub fn clamp(&self, seconds: f64) -> Option<f64> {
        if !seconds.is_finite() {
            return None;
        }
        Some(seconds.clamp(self.min_secs, self.max_secs))
    }
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self::new(MIN_WINDOW_SECS, MAX_WINDOW_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FS: f64 = 30000.0;

    #[test]
    fn test_frame_time_conversion() {
        assert_eq!(frame_to_time(30000, FS), 1.0);
        assert_eq!(frame_to_time(15000, FS), 0.5);
        assert_eq!(time_to_frame(1.0, FS), 30000);
        assert_eq!(time_to_frame(0.5, FS), 15000);
    }

    #[test]
    fn test_time_to_frame_floors() {
        // 1.5 frames worth of time lands on frame 1
        assert_eq!(time_to_frame(1.5 / FS, FS), 1);
        // Negative times floor away from zero
        assert_eq!(time_to_frame(-0.5 / FS, FS), -1);
    }

    #[test]
    fn test_recording_from_durations() {
        let recording = Recording::from_durations(&[10.0, 2.5], FS).unwrap();

        assert_eq!(recording.num_segments(), 2);
        assert_eq!(recording.segment_length(0), Some(300000));
        assert_eq!(recording.segment_length(1), Some(75000));
        assert_eq!(recording.segment_length(2), None);
    }

    #[test]
    fn test_recording_rejects_bad_sampling_frequency() {
        assert_eq!(
            Recording::from_durations(&[1.0], 0.0),
            Err(RecordingError::InvalidSamplingFrequency(0.0))
        );
        assert!(Recording::new(f64::NAN, vec![10]).is_err());
        assert!(Recording::new(-1.0, vec![10]).is_err());
    }

    #[test]
    fn test_recording_rejects_bad_segments() {
        assert_eq!(Recording::new(FS, vec![]), Err(RecordingError::NoSegments));
        assert_eq!(
            Recording::new(FS, vec![10, -1]),
            Err(RecordingError::InvalidSegmentLength {
                segment: 1,
                length: -1.0
            })
        );
        assert!(Recording::from_durations(&[1.0, f64::INFINITY], FS).is_err());
    }

    #[test]
    fn test_zero_length_segment_is_allowed() {
        let recording = Recording::new(FS, vec![0, 100]).unwrap();
        assert_eq!(recording.segment_length(0), Some(0));
    }

    #[test]
    fn test_position_tuple_conversion() {
        let p: Position = (10, 20, 1).into();
        assert_eq!(p.len(), 10);
        assert!(!p.is_empty());

        let triple: (i64, i64, usize) = p.into();
        assert_eq!(triple, (10, 20, 1));
        assert_eq!(p.to_string(), "segment 1 [10, 20)");
    }

    #[test]
    fn test_window_bounds_clamp() {
        let bounds = WindowBounds::default();

        assert_eq!(bounds.clamp(40.0), Some(30.0));
        assert_eq!(bounds.clamp(0.0), Some(0.01));
        assert_eq!(bounds.clamp(2.0), Some(2.0));
        assert_eq!(bounds.clamp(f64::NAN), None);
        assert_eq!(bounds.clamp(30.0), Some(30.0));
    }

    #[test]
    fn test_format_time_parses_back() {
        let text = format_time(1.25);
        assert_eq!(text.parse::<f64>().unwrap(), 1.25);
    }
}
