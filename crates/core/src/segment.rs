//! Moving the viewport to the start of another segment.

use tnav_transport::Position;

use crate::window::WindowSize;

/// Candidate for entering `segment_index`: start at frame 0 with the current
/// window. The gate clips the end to the new segment's length.
pub fn segment_entry(
    segment_index: usize,
    window: WindowSize,
    sampling_frequency: f64,
) -> Position {
    Position::new(0, window.frames(sampling_frequency), segment_index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tnav_transport::WindowBounds;

    #[test]
    fn test_entry_starts_at_zero_with_window() {
        let window = WindowSize::new(2.0, &WindowBounds::default()).unwrap();
        assert_eq!(segment_entry(2, window, 1000.0), Position::new(0, 2_000, 2));
    }

    #[test]
    fn test_entry_is_not_clipped_before_the_gate() {
        let window = WindowSize::new(30.0, &WindowBounds::default()).unwrap();
        assert_eq!(segment_entry(1, window, 1000.0), Position::new(0, 30_000, 1));
    }
}
