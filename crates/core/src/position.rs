//! The validating gate every viewport change passes through.

use tnav_transport::{Position, Recording};

/// Why a candidate position was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Rejection {
    #[error("segment {segment} is out of range (recording has {num_segments})")]
    SegmentOutOfRange { segment: usize, num_segments: usize },

    #[error("negative frame in candidate [{start}, {end})")]
    NegativeFrame { start: i64, end: i64 },

    #[error("start frame {start} is beyond segment end {limit}")]
    StartBeyondSegment { start: i64, limit: i64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Accepted(Position),
    Rejected(Rejection),
}

impl Transition {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Transition::Accepted(_))
    }
}

/// Owner of the authoritative position.
///
/// The stored position always satisfies
/// `0 <= start <= end <= segment_length(segment)`.
#[derive(Debug, Clone)]
pub struct PositionState {
    recording: Recording,
    current: Position,
}

impl PositionState {
    pub fn new(recording: Recording, initial: Position) -> Result<Self, Rejection> {
        let current = validate(&recording, initial)?;
        Ok(Self { recording, current })
    }

    pub fn current(&self) -> Position {
        self.current
    }

    pub fn recording(&self) -> &Recording {
        &self.recording
    }

    /// Check a candidate without storing it.
    pub fn validate(&self, candidate: Position) -> Result<Position, Rejection> {
        validate(&self.recording, candidate)
    }

    /// Store the candidate if valid, clipping its end to the segment length.
    /// A rejected candidate leaves the current position untouched.
    pub fn propose(&mut self, candidate: Position) -> Transition {
        match validate(&self.recording, candidate) {
            Ok(accepted) => {
                self.current = accepted;
                Transition::Accepted(accepted)
            }
            Err(rejection) => Transition::Rejected(rejection),
        }
    }
}

fn validate(recording: &Recording, candidate: Position) -> Result<Position, Rejection> {
    let Some(limit) = recording.segment_length(candidate.segment_index) else {
        return Err(Rejection::SegmentOutOfRange {
            segment: candidate.segment_index,
            num_segments: recording.num_segments(),
        });
    };

    if candidate.start_frame < 0 || candidate.end_frame < 0 {
        return Err(Rejection::NegativeFrame {
            start: candidate.start_frame,
            end: candidate.end_frame,
        });
    }

    // start == limit is an empty window at the very end and stays valid
    if candidate.start_frame > limit {
        return Err(Rejection::StartBeyondSegment {
            start: candidate.start_frame,
            limit,
        });
    }

    Ok(Position {
        start_frame: candidate.start_frame,
        end_frame: candidate.end_frame.clamp(candidate.start_frame, limit),
        segment_index: candidate.segment_index,
    })
}
