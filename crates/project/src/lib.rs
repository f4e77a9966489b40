mod load;
mod save;

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tnav_transport::{Recording, RecordingError};

pub use load::{load_recording, load_recording_file};
pub use save::save_recording;

fn default_time_range() -> (f64, f64) {
    (0.0, 1.0)
}

/// On-disk description of a recording to navigate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordingFile {
    pub name: String,
    pub sampling_frequency: f64,
    /// Length of each segment in seconds.
    pub segment_durations: Vec<f64>,
    /// Initial view within segment 0, in seconds.
    #[serde(default = "default_time_range")]
    pub initial_time_range: (f64, f64),
    #[serde(default)]
    pub num_channels: Option<usize>,
    #[serde(default)]
    pub unit_ids: Vec<String>,
    #[serde(default)]
    pub layer_keys: Vec<String>,
}

impl RecordingFile {
    pub fn new(
        name: impl Into<String>,
        sampling_frequency: f64,
        segment_durations: Vec<f64>,
    ) -> Self {
        Self {
            name: name.into(),
            sampling_frequency,
            segment_durations,
            initial_time_range: default_time_range(),
            num_channels: None,
            unit_ids: Vec::new(),
            layer_keys: Vec::new(),
        }
    }

    pub fn recording(&self) -> Result<Recording, RecordingError> {
        Recording::from_durations(&self.segment_durations, self.sampling_frequency)
    }
}

/// A recording file together with its validated recording.
#[derive(Debug, Clone)]
pub struct LoadedRecording {
    pub file: RecordingFile,
    pub recording: Recording,
}

#[derive(Debug, thiserror::Error)]
pub enum ProjectError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] rmp_serde::decode::Error),

    #[error("Invalid recording in '{path}': {source}")]
    InvalidRecording {
        path: PathBuf,
        source: RecordingError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_file() -> RecordingFile {
        RecordingFile {
            name: "tetrode".to_string(),
            sampling_frequency: 30000.0,
            segment_durations: vec![10.0, 2.0],
            initial_time_range: (0.5, 1.5),
            num_channels: Some(4),
            unit_ids: vec!["#1".to_string(), "#7".to_string()],
            layer_keys: vec!["raw".to_string()],
        }
    }

    #[test]
    fn test_recording_from_file() {
        let recording = sample_file().recording().unwrap();

        assert_eq!(recording.num_segments(), 2);
        assert_eq!(recording.segment_length(0), Some(300000));
        assert_eq!(recording.segment_length(1), Some(60000));
    }

    #[test]
    fn test_invalid_sampling_frequency() {
        let file = RecordingFile::new("broken", -1.0, vec![1.0]);
        assert!(file.recording().is_err());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "name": "minimal",
            "sampling_frequency": 1000.0,
            "segment_durations": [3.0]
        }"#;
        let file: RecordingFile = serde_json::from_str(json).unwrap();

        assert_eq!(file.initial_time_range, (0.0, 1.0));
        assert_eq!(file.num_channels, None);
        assert!(file.unit_ids.is_empty());
        assert!(file.layer_keys.is_empty());
    }

    #[test]
    fn test_messagepack_encoding() {
        let file = sample_file();

        let bytes = rmp_serde::encode::to_vec_named(&file).expect("serialize");
        let decoded: RecordingFile = rmp_serde::decode::from_slice(&bytes).expect("deserialize");

        assert_eq!(decoded, file);
    }
}
