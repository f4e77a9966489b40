use crate::{LoadedRecording, ProjectError, RecordingFile};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read a recording file. JSON is tried first, then MessagePack.
pub fn load_recording_file(path: &Path) -> Result<RecordingFile, ProjectError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    serde_json::from_reader(reader).or_else(|_| {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        rmp_serde::decode::from_read(reader).map_err(ProjectError::from)
    })
}

/// Read and validate a recording file.
pub fn load_recording(path: &Path) -> Result<LoadedRecording, ProjectError> {
    let file = load_recording_file(path)?;
    let recording = file
        .recording()
        .map_err(|source| ProjectError::InvalidRecording {
            path: path.to_path_buf(),
            source,
        })?;

    log::info!(
        "loaded '{}': {} segment(s) at {} Hz",
        file.name,
        recording.num_segments(),
        recording.sampling_frequency()
    );

    Ok(LoadedRecording { file, recording })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_load_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rec.json");
        fs::write(
            &path,
            r#"{"name": "tetrode", "sampling_frequency": 20000.0, "segment_durations": [1.5, 0.5]}"#,
        )
        .unwrap();

        let loaded = load_recording(&path).unwrap();

        assert_eq!(loaded.file.name, "tetrode");
        assert_eq!(loaded.recording.segment_lengths(), &[30000, 10000]);
    }

    #[test]
    fn test_load_messagepack_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("rec.msgpack");
        let file = RecordingFile::new("packed", 1000.0, vec![2.0]);
        fs::write(&path, rmp_serde::encode::to_vec_named(&file).unwrap()).unwrap();

        let loaded = load_recording_file(&path).unwrap();
        assert_eq!(loaded, file);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempdir().unwrap();
        let result = load_recording(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(ProjectError::Io(_))));
    }

    #[test]
    fn test_load_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.json");
        fs::write(&path, "not a recording").unwrap();

        assert!(load_recording(&path).is_err());
    }

    #[test]
    fn test_load_invalid_recording() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"name": "bad", "sampling_frequency": 0.0, "segment_durations": [1.0]}"#,
        )
        .unwrap();

        let result = load_recording(&path);
        assert!(matches!(result, Err(ProjectError::InvalidRecording { .. })));
    }
}
