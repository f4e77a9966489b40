use crate::{ProjectError, RecordingFile};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

pub fn save_recording(path: &Path, file: &RecordingFile) -> Result<(), ProjectError> {
    let out = File::create(path)?;
    let writer = BufWriter::new(out);
    serde_json::to_writer_pretty(writer, file)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load_recording;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("saved.json");
        let mut file = RecordingFile::new("session", 30000.0, vec![10.0, 5.0, 1.0]);
        file.initial_time_range = (2.0, 4.0);
        file.layer_keys = vec!["raw".into(), "filtered".into()];

        save_recording(&path, &file).unwrap();
        let loaded = load_recording(&path).unwrap();

        assert_eq!(loaded.file, file);
        assert_eq!(loaded.recording.num_segments(), 3);
    }

    #[test]
    fn test_save_is_human_readable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pretty.json");
        save_recording(&path, &RecordingFile::new("pretty", 1000.0, vec![1.0])).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"segment_durations\""));
        assert!(contents.contains('\n'));
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope").join("file.json");
        let result = save_recording(&path, &RecordingFile::new("x", 1.0, vec![]));
        assert!(matches!(result, Err(ProjectError::Io(_))));
    }
}
