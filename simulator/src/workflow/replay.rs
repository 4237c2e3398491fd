use anyhow::Context;
use squatcore::PoseFrame;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Reads a JSON Lines capture, one `PoseFrame` per line.
pub fn load_frames<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<PoseFrame>> {
    let path_ref = path.as_ref();
    let contents = fs::read_to_string(path_ref)
        .with_context(|| format!("reading replay {}", path_ref.display()))?;

    let mut frames = Vec::new();
    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let frame = serde_json::from_str(line)
            .with_context(|| format!("parsing line {} of {}", index + 1, path_ref.display()))?;
        frames.push(frame);
    }
    Ok(frames)
}

pub fn write_frames<P: AsRef<Path>>(path: P, frames: &[PoseFrame]) -> anyhow::Result<()> {
    let path_ref = path.as_ref();
    if let Some(parent) = path_ref.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    let file = File::create(path_ref)
        .with_context(|| format!("creating {}", path_ref.display()))?;
    let mut writer = BufWriter::new(file);
    for frame in frames {
        serde_json::to_writer(&mut writer, frame).context("encoding frame")?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::profile::build_frames;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn written_capture_loads_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("captures/session.jsonl");
        let frames = build_frames(1, 7).unwrap();
        write_frames(&path, &frames).unwrap();
        let loaded = load_frames(&path).unwrap();
        assert_eq!(loaded.len(), frames.len());
        assert_eq!(loaded[5].timestamp, frames[5].timestamp);
    }

    #[test]
    fn blank_lines_are_skipped_and_errors_name_the_line() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"{\"timestamp\": 0.0, \"persons\": []}\n\n{\"timestamp\": oops}\n")
            .unwrap();
        let path = temp.into_temp_path();
        let err = load_frames(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("line 3"));
    }
}
