//! I/O helpers for recorded classification frames, overlays and JSON.
//!
//! - `load_frames`: read a raw little-endian `f32` recording into whole frames.
//! - `save_overlay_png`: write an RGB debug overlay to disk.
//! - `write_json_file`: pretty-print a serializable value to disk.
use image::RgbImage;
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Recorded classification frames of one fixed size.
#[derive(Clone, Debug)]
pub struct FrameRecording {
    width: usize,
    height: usize,
    data: Vec<f32>,
}

impl FrameRecording {
    /// Wrap concatenated frames. Trailing values that do not fill a frame are dropped.
    pub fn new(width: usize, height: usize, mut data: Vec<f32>) -> Self {
        let frame_len = width * height;
        if frame_len > 0 {
            let whole = data.len() / frame_len * frame_len;
            data.truncate(whole);
        } else {
            data.clear();
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of whole frames.
    pub fn len(&self) -> usize {
        let frame_len = self.width * self.height;
        if frame_len == 0 {
            0
        } else {
            self.data.len() / frame_len
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow frame `i`.
    pub fn frame(&self, i: usize) -> Option<&[f32]> {
        let frame_len = self.width * self.height;
        let start = i.checked_mul(frame_len)?;
        self.data.get(start..start + frame_len)
    }

    pub fn frames(&self) -> impl ExactSizeIterator<Item = &[f32]> + '_ {
        // chunks_exact panics on zero; an empty recording has no data anyway.
        self.data.chunks_exact((self.width * self.height).max(1))
    }
}

/// Load a raw recording of `width × height` little-endian `f32` frames.
pub fn load_frames(path: &Path, width: usize, height: usize) -> Result<FrameRecording, String> {
    let bytes = fs::read(path).map_err(|e| format!("Failed to read {}: {e}", path.display()))?;
    if bytes.len() % 4 != 0 {
        return Err(format!(
            "{} is not a whole number of f32 values ({} bytes)",
            path.display(),
            bytes.len()
        ));
    }
    let data: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let frame_len = width * height;
    if frame_len == 0 || data.len() % frame_len != 0 {
        return Err(format!(
            "{} holds {} values, not a multiple of {width}x{height}",
            path.display(),
            data.len()
        ));
    }
    Ok(FrameRecording::new(width, height, data))
}

/// Save an RGB image to a PNG.
pub fn save_overlay_png(image: &RgbImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
