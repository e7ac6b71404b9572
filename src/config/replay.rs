use crate::calibration::CameraCalibration;
use crate::extractor::ExtractorParams;
use nalgebra::Matrix3;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration of the `skeleton_replay` tool.
#[derive(Debug, Deserialize)]
pub struct ReplayConfig {
    /// Raw recording: concatenated little-endian `f32` frames.
    pub input: PathBuf,
    pub width: usize,
    pub height: usize,
    pub camera: CameraConfig,
    #[serde(default)]
    pub extractor: ExtractorParams,
    /// Process at most this many frames.
    #[serde(default)]
    pub max_frames: Option<usize>,
    pub output: ReplayOutputConfig,
}

/// Depth camera intrinsics as reported by the capture stack.
#[derive(Debug, Deserialize)]
pub struct CameraConfig {
    /// `[fx, fy]` in pixels.
    pub focal_length: [f32; 2],
    /// `[cx, cy]` in pixels.
    #[serde(default)]
    pub offset: [f32; 2],
    /// Metres per unit of normalised depth.
    pub depth_scale: f32,
}

impl CameraConfig {
    pub fn to_calibration(&self) -> CameraCalibration {
        let [fx, fy] = self.focal_length;
        let [cx, cy] = self.offset;
        CameraCalibration::new(
            Matrix3::new(fx, 0.0, cx, 0.0, fy, cy, 0.0, 0.0, 1.0),
            self.depth_scale,
        )
    }
}

#[derive(Debug, Deserialize)]
pub struct ReplayOutputConfig {
    /// Per-frame reports and segments.
    pub result_json: PathBuf,
    /// Overlay of the last processed frame.
    #[serde(default)]
    pub overlay_image: Option<PathBuf>,
}

pub fn load_config(path: &Path) -> Result<ReplayConfig, String> {
    let data = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config {}: {e}", path.display()))?;
    parse_config(&data).map_err(|e| format!("Failed to parse config {}: {e}", path.display()))
}

pub fn parse_config(json: &str) -> Result<ReplayConfig, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let cfg = parse_config(
            r#"{
                "input": "frames.f32",
                "width": 640,
                "height": 480,
                "camera": { "focal_length": [475.0, 475.0], "offset": [320.0, 240.0], "depth_scale": 0.001 },
                "output": { "result_json": "out/skeleton.json" }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.extractor.scan.net_cell_px, 20);
        assert_eq!(cfg.max_frames, None);
        assert!(cfg.output.overlay_image.is_none());
        let calib = cfg.camera.to_calibration();
        assert_eq!(calib.fx(), 475.0);
        assert_eq!(calib.intrinsics[(1, 2)], 240.0);
    }

    #[test]
    fn missing_required_fields_fail() {
        assert!(parse_config(r#"{ "input": "frames.f32" }"#).is_err());
    }
}
