use finger_skeleton::image::ClassificationImage;
use finger_skeleton::CameraCalibration;

/// fx = 600, unit depth scale: a finger segment spans `30 / depth` pixels.
pub fn test_calibration(width: usize, height: usize) -> CameraCalibration {
    CameraCalibration::from_focal(600.0, width as f32 / 2.0, height as f32 / 2.0, 1.0)
}

/// Horizontal run of bone pixels `x0..x1` on row `y`.
pub fn horizontal_line(img: &mut ClassificationImage, x0: usize, x1: usize, y: usize, depth: f32) {
    assert!(depth > 0.0 && depth < 1.0, "depth must be a pure fraction");
    for x in x0..x1 {
        img.set(x, y, depth);
    }
}

/// Straight bone stroke from `from` to `to` (inclusive), `thickness` pixels
/// wide across its minor axis.
pub fn stroke(
    img: &mut ClassificationImage,
    from: (usize, usize),
    to: (usize, usize),
    thickness: usize,
    depth: f32,
) {
    assert!(depth > 0.0 && depth < 1.0, "depth must be a pure fraction");
    let dx = to.0 as f32 - from.0 as f32;
    let dy = to.1 as f32 - from.1 as f32;
    let steps = dx.abs().max(dy.abs()).max(1.0) as usize;
    let horizontal = dx.abs() >= dy.abs();
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = (from.0 as f32 + dx * t).round() as usize;
        let y = (from.1 as f32 + dy * t).round() as usize;
        for k in 0..thickness {
            let (px, py) = if horizontal { (x, y + k) } else { (x + k, y) };
            if px < img.w && py < img.h {
                img.set(px, py, depth);
            }
        }
    }
}

/// Filled rectangle of wide-area pixels. `value` must be negative; values
/// below `-1` also register as coarse wide-area candidates.
pub fn wide_patch(
    img: &mut ClassificationImage,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    value: f32,
) {
    assert!(value < 0.0, "wide-area pixels are negative");
    for y in y0..y1 {
        for x in x0..x1 {
            img.set(x, y, value);
        }
    }
}
