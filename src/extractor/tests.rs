use super::*;
use crate::calibration::CameraCalibration;
use crate::error::SkeletonError;
use crate::image::ClassificationImage;
use crate::types::Joint;

const W: usize = 320;
const H: usize = 240;

fn calibration() -> CameraCalibration {
    CameraCalibration::from_focal(600.0, 160.0, 120.0, 1.0)
}

fn extractor() -> SkeletonExtractor {
    SkeletonExtractor::new(W, H, &calibration(), ExtractorParams::default()).unwrap()
}

fn line_frame() -> ClassificationImage {
    let mut img = ClassificationImage::new(W, H);
    for x in 100..125 {
        img.set(x, 120, 0.5);
    }
    img
}

#[test]
fn single_line_produces_one_resolved_segment() {
    let mut ex = extractor();
    let frame = ex.process(&line_frame().data).unwrap();

    assert_eq!(frame.segments.len(), 1);
    let seg = frame.segment(120 * W + 100).unwrap();
    // Margin 30 caps the radius; the tip is then pulled 6 px off the edge.
    assert_eq!(ex.scanner().radius_ceiling(), 30.0);
    assert_eq!(seg.far_right.x, 118);
    assert_eq!(seg.far_left.joint, Some(Joint::Closed));
    assert_eq!(frame.report.segments, 1);
    assert_eq!(frame.report.open_tips, 1);
    assert_eq!(frame.report.scan.claimed, 25);
    assert!(frame.report.timings.stage_ms("scan").is_some());
    assert!(frame.report.timings.stage_ms("joints").is_some());
    assert_eq!(frame.open_tips().count(), 1);
    assert_eq!(ex.owners().owner(120 * W + 124), Some(120 * W + 100));
}

#[test]
fn malformed_buffer_is_rejected_up_front() {
    let mut ex = extractor();
    let short = vec![0.5f32; W * H - 1];
    assert_eq!(
        ex.process(&short).unwrap_err(),
        SkeletonError::MalformedBuffer {
            width: W,
            height: H,
            expected: W * H,
            actual: W * H - 1
        }
    );

    let frame = ex.process_or_empty(&short);
    assert!(frame.is_empty());
    assert!(frame.report.rejected.is_some());
    assert_eq!((frame.net.cols(), frame.net.rows()), (16, 12));
}

#[test]
fn invalid_calibration_fails_construction() {
    let calib = CameraCalibration::from_focal(600.0, 160.0, 120.0, 0.0);
    let err = SkeletonExtractor::new(W, H, &calib, ExtractorParams::default()).unwrap_err();
    assert!(matches!(err, SkeletonError::InvalidCalibration(_)));
}

#[test]
fn recycled_frames_do_not_leak_into_the_next() {
    let mut ex = extractor();
    let img = line_frame();
    let first = ex.process(&img.data).unwrap();
    let segments = first.segments.clone();
    ex.recycle(first);

    let empty = ex.process(&vec![0.0; W * H]).unwrap();
    assert!(empty.is_empty());
    assert_eq!(ex.owners().claimed(), 0);
    ex.recycle(empty);

    let again = ex.process(&img.data).unwrap();
    assert_eq!(again.segments, segments);
}

#[test]
fn history_keeps_the_newest_frames() {
    let mut ex = extractor();
    let mut history = FrameHistory::new(2);
    assert!(history.latest().is_none());

    let img = line_frame();
    for _ in 0..2 {
        assert!(history.push(ex.process(&img.data).unwrap()).is_none());
    }
    let empty = ex.process(&vec![0.0; W * H]).unwrap();
    let evicted = history.push(empty).unwrap();
    assert_eq!(evicted.segments.len(), 1);
    assert_eq!(history.len(), 2);
    assert_eq!(history.capacity(), 2);
    assert!(history.latest().is_some_and(|f| f.is_empty()));
    assert!(history.previous().is_some_and(|f| f.segments.len() == 1));
    assert_eq!(history.iter().count(), 2);

    // The evicted snapshot is the only handle left, so its storage is reusable.
    let frame = std::rc::Rc::try_unwrap(evicted).unwrap();
    ex.recycle(frame);

    history.clear();
    assert!(history.is_empty());
    assert!(history.latest().is_none());
}

#[test]
fn params_deserialize_with_defaults() {
    let params: ExtractorParams = serde_json::from_str(
        r#"{ "scan": { "max_radius_px": 30 }, "history_len": 5, "joints": { "vertical_ratio": 0.5 } }"#,
    )
    .unwrap();
    assert_eq!(params.scan.max_radius_px, Some(30));
    assert_eq!(params.history_len, 5);
    assert_eq!(params.joints.vertical_ratio, 0.5);
    assert_eq!(params.joints.match_distance_m, 0.03);
    assert_eq!(params.template.kernel_radius, 60);
}
