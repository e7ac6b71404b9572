mod common;

use common::synthetic_frame::{horizontal_line, test_calibration, wide_patch};
use finger_skeleton::image::ClassificationImage;
use finger_skeleton::joints::{JointOptions, JointResolver};
use finger_skeleton::scan::{FrameScanner, ScanOptions, ScanOutput, WideAreaNet};
use finger_skeleton::template::RingTemplate;
use finger_skeleton::trace::{OwnershipMap, ReachScratch};
use finger_skeleton::{
    EndpointRef, ExtractorParams, Joint, Pixel, Side, SkeletonError, SkeletonExtractor,
};

const W: usize = 640;
const H: usize = 480;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn extractor() -> SkeletonExtractor {
    SkeletonExtractor::new(W, H, &test_calibration(W, H), ExtractorParams::default()).unwrap()
}

fn resolver() -> JointResolver {
    let coefs = test_calibration(W, H).coefficients().unwrap();
    JointResolver::new(coefs, JointOptions::default())
}

fn scan(img: &ClassificationImage, options: &ScanOptions) -> Result<ScanOutput, SkeletonError> {
    let coefs = test_calibration(W, H).coefficients()?;
    let template = RingTemplate::shared();
    let mut owners = OwnershipMap::with_len(W * H);
    let mut reach = ReachScratch::with_len(template.len());
    let scanner = FrameScanner::new(W, H, template, coefs.segment_coef, options)?;
    scanner.scan(img.view(), &mut owners, &mut reach, WideAreaNet::default())
}

#[test]
fn empty_frame_has_no_segments() {
    init_logger();
    let img = ClassificationImage::new(W, H);

    let out = scan(&img, &ScanOptions::default()).unwrap();
    assert!(out.segments.is_empty());
    assert_eq!(out.stats.seeds, 0);
    assert_eq!(out.net.occupied(), 0);

    let frame = extractor().process(&img.data).unwrap();
    assert!(frame.is_empty());
    assert_eq!(frame.report.open_tips, 0);
    assert_eq!(frame.report.resolve.joints, 0);
}

#[test]
fn single_line_traces_to_both_ends_and_closes_the_empty_side() {
    init_logger();
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 240, 240, 0.5);
    let seed = 240 * W + 200;

    let mut out = scan(&img, &ScanOptions::default()).unwrap();
    assert_eq!(out.segments.len(), 1);
    let seg = &out.segments[&seed];
    // Radius at depth 0.5 is 48 px, longer than the line.
    assert_eq!(seg.far_left.position(), Pixel::new(200, 240));
    assert_eq!(seg.far_right.position(), Pixel::new(239, 240));
    assert_eq!((seg.count_left, seg.count_right), (0, 39));
    assert!((seg.far_right.depth - 0.5).abs() < 1e-6);

    let resolver = resolver();
    assert_eq!(resolver.match_joints(&mut out.segments), 0);
    assert_eq!(resolver.close_orientation(&mut out.segments), 1);
    let seg = &out.segments[&seed];
    assert_eq!(seg.far_left.joint, Some(Joint::Closed));
    assert_eq!(seg.far_right.joint, None);
}

#[test]
fn single_line_resolves_to_one_open_tip_inside_the_region() {
    init_logger();
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 240, 240, 0.5);
    let seed = 240 * W + 200;

    let frame = extractor().process(&img.data).unwrap();
    assert_eq!(frame.segments.len(), 1);
    let tips: Vec<_> = frame.open_tips().collect();
    assert_eq!(tips.len(), 1);
    let (tip_seed, tip) = tips[0];
    assert_eq!(tip_seed, seed);
    // 6 mm at depth 0.5 is 7.2 px: both ends pulled back off the region edge.
    assert_eq!(tip.position(), Pixel::new(233, 240));
    let seg = frame.segment(seed).unwrap();
    assert_eq!(seg.anchor(), Pixel::new(206, 240));
    assert_eq!(frame.report.resolve.edge_adjusted, 2);

    let points: Vec<_> = frame.points(seed).unwrap().collect();
    assert_eq!(points.len(), 1);
    assert_eq!((points[0].x, points[0].y), (233.0, 240.0));
    assert!((points[0].z - 0.5).abs() < 1e-6);
}

#[test]
fn collinear_segments_are_joined_both_ways() {
    init_logger();
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 240, 240, 0.5);
    horizontal_line(&mut img, 243, 283, 240, 0.5);
    let first = 240 * W + 200;
    let second = 240 * W + 243;

    let frame = extractor().process(&img.data).unwrap();
    assert_eq!(frame.segments.len(), 2);
    assert_eq!(frame.report.resolve.joints, 1);

    let a = frame.segment(first).unwrap();
    let b = frame.segment(second).unwrap();
    assert_eq!(a.far_right.joint, Some(Joint::Anchor(second)));
    assert_eq!(
        b.anchor_joints,
        vec![EndpointRef {
            seed: first,
            side: Side::Right
        }]
    );
    // The far end of the first segment is 43 px (3.6 cm) from the anchor.
    assert_eq!(a.far_left.joint, Some(Joint::Closed));
    // A joined anchor is not moved.
    assert_eq!(b.anchor(), Pixel::new(243, 240));
    assert_eq!(frame.open_tips().map(|(seed, _)| seed).collect::<Vec<_>>(), vec![second]);
}

#[test]
fn depth_step_keeps_collinear_segments_apart() {
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 240, 240, 0.5);
    horizontal_line(&mut img, 243, 283, 240, 0.55);

    let frame = extractor().process(&img.data).unwrap();
    assert_eq!(frame.segments.len(), 2);
    assert_eq!(frame.report.resolve.joints, 0);
    assert!(frame
        .segments
        .values()
        .all(|s| s.anchor_joints.is_empty()));
}

#[test]
fn line_longer_than_the_radius_splits_into_joined_segments() {
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 280, 240, 0.5);
    let first = 240 * W + 200;
    let second = 240 * W + 248;

    let out = scan(&img, &ScanOptions::default()).unwrap();
    assert_eq!(out.segments.keys().copied().collect::<Vec<_>>(), vec![first, second]);
    assert_eq!(out.segments[&first].far_right.x, 247);
    assert_eq!(out.segments[&second].far_right.x, 279);
    assert_eq!(out.stats.claimed, 80);

    let frame = extractor().process(&img.data).unwrap();
    assert_eq!(
        frame.segment(first).unwrap().far_right.joint,
        Some(Joint::Anchor(second))
    );
}

#[test]
fn near_zero_depth_clamps_the_radius_to_the_ceiling() {
    init_logger();
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 300, 320, 200, 1e-4);
    // Integer value: ring overlap with a zero depth fraction.
    img.set(400, 300, 2.0);

    let out = scan(&img, &ScanOptions::default()).unwrap();
    assert_eq!(out.stats.seeds, 2);
    assert_eq!(out.stats.clamped, 2);
    assert_eq!(out.segments[&(200 * W + 300)].far_right.x, 319);
    assert!(out.segments[&(300 * W + 400)].is_degenerate());

    let frame = extractor().process(&img.data).unwrap();
    assert_eq!(frame.segments.len(), 2);
    for seg in frame.segments.values() {
        for end in [&seg.far_left, &seg.far_right] {
            assert!(end.x < W && end.y < H);
        }
        assert!(seg.x < W && seg.y < H);
    }
}

#[test]
fn radius_cap_limits_trace_length() {
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 240, 240, 0.5);
    let options = ScanOptions {
        max_radius_px: Some(20),
        ..ScanOptions::default()
    };

    let out = scan(&img, &options).unwrap();
    // Rings 1..20 reach 19 px; the line splits in two.
    assert_eq!(out.segments.len(), 2);
    assert_eq!(out.segments[&(240 * W + 200)].far_right.x, 219);
    assert_eq!(out.segments[&(240 * W + 220)].far_right.x, 239);
    assert_eq!(out.stats.clamped, 2);
}

#[test]
fn radius_cap_beyond_the_template_is_a_configuration_error() {
    let img = ClassificationImage::new(W, H);
    let options = ScanOptions {
        max_radius_px: Some(60),
        ..ScanOptions::default()
    };
    assert_eq!(
        scan(&img, &options).unwrap_err(),
        SkeletonError::RadiusExceeded { radius: 60, max: 59 }
    );

    let mut params = ExtractorParams::default();
    params.scan.max_radius_px = Some(75);
    assert!(matches!(
        SkeletonExtractor::new(W, H, &test_calibration(W, H), params),
        Err(SkeletonError::RadiusExceeded { .. })
    ));
}

#[test]
fn wide_area_pixels_fill_the_net() {
    let mut img = ClassificationImage::new(W, H);
    wide_patch(&mut img, 100, 100, 200, 200, -1.5);
    wide_patch(&mut img, 300, 300, 400, 400, -0.5);

    let out = scan(&img, &ScanOptions::default()).unwrap();
    assert!(out.segments.is_empty());
    assert_eq!((out.net.cols(), out.net.rows()), (32, 24));
    assert_eq!(out.net.occupied(), 25);
    assert_eq!(out.net.cell(5, 5), Some(Pixel::new(100, 100)));
    assert_eq!(out.net.cell(9, 9), Some(Pixel::new(180, 180)));
    assert_eq!(out.net.cell(15, 15), None);
}

#[test]
fn malformed_buffer_yields_an_empty_frame() {
    init_logger();
    let mut ex = extractor();
    let short = vec![0.5f32; 10];
    assert!(matches!(
        ex.process(&short),
        Err(SkeletonError::MalformedBuffer { actual: 10, .. })
    ));
    let frame = ex.process_or_empty(&short);
    assert!(frame.is_empty());
    assert!(frame.report.rejected.is_some());

    // The extractor keeps working afterwards.
    let mut img = ClassificationImage::new(W, H);
    horizontal_line(&mut img, 200, 240, 240, 0.5);
    assert_eq!(ex.process(&img.data).unwrap().segments.len(), 1);
}
