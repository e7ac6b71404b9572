//! Debug rendering of a classification frame and its skeleton.
//!
//! Background: bone pixels grey, wide pixels by depth (dark grey once claimed,
//! blue channel cleared below `-1`). On top, a line from every anchor to each
//! endpoint (olive when joined, green when open), a yellow anchor marker,
//! blue/red markers for the left/right ends (white after centre substitution,
//! with the traced position in teal/olive).
use crate::extractor::FrameSkeleton;
use crate::image::{depth_fraction, ClassificationView, WIDE_AREA_THRESHOLD};
use crate::trace::OwnershipMap;
use crate::types::{Endpoint, Pixel, Side};
use image::{Rgb, RgbImage};

const BONE_GREY: u8 = 110;
const CLAIMED_WIDE_GREY: u8 = 60;
const WIDE_DEPTH_GAIN: f32 = 1200.0;

const JOINED: Rgb<u8> = Rgb([0xAA, 0xAA, 0x00]);
const OPEN: Rgb<u8> = Rgb([0x00, 0xFF, 0x00]);
const ANCHOR: Rgb<u8> = Rgb([0xFF, 0xFF, 0x00]);
const CENTRED: Rgb<u8> = Rgb([0xFF, 0xFF, 0xFF]);

fn end_colours(side: Side) -> (Rgb<u8>, Rgb<u8>) {
    match side {
        Side::Left => (Rgb([0x00, 0x00, 0xFF]), Rgb([0x00, 0x7F, 0x7F])),
        Side::Right => (Rgb([0xFF, 0x00, 0x00]), Rgb([0x7F, 0x7F, 0x00])),
    }
}

/// Render `view` with the skeleton of `frame` on top.
///
/// `owners` should be the ownership map left by the pass that produced
/// `frame`; pass an empty map to skip the claimed shading.
pub fn render_overlay(
    view: ClassificationView<'_>,
    owners: &OwnershipMap,
    frame: &FrameSkeleton,
) -> RgbImage {
    let (w, h) = (view.width(), view.height());
    let mut img = RgbImage::new(w as u32, h as u32);
    let data = view.as_slice();
    let owned = owners.len() == data.len();

    for (i, &v) in data.iter().enumerate() {
        let mut shade = if v > 0.0 {
            BONE_GREY
        } else {
            (depth_fraction(-v) * WIDE_DEPTH_GAIN).clamp(0.0, 255.0) as u8
        };
        if v < 0.0 && owned && owners.is_claimed(i) {
            shade = CLAIMED_WIDE_GREY;
        }
        let blue = if v > WIDE_AREA_THRESHOLD { shade } else { 0 };
        img.put_pixel((i % w) as u32, (i / w) as u32, Rgb([shade, shade, blue]));
    }

    for seg in frame.segments.values() {
        let anchor = seg.anchor();
        for side in [Side::Left, Side::Right] {
            let end = seg.endpoint(side);
            let colour = if end.has_joint() { JOINED } else { OPEN };
            draw_line(&mut img, anchor, end.position(), colour);
        }
        fill_marker(&mut img, anchor, ANCHOR);
        for side in [Side::Left, Side::Right] {
            draw_end(&mut img, seg.endpoint(side), side);
        }
    }
    img
}

fn draw_end(img: &mut RgbImage, end: &Endpoint, side: Side) {
    let (plain, traced) = end_colours(side);
    match end.original {
        Some(original) => {
            fill_marker(img, original, traced);
            fill_marker(img, end.position(), CENTRED);
        }
        None => fill_marker(img, end.position(), plain),
    }
}

/// 2x2 block with its top-left corner at `p`, clipped to the image.
fn fill_marker(img: &mut RgbImage, p: Pixel, colour: Rgb<u8>) {
    for dy in 0..2u32 {
        for dx in 0..2u32 {
            let (x, y) = (p.x as u32 + dx, p.y as u32 + dy);
            if x < img.width() && y < img.height() {
                img.put_pixel(x, y, colour);
            }
        }
    }
}

/// Bresenham line, clipped to the image.
fn draw_line(img: &mut RgbImage, from: Pixel, to: Pixel, colour: Rgb<u8>) {
    let (mut x, mut y) = (from.x as i64, from.y as i64);
    let (x1, y1) = (to.x as i64, to.y as i64);
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
            img.put_pixel(x as u32, y as u32, colour);
        }
        if x == x1 && y == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}
