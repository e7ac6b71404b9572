use finger_skeleton::config::replay::{self, ReplayConfig};
use finger_skeleton::diagnostics::{render_overlay, FrameReport};
use finger_skeleton::image::io::{load_frames, save_overlay_png, write_json_file, FrameRecording};
use finger_skeleton::image::ClassificationView;
use finger_skeleton::types::Segment;
use finger_skeleton::{FrameSkeleton, SkeletonExtractor};
use serde::Serialize;
use std::env;
use std::path::Path;
use std::time::Instant;

fn main() {
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = replay::load_config(Path::new(&config_path))?;
    let recording = load_frames(&config.input, config.width, config.height)?;
    let count = config
        .max_frames
        .unwrap_or(usize::MAX)
        .min(recording.len());

    let mut extractor = make_extractor(&config)?;
    let start = Instant::now();
    let records = process_frames(&config, &recording, count, &mut extractor)?;
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

    write_json_file(&config.output.result_json, &records)?;
    println!(
        "Processed {} frames in {:.1} ms, saved results to {}",
        records.len(),
        elapsed_ms,
        config.output.result_json.display()
    );

    if let Some(path) = &config.output.overlay_image {
        let Some(buffer) = count.checked_sub(1).and_then(|i| recording.frame(i)) else {
            println!("No frames, skipping overlay");
            return Ok(());
        };
        // Re-run the last frame so the ownership map matches it.
        let frame = extractor.process_or_empty(buffer);
        let view = ClassificationView::from_slice(config.width, config.height, buffer)
            .map_err(|e| e.to_string())?;
        let image = render_overlay(view, extractor.owners(), &frame);
        save_overlay_png(&image, path)?;
        println!("Saved overlay of frame {} to {}", count - 1, path.display());
    }
    Ok(())
}

fn make_extractor(config: &ReplayConfig) -> Result<SkeletonExtractor, String> {
    SkeletonExtractor::new(
        config.width,
        config.height,
        &config.camera.to_calibration(),
        config.extractor.clone(),
    )
    .map_err(|e| format!("Invalid configuration: {e}"))
}

#[cfg(not(feature = "parallel"))]
fn process_frames(
    config: &ReplayConfig,
    recording: &FrameRecording,
    count: usize,
    extractor: &mut SkeletonExtractor,
) -> Result<Vec<FrameRecord>, String> {
    use finger_skeleton::FrameHistory;
    use std::rc::Rc;

    let mut history = FrameHistory::new(config.extractor.history_len);
    let mut records = Vec::with_capacity(count);
    for (index, buffer) in recording.frames().take(count).enumerate() {
        let frame = extractor.process_or_empty(buffer);
        let record = FrameRecord::new(index, &frame);
        if let Some(previous) = history.latest() {
            if previous.segments.len() != frame.segments.len() {
                println!(
                    "frame {index}: {} -> {} segments",
                    previous.segments.len(),
                    frame.segments.len()
                );
            }
        }
        records.push(record);
        if let Some(evicted) = history.push(frame) {
            if let Ok(frame) = Rc::try_unwrap(evicted) {
                extractor.recycle(frame);
            }
        }
    }
    Ok(records)
}

#[cfg(feature = "parallel")]
fn process_frames(
    config: &ReplayConfig,
    recording: &FrameRecording,
    count: usize,
    _extractor: &mut SkeletonExtractor,
) -> Result<Vec<FrameRecord>, String> {
    use rayon::prelude::*;

    let buffers: Vec<&[f32]> = recording.frames().take(count).collect();
    buffers
        .par_iter()
        .enumerate()
        .map_init(
            || make_extractor(config),
            |extractor, (index, buffer)| {
                let extractor = extractor.as_mut().map_err(|e| e.clone())?;
                let frame = extractor.process_or_empty(buffer);
                let record = FrameRecord::new(index, &frame);
                extractor.recycle(frame);
                Ok(record)
            },
        )
        .collect()
}

fn usage() -> String {
    "Usage: skeleton_replay <config.json>".to_string()
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct FrameRecord {
    frame: usize,
    report: FrameReport,
    segments: Vec<Segment>,
}

impl FrameRecord {
    fn new(frame: usize, skeleton: &FrameSkeleton) -> Self {
        Self {
            frame,
            report: skeleton.report.clone(),
            segments: skeleton.segments.values().cloned().collect(),
        }
    }
}
