//! Webcam preview: pulls frames through the hand landmark model for a fixed
//! wall-clock budget and prints capture statistics.

use std::time::Duration;

use anyhow::Result;

use handtrack::camera::OpenCvCamera;
use handtrack::config::Config;
use handtrack::hand::{preprocess_for_hand_landmark, HandDetector};
use handtrack::preview::run_preview;

const CONFIG_PATH: &str = "config.toml";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    let mut camera = OpenCvCamera::from_config(&config.camera)?;
    let mut detector = HandDetector::from_config(&config.detector)?;
    let budget = Duration::from_secs_f64(config.preview.max_seconds);

    let stats = run_preview(&mut camera, budget, |frame| {
        // 検出結果は捨てる。ここでは推論コストだけを計測する
        let input = preprocess_for_hand_landmark(frame)?;
        detector.detect(input)?;
        Ok(())
    })?;

    println!(
        "Frames: {}, Seconds: {:.2}, FPS: {:.1}",
        stats.frames,
        stats.seconds,
        stats.fps()
    );

    Ok(())
}
