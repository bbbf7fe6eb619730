//! Capture benchmark: displays webcam frames with an EMA-smoothed FPS
//! overlay until end-of-stream or Esc.

use anyhow::Result;

use handtrack::camera::{FrameSource, OpenCvCamera};
use handtrack::config::Config;
use handtrack::render::{draw_label, MinifbRenderer};
use handtrack::stats::FpsEstimator;

const CONFIG_PATH: &str = "config.toml";
const WINDOW_TITLE: &str = "bench_webcam";

fn main() -> Result<()> {
    let config = Config::load_or_default(CONFIG_PATH);

    println!("=== bench_webcam ({}) ===", env!("GIT_VERSION"));

    let mut camera = OpenCvCamera::from_config(&config.camera)?;
    let (width, height) = camera.resolution();
    println!("cam {}: {}x{}", config.camera.index, width, height);

    let mut renderer = MinifbRenderer::new(WINDOW_TITLE, width as usize, height as usize)?;
    let mut estimator = FpsEstimator::new();
    let mut frames: u64 = 0;

    while renderer.is_open() {
        let mut frame = match camera.next_frame()? {
            Some(frame) => frame,
            None => break,
        };

        let fps = estimator.tick();
        frames += 1;

        draw_label(&mut frame, &format!("Capture FPS: {:.1}", fps))?;
        renderer.draw_frame(&frame)?;
        renderer.update()?;
    }

    println!("Frames: {}", frames);

    Ok(())
}
