use anyhow::Result;
use opencv::core::{Mat, Point, Scalar};
use opencv::imgproc;

/// ラベルの描画位置（左上基準）
const LABEL_ORIGIN: (i32, i32) = (20, 40);

/// フレーム左上に黒縁取り + 白文字のラベルを描画する
pub fn draw_label(frame: &mut Mat, text: &str) -> Result<()> {
    let origin = Point::new(LABEL_ORIGIN.0, LABEL_ORIGIN.1);

    // 背景（黒）で視認性確保
    imgproc::put_text(
        frame,
        text,
        origin,
        imgproc::FONT_HERSHEY_SIMPLEX,
        1.0,
        Scalar::new(0.0, 0.0, 0.0, 0.0),
        4,
        imgproc::LINE_8,
        false,
    )?;
    // 前景（白）
    imgproc::put_text(
        frame,
        text,
        origin,
        imgproc::FONT_HERSHEY_SIMPLEX,
        1.0,
        Scalar::new(255.0, 255.0, 255.0, 0.0),
        2,
        imgproc::LINE_8,
        false,
    )?;

    Ok(())
}
