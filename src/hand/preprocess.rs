use anyhow::Result;
use ndarray::Array4;
use opencv::{
    core::{AlgorithmHint, Mat, Size, CV_32FC3},
    imgproc,
    prelude::*,
};

/// Hand Landmark モデルの入力サイズ
pub const HAND_INPUT_SIZE: i32 = 224;

/// OpenCV Mat を Hand Landmark 用の入力テンソルに変換
///
/// - BGR -> RGB
/// - 224x224 にリサイズ
/// - [1, 224, 224, 3] の f32 テンソルに変換 (0.0-1.0)
pub fn preprocess_for_hand_landmark(frame: &Mat) -> Result<Array4<f32>> {
    // BGR -> RGB
    let mut rgb = Mat::default();
    imgproc::cvt_color(
        frame,
        &mut rgb,
        imgproc::COLOR_BGR2RGB,
        0,
        AlgorithmHint::ALGO_HINT_DEFAULT,
    )?;

    // 224x224 にリサイズ
    let mut resized = Mat::default();
    imgproc::resize(
        &rgb,
        &mut resized,
        Size::new(HAND_INPUT_SIZE, HAND_INPUT_SIZE),
        0.0,
        0.0,
        imgproc::INTER_LINEAR,
    )?;

    // f32 に変換して 0-1 に正規化
    let mut float_mat = Mat::default();
    resized.convert_to(&mut float_mat, CV_32FC3, 1.0 / 255.0, 0.0)?;

    let size = HAND_INPUT_SIZE as usize;
    let mut tensor = Array4::<f32>::zeros((1, size, size, 3));
    let pixels = float_mat.data_typed::<opencv::core::Vec3f>()?;
    for (i, pixel) in pixels.iter().enumerate() {
        let y = i / size;
        let x = i % size;
        tensor[[0, y, x, 0]] = pixel[0];
        tensor[[0, y, x, 1]] = pixel[1];
        tensor[[0, y, x, 2]] = pixel[2];
    }

    Ok(tensor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use opencv::core::{Scalar, CV_8UC3};

    #[test]
    fn test_uniform_frame_swaps_channels_and_scales() {
        // BGR = (255, 128, 0) の単色フレーム
        let frame =
            Mat::new_rows_cols_with_default(48, 64, CV_8UC3, Scalar::new(255.0, 128.0, 0.0, 0.0))
                .unwrap();
        let tensor = preprocess_for_hand_landmark(&frame).unwrap();

        assert_eq!(tensor.shape(), &[1, 224, 224, 3]);

        // RGB順に並び替わり 0-1 にスケールされている
        let eps = 1e-6;
        assert!((tensor[[0, 0, 0, 0]] - 0.0).abs() < eps);
        assert!((tensor[[0, 0, 0, 1]] - 128.0 / 255.0).abs() < eps);
        assert!((tensor[[0, 0, 0, 2]] - 1.0).abs() < eps);
    }
}
