use anyhow::Result;
use opencv::{
    core::Mat,
    prelude::*,
    videoio::{self, VideoCapture, VideoCaptureAPIs},
};
use thiserror::Error;

use crate::config::CameraConfig;

/// カメラが開けなかったときの唯一の区別されたエラー
///
/// このランでは致命的。リトライも代替デバイスへのフォールバックもしない。
#[derive(Debug, Error)]
#[error("Camera {index} is not available")]
pub struct DeviceUnavailable {
    pub index: i32,
}

/// フレーム供給元。`Ok(None)` がストリーム終端。
pub trait FrameSource {
    fn next_frame(&mut self) -> Result<Option<Mat>>;
}

/// OpenCVを使用したカメラキャプチャ
pub struct OpenCvCamera {
    capture: VideoCapture,
    width: u32,
    height: u32,
}

impl OpenCvCamera {
    /// カメラを開く（デフォルトカメラ: index 0）
    pub fn open(index: i32) -> Result<Self> {
        Self::open_with_config(index, None, None, None)
    }

    pub fn from_config(config: &CameraConfig) -> Result<Self> {
        Self::open_with_config(config.index, config.width, config.height, config.fps)
    }

    /// 解像度とFPSを指定してカメラを開く
    pub fn open_with_config(
        index: i32,
        width: Option<u32>,
        height: Option<u32>,
        fps: Option<u32>,
    ) -> Result<Self> {
        let mut capture = VideoCapture::new(index, VideoCaptureAPIs::CAP_ANY as i32)
            .map_err(|_| DeviceUnavailable { index })?;

        if !capture.is_opened().map_err(|_| DeviceUnavailable { index })? {
            return Err(DeviceUnavailable { index }.into());
        }

        // 解像度を設定
        if let Some(w) = width {
            capture.set(videoio::CAP_PROP_FRAME_WIDTH, w as f64)?;
        }
        if let Some(h) = height {
            capture.set(videoio::CAP_PROP_FRAME_HEIGHT, h as f64)?;
        }
        if let Some(f) = fps {
            capture.set(videoio::CAP_PROP_FPS, f as f64)?;
        }
        capture.set(videoio::CAP_PROP_BUFFERSIZE, 1.0)?;

        let actual_width = capture.get(videoio::CAP_PROP_FRAME_WIDTH)? as u32;
        let actual_height = capture.get(videoio::CAP_PROP_FRAME_HEIGHT)? as u32;

        Ok(Self {
            capture,
            width: actual_width,
            height: actual_height,
        })
    }

    /// 解像度を取得
    pub fn resolution(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl FrameSource for OpenCvCamera {
    /// フレームを読み込む（BGR形式）
    ///
    /// 読み取り失敗と空フレームはストリーム終端として扱う。リトライしない。
    fn next_frame(&mut self) -> Result<Option<Mat>> {
        let mut frame = Mat::default();
        match self.capture.read(&mut frame) {
            Ok(true) if !frame.empty() => Ok(Some(frame)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_unavailable_carries_index() {
        let err = anyhow::Error::from(DeviceUnavailable { index: 2 });
        let dev = err.downcast_ref::<DeviceUnavailable>().unwrap();
        assert_eq!(dev.index, 2);
        assert_eq!(err.to_string(), "Camera 2 is not available");
    }
}
