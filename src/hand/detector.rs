use anyhow::{ensure, Context, Result};
use ndarray::Array4;
use ort::session::builder::GraphOptimizationLevel;
use ort::session::Session;
use ort::value::Tensor;
use std::path::Path;

use super::landmark::{HandLandmarks, Landmark, LandmarkIndex};
use super::preprocess::HAND_INPUT_SIZE;
use crate::config::DetectorConfig;

/// モデル複雑度ティアに対応するONNXファイル名
fn model_file(complexity: u32) -> &'static str {
    if complexity == 0 {
        "hand_landmark_lite.onnx"
    } else {
        "hand_landmark_full.onnx"
    }
}

/// Hand Landmark モデルを使用した手検出器
pub struct HandDetector {
    session: Session,
    min_detection_confidence: f32,
    min_tracking_confidence: f32,
    tracking: bool,
}

impl HandDetector {
    /// 設定から複雑度ティアに応じたモデルを読み込んで初期化
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        ensure!(
            config.max_hands == 1,
            "only single-hand mode is supported (max_hands = {})",
            config.max_hands
        );

        let path = Path::new(&config.model_dir).join(model_file(config.model_complexity));
        Self::new(
            path,
            config.min_detection_confidence,
            config.min_tracking_confidence,
        )
    }

    /// ONNXモデルを読み込んで初期化
    pub fn new<P: AsRef<Path>>(
        model_path: P,
        min_detection_confidence: f32,
        min_tracking_confidence: f32,
    ) -> Result<Self> {
        let session = Session::builder()?
            .with_optimization_level(GraphOptimizationLevel::Level3)?
            .commit_from_file(model_path.as_ref())
            .context("Failed to load ONNX model")?;

        Ok(Self {
            session,
            min_detection_confidence,
            min_tracking_confidence,
            tracking: false,
        })
    }

    /// 前処理済みテンソルから手ランドマークを検出
    ///
    /// 入力: [1, 224, 224, 3] の f32 テンソル
    /// 出力: 存在スコアが検出しきい値未満なら None
    pub fn detect(&mut self, input: Array4<f32>) -> Result<Option<HandLandmarks>> {
        let input_tensor = Tensor::from_array(input)?;
        let outputs = self
            .session
            .run(ort::inputs!["input_1" => input_tensor])
            .context("Inference failed")?;

        // 出力は [1, 63] のランドマーク (x, y, z を21点分) と [1, 1] の存在スコア
        let score_out: ndarray::ArrayViewD<f32> = outputs["Identity_1"]
            .try_extract_array()
            .context("Failed to extract presence score")?;
        let score = score_out[[0, 0]];

        if score < self.min_detection_confidence {
            self.tracking = false;
            return Ok(None);
        }
        self.tracking = score >= self.min_tracking_confidence;

        let raw: ndarray::ArrayViewD<f32> = outputs["Identity"]
            .try_extract_array()
            .context("Failed to extract landmark tensor")?;

        // 入力正方形のピクセル座標で出てくるので正規化する
        let scale = HAND_INPUT_SIZE as f32;
        let mut points = [Landmark::default(); LandmarkIndex::COUNT];
        for (i, point) in points.iter_mut().enumerate() {
            *point = Landmark::new(
                raw[[0, i * 3]] / scale,
                raw[[0, i * 3 + 1]] / scale,
                raw[[0, i * 3 + 2]] / scale,
            );
        }

        Ok(Some(HandLandmarks::new(points, score)))
    }

    /// 直近フレームで追跡が維持されているか
    pub fn is_tracking(&self) -> bool {
        self.tracking
    }
}
