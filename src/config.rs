use anyhow::Result;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub detector: DetectorConfig,
    #[serde(default)]
    pub preview: PreviewConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// カメラデバイス番号 (0 = システム標準カメラ)
    #[serde(default)]
    pub index: i32,
    /// キャプチャ幅（未指定ならドライバ既定値）
    #[serde(default)]
    pub width: Option<u32>,
    /// キャプチャ高さ
    #[serde(default)]
    pub height: Option<u32>,
    /// 要求FPS
    #[serde(default)]
    pub fps: Option<u32>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            index: 0,
            width: None,
            height: None,
            fps: None,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// ONNXモデルの配置ディレクトリ
    #[serde(default = "default_model_dir")]
    pub model_dir: String,
    /// モデル複雑度ティア (0 = lite, 1 = full)
    #[serde(default = "default_model_complexity")]
    pub model_complexity: u32,
    /// 同時検出する手の数 (1 のみサポート)
    #[serde(default = "default_max_hands")]
    pub max_hands: u32,
    /// 検出しきい値 (0.0〜1.0)
    #[serde(default = "default_detection_confidence")]
    pub min_detection_confidence: f32,
    /// 追跡維持しきい値 (0.0〜1.0)
    #[serde(default = "default_tracking_confidence")]
    pub min_tracking_confidence: f32,
}

fn default_model_dir() -> String { "models".to_string() }
fn default_model_complexity() -> u32 { 1 }
fn default_max_hands() -> u32 { 1 }
fn default_detection_confidence() -> f32 { 0.5 }
fn default_tracking_confidence() -> f32 { 0.5 }

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_dir: default_model_dir(),
            model_complexity: default_model_complexity(),
            max_hands: default_max_hands(),
            min_detection_confidence: default_detection_confidence(),
            min_tracking_confidence: default_tracking_confidence(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PreviewConfig {
    /// プレビュー実行の上限秒数
    #[serde(default = "default_max_seconds")]
    pub max_seconds: f64,
}

fn default_max_seconds() -> f64 { 10.0 }

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            max_seconds: default_max_seconds(),
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// 設定ファイルがない・壊れている場合は既定値で起動する
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.camera.index, 0);
        assert_eq!(config.camera.width, None);
        assert_eq!(config.detector.model_dir, "models");
        assert_eq!(config.detector.model_complexity, 1);
        assert_eq!(config.detector.max_hands, 1);
        assert_eq!(config.detector.min_detection_confidence, 0.5);
        assert_eq!(config.detector.min_tracking_confidence, 0.5);
        assert_eq!(config.preview.max_seconds, 10.0);
    }

    #[test]
    fn test_partial_override_keeps_other_defaults() {
        let config: Config = toml::from_str(
            r#"
            [camera]
            index = 2
            width = 1280
            height = 720

            [preview]
            max_seconds = 3.5
            "#,
        )
        .unwrap();
        assert_eq!(config.camera.index, 2);
        assert_eq!(config.camera.width, Some(1280));
        assert_eq!(config.camera.height, Some(720));
        assert_eq!(config.preview.max_seconds, 3.5);
        // 未指定セクションは既定値のまま
        assert_eq!(config.detector.model_dir, "models");
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("no_such_config.toml");
        assert_eq!(config.camera.index, 0);
        assert_eq!(config.preview.max_seconds, 10.0);
    }
}
