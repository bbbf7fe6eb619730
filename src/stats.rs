use std::time::Instant;

/// 新サンプルの重み。残り 0.9 は前回推定値
const EMA_ALPHA: f64 = 0.1;

/// 同時刻フレームでゼロ除算しないための下限 (秒)
const MIN_DT: f64 = 1e-6;

/// プレビュー実行1回分の集計結果
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunStats {
    pub frames: u64,
    pub seconds: f64,
}

impl RunStats {
    pub fn new(frames: u64, seconds: f64) -> Self {
        Self { frames, seconds }
    }

    /// 平均フレームレート。経過時間ゼロのときは 0.0
    pub fn fps(&self) -> f64 {
        if self.seconds > 0.0 {
            self.frames as f64 / self.seconds
        } else {
            0.0
        }
    }
}

/// EMAベースのキャプチャFPS推定器
///
/// 初回サンプルはそのまま採用し、以降は 0.9/0.1 の重みで混合する。
pub struct FpsEstimator {
    /// 0.0 は「サンプルなし」を表す
    ema: f64,
    last: Option<Instant>,
}

impl FpsEstimator {
    pub fn new() -> Self {
        Self { ema: 0.0, last: None }
    }

    /// フレーム到着を記録して平滑化FPSを返す
    ///
    /// 初回呼び出しは基準時刻を設定するだけで、サンプルは採らない。
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        match self.last.replace(now) {
            Some(last) => self.sample(now.duration_since(last).as_secs_f64()),
            None => self.ema,
        }
    }

    /// フレーム間隔 dt (秒) から推定値を更新する
    pub fn sample(&mut self, dt: f64) -> f64 {
        let inst = 1.0 / dt.max(MIN_DT);
        self.ema = if self.ema == 0.0 {
            inst
        } else {
            self.ema * (1.0 - EMA_ALPHA) + inst * EMA_ALPHA
        };
        self.ema
    }

    /// 現在の平滑化FPS
    pub fn fps(&self) -> f64 {
        self.ema
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_fps_exact_quotient() {
        let stats = RunStats::new(5, 1.0);
        assert_eq!(stats.fps(), 5.0);

        let stats = RunStats::new(300, 10.0);
        assert_eq!(stats.fps(), 30.0);
    }

    #[test]
    fn test_fps_zero_seconds_guard() {
        let stats = RunStats::new(42, 0.0);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_fps_zero_frames() {
        let stats = RunStats::new(0, 2.5);
        assert_eq!(stats.fps(), 0.0);
    }

    #[test]
    fn test_first_sample_passthrough() {
        let mut est = FpsEstimator::new();
        let fps = est.sample(1.0 / 30.0);
        assert!(approx_eq(fps, 30.0, 1e-9), "got {}", fps);
        assert!(approx_eq(est.fps(), 30.0, 1e-9));
    }

    #[test]
    fn test_ema_recurrence() {
        let mut est = FpsEstimator::new();
        est.sample(1.0 / 60.0);
        let fps = est.sample(1.0 / 30.0);
        assert!(approx_eq(fps, 0.9 * 60.0 + 0.1 * 30.0, 1e-9), "got {}", fps);
    }

    #[test]
    fn test_steady_stream_holds_rate() {
        // 等間隔 0.1s のフレーム列はそのまま 10.0 に留まる
        let mut est = FpsEstimator::new();
        assert!(approx_eq(est.sample(0.1), 10.0, 1e-9));
        assert!(approx_eq(est.sample(0.1), 10.0, 1e-9));
        assert!(approx_eq(est.sample(0.1), 10.0, 1e-9));
    }

    #[test]
    fn test_zero_dt_clamped() {
        let mut est = FpsEstimator::new();
        let fps = est.sample(0.0);
        assert!(fps.is_finite());
        assert!(approx_eq(fps, 1e6, 1e-3), "got {}", fps);
    }

    #[test]
    fn test_first_tick_seeds_only() {
        let mut est = FpsEstimator::new();
        assert_eq!(est.tick(), 0.0);
        std::thread::sleep(std::time::Duration::from_millis(5));
        assert!(est.tick() > 0.0);
    }
}
