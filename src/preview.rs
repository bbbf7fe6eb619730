use std::time::{Duration, Instant};

use anyhow::Result;
use opencv::core::Mat;

use crate::camera::FrameSource;
use crate::stats::RunStats;

/// 予算時間いっぱいフレームを取り込み、1枚ごとに process を呼ぶ
///
/// ストリーム終端 (`None`) か予算超過でループを抜けて `RunStats` を返す。
/// process の失敗は即時に伝播する。
pub fn run_preview<S, F>(source: &mut S, budget: Duration, mut process: F) -> Result<RunStats>
where
    S: FrameSource,
    F: FnMut(&Mat) -> Result<()>,
{
    let start = Instant::now();
    let mut frames: u64 = 0;

    while let Some(frame) = source.next_frame()? {
        process(&frame)?;
        frames += 1;

        // 予算判定は1周ごとの粗いチェック。処理中のフレームは数え終えてから抜ける
        if start.elapsed() >= budget {
            break;
        }
    }

    Ok(RunStats::new(frames, start.elapsed().as_secs_f64()))
}
