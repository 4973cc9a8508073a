//! # 密度扫描切片
//!
//! 由每个能带的起止密度生成逐步线性变化的密度切片。
//!
//! ## 依赖关系
//! - 被 `commands/simu.rs` 调用
//! - 使用 `numeric/grid.rs`

use crate::error::{Result, ToybandsError};
use crate::numeric::linspace;

/// `allden = [start1, end1, start2, end2, ...]`，返回 `steps` 行，每行各能带一个密度
pub fn make_slices(allden: &[f64], steps: usize) -> Result<Vec<Vec<f64>>> {
    if allden.is_empty() || allden.len() % 2 != 0 {
        return Err(ToybandsError::InvalidArgument(format!(
            "densities must come in start/end pairs, got {} values",
            allden.len()
        )));
    }
    if steps == 0 {
        return Err(ToybandsError::InvalidArgument(
            "number of steps must be at least 1".to_string(),
        ));
    }

    let ramps: Vec<Vec<f64>> = allden
        .chunks(2)
        .map(|pair| linspace(pair[0], pair[1], steps))
        .collect();

    Ok((0..steps)
        .map(|step| ramps.iter().map(|ramp| ramp[step]).collect())
        .collect())
}

/// 相邻切片总密度之差的绝对值，用于确定每个切片的绘图窗口
pub fn total_density_step(slices: &[Vec<f64>]) -> Option<f64> {
    match slices {
        [first, second, ..] => {
            Some((first.iter().sum::<f64>() - second.iter().sum::<f64>()).abs())
        }
        _ => None,
    }
}
