//! # 网格与序列工具
//!
//! 等间距网格生成、分段线性插值、逐元素求和与掩码选取。
//!
//! ## 依赖关系
//! - 被 `models/`, `commands/`, `sweep/`, `plot/` 使用
//! - 无外部依赖

use crate::error::{Result, ToybandsError};

/// 闭区间 [start, end] 上的 `count` 个等间距点（含端点）
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// 网格步长：前两个点间距的绝对值
pub fn step(grid: &[f64]) -> Option<f64> {
    match grid {
        [a, b, ..] => Some((b - a).abs()),
        _ => None,
    }
}

/// 分段线性插值，`xp` 需单调不减；超出范围时取端点值
pub fn interp(x: f64, xp: &[f64], fp: &[f64]) -> Result<f64> {
    if xp.len() != fp.len() {
        return Err(ToybandsError::InvalidArgument(format!(
            "xp ({}) and fp ({}) must be of the same length",
            xp.len(),
            fp.len()
        )));
    }
    let (first, last) = match (xp.first(), xp.last()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => {
            return Err(ToybandsError::InvalidArgument(
                "cannot interpolate on an empty grid".to_string(),
            ))
        }
    };

    if xp.windows(2).any(|w| !(w[0] <= w[1])) {
        return Err(ToybandsError::InvalidArgument(
            "interpolation grid must be non-decreasing".to_string(),
        ));
    }

    if x <= first {
        return Ok(fp[0]);
    }
    if x >= last {
        return Ok(fp[fp.len() - 1]);
    }

    // xp[i] <= x < xp[i + 1]
    let i = xp.partition_point(|&v| v <= x) - 1;
    let (x0, x1) = (xp[i], xp[i + 1]);
    let (f0, f1) = (fp[i], fp[i + 1]);
    if x1 == x0 {
        return Ok(f0);
    }
    Ok(f0 + (x - x0) * (f1 - f0) / (x1 - x0))
}

/// 逐元素相加
pub fn add_list(a: &[f64], b: &[f64]) -> Result<Vec<f64>> {
    if a.len() != b.len() {
        return Err(ToybandsError::InvalidArgument(format!(
            "two lists must be of the same length ({} vs {})",
            a.len(),
            b.len()
        )));
    }
    Ok(a.iter().zip(b).map(|(x, y)| x + y).collect())
}

/// 按布尔掩码选取元素
pub fn extract_list<T: Clone>(items: &[T], mask: &[bool]) -> Result<Vec<T>> {
    if items.len() != mask.len() {
        return Err(ToybandsError::InvalidArgument(format!(
            "the list and the mask must be of the same length ({} vs {})",
            items.len(),
            mask.len()
        )));
    }
    Ok(items
        .iter()
        .zip(mask)
        .filter(|(_, keep)| **keep)
        .map(|(item, _)| item.clone())
        .collect())
}
