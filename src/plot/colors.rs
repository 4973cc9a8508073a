//! # 色图采样
//!
//! jet 色图的分段线性定义，以及按能带数量等距取色。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用，为每个能带分配颜色
//! - 使用 `numeric/grid.rs` 的插值与等距网格

use crate::error::{Result, ToybandsError};
use crate::numeric::{interp, linspace};

use plotters::style::RGBColor;

/// jet 色图三个通道的锚点 (位置, 强度)
const JET_RED: [(f64, f64); 5] = [(0.0, 0.0), (0.35, 0.0), (0.66, 1.0), (0.89, 1.0), (1.0, 0.5)];
const JET_GREEN: [(f64, f64); 6] = [
    (0.0, 0.0),
    (0.125, 0.0),
    (0.375, 1.0),
    (0.64, 1.0),
    (0.91, 0.0),
    (1.0, 0.0),
];
const JET_BLUE: [(f64, f64); 5] = [(0.0, 0.5), (0.11, 1.0), (0.34, 1.0), (0.65, 0.0), (1.0, 0.0)];

fn channel(anchors: &[(f64, f64)], x: f64) -> Result<u8> {
    let xp: Vec<f64> = anchors.iter().map(|(p, _)| *p).collect();
    let fp: Vec<f64> = anchors.iter().map(|(_, v)| *v).collect();
    let value = interp(x, &xp, &fp)?;
    Ok((value * 255.0).round().clamp(0.0, 255.0) as u8)
}

/// jet 色图在 `x` ∈ [0, 1] 处的颜色
pub fn jet(x: f64) -> Result<RGBColor> {
    if !(0.0..=1.0).contains(&x) {
        return Err(ToybandsError::InvalidArgument(format!(
            "colormap position {} is outside [0, 1]",
            x
        )));
    }
    Ok(RGBColor(
        channel(&JET_RED, x)?,
        channel(&JET_GREEN, x)?,
        channel(&JET_BLUE, x)?,
    ))
}

/// 在 jet 色图的 `[vstart, vend]` 区间等距取 `n` 个颜色
pub fn make_n_colors(n: usize, vstart: f64, vend: f64) -> Result<Vec<RGBColor>> {
    for (name, v) in [("vstart", vstart), ("vend", vend)] {
        if !(0.0..=1.0).contains(&v) {
            return Err(ToybandsError::InvalidArgument(format!(
                "{} should be in [0.0, 1.0], got {}",
                name, v
            )));
        }
    }
    linspace(vstart, vend, n).into_iter().map(jet).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jet_endpoints() {
        assert_eq!(jet(0.0).unwrap(), RGBColor(0, 0, 128));
        assert_eq!(jet(1.0).unwrap(), RGBColor(128, 0, 0));
        // 中点为纯绿
        assert_eq!(jet(0.5).unwrap().1, 255);
    }

    #[test]
    fn test_make_n_colors() {
        let colors = make_n_colors(4, 0.1, 0.9).unwrap();
        assert_eq!(colors.len(), 4);
        assert_eq!(colors[0], jet(0.1).unwrap());
        assert_eq!(colors[3], jet(0.9).unwrap());
        assert!(make_n_colors(0, 0.1, 0.9).unwrap().is_empty());
    }

    #[test]
    fn test_make_n_colors_out_of_range() {
        assert!(make_n_colors(3, -0.1, 0.9).is_err());
        assert!(make_n_colors(3, 0.1, 1.5).is_err());
    }
}
