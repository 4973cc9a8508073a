//! # 增量积分器
//!
//! 在一组能量点上计算态密度的累积积分，每个点只积分与上一个点之间的增量窗口，
//! 把单点代价限制在 O(步长)，首个点做一次完整积分。
//!
//! ## 两个方向
//! - `rising_integral`: 从下界 ymin 向上累积（电子侧 IDOS）
//! - `falling_integral`: 从上界 ymax 向下累积（空穴侧 IDOS）
//!
//! ## 窗口宽度
//! 增量窗口固定为排序后前两个点的间距 `yint`，对均匀网格精确；
//! 非均匀网格上这是固定窗口近似，后续点的窗口不会随实际间距变化。
//!
//! ## 依赖关系
//! - 被 `physics/dos.rs` 调用
//! - 使用 `numeric/quadrature.rs`

use crate::error::{Result, ToybandsError};
use crate::numeric::quadrature::GaussKronrod;

/// 检查网格与边界均为有限值
fn validate(bound: f64, y_list: &[f64]) -> Result<()> {
    if !bound.is_finite() {
        return Err(ToybandsError::InvalidArgument(format!(
            "integration bound {} is not finite",
            bound
        )));
    }
    if let Some(y) = y_list.iter().find(|y| !y.is_finite()) {
        return Err(ToybandsError::InvalidArgument(format!(
            "energy grid contains a non-finite value {}",
            y
        )));
    }
    Ok(())
}

/// 返回排序后的下标；`descending` 为真时按降序
fn sorted_order(y_list: &[f64], descending: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..y_list.len()).collect();
    if descending {
        order.sort_by(|&i, &j| y_list[j].total_cmp(&y_list[i]));
    } else {
        order.sort_by(|&i, &j| y_list[i].total_cmp(&y_list[j]));
    }
    order
}

/// 窗口宽度：排序后前两个点的间距，不足两点时为 0
fn window(y_list: &[f64], order: &[usize]) -> f64 {
    match order {
        [first, second, ..] => (y_list[*first] - y_list[*second]).abs(),
        _ => 0.0,
    }
}

/// 从 `ymin` 向上的累积积分
///
/// 返回值与 `y_list` 一一对应（`result[i]` 对应 `y_list[i]`），
/// 输入无需有序。
pub fn rising_integral<F>(func: F, ymin: f64, y_list: &[f64]) -> Result<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    validate(ymin, y_list)?;

    let quad = GaussKronrod::default();
    let order = sorted_order(y_list, false);
    let yint = window(y_list, &order);

    let mut output = vec![0.0; y_list.len()];
    let mut prev_result = 0.0;

    for (index, &slot) in order.iter().enumerate() {
        let y = y_list[slot];
        let increment = if y > ymin + yint && index == 0 {
            quad.integrate(&func, ymin, y)
        } else if y > ymin + yint {
            quad.integrate(&func, y - yint, y)
        } else if y <= ymin {
            0.0
        } else {
            quad.integrate(&func, ymin, y)
        };
        prev_result += increment;
        output[slot] = prev_result;
    }

    Ok(output)
}

/// 从 `ymax` 向下的累积积分
///
/// 内部按降序处理，返回前恢复原始顺序。
pub fn falling_integral<F>(func: F, ymax: f64, y_list: &[f64]) -> Result<Vec<f64>>
where
    F: Fn(f64) -> f64,
{
    validate(ymax, y_list)?;

    let quad = GaussKronrod::default();
    let order = sorted_order(y_list, true);
    let yint = window(y_list, &order);

    let mut output = vec![0.0; y_list.len()];
    let mut prev_result = 0.0;

    for (index, &slot) in order.iter().enumerate() {
        let y = y_list[slot];
        let increment = if y < ymax - yint && index == 0 {
            quad.integrate(&func, y, ymax)
        } else if y < ymax - yint {
            quad.integrate(&func, y, y + yint)
        } else if y >= ymax {
            0.0
        } else {
            quad.integrate(&func, y, ymax)
        };
        prev_result += increment;
        output[slot] = prev_result;
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-12, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn test_rising_constant() {
        let out = rising_integral(|_| 1.0, 0.0, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_close(&out, &[1.0, 2.0, 3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_falling_constant() {
        let out = falling_integral(|_| 1.0, 5.0, &[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_close(&out, &[4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_points_beyond_baseline_are_zero() {
        let out = rising_integral(|_| 1.0, 2.0, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_close(&out, &[0.0, 0.0, 0.0, 1.0, 2.0]);

        let out = falling_integral(|_| 1.0, 2.0, &[0.0, 1.0, 2.0, 3.0, 4.0]).unwrap();
        assert_close(&out, &[2.0, 1.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_rising_unsorted_matches_sorted() {
        let f = |y: f64| 2.0 * y;
        let sorted = rising_integral(f, 0.0, &[0.5, 1.0, 1.5, 2.0]).unwrap();
        let shuffled = rising_integral(f, 0.0, &[1.5, 0.5, 2.0, 1.0]).unwrap();
        assert_eq!(shuffled[0], sorted[2]);
        assert_eq!(shuffled[1], sorted[0]);
        assert_eq!(shuffled[2], sorted[3]);
        assert_eq!(shuffled[3], sorted[1]);
        // ∫₀ʸ 2t dt = y²
        assert_close(&sorted, &[0.25, 1.0, 2.25, 4.0]);
    }

    #[test]
    fn test_falling_restores_order() {
        let out = falling_integral(|_| 1.0, 3.0, &[2.0, 0.0, 1.0]).unwrap();
        assert_close(&out, &[1.0, 3.0, 2.0]);
    }

    #[test]
    fn test_non_uniform_grid_keeps_fixed_window() {
        // 窗口固定为前两个点的间距 1，不随 3、6 处的实际间距变宽
        let grid = [0.0, 1.0, 3.0, 6.0];
        let out = rising_integral(|_| 1.0, 0.0, &grid).unwrap();
        assert_close(&out, &[0.0, 1.0, 2.0, 3.0]);

        // 降序时窗口为 6 与 3 的间距
        let out = falling_integral(|_| 1.0, 6.0, &grid).unwrap();
        assert_close(&out, &[9.0, 6.0, 3.0, 0.0]);
    }

    #[test]
    fn test_output_length_matches_grid() {
        assert!(rising_integral(|_| 1.0, 0.0, &[]).unwrap().is_empty());
        let single = rising_integral(|_| 1.0, 0.0, &[3.0]).unwrap();
        assert_close(&single, &[3.0]);
        let single = falling_integral(|_| 1.0, 0.0, &[3.0]).unwrap();
        assert_close(&single, &[0.0]);
    }

    #[test]
    fn test_first_point_is_full_quadrature() {
        // 首点远离基线时做完整积分
        let out = rising_integral(|_| 1.0, -10.0, &[0.0, 0.5, 1.0]).unwrap();
        assert_close(&out, &[10.0, 10.5, 11.0]);
    }

    #[test]
    fn test_non_finite_grid() {
        let r = rising_integral(|_| 1.0, 0.0, &[1.0, f64::NAN]);
        assert!(matches!(r, Err(ToybandsError::InvalidArgument(_))));
        let r = falling_integral(|_| 1.0, f64::INFINITY, &[1.0]);
        assert!(matches!(r, Err(ToybandsError::InvalidArgument(_))));
    }
}
