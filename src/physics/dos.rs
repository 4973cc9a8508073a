//! # 展宽态密度 (DOS) 与积分态密度 (IDOS)
//!
//! 每个朗道能级按 Gaussian 展宽，权重为能级简并度 eB⊥/h：
//!
//! DOS(E) = Σ_levels (eB⊥/h) · exp(-(E-E_N)²/2σ²) / (σ√2π)
//!
//! 电子侧为正，空穴侧为负（空穴减少载流子密度）。
//! 可选的补偿项在极值能级处扣除（电子侧）或加回（空穴侧）半个能级，
//! 对应 Dirac 零能级的半填充约定，只有调用方显式开启时才生效。
//!
//! ## 依赖关系
//! - 被 `models/band.rs` 调用
//! - 使用 `numeric/integrator.rs` 做累积积分
//! - 使用 `physics/constants.rs`

use crate::error::{Result, ToybandsError};
use crate::numeric::{falling_integral, rising_integral};
use crate::physics::constants::ll_degeneracy;

use std::f64::consts::PI;

/// 归一化 Gaussian
pub fn gaussian(x: f64, mu: f64, sigma: f64) -> f64 {
    (-0.5 * (x - mu).powi(2) / (sigma * sigma)).exp() / sigma / (2.0 * PI).sqrt()
}

/// 补偿项：极值能级处半个简并度的 Gaussian
fn compensation(e: f64, degeneracy: f64, sigma: f64, extremal: f64) -> f64 {
    0.5 * degeneracy * gaussian(e, extremal, sigma)
}

/// 电子侧态密度，在化学势 `e` 处取值
///
/// - `field`: 总磁场 (T)
/// - `sigma`: 展宽 (J)
/// - `angle_in_deg`: 磁场与样品法线夹角 (°)
/// - `e_lls`: 电子侧朗道能级能量 (J)
pub fn e_density_of_state(
    e: f64,
    field: f64,
    sigma: f64,
    angle_in_deg: f64,
    e_lls: &[f64],
    compensate_on: bool,
) -> f64 {
    let degeneracy = ll_degeneracy(field, angle_in_deg);
    let output: f64 = e_lls
        .iter()
        .map(|&e_ll| degeneracy * gaussian(e, e_ll, sigma))
        .sum();

    if compensate_on {
        let lowest = e_lls.iter().copied().fold(f64::INFINITY, f64::min);
        output - compensation(e, degeneracy, sigma, lowest)
    } else {
        output
    }
}

/// 空穴侧态密度（负值），在化学势 `e` 处取值
pub fn h_density_of_state(
    e: f64,
    field: f64,
    sigma: f64,
    angle_in_deg: f64,
    h_lls: &[f64],
    compensate_on: bool,
) -> f64 {
    let degeneracy = ll_degeneracy(field, angle_in_deg);
    let output: f64 = h_lls
        .iter()
        .map(|&h_ll| -degeneracy * gaussian(e, h_ll, sigma))
        .sum();

    if compensate_on {
        let highest = h_lls.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        output + compensation(e, degeneracy, sigma, highest)
    } else {
        output
    }
}

/// 校验展宽和能级集合
fn validate(sigma: f64, lls: &[f64]) -> Result<()> {
    if !(sigma > 0.0) || !sigma.is_finite() {
        return Err(ToybandsError::InvalidArgument(format!(
            "broadening sigma = {} must be positive and finite",
            sigma
        )));
    }
    if lls.is_empty() {
        return Err(ToybandsError::InvalidArgument(
            "at least one Landau level is required".to_string(),
        ));
    }
    if let Some(e) = lls.iter().find(|e| !e.is_finite()) {
        return Err(ToybandsError::InvalidArgument(format!(
            "Landau level energy {} is not finite",
            e
        )));
    }
    Ok(())
}

/// 电子侧 IDOS：从最低能级下方 3σ 处向上积分
pub fn e_idos_gen(
    e_list: &[f64],
    field: f64,
    sigma: f64,
    angle_in_deg: f64,
    e_lls: &[f64],
    compensate_on: bool,
) -> Result<Vec<f64>> {
    validate(sigma, e_lls)?;
    let lowest = e_lls.iter().copied().fold(f64::INFINITY, f64::min);
    rising_integral(
        |e| e_density_of_state(e, field, sigma, angle_in_deg, e_lls, compensate_on),
        lowest - 3.0 * sigma,
        e_list,
    )
}

/// 空穴侧 IDOS：从最高能级上方 3σ 处向下积分
pub fn h_idos_gen(
    e_list: &[f64],
    field: f64,
    sigma: f64,
    angle_in_deg: f64,
    h_lls: &[f64],
    compensate_on: bool,
) -> Result<Vec<f64>> {
    validate(sigma, h_lls)?;
    let highest = h_lls.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    falling_integral(
        |e| h_density_of_state(e, field, sigma, angle_in_deg, h_lls, compensate_on),
        highest + 3.0 * sigma,
        e_list,
    )
}

/// 电子侧 DOS 曲线
pub fn e_dos_gen(
    e_list: &[f64],
    field: f64,
    sigma: f64,
    angle_in_deg: f64,
    e_lls: &[f64],
    compensate_on: bool,
) -> Result<Vec<f64>> {
    validate(sigma, e_lls)?;
    Ok(e_list
        .iter()
        .map(|&e| e_density_of_state(e, field, sigma, angle_in_deg, e_lls, compensate_on))
        .collect())
}

/// 空穴侧 DOS 曲线
pub fn h_dos_gen(
    e_list: &[f64],
    field: f64,
    sigma: f64,
    angle_in_deg: f64,
    h_lls: &[f64],
    compensate_on: bool,
) -> Result<Vec<f64>> {
    validate(sigma, h_lls)?;
    Ok(e_list
        .iter()
        .map(|&e| h_density_of_state(e, field, sigma, angle_in_deg, h_lls, compensate_on))
        .collect())
}
