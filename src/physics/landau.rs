//! # 朗道能级能量
//!
//! 计算二维 Dirac 型与常规（抛物线型）色散在磁场下的单个朗道能级能量，
//! 均包含 Zeeman 项。
//!
//! ## 公式
//! - Dirac: E = ±√(2eħv_F²|B⊥|N + (gμ_B B/2)² + (Me)²)
//! - 常规: E = ±(N + ½)ħeB⊥/(m* mₑ) + s·gμ_B B/2
//!
//! ## 参考
//! - 有质量 Dirac 的 E-B 关系: Physical Review B 96, 041101(R) (2017)
//!
//! ## 依赖关系
//! - 被 `models/band.rs` 调用
//! - 使用 `physics/constants.rs`

use crate::error::{Result, ToybandsError};
use crate::physics::constants::{E0, HBAR, ME, MU_B};

/// 能带极性
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// 导带（电子）
    Conduction,
    /// 价带（空穴）
    Valence,
}

impl Polarity {
    pub fn from_is_cond(is_cond: bool) -> Self {
        if is_cond {
            Polarity::Conduction
        } else {
            Polarity::Valence
        }
    }

    pub fn is_cond(self) -> bool {
        self == Polarity::Conduction
    }

    /// 导带 +1，价带 -1
    pub fn sign(self) -> f64 {
        match self {
            Polarity::Conduction => 1.0,
            Polarity::Valence => -1.0,
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Conduction => write!(f, "conduction"),
            Polarity::Valence => write!(f, "valence"),
        }
    }
}

/// 自旋指标
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Spin {
    Up,
    Down,
}

impl Spin {
    pub fn value(self) -> f64 {
        match self {
            Spin::Up => 1.0,
            Spin::Down => -1.0,
        }
    }
}

impl TryFrom<f64> for Spin {
    type Error = ToybandsError;

    fn try_from(value: f64) -> Result<Self> {
        if value == 1.0 {
            Ok(Spin::Up)
        } else if value == -1.0 {
            Ok(Spin::Down)
        } else {
            Err(ToybandsError::InvalidArgument(format!(
                "spin = {} is neither 1 nor -1",
                value
            )))
        }
    }
}

/// Dirac 色散的朗道能级能量 (J)
///
/// - `field`: 总磁场 B (T)，用于 Zeeman 项
/// - `b_perp`: 垂直分量 B⊥ (T)，用于轨道量子化
/// - `n`: 朗道指标
/// - `mass`: 质量项 M (eV)
/// - `vf`: 费米速度 (m/s)
///
/// 轨道项取 |B⊥|：B⊥ < 0 时根号内为负，没有实数解。
pub fn ll_dirac(
    field: f64,
    b_perp: f64,
    n: usize,
    polarity: Polarity,
    gfactor: f64,
    mass: f64,
    vf: f64,
) -> Result<f64> {
    if gfactor < 0.0 {
        return Err(ToybandsError::InvalidArgument(format!(
            "gfactor = {} < 0",
            gfactor
        )));
    }

    let orbital = 2.0 * E0 * HBAR * vf * vf * b_perp.abs() * n as f64;
    let zeeman = gfactor * MU_B * field / 2.0;
    let gap = mass * E0;

    Ok(polarity.sign() * (orbital + zeeman * zeeman + gap * gap).sqrt())
}

/// 常规抛物线色散的朗道能级能量 (J)
///
/// - `meff`: 有效质量，以电子静止质量为单位
///
/// 对带符号的 B⊥ 是仿射的，反向磁场下回旋项随之变号。
pub fn ll_conventional(
    field: f64,
    b_perp: f64,
    n: usize,
    polarity: Polarity,
    spin: Spin,
    gfactor: f64,
    meff: f64,
) -> Result<f64> {
    if !(meff > 0.0) {
        return Err(ToybandsError::InvalidArgument(format!(
            "meff = {} must be positive",
            meff
        )));
    }

    let cyclotron = (n as f64 + 0.5) * HBAR * E0 * b_perp / meff / ME;
    let zeeman = spin.value() * gfactor * MU_B * field / 2.0;

    Ok(polarity.sign() * cyclotron + zeeman)
}
