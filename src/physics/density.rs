//! # 载流子密度与带边能量换算
//!
//! 零场极限下，给定载流子密度 n 求带边相对化学势的偏移 E_bb：
//! - Dirac 导带: E = -ħv_F√(4π|n|)
//! - Dirac 价带: E = +ħv_F√(4π|n|)
//! - 常规导带:   E = -ħ²|n|/(π m* mₑ)
//! - 常规价带:   E = +ħ²|n|/(π m* mₑ)
//!
//! 密度带符号（电子为正，空穴为负），换算时取绝对值，极性决定偏移方向。
//!
//! ## 依赖关系
//! - 被 `models/band.rs` 调用
//! - 使用 `physics/constants.rs`

use crate::error::{Result, ToybandsError};
use crate::physics::constants::{HBAR, ME};
use crate::physics::landau::{Polarity, Spin};

use std::f64::consts::PI;

/// 色散类型及其专属参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dispersion {
    /// Dirac 色散：质量项 M (eV)，费米速度 v_F (m/s)
    Dirac { mass: f64, vf: f64 },
    /// 常规色散：有效质量 m* (mₑ)，自旋指标
    Conventional { meff: f64, spin: Spin },
}

/// 密度 → 带边能量 (J)
pub fn den2en(density: f64, dispersion: Dispersion, polarity: Polarity) -> Result<f64> {
    if !density.is_finite() {
        return Err(ToybandsError::InvalidArgument(format!(
            "density = {} is not finite",
            density
        )));
    }

    let magnitude = match dispersion {
        Dispersion::Dirac { vf, .. } => HBAR * vf * (4.0 * PI * density.abs()).sqrt(),
        Dispersion::Conventional { meff, .. } => {
            if !(meff > 0.0) {
                return Err(ToybandsError::InvalidArgument(format!(
                    "meff = {} must be positive",
                    meff
                )));
            }
            HBAR * HBAR * density.abs() / PI / meff / ME
        }
    };

    Ok(-polarity.sign() * magnitude)
}

/// 带边能量 (J) → 密度 (m⁻²)，`den2en` 的逆运算
///
/// 导带返回非负密度，价带返回非正密度。
#[cfg(test)]
pub fn en2den(energy: f64, dispersion: Dispersion, polarity: Polarity) -> Result<f64> {
    if !energy.is_finite() {
        return Err(ToybandsError::InvalidArgument(format!(
            "energy = {} is not finite",
            energy
        )));
    }

    let magnitude = match dispersion {
        Dispersion::Dirac { vf, .. } => {
            if vf == 0.0 {
                return Err(ToybandsError::InvalidArgument(
                    "vf = 0 has no density-energy inverse".to_string(),
                ));
            }
            let k = energy / (HBAR * vf);
            k * k / (4.0 * PI)
        }
        Dispersion::Conventional { meff, .. } => {
            if !(meff > 0.0) {
                return Err(ToybandsError::InvalidArgument(format!(
                    "meff = {} must be positive",
                    meff
                )));
            }
            energy.abs() * PI * meff * ME / (HBAR * HBAR)
        }
    };

    Ok(polarity.sign() * magnitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::constants::E0;

    const DIRAC: Dispersion = Dispersion::Dirac { mass: 0.0, vf: 1e6 };
    const CONV: Dispersion = Dispersion::Conventional {
        meff: 0.3,
        spin: Spin::Up,
    };

    #[test]
    fn test_band_edge_sign() {
        assert!(den2en(1e15, DIRAC, Polarity::Conduction).unwrap() < 0.0);
        assert!(den2en(-1e15, DIRAC, Polarity::Valence).unwrap() > 0.0);
        assert!(den2en(1e16, CONV, Polarity::Conduction).unwrap() < 0.0);
        assert!(den2en(-1e16, CONV, Polarity::Valence).unwrap() > 0.0);
        assert_eq!(den2en(0.0, DIRAC, Polarity::Conduction).unwrap(), 0.0);
    }

    #[test]
    fn test_dirac_fermi_energy_magnitude() {
        // n = 10¹⁵ m⁻², v_F = 10⁶ m/s → E_F ≈ 73.8 meV
        let e = den2en(1e15, DIRAC, Polarity::Conduction).unwrap();
        assert!((e / E0 + 0.0738).abs() < 5e-4);
    }

    #[test]
    fn test_density_energy_roundtrip() {
        let cases = [
            (3.2e15, DIRAC, Polarity::Conduction),
            (-7.5e14, DIRAC, Polarity::Valence),
            (2.0e16, CONV, Polarity::Conduction),
            (-4.4e15, CONV, Polarity::Valence),
        ];
        for (density, dispersion, polarity) in cases {
            let e = den2en(density, dispersion, polarity).unwrap();
            let back = en2den(e, dispersion, polarity).unwrap();
            assert!(
                (back - density).abs() <= 1e-10 * density.abs(),
                "{:?} {:?}: {} -> {} -> {}",
                dispersion,
                polarity,
                density,
                e,
                back
            );
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert!(den2en(f64::NAN, DIRAC, Polarity::Conduction).is_err());
        let bad = Dispersion::Conventional {
            meff: 0.0,
            spin: Spin::Down,
        };
        assert!(den2en(1e15, bad, Polarity::Conduction).is_err());
    }
}
