//! # 物理常数与单位换算
//!
//! 内部统一使用 SI 单位（能量 J，密度 m⁻²，速度 m/s，磁场 T）。
//! 显示单位（eV, 10¹⁶ m⁻², 10⁶ m/s）只在导出和终端打印时换算。
//!
//! ## 数据来源
//! CODATA 2018 推荐值
//!
//! ## 依赖关系
//! - 被 `physics/` 其余子模块、`models/`、`export/`、`plot/` 使用
//! - 无外部依赖

/// 元电荷 (C)，同时作为 eV → J 的换算因子
pub const E0: f64 = 1.602_176_634e-19;

/// 约化普朗克常数 (J·s)
pub const HBAR: f64 = 1.054_571_817e-34;

/// 普朗克常数 (J·s)
pub const H0: f64 = 6.626_070_15e-34;

/// 电子静止质量 (kg)
pub const ME: f64 = 9.109_383_701_5e-31;

/// 玻尔磁子 (J/T)
pub const MU_B: f64 = 9.274_010_078_3e-24;

/// 密度显示单位 (m⁻²)
pub const DENSITY_DISPLAY_UNIT: f64 = 1e16;

/// 费米速度显示单位 (m/s)
pub const VELOCITY_DISPLAY_UNIT: f64 = 1e6;

/// eV → J
pub fn ev_to_joule(ev: f64) -> f64 {
    ev * E0
}

/// J → eV
pub fn joule_to_ev(joule: f64) -> f64 {
    joule / E0
}

/// 倾斜磁场的垂直分量 B⊥ = B·cos(θ)，θ 单位为度
pub fn perpendicular_field(field: f64, angle_in_deg: f64) -> f64 {
    field * angle_in_deg.to_radians().cos()
}

/// 单个朗道能级的简并度（单位面积磁通量子数）eB⊥/h，随 B⊥ 带符号
pub fn ll_degeneracy(field: f64, angle_in_deg: f64) -> f64 {
    perpendicular_field(field, angle_in_deg) * E0 / H0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bohr_magneton_consistency() {
        // μB = eħ/2mₑ
        let mu_b = E0 * HBAR / (2.0 * ME);
        assert!((mu_b - MU_B).abs() / MU_B < 1e-9);
    }

    #[test]
    fn test_ev_roundtrip() {
        let e = ev_to_joule(0.125);
        assert!((joule_to_ev(e) - 0.125).abs() < 1e-15);
    }

    #[test]
    fn test_degeneracy_at_one_tesla() {
        // e/h ≈ 2.418e14 m⁻² T⁻¹
        let d = ll_degeneracy(1.0, 0.0);
        assert!((d - 2.417_989_242e14).abs() / d < 1e-8);
        // 90° 时磁场完全在面内
        assert!(ll_degeneracy(1.0, 90.0) < 1.0);
        assert_eq!(ll_degeneracy(-2.0, 0.0), -ll_degeneracy(2.0, 0.0));
    }
}
