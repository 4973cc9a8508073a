//! # 能带记录
//!
//! `system.json` 中每一行对应的扁平记录，字段名与外部数据表保持一致。
//! 不同色散所需的参数可能缺省（Dirac 带没有 `meff`/`spin`，常规带没有 `vf`/`M`），
//! 缺省项由 `Band::from_record` 按色散类型校验。
//!
//! ## 依赖关系
//! - 被 `parsers/system_json.rs`, `models/band.rs`, `export/` 使用
//! - 使用 `serde` 派生序列化

use serde::{Deserialize, Serialize};

/// 单个能带的扁平记录（内部单位）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandRecord {
    /// 载流子密度 (m⁻²)，电子为正、空穴为负
    pub density: f64,

    /// 导带 (true) 或价带 (false)
    pub is_cond: bool,

    /// Dirac 色散 (true) 或常规色散 (false)
    pub is_dirac: bool,

    /// g 因子
    pub gfactor: f64,

    /// 有效质量 (mₑ)，常规色散必需
    #[serde(default)]
    pub meff: Option<f64>,

    /// 自旋指标 ±1，常规色散必需
    #[serde(default)]
    pub spin: Option<f64>,

    /// 质量项 (eV)，仅 Dirac
    #[serde(default, rename = "M")]
    pub mass: Option<f64>,

    /// 费米速度 (m/s)，Dirac 必需
    #[serde(default)]
    pub vf: Option<f64>,
}

impl BandRecord {
    /// Dirac 带记录
    pub fn dirac(density: f64, is_cond: bool, gfactor: f64, mass: f64, vf: f64) -> Self {
        BandRecord {
            density,
            is_cond,
            is_dirac: true,
            gfactor,
            meff: None,
            spin: None,
            mass: Some(mass),
            vf: Some(vf),
        }
    }

    /// 常规带记录
    pub fn conventional(density: f64, is_cond: bool, gfactor: f64, meff: f64, spin: f64) -> Self {
        BandRecord {
            density,
            is_cond,
            is_dirac: false,
            gfactor,
            meff: Some(meff),
            spin: Some(spin),
            mass: None,
            vf: None,
        }
    }
}
