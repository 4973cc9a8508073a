//! # 能带模型
//!
//! 一个二维能带的全部参数，以及由它导出的朗道能级能量表和 DOS/IDOS 曲线。
//!
//! ## 密度状态
//! 除密度外所有参数不可变。带边能量 E_bb 由密度导出，
//! `set_density` 会立即重新计算它，因此任何后续查询都看到一致的状态。
//! 并行扫描时应使用 `with_density` 得到新的 `Band`，避免共享可变状态。
//!
//! ## 依赖关系
//! - 被 `models/system.rs`, `commands/` 使用
//! - 使用 `physics/` 计算能级、带边与态密度

use crate::error::{Result, ToybandsError};
use crate::models::record::BandRecord;
use crate::physics::constants::perpendicular_field;
use crate::physics::{den2en, dos, ll_conventional, ll_dirac, Dispersion, Polarity, Spin};

/// 曲线类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Curve {
    /// 态密度
    Dos,
    /// 积分态密度
    Idos,
}

/// 某一磁场下生成能级与态密度所需的参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectrumParams {
    /// 朗道指标上限（不含），能级 N ∈ [0, n_max)
    pub n_max: usize,
    /// 磁场与样品法线夹角 (°)
    pub angle: f64,
    /// Gaussian 展宽 (J)
    pub sigma: f64,
    /// 是否启用 Dirac 零能级半填充补偿
    pub compensate: bool,
}

impl SpectrumParams {
    pub fn new(n_max: usize, angle: f64, sigma: f64) -> Self {
        SpectrumParams {
            n_max,
            angle,
            sigma,
            compensate: false,
        }
    }

    pub fn with_compensation(mut self, compensate: bool) -> Self {
        self.compensate = compensate;
        self
    }
}

/// 朗道能级能量表：下标为朗道指标 N，每项是沿磁场序列的能量 (J)
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyTable {
    levels: Vec<Vec<f64>>,
}

impl EnergyTable {
    /// 能级的列名，如 `#3`
    pub fn key(n: usize) -> String {
        format!("#{}", n)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &[f64])> {
        self.levels.iter().enumerate().map(|(n, v)| (n, v.as_slice()))
    }

    pub fn into_levels(self) -> Vec<Vec<f64>> {
        self.levels
    }
}

/// 二维能带
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    density: f64,
    polarity: Polarity,
    dispersion: Dispersion,
    gfactor: f64,
    /// 由密度导出的带边能量 (J)
    band_edge: f64,
}

impl Band {
    /// 创建能带并计算带边能量
    pub fn new(
        density: f64,
        polarity: Polarity,
        dispersion: Dispersion,
        gfactor: f64,
    ) -> Result<Self> {
        if !(gfactor >= 0.0) {
            return Err(ToybandsError::InvalidArgument(format!(
                "gfactor = {} must be non-negative",
                gfactor
            )));
        }
        let band_edge = den2en(density, dispersion, polarity)?;
        Ok(Band {
            density,
            polarity,
            dispersion,
            gfactor,
            band_edge,
        })
    }

    /// 从扁平记录创建，`index` 用于错误信息
    pub fn from_record(index: usize, record: &BandRecord) -> Result<Self> {
        let missing = |field: &str| ToybandsError::MissingParameter {
            band: index,
            field: field.to_string(),
        };

        let dispersion = if record.is_dirac {
            Dispersion::Dirac {
                mass: record.mass.unwrap_or(0.0),
                vf: record.vf.ok_or_else(|| missing("vf"))?,
            }
        } else {
            let spin = record.spin.ok_or_else(|| missing("spin"))?;
            Dispersion::Conventional {
                meff: record.meff.ok_or_else(|| missing("meff"))?,
                spin: Spin::try_from(spin)?,
            }
        };

        Band::new(
            record.density,
            Polarity::from_is_cond(record.is_cond),
            dispersion,
            record.gfactor,
        )
    }

    /// 转回扁平记录
    pub fn to_record(&self) -> BandRecord {
        match self.dispersion {
            Dispersion::Dirac { mass, vf } => {
                BandRecord::dirac(self.density, self.is_cond(), self.gfactor, mass, vf)
            }
            Dispersion::Conventional { meff, spin } => BandRecord::conventional(
                self.density,
                self.is_cond(),
                self.gfactor,
                meff,
                spin.value(),
            ),
        }
    }

    pub fn density(&self) -> f64 {
        self.density
    }

    pub fn band_edge(&self) -> f64 {
        self.band_edge
    }

    pub fn is_cond(&self) -> bool {
        self.polarity.is_cond()
    }

    /// 原地更新密度并重新计算带边能量
    ///
    /// 失败时能带保持原状态。
    pub fn set_density(&mut self, density: f64) -> Result<()> {
        let band_edge = den2en(density, self.dispersion, self.polarity)?;
        self.density = density;
        self.band_edge = band_edge;
        Ok(())
    }

    /// 返回替换密度后的新能带
    pub fn with_density(&self, density: f64) -> Result<Self> {
        let mut band = self.clone();
        band.set_density(density)?;
        Ok(band)
    }

    /// 已算出 B⊥ 时的单个能级能量（含带边偏移）
    fn level_energy_at(&self, n: usize, field: f64, b_perp: f64) -> Result<f64> {
        let e = match self.dispersion {
            Dispersion::Dirac { mass, vf } => {
                ll_dirac(field, b_perp, n, self.polarity, self.gfactor, mass, vf)?
            }
            Dispersion::Conventional { meff, spin } => {
                ll_conventional(field, b_perp, n, self.polarity, spin, self.gfactor, meff)?
            }
        };
        Ok(e + self.band_edge)
    }

    /// 第 N 个朗道能级在磁场 `field`、倾角 `angle` (°) 下的能量 (J)
    #[cfg(test)]
    pub fn level_energy(&self, n: usize, field: f64, angle: f64) -> Result<f64> {
        self.level_energy_at(n, field, perpendicular_field(field, angle))
    }

    /// 某一磁场下 N ∈ [0, n_max) 的全部能级能量
    pub fn landau_levels(&self, field: f64, n_max: usize, angle: f64) -> Result<Vec<f64>> {
        let b_perp = perpendicular_field(field, angle);
        (0..n_max)
            .map(|n| self.level_energy_at(n, field, b_perp))
            .collect()
    }

    /// 沿磁场序列计算能量表，共 `n_max` 个能级，每个能级 `fields.len()` 个值
    pub fn cal_energy(&self, fields: &[f64], n_max: usize, angle: f64) -> Result<EnergyTable> {
        let b_perps: Vec<f64> = fields
            .iter()
            .map(|&b| perpendicular_field(b, angle))
            .collect();

        let levels = (0..n_max)
            .map(|n| {
                fields
                    .iter()
                    .zip(&b_perps)
                    .map(|(&b, &b_perp)| self.level_energy_at(n, b, b_perp))
                    .collect::<Result<Vec<f64>>>()
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(EnergyTable { levels })
    }

    /// 本能带在磁场 `field` 下对 DOS 或 IDOS 的贡献，在 `energies` 上取样
    ///
    /// 导带走电子侧（正贡献），价带走空穴侧（负贡献）。
    pub fn dos_gen(
        &self,
        energies: &[f64],
        field: f64,
        params: &SpectrumParams,
        curve: Curve,
    ) -> Result<Vec<f64>> {
        let lls = self.landau_levels(field, params.n_max, params.angle)?;
        let (sigma, angle, compensate) = (params.sigma, params.angle, params.compensate);

        match (self.polarity, curve) {
            (Polarity::Conduction, Curve::Idos) => {
                dos::e_idos_gen(energies, field, sigma, angle, &lls, compensate)
            }
            (Polarity::Conduction, Curve::Dos) => {
                dos::e_dos_gen(energies, field, sigma, angle, &lls, compensate)
            }
            (Polarity::Valence, Curve::Idos) => {
                dos::h_idos_gen(energies, field, sigma, angle, &lls, compensate)
            }
            (Polarity::Valence, Curve::Dos) => {
                dos::h_dos_gen(energies, field, sigma, angle, &lls, compensate)
            }
        }
    }
}

impl TryFrom<&BandRecord> for Band {
    type Error = ToybandsError;

    fn try_from(record: &BandRecord) -> Result<Self> {
        Band::from_record(0, record)
    }
}

#[cfg(test)]
impl EnergyTable {
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn level(&self, n: usize) -> Option<&[f64]> {
        self.levels.get(n).map(|v| v.as_slice())
    }
}
