//! # 多能带体系
//!
//! 持有有序的能带集合，汇总各能带的 IDOS，并求解使总 IDOS 等于总载流子密度的化学势。
//!
//! ## 化学势求解
//! 1. 在给定能量网格上计算各能带 IDOS 并逐点求和
//! 2. 若目标密度超出求和曲线的取值范围，返回 `DomainSaturation`（不做截断）
//! 3. 找到第一个跨越目标密度的相邻网格点对，线性插值得到化学势
//!
//! 假定每个能带的 IDOS 单调，算法本身不强制检查。
//!
//! ## 依赖关系
//! - 被 `commands/`, `sweep/`, `parsers/system_json.rs` 使用
//! - 使用 `models/band.rs`, `numeric/grid.rs`

use crate::error::{Result, ToybandsError};
use crate::models::band::{Band, Curve, EnergyTable, SpectrumParams};
use crate::numeric::{add_list, interp};

/// 能带 × 能级 × 磁场 的三层数据，`[band][level][field_index]`
pub type DataBundle = Vec<Vec<Vec<f64>>>;

/// 多能带体系
#[derive(Debug, Clone, Default, PartialEq)]
pub struct System {
    bands: Vec<Band>,
}

impl System {
    /// 创建空体系
    pub fn new() -> Self {
        Self::default()
    }

    /// 追加能带，插入顺序即导出和配色顺序
    pub fn add_band(&mut self, band: Band) {
        self.bands.push(band);
    }

    pub fn bands(&self) -> &[Band] {
        &self.bands
    }

    pub fn len(&self) -> usize {
        self.bands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bands.is_empty()
    }

    /// 总载流子密度 (m⁻²)
    pub fn tot_density(&self) -> f64 {
        self.bands.iter().map(|b| b.density()).sum()
    }

    /// 按能带顺序重设全部密度
    ///
    /// 长度不匹配或任一密度无效时返回错误，且体系保持原状态。
    pub fn set_all_density(&mut self, densities: &[f64]) -> Result<()> {
        if densities.len() != self.bands.len() {
            return Err(ToybandsError::InvalidArgument(format!(
                "got {} densities for {} bands",
                densities.len(),
                self.bands.len()
            )));
        }

        let updated = self
            .bands
            .iter()
            .zip(densities)
            .map(|(band, &density)| band.with_density(density))
            .collect::<Result<Vec<_>>>()?;
        self.bands = updated;
        Ok(())
    }

    /// 各能带沿磁场序列的能量表
    pub fn energy_tables(
        &self,
        fields: &[f64],
        n_max: usize,
        angle: f64,
    ) -> Result<Vec<EnergyTable>> {
        self.bands
            .iter()
            .map(|band| band.cal_energy(fields, n_max, angle))
            .collect()
    }

    /// 各能带 DOS 或 IDOS 逐点求和
    pub fn total_curve(
        &self,
        energies: &[f64],
        field: f64,
        params: &SpectrumParams,
        curve: Curve,
    ) -> Result<Vec<f64>> {
        let mut total = vec![0.0; energies.len()];
        for band in &self.bands {
            let contribution = band.dos_gen(energies, field, params, curve)?;
            total = add_list(&total, &contribution)?;
        }
        Ok(total)
    }

    /// 体系在磁场 `field` 下的总 IDOS
    pub fn dos_gen(&self, energies: &[f64], field: f64, params: &SpectrumParams) -> Result<Vec<f64>> {
        self.total_curve(energies, field, params, Curve::Idos)
    }

    /// 化学势 (J)：总 IDOS 等于总密度处的能量
    pub fn mu(&self, energies: &[f64], field: f64, params: &SpectrumParams) -> Result<f64> {
        if self.bands.is_empty() {
            return Err(ToybandsError::InvalidArgument(
                "the system has no bands".to_string(),
            ));
        }
        let idos = self.dos_gen(energies, field, params)?;
        solve_mu(energies, &idos, self.tot_density())
    }

    /// 每个能级沿磁场的密度：在对应磁场的总 IDOS 曲线上插值能级能量
    ///
    /// `idos[i]` 为 `fields[i]` 处在 `energies` 上的总 IDOS。超出网格的能级取端点值。
    pub fn density_bundle(
        &self,
        fields: &[f64],
        energies: &[f64],
        idos: &[Vec<f64>],
        n_max: usize,
        angle: f64,
    ) -> Result<DataBundle> {
        if idos.len() != fields.len() {
            return Err(ToybandsError::InvalidArgument(format!(
                "got IDOS curves for {} fields, expected {}",
                idos.len(),
                fields.len()
            )));
        }

        self.energy_tables(fields, n_max, angle)?
            .into_iter()
            .map(|table| {
                table
                    .iter()
                    .map(|(_, level)| {
                        level
                            .iter()
                            .zip(idos)
                            .map(|(&e, curve)| interp(e, energies, curve))
                            .collect::<Result<Vec<f64>>>()
                    })
                    .collect::<Result<Vec<_>>>()
            })
            .collect()
    }
}

/// 在 IDOS 曲线上求目标密度对应的能量
///
/// 目标密度超出曲线取值范围时返回 `DomainSaturation`。
pub fn solve_mu(energies: &[f64], idos: &[f64], target: f64) -> Result<f64> {
    if energies.len() != idos.len() {
        return Err(ToybandsError::InvalidArgument(format!(
            "energy grid ({}) and IDOS ({}) must be of the same length",
            energies.len(),
            idos.len()
        )));
    }
    if energies.is_empty() {
        return Err(ToybandsError::InvalidArgument(
            "energy grid is empty".to_string(),
        ));
    }

    let min = idos.iter().copied().fold(f64::INFINITY, f64::min);
    let max = idos.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if !(target >= min && target <= max) {
        return Err(ToybandsError::DomainSaturation { target, min, max });
    }

    for i in 0..idos.len() {
        if idos[i] == target {
            return Ok(energies[i]);
        }
        if let (Some(&next), Some(&e_next)) = (idos.get(i + 1), energies.get(i + 1)) {
            let below = idos[i] < target;
            if below != (next < target) && next != target {
                let fraction = (target - idos[i]) / (next - idos[i]);
                return Ok(energies[i] + fraction * (e_next - energies[i]));
            }
        }
    }

    Err(ToybandsError::DomainSaturation { target, min, max })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::BandRecord;
    use crate::numeric::linspace;
    use crate::physics::constants::{ev_to_joule, ll_degeneracy};

    fn band(record: BandRecord) -> Band {
        Band::try_from(&record).unwrap()
    }

    fn neutral_dirac_pair() -> System {
        let mut system = System::new();
        system.add_band(band(BandRecord::dirac(1e15, true, 0.0, 0.0, 1e6)));
        system.add_band(band(BandRecord::dirac(-1e15, false, 0.0, 0.0, 1e6)));
        system
    }

    #[test]
    fn test_neutral_dirac_pair() {
        let system = neutral_dirac_pair();
        assert_eq!(system.tot_density(), 0.0);

        let tables = system.energy_tables(&[1.0], 5, 0.0).unwrap();
        assert_eq!(tables.len(), 2);
        for table in &tables {
            assert_eq!(table.len(), 5);
        }

        let cond = &system.bands()[0];
        assert!(tables[0].level(0).unwrap()[0] >= cond.band_edge());
        assert!(tables[0].level(1).unwrap()[0] > cond.band_edge());
        // 价带能级在带边之下
        let val = &system.bands()[1];
        assert!(tables[1].level(1).unwrap()[0] < val.band_edge());
    }

    #[test]
    fn test_set_all_density() {
        let mut system = neutral_dirac_pair();
        system.set_all_density(&[3e15, -1e15]).unwrap();
        assert_eq!(system.tot_density(), 3e15 + -1e15);

        let before = system.clone();
        assert!(matches!(
            system.set_all_density(&[1e15, 2e15, 3e15]),
            Err(ToybandsError::InvalidArgument(_))
        ));
        assert_eq!(system, before);
    }

    #[test]
    fn test_solve_mu_interpolates() {
        let energies = [0.0, 1.0, 2.0, 3.0];
        let idos = [0.0, 10.0, 10.0, 30.0];
        assert_eq!(solve_mu(&energies, &idos, 5.0).unwrap(), 0.5);
        assert_eq!(solve_mu(&energies, &idos, 10.0).unwrap(), 1.0);
        assert_eq!(solve_mu(&energies, &idos, 20.0).unwrap(), 2.5);
        assert_eq!(solve_mu(&energies, &idos, 30.0).unwrap(), 3.0);
    }

    #[test]
    fn test_solve_mu_saturation() {
        let energies = [0.0, 1.0];
        let idos = [0.0, 10.0];
        assert!(matches!(
            solve_mu(&energies, &idos, 11.0),
            Err(ToybandsError::DomainSaturation { .. })
        ));
        assert!(matches!(
            solve_mu(&energies, &idos, -1.0),
            Err(ToybandsError::DomainSaturation { .. })
        ));
        assert!(solve_mu(&[], &[], 0.0).is_err());
        assert!(solve_mu(&[0.0], &[0.0, 1.0], 0.0).is_err());
    }

    #[test]
    fn test_mu_single_band() {
        let mut system = System::new();
        system.add_band(band(BandRecord::dirac(1e15, true, 0.0, 0.0, 1e6)));
        let params = SpectrumParams::new(5, 0.0, ev_to_joule(0.001));
        let energies = linspace(ev_to_joule(-0.1), ev_to_joule(0.05), 301);

        let mu = system.mu(&energies, 1.0, &params).unwrap();
        assert!(mu > energies[0] && mu < energies[energies.len() - 1]);

        // 化学势处的 IDOS 等于总密度
        let idos = system.dos_gen(&energies, 1.0, &params).unwrap();
        let at_mu = interp(mu, &energies, &idos).unwrap();
        assert!((at_mu - 1e15).abs() < 1e-6 * 1e15);

        // 4.1 个能级被填满，化学势落在 N = 4 能级附近
        let top = system.bands()[0].level_energy(4, 1.0, 0.0).unwrap();
        assert!((mu - top).abs() < 3.0 * params.sigma);
    }

    #[test]
    fn test_mu_neutral_dirac_pair() {
        let system = neutral_dirac_pair();
        let params = SpectrumParams::new(10, 0.0, ev_to_joule(0.001));
        let energies = linspace(ev_to_joule(-0.15), ev_to_joule(0.15), 301);

        let mu = system.mu(&energies, 1.0, &params).unwrap();
        // 电子与空穴的 IDOS 相互抵消，化学势落在零能附近
        assert!(mu.abs() < ev_to_joule(0.005));

        let d = ll_degeneracy(1.0, 0.0);
        let idos = system.dos_gen(&energies, 1.0, &params).unwrap();
        assert!(idos[0] < -9.0 * d);
        assert!(idos[idos.len() - 1] > 9.0 * d);
        assert!(interp(mu, &energies, &idos).unwrap().abs() < 1e-6 * d);
    }

    #[test]
    fn test_mu_is_idempotent() {
        let mut system = System::new();
        system.add_band(band(BandRecord::conventional(3e15, true, 2.0, 0.1, 1.0)));
        system.add_band(band(BandRecord::dirac(1e15, true, 0.0, 0.0, 5e5)));
        let params = SpectrumParams::new(10, 15.0, ev_to_joule(0.002));
        let energies = linspace(ev_to_joule(-0.15), ev_to_joule(0.1), 251);

        let first = system.mu(&energies, 3.0, &params).unwrap();
        let second = system.mu(&energies, 3.0, &params).unwrap();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn test_mu_saturates_outside_grid() {
        let mut system = System::new();
        system.add_band(band(BandRecord::dirac(2.5e15, true, 0.0, 0.0, 1e6)));
        // 5 个能级最多容纳 5 × 2.4e14 m⁻²
        let params = SpectrumParams::new(5, 0.0, ev_to_joule(0.001));
        let energies = linspace(ev_to_joule(-0.15), ev_to_joule(0.1), 251);
        assert!(5.0 * ll_degeneracy(1.0, 0.0) < 2.5e15);
        assert!(matches!(
            system.mu(&energies, 1.0, &params),
            Err(ToybandsError::DomainSaturation { .. })
        ));
    }

    #[test]
    fn test_density_bundle_shape() {
        let system = neutral_dirac_pair();
        let params = SpectrumParams::new(4, 0.0, ev_to_joule(0.002));
        let energies = linspace(ev_to_joule(-0.15), ev_to_joule(0.15), 151);
        let fields = linspace(1.0, 3.0, 3);

        let idos: Vec<Vec<f64>> = fields
            .iter()
            .map(|&b| system.dos_gen(&energies, b, &params).unwrap())
            .collect();
        let bundle = system
            .density_bundle(&fields, &energies, &idos, params.n_max, params.angle)
            .unwrap();

        assert_eq!(bundle.len(), 2);
        assert!(bundle.iter().all(|levels| levels.len() == 4));
        assert!(bundle
            .iter()
            .flatten()
            .all(|series| series.len() == fields.len()));

        assert!(system
            .density_bundle(&fields, &energies, &idos[..2], 4, 0.0)
            .is_err());
    }

    #[test]
    fn test_density_bundle_rejects_descending_grid() {
        let system = neutral_dirac_pair();
        let params = SpectrumParams::new(4, 0.0, ev_to_joule(0.002));
        let mut energies = linspace(ev_to_joule(-0.15), ev_to_joule(0.15), 151);
        let fields = [1.0, 2.0];
        let idos: Vec<Vec<f64>> = fields
            .iter()
            .map(|&b| system.dos_gen(&energies, b, &params).unwrap())
            .collect();
        assert!(system
            .density_bundle(&fields, &energies, &idos, 4, 0.0)
            .is_ok());

        energies.reverse();
        assert!(matches!(
            system.density_bundle(&fields, &energies, &idos, 4, 0.0),
            Err(ToybandsError::InvalidArgument(_))
        ));
    }
}
