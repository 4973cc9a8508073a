//! # 自适应 Gauss-Kronrod 积分
//!
//! 7 点 Gauss / 15 点 Kronrod 嵌套求积，全局自适应二分（QAG 方式）：
//! 每轮拆分误差估计最大的子区间，直到总误差满足容差或达到子区间上限。
//!
//! ## 参考
//! - QUADPACK qk15 / qag (Piessens et al., 1983)
//!
//! ## 依赖关系
//! - 被 `numeric/integrator.rs` 调用
//! - 无外部依赖

/// Kronrod 节点（非负半轴，降序）
const XGK: [f64; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

/// Kronrod 权重
const WGK: [f64; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_18,
    0.140_653_259_715_525_92,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_83,
];

/// Gauss 权重，对应 XGK[1], XGK[3], XGK[5], XGK[7]
const WG: [f64; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// 子区间
#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

impl Segment {
    fn new<F: Fn(f64) -> f64>(func: &F, a: f64, b: f64) -> Self {
        let (value, error) = qk15(func, a, b);
        Segment { a, b, value, error }
    }
}

/// 单区间 15 点 Kronrod 求积，返回 (积分值, 误差估计)
fn qk15<F: Fn(f64) -> f64>(func: &F, a: f64, b: f64) -> (f64, f64) {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = func(center);
    let mut kronrod = fc * WGK[7];
    let mut gauss = fc * WG[3];

    for (j, &x) in XGK.iter().enumerate().take(7) {
        let dx = half * x;
        let pair = func(center - dx) + func(center + dx);
        kronrod += WGK[j] * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    let value = kronrod * half;
    let error = ((kronrod - gauss) * half).abs();
    (value, error)
}

/// 自适应积分器配置
#[derive(Debug, Clone, Copy)]
pub struct GaussKronrod {
    /// 绝对容差
    pub epsabs: f64,
    /// 相对容差
    pub epsrel: f64,
    /// 子区间数量上限
    pub limit: usize,
}

impl Default for GaussKronrod {
    fn default() -> Self {
        GaussKronrod {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            limit: 200,
        }
    }
}

impl GaussKronrod {
    /// ∫ₐᵇ f(x) dx
    pub fn integrate<F: Fn(f64) -> f64>(&self, func: F, a: f64, b: f64) -> f64 {
        self.integrate_with_error(func, a, b).0
    }

    /// ∫ₐᵇ f(x) dx，同时返回误差估计
    pub fn integrate_with_error<F: Fn(f64) -> f64>(&self, func: F, a: f64, b: f64) -> (f64, f64) {
        if a == b {
            return (0.0, 0.0);
        }
        if a > b {
            let (value, error) = self.integrate_with_error(func, b, a);
            return (-value, error);
        }

        let mut segments = vec![Segment::new(&func, a, b)];

        loop {
            let value: f64 = segments.iter().map(|s| s.value).sum();
            let error: f64 = segments.iter().map(|s| s.error).sum();
            let tolerance = self.epsabs.max(self.epsrel * value.abs());

            if error <= tolerance || segments.len() >= self.limit {
                return (value, error);
            }

            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let seg = segments.swap_remove(worst);

            let mid = 0.5 * (seg.a + seg.b);
            // 区间已无法在浮点精度下继续二分
            if mid <= seg.a || mid >= seg.b {
                segments.push(seg);
                let value: f64 = segments.iter().map(|s| s.value).sum();
                let error: f64 = segments.iter().map(|s| s.error).sum();
                return (value, error);
            }

            segments.push(Segment::new(&func, seg.a, mid));
            segments.push(Segment::new(&func, mid, seg.b));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polynomial_exact() {
        let gk = GaussKronrod::default();
        let v = gk.integrate(|x| 3.0 * x * x + 2.0 * x + 1.0, 0.0, 2.0);
        assert!((v - 14.0).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_bounds() {
        let gk = GaussKronrod::default();
        let forward = gk.integrate(|x| x.sin(), 0.0, PI);
        let backward = gk.integrate(|x| x.sin(), PI, 0.0);
        assert!((forward - 2.0).abs() < 1e-10);
        assert_eq!(backward, -forward);
        assert_eq!(gk.integrate(|x| x, 1.0, 1.0), 0.0);
    }

    #[test]
    fn test_narrow_gaussian() {
        // 宽区间中的窄峰需要自适应细分
        let sigma = 0.01;
        let norm = 1.0 / (sigma * (2.0 * PI).sqrt());
        let gk = GaussKronrod::default();
        let (v, err) =
            gk.integrate_with_error(|x| norm * (-0.5 * (x / sigma).powi(2)).exp(), -0.3, 0.2);
        assert!((v - 1.0).abs() < 1e-8, "got {}", v);
        assert!(err < 1e-6);
    }
}
