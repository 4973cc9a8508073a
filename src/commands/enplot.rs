//! # enplot 命令实现
//!
//! 计算各能带朗道能级能量随磁场的变化，并在每个磁场下求化学势。
//!
//! ## 功能
//! - 能级能量数据包 `[band][level][field]`
//! - 化学势：在覆盖全部能级能量的 100 点网格上求解，展宽取能量网格步长
//! - 某个磁场下化学势求解失败时给出警告并跳过该点
//!
//! ## 依赖关系
//! - 使用 `cli/plot.rs` 定义的参数
//! - 使用 `models/`, `sweep/`, `plot/`, `export/`
//! - 使用 `utils/output.rs`

use crate::cli::plot::PlotArgs;
use crate::commands::context::RunContext;
use crate::error::Result;
use crate::export::{write_databdl_csv, write_mu_csv, BundleKind};
use crate::models::{DataBundle, EnergyTable};
use crate::numeric::linspace;
use crate::plot::{make_n_colors, save_figure, EnergyFigure};
use crate::utils::output;

/// 化学势求解网格点数
const MU_GRID_POINTS: usize = 100;

/// 执行 enplot 命令
pub fn execute(args: PlotArgs) -> Result<()> {
    output::print_header("Landau Level Energies");

    let ctx = RunContext::from_args(&args.common)?;
    ctx.print_summary();

    let bundle: DataBundle = ctx
        .system
        .energy_tables(&ctx.fields, ctx.params.n_max, ctx.params.angle)?
        .into_iter()
        .map(EnergyTable::into_levels)
        .collect();

    let (lo, hi) = bundle
        .iter()
        .flatten()
        .flatten()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &e| {
            (lo.min(e), hi.max(e))
        });
    let grid = linspace(lo, hi, MU_GRID_POINTS);

    let sweep = ctx
        .runner()
        .run(&ctx.fields, "Chemical potential", |field| {
            ctx.system.mu(&grid, field, &ctx.params)
        })?;
    for (field, reason) in &sweep.failures {
        output::print_skip(&format!("B = {} T: {}", field, reason));
    }
    if sweep.failed > 0 {
        output::print_warning(&format!(
            "Chemical potential unresolved at {}/{} field points",
            sweep.failed,
            sweep.total()
        ));
    }
    let mu = sweep.values;

    ctx.prepare_output()?;

    let colors = make_n_colors(bundle.len(), ctx.style.vstart, ctx.style.vend)?;
    let image_path = ctx.target.image_path();
    save_figure(
        &EnergyFigure {
            fields: &ctx.fields,
            bundle: &bundle,
            colors: &colors,
            mu: &mu,
        },
        &image_path,
        &ctx.style,
    )?;
    output::print_saved("plot", &image_path);

    let csv_path = ctx.target.csv_path("enplot");
    write_databdl_csv(&csv_path, &ctx.fields, &bundle, BundleKind::Energy, None)?;
    output::print_saved("levels", &csv_path);

    let mu_path = ctx.target.csv_path("mu");
    write_mu_csv(&mu_path, &ctx.fields, &mu)?;
    output::print_saved("chemical potential", &mu_path);

    output::print_done("enplot finished");
    Ok(())
}
