//! # 解析器模块
//!
//! 读取外部输入：体系定义 JSON 与密度扫描 CSV。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型
//! - 子模块: system_json, density_csv

pub mod density_csv;
pub mod system_json;

pub use density_csv::read_density_csv;
pub use system_json::parse_system_file;
