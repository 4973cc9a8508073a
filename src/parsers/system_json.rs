//! # 体系定义 (system.json) 解析器
//!
//! 支持两种 JSON 布局：
//! - 行数组: `[{"density": .., "is_cond": .., ...}, ...]`
//! - 列对象（pandas `to_json` 默认布局）: `{"density": {"0": .., "1": ..}, ...}`
//!
//! 记录顺序即能带插入体系的顺序。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/record.rs`, `models/system.rs`
//! - 使用 `serde_json` 反序列化

use crate::error::{Result, ToybandsError};
use crate::models::{Band, BandRecord, System};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// 列对象布局，键为行号字符串
#[derive(Debug, Deserialize)]
struct ColumnTable {
    density: BTreeMap<String, f64>,
    is_cond: BTreeMap<String, bool>,
    is_dirac: BTreeMap<String, bool>,
    gfactor: BTreeMap<String, f64>,
    #[serde(default)]
    meff: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    spin: BTreeMap<String, Option<f64>>,
    #[serde(default, rename = "M")]
    mass: BTreeMap<String, Option<f64>>,
    #[serde(default)]
    vf: BTreeMap<String, Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SystemDocument {
    Rows(Vec<BandRecord>),
    Columns(ColumnTable),
}

impl ColumnTable {
    /// 按行号数值顺序展开为记录
    fn into_records(self) -> std::result::Result<Vec<BandRecord>, String> {
        let mut keys: Vec<(usize, String)> = self
            .density
            .keys()
            .map(|k| {
                k.parse::<usize>()
                    .map(|i| (i, k.clone()))
                    .map_err(|_| format!("row key '{}' is not an index", k))
            })
            .collect::<std::result::Result<_, _>>()?;
        keys.sort();

        keys.into_iter()
            .map(|(_, key)| {
                let required = |column: &str, value: Option<bool>| {
                    value.ok_or_else(|| format!("column '{}' has no row '{}'", column, key))
                };
                let optional = |map: &BTreeMap<String, Option<f64>>| map.get(&key).copied().flatten();

                Ok::<_, String>(BandRecord {
                    density: self.density[&key],
                    is_cond: required("is_cond", self.is_cond.get(&key).copied())?,
                    is_dirac: required("is_dirac", self.is_dirac.get(&key).copied())?,
                    gfactor: self
                        .gfactor
                        .get(&key)
                        .copied()
                        .ok_or_else(|| format!("column 'gfactor' has no row '{}'", key))?,
                    meff: optional(&self.meff),
                    spin: optional(&self.spin),
                    mass: optional(&self.mass),
                    vf: optional(&self.vf),
                })
            })
            .collect()
    }
}

/// 从 JSON 文本解析能带记录
pub fn parse_records(content: &str, source: &str) -> Result<Vec<BandRecord>> {
    let document: SystemDocument =
        serde_json::from_str(content).map_err(|e| ToybandsError::ParseError {
            format: "system JSON".to_string(),
            path: source.to_string(),
            reason: e.to_string(),
        })?;

    match document {
        SystemDocument::Rows(records) => Ok(records),
        SystemDocument::Columns(table) => {
            table
                .into_records()
                .map_err(|reason| ToybandsError::ParseError {
                    format: "system JSON".to_string(),
                    path: source.to_string(),
                    reason,
                })
        }
    }
}

/// 由记录构建体系
pub fn build_system(records: &[BandRecord]) -> Result<System> {
    let mut system = System::new();
    for (index, record) in records.iter().enumerate() {
        system.add_band(Band::from_record(index, record)?);
    }
    Ok(system)
}

/// 读取 system.json 并构建体系
pub fn parse_system_file(path: &Path) -> Result<System> {
    if !path.is_file() {
        return Err(ToybandsError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| ToybandsError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;

    let records = parse_records(&content, &path.display().to_string())?;
    if records.is_empty() {
        return Err(ToybandsError::ParseError {
            format: "system JSON".to_string(),
            path: path.display().to_string(),
            reason: "no band records".to_string(),
        });
    }

    build_system(&records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let json = r#"[
            {"density": 1e15, "is_cond": true, "is_dirac": true, "gfactor": 0.0,
             "meff": null, "spin": null, "M": 0.0, "vf": 1e6},
            {"density": -2e15, "is_cond": false, "is_dirac": false, "gfactor": 2.0,
             "meff": 0.3, "spin": -1.0}
        ]"#;
        let records = parse_records(json, "inline").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], BandRecord::dirac(1e15, true, 0.0, 0.0, 1e6));
        assert_eq!(
            records[1],
            BandRecord::conventional(-2e15, false, 2.0, 0.3, -1.0)
        );

        let system = build_system(&records).unwrap();
        assert_eq!(system.len(), 2);
        assert_eq!(system.tot_density(), -1e15);
    }

    #[test]
    fn test_parse_pandas_columns() {
        let json = r#"{
            "density": {"0": 1e15, "1": -1e15, "10": 5e14},
            "is_cond": {"0": true, "1": false, "10": true},
            "is_dirac": {"0": true, "1": true, "10": false},
            "gfactor": {"0": 0, "1": 0, "10": 2},
            "meff": {"0": null, "1": null, "10": 0.1},
            "spin": {"0": null, "1": null, "10": 1},
            "M": {"0": 0, "1": 0, "10": null},
            "vf": {"0": 1e6, "1": 1e6, "10": null}
        }"#;
        let records = parse_records(json, "inline").unwrap();
        assert_eq!(records.len(), 3);
        // 行号按数值排序，"10" 在 "1" 之后
        assert_eq!(records[1].density, -1e15);
        assert_eq!(records[2].meff, Some(0.1));
        assert!(build_system(&records).is_ok());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            parse_records("{not json", "inline"),
            Err(ToybandsError::ParseError { .. })
        ));
        let missing_column = r#"{"density": {"0": 1e15}, "is_cond": {}, "is_dirac": {"0": true}, "gfactor": {"0": 0}}"#;
        assert!(parse_records(missing_column, "inline").is_err());

        let bad_spin = [BandRecord::conventional(1e15, true, 2.0, 0.3, 0.0)];
        assert!(build_system(&bad_spin).is_err());
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("toybands_no_such_system.json");
        assert!(matches!(
            parse_system_file(&path),
            Err(ToybandsError::FileNotFound { .. })
        ));
    }
}
