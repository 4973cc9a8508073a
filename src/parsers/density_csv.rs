//! # 密度扫描表解析器
//!
//! 读取无表头 CSV：每列对应一个能带，每行是一步扫描的各能带密度。
//! 文件中的密度单位为 cm⁻²，读入时乘以 10⁴ 换算为 m⁻²。
//!
//! ## 依赖关系
//! - 被 `commands/simu.rs` 调用
//! - 使用 `csv` 库读取

use crate::error::{Result, ToybandsError};

use std::path::Path;

/// cm⁻² → m⁻²
const CM2_TO_M2: f64 = 1e4;

/// 读取密度扫描表，返回 `[step][band]`
pub fn read_density_csv(path: &Path) -> Result<Vec<Vec<f64>>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !path.is_file() || !is_csv {
        return Err(ToybandsError::FileNotFound {
            path: format!("{} (expected an existing .csv file)", path.display()),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut rows: Vec<Vec<f64>> = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                field
                    .parse::<f64>()
                    .map(|den| den * CM2_TO_M2)
                    .map_err(|_| ToybandsError::ParseError {
                        format: "density CSV".to_string(),
                        path: path.display().to_string(),
                        reason: format!("line {}: '{}' is not a number", line + 1, field),
                    })
            })
            .collect::<Result<Vec<f64>>>()?;

        if let Some(first) = rows.first() {
            if first.len() != row.len() {
                return Err(ToybandsError::ParseError {
                    format: "density CSV".to_string(),
                    path: path.display().to_string(),
                    reason: format!(
                        "line {} has {} columns, expected {}",
                        line + 1,
                        row.len(),
                        first.len()
                    ),
                });
            }
        }
        rows.push(row);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_read_density_csv() {
        let path = std::env::temp_dir().join("toybands_density_sweep.csv");
        fs::write(&path, "1e11, -2e11\n1.5e11, -2.5e11\n").unwrap();

        let rows = read_density_csv(&path).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![1e15, -2e15]);
        assert_eq!(rows[1], vec![1.5e15, -2.5e15]);

        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejects_non_csv() {
        let path = std::env::temp_dir().join("toybands_density_sweep.txt");
        fs::write(&path, "1e11\n").unwrap();
        assert!(matches!(
            read_density_csv(&path),
            Err(ToybandsError::FileNotFound { .. })
        ));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_rejects_bad_values() {
        let path = std::env::temp_dir().join("toybands_density_bad.csv");
        fs::write(&path, "1e11,abc\n").unwrap();
        assert!(matches!(
            read_density_csv(&path),
            Err(ToybandsError::ParseError { .. })
        ));
        fs::remove_file(&path).ok();
    }
}
