//! # 输出路径
//!
//! 根据输出目录与文件名确定图片与 CSV 的保存位置。
//! 目录不存在时自动创建；文件名无扩展名时默认保存为 PNG。
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `plot/figures.rs` 校验图片格式

use crate::error::{Result, ToybandsError};
use crate::plot::ImageFormat;

use std::fs;
use std::path::{Path, PathBuf};

/// 默认输出目录
pub const DEFAULT_DIR: &str = "output";

/// 默认文件名
pub const DEFAULT_NAME: &str = "default";

/// 默认图片格式
pub const DEFAULT_FORMAT: &str = "png";

/// 一次运行的输出位置
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTarget {
    /// 输出目录
    pub dir: PathBuf,
    /// 不含扩展名的文件名
    pub stem: String,
    /// 图片扩展名
    pub extension: String,
}

impl OutputTarget {
    /// 解析 `fnm`：带扩展名时校验格式，否则使用默认格式
    pub fn new(dir: &Path, fnm: Option<&str>) -> Result<Self> {
        let name = fnm.unwrap_or(DEFAULT_NAME);
        let path = Path::new(name);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ToybandsError::InvalidArgument(format!("invalid file name '{}'", name)))?
            .to_string();

        let extension = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) => {
                ImageFormat::from_path(path)?;
                ext.to_string()
            }
            None => DEFAULT_FORMAT.to_string(),
        };

        Ok(Self {
            dir: dir.to_path_buf(),
            stem,
            extension,
        })
    }

    /// 确保输出目录存在，返回是否新建
    pub fn ensure_dir(&self) -> Result<bool> {
        if self.dir.is_dir() {
            return Ok(false);
        }
        fs::create_dir_all(&self.dir).map_err(|e| ToybandsError::FileWriteError {
            path: self.dir.display().to_string(),
            source: e,
        })?;
        Ok(true)
    }

    /// 图片路径
    pub fn image_path(&self) -> PathBuf {
        self.dir.join(format!("{}.{}", self.stem, self.extension))
    }

    /// 带后缀的 CSV 路径，例如 `default_enplot.csv`
    pub fn csv_path(&self, suffix: &str) -> PathBuf {
        self.dir.join(format!("{}_{}.csv", self.stem, suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target() {
        let target = OutputTarget::new(Path::new("output"), None).unwrap();
        assert_eq!(target.image_path(), PathBuf::from("output/default.png"));
        assert_eq!(
            target.csv_path("enplot"),
            PathBuf::from("output/default_enplot.csv")
        );
    }

    #[test]
    fn test_explicit_format() {
        let target = OutputTarget::new(Path::new("out"), Some("fan.svg")).unwrap();
        assert_eq!(target.stem, "fan");
        assert_eq!(target.image_path(), PathBuf::from("out/fan.svg"));
        assert!(OutputTarget::new(Path::new("out"), Some("fan.pdf")).is_err());
    }

    #[test]
    fn test_ensure_dir() {
        let dir = std::env::temp_dir().join("toybands_output_target");
        fs::remove_dir_all(&dir).ok();
        let target = OutputTarget::new(&dir, Some("x")).unwrap();
        assert!(target.ensure_dir().unwrap());
        assert!(!target.ensure_dir().unwrap());
        fs::remove_dir_all(&dir).ok();
    }
}
