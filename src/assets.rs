//! 输出目录管理模块
//!
//! # 设计思路
//!
//! 图标写入 Web 项目的公共静态资源目录（`<project_root>/public`），
//! 也允许直接指定输出目录。目录不存在时自动创建。
//!
//! # 实现思路
//!
//! - 路径解析与目录创建分开：解析不触碰磁盘，创建只在写盘前执行。
//! - 所有可能失败的操作均返回 `Result`。

use std::path::{Path, PathBuf};

use crate::icon_generator::IconError;

/// 公共静态资源目录名。
pub const PUBLIC_DIR_NAME: &str = "public";

/// 解析输出目录：优先使用自定义目录，否则为 `<project_root>/public`。
pub fn public_assets_dir(project_root: &Path, custom_dir: Option<&Path>) -> PathBuf {
    match custom_dir {
        Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
        _ => project_root.join(PUBLIC_DIR_NAME),
    }
}

/// 确保目录存在。
pub fn ensure_dir(dir: &Path) -> Result<(), IconError> {
    if dir.is_dir() {
        return Ok(());
    }

    log::debug!("创建输出目录: {}", dir.display());
    std::fs::create_dir_all(dir).map_err(|source| IconError::Write {
        path: dir.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_under_project_root() {
        assert_eq!(
            public_assets_dir(Path::new("/srv/app"), None),
            PathBuf::from("/srv/app/public")
        );
    }

    #[test]
    fn custom_dir_overrides_project_root() {
        assert_eq!(
            public_assets_dir(Path::new("/srv/app"), Some(Path::new("/var/www/static"))),
            PathBuf::from("/var/www/static")
        );
        assert_eq!(
            public_assets_dir(Path::new("/srv/app"), Some(Path::new(""))),
            PathBuf::from("/srv/app/public")
        );
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        let nested = dir.path().join("web").join("public");

        ensure_dir(&nested).expect("create nested");
        assert!(nested.is_dir());
        ensure_dir(&nested).expect("existing dir is fine");
    }
}
