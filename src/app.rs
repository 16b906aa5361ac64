//! 命令行流程模块
//!
//! # 设计思路
//!
//! `main.rs` 只做参数解析与日志初始化，真正的执行流程放在这里：
//! 确定源图 → 生成图标 → 映射退出码。发现策略与输出目录都由调用方注入，
//! 便于在测试中关闭目录扫描并使用临时目录。

use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::icon_generator::{
    CandidateFinder, GenerationReport, IconConfig, IconError, IconGenerator, locate_candidate_image,
};

/// 成功时的退出码。
pub const EXIT_SUCCESS: u8 = 0;
/// 任意失败时的退出码。
pub const EXIT_FAILURE: u8 = 1;

/// 一次运行的输入参数。
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// 显式指定的源图路径。
    pub image: Option<PathBuf>,
    /// 图标输出目录。
    pub output_dir: PathBuf,
    pub config: IconConfig,
}

/// 确定源图并生成全部图标。
pub fn run(
    options: &RunOptions,
    finder: &dyn CandidateFinder,
) -> Result<GenerationReport, AppError> {
    let source = locate_candidate_image(options.image.as_deref(), finder)
        .ok_or_else(|| input_not_found(options.image.as_deref(), &options.output_dir))?;

    log::info!("📁 使用图片: {}", source.display());
    log::info!("📂 输出目录: {}", options.output_dir.display());

    let generator = IconGenerator::new(options.config.clone())?;
    Ok(generator.generate(&source, &options.output_dir)?)
}

/// 将运行结果映射为进程退出码。
pub fn exit_status<T>(result: &Result<T, AppError>) -> u8 {
    match result {
        Ok(_) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}

fn input_not_found(explicit: Option<&Path>, output_dir: &Path) -> IconError {
    log::info!("用法: pwa-icons /path/to/logo.png");
    log::info!("或将 logo 保存到下载目录后直接运行 pwa-icons");
    log::info!(
        "或手动复制 PNG 到 {} 与 {}",
        output_dir.join("pwa-192x192.png").display(),
        output_dir.join("pwa-512x512.png").display()
    );

    match explicit {
        Some(path) => IconError::InputNotFound(format!("文件不存在：{}", path.display())),
        None => IconError::InputNotFound("未指定图片且未找到候选图片".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon_generator::DisabledFinder;
    use image::{DynamicImage, ImageFormat};

    struct FixedFinder(PathBuf);

    impl CandidateFinder for FixedFinder {
        fn find(&self) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    fn options(image: Option<PathBuf>, output_dir: PathBuf) -> RunOptions {
        RunOptions {
            image,
            output_dir,
            config: IconConfig::default(),
        }
    }

    fn write_png(path: &Path) {
        DynamicImage::new_rgba8(64, 32)
            .save_with_format(path, ImageFormat::Png)
            .expect("failed to write test image");
    }

    #[test]
    fn missing_explicit_path_without_scan_exits_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let public = dir.path().join("public");
        let opts = options(Some(PathBuf::from("/nonexistent/path.png")), public.clone());

        let result = run(&opts, &DisabledFinder);

        assert!(matches!(result, Err(AppError::Icon(IconError::InputNotFound(_)))));
        assert_eq!(exit_status(&result), EXIT_FAILURE);
        assert!(!public.exists());
    }

    #[test]
    fn no_input_and_no_candidate_exits_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let result = run(&options(None, dir.path().join("public")), &DisabledFinder);

        assert!(matches!(result, Err(AppError::Icon(IconError::InputNotFound(_)))));
        assert_eq!(exit_status(&result), EXIT_FAILURE);
    }

    #[test]
    fn undecodable_input_exits_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("logo.png");
        std::fs::write(&source, b"\x89PNG\r\n\x1a\ntruncated").expect("write");

        let result = run(&options(Some(source), dir.path().join("public")), &DisabledFinder);

        assert!(matches!(result, Err(AppError::Icon(IconError::Decode(_)))));
        assert_eq!(exit_status(&result), EXIT_FAILURE);
    }

    #[test]
    fn blocked_output_dir_exits_one() {
        let dir = tempfile::tempdir().expect("tempdir");
        let source = dir.path().join("logo.png");
        write_png(&source);
        let blocker = dir.path().join("public");
        std::fs::write(&blocker, b"not a directory").expect("write");

        let result = run(&options(Some(source), blocker), &DisabledFinder);

        assert!(matches!(result, Err(AppError::Icon(IconError::Write { .. }))));
        assert_eq!(exit_status(&result), EXIT_FAILURE);
    }

    #[test]
    fn discovered_candidate_is_used_and_exits_zero() {
        let dir = tempfile::tempdir().expect("tempdir");
        let candidate = dir.path().join("downloaded-logo.png");
        write_png(&candidate);
        let public = dir.path().join("public");

        let result = run(&options(None, public.clone()), &FixedFinder(candidate.clone()));

        assert_eq!(exit_status(&result), EXIT_SUCCESS);
        let report = result.expect("run should succeed");
        assert_eq!(report.source, candidate);
        assert!(public.join("pwa-192x192.png").is_file());
        assert!(public.join("pwa-512x512.png").is_file());
    }
}
