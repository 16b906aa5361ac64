//! # 候选图片发现模块
//!
//! ## 设计思路
//!
//! 未显式提供源图时，在少量固定目录中按启发式规则挑一张“像 logo”的图片。
//! 发现策略抽象为 `CandidateFinder`，测试或 `--no-scan` 时可直接替换为
//! `DisabledFinder`，不影响核心生成逻辑。
//!
//! 结果只是建议，调用方仍需经过加载与解码校验。

use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// 识别为候选图片的文件名后缀（小写比较）。
const CANDIDATE_SUFFIXES: [&str; 3] = [".png", ".jpg", ".jpeg"];
/// 小于等于该体积的文件视为缩略图。
const MIN_CANDIDATE_BYTES: u64 = 1024;
/// 大于等于该体积的文件视为无关大文件。
const MAX_CANDIDATE_BYTES: u64 = 10 * 1024 * 1024;

/// 候选图片发现策略。
pub trait CandidateFinder {
    fn find(&self) -> Option<PathBuf>;
}

/// 不做任何发现。
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledFinder;

impl CandidateFinder for DisabledFinder {
    fn find(&self) -> Option<PathBuf> {
        None
    }
}

/// 按顺序扫描目录，文件名倒序，取第一个体积在合理区间内的图片。
#[derive(Debug, Clone)]
pub struct DirectoryScanFinder {
    directories: Vec<PathBuf>,
}

impl DirectoryScanFinder {
    pub fn new(directories: Vec<PathBuf>) -> Self {
        Self { directories }
    }

    /// 默认扫描位置：用户下载目录，其次系统临时目录。
    pub fn default_locations() -> Self {
        let mut directories = Vec::new();
        if let Some(downloads) =
            dirs::download_dir().or_else(|| dirs::home_dir().map(|home| home.join("Downloads")))
        {
            directories.push(downloads);
        }
        directories.push(std::env::temp_dir());
        Self::new(directories)
    }

    fn scan_directory(dir: &Path) -> Option<PathBuf> {
        let entries = match std::fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log::debug!("跳过目录 {}：{}", dir.display(), err);
                return None;
            }
        };

        let mut names: Vec<OsString> = entries
            .flatten()
            .map(|entry| entry.file_name())
            .filter(|name| is_candidate_name(name))
            .collect();
        names.sort_unstable_by(|a, b| b.cmp(a));

        names.into_iter().map(|name| dir.join(name)).find(|path| {
            match std::fs::metadata(path) {
                Ok(metadata) if metadata.is_file() => {
                    let size = metadata.len();
                    size > MIN_CANDIDATE_BYTES && size < MAX_CANDIDATE_BYTES
                }
                _ => false,
            }
        })
    }
}

impl CandidateFinder for DirectoryScanFinder {
    fn find(&self) -> Option<PathBuf> {
        log::info!("🔍 正在搜索最近的图片...");
        for dir in &self.directories {
            if let Some(found) = Self::scan_directory(dir) {
                log::info!("找到候选图片: {}", found.display());
                return Some(found);
            }
        }
        None
    }
}

fn is_candidate_name(name: &OsStr) -> bool {
    let lower = name.to_string_lossy().to_lowercase();
    CANDIDATE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// 将开头的 `~` 展开为用户主目录。
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

/// 确定本次使用的源图。
///
/// 显式路径存在时直接返回；否则交给 `finder` 提供候选。
pub fn locate_candidate_image(
    explicit_path: Option<&Path>,
    finder: &dyn CandidateFinder,
) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        let expanded = expand_home(path);
        if expanded.exists() {
            return Some(expanded);
        }
        log::warn!("⚠️ 指定的图片不存在：{}，尝试自动搜索", expanded.display());
    }

    finder.find()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedFinder(PathBuf);

    impl CandidateFinder for FixedFinder {
        fn find(&self) -> Option<PathBuf> {
            Some(self.0.clone())
        }
    }

    fn write_sized(dir: &Path, name: &str, size: usize) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, vec![0u8; size]).expect("write");
        path
    }

    #[test]
    fn picks_last_name_within_size_range() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_sized(dir.path(), "a-logo.png", 4096);
        write_sized(dir.path(), "b-logo.jpg", 4096);
        write_sized(dir.path(), "c-logo.jpeg", 4096);

        let finder = DirectoryScanFinder::new(vec![dir.path().to_path_buf()]);
        assert_eq!(finder.find(), Some(dir.path().join("c-logo.jpeg")));
    }

    #[test]
    fn skips_thumbnails_and_non_images() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_sized(dir.path(), "z-notes.txt", 4096);
        write_sized(dir.path(), "y-thumb.png", 1024);
        let expected = write_sized(dir.path(), "x-logo.PNG", 1025);

        let finder = DirectoryScanFinder::new(vec![dir.path().to_path_buf()]);
        assert_eq!(finder.find(), Some(expected));
    }

    #[test]
    fn skips_oversized_files_and_directories() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_sized(dir.path(), "z-huge.png", 10 * 1024 * 1024);
        std::fs::create_dir(dir.path().join("y-folder.png")).expect("mkdir");
        let expected = write_sized(dir.path(), "a-logo.png", 2048);

        let finder = DirectoryScanFinder::new(vec![dir.path().to_path_buf()]);
        assert_eq!(finder.find(), Some(expected));
    }

    #[test]
    fn falls_through_to_next_directory() {
        let empty = tempfile::tempdir().expect("tempdir");
        let full = tempfile::tempdir().expect("tempdir");
        let expected = write_sized(full.path(), "logo.png", 2048);

        let finder = DirectoryScanFinder::new(vec![
            PathBuf::from("/nonexistent/downloads"),
            empty.path().to_path_buf(),
            full.path().to_path_buf(),
        ]);
        assert_eq!(finder.find(), Some(expected));
    }

    #[test]
    fn returns_none_when_nothing_matches() {
        let dir = tempfile::tempdir().expect("tempdir");
        write_sized(dir.path(), "tiny.png", 10);

        let finder = DirectoryScanFinder::new(vec![dir.path().to_path_buf()]);
        assert_eq!(finder.find(), None);
    }

    #[test]
    fn explicit_existing_path_wins() {
        let dir = tempfile::tempdir().expect("tempdir");
        let explicit = write_sized(dir.path(), "mine.png", 10);
        let finder = FixedFinder(PathBuf::from("/elsewhere/other.png"));

        assert_eq!(locate_candidate_image(Some(explicit.as_path()), &finder), Some(explicit.clone()));
    }

    #[test]
    fn missing_explicit_path_falls_back_to_finder() {
        let finder = FixedFinder(PathBuf::from("/elsewhere/other.png"));

        assert_eq!(
            locate_candidate_image(Some(Path::new("/nonexistent/path.png")), &finder),
            Some(PathBuf::from("/elsewhere/other.png"))
        );
        assert_eq!(
            locate_candidate_image(Some(Path::new("/nonexistent/path.png")), &DisabledFinder),
            None
        );
    }

    #[cfg(unix)]
    #[test]
    fn keeps_non_utf8_file_names() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempfile::tempdir().expect("tempdir");
        write_sized(dir.path(), "a-logo.png", 2048);
        let name = OsStr::from_bytes(b"z-\xff-logo.png");
        let expected = dir.path().join(name);
        std::fs::write(&expected, vec![0u8; 2048]).expect("write");

        let finder = DirectoryScanFinder::new(vec![dir.path().to_path_buf()]);
        assert_eq!(finder.find(), Some(expected));
    }

    #[test]
    fn explicit_directory_is_not_replaced_by_candidate() {
        let dir = tempfile::tempdir().expect("tempdir");
        let finder = FixedFinder(PathBuf::from("/elsewhere/other.png"));

        assert_eq!(
            locate_candidate_image(Some(dir.path()), &finder),
            Some(dir.path().to_path_buf())
        );
    }

    #[test]
    fn expand_home_only_touches_leading_tilde() {
        assert_eq!(expand_home(Path::new("/tmp/logo.png")), PathBuf::from("/tmp/logo.png"));
        assert_eq!(expand_home(Path::new("logo~.png")), PathBuf::from("logo~.png"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/logo.png")), home.join("logo.png"));
        }
    }
}
