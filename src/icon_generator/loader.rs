//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 在解码之前尽早失败：存在性 → 体积 → 文件签名。
//! 不存在的路径统一归为 `InputNotFound`，签名不是图片的归为 `Decode`。

use std::path::Path;

use super::source::RawImageData;
use super::{IconError, IconGenerator};

impl IconGenerator {
    /// 从本地路径加载图片原始字节。
    pub(crate) fn load_from_file(&self, path: &Path) -> Result<RawImageData, IconError> {
        log::info!("📁 开始读取源图片 - 路径: {}", path.display());

        if !path.exists() {
            return Err(IconError::InputNotFound(format!(
                "文件不存在：{}",
                path.display()
            )));
        }

        let metadata = std::fs::metadata(path).map_err(|e| {
            IconError::InputNotFound(format!("无法读取文件信息 {}：{}", path.display(), e))
        })?;

        if !metadata.is_file() {
            return Err(IconError::InputNotFound(format!(
                "不是普通文件：{}",
                path.display()
            )));
        }

        if metadata.len() > self.config.max_file_size {
            return Err(IconError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                self.config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(path).map_err(|e| {
            IconError::InputNotFound(format!("无法读取图片文件 {}：{}", path.display(), e))
        })?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            path: path.to_path_buf(),
        })
    }

    /// 通过文件头魔数确认内容确实是图片，而不是改了扩展名的其他文件。
    ///
    /// `image` 能识别的格式一律放行；`infer` 只用于识别并拒绝非图片内容。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), IconError> {
        if bytes.is_empty() {
            return Err(IconError::Decode("图片内容为空".to_string()));
        }

        if let Ok(format) = image::guess_format(bytes) {
            log::debug!("文件签名识别为 {:?}", format);
            return Ok(());
        }

        match infer::get(bytes) {
            Some(kind) if kind.matcher_type() == infer::MatcherType::Image => {
                log::debug!("文件签名识别为 {}", kind.mime_type());
                Ok(())
            }
            Some(kind) => Err(IconError::Decode(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            ))),
            None => Err(IconError::Decode("无法识别图片类型".to_string())),
        }
    }
}
