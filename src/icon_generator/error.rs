//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 图标生成链路上的所有失败都归入单一错误枚举，调用侧可按分支匹配，
//! 命令行层再统一映射为非零退出码。
//! 通过 `thiserror` 保持人类可读错误。

use std::path::PathBuf;

/// 图标生成统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// 未提供路径且未发现候选图片，或给定路径不存在。
    #[error("找不到输入图片：{0}")]
    InputNotFound(String),

    /// 文件存在，但不是受支持或有效的图片。
    #[error("解码错误：{0}")]
    Decode(String),

    /// 输出目录不可写或写盘失败。
    #[error("写入 {path} 失败：{source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 内存中的 PNG 编码失败，与输出路径无关。
    #[error("PNG 编码失败（{file_name}）：{source}")]
    Encode {
        file_name: String,
        #[source]
        source: image::ImageError,
    },

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("配置错误：{0}")]
    InvalidConfig(String),
}

impl IconError {
    /// 稳定的错误类别名，供日志与 JSON 输出使用。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "input_not_found",
            Self::Decode(_) => "decode",
            Self::Write { .. } => "write",
            Self::Encode { .. } => "encode",
            Self::ResourceLimit(_) => "resource_limit",
            Self::InvalidConfig(_) => "invalid_config",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_error_mentions_path_and_source() {
        let err = IconError::Write {
            path: PathBuf::from("/readonly/pwa-192x192.png"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };

        let message = err.to_string();
        assert!(message.contains("/readonly/pwa-192x192.png"));
        assert!(message.contains("denied"));
        assert_eq!(err.kind(), "write");
    }

    #[test]
    fn kind_is_stable_per_variant() {
        assert_eq!(IconError::InputNotFound("x".into()).kind(), "input_not_found");
        assert_eq!(IconError::Decode("x".into()).kind(), "decode");
        assert_eq!(IconError::ResourceLimit("x".into()).kind(), "resource_limit");
        assert_eq!(IconError::InvalidConfig("x".into()).kind(), "invalid_config");
        let encode = IconError::Encode {
            file_name: "pwa-512x512.png".into(),
            source: image::ImageError::Limits(image::error::LimitError::from_kind(
                image::error::LimitErrorKind::InsufficientMemory,
            )),
        };
        assert_eq!(encode.kind(), "encode");
        assert!(encode.to_string().contains("pwa-512x512.png"));
    }
}
