//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 定义应用级 `AppError`，命令行入口统一返回它，再映射为退出码。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `IconError` 提供 `From` 转换，无需手动 map。
//! - 实现 `Serialize` 将错误序列化为字符串，供 `--json` 输出。

use serde::Serialize;

use crate::icon_generator::IconError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图标生成流水线错误（查找 / 解码 / 写盘）
    #[error("{0}")]
    Icon(#[from] IconError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 结果输出失败
    #[error("结果序列化失败: {0}")]
    Report(#[from] serde_json::Error),
}

impl AppError {
    /// 错误类别名，与 `IconError::kind` 保持一致。
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Icon(err) => err.kind(),
            Self::Io(_) => "io",
            Self::Report(_) => "report",
        }
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
