//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将流水线各阶段的产物拆成独立类型：
//! - `RawImageData` 表示已读取但未解码的字节
//! - `SourceImage` 表示已解码、统一为 RGBA 的源图
//! - `RenderedIcon` 表示已合成并编码好的单个图标
//! - `GenerationReport` 汇总一次生成的结果，可序列化输出

use std::path::PathBuf;

use image::RgbaImage;
use serde::Serialize;

use super::TargetSpec;

/// 加载阶段输出：原始字节与来源路径。
pub(crate) struct RawImageData {
    pub(crate) bytes: Vec<u8>,
    pub(crate) path: PathBuf,
}

/// 解码后的源图。
///
/// 生成期间只读，两个目标都处理完后即丢弃。
pub struct SourceImage {
    pub width: u32,
    pub height: u32,
    /// 解码时的原始颜色类型（例如 `Rgb8`、`Rgba8`）。
    pub color_type: image::ColorType,
    /// 统一转换后的 RGBA 像素。
    pub rgba: RgbaImage,
}

impl SourceImage {
    /// 原始颜色类型是否自带透明通道。
    pub fn had_alpha(&self) -> bool {
        self.color_type.has_alpha()
    }
}

/// 合成阶段输出：已编码的 PNG 与排版信息。
pub struct RenderedIcon {
    pub target: TargetSpec,
    /// 缩放后内容的宽高。
    pub content_size: (u32, u32),
    /// 内容左上角在画布中的偏移。
    pub offset: (u32, u32),
    /// PNG 编码结果。
    pub png: Vec<u8>,
}

/// 单个输出文件的摘要。
#[derive(Debug, Clone, Serialize)]
pub struct IconOutput {
    pub path: PathBuf,
    pub edge: u32,
    pub content_width: u32,
    pub content_height: u32,
    pub offset_x: u32,
    pub offset_y: u32,
    pub bytes: usize,
}

/// 一次生成的结果摘要。
#[derive(Debug, Clone, Serialize)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub source_width: u32,
    pub source_height: u32,
    pub source_color: String,
    pub outputs: Vec<IconOutput>,
    pub elapsed_ms: u128,
}
