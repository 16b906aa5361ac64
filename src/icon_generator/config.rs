//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有可调策略集中到 `IconConfig`：输出目标列表、重采样滤镜与资源上限。
//! 目标尺寸是固定的 PWA 规格，其余参数主要用于测试与防御异常输入。
//!
//! ## 实现思路
//!
//! - `Default` 提供生产可用配置（192 / 512 两个目标，Lanczos3 滤镜）。
//! - `validate` 在生成前一次性校验，避免处理到一半才发现配置错误。

use std::collections::HashSet;

use image::imageops::FilterType;
use serde::Serialize;

use super::IconError;

/// PWA 规范要求的两个图标边长。
pub const PWA_ICON_EDGES: [u32; 2] = [192, 512];

/// 单个输出目标：正方形边长 + 输出文件名。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TargetSpec {
    /// 画布边长（像素）。
    pub edge: u32,
    /// 输出文件名（相对于输出目录）。
    pub file_name: String,
}

impl TargetSpec {
    /// 按 PWA 命名约定构造目标，例如 `pwa-192x192.png`。
    pub fn pwa(edge: u32) -> Self {
        Self {
            edge,
            file_name: format!("pwa-{edge}x{edge}.png"),
        }
    }
}

/// 图标生成配置。
#[derive(Debug, Clone)]
pub struct IconConfig {
    /// 依次生成的目标列表。
    pub targets: Vec<TargetSpec>,
    /// 缩放滤镜。
    pub resize_filter: FilterType,
    /// 允许读取的源文件最大体积（字节）。
    pub max_file_size: u64,
    /// 解码前按 header 尺寸拦截的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            targets: PWA_ICON_EDGES.iter().map(|&edge| TargetSpec::pwa(edge)).collect(),
            resize_filter: FilterType::Lanczos3,
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
        }
    }
}

impl IconConfig {
    /// 校验配置是否可用于生成。
    pub fn validate(&self) -> Result<(), IconError> {
        if self.targets.is_empty() {
            return Err(IconError::InvalidConfig("至少需要一个输出目标".to_string()));
        }

        let mut seen = HashSet::new();
        for target in &self.targets {
            if target.edge == 0 {
                return Err(IconError::InvalidConfig(format!(
                    "目标 {} 的边长不能为 0",
                    target.file_name
                )));
            }
            if target.file_name.is_empty()
                || target.file_name.contains('/')
                || target.file_name.contains('\\')
            {
                return Err(IconError::InvalidConfig(format!(
                    "非法的输出文件名：{:?}",
                    target.file_name
                )));
            }
            if !seen.insert(target.file_name.as_str()) {
                return Err(IconError::InvalidConfig(format!(
                    "输出文件名重复：{}",
                    target.file_name
                )));
            }
        }

        if self.max_file_size == 0 || self.max_decoded_pixels == 0 {
            return Err(IconError::InvalidConfig("资源上限必须大于 0".to_string()));
        }

        Ok(())
    }
}
