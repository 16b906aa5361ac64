//! # PWA 图标生成工具 — 库入口
//!
//! 将一张 logo 图片等比缩放并居中贴到透明画布上，生成
//! `pwa-192x192.png` 与 `pwa-512x512.png` 两个 PWA 图标。
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`app`] | 命令行执行流程：确定源图、生成图标、映射退出码 |
//! | [`error`] | 应用级错误类型 `AppError`，命令行入口的返回类型 |
//! | [`icon_generator`] | 源图发现、加载校验、缩放合成与写盘 |
//! | [`assets`] | 公共静态资源目录的解析与创建 |

pub mod app;
pub mod assets;
pub mod error;
pub mod icon_generator;

pub use error::AppError;
pub use icon_generator::{IconConfig, IconError, IconGenerator};
