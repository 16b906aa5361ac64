//! # 图标生成模块（icon_generator）
//!
//! ## 设计思路
//!
//! 将“候选发现 → 加载校验 → 解码 → 缩放合成 → 写盘”按职责拆分为多个子模块：
//!
//! - `finder`：未指定源图时的候选发现策略
//! - `generator`：编排整条处理流水线
//! - `loader`：文件存在性、体积与签名校验
//! - `pipeline`：解码、等比缩放、居中合成、PNG 编码
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! main.rs（参数解析）
//!    ↓
//! finder.rs（显式路径 / 目录扫描）
//!    ↓
//! generator.rs（统一编排 + 阶段耗时日志）
//!    ├─ loader.rs（读取 + 校验）
//!    ├─ pipeline.rs（解码 + 缩放 + 合成 + 编码）
//!    └─ assets::ensure_dir + 写盘
//!    ↓
//! GenerationReport / IconError
//! ```

mod config;
mod error;
pub mod finder;
mod generator;
mod loader;
pub mod pipeline;
mod source;

pub use config::{IconConfig, PWA_ICON_EDGES, TargetSpec};
pub use error::IconError;
pub use finder::{CandidateFinder, DirectoryScanFinder, DisabledFinder, locate_candidate_image};
pub use generator::IconGenerator;
pub use source::{GenerationReport, IconOutput, RenderedIcon, SourceImage};
