//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `IconGenerator` 只负责流程编排，不直接依赖命令行。
//! 处理链路固定为：
//! 1. 校验配置
//! 2. 读取并校验源文件
//! 3. 解码为 RGBA 源图
//! 4. 依次渲染每个目标（缩放 → 合成 → 编码），全部在内存完成
//! 5. 创建输出目录并逐个写盘
//!
//! ## 实现思路
//!
//! - 所有目标先渲染再写盘，解码或缩放失败时磁盘上不会留下任何文件。
//! - 写盘阶段失败不回滚已写入的文件。
//! - 记录 `load/decode/render/write/total` 阶段耗时，便于诊断。

use std::path::Path;
use std::time::Instant;

use super::source::{GenerationReport, IconOutput, RenderedIcon, SourceImage};
use super::{IconConfig, IconError};
use crate::assets;

/// 图标生成器。
pub struct IconGenerator {
    pub(super) config: IconConfig,
}

impl IconGenerator {
    /// 根据配置创建生成器，配置非法时直接返回错误。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use pwa_icons::icon_generator::{IconConfig, IconGenerator};
    ///
    /// let generator = IconGenerator::new(IconConfig::default())?;
    /// # Ok::<(), pwa_icons::icon_generator::IconError>(())
    /// ```
    pub fn new(config: IconConfig) -> Result<Self, IconError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 从文件加载并解码源图。
    pub fn open(&self, source_path: &Path) -> Result<SourceImage, IconError> {
        let raw = self.load_from_file(source_path)?;
        self.decode(raw)
    }

    /// 按配置中的目标顺序渲染全部图标，不触碰磁盘。
    pub fn render_all(&self, source: &SourceImage) -> Result<Vec<RenderedIcon>, IconError> {
        self.config
            .targets
            .iter()
            .map(|target| self.render(source, target))
            .collect()
    }

    /// 处理主入口：读取源图，生成全部图标并写入 `output_dir`。
    ///
    /// # 示例
    /// ```rust,ignore
    /// use pwa_icons::icon_generator::{IconConfig, IconGenerator};
    /// use std::path::Path;
    ///
    /// let generator = IconGenerator::new(IconConfig::default())?;
    /// generator.generate(Path::new("logo.png"), Path::new("public"))?;
    /// # Ok::<(), pwa_icons::icon_generator::IconError>(())
    /// ```
    pub fn generate(
        &self,
        source_path: &Path,
        output_dir: &Path,
    ) -> Result<GenerationReport, IconError> {
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_from_file(source_path)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let source = self.decode(raw)?;
        let decode_elapsed = decode_start.elapsed();

        let render_start = Instant::now();
        let rendered = self.render_all(&source)?;
        let render_elapsed = render_start.elapsed();

        let write_start = Instant::now();
        assets::ensure_dir(output_dir)?;
        let mut outputs = Vec::with_capacity(rendered.len());
        for icon in &rendered {
            outputs.push(Self::write_icon(icon, output_dir)?);
        }
        let write_elapsed = write_start.elapsed();

        let total_elapsed = total_start.elapsed();
        log::info!(
            "✅ 图标生成完成 - load={}ms decode={}ms render={}ms write={}ms total={}ms",
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            render_elapsed.as_millis(),
            write_elapsed.as_millis(),
            total_elapsed.as_millis()
        );

        Ok(GenerationReport {
            source: source_path.to_path_buf(),
            source_width: source.width,
            source_height: source.height,
            source_color: format!("{:?}", source.color_type),
            outputs,
            elapsed_ms: total_elapsed.as_millis(),
        })
    }

    /// 覆盖写入单个图标文件。
    fn write_icon(icon: &RenderedIcon, output_dir: &Path) -> Result<IconOutput, IconError> {
        let path = output_dir.join(&icon.target.file_name);
        std::fs::write(&path, &icon.png).map_err(|source| IconError::Write {
            path: path.clone(),
            source,
        })?;

        log::info!("✓ 已保存: {} ({} bytes)", path.display(), icon.png.len());

        Ok(IconOutput {
            path,
            edge: icon.target.edge,
            content_width: icon.content_size.0,
            content_height: icon.content_size.1,
            offset_x: icon.offset.0,
            offset_y: icon.offset.1,
            bytes: icon.png.len(),
        })
    }
}
