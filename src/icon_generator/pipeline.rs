//! # 解码与合成流水线模块
//!
//! ## 设计思路
//!
//! 将与图像库打交道的部分收敛为四个窄接口，编排层只负责按顺序调用：
//! - `decode`：字节 → RGBA 源图
//! - `resize_to_fit`：等比缩放到目标边长以内（只缩不放）
//! - `composite_centered`：居中贴到透明正方形画布
//! - `encode_png`：画布 → PNG 字节
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸，按像素上限快速拒绝
//! 2. 完整解码并统一转换为 RGBA，保证合成时透明度不丢失
//! 3. 缩放优先走 `fast_image_resize`（预乘 alpha），失败时回退 `image::imageops::resize`
//! 4. 偏移量按 `(edge - size) / 2` 向下取整
//! 5. PNG 使用固定的压缩参数，保证同一输入多次运行输出字节一致
//!
//! ## 合成语义
//!
//! 合成使用标准 “over” 运算（`imageops::overlay`）。画布全透明时，结果就是
//! 缩放后内容本身：半透明像素保留原颜色与原 alpha，例如 `(0,0,0,128)` 仍为
//! `(0,0,0,128)`。逐通道按遮罩插值的做法会把透明底色混进颜色并把 alpha
//! 平方衰减（得到 `(127,127,127,64)`），这里不采用。

use fast_image_resize as fr;
use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{GenericImageView, ImageReader, Rgba, RgbaImage};
use std::io::Cursor;

use super::source::{RawImageData, RenderedIcon, SourceImage};
use super::{IconError, IconGenerator, TargetSpec};

/// 计算等比缩放后的尺寸：宽高都不超过 `edge`，且不超过原图。
///
/// 缩放维度在向下/向上取整之间选择更接近原始宽高比的一个，最小为 1 像素。
pub fn fit_within(width: u32, height: u32, edge: u32) -> (u32, u32) {
    if width == 0 || height == 0 {
        return (width.min(edge), height.min(edge));
    }

    let box_width = edge.min(width);
    let box_height = edge.min(height);
    if box_width == width && box_height == height {
        return (width, height);
    }

    let aspect = width as f64 / height as f64;
    if box_width as f64 / box_height as f64 >= aspect {
        let fitted = round_aspect(box_height as f64 * aspect, |n| {
            (aspect - n / box_height as f64).abs()
        });
        (fitted, box_height)
    } else {
        let fitted = round_aspect(box_width as f64 / aspect, |n| {
            if n == 0.0 {
                0.0
            } else {
                (aspect - box_width as f64 / n).abs()
            }
        });
        (box_width, fitted)
    }
}

/// 在 floor/ceil 中取误差更小者，平局取 floor。
fn round_aspect(value: f64, error: impl Fn(f64) -> f64) -> u32 {
    let floor = value.floor();
    let ceil = value.ceil();
    let picked = if error(ceil) < error(floor) { ceil } else { floor };
    (picked as u32).max(1)
}

/// 内容在画布中居中时左上角的偏移（向下取整）。
pub fn centered_offset(edge: u32, content: (u32, u32)) -> (u32, u32) {
    (
        edge.saturating_sub(content.0) / 2,
        edge.saturating_sub(content.1) / 2,
    )
}

/// 新建 `edge × edge` 的全透明画布，并以内容自身 alpha 为遮罩居中合成。
pub fn composite_centered(content: &RgbaImage, edge: u32) -> (RgbaImage, (u32, u32)) {
    let mut canvas = RgbaImage::from_pixel(edge, edge, Rgba([0, 0, 0, 0]));
    let offset = centered_offset(edge, content.dimensions());
    image::imageops::overlay(&mut canvas, content, i64::from(offset.0), i64::from(offset.1));
    (canvas, offset)
}

/// 以固定参数编码 PNG。
pub fn encode_png(canvas: &RgbaImage) -> image::ImageResult<Vec<u8>> {
    let mut png = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut png, CompressionType::Best, PngFilterType::Adaptive);
    canvas.write_with_encoder(encoder)?;
    Ok(png)
}

impl IconGenerator {
    /// 将原始字节解码为 RGBA 源图。
    pub(crate) fn decode(&self, raw: RawImageData) -> Result<SourceImage, IconError> {
        let format = image::guess_format(&raw.bytes)
            .map_err(|e| IconError::Decode(format!("不支持的图片格式：{}", e)))?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        self.validate_pixel_limits(header_width, header_height)?;

        let decoded = image::load_from_memory_with_format(&raw.bytes, format)
            .map_err(|e| IconError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(IconError::Decode(format!("图片尺寸无效：{}x{}", width, height)));
        }
        self.validate_pixel_limits(width, height)?;

        let color_type = decoded.color();
        log::info!(
            "✓ 已解码图片 - 路径: {} 尺寸: {}x{} 格式: {:?} 颜色: {:?}",
            raw.path.display(),
            width,
            height,
            format,
            color_type
        );
        if !color_type.has_alpha() {
            log::debug!("源图不含透明通道，转换为 RGBA");
        }

        Ok(SourceImage {
            width,
            height,
            color_type,
            rgba: decoded.to_rgba8(),
        })
    }

    /// 仅通过图片头信息读取宽高，用于完整解码前的像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), IconError> {
        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| IconError::Decode(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| IconError::Decode(format!("无法读取图片尺寸：{}", e)))
    }

    fn validate_pixel_limits(&self, width: u32, height: u32) -> Result<(), IconError> {
        let pixels = u64::from(width)
            .checked_mul(u64::from(height))
            .ok_or_else(|| IconError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > self.config.max_decoded_pixels {
            return Err(IconError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, self.config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    /// 等比缩放到 `edge` 以内；原图已经足够小时直接复制，不做放大。
    pub(crate) fn resize_to_fit(&self, source: &RgbaImage, edge: u32) -> RgbaImage {
        let (width, height) = source.dimensions();
        let (target_width, target_height) = fit_within(width, height, edge);

        if (target_width, target_height) == (width, height) {
            return source.clone();
        }

        log::debug!(
            "缩放：{}x{} -> {}x{}（filter={:?}）",
            width,
            height,
            target_width,
            target_height,
            self.config.resize_filter
        );

        match Self::resize_with_fast_image_resize(
            source,
            target_width,
            target_height,
            self.config.resize_filter,
        ) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!("⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}", err);
                image::imageops::resize(
                    source,
                    target_width,
                    target_height,
                    self.config.resize_filter,
                )
            }
        }
    }

    fn resize_with_fast_image_resize(
        source: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RgbaImage, IconError> {
        let (src_width, src_height) = source.dimensions();

        let src_image = fr::images::Image::from_vec_u8(
            src_width,
            src_height,
            source.as_raw().clone(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| IconError::Decode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new()
            .resize_alg(fr::ResizeAlg::Convolution(Self::to_fast_filter(filter)));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| IconError::Decode(format!("fast_image_resize 执行失败：{}", e)))?;

        RgbaImage::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| IconError::Decode("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_filter(filter: FilterType) -> fr::FilterType {
        match filter {
            FilterType::Nearest => fr::FilterType::Box,
            FilterType::Triangle => fr::FilterType::Bilinear,
            FilterType::CatmullRom => fr::FilterType::CatmullRom,
            FilterType::Gaussian => fr::FilterType::Mitchell,
            FilterType::Lanczos3 => fr::FilterType::Lanczos3,
        }
    }

    /// 为单个目标生成图标：缩放 → 合成 → 编码。
    pub(crate) fn render(
        &self,
        source: &SourceImage,
        target: &TargetSpec,
    ) -> Result<RenderedIcon, IconError> {
        let content = self.resize_to_fit(&source.rgba, target.edge);
        let content_size = content.dimensions();
        let (canvas, offset) = composite_centered(&content, target.edge);

        let png = encode_png(&canvas).map_err(|source| IconError::Encode {
            file_name: target.file_name.clone(),
            source,
        })?;

        log::info!(
            "📐 已生成 {} - 内容 {}x{} 偏移 ({}, {})",
            target.file_name,
            content_size.0,
            content_size.1,
            offset.0,
            offset.1
        );

        Ok(RenderedIcon {
            target: target.clone(),
            content_size,
            offset,
            png,
        })
    }
}
