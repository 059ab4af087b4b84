use crate::config::{Resize, OPAQUE};
use crate::error::{WatermarkError, WatermarkResult};
use image::error::{LimitError, LimitErrorKind};
use image::imageops::FilterType;
use image::{ImageError, RgbaImage};
use std::path::Path;

/// Largest watermark, in pixels, the resampler is asked to produce.
pub const MAX_WATERMARK_PIXELS: u64 = 1 << 26;

pub fn load_watermark(path: &Path, resize: Resize, transparency: u32) -> WatermarkResult<RgbaImage> {
    let fail = |source| WatermarkError::Watermark {
        path: path.to_path_buf(),
        source,
    };
    let decoded = image::open(path).map_err(fail)?;
    let mut watermark = resize_watermark(decoded.to_rgba8(), resize).map_err(fail)?;
    tracing::debug!(
        path = %path.display(),
        width = watermark.width(),
        height = watermark.height(),
        "watermark decoded"
    );

    set_alpha(&mut watermark, alpha_level(transparency));
    Ok(watermark)
}

fn resize_watermark(image: RgbaImage, resize: Resize) -> Result<RgbaImage, ImageError> {
    let (width, height) = match resize {
        Resize::Native => return Ok(image),
        Resize::Exact(w, h) => (w, h),
        Resize::Percent(pct) => (scale(image.width(), pct)?, scale(image.height(), pct)?),
    };

    if (width, height) == image.dimensions() {
        return Ok(image);
    }
    if width == 0 || height == 0 {
        tracing::warn!(width, height, "watermark resized to an empty image");
        return Ok(RgbaImage::new(width, height));
    }
    if u64::from(width) * u64::from(height) > MAX_WATERMARK_PIXELS {
        return Err(too_large());
    }
    Ok(image::imageops::resize(&image, width, height, FilterType::Lanczos3))
}

fn scale(dimension: u32, pct: u32) -> Result<u32, ImageError> {
    u32::try_from(u64::from(dimension) * u64::from(pct) / 100).map_err(|_| too_large())
}

fn too_large() -> ImageError {
    ImageError::Limits(LimitError::from_kind(LimitErrorKind::DimensionError))
}

pub fn alpha_level(transparency: u32) -> u8 {
    if transparency < OPAQUE {
        (255 * transparency / 100) as u8
    } else {
        u8::MAX
    }
}

fn set_alpha(image: &mut RgbaImage, alpha: u8) {
    for px in image.pixels_mut() {
        px[3] = alpha;
    }
}
