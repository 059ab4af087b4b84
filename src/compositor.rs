use crate::error::{WatermarkError, WatermarkResult};
use crate::position::{paste_offset, Corner};
use crate::progress::ProgressSink;
use image::{ColorType, DynamicImage, ImageFormat, ImageResult, RgbaImage};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::Builder;

/// Result of watermarking one file. `error` is `None` on success.
#[derive(Debug)]
pub struct FileOutcome {
    pub path: PathBuf,
    pub error: Option<WatermarkError>,
}

impl FileOutcome {
    pub fn ok(&self) -> bool {
        self.error.is_none()
    }
}

#[derive(Debug)]
pub struct BatchReport {
    pub result_dir: PathBuf,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }

    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| !o.ok())
    }
}

pub struct Compositor<'a> {
    watermark: &'a RgbaImage,
    corner: Corner,
}

impl<'a> Compositor<'a> {
    pub fn new(watermark: &'a RgbaImage, corner: Corner) -> Self {
        Self { watermark, corner }
    }

    /// Watermarks every file in place. A failing file is recorded and the
    /// loop moves on.
    pub fn composite_all(
        &self,
        files: &[PathBuf],
        progress: &mut dyn ProgressSink,
    ) -> Vec<FileOutcome> {
        let mut outcomes = Vec::with_capacity(files.len());

        for path in files {
            progress.start_file(path);
            let error = self.composite_file(path).err();
            if let Some(ref err) = error {
                tracing::warn!(path = %path.display(), error = %err, "skipping file");
            }
            let outcome = FileOutcome {
                path: path.clone(),
                error,
            };
            progress.finish_file(&outcome);
            outcomes.push(outcome);
        }

        outcomes
    }

    pub fn composite_file(&self, path: &Path) -> WatermarkResult<()> {
        let fail = |source| WatermarkError::Composite {
            path: path.to_path_buf(),
            source,
        };

        let format = ImageFormat::from_path(path).map_err(fail)?;
        let original = image::open(path).map_err(fail)?;
        let color = original.color();
        let mut canvas = original.to_rgba8();
        drop(original);

        let (x, y) = paste_offset(
            self.watermark.width(),
            self.watermark.height(),
            canvas.width(),
            canvas.height(),
            self.corner,
        );
        paste_with_mask(&mut canvas, self.watermark, x, y);

        save_in_place(&restore_color(canvas, color), path, format).map_err(fail)
    }
}

/// Pastes `overlay` at `(x, y)`, using its alpha as the blend mask for all
/// four channels. Pixels falling outside `canvas` are clipped.
pub fn paste_with_mask(canvas: &mut RgbaImage, overlay: &RgbaImage, x: i64, y: i64) {
    let (cw, ch) = (i64::from(canvas.width()), i64::from(canvas.height()));

    for (ox, oy, src) in overlay.enumerate_pixels() {
        let tx = x + i64::from(ox);
        let ty = y + i64::from(oy);
        if tx < 0 || ty < 0 || tx >= cw || ty >= ch {
            continue;
        }

        let dst = canvas.get_pixel_mut(tx as u32, ty as u32);
        let mask = u16::from(src[3]);
        for c in 0..4 {
            let blended = u16::from(src[c]) * mask + u16::from(dst[c]) * (255 - mask);
            dst[c] = ((blended + 127) / 255) as u8;
        }
    }
}

fn restore_color(canvas: RgbaImage, color: ColorType) -> DynamicImage {
    let rgba = DynamicImage::ImageRgba8(canvas);
    match color {
        ColorType::L8 => DynamicImage::ImageLuma8(rgba.to_luma8()),
        ColorType::La8 => DynamicImage::ImageLumaA8(rgba.to_luma_alpha8()),
        ColorType::Rgb8 => DynamicImage::ImageRgb8(rgba.to_rgb8()),
        ColorType::L16 => DynamicImage::ImageLuma16(rgba.to_luma16()),
        ColorType::La16 => DynamicImage::ImageLumaA16(rgba.to_luma_alpha16()),
        ColorType::Rgb16 => DynamicImage::ImageRgb16(rgba.to_rgb16()),
        ColorType::Rgba16 => DynamicImage::ImageRgba16(rgba.to_rgba16()),
        _ => rgba,
    }
}

/// Encodes into a sibling temp file, then renames it over `path`.
fn save_in_place(image: &DynamicImage, path: &Path, format: ImageFormat) -> ImageResult<()> {
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut tmp = Builder::new().prefix(".wm_batch").tempfile_in(dir)?;
    {
        let mut writer = BufWriter::new(tmp.as_file_mut());
        image.write_to(&mut writer, format)?;
        writer.flush()?;
    }

    fs::set_permissions(tmp.path(), fs::metadata(path)?.permissions())?;
    tmp.persist(path).map_err(|err| err.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressSink;
    use image::{Rgb, RgbImage, Rgba};
    use tempfile::tempdir;

    struct NoopProgress;
    impl ProgressSink for NoopProgress {}

    fn red_mark(width: u32, height: u32, alpha: u8) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([255, 0, 0, alpha]))
    }

    #[test]
    fn paste_blends_with_mask_and_clips() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 255]));
        paste_with_mask(&mut canvas, &red_mark(3, 3, 255), 2, -1);

        assert_eq!(canvas.get_pixel(2, 0), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(3, 1), &Rgba([255, 0, 0, 255]));
        assert_eq!(canvas.get_pixel(1, 0), &Rgba([0, 0, 255, 255]));
        assert_eq!(canvas.get_pixel(2, 2), &Rgba([0, 0, 255, 255]));

        let mut canvas = RgbaImage::from_pixel(1, 1, Rgba([0, 0, 0, 255]));
        paste_with_mask(&mut canvas, &red_mark(1, 1, 127), 0, 0);
        assert_eq!(canvas.get_pixel(0, 0)[0], 127);
    }

    #[test]
    fn empty_overlay_is_a_no_op() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([9, 9, 9, 255]));
        let before = canvas.clone();
        paste_with_mask(&mut canvas, &RgbaImage::new(0, 0), 0, 2);
        assert_eq!(canvas, before);
    }

    #[test]
    fn composites_bottom_left_and_keeps_color_type() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("photo.png");
        RgbImage::from_pixel(10, 8, Rgb([0, 255, 0])).save(&path).unwrap();

        let mark = red_mark(2, 2, 255);
        Compositor::new(&mark, Corner::BottomLeft)
            .composite_file(&path)
            .unwrap();

        let out = image::open(&path).unwrap();
        assert_eq!(out.color(), ColorType::Rgb8);
        let out = out.to_rgb8();
        assert_eq!(out.get_pixel(0, 7), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(1, 6), &Rgb([255, 0, 0]));
        assert_eq!(out.get_pixel(2, 7), &Rgb([0, 255, 0]));
        assert_eq!(out.get_pixel(0, 5), &Rgb([0, 255, 0]));
    }

    #[test]
    fn bad_files_become_failed_outcomes() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("a.png");
        let corrupt = dir.path().join("b.png");
        let text = dir.path().join("c.txt");
        RgbImage::new(4, 4).save(&good).unwrap();
        fs::write(&corrupt, b"not a png").unwrap();
        fs::write(&text, b"hello").unwrap();

        let mark = red_mark(1, 1, 255);
        let mut progress = NoopProgress;
        let outcomes = Compositor::new(&mark, Corner::TopLeft).composite_all(
            &[good.clone(), corrupt.clone(), text.clone()],
            &mut progress,
        );

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].ok());
        assert!(!outcomes[1].ok());
        assert!(!outcomes[2].ok());
        assert!(matches!(
            outcomes[1].error,
            Some(WatermarkError::Composite { .. })
        ));
        assert_eq!(fs::read(&corrupt).unwrap(), b"not a png");
        assert_eq!(fs::read(&text).unwrap(), b"hello");
    }
}
