use crate::config::{Config, Resize, Settings, OPAQUE};
use crate::error::ValidationErrors;
use crate::position::Corner;
use std::fs;
use std::path::Path;

/// Watermark extensions accepted, matched case-sensitively.
pub const WATERMARK_EXTENSIONS: [&str; 7] = ["png", "jpg", "webp", "ppm", "tiff", "gif", "bmp"];

/// Runs every check and collects all failures instead of stopping at the first.
pub fn validate(config: &Config) -> Result<Settings, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    check_watermark(&config.watermark, &mut errors);
    check_dir("target folder", &config.target, &mut errors);
    check_dir("result folder", &config.result, &mut errors);
    if config.target.is_dir() && config.result.is_dir() && is_within(&config.result, &config.target)
    {
        errors.push(format!(
            "result folder {:?} must not be inside the target folder {:?}",
            config.result, config.target
        ));
    }

    let corner = match config.position.as_deref() {
        None => Corner::default(),
        Some(code) => code.parse::<Corner>().unwrap_or_else(|reason: String| {
            errors.push(reason);
            Corner::default()
        }),
    };

    let resize = check_resize(config.size, config.size_percent, &mut errors);

    let transparency = match config.transparency {
        None => OPAQUE,
        Some(level) if (1..=OPAQUE).contains(&level) => level,
        Some(level) => {
            errors.push(format!(
                "transparency must be between 1 and 100, got {}",
                level
            ));
            OPAQUE
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Settings {
        watermark: config.watermark.clone(),
        target: config.target.clone(),
        result_parent: config.result.clone(),
        corner,
        resize,
        transparency,
    })
}

fn check_watermark(path: &Path, errors: &mut ValidationErrors) {
    if !path.is_file() {
        errors.push(format!("watermark {:?} is not an existing file", path));
    }

    let ext = path.extension().and_then(|e| e.to_str());
    if !ext.is_some_and(|e| WATERMARK_EXTENSIONS.contains(&e)) {
        errors.push(format!(
            "watermark {:?} must have one of the extensions .{}",
            path,
            WATERMARK_EXTENSIONS.join(", .")
        ));
    }
}

fn check_dir(label: &str, path: &Path, errors: &mut ValidationErrors) {
    if !path.is_dir() {
        errors.push(format!("{} {:?} is not an existing directory", label, path));
    }
}

fn check_resize(
    size: Option<(u32, u32)>,
    size_percent: Option<u32>,
    errors: &mut ValidationErrors,
) -> Resize {
    match (size, size_percent) {
        (Some(_), Some(_)) => {
            errors.push("size in pixels and size in percent are mutually exclusive");
            Resize::Native
        }
        (Some((w, h)), None) => {
            if w == 0 || h == 0 {
                errors.push(format!("size must be positive, got {}x{}", w, h));
            }
            Resize::Exact(w, h)
        }
        (None, Some(pct)) => {
            if pct == 0 {
                errors.push("size in percent must be at least 1");
            }
            Resize::Percent(pct)
        }
        (None, None) => Resize::Native,
    }
}

fn is_within(inner: &Path, outer: &Path) -> bool {
    let inner = fs::canonicalize(inner).unwrap_or_else(|_| inner.to_path_buf());
    let outer = fs::canonicalize(outer).unwrap_or_else(|_| outer.to_path_buf());
    inner.starts_with(outer)
}
