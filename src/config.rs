use crate::position::Corner;
use std::path::PathBuf;

/// Parameters as supplied by a front end. Nothing here has been checked yet;
/// `validation::validate` turns it into [`Settings`].
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub watermark: PathBuf,
    pub target: PathBuf,
    pub result: PathBuf,
    pub position: Option<String>,
    pub size: Option<(u32, u32)>,
    pub size_percent: Option<u32>,
    pub transparency: Option<u32>,
    pub quiet: bool,
}

impl Config {
    pub fn new(
        watermark: impl Into<PathBuf>,
        target: impl Into<PathBuf>,
        result: impl Into<PathBuf>,
    ) -> Self {
        Self {
            watermark: watermark.into(),
            target: target.into(),
            result: result.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resize {
    Native,
    Exact(u32, u32),
    Percent(u32),
}

/// A config that passed validation, with every default resolved.
#[derive(Debug, Clone)]
pub struct Settings {
    pub watermark: PathBuf,
    pub target: PathBuf,
    pub result_parent: PathBuf,
    pub corner: Corner,
    pub resize: Resize,
    pub transparency: u32,
}

pub const OPAQUE: u32 = 100;
