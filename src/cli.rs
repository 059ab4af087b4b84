use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use wm_batch::Config;

#[derive(Parser, Debug)]
#[command(
    name = "wm-batch",
    version,
    about = "Adds a watermark to every image in a folder, writing the results into a timestamped copy."
)]
pub struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        required_unless_present = "interactive",
        help = "Watermark image (.png, .jpg, .webp, .ppm, .tiff, .gif or .bmp)"
    )]
    pub watermark: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "DIR",
        required_unless_present = "interactive",
        help = "Folder whose images receive the watermark; it is never modified"
    )]
    pub target: Option<PathBuf>,

    #[arg(
        short,
        long,
        value_name = "DIR",
        default_value = ".",
        help = "Folder in which the timestamped result folder is created"
    )]
    pub result: PathBuf,

    #[arg(
        short,
        long,
        value_name = "CORNER",
        help = "Corner to place the watermark in: TL, TR, BL or BR [default: BL]"
    )]
    pub position: Option<String>,

    #[arg(
        short,
        long,
        num_args = 2,
        value_names = ["WIDTH", "HEIGHT"],
        conflicts_with = "size_percent",
        help = "Resize the watermark to exactly WIDTH x HEIGHT pixels"
    )]
    pub size: Option<Vec<u32>>,

    #[arg(
        long = "size-percent",
        value_name = "PERCENT",
        help = "Resize the watermark to PERCENT of its own size"
    )]
    pub size_percent: Option<u32>,

    #[arg(
        long,
        value_name = "PERCENT",
        help = "Watermark opacity between 1 and 100 [default: 100]"
    )]
    pub transparency: Option<u32>,

    #[arg(short, long, help = "Ask for every parameter instead of reading flags")]
    pub interactive: bool,

    #[arg(
        short,
        long,
        conflicts_with = "verbose",
        help = "Only print warnings and errors"
    )]
    pub quiet: bool,

    #[arg(short, long, help = "Print per-file details")]
    pub verbose: bool,

    #[arg(long = "json-logs", help = "Write logs as JSON lines")]
    pub json_logs: bool,

    #[arg(
        long = "fail-on-error",
        help = "Exit with status 1 when any file could not be watermarked"
    )]
    pub fail_on_error: bool,
}

impl Cli {
    pub fn into_config(self) -> Result<Config> {
        let size = match self.size.as_deref() {
            Some([w, h]) => Some((*w, *h)),
            Some(_) => anyhow::bail!("--size takes exactly two values"),
            None => None,
        };

        Ok(Config {
            watermark: self.watermark.context("missing --watermark")?,
            target: self.target.context("missing --target")?,
            result: self.result,
            position: self.position,
            size,
            size_percent: self.size_percent,
            transparency: self.transparency,
            quiet: self.quiet,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "wm-batch", "-w", "sign.png", "-t", "photos", "-r", "out", "-p", "TR", "-s", "40",
            "20", "--transparency", "50",
        ])
        .unwrap();
        let config = cli.into_config().unwrap();
        assert_eq!(config.watermark, PathBuf::from("sign.png"));
        assert_eq!(config.result, PathBuf::from("out"));
        assert_eq!(config.position.as_deref(), Some("TR"));
        assert_eq!(config.size, Some((40, 20)));
        assert_eq!(config.transparency, Some(50));
    }

    #[test]
    fn size_modes_conflict() {
        let err = Cli::try_parse_from([
            "wm-batch", "-w", "a.png", "-t", "b", "-s", "1", "1", "--size-percent", "5",
        ])
        .unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn paths_not_required_when_interactive() {
        let cli = Cli::try_parse_from(["wm-batch", "--interactive"]).unwrap();
        assert!(cli.interactive);
        assert!(Cli::try_parse_from(["wm-batch", "-q"]).is_err());
    }
}
