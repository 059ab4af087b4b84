pub mod compositor;
pub mod config;
pub mod error;
pub mod loader;
pub mod position;
pub mod progress;
pub mod prompt;
mod scanner;
mod snapshot;
pub mod validation;

pub use compositor::{BatchReport, FileOutcome};
pub use config::{Config, Resize, Settings};
pub use error::{ValidationErrors, WatermarkError, WatermarkResult};
pub use position::Corner;
pub use progress::{ProgressReporter, ProgressSink};

use chrono::{Local, NaiveDateTime};

pub fn run(config: Config) -> WatermarkResult<BatchReport> {
    let mut progress = progress::ProgressReporter::new(!config.quiet);
    run_with_progress(config, &mut progress)
}

pub fn run_with_progress(
    config: Config,
    progress: &mut dyn ProgressSink,
) -> WatermarkResult<BatchReport> {
    run_at(config, Local::now().naive_local(), progress)
}

/// Full pipeline with an explicit start time, which names the result folder.
pub fn run_at(
    config: Config,
    started: NaiveDateTime,
    progress: &mut dyn ProgressSink,
) -> WatermarkResult<BatchReport> {
    let settings = validation::validate(&config)?;
    execute_pipeline(&settings, started, progress)
}

fn execute_pipeline(
    settings: &Settings,
    started: NaiveDateTime,
    progress: &mut dyn ProgressSink,
) -> WatermarkResult<BatchReport> {
    let name = snapshot::result_dir_name(started);
    progress.start_snapshot(&settings.result_parent.join(&name));
    let result_dir = snapshot::create_snapshot(&settings.target, &settings.result_parent, &name)?;

    let files = scanner::collect_files(&result_dir)?;
    let watermark =
        loader::load_watermark(&settings.watermark, settings.resize, settings.transparency)?;

    progress.start_batch(files.len());
    let outcomes = compositor::Compositor::new(&watermark, settings.corner)
        .composite_all(&files, progress);

    let report = BatchReport {
        result_dir,
        outcomes,
    };
    progress.finish(&report);
    Ok(report)
}
