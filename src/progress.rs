use crate::compositor::{BatchReport, FileOutcome};
use std::path::Path;

pub trait ProgressSink {
    fn start_snapshot(&mut self, _destination: &Path) {}
    fn start_batch(&mut self, _total_files: usize) {}
    fn start_file(&mut self, _path: &Path) {}
    fn finish_file(&mut self, _outcome: &FileOutcome) {}
    fn finish(&mut self, _report: &BatchReport) {}
}

/// Reports each pipeline step through `tracing`.
pub struct ProgressReporter {
    enabled: bool,
    total_files: usize,
    processed_files: usize,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            total_files: 0,
            processed_files: 0,
        }
    }
}

impl ProgressSink for ProgressReporter {
    fn start_snapshot(&mut self, destination: &Path) {
        if !self.enabled {
            return;
        }
        tracing::info!(destination = %destination.display(), "copying target folder");
    }

    fn start_batch(&mut self, total_files: usize) {
        self.total_files = total_files;
        if !self.enabled {
            return;
        }
        tracing::info!(files = total_files, "adding watermarks");
    }

    fn start_file(&mut self, path: &Path) {
        if !self.enabled {
            return;
        }
        tracing::debug!(
            index = self.processed_files + 1,
            total = self.total_files,
            path = %path.display(),
            "processing file"
        );
    }

    fn finish_file(&mut self, outcome: &FileOutcome) {
        self.processed_files += 1;
        if !self.enabled || !outcome.ok() {
            return;
        }
        tracing::info!(
            index = self.processed_files,
            total = self.total_files,
            path = %outcome.path.display(),
            "added watermark"
        );
    }

    fn finish(&mut self, report: &BatchReport) {
        if !self.enabled {
            return;
        }
        tracing::info!(
            watermarked = report.succeeded(),
            skipped = report.failed(),
            result_dir = %report.result_dir.display(),
            "done"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn outcomes() -> Vec<FileOutcome> {
        vec![
            FileOutcome {
                path: PathBuf::from("a.png"),
                error: None,
            },
            FileOutcome {
                path: PathBuf::from("b.png"),
                error: Some(crate::error::WatermarkError::Composite {
                    path: PathBuf::from("b.png"),
                    source: image::ImageError::IoError(io::Error::other("boom")),
                }),
            },
        ]
    }

    #[test]
    fn counts_processed_files() {
        let mut reporter = ProgressReporter::new(false);
        reporter.start_batch(2);
        for outcome in outcomes() {
            reporter.finish_file(&outcome);
        }
        assert_eq!(reporter.total_files, 2);
        assert_eq!(reporter.processed_files, 2);
    }

    #[test]
    fn summary_uses_report_counts() {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        let report = BatchReport {
            result_dir: PathBuf::from("out/20250101000000"),
            outcomes: outcomes(),
        };
        // No finish_file calls: the summary must not depend on the reporter's counters.
        let mut reporter = ProgressReporter::new(true);
        tracing::subscriber::with_default(subscriber, || reporter.finish(&report));

        let logged = String::from_utf8(captured.0.lock().unwrap().clone()).unwrap();
        assert!(logged.contains("watermarked=1"), "{logged}");
        assert!(logged.contains("skipped=1"), "{logged}");
        assert!(logged.contains("20250101000000"), "{logged}");
    }
}
