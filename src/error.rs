use image::ImageError;
use std::fmt;
use std::path::PathBuf;

pub type WatermarkResult<T> = Result<T, WatermarkError>;

#[derive(thiserror::Error, Debug)]
pub enum WatermarkError {
    #[error("invalid configuration: {0}")]
    Configuration(ValidationErrors),

    #[error("failed to copy {source_dir:?} into {destination:?}: {source}")]
    Snapshot {
        source_dir: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk directory {root:?}: {source}")]
    Enumerate {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to load watermark {path:?}: {source}")]
    Watermark {
        path: PathBuf,
        #[source]
        source: ImageError,
    },

    #[error("failed to watermark {path:?}: {source}")]
    Composite {
        path: PathBuf,
        #[source]
        source: ImageError,
    },
}

/// Every reason a config was rejected, in the order the checks ran.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<String>);

impl ValidationErrors {
    pub fn push(&mut self, reason: impl Into<String>) {
        self.0.push(reason.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn reasons(&self) -> &[String] {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("; "))
    }
}

impl From<ValidationErrors> for WatermarkError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Configuration(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_lists_every_reason() {
        let mut errors = ValidationErrors::default();
        errors.push("first");
        errors.push("second");
        let err = WatermarkError::from(errors);
        assert_eq!(err.to_string(), "invalid configuration: first; second");
    }

    #[test]
    fn snapshot_preserves_source() {
        let err = WatermarkError::Snapshot {
            source_dir: PathBuf::from("a"),
            destination: PathBuf::from("b"),
            source: std::io::Error::other("disk full"),
        };
        assert!(err.to_string().contains("disk full"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
