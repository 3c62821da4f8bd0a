use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    analysis::shadow_factor::{ShadowFactorAnalyzer, ShadowFactorSummary},
    error::FailureKind,
};

/// Raster formats the batch tool is meant to be fed.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "tiff"];

pub fn has_supported_extension<P: AsRef<Path>>(path: P) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(ext))
        })
        .unwrap_or(false)
}

/// Last path component, falling back to the whole path when there is none.
pub fn file_name_of<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreFailure {
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreRecord {
    pub file_name: String,
    pub path: PathBuf,
    pub outcome: std::result::Result<ShadowFactorSummary, ScoreFailure>,
}

impl ScoreRecord {
    pub fn score(&self) -> Option<f64> {
        self.outcome
            .as_ref()
            .ok()
            .map(|summary| summary.combined_shadow_factor)
    }

    pub fn failure(&self) -> Option<&ScoreFailure> {
        self.outcome.as_ref().err()
    }

    /// User-facing notice for a failed record.
    pub fn notice(&self) -> Option<String> {
        self.failure().map(|failure| match failure.kind {
            FailureKind::FileNotFound => {
                format!("Error: Image file not found at {}", self.path.display())
            }
            FailureKind::DecodeOrProcessing => format!(
                "Error processing image {}: {}",
                self.path.display(),
                failure.message
            ),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchOutcome {
    EmptySelection,
    AllFailed,
    Scored,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub records: Vec<ScoreRecord>,
}

impl BatchReport {
    pub fn successes(&self) -> impl Iterator<Item = (&str, f64)> {
        self.records
            .iter()
            .filter_map(|record| record.score().map(|score| (record.file_name.as_str(), score)))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScoreRecord> {
        self.records.iter().filter(|record| record.outcome.is_err())
    }

    pub fn outcome(&self) -> BatchOutcome {
        if self.records.is_empty() {
            BatchOutcome::EmptySelection
        } else if self.successes().next().is_none() {
            BatchOutcome::AllFailed
        } else {
            BatchOutcome::Scored
        }
    }
}

/// Scores every path in order. A failing image is recorded and the batch
/// moves on to the next one.
pub fn score_batch<I, P>(paths: I) -> BatchReport
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    let analyzer = ShadowFactorAnalyzer::new();
    let mut records = Vec::new();

    for path in paths {
        let path = path.as_ref();
        let file_name = file_name_of(path);

        let outcome = match analyzer.analyze_path(path) {
            Ok(result) => {
                log::info!(
                    "{}: CSF {:.2}",
                    file_name,
                    result.combined_shadow_factor
                );
                Ok(result.summary())
            }
            Err(e) => {
                log::warn!("Failed to score {}: {}", path.display(), e);
                Err(ScoreFailure {
                    kind: e.kind(),
                    message: e.to_string(),
                })
            }
        };

        records.push(ScoreRecord {
            file_name,
            path: path.to_path_buf(),
            outcome,
        });
    }

    if records.is_empty() {
        log::info!("No images selected");
    }

    BatchReport { records }
}
