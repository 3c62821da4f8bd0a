pub mod table;

use serde::Serialize;

use crate::{
    batch::{BatchOutcome, BatchReport},
    error::FailureKind,
};

pub use table::{ReportConfig, ResultsTable};

pub const NO_IMAGES_SELECTED: &str = "No images selected.";
pub const NO_IMAGES_PROCESSED: &str = "No images processed successfully.";

/// What the user should see for a finished batch.
#[derive(Debug, Clone, PartialEq)]
pub enum Presentation {
    Table(ResultsTable),
    Notice(&'static str),
}

pub fn present(report: &BatchReport, config: &ReportConfig) -> Presentation {
    match report.outcome() {
        BatchOutcome::EmptySelection => Presentation::Notice(NO_IMAGES_SELECTED),
        BatchOutcome::AllFailed => Presentation::Notice(NO_IMAGES_PROCESSED),
        BatchOutcome::Scored => Presentation::Table(ResultsTable::from_report(report, config)),
    }
}

#[derive(Serialize)]
pub struct JsonReport {
    pub image_count: usize,
    pub scored_count: usize,
    pub results: Vec<ScoreSection>,
    pub failures: Vec<FailureSection>,
}

#[derive(Serialize)]
pub struct ScoreSection {
    pub file_name: String,
    pub combined_shadow_factor: f64,
    pub intensity_factor: f64,
    pub size_factor: f64,
    pub background_intensity: f64,
}

#[derive(Serialize)]
pub struct FailureSection {
    pub file_name: String,
    pub kind: FailureKind,
    pub message: String,
}

impl From<&BatchReport> for JsonReport {
    fn from(report: &BatchReport) -> Self {
        let mut results = Vec::new();
        let mut failures = Vec::new();

        for record in &report.records {
            match &record.outcome {
                Ok(summary) => results.push(ScoreSection {
                    file_name: record.file_name.clone(),
                    combined_shadow_factor: summary.combined_shadow_factor,
                    intensity_factor: summary.intensity_factor,
                    size_factor: summary.size_factor,
                    background_intensity: summary.background_intensity,
                }),
                Err(failure) => failures.push(FailureSection {
                    file_name: record.file_name.clone(),
                    kind: failure.kind,
                    message: failure.message.clone(),
                }),
            }
        }

        Self {
            image_count: report.records.len(),
            scored_count: results.len(),
            results,
            failures,
        }
    }
}

impl JsonReport {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::{
        analysis::shadow_factor::ShadowFactorSummary,
        batch::{ScoreFailure, ScoreRecord},
    };

    fn summary(csf: f64) -> ShadowFactorSummary {
        ShadowFactorSummary {
            background_intensity: 200.0,
            intensity_factor: 0.5,
            size_factor: csf / 50.0,
            shadow_pixel_count: 10,
            total_pixel_count: 100,
            combined_shadow_factor: csf,
        }
    }

    fn mixed_report() -> BatchReport {
        BatchReport {
            records: vec![
                ScoreRecord {
                    file_name: "a.png".into(),
                    path: PathBuf::from("dir/a.png"),
                    outcome: Ok(summary(7.5)),
                },
                ScoreRecord {
                    file_name: "b.png".into(),
                    path: PathBuf::from("dir/b.png"),
                    outcome: Err(ScoreFailure {
                        kind: FailureKind::DecodeOrProcessing,
                        message: "Image has no pixels".into(),
                    }),
                },
            ],
        }
    }

    #[test]
    fn test_present_empty() {
        let presentation = present(&BatchReport::default(), &ReportConfig::default());
        assert_eq!(presentation, Presentation::Notice(NO_IMAGES_SELECTED));
    }

    #[test]
    fn test_present_all_failed() {
        let mut report = mixed_report();
        report.records.remove(0);
        let presentation = present(&report, &ReportConfig::default());
        assert_eq!(presentation, Presentation::Notice(NO_IMAGES_PROCESSED));
    }

    #[test]
    fn test_present_table() {
        match present(&mixed_report(), &ReportConfig::default()) {
            Presentation::Table(table) => {
                assert_eq!(table.rows, vec![("a.png".to_string(), "7.50%".to_string())]);
            }
            other => panic!("expected a table, got {:?}", other),
        }
    }

    #[test]
    fn test_json_report() {
        let json = JsonReport::from(&mixed_report()).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["image_count"], 2);
        assert_eq!(value["scored_count"], 1);
        assert_eq!(value["results"][0]["file_name"], "a.png");
        assert_eq!(value["failures"][0]["kind"], "DecodeOrProcessing");
    }
}
