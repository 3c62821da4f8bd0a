//! Combined Shadow Factor (CSF) scoring.
//!
//! The CSF measures how much of an image is covered by shadow and how dark
//! that shadow is, relative to the image's own background brightness
//! (its 90th-percentile intensity). It is the product of an intensity factor
//! (mean darkness of shadow pixels) and a size factor (fraction of pixels in
//! shadow), scaled to `[0, 100]`.

pub mod analysis;
pub mod batch;
pub mod error;
pub mod image_utils;
pub mod report;

pub use analysis::{
    background::{BACKGROUND_PERCENTILE, estimate_background},
    shadow_factor::{
        NORMALIZATION_DIVISOR, ShadowFactorAnalyzer, ShadowFactorResult, ShadowFactorSummary,
        darkness_map, score_image,
    },
};
pub use batch::{BatchOutcome, BatchReport, ScoreFailure, ScoreRecord, score_batch};
pub use error::{FailureKind, Result, ShadowError};
