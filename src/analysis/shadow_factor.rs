use std::path::Path;

use image::{DynamicImage, GrayImage};
use ndarray::Array2;
use serde::Serialize;

use crate::{
    analysis::background::estimate_background,
    error::{Result, ShadowError},
    image_utils::{gray_to_intensity, load_image, to_grayscale, unit_array_to_gray},
};

/// Fixed 8-bit normalization divisor, independent of the source bit depth.
pub const NORMALIZATION_DIVISOR: f64 = 255.0;

#[derive(Debug, Clone)]
pub struct ShadowFactorResult {
    pub background_intensity: f64,
    pub darkness_map: Array2<f64>,
    pub intensity_factor: f64,
    pub size_factor: f64,
    pub shadow_pixel_count: usize,
    pub total_pixel_count: usize,
    pub combined_shadow_factor: f64,
}

/// The scalar part of a [`ShadowFactorResult`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowFactorSummary {
    pub background_intensity: f64,
    pub intensity_factor: f64,
    pub size_factor: f64,
    pub shadow_pixel_count: usize,
    pub total_pixel_count: usize,
    pub combined_shadow_factor: f64,
}

impl ShadowFactorResult {
    pub fn summary(&self) -> ShadowFactorSummary {
        ShadowFactorSummary {
            background_intensity: self.background_intensity,
            intensity_factor: self.intensity_factor,
            size_factor: self.size_factor,
            shadow_pixel_count: self.shadow_pixel_count,
            total_pixel_count: self.total_pixel_count,
            combined_shadow_factor: self.combined_shadow_factor,
        }
    }

    /// Darkness map scaled to 0..=255, brighter meaning darker shadow.
    pub fn darkness_image(&self) -> GrayImage {
        unit_array_to_gray(&self.darkness_map)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        self.darkness_image().save(path)?;
        Ok(())
    }
}

/// Scores how much of an image is in shadow and how dark that shadow is,
/// relative to the image's own 90th-percentile brightness.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShadowFactorAnalyzer;

impl ShadowFactorAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze_path<P: AsRef<Path>>(&self, path: P) -> Result<ShadowFactorResult> {
        let image = load_image(&path)?;
        self.analyze(&image)
    }

    pub fn analyze(&self, image: &DynamicImage) -> Result<ShadowFactorResult> {
        let gray = to_grayscale(image);
        let intensity = gray_to_intensity(&gray);
        self.analyze_intensity(&intensity)
    }

    pub fn analyze_intensity(&self, intensity: &Array2<i32>) -> Result<ShadowFactorResult> {
        let total_pixel_count = intensity.len();
        if total_pixel_count == 0 {
            return Err(ShadowError::EmptyImage);
        }

        let background_intensity = estimate_background(intensity)?;
        let darkness_map = darkness_map(intensity, background_intensity);

        let (shadow_sum, shadow_pixel_count) = darkness_map
            .iter()
            .filter(|&&v| v > 0.0)
            .fold((0.0, 0usize), |(sum, count), &v| (sum + v, count + 1));

        let intensity_factor = if shadow_pixel_count > 0 {
            shadow_sum / shadow_pixel_count as f64
        } else {
            0.0
        };
        let size_factor = shadow_pixel_count as f64 / total_pixel_count as f64;
        let combined_shadow_factor = intensity_factor * size_factor * 100.0;

        log::debug!(
            "background={:.2} intensity_factor={:.4} size_factor={:.4} ({} of {} pixels)",
            background_intensity,
            intensity_factor,
            size_factor,
            shadow_pixel_count,
            total_pixel_count
        );

        Ok(ShadowFactorResult {
            background_intensity,
            darkness_map,
            intensity_factor,
            size_factor,
            shadow_pixel_count,
            total_pixel_count,
            combined_shadow_factor,
        })
    }
}

/// Per-pixel `(background - pixel) / 255`, clipped to `[0, 1]`.
pub fn darkness_map(intensity: &Array2<i32>, background: f64) -> Array2<f64> {
    intensity.mapv(|v| ((background - v as f64) / NORMALIZATION_DIVISOR).clamp(0.0, 1.0))
}

/// Combined Shadow Factor of the image at `path`, in `[0, 100]`.
pub fn score_image<P: AsRef<Path>>(path: P) -> Result<f64> {
    ShadowFactorAnalyzer::new()
        .analyze_path(path)
        .map(|result| result.combined_shadow_factor)
}
