use crate::error::ParameterError;
use rfscan_common::Real;
use serde::Deserialize;

/// Sizing rule of the leading sub-window used to estimate the noise floor:
/// `clamp(num_samples / divisor, min, max)`, always kept below `num_samples`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct NoiseWindow {
    pub divisor: usize,
    pub min: usize,
    pub max: usize,
}

impl Default for NoiseWindow {
    fn default() -> Self {
        Self {
            divisor: 10,
            min: 20,
            max: 100,
        }
    }
}

impl NoiseWindow {
    /// Number of leading samples used for the noise estimate of a trace of `num_samples`.
    pub fn size_for(&self, num_samples: usize) -> usize {
        num_samples
            .checked_div(self.divisor)
            .unwrap_or(num_samples)
            .max(self.min)
            .min(self.max)
            .min(num_samples.saturating_sub(1))
    }
}

/// Tunable constants of the [ReflectionDetector](super::ReflectionDetector).
/// The defaults are the values the detector was calibrated with.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct DetectorParameters {
    /// Multiple of the noise standard deviation added to the noise mean.
    pub k_sensitivity: Real,
    /// Lowest permitted adaptive threshold.
    pub threshold_floor: Real,
    /// Fraction of the peak amplitude below which an early pulse counts as decayed.
    pub sustain_factor: Real,
    /// Minimum spacing, in samples, between two accepted leading edges.
    pub min_peak_interval: usize,
    /// Length of the look-ahead window searched for the leading edge and peak.
    pub search_window: usize,
    /// A peak weaker than this fraction of the running maximum switches the detector to late mode.
    pub late_zone_threshold_ratio: Real,
    /// Reflections after the first weaker than this fraction of the maximum are discarded.
    pub rejection_ratio: Real,
    /// Traces shorter than this are not searched.
    pub min_signal_length: usize,
    pub noise_window: NoiseWindow,
}

impl Default for DetectorParameters {
    fn default() -> Self {
        Self {
            k_sensitivity: 5.0,
            threshold_floor: 0.05,
            sustain_factor: 0.5,
            min_peak_interval: 30,
            search_window: 50,
            late_zone_threshold_ratio: 0.3,
            rejection_ratio: 0.15,
            min_signal_length: 50,
            noise_window: NoiseWindow::default(),
        }
    }
}

fn non_negative(name: &'static str, value: Real) -> Result<(), ParameterError> {
    if !value.is_finite() {
        Err(ParameterError::NotFinite { name, value })
    } else if value < 0.0 {
        Err(ParameterError::Negative { name, value })
    } else {
        Ok(())
    }
}

fn ratio(name: &'static str, value: Real) -> Result<(), ParameterError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ParameterError::RatioOutOfRange { name, value })
    }
}

fn at_least_one(name: &'static str, value: usize) -> Result<(), ParameterError> {
    if value == 0 {
        Err(ParameterError::ZeroLength(name))
    } else {
        Ok(())
    }
}

impl DetectorParameters {
    pub fn validate(&self) -> Result<(), ParameterError> {
        non_negative("k-sensitivity", self.k_sensitivity)?;
        non_negative("threshold-floor", self.threshold_floor)?;
        ratio("sustain-factor", self.sustain_factor)?;
        ratio("late-zone-threshold-ratio", self.late_zone_threshold_ratio)?;
        ratio("rejection-ratio", self.rejection_ratio)?;
        at_least_one("min-peak-interval", self.min_peak_interval)?;
        at_least_one("search-window", self.search_window)?;
        at_least_one("noise-window divisor", self.noise_window.divisor)?;
        if self.noise_window.min > self.noise_window.max {
            return Err(ParameterError::NoiseWindowBounds {
                min: self.noise_window.min,
                max: self.noise_window.max,
            });
        }
        Ok(())
    }
}
