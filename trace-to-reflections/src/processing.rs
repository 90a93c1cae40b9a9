use crate::{
    FileFormat, ReflectionDetector, Reflections, TraceToReflectionsError,
    TraceToReflectionsResult,
    window::{SmoothingWindow, WindowFilter},
};
use rfscan_common::{Real, SampleIndex, SampleInterval};
use std::path::{Path, PathBuf};
use tracing::info;

/// Width of the moving average applied to the envelope when none is given.
pub const DEFAULT_SMOOTHING_WINDOW: usize = 10;

/// Suffix appended to the input's file stem to name the envelope file.
const OUTPUT_SUFFIX: &str = "-chg";

/// The envelope of a raw trace: the absolute value of each sample.
pub fn rectify(raw: &[Real]) -> impl Iterator<Item = (SampleIndex, Real)> + Clone + '_ {
    raw.iter().copied().map(Real::abs).enumerate()
}

/// Rectifies `raw` and smooths it with a centred moving average
/// of `smoothing_window / 2` samples either side.
#[tracing::instrument(skip_all, fields(num_samples = raw.len(), smoothing_window = smoothing_window))]
pub fn prepare_envelope(raw: &[Real], smoothing_window: usize) -> Vec<Real> {
    rectify(raw)
        .window(SmoothingWindow::new(smoothing_window / 2))
        .map(|(_, value)| value)
        .collect()
}

/// Checks the sample interval is usable for converting indices to times.
pub fn validate_sample_interval(
    sample_interval: SampleInterval,
) -> TraceToReflectionsResult<SampleInterval> {
    if sample_interval.is_finite() && sample_interval > 0.0 {
        Ok(sample_interval)
    } else {
        Err(TraceToReflectionsError::InvalidSampleInterval(sample_interval))
    }
}

/// Derives the envelope file name from the input: `scan.csv` becomes `scan-chg.csv`.
pub fn output_file_name(input: &Path, format: FileFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.{0}", format.extension()))
}

/// Where the envelope is written and in which layout.
/// An explicit `output` is written in the layout its extension names;
/// otherwise the name is derived from `input` and `input_format` is kept.
pub fn output_target(
    input: &Path,
    output: Option<&Path>,
    input_format: FileFormat,
) -> (PathBuf, FileFormat) {
    match output {
        Some(path) => (path.to_owned(), FileFormat::from_path(path)),
        None => (output_file_name(input, input_format), input_format),
    }
}

pub struct ProcessedTrace {
    pub envelope: Vec<Real>,
    pub reflections: Reflections,
}

#[tracing::instrument(skip_all, fields(num_samples = raw.len(), num_reflections))]
pub fn process(
    raw: &[Real],
    smoothing_window: usize,
    detector: &ReflectionDetector,
    max_points: usize,
) -> ProcessedTrace {
    let envelope = prepare_envelope(raw, smoothing_window);
    let reflections = detector.detect(&envelope, max_points);
    tracing::Span::current().record("num_reflections", reflections.len());
    if reflections.capacity_reached {
        info!("Search stopped after {max_points} reflections");
    }
    ProcessedTrace {
        envelope,
        reflections,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn rectify_takes_magnitude() {
        let rectified: Vec<_> = rectify(&[-1.0, 0.5, -0.0, 2.0]).collect();
        assert_eq!(rectified, vec![(0, 1.0), (1, 0.5), (2, 0.0), (3, 2.0)]);
    }

    #[test]
    fn envelope_of_oscillation_is_flat() {
        let raw: Vec<Real> = (0..100)
            .map(|i| if i % 2 == 0 { 0.8 } else { -0.8 })
            .collect();
        let envelope = prepare_envelope(&raw, DEFAULT_SMOOTHING_WINDOW);
        assert_eq!(envelope.len(), raw.len());
        for value in envelope {
            assert_approx_eq!(value, 0.8);
        }
    }

    #[test]
    fn envelope_spreads_a_spike() {
        let mut raw = vec![0.0; 30];
        raw[15] = -11.0;
        let envelope = prepare_envelope(&raw, DEFAULT_SMOOTHING_WINDOW);
        for (i, value) in envelope.into_iter().enumerate() {
            if (10..=20).contains(&i) {
                assert_approx_eq!(value, 1.0);
            } else {
                assert_approx_eq!(value, 0.0);
            }
        }
    }

    #[test]
    fn sample_interval() {
        assert_eq!(validate_sample_interval(10e-9).unwrap(), 10e-9);
        assert!(validate_sample_interval(0.0).is_err());
        assert!(validate_sample_interval(-1.0).is_err());
        assert!(validate_sample_interval(Real::NAN).is_err());
        assert!(validate_sample_interval(Real::INFINITY).is_err());
    }

    #[test]
    fn output_names() {
        assert_eq!(
            output_file_name(Path::new("data/scan.csv"), FileFormat::Csv),
            PathBuf::from("data/scan-chg.csv")
        );
        assert_eq!(
            output_file_name(Path::new("scan.dat"), FileFormat::Text),
            PathBuf::from("scan-chg.txt")
        );
        assert_eq!(
            output_file_name(Path::new("scan"), FileFormat::Text),
            PathBuf::from("scan-chg.txt")
        );
        assert_eq!(
            output_file_name(Path::new("run.2024.csv"), FileFormat::Csv),
            PathBuf::from("run.2024-chg.csv")
        );
    }

    #[test]
    fn explicit_output_sets_format() {
        assert_eq!(
            output_target(Path::new("in.txt"), Some(Path::new("out.csv")), FileFormat::Text),
            (PathBuf::from("out.csv"), FileFormat::Csv)
        );
        assert_eq!(
            output_target(Path::new("in.csv"), Some(Path::new("out.dat")), FileFormat::Csv),
            (PathBuf::from("out.dat"), FileFormat::Text)
        );
    }

    #[test]
    fn derived_output_keeps_input_format() {
        assert_eq!(
            output_target(Path::new("data/in.csv"), None, FileFormat::Csv),
            (PathBuf::from("data/in-chg.csv"), FileFormat::Csv)
        );
        assert_eq!(
            output_target(Path::new("in.csv"), None, FileFormat::Text),
            (PathBuf::from("in-chg.txt"), FileFormat::Text)
        );
    }

    #[test]
    fn end_to_end_oscillating_burst() {
        // A 20 sample burst of a +-1 oscillation starting at sample 100.
        let raw: Vec<Real> = (0..400)
            .map(|i| {
                if (100..120).contains(&i) {
                    if i % 2 == 0 { 1.0 } else { -1.0 }
                } else {
                    0.0
                }
            })
            .collect();
        let processed = process(&raw, DEFAULT_SMOOTHING_WINDOW, &ReflectionDetector::default(), 10);
        assert_eq!(processed.envelope.len(), raw.len());
        assert_eq!(processed.reflections.len(), 1);
        // Smoothing spreads the rise over samples 95..=105 in equal steps,
        // so rounding decides which of them is the steepest.
        let edge = processed.reflections.leading_edges()[0];
        assert!((95..=105).contains(&edge), "edge {edge}");
    }
}
