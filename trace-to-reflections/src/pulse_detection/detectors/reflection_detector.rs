use super::{DetectionMode, DetectionState};
use crate::pulse_detection::{
    AdaptiveThreshold, DetectorParameters, NoiseEstimate, Reflection, filter::retain_significant,
};
use rfscan_common::{Real, SampleIndex};
use tracing::{debug, trace};

/// Result of one detection run.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Reflections {
    /// Accepted reflections in order of arrival, after relative-amplitude filtering.
    pub reflections: Vec<Reflection>,
    /// The adaptive threshold used, or `None` if the trace was too short to search.
    pub threshold: Option<Real>,
    /// Number of reflections accepted before relative-amplitude filtering.
    pub num_candidates: usize,
    /// Largest peak amplitude among the accepted candidates.
    pub max_amplitude: Real,
    pub final_mode: DetectionMode,
    /// Set if the search stopped because `max_points` candidates were found.
    pub capacity_reached: bool,
}

impl Reflections {
    pub fn leading_edges(&self) -> Vec<SampleIndex> {
        self.reflections.iter().map(|r| r.leading_edge).collect()
    }

    pub fn len(&self) -> usize {
        self.reflections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reflections.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Reflection> {
        self.reflections.iter()
    }
}

/// Finds the leading edges of the reflections in a rectified, smoothed trace.
#[derive(Default, Debug, Clone)]
pub struct ReflectionDetector {
    parameters: DetectorParameters,
}

impl ReflectionDetector {
    /// The parameters are expected to have passed [DetectorParameters::validate].
    pub fn new(parameters: DetectorParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &DetectorParameters {
        &self.parameters
    }

    /// Runs the detector over the whole of `signal`, accepting at most `max_points` reflections.
    #[tracing::instrument(skip_all, fields(num_samples = signal.len(), threshold, num_candidates, num_reflections))]
    pub fn detect(&self, signal: &[Real], max_points: usize) -> Reflections {
        let parameters = &self.parameters;
        let num_samples = signal.len();
        if num_samples < parameters.min_signal_length || max_points == 0 {
            debug!("Nothing to search: {num_samples} samples, at most {max_points} reflections");
            return Reflections::default();
        }

        let noise = NoiseEstimate::from_leading_window(
            signal,
            parameters.noise_window.size_for(num_samples),
        );
        let threshold = AdaptiveThreshold::from_noise(
            &noise,
            parameters.k_sensitivity,
            parameters.threshold_floor,
        );
        tracing::Span::current().record("threshold", threshold.value());
        debug!(
            "Noise mean {0}, std dev {1}, threshold {2}",
            noise.mean,
            noise.std_dev,
            threshold.value()
        );

        // Scanning starts at 1 so that every leading edge has a preceding sample.
        let mut state = DetectionState::new(1);
        let mut candidates = Vec::<Reflection>::with_capacity(max_points);

        while state.search_from() + 1 < num_samples && candidates.len() < max_points {
            let Some(crossing) = threshold.first_crossing(signal, state.search_from()) else {
                break;
            };
            let Some(candidate) = Reflection::locate(signal, crossing, parameters.search_window)
            else {
                break;
            };

            if let Some(previous) = candidates.last() {
                if candidate.leading_edge - previous.leading_edge < parameters.min_peak_interval {
                    trace!(
                        "Rejected leading edge {0}, too close to {1}",
                        candidate.leading_edge,
                        previous.leading_edge
                    );
                    state.resume_at(candidate.peak + 1);
                    continue;
                }
            }

            if state.accept_peak(
                candidate.peak_amplitude,
                parameters.late_zone_threshold_ratio,
            ) {
                debug!(
                    "Late mode from peak {0} with amplitude {1}",
                    candidate.peak, candidate.peak_amplitude
                );
            }
            trace!("Accepted {candidate}");
            candidates.push(candidate);

            let resume = match state.mode() {
                DetectionMode::Early => candidate
                    .decay_point(signal, parameters.sustain_factor)
                    .map_or(num_samples, |decayed| decayed + 1),
                DetectionMode::Late => candidate.peak + parameters.min_peak_interval,
            };
            state.resume_at(resume.max(candidate.peak + 1));
        }

        let num_candidates = candidates.len();
        let reflections = retain_significant(
            candidates,
            state.max_amplitude(),
            parameters.rejection_ratio,
        );

        let span = tracing::Span::current();
        span.record("num_candidates", num_candidates);
        span.record("num_reflections", reflections.len());

        Reflections {
            reflections,
            threshold: Some(threshold.value()),
            num_candidates,
            max_amplitude: state.max_amplitude(),
            final_mode: state.mode(),
            capacity_reached: num_candidates == max_points,
        }
    }
}
