//! Locates the onset of every significant pulse in a rectified, smoothed trace.
//!
//! The noise floor is estimated from the leading samples of the trace, which
//! gives a fixed [AdaptiveThreshold]. The trace is then scanned for threshold
//! crossings; each crossing is refined to its leading edge (steepest rise) and
//! peak, near duplicates are rejected, and scanning resumes after a blind zone
//! whose length depends on the [DetectionMode]. A final pass removes
//! reflections which are insignificant next to the strongest one.

pub mod detectors;
pub(crate) mod filter;
pub mod noise;
pub mod parameters;
pub mod pulse;
pub mod threshold;

pub use detectors::{
    DetectionMode,
    reflection_detector::{ReflectionDetector, Reflections},
};
pub use noise::NoiseEstimate;
pub use parameters::{DetectorParameters, NoiseWindow};
pub use pulse::Reflection;
pub use threshold::AdaptiveThreshold;

use rfscan_common::{Real, SampleIndex, SampleInterval};

/// Returns the leading edge of each reflection in `signal`, in increasing order,
/// using the default [DetectorParameters].
///
/// The sample interval is not used by the search itself; converting indices to
/// times is left to the caller.
pub fn detect_reflections(
    signal: &[Real],
    _sample_interval: SampleInterval,
    max_points: usize,
) -> Vec<SampleIndex> {
    ReflectionDetector::default()
        .detect(signal, max_points)
        .leading_edges()
}
