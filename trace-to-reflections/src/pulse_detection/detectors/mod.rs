pub mod reflection_detector;

use rfscan_common::{Real, SampleIndex};

/// Blind-zone policy of the detector.
/// Detection starts in [DetectionMode::Early] and switches to [DetectionMode::Late],
/// permanently, once a pulse is much weaker than the strongest seen so far.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum DetectionMode {
    /// Scanning resumes once the pulse has decayed below its sustain level.
    #[default]
    Early,
    /// Scanning resumes a fixed number of samples after the peak.
    Late,
}

/// Working state of a single detection run.
#[derive(Default, Debug, Clone, PartialEq)]
pub(crate) struct DetectionState {
    search_from: SampleIndex,
    max_amplitude: Real,
    mode: DetectionMode,
}

impl DetectionState {
    pub(crate) fn new(search_from: SampleIndex) -> Self {
        Self {
            search_from,
            ..Default::default()
        }
    }

    pub(crate) fn search_from(&self) -> SampleIndex {
        self.search_from
    }

    pub(crate) fn max_amplitude(&self) -> Real {
        self.max_amplitude
    }

    pub(crate) fn mode(&self) -> DetectionMode {
        self.mode
    }

    /// Moves the scan position forward to `index`; it never moves backwards.
    pub(crate) fn resume_at(&mut self, index: SampleIndex) {
        self.search_from = self.search_from.max(index);
    }

    /// Registers the peak amplitude of an accepted pulse.
    /// Returns `true` if this pulse caused the switch to late mode.
    pub(crate) fn accept_peak(&mut self, peak_amplitude: Real, late_zone_threshold_ratio: Real) -> bool {
        let switched = self.mode == DetectionMode::Early
            && peak_amplitude < late_zone_threshold_ratio * self.max_amplitude;
        if switched {
            self.mode = DetectionMode::Late;
        }
        self.max_amplitude = self.max_amplitude.max(peak_amplitude);
        switched
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resume_is_monotonic() {
        let mut state = DetectionState::new(1);
        state.resume_at(50);
        assert_eq!(state.search_from(), 50);
        state.resume_at(20);
        assert_eq!(state.search_from(), 50);
    }

    #[test]
    fn first_peak_never_switches() {
        let mut state = DetectionState::new(1);
        assert!(!state.accept_peak(0.01, 0.3));
        assert_eq!(state.mode(), DetectionMode::Early);
        assert_eq!(state.max_amplitude(), 0.01);
    }

    #[test]
    fn weak_peak_switches_permanently() {
        let mut state = DetectionState::new(1);
        state.accept_peak(1.0, 0.3);
        assert!(!state.accept_peak(0.5, 0.3));
        assert_eq!(state.mode(), DetectionMode::Early);
        assert!(state.accept_peak(0.2, 0.3));
        assert_eq!(state.mode(), DetectionMode::Late);
        assert!(!state.accept_peak(2.0, 0.3));
        assert_eq!(state.mode(), DetectionMode::Late);
        assert_eq!(state.max_amplitude(), 2.0);
    }

    #[test]
    fn switch_boundary_is_exclusive() {
        let mut state = DetectionState::new(1);
        state.accept_peak(1.0, 0.5);
        assert!(!state.accept_peak(0.5, 0.5));
        assert_eq!(state.mode(), DetectionMode::Early);
    }

    #[test]
    fn mode_display() {
        assert_eq!(DetectionMode::Early.to_string(), "Early");
        assert_eq!(DetectionMode::Late.to_string(), "Late");
    }
}
