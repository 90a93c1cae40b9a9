use rfscan_common::{Real, SampleIndex};
use std::fmt::Display;

/// An accepted reflection: where its leading edge and peak lie, and how strong it is.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct Reflection {
    /// First sample strictly above the adaptive threshold.
    pub crossing: SampleIndex,
    /// Sample of steepest rise, used as the arrival time of the reflection.
    pub leading_edge: SampleIndex,
    pub peak: SampleIndex,
    pub peak_amplitude: Real,
}

impl Display for Reflection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "{0},{1},{2},{3}",
            self.crossing, self.leading_edge, self.peak, self.peak_amplitude
        ))
    }
}

impl Reflection {
    /// Locates the leading edge and peak of the pulse which crosses the threshold at `crossing`.
    /// Both are searched for in `[crossing, crossing + search_window]`, clipped to the signal.
    /// Ties resolve to the earliest sample.
    pub(crate) fn locate(
        signal: &[Real],
        crossing: SampleIndex,
        search_window: usize,
    ) -> Option<Self> {
        let end = crossing
            .saturating_add(search_window)
            .min(signal.len().checked_sub(1)?);

        let (leading_edge, _) = (crossing.max(1)..=end)
            .filter_map(|i| Some((i, signal.get(i)? - signal.get(i - 1)?)))
            .fold((crossing, Real::MIN), |steepest, (i, gradient)| {
                if gradient > steepest.1 {
                    (i, gradient)
                } else {
                    steepest
                }
            });

        let (peak, peak_amplitude) = (leading_edge..=end)
            .filter_map(|i| Some((i, *signal.get(i)?)))
            .fold(
                (leading_edge, *signal.get(leading_edge)?),
                |peak, (i, value)| if value > peak.1 { (i, value) } else { peak },
            );

        Some(Self {
            crossing,
            leading_edge,
            peak,
            peak_amplitude,
        })
    }

    /// First sample after the peak which drops below `sustain_factor` of the peak amplitude.
    pub(crate) fn decay_point(&self, signal: &[Real], sustain_factor: Real) -> Option<SampleIndex> {
        let sustain_threshold = self.peak_amplitude * sustain_factor;
        signal
            .iter()
            .enumerate()
            .skip(self.peak + 1)
            .find(|(_, value)| **value < sustain_threshold)
            .map(|(index, _)| index)
    }
}
