use super::NoiseEstimate;
use rfscan_common::{Real, SampleIndex};

/// Detection level derived from the noise floor, fixed for a whole detection run.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct AdaptiveThreshold(Real);

impl AdaptiveThreshold {
    /// `mean + k_sensitivity * std_dev`, but never below `floor`.
    pub fn from_noise(noise: &NoiseEstimate, k_sensitivity: Real, floor: Real) -> Self {
        Self((noise.mean + k_sensitivity * noise.std_dev).max(floor))
    }

    pub fn value(&self) -> Real {
        self.0
    }

    pub fn is_exceeded_by(&self, value: Real) -> bool {
        value > self.0
    }

    /// Index of the first sample at or after `from` strictly above the threshold.
    pub fn first_crossing(&self, signal: &[Real], from: SampleIndex) -> Option<SampleIndex> {
        signal
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, value)| self.is_exceeded_by(**value))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn noise_based() {
        let noise = NoiseEstimate {
            mean: 0.1,
            std_dev: 0.02,
        };
        assert_approx_eq!(AdaptiveThreshold::from_noise(&noise, 5.0, 0.05).value(), 0.2);
    }

    #[test]
    fn floored() {
        let threshold = AdaptiveThreshold::from_noise(&NoiseEstimate::default(), 5.0, 0.05);
        assert_eq!(threshold.value(), 0.05);
    }

    #[test]
    fn nan_noise_falls_back_to_floor() {
        let noise = NoiseEstimate {
            mean: Real::NAN,
            std_dev: 0.0,
        };
        assert_eq!(AdaptiveThreshold::from_noise(&noise, 5.0, 0.05).value(), 0.05);
    }

    #[test]
    fn crossing_is_strict() {
        let threshold = AdaptiveThreshold::from_noise(&NoiseEstimate::default(), 5.0, 0.05);
        let data = [0.0, 0.05, 0.05, 0.06, 0.0, 0.3];
        assert_eq!(threshold.first_crossing(&data, 0), Some(3));
        assert_eq!(threshold.first_crossing(&data, 4), Some(5));
        assert_eq!(threshold.first_crossing(&data, 6), None);
    }

    #[test]
    fn no_crossing() {
        let threshold = AdaptiveThreshold::from_noise(&NoiseEstimate::default(), 5.0, 0.05);
        assert_eq!(threshold.first_crossing(&[0.0; 100], 1), None);
    }
}
