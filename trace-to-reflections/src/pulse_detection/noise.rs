use rfscan_common::Real;

/// Mean and sample standard deviation of the samples preceding the first pulse.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct NoiseEstimate {
    pub mean: Real,
    pub std_dev: Real,
}

impl NoiseEstimate {
    /// Estimates the noise floor from the first `window` samples of `signal`.
    /// The standard deviation uses the `window - 1` divisor, the window being
    /// a small sample of the noise population.
    pub fn from_leading_window(signal: &[Real], window: usize) -> Self {
        let samples = signal.get(..window).unwrap_or(signal);
        match samples {
            [] => Self::default(),
            [value] => Self {
                mean: *value,
                std_dev: 0.0,
            },
            _ => {
                let size = samples.len() as Real;
                let mean = samples.iter().sum::<Real>() / size;
                let sum_of_squares = samples
                    .iter()
                    .map(|value| (value - mean).powi(2))
                    .sum::<Real>();
                Self {
                    mean,
                    std_dev: (sum_of_squares / (size - 1.0)).sqrt(),
                }
            }
        }
    }
}
