pub mod tracer;

/// Scalar type of every sample value flowing through the pipeline.
pub type Real = f64;

/// Position of a sample within a trace.
pub type SampleIndex = usize;

/// Seconds between two consecutive samples.
pub type SampleInterval = f64;

/// Sample interval of the digitiser the tool was written for (100 MS/s).
pub const DEFAULT_SAMPLE_INTERVAL: SampleInterval = 10e-9;

/// Converts a sample index into the time (in seconds) at which it was taken.
pub fn sample_time(index: SampleIndex, sample_interval: SampleInterval) -> Real {
    index as Real * sample_interval
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn index_zero_is_time_zero() {
        assert_eq!(sample_time(0, DEFAULT_SAMPLE_INTERVAL), 0.0);
    }

    #[test]
    fn time_scales_with_interval() {
        assert_approx_eq!(sample_time(100, DEFAULT_SAMPLE_INTERVAL), 1e-6, 1e-15);
        assert_approx_eq!(sample_time(3, 0.5), 1.5);
    }
}
