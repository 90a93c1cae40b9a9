use crate::{
    DetectorParameters, FileFormat,
    error::ConfigError,
    loader::LoaderSettings,
    pulse_detection::NoiseWindow,
};
use anyhow::{Error, anyhow};
use clap::Args;
use itertools::Itertools;
use rfscan_common::Real;
use std::{fs::File, io::BufReader, path::Path, path::PathBuf, str::FromStr};
use tracing::info;

#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct NoiseWindowWrapper(pub(crate) NoiseWindow);

impl FromStr for NoiseWindowWrapper {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (divisor, min, max) = s.split(',').map(str::trim).collect_tuple().ok_or_else(|| {
            anyhow!("Incorrect number of parameters in noise window, expected pattern '*,*,*', got '{s}'")
        })?;
        Ok(NoiseWindowWrapper(NoiseWindow {
            divisor: usize::from_str(divisor)?,
            min: usize::from_str(min)?,
            max: usize::from_str(max)?,
        }))
    }
}

/// Detector settings taken from the command line, or from a json file
/// when `--detector-config` is given.
#[derive(Debug, Clone, Args)]
pub struct DetectorArgs {
    /// Json file of detector parameters, overriding the individual flags.
    /// Fields left out of the file take their default value.
    #[clap(long, env = "RFSCAN_DETECTOR_CONFIG")]
    pub detector_config: Option<PathBuf>,

    /// Multiple of the noise standard deviation added to the noise mean.
    #[clap(long, env = "RFSCAN_K_SENSITIVITY", default_value = "5.0")]
    pub k_sensitivity: Real,

    /// Lowest permitted detection threshold.
    #[clap(long, env = "RFSCAN_THRESHOLD_FLOOR", default_value = "0.05")]
    pub threshold_floor: Real,

    /// Fraction of the peak below which an early pulse counts as decayed.
    #[clap(long, env = "RFSCAN_SUSTAIN_FACTOR", default_value = "0.5")]
    pub sustain_factor: Real,

    /// Minimum spacing, in samples, between two reflections.
    #[clap(long, env = "RFSCAN_MIN_PEAK_INTERVAL", default_value = "30")]
    pub min_peak_interval: usize,

    /// Samples searched after a threshold crossing for the leading edge and peak.
    #[clap(long, env = "RFSCAN_SEARCH_WINDOW", default_value = "50")]
    pub search_window: usize,

    /// Peaks weaker than this fraction of the strongest so far switch to late mode.
    #[clap(long, env = "RFSCAN_LATE_ZONE_THRESHOLD_RATIO", default_value = "0.3")]
    pub late_zone_threshold_ratio: Real,

    /// Reflections after the first weaker than this fraction of the strongest are dropped.
    #[clap(long, env = "RFSCAN_REJECTION_RATIO", default_value = "0.15")]
    pub rejection_ratio: Real,

    /// Traces shorter than this are not searched.
    #[clap(long, env = "RFSCAN_MIN_SIGNAL_LENGTH", default_value = "50")]
    pub min_signal_length: usize,

    /// Noise window sizing as 'divisor,min,max'.
    #[clap(long, env = "RFSCAN_NOISE_WINDOW", default_value = "10,20,100")]
    pub noise_window: NoiseWindowWrapper,
}

impl DetectorArgs {
    fn flag_parameters(&self) -> DetectorParameters {
        DetectorParameters {
            k_sensitivity: self.k_sensitivity,
            threshold_floor: self.threshold_floor,
            sustain_factor: self.sustain_factor,
            min_peak_interval: self.min_peak_interval,
            search_window: self.search_window,
            late_zone_threshold_ratio: self.late_zone_threshold_ratio,
            rejection_ratio: self.rejection_ratio,
            min_signal_length: self.min_signal_length,
            noise_window: self.noise_window.0,
        }
    }

    /// Returns validated detector parameters.
    pub fn to_parameters(&self) -> Result<DetectorParameters, ConfigError> {
        let parameters = match &self.detector_config {
            Some(path) => load_detector_config(path)?,
            None => self.flag_parameters(),
        };
        parameters.validate()?;
        Ok(parameters)
    }
}

#[tracing::instrument]
pub fn load_detector_config(path: &Path) -> Result<DetectorParameters, ConfigError> {
    let file = File::open(path).map_err(|source| ConfigError::Open {
        path: path.to_owned(),
        source,
    })?;
    let parameters = serde_json::from_reader(BufReader::new(file))?;
    info!("Loaded detector parameters");
    Ok(parameters)
}

/// How the input trace is read.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Layout of the input, inferred from its extension if not given.
    #[clap(long)]
    pub input_format: Option<FileFormat>,

    /// Lines at the top of a csv input which hold no samples.
    #[clap(long, default_value = "5")]
    pub header_lines: usize,

    /// Zero-based column of a csv row holding the sample.
    #[clap(long, default_value = "1")]
    pub column: usize,

    /// Discard samples beyond this count.
    #[clap(long, env = "RFSCAN_MAX_SAMPLES")]
    pub max_samples: Option<usize>,
}

impl InputArgs {
    pub fn to_loader_settings(&self, input: &Path) -> LoaderSettings {
        LoaderSettings {
            format: self
                .input_format
                .unwrap_or_else(|| FileFormat::from_path(input)),
            header_lines: self.header_lines,
            column: self.column,
            max_samples: self.max_samples,
        }
    }
}
