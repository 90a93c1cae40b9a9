use rfscan_common::Real;
use std::path::PathBuf;
use thiserror::Error;

pub type TraceToReflectionsResult<T> = Result<T, TraceToReflectionsError>;

#[derive(Debug, Error)]
pub enum TraceToReflectionsError {
    #[error("{0}")]
    Load(#[from] LoadError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("Cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Sample interval must be positive and finite, got {0}")]
    InvalidSampleInterval(Real),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IO Error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Cannot parse value '{value}' on line {line}")]
    ParseValue { line: usize, value: String },
    #[error("No samples found in input")]
    Empty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot open detector config {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed detector config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Invalid detector parameter: {0}")]
    Parameter(#[from] ParameterError),
}

#[derive(Debug, Error, PartialEq)]
pub enum ParameterError {
    #[error("{name} must be finite, got {value}")]
    NotFinite { name: &'static str, value: Real },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: Real },
    #[error("{name} must lie in [0, 1], got {value}")]
    RatioOutOfRange { name: &'static str, value: Real },
    #[error("{0} must be at least one sample")]
    ZeroLength(&'static str),
    #[error("Noise window minimum {min} exceeds maximum {max}")]
    NoiseWindowBounds { min: usize, max: usize },
}
