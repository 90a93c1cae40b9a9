//! This crate locates reflection events (echo arrivals) in a digitised
//! radio-frequency trace.
//!
//! A raw trace is rectified, smoothed with a centred moving average, and then
//! handed to the [ReflectionDetector] which reports the leading edge of every
//! significant pulse. Typical usage looks like:
//! ```rust
//! use trace_to_reflections::{detect_reflections, processing::prepare_envelope};
//!
//! let raw: Vec<f64> = (0..300)
//!     .map(|i| if (100..120).contains(&i) { -1.0 } else { 0.0 })
//!     .collect();
//! let envelope = prepare_envelope(&raw, 0);    // rectify only
//! let indices = detect_reflections(&envelope, 10e-9, 10);
//! assert_eq!(indices, vec![100]);
//! ```

pub mod error;
pub mod file_format;
pub mod loader;
pub mod parameters;
pub mod processing;
pub mod pulse_detection;
pub mod save_to_file;
pub mod window;

pub use error::{TraceToReflectionsError, TraceToReflectionsResult};
pub use file_format::FileFormat;
pub use pulse_detection::{
    DetectionMode, DetectorParameters, Reflection, ReflectionDetector, Reflections,
    detect_reflections,
};
