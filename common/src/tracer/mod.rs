mod tracer_engine;

pub use tracer_engine::{TracerEngine, TracerError, TracerOptions};

/// Should be called at the start of each binary.
/// The argument is the `LevelFilter` used when `RUST_LOG` is not set.
/// Evaluates to `Result<TracerEngine, TracerError>`.
#[macro_export]
macro_rules! init_tracer {
    ($level:expr) => {{
        $crate::tracer::TracerEngine::new(
            $crate::tracer::TracerOptions::new($level),
            env!("CARGO_BIN_NAME"),
        )
    }};
}
