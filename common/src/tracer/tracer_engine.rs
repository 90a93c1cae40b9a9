use thiserror::Error;
use tracing::{debug, level_filters::LevelFilter};
use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt};

#[derive(Debug, Error)]
pub enum TracerError {
    #[error("Global tracing subscriber already set: {0}")]
    AlreadySet(#[from] tracing::subscriber::SetGlobalDefaultError),
}

pub struct TracerOptions {
    /// Level used when `RUST_LOG` is absent or cannot be parsed.
    pub default_level: LevelFilter,
    /// Whether to colour the output with ANSI escape codes.
    pub ansi: bool,
}

impl TracerOptions {
    pub fn new(default_level: LevelFilter) -> Self {
        Self {
            default_level,
            ansi: true,
        }
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.default_level.into())
            .from_env_lossy()
    }
}

/// Initialises the global tracing subscriber, given a TracerOptions struct.
/// Log lines go to stderr so that results written to stdout stay machine readable.
pub struct TracerEngine {
    service_name: String,
}

impl TracerEngine {
    /// Installs the stderr `fmt` layer, filtered by `RUST_LOG`.
    /// #Arguments
    /// * `options` - The caller-specified instance of TracerOptions.
    /// * `service_name` - The name of the binary, reported in the first log line.
    /// #Returns
    /// An instance of TracerEngine, or an error if a global subscriber already exists.
    pub fn new(options: TracerOptions, service_name: &str) -> Result<Self, TracerError> {
        let stderr_tracer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(options.ansi)
            .with_filter(options.env_filter());

        let subscriber = tracing_subscriber::Registry::default().with(stderr_tracer);
        tracing::subscriber::set_global_default(subscriber)?;

        debug!("Tracer initialised for {service_name}");
        Ok(Self {
            service_name: service_name.to_owned(),
        })
    }

    pub fn service_name(&self) -> &str {
        &self.service_name
    }
}
