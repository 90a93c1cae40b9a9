use anyhow::Result;
use clap::Parser;
use rfscan_common::{DEFAULT_SAMPLE_INTERVAL, SampleInterval, init_tracer, sample_time};
use std::path::PathBuf;
use tracing::{info, level_filters::LevelFilter};
use trace_to_reflections::{
    ReflectionDetector, TraceToReflectionsError,
    loader::load_trace_file,
    parameters::{DetectorArgs, InputArgs},
    processing::{self, DEFAULT_SMOOTHING_WINDOW, output_target, validate_sample_interval},
    save_to_file::{SaveToFileFilter, save_reflections},
};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Trace file to scan, either csv or whitespace separated text.
    input: PathBuf,

    /// Where to write the smoothed envelope. Defaults to the input name with a `-chg` suffix.
    output: Option<PathBuf>,

    /// Width of the moving average applied to the rectified trace.
    #[clap(long, default_value_t = DEFAULT_SMOOTHING_WINDOW)]
    smoothing_window: usize,

    /// Seconds between samples, used to report reflection times.
    #[clap(long, env = "RFSCAN_SAMPLE_INTERVAL", default_value_t = DEFAULT_SAMPLE_INTERVAL)]
    sample_interval: SampleInterval,

    /// Stop searching once this many reflections have been found.
    #[clap(long, default_value = "10")]
    max_points: usize,

    /// Also write the reflections as csv to this file.
    #[clap(long)]
    reflections_file: Option<PathBuf>,

    #[clap(flatten)]
    input_args: InputArgs,

    #[clap(flatten)]
    detector: DetectorArgs,
}

fn main() -> Result<()> {
    let tracer = init_tracer!(LevelFilter::WARN)?;

    let args = Cli::parse();
    info!(
        "{0} scanning {1}",
        tracer.service_name(),
        args.input.display()
    );

    let sample_interval = validate_sample_interval(args.sample_interval)?;
    let detector = ReflectionDetector::new(args.detector.to_parameters()?);
    let settings = args.input_args.to_loader_settings(&args.input);

    let trace = load_trace_file(&args.input, &settings)?;

    let processed = processing::process(
        &trace.samples,
        args.smoothing_window,
        &detector,
        args.max_points,
    );

    let (output, output_format) =
        output_target(&args.input, args.output.as_deref(), settings.format);
    processed
        .envelope
        .iter()
        .copied()
        .enumerate()
        .save_to_file(&output, output_format)
        .map_err(|source| TraceToReflectionsError::Write {
            path: output.clone(),
            source,
        })?;
    println!("Conversion completed: {0}", output.display());

    if processed.reflections.is_empty() {
        println!("No reflection points detected");
    } else {
        println!("Automatically detected reflection points:");
        for (number, reflection) in processed.reflections.iter().enumerate() {
            println!(
                "Reflection {0}: Index = {1}, Time = {2:e} s",
                number + 1,
                reflection.leading_edge,
                sample_time(reflection.leading_edge, sample_interval)
            );
        }
    }

    if let Some(path) = &args.reflections_file {
        save_reflections(path, &processed.reflections, sample_interval).map_err(|source| {
            TraceToReflectionsError::Write {
                path: path.clone(),
                source,
            }
        })?;
        info!("Reflections written to {0}", path.display());
    }
    Ok(())
}
