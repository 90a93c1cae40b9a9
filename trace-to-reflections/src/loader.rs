use crate::{FileFormat, error::LoadError};
use rfscan_common::Real;
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};
use tracing::{info, warn};

/// How to read samples out of a trace file.
#[derive(Debug, Clone, PartialEq)]
pub struct LoaderSettings {
    pub format: FileFormat,
    /// Number of lines at the top of a csv file which hold no samples.
    pub header_lines: usize,
    /// Zero-based column of a csv row holding the sample.
    pub column: usize,
    /// If set, samples beyond this count are discarded.
    pub max_samples: Option<usize>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            format: FileFormat::default(),
            header_lines: 5,
            column: 1,
            max_samples: None,
        }
    }
}

#[derive(Default, Debug, Clone, PartialEq)]
pub struct LoadedTrace {
    pub samples: Vec<Real>,
    /// Set if the input held more than `max_samples` samples.
    pub truncated: bool,
}

/// Collects samples, stopping one sample past the limit so truncation can be reported.
struct SampleSink {
    samples: Vec<Real>,
    max_samples: Option<usize>,
    truncated: bool,
}

impl SampleSink {
    fn new(max_samples: Option<usize>) -> Self {
        Self {
            samples: Vec::new(),
            max_samples,
            truncated: false,
        }
    }

    /// Returns `false` once no further samples are wanted.
    fn push(&mut self, value: Real) -> bool {
        if self
            .max_samples
            .is_some_and(|max_samples| self.samples.len() >= max_samples)
        {
            self.truncated = true;
            false
        } else {
            self.samples.push(value);
            true
        }
    }

    fn finish(self) -> Result<LoadedTrace, LoadError> {
        if self.samples.is_empty() {
            return Err(LoadError::Empty);
        }
        if self.truncated {
            warn!(
                "Input truncated to the first {0} samples",
                self.samples.len()
            );
        }
        Ok(LoadedTrace {
            samples: self.samples,
            truncated: self.truncated,
        })
    }
}

#[tracing::instrument(skip_all, fields(path = %path.display(), num_samples))]
pub fn load_trace_file(path: &Path, settings: &LoaderSettings) -> Result<LoadedTrace, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_owned(),
        source,
    })?;
    let trace = load_trace(BufReader::new(file), settings)?;
    tracing::Span::current().record("num_samples", trace.samples.len());
    info!("Loaded {0} samples", trace.samples.len());
    Ok(trace)
}

pub fn load_trace<R: BufRead>(reader: R, settings: &LoaderSettings) -> Result<LoadedTrace, LoadError> {
    let mut sink = SampleSink::new(settings.max_samples);
    match settings.format {
        FileFormat::Csv => load_csv(reader, settings, &mut sink)?,
        FileFormat::Text => load_text(reader, &mut sink)?,
    }
    sink.finish()
}

/// Rows without the requested column are skipped; empty fields do not count as columns.
fn load_csv<R: BufRead>(
    reader: R,
    settings: &LoaderSettings,
    sink: &mut SampleSink,
) -> Result<(), LoadError> {
    for (index, line) in reader.lines().enumerate().skip(settings.header_lines) {
        let line = line?;
        let Some(field) = line
            .split(',')
            .map(str::trim)
            .filter(|field| !field.is_empty())
            .nth(settings.column)
        else {
            continue;
        };
        let value = field.parse::<Real>().map_err(|_| LoadError::ParseValue {
            line: index + 1,
            value: field.to_owned(),
        })?;
        if !sink.push(value) {
            break;
        }
    }
    Ok(())
}

/// Reading stops quietly at the first token which is not a number.
fn load_text<R: BufRead>(reader: R, sink: &mut SampleSink) -> Result<(), LoadError> {
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        for token in line.split_whitespace() {
            let Ok(value) = token.parse::<Real>() else {
                warn!(
                    "Stopped reading at non-numeric token '{token}' on line {0}",
                    index + 1
                );
                return Ok(());
            };
            if !sink.push(value) {
                return Ok(());
            }
        }
    }
    Ok(())
}
