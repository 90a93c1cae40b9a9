use crate::{FileFormat, Reflections};
use rfscan_common::{Real, SampleIndex, SampleInterval, sample_time};
use std::{
    fs::File,
    io::{BufWriter, Error, Write},
    path::Path,
};

pub trait SavablePoint {
    /// Column names written at the top of csv files.
    const CSV_HEADER: &'static str;

    fn write_to<W: Write>(&self, writer: &mut W, format: FileFormat) -> Result<(), Error>;
}

impl SavablePoint for (SampleIndex, Real) {
    const CSV_HEADER: &'static str = "Index,SmoothedEnvelope";

    fn write_to<W: Write>(&self, writer: &mut W, format: FileFormat) -> Result<(), Error> {
        match format {
            FileFormat::Csv => writeln!(writer, "{0},{1:.6}", self.0, self.1),
            FileFormat::Text => writeln!(writer, "{0}\t{1:.6}", self.0, self.1),
        }
    }
}

pub trait SaveToFileFilter<I>
where
    I: Iterator,
{
    fn write_to<W: Write>(self, writer: &mut W, format: FileFormat) -> Result<(), Error>;

    fn save_to_file(self, path: &Path, format: FileFormat) -> Result<(), Error>;
}

impl<I> SaveToFileFilter<I> for I
where
    I: Iterator,
    I::Item: SavablePoint,
{
    fn write_to<W: Write>(self, writer: &mut W, format: FileFormat) -> Result<(), Error> {
        if format == FileFormat::Csv {
            writeln!(writer, "{0}", I::Item::CSV_HEADER)?;
        }
        for item in self {
            item.write_to(writer, format)?;
        }
        Ok(())
    }

    fn save_to_file(self, path: &Path, format: FileFormat) -> Result<(), Error> {
        let mut writer = BufWriter::new(File::create(path)?);
        self.write_to(&mut writer, format)?;
        writer.flush()
    }
}

/// Writes one `Reflection,Index,Time` row per reflection, numbered from one.
pub fn write_reflections<W: Write>(
    writer: &mut W,
    reflections: &Reflections,
    sample_interval: SampleInterval,
) -> Result<(), Error> {
    writeln!(writer, "Reflection,Index,Time")?;
    for (number, reflection) in reflections.iter().enumerate() {
        writeln!(
            writer,
            "{0},{1},{2:e}",
            number + 1,
            reflection.leading_edge,
            sample_time(reflection.leading_edge, sample_interval)
        )?;
    }
    Ok(())
}

pub fn save_reflections(
    path: &Path,
    reflections: &Reflections,
    sample_interval: SampleInterval,
) -> Result<(), Error> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_reflections(&mut writer, reflections, sample_interval)?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Reflection, processing::rectify};

    fn written<F: FnOnce(&mut Vec<u8>) -> Result<(), Error>>(f: F) -> String {
        let mut buffer = Vec::new();
        f(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn csv_envelope() {
        let text = written(|w| rectify(&[0.5, -0.25]).write_to(w, FileFormat::Csv));
        assert_eq!(text, "Index,SmoothedEnvelope\n0,0.500000\n1,0.250000\n");
    }

    #[test]
    fn text_envelope() {
        let text = written(|w| rectify(&[0.5, -0.25]).write_to(w, FileFormat::Text));
        assert_eq!(text, "0\t0.500000\n1\t0.250000\n");
    }

    #[test]
    fn reflections_with_times() {
        let reflections = Reflections {
            reflections: vec![
                Reflection {
                    leading_edge: 100,
                    ..Default::default()
                },
                Reflection {
                    leading_edge: 250,
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let text = written(|w| write_reflections(w, &reflections, 0.5));
        assert_eq!(text, "Reflection,Index,Time\n1,100,5e1\n2,250,1.25e2\n");
    }

    #[test]
    fn save_and_read_back() {
        let path = std::env::temp_dir().join(format!(
            "trace-to-reflections-save-{0}.csv",
            std::process::id()
        ));
        rectify(&[1.0, -2.0, 3.0])
            .save_to_file(&path, FileFormat::Csv)
            .unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(contents.lines().count(), 4);
        assert_eq!(contents.lines().last(), Some("2,3.000000"));
    }

    #[test]
    fn unwritable_path() {
        let path = Path::new("/nonexistent/trace-to-reflections/out.csv");
        assert!(rectify(&[1.0]).save_to_file(path, FileFormat::Csv).is_err());
    }
}
