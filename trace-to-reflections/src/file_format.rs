use clap::ValueEnum;
use std::path::Path;

/// Layout of a trace file, used both for reading raw samples and for
/// writing the smoothed envelope.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum::Display)]
pub enum FileFormat {
    /// Comma separated rows, preceded by a fixed number of header lines.
    #[strum(to_string = "csv")]
    Csv,
    /// Whitespace separated values.
    #[default]
    #[strum(to_string = "txt")]
    Text,
}

impl FileFormat {
    /// `.csv` files are [FileFormat::Csv], everything else is [FileFormat::Text].
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("csv") => Self::Csv,
            _ => Self::Text,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Text => "txt",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension() {
        assert_eq!(FileFormat::from_path(Path::new("scan.csv")), FileFormat::Csv);
        assert_eq!(
            FileFormat::from_path(Path::new("dir.v2/scan.csv")),
            FileFormat::Csv
        );
    }

    #[test]
    fn anything_else_is_text() {
        assert_eq!(FileFormat::from_path(Path::new("scan.txt")), FileFormat::Text);
        assert_eq!(FileFormat::from_path(Path::new("scan.CSV")), FileFormat::Text);
        assert_eq!(FileFormat::from_path(Path::new("scan")), FileFormat::Text);
    }

    #[test]
    fn display_matches_extension() {
        assert_eq!(FileFormat::Csv.to_string(), FileFormat::Csv.extension());
        assert_eq!(FileFormat::Text.to_string(), FileFormat::Text.extension());
    }
}
