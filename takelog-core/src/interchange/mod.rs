//! CSV and JSON interchange.
//!
//! CSV is the row-list format shared with spreadsheets; JSON is a structural
//! copy of a whole project. Neither decoder panics or fails halfway: a payload
//! is either decoded completely or reported as [`InterchangeError`].

pub mod csv;
pub mod json;

/// Why an import produced nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InterchangeError {
    /// The payload could not be understood at all.
    Malformed(String),
    /// Well-formed, but there were no usable rows.
    Empty,
}

impl std::fmt::Display for InterchangeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(reason) => write!(f, "malformed import: {}", reason),
            Self::Empty => write!(f, "no valid rows to import"),
        }
    }
}

impl std::error::Error for InterchangeError {}

impl From<serde_json::Error> for InterchangeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Malformed(e.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

/// Deterministic download name for a project export.
pub fn export_file_name(project_name: &str, format: ExportFormat) -> String {
    let stem = sanitize_file_stem(project_name);
    match format {
        ExportFormat::Csv => format!("{}_takes.csv", stem),
        ExportFormat::Json => format!("{}.json", stem),
    }
}

fn sanitize_file_stem(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "project".to_string()
    } else {
        stem
    }
}
