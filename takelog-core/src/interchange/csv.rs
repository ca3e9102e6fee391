//! CSV row-list codec.
//!
//! Dialect: every field double-quoted, `"` doubled inside fields, embedded
//! newlines collapsed to spaces, CRLF line ends, UTF-8 with a BOM. The
//! decoder matches columns by header name, so files with reordered or
//! missing columns still import.

use takelog_types::{mics_from, now_iso, TakeId, TakeRow, TakeStatus, MIC_CHANNELS};

use super::InterchangeError;

/// Column order written on export.
pub const COLUMNS: [&str; 15] = [
    "createdAt", "fileNo", "sceneNo", "cutNo", "takeNo", "status",
    "mic1", "mic2", "mic3", "mic4", "mic5", "mic6", "mic7", "mic8",
    "note",
];

const BOM: char = '\u{feff}';
const LINE_END: &str = "\r\n";

// ============================================================================
// Encode
// ============================================================================

pub fn encode(rows: &[TakeRow]) -> String {
    let mut out = String::new();
    out.push(BOM);
    push_line(&mut out, COLUMNS.iter().copied());
    for row in rows {
        let fields = [
            row.created_at.as_str(),
            row.file_no.as_str(),
            row.scene_no.as_str(),
            row.cut_no.as_str(),
            row.take_no.as_str(),
            row.status.as_str(),
        ];
        push_line(
            &mut out,
            fields
                .into_iter()
                .chain(row.mics.iter().map(String::as_str))
                .chain(std::iter::once(row.note.as_str())),
        );
    }
    out
}

fn push_line<'a>(out: &mut String, fields: impl Iterator<Item = &'a str>) {
    for (i, field) in fields.enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_quoted(out, field);
    }
    out.push_str(LINE_END);
}

fn push_quoted(out: &mut String, field: &str) {
    out.push('"');
    let mut chars = field.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => out.push_str("\"\""),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            c => out.push(c),
        }
    }
    out.push('"');
}

// ============================================================================
// Tokenize
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Unquoted,
    Quoted,
    /// Inside quotes, just saw a `"`: either an escaped quote or the close.
    QuotedSeenQuote,
}

/// Split one line into fields. A quote toggles quoting wherever it appears;
/// `""` inside a quoted run is a literal quote.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut state = FieldState::Unquoted;

    for c in line.chars() {
        state = match (state, c) {
            (FieldState::Unquoted, '"') => FieldState::Quoted,
            (FieldState::Unquoted, ',') => {
                fields.push(std::mem::take(&mut current));
                FieldState::Unquoted
            }
            (FieldState::Unquoted, c) => {
                current.push(c);
                FieldState::Unquoted
            }
            (FieldState::Quoted, '"') => FieldState::QuotedSeenQuote,
            (FieldState::Quoted, c) => {
                current.push(c);
                FieldState::Quoted
            }
            (FieldState::QuotedSeenQuote, '"') => {
                current.push('"');
                FieldState::Quoted
            }
            (FieldState::QuotedSeenQuote, ',') => {
                fields.push(std::mem::take(&mut current));
                FieldState::Unquoted
            }
            (FieldState::QuotedSeenQuote, c) => {
                current.push(c);
                FieldState::Unquoted
            }
        };
    }
    fields.push(current);
    fields
}

// ============================================================================
// Decode
// ============================================================================

/// A leading line that describes the export rather than the columns.
fn is_metadata_line(line: &str) -> bool {
    let lower = line.to_lowercase();
    if lower.contains("fileno") {
        return false;
    }
    lower.trim_start_matches('"').starts_with('#') || lower.contains("settings") || lower.contains("project:")
}

/// Column name → field index, case-insensitive.
struct Header {
    names: Vec<String>,
}

impl Header {
    fn new(fields: Vec<String>) -> Self {
        Self {
            names: fields.into_iter().map(|f| f.trim().to_lowercase()).collect(),
        }
    }

    fn index(&self, column: &str) -> Option<usize> {
        let column = column.to_lowercase();
        self.names.iter().position(|n| *n == column)
    }

    fn knows_any_column(&self) -> bool {
        COLUMNS.iter().any(|c| self.index(c).is_some())
    }
}

/// Decode CSV text into fresh rows (new ids, `updatedAt` = now).
///
/// Fewer than two non-empty lines (header + one row) yields `Ok(vec![])`;
/// a header naming none of the known columns is `Malformed`.
pub fn decode(text: &str) -> Result<Vec<TakeRow>, InterchangeError> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines: Vec<&str> = text
        .lines()
        .map(|l| l.trim_end_matches('\r'))
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.first().is_some_and(|l| is_metadata_line(l)) {
        log::debug!(target: "interchange", "skipping metadata line {:?}", lines[0]);
        lines.remove(0);
    }
    if lines.len() < 2 {
        return Ok(Vec::new());
    }

    let header = Header::new(split_fields(lines[0]));
    if !header.knows_any_column() {
        return Err(InterchangeError::Malformed("header names no known column".into()));
    }

    let now = now_iso();
    let rows: Vec<TakeRow> = lines[1..]
        .iter()
        .map(|line| split_fields(line))
        .filter(|fields| fields.iter().any(|f| !f.trim().is_empty()))
        .map(|fields| decode_row(&header, &fields, &now))
        .collect();
    log::info!(target: "interchange", "decoded {} csv rows", rows.len());
    Ok(rows)
}

fn decode_row(header: &Header, fields: &[String], now: &str) -> TakeRow {
    let get = |column: &str| -> String {
        header
            .index(column)
            .and_then(|i| fields.get(i))
            .cloned()
            .unwrap_or_default()
    };

    let created_at = get("createdAt");
    let status = get("status");
    TakeRow {
        id: TakeId::generate(),
        created_at: if created_at.trim().is_empty() { now.to_string() } else { created_at },
        updated_at: now.to_string(),
        file_no: get("fileNo"),
        scene_no: get("sceneNo"),
        cut_no: get("cutNo"),
        take_no: get("takeNo"),
        status: TakeStatus::parse(&status).unwrap_or(TakeStatus::Keep),
        mics: mics_from((1..=MIC_CHANNELS).map(|n| get(&format!("mic{}", n)))),
        note: get("note"),
    }
}
