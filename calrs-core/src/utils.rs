use std::ffi::OsStr;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

use crate::errors::EventError;
use crate::models::{Event, EventId, Timestamp};

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Same as [`get_dynamic_reader`], but `-` reads from stdin.
///
pub fn get_dynamic_reader_w_stdin(file_path_str: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path_str == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path_str))
    }
}

///
/// Check whether a path points at a JSON event file (`.json` or `.json.gz`).
///
pub fn is_json_path(path: &Path) -> bool {
    let name = path.file_name().and_then(OsStr::to_str).unwrap_or_default();
    name.ends_with(".json") || name.ends_with(".json.gz")
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    name: &str,
    line: usize,
) -> Result<T, EventError> {
    let raw = field.ok_or_else(|| EventError::ParseError {
        line,
        message: format!("missing {name} field"),
    })?;
    raw.parse::<T>().map_err(|_| EventError::ParseError {
        line,
        message: format!("invalid {name} field: {raw:?}"),
    })
}

///
/// Read events from a text source, one `id start end` triple per line.
///
/// Fields may be separated by whitespace or commas. Blank lines and lines
/// starting with `#` are skipped. Events are returned in file order and are
/// not validated; see [`validate_events`](crate::models::validate_events).
///
pub fn read_events<R: BufRead>(reader: R) -> Result<Vec<Event>, EventError> {
    let mut events = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty());

        let id: EventId = parse_field(fields.next(), "id", line_no)?;
        let start: Timestamp = parse_field(fields.next(), "start", line_no)?;
        let end: Timestamp = parse_field(fields.next(), "end", line_no)?;

        if let Some(extra) = fields.next() {
            return Err(EventError::ParseError {
                line: line_no,
                message: format!("unexpected trailing field: {extra:?}"),
            });
        }

        events.push(Event::new(id, start, end));
    }

    Ok(events)
}

///
/// Read a JSON array of events, e.g. `[{"id": 0, "start": 0, "end": 100}]`.
///
#[cfg(feature = "serde")]
pub fn read_events_json<R: Read>(reader: R) -> Result<Vec<Event>, EventError> {
    serde_json::from_reader(reader).map_err(|e| EventError::ParseError {
        line: e.line(),
        message: e.to_string(),
    })
}

#[cfg(feature = "serde")]
fn read_events_by_format<R: BufRead>(reader: R, path: &Path) -> Result<Vec<Event>, EventError> {
    if is_json_path(path) {
        read_events_json(reader)
    } else {
        read_events(reader)
    }
}

#[cfg(not(feature = "serde"))]
fn read_events_by_format<R: BufRead>(reader: R, _path: &Path) -> Result<Vec<Event>, EventError> {
    read_events(reader)
}

///
/// Read events from a path, picking the format from the file name. `-` reads
/// text from stdin.
///
pub fn read_events_from_path(file_path_str: &str) -> Result<Vec<Event>> {
    let reader = get_dynamic_reader_w_stdin(file_path_str)?;

    read_events_by_format(reader, Path::new(file_path_str))
        .with_context(|| format!("Failed to read events from {file_path_str}"))
}
