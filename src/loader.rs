//! Delimited-file loading with preamble skipping and dialect detection

use crate::error::{ConfdiffError, Result};
use crate::key::{IdSubstringMatcher, KeyColumnStrategy};
use crate::table::{CellValue, Table};
use indexmap::IndexMap;
use std::path::Path;

/// Bytes inspected when sniffing the delimiter
pub const SNIFF_SAMPLE_BYTES: usize = 1024;

/// Delimiters to try when auto-detecting
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// How fields are separated in the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Fixed(u8),
    Auto,
}

impl Default for Delimiter {
    fn default() -> Self {
        Self::Fixed(b',')
    }
}

impl Delimiter {
    pub fn parse(s: &str) -> std::result::Result<Self, String> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "comma" | "," => Ok(Self::Fixed(b',')),
            "tab" | "\\t" | "\t" => Ok(Self::Fixed(b'\t')),
            "semicolon" | ";" => Ok(Self::Fixed(b';')),
            "pipe" | "|" => Ok(Self::Fixed(b'|')),
            other if other.len() == 1 && other.is_ascii() => Ok(Self::Fixed(other.as_bytes()[0])),
            _ => Err(format!(
                "Invalid delimiter: {}. Use 'comma', 'tab', 'semicolon', 'pipe', 'auto' or a single character",
                s
            )),
        }
    }

    fn resolve(&self, body: &[u8], input: &str) -> Result<u8> {
        match self {
            Self::Fixed(d) => Ok(*d),
            Self::Auto => sniff_delimiter(body, input),
        }
    }
}

/// Loads delimited exports into keyed [`Table`]s
pub struct TableLoader {
    header_row: usize,
    delimiter: Delimiter,
    key_strategy: Box<dyn KeyColumnStrategy>,
}

impl TableLoader {
    /// Loader that skips `header_row` lines before the header
    pub fn new(header_row: usize) -> Self {
        Self {
            header_row,
            delimiter: Delimiter::default(),
            key_strategy: Box::new(IdSubstringMatcher),
        }
    }

    pub fn with_delimiter(mut self, delimiter: Delimiter) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_key_strategy(mut self, strategy: impl KeyColumnStrategy + 'static) -> Self {
        self.key_strategy = Box::new(strategy);
        self
    }

    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// Load a table from a file on disk, identified by its file name
    pub fn load_path(&self, path: &Path) -> Result<Table> {
        let bytes = std::fs::read(path)?;
        let input = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.load_bytes(&bytes, &input)
    }

    /// Parse raw delimited content. `input` names the source in errors.
    pub fn load_bytes(&self, bytes: &[u8], input: &str) -> Result<Table> {
        let (body, preamble_lines) = self.body(bytes, input)?;
        let delimiter = self.delimiter.resolve(body, input)?;
        log::debug!(
            "Loading '{}' (skipping {} line(s), delimiter {:?})",
            input,
            preamble_lines,
            delimiter as char
        );

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(body);
        let mut records = reader.records();

        let header = match records.next() {
            Some(record) => record.map_err(|e| ConfdiffError::parse(input, e.to_string()))?,
            None => return Err(ConfdiffError::empty_input(input)),
        };
        let headers = normalise_headers(header.iter());

        let key_column = self
            .key_strategy
            .find_key_column(&headers)
            .ok_or_else(|| ConfdiffError::missing_key_column(input, &headers))?;
        let key_idx = headers
            .iter()
            .position(|h| *h == key_column)
            .ok_or_else(|| ConfdiffError::missing_key_column(input, &headers))?;

        let columns: Vec<String> = headers
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != key_idx)
            .map(|(_, h)| h.clone())
            .collect();

        let mut rows: IndexMap<String, Vec<CellValue>> = IndexMap::new();
        for result in records {
            let record = result.map_err(|e| ConfdiffError::parse(input, e.to_string()))?;
            let line = record
                .position()
                .map(|p| p.line() as usize + preamble_lines)
                .unwrap_or_default();

            if record.len() > headers.len() {
                return Err(ConfdiffError::parse(
                    input,
                    format!(
                        "line {}: expected {} fields, found {}",
                        line,
                        headers.len(),
                        record.len()
                    ),
                ));
            }

            let key = record.get(key_idx).unwrap_or("");
            if key.trim().is_empty() {
                log::warn!("{}: skipping line {} with empty '{}'", input, line, key_column);
                continue;
            }
            if rows.contains_key(key) {
                log::warn!("{}: duplicate key '{}' on line {} ignored", input, key, line);
                continue;
            }

            let cells = (0..headers.len())
                .filter(|i| *i != key_idx)
                .map(|i| record.get(i).map(CellValue::parse).unwrap_or(CellValue::Blank))
                .collect();
            rows.insert(key.to_string(), cells);
        }

        if rows.is_empty() {
            return Err(ConfdiffError::empty_input(input));
        }

        log::debug!(
            "Loaded '{}': {} rows, key column '{}', {} value columns",
            input,
            rows.len(),
            key_column,
            columns.len()
        );
        Ok(Table::new(input.to_string(), key_column, columns, rows))
    }

    /// Header names of a file, without requiring an identifier column
    pub fn read_headers(&self, bytes: &[u8], input: &str) -> Result<Vec<String>> {
        let (body, _) = self.body(bytes, input)?;
        let delimiter = self.delimiter.resolve(body, input)?;
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(body);
        match reader.records().next() {
            Some(record) => {
                let record = record.map_err(|e| ConfdiffError::parse(input, e.to_string()))?;
                Ok(normalise_headers(record.iter()))
            }
            None => Err(ConfdiffError::empty_input(input)),
        }
    }

    /// Input with the BOM and preamble removed, and the number of raw lines
    /// dropped. Only non-blank lines count towards `header_row`.
    fn body<'a>(&self, bytes: &'a [u8], input: &str) -> Result<(&'a [u8], usize)> {
        let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
        let mut rest = bytes;
        let mut counted = 0;
        let mut raw_lines = 0;
        while counted < self.header_row {
            let pos = rest
                .iter()
                .position(|&b| b == b'\n')
                .ok_or_else(|| ConfdiffError::empty_input(input))?;
            if !rest[..pos].iter().all(|b| b.is_ascii_whitespace()) {
                counted += 1;
            }
            raw_lines += 1;
            rest = &rest[pos + 1..];
        }
        if rest.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(ConfdiffError::empty_input(input));
        }
        Ok((rest, raw_lines))
    }
}

/// Make header names non-empty and unique, keeping their order
fn normalise_headers<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for (idx, name) in raw.enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {}", idx)
        } else {
            name.to_string()
        };
        let mut candidate = base.clone();
        let mut suffix = 1;
        while names.contains(&candidate) {
            candidate = format!("{}.{}", base, suffix);
            suffix += 1;
        }
        names.push(candidate);
    }
    names
}

/// Detect the delimiter from the first [`SNIFF_SAMPLE_BYTES`] of the body
fn sniff_delimiter(body: &[u8], input: &str) -> Result<u8> {
    let mut sample = &body[..body.len().min(SNIFF_SAMPLE_BYTES)];
    if body.len() > SNIFF_SAMPLE_BYTES {
        // last line is probably cut short
        if let Some(pos) = sample.iter().rposition(|&b| b == b'\n') {
            if pos > 0 {
                sample = &sample[..pos];
            }
        }
    }

    let text = String::from_utf8_lossy(sample);
    let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    if lines.is_empty() {
        return Err(ConfdiffError::parse(input, "no lines to detect the delimiter from"));
    }

    let mut best_delimiter = None;
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
        let variance = counts
            .iter()
            .map(|&c| (c as f64 - mean).powi(2))
            .sum::<f64>()
            / counts.len() as f64;

        // Tab gets a small bonus as it rarely appears inside values
        let score = if consistent {
            first_count * 1000 + if delim == b'\t' { 100 } else { 0 }
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = Some(delim);
        }
    }

    best_delimiter.ok_or_else(|| ConfdiffError::parse(input, "could not detect the delimiter"))
}

/// Count delimiter occurrences in a line, ignoring quoted sections
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
