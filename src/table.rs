//! In-memory table model shared by every comparison stage

use indexmap::IndexMap;
use num_bigint::BigInt;
use num_traits::{Num, Zero};
use std::cmp::Ordering;
use std::fmt;

/// A decimal number held exactly as `mantissa * 10^exponent`.
///
/// The mantissa carries no trailing zeros, so equal values have equal fields
/// (`1.50`, `1.5` and `15e-1` all become `15 * 10^-1`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactDecimal {
    mantissa: BigInt,
    exponent: i64,
}

impl ExactDecimal {
    /// Parse plain or scientific decimal notation. Surrounding whitespace,
    /// `inf`, `nan` and hexadecimal forms are rejected.
    pub fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first()? {
            b'-' => (true, &text[1..]),
            b'+' => (false, &text[1..]),
            _ => (false, text),
        };
        let (number, exponent) = match unsigned.find(|c: char| c == 'e' || c == 'E') {
            Some(pos) => (&unsigned[..pos], parse_exponent(&unsigned[pos + 1..])?),
            None => (unsigned, 0),
        };
        let (int_part, frac_part) = number.split_once('.').unwrap_or((number, ""));

        let digits = format!("{}{}", int_part, frac_part);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let mut mantissa = BigInt::from_str_radix(&digits, 10).ok()?;
        let mut exponent = exponent.checked_sub(i64::try_from(frac_part.len()).ok()?)?;
        if negative {
            mantissa = -mantissa;
        }

        if mantissa.is_zero() {
            exponent = 0;
        } else {
            let ten = BigInt::from(10);
            while (&mantissa % &ten).is_zero() {
                mantissa /= &ten;
                exponent = exponent.checked_add(1)?;
            }
        }
        Some(Self { mantissa, exponent })
    }
}

fn parse_exponent(text: &str) -> Option<i64> {
    let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// A single cell of a loaded or aligned table
#[derive(Debug, Clone)]
pub enum CellValue {
    Text(String),
    Number { raw: String, value: ExactDecimal },
    /// Present in the source but empty
    Blank,
    /// Absent from the source (row or column did not exist on that side)
    Missing,
}

impl CellValue {
    /// Classify a raw field as read from a delimited file
    pub fn parse(raw: &str) -> Self {
        if raw.is_empty() {
            return Self::Blank;
        }
        match ExactDecimal::parse(raw) {
            Some(value) => Self::Number {
                raw: raw.to_string(),
                value,
            },
            None => Self::Text(raw.to_string()),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Self::Blank)
    }

    /// Text as it should appear in a rendered report
    pub fn as_display(&self) -> &str {
        match self {
            Self::Text(s) => s,
            Self::Number { raw, .. } => raw,
            Self::Blank | Self::Missing => "",
        }
    }
}

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Text(a), Self::Text(b)) => a == b,
            (Self::Number { value: a, .. }, Self::Number { value: b, .. }) => a == b,
            (Self::Blank, Self::Blank) => true,
            (Self::Missing, Self::Missing) => true,
            _ => false,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display())
    }
}

/// A table keyed by the values of its identifier column.
///
/// The key column itself is not part of `columns`; every row holds exactly
/// one value per entry of `columns`, in the same order.
#[derive(Debug, Clone)]
pub struct Table {
    source: String,
    key_column: String,
    columns: Vec<String>,
    rows: IndexMap<String, Vec<CellValue>>,
}

impl Table {
    pub(crate) fn new(
        source: String,
        key_column: String,
        columns: Vec<String>,
        rows: IndexMap<String, Vec<CellValue>>,
    ) -> Self {
        debug_assert!(rows.values().all(|r| r.len() == columns.len()));
        Self {
            source,
            key_column,
            columns,
            rows,
        }
    }

    /// Identifier of the input this table was loaded from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn key_column(&self) -> &str {
        &self.key_column
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.rows.contains_key(key)
    }

    /// Keys in source order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.keys().map(String::as_str)
    }

    pub fn row(&self, key: &str) -> Option<&[CellValue]> {
        self.rows.get(key).map(Vec::as_slice)
    }

    pub fn get(&self, key: &str, column: &str) -> Option<&CellValue> {
        let idx = self.column_index(column)?;
        self.rows.get(key).map(|row| &row[idx])
    }
}

/// Order identifiers the way a person reads them: numeric keys by value and
/// ahead of textual keys, textual keys lexicographically.
pub fn natural_key_cmp(a: &str, b: &str) -> Ordering {
    match (a.trim().parse::<f64>(), b.trim().parse::<f64>()) {
        (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}
