//! Column-major tabular payloads.
//!
//! [`Frame`] is the in-memory form of a dataset artifact: an ordered list
//! of named columns of equal length, holding scalar [`Value`]s. Frames can
//! be encoded to and decoded from the wire formats in [`FrameFormat`].

mod columnar;
mod csv;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Type alias for Results of frame operations.
pub type FrameResult<T> = std::result::Result<T, FrameError>;

/// Errors from constructing, encoding or decoding frames.
#[derive(Debug, Error)]
pub enum FrameError {
    /// Columns passed to [`Frame::from_columns`] have differing lengths.
    #[error("columns have unequal lengths")]
    UnequalColumns,

    /// Two columns share a name.
    #[error("duplicate column name {0:?}")]
    DuplicateColumn(String),

    /// A row does not match the frame's column count.
    #[error("row has {got} values, frame has {expected} columns")]
    RowArity {
        /// Number of columns in the frame.
        expected: usize,
        /// Number of values in the rejected row.
        got: usize,
    },

    /// The payload is not valid for the requested format.
    #[error("frame payload failed to parse: {0}")]
    Parse(String),

    /// The payload could not be encoded.
    #[error("frame payload failed to encode: {0}")]
    Encode(String),
}

/// A single scalar cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// Missing value.
    Null,
    /// Boolean.
    Bool(bool),
    /// Signed integer.
    Int(i64),
    /// Double-precision float.
    ///
    /// Non-finite values round-trip through the codecs, but `PartialEq`
    /// follows IEEE 754, so a frame containing `NaN` never compares equal,
    /// not even to itself.
    Float(f64),
    /// UTF-8 text.
    Text(String),
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_owned())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// A named column of values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique within a frame.
    pub name: String,
    /// Cell values, one per row.
    pub values: Vec<Value>,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }
}

/// Wire formats a frame can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameFormat {
    /// Row-delimited text with a header row (RFC-4180-style quoting).
    Csv,
    /// Column-major binary encoding (bincode with a versioned header).
    Columnar,
}

impl FrameFormat {
    /// Canonical file extension for keys storing this format.
    #[must_use]
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Columnar => "bin",
        }
    }

    /// Resolves a format from a file extension, case-insensitively.
    #[must_use]
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "csv" => Some(Self::Csv),
            "bin" => Some(Self::Columnar),
            _ => None,
        }
    }
}

/// An ordered collection of equally sized named columns.
///
/// # Example
///
/// ```
/// use mlvault_core::frame::{Column, Frame, Value};
///
/// let frame = Frame::from_columns(vec![
///     Column::new("city", vec!["Oslo".into(), "Porto".into()]),
///     Column::new("rainfall_mm", vec![Value::Float(82.5), Value::Float(31.0)]),
/// ])
/// .unwrap();
///
/// assert_eq!(frame.num_rows(), 2);
/// assert_eq!(frame.column_names(), ["city", "rainfall_mm"]);
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Frame {
    columns: Vec<Column>,
}

impl Frame {
    /// Creates an empty frame with no columns.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a frame from columns, validating shape.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::UnequalColumns`] when column lengths differ and
    /// [`FrameError::DuplicateColumn`] when two columns share a name.
    pub fn from_columns(columns: Vec<Column>) -> FrameResult<Self> {
        if let Some(first) = columns.first() {
            let rows = first.values.len();
            if columns.iter().any(|c| c.values.len() != rows) {
                return Err(FrameError::UnequalColumns);
            }
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name == column.name) {
                return Err(FrameError::DuplicateColumn(column.name.clone()));
            }
        }
        Ok(Self { columns })
    }

    /// Builds an empty frame with the given column names.
    pub fn with_names<S: Into<String>>(names: impl IntoIterator<Item = S>) -> FrameResult<Self> {
        Self::from_columns(
            names
                .into_iter()
                .map(|name| Column::new(name, Vec::new()))
                .collect(),
        )
    }

    /// Appends one row of values, in column order.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::RowArity`] when the value count does not match
    /// the column count.
    pub fn push_row(&mut self, row: Vec<Value>) -> FrameResult<()> {
        if row.len() != self.columns.len() {
            return Err(FrameError::RowArity {
                expected: self.columns.len(),
                got: row.len(),
            });
        }
        for (column, value) in self.columns.iter_mut().zip(row) {
            column.values.push(value);
        }
        Ok(())
    }

    /// Number of rows.
    #[must_use]
    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Number of columns.
    #[must_use]
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Column names, in order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// All columns, in order.
    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Encodes the frame into the given wire format.
    ///
    /// Encoding is deterministic: equal frames produce byte-identical
    /// payloads.
    pub fn encode(&self, format: FrameFormat) -> FrameResult<Vec<u8>> {
        match format {
            FrameFormat::Csv => csv::encode(self),
            FrameFormat::Columnar => columnar::encode(self),
        }
    }

    /// Decodes a frame from the given wire format.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError::Parse`] when the payload is not valid for the
    /// format.
    pub fn decode(format: FrameFormat, payload: &[u8]) -> FrameResult<Self> {
        match format {
            FrameFormat::Csv => csv::decode(payload),
            FrameFormat::Columnar => columnar::decode(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_columns_rejects_unequal_lengths() {
        let result = Frame::from_columns(vec![
            Column::new("a", vec![Value::Int(1)]),
            Column::new("b", vec![Value::Int(1), Value::Int(2)]),
        ]);
        assert!(matches!(result, Err(FrameError::UnequalColumns)));
    }

    #[test]
    fn test_from_columns_rejects_duplicate_names() {
        let result = Frame::from_columns(vec![
            Column::new("a", vec![]),
            Column::new("a", vec![]),
        ]);
        assert!(matches!(result, Err(FrameError::DuplicateColumn(name)) if name == "a"));
    }

    #[test]
    fn test_push_row_checks_arity() {
        let mut frame = Frame::with_names(["a", "b"]).unwrap();
        frame.push_row(vec![Value::Int(1), Value::Int(2)]).unwrap();
        let err = frame.push_row(vec![Value::Int(3)]).unwrap_err();
        assert!(matches!(err, FrameError::RowArity { expected: 2, got: 1 }));
        assert_eq!(frame.num_rows(), 1);
    }

    #[test]
    fn test_column_lookup() {
        let frame = Frame::from_columns(vec![
            Column::new("a", vec![Value::Int(1)]),
            Column::new("b", vec![Value::Text("x".into())]),
        ])
        .unwrap();
        assert_eq!(frame.column("b").unwrap().values, vec![Value::Text("x".into())]);
        assert!(frame.column("missing").is_none());
    }

    #[test]
    fn test_format_extensions() {
        assert_eq!(FrameFormat::Csv.extension(), "csv");
        assert_eq!(FrameFormat::from_extension("CSV"), Some(FrameFormat::Csv));
        assert_eq!(FrameFormat::from_extension("bin"), Some(FrameFormat::Columnar));
        assert_eq!(FrameFormat::from_extension("parquet"), None);
    }
}
