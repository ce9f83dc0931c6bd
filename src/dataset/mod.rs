//! Tabular data produced by the file loader
//!
//! A [`RecordSet`] is the parsed content of one input file. A [`Dataset`] is
//! the merge of every valid record set of a run. Merging moves the record sets
//! into the dataset; rows are never copied, and iteration walks the parts in
//! the order they were merged.

use thiserror::Error;

/// Column every accepted file must carry
pub const FIRST_NAME_COLUMN: &str = "fname";
/// Column holding the family name of a record
pub const LAST_NAME_COLUMN: &str = "lname";
/// Column the statistics are computed on
pub const AGE_COLUMN: &str = "age";

/// Errors raised while reading columns out of a dataset
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("column '{column}' is missing from {source_name}")]
    MissingColumn { column: String, source_name: String },

    #[error("column '{column}' in {source_name} holds a non-numeric value '{value}'")]
    NotNumeric {
        column: String,
        source_name: String,
        value: String,
    },
}

/// Rows parsed from a single input file
#[derive(Debug, Clone, PartialEq)]
pub struct RecordSet {
    source: String,
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl RecordSet {
    pub fn new(source: impl Into<String>, columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            source: source.into(),
            columns,
            rows,
        }
    }

    /// Path or URL the rows were read from
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.rows.iter().map(move |values| Row { set: self, values })
    }

    fn require_column(&self, name: &str) -> Result<usize, DatasetError> {
        self.column_index(name).ok_or_else(|| DatasetError::MissingColumn {
            column: name.to_string(),
            source_name: self.source.clone(),
        })
    }
}

/// Borrowed view of one row, resolving columns through its record set
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    set: &'a RecordSet,
    values: &'a [String],
}

impl<'a> Row<'a> {
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let index = self.set.column_index(column)?;
        self.values.get(index).map(String::as_str)
    }

    pub fn source(&self) -> &'a str {
        self.set.source()
    }

    /// Value of `column`, empty when the row is shorter than the header
    ///
    /// `None` only if the record set has no such column.
    pub fn get_or_empty(&self, column: &str) -> Option<&'a str> {
        let index = self.set.column_index(column)?;
        Some(self.values.get(index).map_or("", String::as_str))
    }
}

/// Merged view over every valid record set of a run
#[derive(Debug, Default)]
pub struct Dataset {
    parts: Vec<RecordSet>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record set after the ones already merged
    pub fn merge(&mut self, part: RecordSet) {
        self.parts.push(part);
    }

    pub fn num_parts(&self) -> usize {
        self.parts.len()
    }

    pub fn num_rows(&self) -> usize {
        self.parts.iter().map(RecordSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.num_rows() == 0
    }

    pub fn parts(&self) -> &[RecordSet] {
        &self.parts
    }

    /// Rows in dataset order: merge order, then file order
    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        self.parts.iter().flat_map(RecordSet::rows)
    }

    /// Numeric values of `column` across every part
    ///
    /// Empty cells, [`MISSING_VALUE_TOKENS`] and non-finite numbers are
    /// missing. Every part must carry the column, and every other cell must
    /// parse as a number.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<Option<f64>>, DatasetError> {
        let mut values = Vec::with_capacity(self.num_rows());

        for part in &self.parts {
            let index = part.require_column(column)?;
            for row in &part.rows {
                let raw = row.get(index).map(|v| v.trim()).unwrap_or("");
                values.push(parse_cell(raw, column, part)?);
            }
        }

        Ok(values)
    }

    /// Fail unless every part carries `column`
    pub fn require_column(&self, column: &str) -> Result<(), DatasetError> {
        for part in &self.parts {
            part.require_column(column)?;
        }
        Ok(())
    }
}

impl FromIterator<RecordSet> for Dataset {
    fn from_iter<I: IntoIterator<Item = RecordSet>>(iter: I) -> Self {
        Self {
            parts: iter.into_iter().collect(),
        }
    }
}

/// Cell values read as missing, on top of the empty cell
pub const MISSING_VALUE_TOKENS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn parse_cell(raw: &str, column: &str, part: &RecordSet) -> Result<Option<f64>, DatasetError> {
    if raw.is_empty() || MISSING_VALUE_TOKENS.contains(&raw) {
        return Ok(None);
    }
    let value = raw.parse::<f64>().map_err(|_| DatasetError::NotNumeric {
        column: column.to_string(),
        source_name: part.source.clone(),
        value: raw.to_string(),
    })?;

    // Spellings such as "inf" or "NAN" parse but never count as an age
    Ok(value.is_finite().then_some(value))
}
