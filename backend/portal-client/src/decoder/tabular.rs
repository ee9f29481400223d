use serde::{Deserialize, Serialize};

/// One scalar value from a CDA result row.
///
/// Cells keep the type JSON parsing gave them; nothing is coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl Cell {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Cell::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Cell::Number(number) => number.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Cell::Number(number) => number.as_i64(),
            _ => None,
        }
    }

    /// Numeric reading that also accepts numbers the portal sent as text,
    /// including a decimal comma.
    pub fn to_f64_lenient(&self) -> Option<f64> {
        match self {
            Cell::Number(number) => number.as_f64(),
            Cell::Text(text) => text.trim().replace(',', ".").parse().ok(),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        serde_json::Number::from_f64(value).map_or(Cell::Null, Cell::Number)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value.into())
    }
}

/// Column kept after de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    #[serde(rename = "colName")]
    pub name: String,
    /// Position of the column in the raw `metadata` array.
    #[serde(rename = "colIndex")]
    pub index: usize,
}

/// Decoded CDA result: de-duplicated columns and rows projected onto them.
///
/// Serializes back to the portal's `{metadata, resultset}` shape so callers
/// can forward it unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TabularResult {
    #[serde(rename = "metadata")]
    pub columns: Vec<Column>,
    #[serde(rename = "resultset")]
    pub rows: Vec<Vec<Cell>>,
}

impl TabularResult {
    /// The "no data" result: zero columns, zero rows.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Position of a column inside each projected row.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn cell(&self, row: usize, column: &str) -> Option<&Cell> {
        let index = self.column_index(column)?;
        self.rows.get(row)?.get(index)
    }

    /// Keep only rows whose `column` holds the text `value`.
    ///
    /// An unknown column leaves the result untouched.
    pub fn filter_rows(&self, column: &str, value: &str) -> Self {
        let Some(index) = self.column_index(column) else {
            return self.clone();
        };

        Self {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| row.get(index).and_then(Cell::as_str) == Some(value))
                .cloned()
                .collect(),
        }
    }
}
