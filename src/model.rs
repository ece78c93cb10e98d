use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Column type as reported by the remote query service.
///
/// BigQuery reports more types than these; anything we do not chart is
/// carried through as [`FieldType::Other`] rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    String,
    Integer,
    Float,
    Boolean,
    Timestamp,
    Date,
    Other(String),
}

impl FieldType {
    /// Map a BigQuery standard-SQL type name onto our field types.
    pub fn from_bigquery(name: &str) -> Self {
        match name.to_ascii_uppercase().as_str() {
            "STRING" => FieldType::String,
            "INTEGER" | "INT64" => FieldType::Integer,
            "FLOAT" | "FLOAT64" | "NUMERIC" | "BIGNUMERIC" => FieldType::Float,
            "BOOLEAN" | "BOOL" => FieldType::Boolean,
            "TIMESTAMP" | "DATETIME" => FieldType::Timestamp,
            "DATE" => FieldType::Date,
            other => FieldType::Other(other.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub field_type: FieldType,
}

/// A single cell in a tabular result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }
}

/// A typed, column-named sequence of rows returned by the remote query
/// service. Ownership passes to whichever component requested it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct TabularResult {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Value>>,
}

impl TabularResult {
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Iterate one column's cells, if the column exists.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = &'a Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().filter_map(move |row| row.get(idx)))
    }
}

/// Mapping from logical query name to its tabular result, produced once per
/// fetch batch. Keys exactly match the names of the submitted requests.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResultBundle {
    tables: IndexMap<String, TabularResult>,
}

impl ResultBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: String, table: TabularResult) {
        self.tables.insert(name, table);
    }

    pub fn get(&self, name: &str) -> Option<&TabularResult> {
        self.tables.get(name)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TabularResult)> {
        self.tables.iter().map(|(name, table)| (name.as_str(), table))
    }
}

impl IntoIterator for ResultBundle {
    type Item = (String, TabularResult);
    type IntoIter = indexmap::map::IntoIter<String, TabularResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.tables.into_iter()
    }
}
