//! Table schema descriptions and their prompt rendering.

use serde::{Deserialize, Serialize};

/// One column as reported by table introspection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ColumnInfo {
    /// Column name
    pub field: String,
    /// Declared type, e.g. `integer` or `character varying(50)`
    #[serde(rename = "type")]
    pub column_type: String,
    /// Nullability flag, `YES` or `NO`
    pub null: String,
    /// Key role: `PRI`, `UNI`, `MUL` or empty
    pub key: String,
    /// Default expression, if any
    pub default: Option<String>,
    /// Extra attributes such as `identity`
    pub extra: String,
}

impl ColumnInfo {
    /// Build a nullable, unkeyed column with only a name and a type.
    pub fn new(field: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            column_type: column_type.into(),
            null: "YES".to_string(),
            key: String::new(),
            default: None,
            extra: String::new(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        self.null.eq_ignore_ascii_case("YES")
    }
}

/// A table and its ordered columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaDescription {
    pub table: String,
    pub columns: Vec<ColumnInfo>,
}

impl SchemaDescription {
    pub fn new(table: impl Into<String>, columns: Vec<ColumnInfo>) -> Self {
        Self {
            table: table.into(),
            columns,
        }
    }

    /// Build a description from `(field, type)` pairs.
    pub fn from_pairs<N, T>(table: impl Into<String>, pairs: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let columns = pairs
            .into_iter()
            .map(|(field, column_type)| ColumnInfo::new(field, column_type))
            .collect();
        Self::new(table, columns)
    }

    /// Render the text block handed to the translator as schema context.
    ///
    /// The format is fixed: `Table: <name>\nColumns:\n<field> (<type>)` with
    /// one line per column and no trailing newline.
    pub fn render(&self) -> String {
        let columns = self
            .columns
            .iter()
            .map(|col| format!("{} ({})", col.field, col.column_type))
            .collect::<Vec<_>>()
            .join("\n");
        format!("Table: {}\nColumns:\n{}", self.table, columns)
    }
}

impl std::fmt::Display for SchemaDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}
