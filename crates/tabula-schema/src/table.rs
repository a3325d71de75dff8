//! Table model

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::document::Schema;
use crate::validation::ValidationError;

/// A 2-D canvas coordinate. Layout state only; it never affects schema
/// semantics.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A table's schema: either a reference to a named schema in the document,
/// or an embedded attribute bundle.
///
/// The JSON form is untagged so the contract stays a plain string or a
/// plain object, exactly as external tools write it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaRef {
    /// Reference by name, e.g. `"userdb"`
    Name(String),
    /// Embedded schema attributes
    Inline(Schema),
}

impl SchemaRef {
    pub fn name(name: impl Into<String>) -> Self {
        SchemaRef::Name(name.into())
    }
}

/// Column list of a primary or foreign key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyParts {
    pub columns: Vec<String>,
}

/// A named index over a table's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    /// Ordered column names; each must name a column of the owning table
    pub columns: Vec<String>,
    pub unique: bool,
}

/// One database table, including its canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    /// Physical name, unique across the document. This is the lookup key
    /// for every store operation, so renaming is not an in-place edit.
    pub name: String,
    /// Human-readable label
    pub logical_name: String,
    pub schema: SchemaRef,
    pub charset: String,
    pub collate: String,
    /// Ordered column list. Order is meaningful: it is the display order
    /// and the target of drag reordering.
    pub columns: Vec<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<KeyParts>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<KeyParts>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub index: BTreeMap<String, Index>,
    pub engine: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub position: Position,
}

impl Table {
    /// Create a table with the editor's new-table defaults.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            logical_name: name.clone(),
            name,
            schema: SchemaRef::name(""),
            charset: "utf8mb4".to_string(),
            collate: "utf8mb4_unicode_ci".to_string(),
            columns: Vec::new(),
            primary_key: None,
            foreign_key: None,
            index: BTreeMap::new(),
            engine: "InnoDB".to_string(),
            comment: None,
            position: Position::default(),
        }
    }

    /// Builder: set the logical name
    pub fn logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = logical_name.into();
        self
    }

    /// Builder: set the schema reference
    pub fn schema(mut self, schema: SchemaRef) -> Self {
        self.schema = schema;
        self
    }

    /// Builder: add a column
    pub fn column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Builder: add an index
    pub fn index(mut self, name: impl Into<String>, index: Index) -> Self {
        self.index.insert(name.into(), index);
        self
    }

    /// Builder: set the canvas position
    pub fn position(mut self, x: f32, y: f32) -> Self {
        self.position = Position::new(x, y);
        self
    }

    /// The same table with its column list replaced.
    ///
    /// This is the grid editor's emit shape: every cell commit, toggle,
    /// reorder, add and delete rebuilds the whole column list and sends the
    /// whole table back through the store.
    pub fn with_columns(&self, columns: Vec<Column>) -> Table {
        Table {
            columns,
            ..self.clone()
        }
    }

    /// Check the table's structural invariants.
    ///
    /// Diagnostics are advisory: the store logs them on commit but does not
    /// reject, so a half-edited table still round-trips through the UI.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Table name is required"));
        }

        for (i, col) in self.columns.iter().enumerate() {
            if col.name.is_empty() {
                errors.push(ValidationError::new(
                    format!("columns[{i}].name"),
                    format!("Column {} name is required", i + 1),
                ));
            }
        }

        // Duplicate column names
        let mut seen = HashSet::new();
        for col in &self.columns {
            if !col.name.is_empty() && !seen.insert(col.name.as_str()) {
                errors.push(ValidationError::new(
                    "columns",
                    format!("Duplicate column name: {}", col.name),
                ));
            }
        }

        // Index, primary key and foreign key columns must exist
        let column_names: HashSet<_> = self.columns.iter().map(|c| c.name.as_str()).collect();
        for (name, index) in &self.index {
            for col in &index.columns {
                if !column_names.contains(col.as_str()) {
                    errors.push(ValidationError::new(
                        format!("index[{name}].columns"),
                        format!("Index column '{col}' does not exist in table"),
                    ));
                }
            }
        }
        for (field, key) in [
            ("primary_key", &self.primary_key),
            ("foreign_key", &self.foreign_key),
        ] {
            if let Some(key) = key {
                for col in &key.columns {
                    if !column_names.contains(col.as_str()) {
                        errors.push(ValidationError::new(
                            format!("{field}.columns"),
                            format!("Key column '{col}' does not exist in table"),
                        ));
                    }
                }
            }
        }

        errors
    }
}

/// Generate a table name that does not collide with any existing table.
///
/// Produces `table-1`, `table-2`, ... with an exact-match collision check,
/// the shape callers of `add_table` are expected to use.
pub fn unique_table_name(tables: &[Table]) -> String {
    let mut counter = 1;
    loop {
        let name = format!("table-{counter}");
        if !tables.iter().any(|table| table.name == name) {
            return name;
        }
        counter += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use pretty_assertions::assert_eq;

    fn users() -> Table {
        Table::new("users")
            .logical_name("User")
            .schema(SchemaRef::name("userdb"))
            .column(Column::new("id").ty("bigint").unsigned().auto_increment())
            .column(Column::new("username").ty("varchar(50)"))
            .column(Column::new("email").ty("varchar(255)"))
            .index(
                "idx_username",
                Index {
                    columns: vec!["username".into()],
                    unique: true,
                },
            )
    }

    /// A well-formed table produces no diagnostics.
    #[test]
    fn validate_accepts_well_formed_table() {
        assert!(users().validate().is_empty());
    }

    /// An index naming a column the table does not have is reported, not
    /// silently accepted.
    #[test]
    fn validate_reports_dangling_index_column() {
        let table = users().index(
            "idx_missing",
            Index {
                columns: vec!["no_such_column".into()],
                unique: false,
            },
        );
        let errors = table.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "index[idx_missing].columns");
    }

    /// Duplicate and empty column names are both diagnosed.
    #[test]
    fn validate_reports_bad_column_names() {
        let table = Table::new("t")
            .column(Column::new("a"))
            .column(Column::new("a"))
            .column(Column::new(""));
        let fields: Vec<_> = table.validate().iter().map(|e| e.field.clone()).collect();
        assert!(fields.contains(&"columns".to_string()));
        assert!(fields.contains(&"columns[2].name".to_string()));
    }

    /// Generated table names skip every name already taken.
    #[test]
    fn unique_table_name_skips_taken_names() {
        let tables = vec![Table::new("table-1"), Table::new("table-2")];
        assert_eq!(unique_table_name(&tables), "table-3");
    }

    /// A plain string parses as a schema reference, an object as an
    /// embedded schema. Both shapes serialize back unchanged.
    #[test]
    fn schema_ref_round_trips_both_forms() {
        let by_name: SchemaRef = serde_json::from_str(r#""userdb""#).unwrap();
        assert_eq!(by_name, SchemaRef::name("userdb"));
        assert_eq!(serde_json::to_string(&by_name).unwrap(), r#""userdb""#);

        let inline: SchemaRef =
            serde_json::from_str(r#"{ "charset": "utf8mb4", "comment": "embedded" }"#).unwrap();
        match &inline {
            SchemaRef::Inline(schema) => {
                assert_eq!(schema.charset.as_deref(), Some("utf8mb4"));
                assert_eq!(schema.comment.as_deref(), Some("embedded"));
            }
            other => panic!("expected inline schema, got {other:?}"),
        }
    }

    /// `with_columns` replaces only the column list; everything else,
    /// including the canvas position, is preserved.
    #[test]
    fn with_columns_preserves_other_fields() {
        let table = users().position(120.0, 48.0);
        let renamed = {
            let mut columns = table.columns.clone();
            columns[1].name = "login".into();
            table.with_columns(columns)
        };
        assert_eq!(renamed.name, "users");
        assert_eq!(renamed.position, Position::new(120.0, 48.0));
        assert_eq!(renamed.columns[1].name, "login");
        assert_eq!(renamed.columns[0], table.columns[0]);
    }
}
