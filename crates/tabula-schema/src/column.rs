//! Column model

use serde::{Deserialize, Serialize};

/// A single table column.
///
/// The JSON field names are part of the document contract and must not
/// change: external tools read and write the same records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    /// Column name, unique among the sibling columns of its table
    pub name: String,
    /// Human-readable label shown alongside the physical name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logical_name: Option<String>,
    /// Data type as free-form text (e.g. "bigint", "varchar(50)")
    #[serde(rename = "type")]
    pub ty: String,
    /// Whether the numeric type is unsigned
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unsigned: Option<bool>,
    /// Whether the column auto-increments
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_increment: Option<bool>,
    /// Whether NULL values are allowed
    #[serde(rename = "null")]
    pub nullable: bool,
    /// Default value expression
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<ColumnDefault>,
    /// Whether the column is part of the primary key.
    ///
    /// Added in a later document revision, so older documents may omit it.
    #[serde(default)]
    pub primary_key: bool,
}

/// A column default: either an SQL expression string or a plain boolean.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColumnDefault {
    Text(String),
    Flag(bool),
}

impl Column {
    /// Create a column with the editor's new-column defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            logical_name: Some(String::new()),
            ty: "varchar".to_string(),
            unsigned: None,
            auto_increment: None,
            nullable: false,
            default: None,
            primary_key: false,
        }
    }

    /// Builder: set data type
    pub fn ty(mut self, ty: impl Into<String>) -> Self {
        self.ty = ty.into();
        self
    }

    /// Builder: set the logical name
    pub fn logical_name(mut self, logical_name: impl Into<String>) -> Self {
        self.logical_name = Some(logical_name.into());
        self
    }

    /// Builder: allow NULL values
    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    /// Builder: mark as unsigned
    pub fn unsigned(mut self) -> Self {
        self.unsigned = Some(true);
        self
    }

    /// Builder: mark as auto-incrementing
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = Some(true);
        self
    }

    /// Builder: mark as part of the primary key
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }
}

/// Generate a column name that does not collide with any existing column.
///
/// Tries `base` first, then `base1`, `base2`, and so on. The collision check
/// is an exact name match, mirroring how the grid editor labels new rows
/// ("New Column", "New Column1", ...).
pub fn unique_column_name(columns: &[Column], base: &str) -> String {
    let mut name = base.to_string();
    let mut counter = 1;
    while columns.iter().any(|col| col.name == name) {
        name = format!("{base}{counter}");
        counter += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// The base name is used as-is when nothing collides.
    #[test]
    fn unique_column_name_prefers_base() {
        let columns = vec![Column::new("id")];
        assert_eq!(unique_column_name(&columns, "New Column"), "New Column");
    }

    /// Numbering starts at 1 and skips every taken name.
    #[test]
    fn unique_column_name_counts_past_collisions() {
        let columns = vec![Column::new("New Column"), Column::new("New Column1")];
        assert_eq!(unique_column_name(&columns, "New Column"), "New Column2");
    }

    /// Collision checks are exact; a different-cased name does not collide.
    #[test]
    fn unique_column_name_is_case_sensitive() {
        let columns = vec![Column::new("new column")];
        assert_eq!(unique_column_name(&columns, "New Column"), "New Column");
    }

    /// A new column carries the grid editor's defaults.
    #[test]
    fn new_column_defaults() {
        let col = Column::new("New Column");
        assert_eq!(col.ty, "varchar");
        assert_eq!(col.logical_name.as_deref(), Some(""));
        assert!(!col.nullable);
        assert!(!col.primary_key);
    }

    /// `type` and `null` keep their contract names in JSON, and optional
    /// fields are omitted rather than serialized as null.
    #[test]
    fn column_serializes_with_contract_field_names() {
        let col = Column {
            name: "id".into(),
            logical_name: None,
            ty: "bigint".into(),
            unsigned: Some(true),
            auto_increment: Some(true),
            nullable: false,
            default: None,
            primary_key: true,
        };
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "id",
                "type": "bigint",
                "unsigned": true,
                "auto_increment": true,
                "null": false,
                "primary_key": true,
            })
        );
    }

    /// Documents from the earlier revision omit `primary_key`; it parses
    /// as false.
    #[test]
    fn column_without_primary_key_field_parses() {
        let col: Column = serde_json::from_str(
            r#"{ "name": "username", "type": "varchar(50)", "null": false }"#,
        )
        .unwrap();
        assert!(!col.primary_key);
        assert!(col.default.is_none());
    }

    /// Defaults accept both expression strings and booleans.
    #[test]
    fn column_default_accepts_string_or_bool() {
        let text: Column = serde_json::from_str(
            r#"{ "name": "created_at", "type": "timestamp", "null": false,
                 "default": "CURRENT_TIMESTAMP" }"#,
        )
        .unwrap();
        assert_eq!(
            text.default,
            Some(ColumnDefault::Text("CURRENT_TIMESTAMP".into()))
        );

        let flag: Column = serde_json::from_str(
            r#"{ "name": "is_active", "type": "boolean", "null": false,
                 "default": true }"#,
        )
        .unwrap();
        assert_eq!(flag.default, Some(ColumnDefault::Flag(true)));
    }
}
