//! Document aggregate and JSON contract

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::table::Table;

/// Errors from reading or writing a document.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Document parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A reusable attribute bundle a table may reference by name or embed by
/// value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collate: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// The top-level aggregate: named schemas plus named tables.
///
/// This is the data-model layer's root and the serialized contract shared
/// with external tools. The live store is seeded from a table list rather
/// than wired through the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub schema: BTreeMap<String, Schema>,
    #[serde(default)]
    pub table: BTreeMap<String, Table>,
}

impl Document {
    /// Parse a document from JSON text.
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SchemaError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Column;
    use crate::table::{Index, SchemaRef};
    use pretty_assertions::assert_eq;

    /// A document in the contract shape parses, and both schema forms on
    /// the table (string reference vs embedded object) survive a round trip.
    #[test]
    fn document_round_trips_contract_json() {
        let json = r#"{
            "schema": {
                "userdb": { "charset": "utf8mb4", "collate": "utf8mb4_unicode_ci" },
                "grafana": {}
            },
            "table": {
                "users": {
                    "name": "users",
                    "logical_name": "User",
                    "schema": "userdb",
                    "charset": "utf8mb4",
                    "collate": "utf8mb4_unicode_ci",
                    "columns": [
                        { "name": "id", "type": "bigint", "unsigned": true,
                          "auto_increment": true, "null": false },
                        { "name": "username", "type": "varchar(50)", "null": false }
                    ],
                    "index": {
                        "idx_username": { "columns": ["username"], "unique": true }
                    },
                    "engine": "InnoDB",
                    "comment": "Stores user account information"
                }
            }
        }"#;

        let document = Document::from_json(json).unwrap();
        assert_eq!(document.schema.len(), 2);
        let users = &document.table["users"];
        assert_eq!(users.schema, SchemaRef::name("userdb"));
        assert_eq!(users.columns[0].name, "id");
        assert!(users.index["idx_username"].unique);

        let reparsed = Document::from_json(&document.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, document);
    }

    /// Malformed JSON is an error, not a panic; the caller keeps its
    /// last-known-good state.
    #[test]
    fn document_from_json_rejects_malformed_text() {
        assert!(Document::from_json("{ not json").is_err());
    }

    /// A programmatically built document serializes with the contract
    /// field names.
    #[test]
    fn document_serializes_contract_field_names() {
        let mut document = Document::default();
        document.schema.insert("userdb".into(), Schema::default());
        document.table.insert(
            "posts".into(),
            Table::new("posts")
                .logical_name("Post")
                .schema(SchemaRef::name("userdb"))
                .column(Column::new("id").ty("bigint").unsigned().auto_increment())
                .index(
                    "idx_id",
                    Index {
                        columns: vec!["id".into()],
                        unique: true,
                    },
                ),
        );

        let value: serde_json::Value =
            serde_json::from_str(&document.to_json().unwrap()).unwrap();
        let posts = &value["table"]["posts"];
        assert_eq!(posts["schema"], "userdb");
        assert_eq!(posts["columns"][0]["type"], "bigint");
        assert_eq!(posts["columns"][0]["null"], false);
        assert_eq!(posts["index"]["idx_id"]["unique"], true);
        assert_eq!(posts["position"]["x"], 0.0);
    }
}
