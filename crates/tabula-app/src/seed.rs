//! Seed document for a new editing session
//!
//! The classic two-table example: a `users` table, a `posts` table and the
//! 1:N relationship between them.

use tabula_canvas::Edge;
use tabula_schema::{Column, Index, SchemaRef, Table};

pub fn tables() -> Vec<Table> {
    vec![
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
            .index(
                "idx_email",
                Index {
                    columns: vec!["email".into()],
                    unique: true,
                },
            )
            .position(10.0, 10.0),
        Table::new("posts")
            .logical_name("Post")
            .schema(SchemaRef::name("userdb"))
            .column(Column::new("id").ty("bigint").unsigned().auto_increment())
            .column(Column::new("title").ty("varchar(50)"))
            .column(Column::new("content").ty("text"))
            .column(Column::new("author_id").ty("bigint").unsigned())
            .index(
                "idx_id",
                Index {
                    columns: vec!["id".into()],
                    unique: true,
                },
            )
            .position(10.0, 260.0),
    ]
}

pub fn edges() -> Vec<Edge> {
    vec![Edge::new("e1-2", "users", "posts", "1:N")]
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The seed tables satisfy every structural invariant, so a fresh
    /// session starts without diagnostics.
    #[test]
    fn seed_tables_validate_cleanly() {
        for table in tables() {
            assert!(
                table.validate().is_empty(),
                "seed table {} has validation errors",
                table.name
            );
        }
    }

    /// Every seeded edge connects two seeded tables.
    #[test]
    fn seed_edges_reference_seed_tables() {
        let tables = tables();
        for edge in edges() {
            assert!(tables.iter().any(|t| t.name == edge.source));
            assert!(tables.iter().any(|t| t.name == edge.target));
        }
    }
}
