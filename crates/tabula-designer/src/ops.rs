//! Column-list operations
//!
//! The pure half of the grid editor: each function takes the freshest
//! local row order and returns the full replacement column list. Row
//! identity is positional throughout, so callers must never operate on a
//! stale order.

use tabula_schema::{Column, unique_column_name};

/// Which editable cell of a row is being committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CellField {
    Name,
    LogicalName,
    Type,
}

/// Which boolean flag of a row is being toggled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FlagField {
    Nullable,
    PrimaryKey,
}

/// Replace one cell of one row, preserving the position of every other
/// column. An out-of-range row returns the list unchanged.
pub(crate) fn apply_cell_edit(
    columns: &[Column],
    row: usize,
    field: CellField,
    value: &str,
) -> Vec<Column> {
    let mut columns = columns.to_vec();
    if let Some(column) = columns.get_mut(row) {
        match field {
            CellField::Name => column.name = value.to_string(),
            CellField::LogicalName => column.logical_name = Some(value.to_string()),
            CellField::Type => column.ty = value.to_string(),
        }
    }
    columns
}

/// Flip one boolean flag of one row.
pub(crate) fn toggle_flag(columns: &[Column], row: usize, field: FlagField) -> Vec<Column> {
    let mut columns = columns.to_vec();
    if let Some(column) = columns.get_mut(row) {
        match field {
            FlagField::Nullable => column.nullable = !column.nullable,
            FlagField::PrimaryKey => column.primary_key = !column.primary_key,
        }
    }
    columns
}

/// Remove the row at the given position.
pub(crate) fn remove_row(columns: &[Column], row: usize) -> Vec<Column> {
    let mut columns = columns.to_vec();
    if row < columns.len() {
        columns.remove(row);
    }
    columns
}

/// Append a fresh column named "New Column", "New Column1", ... with the
/// editor defaults. Returns the new list and the generated name.
pub(crate) fn add_row(columns: &[Column]) -> (Vec<Column>, String) {
    let name = unique_column_name(columns, "New Column");
    let mut columns = columns.to_vec();
    columns.push(Column::new(name.clone()));
    (columns, name)
}

/// Rebuild the list with the row at `from` moved to `to`, shifting the
/// rows in between. This is a full reorder, not a swap: dropping row 0 on
/// row 2 yields 1, 2, 0.
pub(crate) fn reorder_row(columns: &[Column], from: usize, to: usize) -> Vec<Column> {
    let mut columns = columns.to_vec();
    if from < columns.len() && to < columns.len() && from != to {
        let column = columns.remove(from);
        columns.insert(to, column);
    }
    columns
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn columns() -> Vec<Column> {
        vec![
            Column::new("id").ty("bigint"),
            Column::new("title").ty("varchar(50)"),
            Column::new("content").ty("text"),
        ]
    }

    fn names(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// A cell commit rewrites one field of one row and leaves every other
    /// row untouched in place.
    #[test]
    fn apply_cell_edit_replaces_single_row() {
        let before = columns();
        let after = apply_cell_edit(&before, 1, CellField::Name, "headline");
        assert_eq!(names(&after), vec!["id", "headline", "content"]);
        assert_eq!(after[0], before[0]);
        assert_eq!(after[2], before[2]);

        let after = apply_cell_edit(&before, 2, CellField::Type, "mediumtext");
        assert_eq!(after[2].ty, "mediumtext");
    }

    /// An out-of-range row is a no-op rather than a panic; the grid may
    /// race a delete against a pending commit.
    #[test]
    fn apply_cell_edit_ignores_stale_row() {
        let before = columns();
        assert_eq!(apply_cell_edit(&before, 9, CellField::Name, "x"), before);
    }

    /// Toggles flip exactly the addressed flag.
    #[test]
    fn toggle_flag_flips_one_field() {
        let after = toggle_flag(&columns(), 0, FlagField::PrimaryKey);
        assert!(after[0].primary_key);
        assert!(!after[1].primary_key);

        let after = toggle_flag(&after, 0, FlagField::PrimaryKey);
        assert!(!after[0].primary_key);
    }

    /// Deletion is positional.
    #[test]
    fn remove_row_is_positional() {
        let after = remove_row(&columns(), 1);
        assert_eq!(names(&after), vec!["id", "content"]);
    }

    /// Added rows get the next free generated name and the grid defaults.
    #[test]
    fn add_row_generates_unique_names() {
        let (after, name) = add_row(&columns());
        assert_eq!(name, "New Column");

        let (after, name) = add_row(&after);
        assert_eq!(name, "New Column1");
        assert_eq!(after.len(), 5);
        assert_eq!(after[4].ty, "varchar");
        assert!(!after[4].nullable);
    }

    /// Reordering rebuilds the full order, shifting rows between the drag
    /// source and the drop target.
    #[test]
    fn reorder_row_shifts_between_endpoints() {
        let after = reorder_row(&columns(), 0, 2);
        assert_eq!(names(&after), vec!["title", "content", "id"]);

        let after = reorder_row(&columns(), 2, 0);
        assert_eq!(names(&after), vec!["content", "id", "title"]);

        let same = reorder_row(&columns(), 1, 1);
        assert_eq!(names(&same), vec!["id", "title", "content"]);
    }
}
