//! The ERD store: the single owner of the table collection, the current
//! selection, and undo/redo history.
//!
//! Every other component holds only transient, store-derived copies and
//! routes persistent changes back through the commit operations here. The
//! store is a plain struct with `&mut self` operations, so re-entrant
//! commits are unrepresentable; in the UI it is owned by exactly one view
//! and mutated synchronously inside event callbacks.
//!
//! History is whole-collection snapshotting: each commit pushes the entire
//! pre-commit table list onto the undo stack, and undo/redo exchange whole
//! snapshots. That trades memory for exact, order-preserving restoration
//! (column order and node positions included). The undo stack is unbounded.

use tabula_schema::{Position, Table};

/// Schema state plus history for one editing session.
#[derive(Debug, Clone, Default)]
pub struct ErdStore {
    /// The live table collection
    tables: Vec<Table>,
    /// Value copy of the selected table, if any
    selected: Option<Table>,
    /// Undo snapshots, oldest first
    past: Vec<Vec<Table>>,
    /// Redo snapshots, most recently undone first
    future: Vec<Vec<Table>>,
}

impl ErdStore {
    /// Create a store seeded with a table collection. The seed is the
    /// floor of the undo history; undoing every commit restores it.
    pub fn new(seed: Vec<Table>) -> Self {
        Self {
            tables: seed,
            selected: None,
            past: Vec::new(),
            future: Vec::new(),
        }
    }

    /// The live table collection.
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// The currently selected table, if any.
    pub fn selected_table(&self) -> Option<&Table> {
        self.selected.as_ref()
    }

    /// Set or clear the selection. No history effect; clearing the
    /// selection is how the side panel closes.
    pub fn select_table(&mut self, table: Option<&Table>) {
        self.selected = table.cloned();
    }

    /// Replace the table whose name matches `updated.name` and select it.
    ///
    /// The name is the lookup key, not identity: renaming a table cannot go
    /// through this operation. The prior collection is pushed onto the undo
    /// stack and the redo stack is cleared. An unknown name is a logged
    /// no-op; the caller sees no partial update either way.
    pub fn update_table(&mut self, updated: Table) {
        let Some(slot) = self.tables.iter().position(|t| t.name == updated.name) else {
            tracing::warn!(table = %updated.name, "update_table: no table with that name");
            return;
        };

        for error in updated.validate() {
            tracing::warn!(table = %updated.name, %error, "committing table with validation errors");
        }

        let mut tables = self.tables.clone();
        tables[slot] = updated.clone();
        self.commit(tables);
        self.selected = Some(updated);
    }

    /// Append a new table. The caller is expected to provide a fresh unique
    /// name (see [`tabula_schema::unique_table_name`]); a duplicate is a
    /// logged no-op.
    ///
    /// Unlike the behavior this editor grew out of, adding a table pushes
    /// undo history exactly like every other commit, so creation is
    /// undoable too.
    pub fn add_table(&mut self, table: Table) {
        if self.tables.iter().any(|t| t.name == table.name) {
            tracing::warn!(table = %table.name, "add_table: name already in use");
            return;
        }

        let mut tables = self.tables.clone();
        tables.push(table);
        self.commit(tables);
    }

    /// Persist a node's drag-stop position through the normal commit path.
    ///
    /// Dragging must not open the side panel, so unlike `update_table` this
    /// leaves the selection alone. An unknown name is a logged no-op.
    pub fn move_table(&mut self, name: &str, position: Position) {
        let Some(slot) = self.tables.iter().position(|t| t.name == name) else {
            tracing::warn!(table = %name, "move_table: no table with that name");
            return;
        };

        let mut tables = self.tables.clone();
        tables[slot].position = position;
        self.commit(tables);
    }

    /// Step back one commit. A no-op at the history boundary. The selection
    /// is deliberately dropped, not restored: the snapshot it pointed into
    /// no longer exists.
    pub fn undo(&mut self) {
        let Some(snapshot) = self.past.pop() else {
            return;
        };
        let current = std::mem::replace(&mut self.tables, snapshot);
        self.future.insert(0, current);
        self.selected = None;
    }

    /// Step forward one undone commit. A no-op when nothing has been
    /// undone. Clears the selection for the same reason as `undo`.
    pub fn redo(&mut self) {
        if self.future.is_empty() {
            return;
        }
        let snapshot = self.future.remove(0);
        let current = std::mem::replace(&mut self.tables, snapshot);
        self.past.push(current);
        self.selected = None;
    }

    /// Whether `undo` would change anything. Drives UI enablement.
    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    /// Whether `redo` would change anything.
    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Replace the live collection, recording the prior one for undo. A
    /// fresh commit invalidates the redo path.
    fn commit(&mut self, tables: Vec<Table>) {
        let prior = std::mem::replace(&mut self.tables, tables);
        self.past.push(prior);
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_schema::{Column, SchemaRef, Table};

    fn users() -> Table {
        Table::new("users")
            .logical_name("User")
            .schema(SchemaRef::name("userdb"))
            .column(Column::new("id").ty("bigint").unsigned().auto_increment())
            .column(Column::new("username").ty("varchar(50)"))
            .column(Column::new("email").ty("varchar(255)"))
            .position(10.0, 10.0)
    }

    fn posts() -> Table {
        Table::new("posts")
            .logical_name("Post")
            .schema(SchemaRef::name("userdb"))
            .column(Column::new("id").ty("bigint").unsigned().auto_increment())
            .column(Column::new("title").ty("varchar(50)"))
            .column(Column::new("content").ty("text"))
            .column(Column::new("author_id").ty("bigint").unsigned())
            .position(10.0, 260.0)
    }

    fn seeded() -> ErdStore {
        ErdStore::new(vec![users(), posts()])
    }

    fn rename_posts_column(store: &ErdStore, from: &str, to: &str) -> Table {
        let posts = store
            .tables()
            .iter()
            .find(|t| t.name == "posts")
            .unwrap()
            .clone();
        let mut columns = posts.columns.clone();
        let slot = columns.iter().position(|c| c.name == from).unwrap();
        columns[slot].name = to.into();
        posts.with_columns(columns)
    }

    /// The end-to-end scenario: renaming posts.title to headline through a
    /// commit, then walking the history both ways.
    #[test]
    fn rename_commit_undo_redo_round_trip() {
        let mut store = seeded();

        store.update_table(rename_posts_column(&store, "title", "headline"));
        assert_eq!(store.tables()[1].columns[1].name, "headline");
        assert_eq!(store.past.len(), 1);
        assert_eq!(store.past[0][1].columns[1].name, "title");

        store.undo();
        assert_eq!(store.tables()[1].columns[1].name, "title");
        assert!(store.past.is_empty());
        assert_eq!(store.future.len(), 1);

        store.redo();
        assert_eq!(store.tables()[1].columns[1].name, "headline");
        assert_eq!(store.past.len(), 1);
        assert!(store.future.is_empty());
    }

    /// Undo once per commit restores the seed exactly; redo the same number
    /// of times replays to the final state.
    #[test]
    fn undo_redo_inverse_law() {
        let mut store = seeded();
        let seed = store.tables().to_vec();

        store.update_table(rename_posts_column(&store, "title", "headline"));
        store.add_table(Table::new("table-1"));
        store.move_table("users", tabula_schema::Position::new(200.0, 80.0));
        let final_state = store.tables().to_vec();

        for _ in 0..3 {
            store.undo();
        }
        assert_eq!(store.tables(), &seed[..]);
        assert!(!store.can_undo());

        for _ in 0..3 {
            store.redo();
        }
        assert_eq!(store.tables(), &final_state[..]);
        assert!(!store.can_redo());
    }

    /// A fresh commit after an undo invalidates the redo path.
    #[test]
    fn new_commit_truncates_future() {
        let mut store = seeded();
        store.update_table(rename_posts_column(&store, "title", "headline"));
        store.undo();
        assert!(store.can_redo());

        store.update_table(rename_posts_column(&store, "content", "body"));
        assert!(!store.can_redo());
        assert!(store.future.is_empty());
    }

    /// Replacement is keyed by name and touches exactly one entry.
    #[test]
    fn update_table_replaces_only_matching_name() {
        let mut store = seeded();
        let untouched = store.tables()[0].clone();

        store.update_table(rename_posts_column(&store, "title", "headline"));
        assert_eq!(store.tables()[0], untouched);
        assert_eq!(store.selected_table().map(|t| t.name.as_str()), Some("posts"));
    }

    /// An unknown name is a no-op: no replacement, no history, no
    /// selection change.
    #[test]
    fn update_table_with_unknown_name_is_noop() {
        let mut store = seeded();
        let before = store.tables().to_vec();

        store.update_table(Table::new("comments"));
        assert_eq!(store.tables(), &before[..]);
        assert!(!store.can_undo());
        assert!(store.selected_table().is_none());
    }

    /// Adding a table participates in history like any other commit, and a
    /// duplicate name is refused without side effects.
    #[test]
    fn add_table_pushes_history_and_refuses_duplicates() {
        let mut store = seeded();
        store.add_table(Table::new("table-1"));
        assert_eq!(store.tables().len(), 3);
        assert!(store.can_undo());

        store.add_table(Table::new("users"));
        assert_eq!(store.tables().len(), 3);
        assert_eq!(store.past.len(), 1);
    }

    /// Moving a node commits through the history but leaves the selection
    /// alone, so dragging never opens the side panel.
    #[test]
    fn move_table_commits_without_selecting() {
        let mut store = seeded();
        let users_table = store.tables()[0].clone();
        store.select_table(Some(&users_table));

        store.move_table("posts", tabula_schema::Position::new(300.0, 120.0));
        assert_eq!(store.tables()[1].position.x, 300.0);
        assert!(store.can_undo());
        assert_eq!(store.selected_table().map(|t| t.name.as_str()), Some("users"));

        store.undo();
        assert_eq!(store.tables()[1].position.y, 260.0);
    }

    /// Boundary calls leave all four pieces of state untouched.
    #[test]
    fn undo_redo_at_boundary_are_noops() {
        let mut store = seeded();
        let users_table = store.tables()[0].clone();
        store.select_table(Some(&users_table));
        let tables_before = store.tables().to_vec();

        store.undo();
        assert_eq!(store.tables(), &tables_before[..]);
        assert!(store.past.is_empty() && store.future.is_empty());
        assert_eq!(store.selected_table().map(|t| t.name.as_str()), Some("users"));

        store.redo();
        assert_eq!(store.tables(), &tables_before[..]);
        assert!(store.past.is_empty() && store.future.is_empty());
        assert_eq!(store.selected_table().map(|t| t.name.as_str()), Some("users"));
    }

    /// Undo and redo both drop the selection rather than guessing at what
    /// it should point to in the restored snapshot.
    #[test]
    fn undo_and_redo_clear_selection() {
        let mut store = seeded();
        store.update_table(rename_posts_column(&store, "title", "headline"));
        assert!(store.selected_table().is_some());

        store.undo();
        assert!(store.selected_table().is_none());

        let users_table = store.tables()[0].clone();
        store.select_table(Some(&users_table));
        store.redo();
        assert!(store.selected_table().is_none());
    }

    /// Selecting None closes the panel conceptually; the table list is
    /// untouched.
    #[test]
    fn select_none_clears_selection_only() {
        let mut store = seeded();
        let users_table = store.tables()[0].clone();
        store.select_table(Some(&users_table));
        store.select_table(None);
        assert!(store.selected_table().is_none());
        assert_eq!(store.tables().len(), 2);
        assert!(!store.can_undo());
    }
}
