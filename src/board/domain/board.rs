//! Read-only board projection.

use super::{Column, ColumnId};
use crate::task::domain::{CommentView, TaskId, TaskView};
use serde::Serialize;
use std::collections::HashMap;

/// Column as rendered on the board, with its ordered task bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardColumn {
    /// Column identifier.
    pub id: ColumnId,
    /// Display title.
    pub title: String,
    /// Sort position from storage.
    pub order: i32,
    /// Task ids in bucket order.
    pub task_ids: Vec<TaskId>,
}

impl From<Column> for BoardColumn {
    fn from(column: Column) -> Self {
        Self {
            title: column.title().to_owned(),
            order: column.order(),
            id: column.id().clone(),
            task_ids: Vec::new(),
        }
    }
}

/// Derived board aggregate; never stored.
///
/// Every task placed on the board lands in [`Board::tasks`]. It is also
/// appended to a column bucket, but only when its state equals an existing
/// column id. Tasks in any other state are kept yet belong to no column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    tasks: HashMap<TaskId, TaskView>,
    columns: HashMap<ColumnId, BoardColumn>,
    column_order: Vec<ColumnId>,
}

impl Board {
    /// Creates a board with empty buckets for `columns`.
    #[must_use]
    pub fn new(columns: Vec<Column>, column_order: Vec<ColumnId>) -> Self {
        Self {
            tasks: HashMap::new(),
            columns: columns
                .into_iter()
                .map(|column| (column.id().clone(), BoardColumn::from(column)))
                .collect(),
            column_order,
        }
    }

    /// Adds a task, returning `true` when it was placed in a column bucket.
    ///
    /// Callers feed tasks newest first, so bucket order is reverse creation
    /// order.
    pub fn place_task(&mut self, view: TaskView) -> bool {
        let id = view.task.id();
        let bucket = ColumnId::new(view.task.state().as_str())
            .ok()
            .and_then(|column_id| self.columns.get_mut(&column_id));
        let placed = match bucket {
            Some(column) => {
                column.task_ids.push(id);
                true
            }
            None => false,
        };
        self.tasks.insert(id, view);
        placed
    }

    /// Replaces the comments of a placed task. Returns `false` for an unknown
    /// task.
    pub fn attach_comments(&mut self, id: TaskId, comments: Vec<CommentView>) -> bool {
        self.tasks.get_mut(&id).is_some_and(|view| {
            view.comments = comments;
            true
        })
    }

    /// Returns every task on the board, keyed by id.
    #[must_use]
    pub const fn tasks(&self) -> &HashMap<TaskId, TaskView> {
        &self.tasks
    }

    /// Returns one task.
    #[must_use]
    pub fn task(&self, id: TaskId) -> Option<&TaskView> {
        self.tasks.get(&id)
    }

    /// Returns every column, keyed by id.
    #[must_use]
    pub const fn columns(&self) -> &HashMap<ColumnId, BoardColumn> {
        &self.columns
    }

    /// Returns one column.
    #[must_use]
    pub fn column(&self, id: &ColumnId) -> Option<&BoardColumn> {
        self.columns.get(id)
    }

    /// Returns the rendering order.
    #[must_use]
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }

    /// Returns `true` when the task sits in some column bucket.
    #[must_use]
    pub fn is_placed(&self, id: TaskId) -> bool {
        self.columns
            .values()
            .any(|column| column.task_ids.contains(&id))
    }

    /// Returns the tasks that belong to no column.
    #[must_use]
    pub fn unplaced_task_ids(&self) -> Vec<TaskId> {
        self.tasks
            .keys()
            .copied()
            .filter(|id| !self.is_placed(*id))
            .collect()
    }

    /// Returns the columns named by the column order, in that order.
    ///
    /// Ids in the order without a stored column are skipped; stored columns
    /// missing from the order are omitted.
    #[must_use]
    pub fn ordered_columns(&self) -> Vec<&BoardColumn> {
        self.column_order
            .iter()
            .filter_map(|id| self.columns.get(id))
            .collect()
    }
}
