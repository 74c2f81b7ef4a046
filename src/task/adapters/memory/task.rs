//! In-memory repository for task lifecycle tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::task::{
    domain::{Comment, CommentOrder, Task, TaskId, TaskPatch, TaskState},
    ports::{PatchOutcome, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use crate::user::domain::UserId;

/// Thread-safe in-memory task repository.
///
/// Insertion sequence numbers break ties between equal creation timestamps,
/// so listings stay deterministic under a coarse clock.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    next_sequence: u64,
    tasks: HashMap<TaskId, StoredTask>,
    comments: HashMap<TaskId, Vec<Comment>>,
}

#[derive(Debug)]
struct StoredTask {
    sequence: u64,
    task: Task,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves every task in `released` to `backlog` and clears the assignee.
    ///
    /// Synchronous so the board adapter can run it under its own lock.
    pub(crate) fn release_state(
        &self,
        released: &TaskState,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        let mut state = self.write()?;
        Ok(release_matching(&mut state, backlog, at, |task| {
            task.state() == released
        }))
    }

    fn read(&self) -> TaskRepositoryResult<RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| lock_error(&err))
    }

    fn write(&self) -> TaskRepositoryResult<RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| lock_error(&err))
    }
}

fn lock_error(err: &impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Releases every task matching `predicate`, returning how many changed.
fn release_matching(
    state: &mut InMemoryTaskState,
    backlog: &TaskState,
    at: DateTime<Utc>,
    predicate: impl Fn(&Task) -> bool,
) -> u64 {
    let mut released = 0;
    for stored in state.tasks.values_mut() {
        if predicate(&stored.task) {
            stored.task.release_to(backlog, at);
            released += 1;
        }
    }
    released
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        let sequence = state.next_sequence;
        state.next_sequence += 1;
        state.tasks.insert(
            task.id(),
            StoredTask {
                sequence,
                task: task.clone(),
            },
        );
        Ok(())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).map(|stored| stored.task.clone()))
    }

    async fn list_newest_first(&self) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut stored: Vec<&StoredTask> = state.tasks.values().collect();
        stored.sort_by(|left, right| {
            (right.task.created_at(), right.sequence).cmp(&(left.task.created_at(), left.sequence))
        });
        Ok(stored.into_iter().map(|entry| entry.task.clone()).collect())
    }

    async fn apply_patch(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<PatchOutcome>> {
        let mut state = self.write()?;
        let Some(stored) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        let previous = stored.task.snapshot();
        stored.task.apply_patch(patch, at);
        Ok(Some(PatchOutcome {
            previous,
            task: stored.task.clone(),
        }))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        let removed = state.tasks.remove(&id).is_some();
        state.comments.remove(&id);
        Ok(removed)
    }

    async fn release_assignee(
        &self,
        user_id: UserId,
        backlog: &TaskState,
        at: DateTime<Utc>,
    ) -> TaskRepositoryResult<u64> {
        let mut state = self.write()?;
        Ok(release_matching(&mut state, backlog, at, |task| {
            task.assignee() == Some(user_id)
        }))
    }

    async fn add_comment(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let mut state = self.write()?;
        if !state.tasks.contains_key(&comment.task_id()) {
            return Err(TaskRepositoryError::NotFound(comment.task_id()));
        }
        let duplicate = state
            .comments
            .values()
            .flatten()
            .any(|existing| existing.id() == comment.id());
        if duplicate {
            return Err(TaskRepositoryError::DuplicateComment(comment.id()));
        }
        state
            .comments
            .entry(comment.task_id())
            .or_default()
            .push(comment.clone());
        Ok(())
    }

    async fn comments_for(
        &self,
        task_id: TaskId,
        order: CommentOrder,
    ) -> TaskRepositoryResult<Vec<Comment>> {
        let state = self.read()?;
        let mut comments = state.comments.get(&task_id).cloned().unwrap_or_default();
        comments.sort_by_key(Comment::created_at);
        if order == CommentOrder::NewestFirst {
            comments.reverse();
        }
        Ok(comments)
    }
}
