use super::error::TaskError;
use super::task::{CreateTask, Task, TaskId, TaskPatch, TaskStatus, UpdateOutcome};

pub trait TaskRepository {
    fn create(&self, input: CreateTask) -> Result<Task, TaskError>;
    fn list(&self, filter: Option<TaskStatus>) -> Result<Vec<Task>, TaskError>;
    fn find(&self, id: &TaskId) -> Result<Option<Task>, TaskError>;
    fn complete(&self, id: &TaskId) -> Result<Task, TaskError>;
    fn update(&self, id: &TaskId, patch: TaskPatch) -> Result<UpdateOutcome, TaskError>;
    fn erase_completed(&self) -> Result<usize, TaskError>;
    fn wipe_all(&self) -> Result<(), TaskError>;
}
