use crate::domain::due_date::{self, DueDateInput};
use crate::domain::error::TaskError;
use crate::domain::repository::TaskRepository;
use crate::domain::task::{CreateTask, DueDateDirective, Task, TaskPatch, TaskStatus, UpdateOutcome};

pub trait TaskService {
    fn create(&self, description: &str, due_date_text: &str) -> Result<Task, TaskError>;
    fn list(&self, filter: Option<TaskStatus>) -> Result<Vec<Task>, TaskError>;
    fn complete_nth_active(&self, position: usize) -> Result<Task, TaskError>;
    fn update_nth_active(
        &self,
        position: usize,
        new_description: Option<String>,
        due_date: DueDateDirective,
    ) -> Result<UpdateOutcome, TaskError>;
    fn erase_completed(&self) -> Result<usize, TaskError>;
    fn wipe_all(&self) -> Result<(), TaskError>;
}

pub struct TaskServiceImpl<R: TaskRepository> {
    repo: R,
}

impl<R: TaskRepository> TaskServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    // Positions are 1-based and refer to the Active list as last shown. The
    // repository re-checks the id against its freshest load, so a vanished
    // task surfaces as NotFound rather than touching a different record.
    fn nth_active(&self, position: usize) -> Result<Task, TaskError> {
        let mut active = self.repo.list(Some(TaskStatus::Active))?;
        if position == 0 || position > active.len() {
            return Err(TaskError::OutOfRange(position));
        }
        Ok(active.swap_remove(position - 1))
    }
}

impl<R: TaskRepository> TaskService for TaskServiceImpl<R> {
    fn create(&self, description: &str, due_date_text: &str) -> Result<Task, TaskError> {
        let description = description.trim();
        if description.is_empty() {
            return Err(TaskError::Validation("task description must not be empty".into()));
        }
        let due_date = match due_date::validate(due_date_text) {
            DueDateInput::Empty => None,
            DueDateInput::Valid(normalized) => Some(normalized),
            DueDateInput::Invalid => {
                return Err(TaskError::Validation(
                    "due date must look like DD.MM.YYYY HH:MM".into(),
                ));
            }
        };
        self.repo.create(CreateTask { description: description.to_string(), due_date })
    }

    fn list(&self, filter: Option<TaskStatus>) -> Result<Vec<Task>, TaskError> {
        self.repo.list(filter)
    }

    fn complete_nth_active(&self, position: usize) -> Result<Task, TaskError> {
        let target = self.nth_active(position)?;
        self.repo.complete(&target.id)
    }

    fn update_nth_active(
        &self,
        position: usize,
        new_description: Option<String>,
        due_date: DueDateDirective,
    ) -> Result<UpdateOutcome, TaskError> {
        let target = self.nth_active(position)?;
        let new_description = match new_description {
            Some(text) => {
                let text = text.trim().to_string();
                if text.is_empty() {
                    return Err(TaskError::Validation("task description must not be empty".into()));
                }
                Some(text)
            }
            None => None,
        };
        let due_date = match due_date {
            DueDateDirective::Set(text) => match due_date::validate(&text) {
                DueDateInput::Empty => DueDateDirective::Clear,
                DueDateInput::Valid(normalized) => DueDateDirective::Set(normalized),
                DueDateInput::Invalid => {
                    return Err(TaskError::Validation(
                        "due date must look like DD.MM.YYYY HH:MM".into(),
                    ));
                }
            },
            other => other,
        };
        self.repo.update(&target.id, TaskPatch { description: new_description, due_date })
    }

    fn erase_completed(&self) -> Result<usize, TaskError> {
        self.repo.erase_completed()
    }

    fn wipe_all(&self) -> Result<(), TaskError> {
        self.repo.wipe_all()
    }
}
