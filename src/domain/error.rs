use thiserror::Error;

use super::task::TaskId;

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),
    #[error("task {0} no longer exists")]
    NotFound(TaskId),
    #[error("no active task at position {0}")]
    OutOfRange(usize),
    #[error("task storage failure: {0}")]
    Io(#[from] std::io::Error),
}
