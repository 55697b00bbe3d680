use chrono::NaiveDateTime;
use uuid::Uuid;

use super::file_store::StoreConfig;
use crate::domain::task::{CREATED_AT_FORMAT, Task, TaskId, TaskStatus};

pub struct RecordCodec {
    delimiter: String,
    active_symbol: String,
    done_symbol: String,
}

impl RecordCodec {
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            delimiter: config.delimiter.clone(),
            active_symbol: config.active_symbol.clone(),
            done_symbol: config.done_symbol.clone(),
        }
    }

    pub fn delimiter(&self) -> &str { &self.delimiter }

    pub fn encode(&self, task: &Task) -> String {
        [
            task.id.to_string(),
            task.description.clone(),
            task.due_date_wrapped(),
            task.created_at.format(CREATED_AT_FORMAT).to_string(),
            self.status_symbol(task.status).to_string(),
        ]
        .join(&self.delimiter)
    }

    // None on any malformed line; the caller decides how to report it.
    pub fn decode(&self, line: &str) -> Option<Task> {
        let fields: Vec<&str> = line.split(self.delimiter.as_str()).collect();
        let &[id, description, due_date, created_at, status] = fields.as_slice() else {
            return None;
        };
        let id = TaskId(Uuid::parse_str(id).ok()?);
        let created_at = NaiveDateTime::parse_from_str(created_at, CREATED_AT_FORMAT).ok()?;
        let status = if status == self.active_symbol {
            TaskStatus::Active
        } else if status == self.done_symbol {
            TaskStatus::Done
        } else {
            return None;
        };
        Some(Task {
            id,
            description: description.to_string(),
            due_date: unwrap_due_date(due_date),
            created_at,
            status,
        })
    }

    fn status_symbol(&self, status: TaskStatus) -> &str {
        match status {
            TaskStatus::Active => &self.active_symbol,
            TaskStatus::Done => &self.done_symbol,
        }
    }
}

// Strips the [] wrapping when present; a bare field is taken as-is so a
// hand-edited record still loads.
fn unwrap_due_date(field: &str) -> Option<String> {
    let inner = field
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .unwrap_or(field);
    if inner.is_empty() { None } else { Some(inner.to_string()) }
}
