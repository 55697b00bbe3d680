use chrono::{Local, NaiveDateTime, Timelike};
use uuid::Uuid;

use super::due_date::DUE_DATE_FORMAT;

pub const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
const CREATED_AT_DISPLAY_FORMAT: &str = "%d.%m.%Y %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TaskId(pub Uuid);

impl Default for TaskId {
    fn default() -> Self { Self(Uuid::new_v4()) }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { self.0.fmt(f) }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus { Active, Done }

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: TaskId,
    pub description: String,
    pub due_date: Option<String>,
    pub created_at: NaiveDateTime,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(description: String, due_date: Option<String>) -> Self {
        let now = Local::now().naive_local();
        // The stored timestamp format carries microseconds, not nanoseconds.
        let created_at = now.with_nanosecond(now.nanosecond() / 1_000 * 1_000).unwrap_or(now);
        Self { id: TaskId::default(), description, due_date, created_at, status: TaskStatus::Active }
    }

    pub fn due_date_wrapped(&self) -> String {
        format!("[{}]", self.due_date.as_deref().unwrap_or(""))
    }

    pub fn parsed_due_date(&self) -> Option<NaiveDateTime> {
        let text = self.due_date.as_deref()?;
        NaiveDateTime::parse_from_str(text, DUE_DATE_FORMAT).ok()
    }

    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        self.status == TaskStatus::Active && self.parsed_due_date().is_some_and(|due| due < now)
    }

    pub fn display_line(&self, now: NaiveDateTime) -> String {
        let glyph = match self.status { TaskStatus::Active => "✓", TaskStatus::Done => "✕" };
        let overdue = if self.is_overdue(now) { " (overdue)" } else { "" };
        format!(
            "{glyph}{overdue} {} {} (created: {})",
            self.description,
            self.due_date_wrapped(),
            self.created_at.format(CREATED_AT_DISPLAY_FORMAT),
        )
    }
}

#[derive(Debug, Clone)]
pub struct CreateTask {
    pub description: String,
    pub due_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDateDirective { Unchanged, Clear, Set(String) }

#[derive(Debug, Clone)]
pub struct TaskPatch {
    pub description: Option<String>,
    pub due_date: DueDateDirective,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome { Updated(Task), NoChange }
