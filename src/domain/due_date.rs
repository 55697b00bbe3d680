use chrono::NaiveDateTime;

pub const DUE_DATE_FORMAT: &str = "%d.%m.%Y %H:%M";

// Empty means "no due date" and is always accepted; Invalid means the text
// was present but rejected, so callers can tell the two apart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DueDateInput {
    Empty,
    Valid(String),
    Invalid,
}

pub fn validate(text: &str) -> DueDateInput {
    let text = text.trim();
    if text.is_empty() {
        return DueDateInput::Empty;
    }
    match NaiveDateTime::parse_from_str(text, DUE_DATE_FORMAT) {
        Ok(parsed) => DueDateInput::Valid(parsed.format(DUE_DATE_FORMAT).to_string()),
        Err(_) => DueDateInput::Invalid,
    }
}
