pub mod due_date;
pub mod error;
pub mod repository;
pub mod task;
