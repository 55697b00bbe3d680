use tracing::warn;

use super::codec::RecordCodec;
use super::file_store::{FileStore, StoreConfig};
use crate::domain::error::TaskError;
use crate::domain::repository::TaskRepository;
use crate::domain::task::{
    CreateTask, DueDateDirective, Task, TaskId, TaskPatch, TaskStatus, UpdateOutcome,
};

pub struct FileTaskRepository {
    store: FileStore,
    codec: RecordCodec,
}

impl FileTaskRepository {
    pub fn new(config: StoreConfig) -> Self {
        let codec = RecordCodec::new(&config);
        Self { store: FileStore::new(config.path), codec }
    }

    fn load_all(&self) -> Result<Vec<Task>, TaskError> {
        let mut tasks = Vec::new();
        for line in self.store.load()? {
            match self.codec.decode(&line) {
                Some(task) => tasks.push(task),
                None => warn!(%line, "skipping malformed task record"),
            }
        }
        Ok(tasks)
    }

    fn persist(&self, tasks: &[Task]) -> Result<(), TaskError> {
        let lines: Vec<String> = tasks.iter().map(|task| self.codec.encode(task)).collect();
        self.store.replace_all(&lines)?;
        Ok(())
    }

    fn check_description(&self, description: &str) -> Result<(), TaskError> {
        if description.contains(self.codec.delimiter()) {
            return Err(TaskError::Validation(format!(
                "task description must not contain \"{}\"",
                self.codec.delimiter()
            )));
        }
        Ok(())
    }
}

// First match wins when the store holds duplicate ids (possible only after
// manual file edits); the condition is logged rather than resolved.
fn first_match<'a>(tasks: &'a mut [Task], id: &TaskId) -> Option<&'a mut Task> {
    if tasks.iter().filter(|task| &task.id == id).count() > 1 {
        warn!(%id, "duplicate task id in store, touching first match only");
    }
    tasks.iter_mut().find(|task| &task.id == id)
}

impl TaskRepository for FileTaskRepository {
    fn create(&self, input: CreateTask) -> Result<Task, TaskError> {
        self.check_description(&input.description)?;
        let task = Task::new(input.description, input.due_date);
        self.store.append(&self.codec.encode(&task))?;
        Ok(task)
    }

    fn list(&self, filter: Option<TaskStatus>) -> Result<Vec<Task>, TaskError> {
        let tasks = self.load_all()?;
        Ok(match filter {
            Some(status) => tasks.into_iter().filter(|task| task.status == status).collect(),
            None => tasks,
        })
    }

    fn find(&self, id: &TaskId) -> Result<Option<Task>, TaskError> {
        Ok(self.load_all()?.into_iter().find(|task| &task.id == id))
    }

    fn complete(&self, id: &TaskId) -> Result<Task, TaskError> {
        let mut tasks = self.load_all()?;
        let Some(task) = first_match(&mut tasks, id) else {
            return Err(TaskError::NotFound(id.clone()));
        };
        task.status = TaskStatus::Done;
        let completed = task.clone();
        self.persist(&tasks)?;
        Ok(completed)
    }

    fn update(&self, id: &TaskId, patch: TaskPatch) -> Result<UpdateOutcome, TaskError> {
        if let Some(description) = &patch.description {
            self.check_description(description)?;
        }
        let mut tasks = self.load_all()?;
        let Some(task) = first_match(&mut tasks, id) else {
            return Err(TaskError::NotFound(id.clone()));
        };
        if patch.description.is_none() && patch.due_date == DueDateDirective::Unchanged {
            return Ok(UpdateOutcome::NoChange);
        }
        if let Some(description) = patch.description {
            task.description = description;
        }
        match patch.due_date {
            DueDateDirective::Unchanged => {}
            DueDateDirective::Clear => task.due_date = None,
            DueDateDirective::Set(text) => task.due_date = Some(text),
        }
        let updated = task.clone();
        self.persist(&tasks)?;
        Ok(UpdateOutcome::Updated(updated))
    }

    fn erase_completed(&self) -> Result<usize, TaskError> {
        let tasks = self.load_all()?;
        let before = tasks.len();
        let kept: Vec<Task> = tasks.into_iter().filter(|task| task.status == TaskStatus::Active).collect();
        let removed = before - kept.len();
        self.persist(&kept)?;
        Ok(removed)
    }

    fn wipe_all(&self) -> Result<(), TaskError> {
        self.persist(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn repo_in(temp: &TempDir) -> FileTaskRepository {
        FileTaskRepository::new(StoreConfig::at(temp.path().join("db.txt")))
    }

    fn read_db(temp: &TempDir) -> String {
        fs::read_to_string(temp.path().join("db.txt")).unwrap()
    }

    #[test]
    fn create_appends_one_encoded_record_per_task() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        repo.create(CreateTask { description: "buy milk".into(), due_date: None }).unwrap();
        repo.create(CreateTask { description: "pay rent".into(), due_date: Some("01.01.2031 09:00".into()) })
            .unwrap();
        let content = read_db(&temp);
        assert_eq!(content.lines().count(), 2);
        assert!(!content.ends_with('\n'));
        assert!(content.contains("buy milk<>[]<>"));
        assert!(content.contains("pay rent<>[01.01.2031 09:00]<>"));
    }

    #[test]
    fn create_rejects_descriptions_containing_the_delimiter() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let err = repo
            .create(CreateTask { description: "a<>b".into(), due_date: None })
            .unwrap_err();
        assert!(matches!(err, TaskError::Validation(_)));
        assert!(!temp.path().join("db.txt").exists());
    }

    #[test]
    fn malformed_lines_are_dropped_and_the_rest_load() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let task = repo.create(CreateTask { description: "good".into(), due_date: None }).unwrap();
        let path = temp.path().join("db.txt");
        let mut content = fs::read_to_string(&path).unwrap();
        content.push_str("\nonly<>three<>fields");
        fs::write(&path, content).unwrap();

        let tasks = repo.list(None).unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, task.id);
    }

    #[test]
    fn any_rewrite_purges_previously_dropped_lines() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        repo.create(CreateTask { description: "good".into(), due_date: None }).unwrap();
        let path = temp.path().join("db.txt");
        fs::write(&path, format!("{}\ngarbage line", fs::read_to_string(&path).unwrap())).unwrap();

        assert_eq!(repo.erase_completed().unwrap(), 0);
        assert!(!read_db(&temp).contains("garbage"));
        assert_eq!(repo.list(None).unwrap().len(), 1);
    }

    #[test]
    fn complete_flips_status_in_the_stored_record() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let task = repo.create(CreateTask { description: "buy milk".into(), due_date: None }).unwrap();
        let completed = repo.complete(&task.id).unwrap();
        assert_eq!(completed.status, TaskStatus::Done);
        assert!(read_db(&temp).ends_with("<>d"));
        assert_eq!(repo.find(&task.id).unwrap().unwrap().status, TaskStatus::Done);
    }

    #[test]
    fn complete_on_a_vanished_id_is_not_found() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let task = repo.create(CreateTask { description: "gone".into(), due_date: None }).unwrap();
        repo.wipe_all().unwrap();
        assert!(matches!(repo.complete(&task.id), Err(TaskError::NotFound(_))));
    }

    #[test]
    fn update_clear_writes_the_empty_wrapped_sentinel() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let task = repo
            .create(CreateTask { description: "pay rent".into(), due_date: Some("01.01.2031 09:00".into()) })
            .unwrap();
        repo.update(&task.id, TaskPatch { description: None, due_date: DueDateDirective::Clear })
            .unwrap();
        let content = read_db(&temp);
        assert!(content.contains("pay rent<>[]<>"));
        assert!(!content.contains("01.01.2031"));
    }

    #[test]
    fn update_without_changes_leaves_the_file_untouched() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        repo.create(CreateTask { description: "good".into(), due_date: None }).unwrap();
        let path = temp.path().join("db.txt");
        fs::write(&path, format!("{}\ngarbage line", fs::read_to_string(&path).unwrap())).unwrap();
        let before = read_db(&temp);

        let task = repo.list(None).unwrap().remove(0);
        let outcome = repo
            .update(&task.id, TaskPatch { description: None, due_date: DueDateDirective::Unchanged })
            .unwrap();
        assert_eq!(outcome, UpdateOutcome::NoChange);
        // No write happened: even the garbage line is still there.
        assert_eq!(read_db(&temp), before);
    }

    #[test]
    fn updates_preserve_file_order() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        let first = repo.create(CreateTask { description: "first".into(), due_date: None }).unwrap();
        repo.create(CreateTask { description: "second".into(), due_date: None }).unwrap();
        repo.update(&first.id, TaskPatch { description: Some("first edited".into()), due_date: DueDateDirective::Unchanged })
            .unwrap();
        let tasks = repo.list(None).unwrap();
        assert_eq!(tasks[0].description, "first edited");
        assert_eq!(tasks[1].description, "second");
    }

    #[test]
    fn wipe_all_leaves_an_empty_file() {
        let temp = TempDir::new().unwrap();
        let repo = repo_in(&temp);
        repo.create(CreateTask { description: "a".into(), due_date: None }).unwrap();
        repo.wipe_all().unwrap();
        assert_eq!(read_db(&temp), "");
        assert!(repo.list(None).unwrap().is_empty());
    }
}
