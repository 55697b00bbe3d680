use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub delimiter: String,
    pub active_symbol: String,
    pub done_symbol: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("db.txt"),
            delimiter: "<>".into(),
            active_symbol: "a".into(),
            done_symbol: "d".into(),
        }
    }
}

impl StoreConfig {
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), ..Self::default() }
    }
}

pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self { Self { path } }

    pub fn load(&self) -> io::Result<Vec<String>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "task file not found, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err),
        };
        Ok(content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(str::to_string)
            .collect())
    }

    // Whole-file overwrite, not crash-safe: a failure mid-write can leave the
    // file truncated.
    pub fn replace_all(&self, lines: &[String]) -> io::Result<()> {
        fs::write(&self.path, lines.join("\n"))
    }

    pub fn append(&self, line: &str) -> io::Result<()> {
        let file_is_empty = match fs::read_to_string(&self.path) {
            Ok(content) => content.is_empty(),
            Err(err) if err.kind() == io::ErrorKind::NotFound => true,
            Err(err) => return Err(err),
        };
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        if file_is_empty {
            write!(file, "{line}")?;
        } else {
            // Separating newline only when there is prior content, so the
            // file never ends in a blank line.
            write!(file, "\n{line}")?;
        }
        Ok(())
    }
}
