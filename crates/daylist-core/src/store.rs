use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, info};

use crate::task::Task;

pub const TASKS_FILE_NAME: &str = "tasks.json";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("task file {} is not a valid task list: {source}", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode tasks for {}: {source}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt { .. })
    }

    fn io(action: &'static str, path: &Path, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.to_path_buf(),
            source,
        }
    }
}

/// JSON file holding the whole task collection as one array.
#[derive(Debug, Clone)]
pub struct TaskStore {
    path: PathBuf,
}

impl TaskStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Opens the store inside `data_dir`, creating the directory if needed.
    #[tracing::instrument(skip(data_dir))]
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(data_dir).map_err(|err| StoreError::io("create", data_dir, err))?;

        let path = data_dir.join(TASKS_FILE_NAME);
        info!(
            data_dir = %data_dir.display(),
            tasks = %path.display(),
            "opened task store"
        );
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the collection. A missing or blank file is an empty collection;
    /// anything else that does not parse is reported as corrupt.
    #[tracing::instrument(skip(self), fields(file = %self.path.display()))]
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let raw = match fs::read(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                info!("task file does not exist yet; starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io("read", &self.path, err)),
        };

        if raw.iter().all(u8::is_ascii_whitespace) {
            debug!("task file is blank; starting empty");
            return Ok(Vec::new());
        }

        let tasks: Vec<Task> = serde_json::from_slice(&raw).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        debug!(count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Rewrites the whole file through a temp file and rename.
    #[tracing::instrument(skip(self, tasks), fields(file = %self.path.display(), count = tasks.len()))]
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let payload = encode_pretty(tasks).map_err(|source| StoreError::Encode {
            path: self.path.clone(),
            source,
        })?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut temp =
            NamedTempFile::new_in(dir).map_err(|err| StoreError::io("create temp file in", dir, err))?;
        temp.write_all(&payload)
            .and_then(|()| temp.write_all(b"\n"))
            .and_then(|()| temp.flush())
            .map_err(|err| StoreError::io("write", temp.path(), err))?;

        temp.persist(&self.path)
            .map_err(|err| StoreError::io("replace", &self.path, err.error))?;

        debug!("saved tasks");
        Ok(())
    }
}

fn encode_pretty(tasks: &[Task]) -> Result<Vec<u8>, serde_json::Error> {
    let mut out = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    tasks.serialize(&mut ser)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use tempfile::tempdir;

    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).expect("valid date")
    }

    #[test]
    fn missing_file_loads_empty() {
        let temp = tempdir().expect("tempdir");
        let store = TaskStore::new(temp.path().join("tasks.json"));

        assert!(store.load().expect("load").is_empty());
    }

    #[test]
    fn blank_file_loads_empty() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("tasks.json");
        fs::write(&path, "  \n").expect("write blank file");

        assert!(TaskStore::new(path).load().expect("load").is_empty());
    }

    #[test]
    fn malformed_file_is_corrupt() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("tasks.json");
        fs::write(&path, "[{\"title\": \"half").expect("write broken file");

        let err = TaskStore::new(path).load().expect_err("corrupt file must fail");
        assert!(err.is_corrupt(), "unexpected error: {err}");
    }

    #[test]
    fn non_utf8_file_is_corrupt() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("tasks.json");
        fs::write(&path, [b'[', 0xff, 0xfe, b']']).expect("write file");

        let err = TaskStore::new(path).load().expect_err("invalid encoding must fail");
        assert!(err.is_corrupt(), "unexpected error: {err}");
    }

    #[test]
    fn object_instead_of_array_is_corrupt() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("tasks.json");
        fs::write(&path, r#"{"title": "a", "date": "2024-06-01"}"#).expect("write file");

        let err = TaskStore::new(path).load().expect_err("wrong shape must fail");
        assert!(err.is_corrupt());
    }

    #[test]
    fn save_round_trips_in_order() {
        let temp = tempdir().expect("tempdir");
        let store = TaskStore::open(temp.path()).expect("open store");

        let mut done = Task::new("Pay rent".to_string(), day(1));
        done.completed = true;
        let tasks = vec![
            Task::new("Buy milk".to_string(), day(2)),
            done,
            Task::new("Buy milk".to_string(), day(2)),
        ];

        store.save(&tasks).expect("save");
        assert_eq!(store.load().expect("load"), tasks);

        store.save(&[]).expect("save empty");
        assert!(store.load().expect("load empty").is_empty());
    }

    #[test]
    fn save_writes_four_space_indented_array() {
        let temp = tempdir().expect("tempdir");
        let store = TaskStore::open(temp.path()).expect("open store");
        store
            .save(&[Task::new("Buy milk".to_string(), day(1))])
            .expect("save");

        let text = fs::read_to_string(store.path()).expect("read back");
        assert!(text.starts_with("[\n    {"));
        assert!(text.contains("\"date\": \"2024-06-01\""));
        assert!(text.ends_with("]\n"));
    }

    #[test]
    fn save_leaves_no_temp_files_behind() {
        let temp = tempdir().expect("tempdir");
        let store = TaskStore::open(temp.path()).expect("open store");
        store
            .save(&[Task::new("a".to_string(), day(3))])
            .expect("first save");
        store
            .save(&[Task::new("b".to_string(), day(4))])
            .expect("second save");

        let entries: Vec<_> = fs::read_dir(temp.path())
            .expect("read dir")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(TASKS_FILE_NAME)]);
    }
}
