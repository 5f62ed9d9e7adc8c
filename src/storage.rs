use std::fs::{self, OpenOptions};
use std::io::{Read, Write};
use std::path::PathBuf;
use crate::models::{Suggestion, Task};

/// Returns the path to the tasks database file (`tasks.json`).
///
/// The path is determined in the following order:
/// 1. `TASKDUE_DB` environment variable.
/// 2. `~/.local/share/taskdue/tasks.json` (on Linux).
/// 3. `./tasks.json` (fallback).
fn db_path() -> PathBuf {
    std::env::var("TASKDUE_DB").map(PathBuf::from).unwrap_or_else(|_| {
        let mut p = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        p.push("taskdue");
        if !p.exists() {
            let _ = fs::create_dir_all(&p);
        }
        p.push("tasks.json");
        p
    })
}

/// Returns the path to the suggestions database file (`suggestions.json`).
///
/// Located in the same directory as the tasks database.
fn suggestions_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("suggestions.json");
    p
}

/// Returns the path to the log file (`taskdue.log`), next to the tasks
/// database.
pub fn log_path() -> PathBuf {
    let mut p = db_path();
    p.pop();
    p.push("taskdue.log");
    p
}

/// Loads all tasks from the storage file.
///
/// Returns an empty vector if the file does not exist or cannot be read.
pub fn load_tasks() -> Vec<Task> {
    let path = db_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

/// Saves the given list of tasks to the storage file.
///
/// Overwrites the existing file.
pub fn save_tasks(tasks: &Vec<Task>) -> std::io::Result<()> {
    let path = db_path();
    let s = serde_json::to_string_pretty(tasks).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Loads all suggestions from the storage file.
pub fn load_suggestions() -> Vec<Suggestion> {
    let path = suggestions_path();
    if !path.exists() {
        return Vec::new();
    }
    let mut f = match OpenOptions::new().read(true).open(&path) {
        Ok(f) => f,
        Err(_) => return Vec::new(),
    };
    let mut s = String::new();
    if f.read_to_string(&mut s).is_err() {
        return Vec::new();
    }
    serde_json::from_str(&s).unwrap_or_else(|_| Vec::new())
}

/// Saves the given list of suggestions to the storage file.
pub fn save_suggestions(suggestions: &Vec<Suggestion>) -> std::io::Result<()> {
    let path = suggestions_path();
    let s = serde_json::to_string_pretty(suggestions).unwrap();
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Deletes the tasks and suggestions database files.
pub fn delete_database() -> std::io::Result<()> {
    let t_path = db_path();
    if t_path.exists() {
        fs::remove_file(t_path)?;
    }
    let s_path = suggestions_path();
    if s_path.exists() {
        fs::remove_file(s_path)?;
    }
    Ok(())
}
