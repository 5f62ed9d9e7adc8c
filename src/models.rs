use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single task.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Task {
    /// Unique identifier, stable for the task's lifetime.
    pub id: u64,
    /// What needs doing.
    pub text: String,
    /// Target completion time; tasks without one are not time-tracked.
    #[serde(default)]
    pub deadline: Option<DateTime<Utc>>,
    /// When the task was created; anchors the progress window.
    pub created_at: DateTime<Utc>,
    /// Whether the task has been completed.
    #[serde(default)]
    pub completed: bool,
    /// When the task was completed; orders the history view.
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// A previously used task text, counted for autocompletion ranking.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Suggestion {
    /// Cleaned (trimmed, lowercased) task text.
    pub text: String,
    /// How many times this text has been used.
    pub frequency: u32,
}
