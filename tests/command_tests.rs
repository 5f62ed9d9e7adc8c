use taskdue::commands::*;
use taskdue::storage::{load_suggestions, load_tasks};
use taskdue::suggest;
use chrono::{Duration, Utc};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(test_name: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let mut db_path = env::temp_dir();
    db_path.push(format!("taskdue_test_{}.json", test_name));

    // Set env var
    env::set_var("TASKDUE_DB", db_path.to_str().unwrap());

    // Clean up before test
    if db_path.exists() {
        fs::remove_file(&db_path).unwrap();
    }
    let mut suggestions_path = db_path.clone();
    suggestions_path.pop();
    suggestions_path.push("suggestions.json");
    if suggestions_path.exists() {
        fs::remove_file(&suggestions_path).unwrap();
    }

    // Run test
    f(db_path.clone());

    // Clean up after test
    if db_path.exists() {
        fs::remove_file(&db_path).unwrap();
    }
    if suggestions_path.exists() {
        fs::remove_file(&suggestions_path).unwrap();
    }
    env::remove_var("TASKDUE_DB");
}

fn future_due(days: i64) -> String {
    (Utc::now() + Duration::days(days))
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

#[test]
fn test_add_and_load() {
    with_test_db("add_load", |_path| {
        cmd_add("Write report".into(), Some(future_due(7)), true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Write report");
        assert!(tasks[0].deadline.is_some());
        assert!(!tasks[0].completed);
        assert!(tasks[0].completed_at.is_none());
    });
}

#[test]
fn test_add_without_deadline() {
    with_test_db("add_no_deadline", |_path| {
        cmd_add("Read the style guide".into(), None, true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert!(tasks[0].deadline.is_none());
    });
}

#[test]
fn test_add_rejects_past_deadline() {
    with_test_db("add_past", |_path| {
        let past = (Utc::now() - Duration::days(1))
            .format("%Y-%m-%d %H:%M")
            .to_string();
        cmd_add("Too late".into(), Some(past), true);

        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_add_rejects_malformed_deadline() {
    with_test_db("add_malformed", |_path| {
        cmd_add("Whenever".into(), Some("whenever".into()), true);

        assert!(load_tasks().is_empty());
    });
}

#[test]
fn test_complete_task() {
    with_test_db("complete", |_path| {
        cmd_add("Task to complete".into(), Some(future_due(3)), true);
        let tasks = load_tasks();
        let id = tasks[0].id;

        cmd_complete(&[id], true);

        let tasks = load_tasks();
        assert!(tasks[0].completed);
        assert!(tasks[0].completed_at.is_some());
    });
}

#[test]
fn test_bulk_complete_skips_unknown_ids() {
    with_test_db("bulk_complete", |_path| {
        cmd_add("First".into(), Some(future_due(1)), true);
        cmd_add("Second".into(), None, true);
        let ids: Vec<u64> = load_tasks().iter().map(|t| t.id).collect();

        // Unknown ID in the middle must not stop the rest.
        cmd_complete(&[ids[0], 999, ids[1]], true);

        let tasks = load_tasks();
        assert!(tasks.iter().all(|t| t.completed));
    });
}

#[test]
fn test_bulk_remove() {
    with_test_db("bulk_remove", |_path| {
        cmd_add("First".into(), None, true);
        cmd_add("Second".into(), None, true);
        cmd_add("Keeper".into(), None, true);
        let ids: Vec<u64> = load_tasks().iter().map(|t| t.id).collect();

        cmd_remove(&[ids[0], ids[1]], true);

        let tasks = load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].text, "Keeper");
    });
}

#[test]
fn test_edit_text_and_deadline() {
    with_test_db("edit", |_path| {
        cmd_add("Draft".into(), Some(future_due(2)), true);
        let id = load_tasks()[0].id;

        cmd_edit(id, Some("Final".into()), Some(future_due(5)), false, true);

        let tasks = load_tasks();
        assert_eq!(tasks[0].text, "Final");
        let deadline = tasks[0].deadline.unwrap();
        assert!(deadline > Utc::now() + Duration::days(4));
    });
}

#[test]
fn test_edit_clears_deadline() {
    with_test_db("edit_clear", |_path| {
        cmd_add("Flexible".into(), Some(future_due(2)), true);
        let id = load_tasks()[0].id;

        cmd_edit(id, None, None, true, true);

        assert!(load_tasks()[0].deadline.is_none());
    });
}

#[test]
fn test_edit_rejects_past_deadline() {
    with_test_db("edit_past", |_path| {
        cmd_add("Stable".into(), Some(future_due(2)), true);
        let id = load_tasks()[0].id;
        let original = load_tasks()[0].deadline;

        let past = (Utc::now() - Duration::hours(1))
            .format("%Y-%m-%d %H:%M")
            .to_string();
        cmd_edit(id, None, Some(past), false, true);

        assert_eq!(load_tasks()[0].deadline, original);
    });
}

#[test]
fn test_add_records_suggestion() {
    with_test_db("suggestion_record", |_path| {
        cmd_add("Write Report".into(), None, true);
        cmd_add("Write Report".into(), None, true);

        let suggestions = load_suggestions();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].text, "write report");
        assert_eq!(suggestions[0].frequency, 2);
    });
}

#[test]
fn test_suggestion_ranking() {
    with_test_db("suggestion_rank", |_path| {
        suggest::record("write").unwrap();
        suggest::record("write report").unwrap();
        suggest::record("write report").unwrap();
        suggest::record("rewrite docs").unwrap();
        suggest::record("unrelated").unwrap();

        let matches = suggest::top_matches("write", 5);
        let texts: Vec<&str> = matches.iter().map(|s| s.text.as_str()).collect();

        // Exact match first, then prefix, then substring; no non-matches.
        assert_eq!(texts, vec!["write", "write report", "rewrite docs"]);
    });
}

#[test]
fn test_suggestion_frequency_breaks_score_ties() {
    with_test_db("suggestion_ties", |_path| {
        suggest::record("write tests").unwrap();
        suggest::record("write report").unwrap();
        suggest::record("write report").unwrap();

        let matches = suggest::top_matches("write", 5);
        assert_eq!(matches[0].text, "write report");
        assert_eq!(matches[1].text, "write tests");
    });
}

#[test]
fn test_reset_deletes_database() {
    with_test_db("reset", |_path| {
        cmd_add("Ephemeral".into(), None, true);
        assert_eq!(load_tasks().len(), 1);

        cmd_reset(true);

        assert!(load_tasks().is_empty());
        assert!(load_suggestions().is_empty());
    });
}
