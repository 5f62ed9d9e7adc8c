use std::io::{self, Write};
use chrono::Utc;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};
use crate::logger;
use crate::models::Task;
use crate::storage::{delete_database, load_tasks, save_tasks};
use crate::suggest;
use crate::timeleft::{compute_time_status, parse_deadline};

/// Adds a new task to the database.
///
/// A deadline, when given, must parse and lie in the future; otherwise
/// the command reports the problem and creates nothing. On success the
/// task text is recorded in the suggestion index.
pub fn cmd_add(text: String, due: Option<String>, silent: bool) {
    let deadline = match due {
        Some(d) => match parse_deadline(&d) {
            Ok(dt) => {
                if dt <= Utc::now() {
                    if !silent { eprintln!("Deadline '{}' must be in the future.", d); }
                    return;
                }
                Some(dt)
            }
            Err(e) => {
                if !silent { eprintln!("{}. Use YYYY-MM-DD or YYYY-MM-DD HH:MM.", e); }
                return;
            }
        },
        None => None,
    };

    let mut tasks = load_tasks();
    let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
    let t = Task {
        id: next_id,
        text: text.clone(),
        deadline,
        created_at: Utc::now(),
        completed: false,
        completed_at: None,
    };
    tasks.push(t);
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
        logger::error(&format!("failed to save tasks: {}", e));
        return;
    }

    if let Err(e) = suggest::record(&text) {
        if !silent { eprintln!("Failed to update suggestions: {}", e); }
        logger::warn(&format!("failed to update suggestions: {}", e));
    }

    logger::info(&format!("task {} added", next_id));
    if !silent { println!("Task added (id = {})", next_id); }
}

/// Marks one or more tasks as complete.
///
/// Unknown IDs are reported individually and do not abort the rest.
pub fn cmd_complete(ids: &[u64], silent: bool) {
    let mut tasks = load_tasks();
    let mut changed = 0usize;
    for id in ids {
        match tasks.iter_mut().find(|t| t.id == *id) {
            Some(t) if t.completed => {
                if !silent { println!("Task {} is already complete.", id); }
            }
            Some(t) => {
                t.completed = true;
                t.completed_at = Some(Utc::now());
                changed += 1;
                if !silent { println!("Task {} marked as complete.", id); }
            }
            None => {
                if !silent { eprintln!("Task {} not found.", id); }
                logger::warn(&format!("complete: task {} not found", id));
            }
        }
    }
    if changed == 0 {
        return;
    }
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
        logger::error(&format!("failed to save tasks: {}", e));
    } else {
        logger::info(&format!("{} task(s) completed", changed));
    }
}

/// Removes one or more tasks from the database.
pub fn cmd_remove(ids: &[u64], silent: bool) {
    let mut tasks = load_tasks();
    let mut removed = 0usize;
    for id in ids {
        let len_before = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == len_before {
            if !silent { eprintln!("Task {} not found.", id); }
            logger::warn(&format!("remove: task {} not found", id));
        } else {
            removed += 1;
            if !silent { println!("Task {} removed.", id); }
        }
    }
    if removed == 0 {
        return;
    }
    if let Err(e) = save_tasks(&tasks) {
        if !silent { eprintln!("Failed to save tasks: {}", e); }
        logger::error(&format!("failed to save tasks: {}", e));
    } else {
        logger::info(&format!("{} task(s) removed", removed));
    }
}

/// Edits an existing task's text and/or deadline.
///
/// `clear_due` removes the deadline; a new deadline must parse and lie
/// in the future.
pub fn cmd_edit(id: u64, text: Option<String>, due: Option<String>, clear_due: bool, silent: bool) {
    let mut tasks = load_tasks();
    if let Some(t) = tasks.iter_mut().find(|t| t.id == id) {
        if let Some(n) = text {
            t.text = n;
        }
        if clear_due {
            t.deadline = None;
        } else if let Some(d) = due {
            match parse_deadline(&d) {
                Ok(dt) => {
                    if dt <= Utc::now() {
                        if !silent { eprintln!("Deadline '{}' must be in the future.", d); }
                        return;
                    }
                    t.deadline = Some(dt);
                }
                Err(e) => {
                    if !silent { eprintln!("{}. Use YYYY-MM-DD or YYYY-MM-DD HH:MM.", e); }
                    return;
                }
            }
        }
        if let Err(e) = save_tasks(&tasks) {
            if !silent { eprintln!("Failed to save tasks: {}", e); }
            logger::error(&format!("failed to save tasks: {}", e));
        } else {
            logger::info(&format!("task {} updated", id));
            if !silent { println!("Task {} updated.", id); }
        }
    } else {
        if !silent { eprintln!("Task {} not found.", id); }
    }
}

/// Orders pending tasks soonest deadline first; tasks without a deadline
/// sort last, newest first.
pub fn sort_pending(tasks: &mut Vec<Task>) {
    tasks.sort_by(|a, b| match (a.deadline, b.deadline) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => b.created_at.cmp(&a.created_at),
    });
}

/// Lists tasks in a formatted table, nearest deadline first.
///
/// By default, hides completed tasks unless `all` is true.
pub fn cmd_list(all: bool) {
    let mut tasks = load_tasks();
    if !all {
        tasks.retain(|t| !t.completed);
    }
    if tasks.is_empty() {
        println!("No tasks found.");
        return;
    }

    sort_pending(&mut tasks);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Deadline").add_attribute(Attribute::Bold),
            Cell::new("Time Left").add_attribute(Attribute::Bold),
            Cell::new("Progress").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    let now = Utc::now();

    for t in tasks {
        let status = t
            .deadline
            .filter(|_| !t.completed)
            .map(|d| compute_time_status(d, Some(t.created_at), now));

        let time_left = status
            .as_ref()
            .map(|s| s.display_text.clone())
            .unwrap_or_else(|| "-".to_string());
        let progress = status
            .as_ref()
            .map(|s| format!("{:.0}%", s.progress_ratio * 100.0))
            .unwrap_or_else(|| "-".to_string());
        let late = status.as_ref().map(|s| s.is_overdue).unwrap_or(false);

        let deadline_str = t
            .deadline
            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        let status_label = if t.completed { "Done" } else { "Pending" };
        let status_color = if t.completed { Color::Green } else { Color::Yellow };

        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.text),
            Cell::new(deadline_str),
            Cell::new(time_left).fg(if late { Color::Red } else { Color::Reset }),
            Cell::new(progress),
            Cell::new(status_label).fg(status_color),
        ]);
    }

    println!("{table}");
}

/// Lists completed tasks, newest completion first.
pub fn cmd_history() {
    let mut tasks = load_tasks();
    tasks.retain(|t| t.completed);
    if tasks.is_empty() {
        println!("No completed tasks yet.");
        return;
    }
    tasks.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Task").add_attribute(Attribute::Bold),
            Cell::new("Deadline").add_attribute(Attribute::Bold),
            Cell::new("Completed").add_attribute(Attribute::Bold),
        ]);

    for t in tasks {
        table.add_row(vec![
            Cell::new(t.id),
            Cell::new(&t.text),
            Cell::new(
                t.deadline
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
            Cell::new(
                t.completed_at
                    .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ),
        ]);
    }

    println!("{table}");
}

/// Prints the best suggestions for a query.
pub fn cmd_suggest(query: String) {
    let suggestions = suggest::top_matches(&query, 5);
    if suggestions.is_empty() {
        println!("No suggestions found.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Suggestion", "Used"]);
    for s in suggestions {
        table.add_row(vec![s.text, s.frequency.to_string()]);
    }
    println!("{table}");
}

/// Resets the database by deleting all tasks and suggestions.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all tasks and suggestions? This cannot be undone. [y/N] ");
        io::stdout().flush().unwrap();
        let mut input = String::new();
        io::stdin().read_line(&mut input).unwrap();
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }

    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
        logger::error(&format!("failed to reset database: {}", e));
    } else {
        logger::info("database reset");
        println!("Database reset successfully.");
    }
}
