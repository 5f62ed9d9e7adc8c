use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table},
    Frame,
};
use chrono::Utc;
use crate::timeleft::compute_time_status;
use super::app::{App, InputField, InputMode};

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Table
            Constraint::Length(3), // Progress gauge
            Constraint::Length(3), // Help
        ].as_ref())
        .split(f.area());

    let now = Utc::now();

    let rows: Vec<Row> = app
        .tasks
        .iter()
        .map(|t| {
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

            let style = if t.completed {
                Style::default().fg(Color::Gray)
            } else if status.as_ref().map(|s| s.is_overdue).unwrap_or(false) {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::Green)
            };

            let mark = if app.marked.contains(&t.id) { "x" } else { "" };
            let deadline = t
                .deadline
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_else(|| "-".to_string());

            Row::new(vec![
                Cell::from(mark),
                Cell::from(t.id.to_string()),
                Cell::from(t.text.clone()),
                Cell::from(deadline),
                Cell::from(time_left),
                Cell::from(progress),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Length(4),
        Constraint::Min(20),
        Constraint::Length(17),
        Constraint::Length(16),
        Constraint::Length(9),
    ];

    let title = if app.show_completed {
        "taskdue - Completed"
    } else {
        "taskdue - Pending"
    };

    let table = Table::new(rows, widths)
        .header(Row::new(vec!["", "ID", "Task", "Deadline", "Time Left", "Progress"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .bottom_margin(1))
        .block(Block::default().borders(Borders::ALL).title(title))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");

    f.render_stateful_widget(table, chunks[0], &mut app.state);

    // Elapsed-fraction gauge for the highlighted task.
    let ratio = app
        .state
        .selected()
        .and_then(|i| app.tasks.get(i))
        .filter(|t| !t.completed)
        .and_then(|t| t.deadline.map(|d| compute_time_status(d, Some(t.created_at), now)))
        .map(|s| s.progress_ratio)
        .unwrap_or(0.0);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Time Elapsed"))
        .gauge_style(if ratio >= 1.0 {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Cyan)
        })
        .ratio(ratio);

    f.render_widget(gauge, chunks[1]);

    let help_text = match app.input_mode {
        InputMode::Normal => {
            if app.show_completed {
                "q: Quit | x: Mark | X: Mark All | d: Delete | c: View Pending"
            } else {
                "q: Quit | a: Add | e: Text | t: Deadline | x: Mark | X: Mark All | Space: Complete | d: Delete | c: View Completed"
            }
        }
        InputMode::Editing => "Enter: Save | Esc: Cancel",
        InputMode::Adding => "Enter: Next Step | Esc: Cancel",
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(help, chunks[2]);

    // Render Input Box if needed
    match app.input_mode {
        InputMode::Editing | InputMode::Adding => {
            let area = centered_rect(60, 3, f.area());
            f.render_widget(Clear, area); // Clear the area first

            let title = match app.input_mode {
                InputMode::Adding => match app.add_state.step {
                    0 => "Add Task: Enter Description",
                    1 => "Add Task: Enter Deadline (YYYY-MM-DD HH:MM, blank for none)",
                    _ => "Add Task",
                },
                InputMode::Editing => match app.input_field {
                    InputField::Text => "Edit Description",
                    InputField::Due => "Edit Deadline (blank to clear)",
                    InputField::None => "Edit",
                },
                _ => "",
            };

            let input = Paragraph::new(app.input_buffer.as_str())
                .style(Style::default().fg(Color::Yellow))
                .block(Block::default().borders(Borders::ALL).title(title));

            f.render_widget(input, area);
        }
        _ => {}
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((r.height - height) / 2),
            Constraint::Length(height),
            Constraint::Length((r.height - height) / 2),
        ].as_ref())
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ].as_ref())
        .split(popup_layout[1])[1]
}
