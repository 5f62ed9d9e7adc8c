use std::collections::HashSet;
use ratatui::widgets::TableState;
use crate::commands::{cmd_add, cmd_complete, cmd_edit, cmd_remove, sort_pending};
use crate::models::Task;
use crate::storage::load_tasks;

#[derive(PartialEq)]
pub enum InputMode {
    Normal,
    Editing,
    Adding,
}

pub enum InputField {
    None,
    Text,
    Due,
}

pub struct App {
    pub tasks: Vec<Task>,
    pub state: TableState,
    pub input_mode: InputMode,
    pub input_field: InputField,
    pub input_buffer: String,
    pub target_id: Option<u64>,
    pub add_state: AddState,
    pub show_completed: bool,
    /// Tasks selected for bulk complete/delete.
    pub marked: HashSet<u64>,
}

/// State for the two-step "Add Task" wizard.
#[derive(Default)]
pub struct AddState {
    pub text: String,
    pub step: usize, // 0: Text, 1: Due
}

impl App {
    /// Creates a new App instance and loads initial data.
    pub fn new() -> App {
        let mut app = App {
            tasks: Vec::new(),
            state: TableState::default(),
            input_mode: InputMode::Normal,
            input_field: InputField::None,
            input_buffer: String::new(),
            target_id: None,
            add_state: AddState::default(),
            show_completed: false,
            marked: HashSet::new(),
        };
        app.reload();
        app
    }

    /// Selects the next task, wrapping around.
    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// Selects the previous task, wrapping around.
    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    /// IDs a bulk action applies to: the marked set when non-empty,
    /// otherwise the highlighted task.
    fn bulk_targets(&self) -> Vec<u64> {
        if !self.marked.is_empty() {
            let mut ids: Vec<u64> = self.marked.iter().copied().collect();
            ids.sort_unstable();
            return ids;
        }
        self.state
            .selected()
            .and_then(|i| self.tasks.get(i))
            .map(|t| vec![t.id])
            .unwrap_or_default()
    }

    /// Completes the marked tasks, or the highlighted one.
    pub fn complete_selected(&mut self) {
        if self.show_completed {
            return;
        }
        let ids = self.bulk_targets();
        if ids.is_empty() {
            return;
        }
        cmd_complete(&ids, true);
        self.marked.clear();
        self.reload();
    }

    /// Deletes the marked tasks, or the highlighted one.
    pub fn delete_selected(&mut self) {
        let ids = self.bulk_targets();
        if ids.is_empty() {
            return;
        }
        cmd_remove(&ids, true);
        self.marked.clear();
        self.reload();
    }

    /// Toggles the mark on the highlighted task and advances.
    pub fn toggle_mark(&mut self) {
        if let Some(i) = self.state.selected() {
            if let Some(t) = self.tasks.get(i) {
                let id = t.id;
                if !self.marked.remove(&id) {
                    self.marked.insert(id);
                }
                self.next();
            }
        }
    }

    /// Marks every visible task, or clears all marks if everything is
    /// already marked.
    pub fn mark_all(&mut self) {
        if self.marked.len() == self.tasks.len() {
            self.marked.clear();
        } else {
            self.marked = self.tasks.iter().map(|t| t.id).collect();
        }
    }

    /// Reloads tasks from storage for the current view.
    pub fn reload(&mut self) {
        let mut tasks = load_tasks();
        if self.show_completed {
            tasks.retain(|t| t.completed);
            tasks.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        } else {
            tasks.retain(|t| !t.completed);
            sort_pending(&mut tasks);
        }
        self.tasks = tasks;

        // Marks on tasks that left the visible set are dropped.
        let tasks = &self.tasks;
        self.marked.retain(|id| tasks.iter().any(|t| t.id == *id));

        if self.tasks.is_empty() {
            self.state.select(None);
        } else if let Some(i) = self.state.selected() {
            if i >= self.tasks.len() {
                self.state.select(Some(self.tasks.len() - 1));
            }
        } else {
            self.state.select(Some(0));
        }
    }

    /// Switches between the pending and completed views.
    pub fn toggle_completed(&mut self) {
        self.show_completed = !self.show_completed;
        self.marked.clear();
        self.reload();
    }

    /// Initiates the "Add Task" wizard.
    pub fn start_add(&mut self) {
        if self.show_completed {
            return;
        }
        self.input_mode = InputMode::Adding;
        self.add_state = AddState::default();
        self.input_buffer.clear();
    }

    /// Initiates editing of a specific field for the highlighted task.
    pub fn start_edit(&mut self, field: InputField) {
        if self.show_completed {
            return;
        }
        if let Some(i) = self.state.selected() {
            if let Some(t) = self.tasks.get(i) {
                self.target_id = Some(t.id);
                self.input_mode = InputMode::Editing;
                self.input_buffer.clear();

                // Pre-fill buffer for editing
                match field {
                    InputField::Text => self.input_buffer = t.text.clone(),
                    InputField::Due => {
                        self.input_buffer = t
                            .deadline
                            .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                            .unwrap_or_default()
                    }
                    InputField::None => {}
                }
                self.input_field = field;
            }
        }
    }

    /// Handles text input based on the current mode.
    pub fn handle_input(&mut self) {
        match self.input_mode {
            InputMode::Adding => self.handle_adding_input(),
            InputMode::Editing => self.handle_editing_input(),
            _ => {}
        }
    }

    /// Handles input for the "Add Task" wizard.
    fn handle_adding_input(&mut self) {
        match self.add_state.step {
            0 => {
                // Text
                if !self.input_buffer.is_empty() {
                    self.add_state.text = self.input_buffer.clone();
                    self.add_state.step += 1;
                    self.input_buffer.clear();
                }
            }
            1 => {
                // Due (optional)
                let due = if self.input_buffer.is_empty() {
                    None
                } else {
                    Some(self.input_buffer.clone())
                };
                cmd_add(self.add_state.text.clone(), due, true);
                self.input_mode = InputMode::Normal;
                self.input_buffer.clear();
                self.reload();
            }
            _ => {}
        }
    }

    /// Handles input for the "Edit Task" mode.
    fn handle_editing_input(&mut self) {
        if let Some(id) = self.target_id {
            match self.input_field {
                InputField::Text => {
                    if !self.input_buffer.is_empty() {
                        cmd_edit(id, Some(self.input_buffer.clone()), None, false, true);
                    }
                }
                InputField::Due => {
                    if self.input_buffer.is_empty() {
                        cmd_edit(id, None, None, true, true);
                    } else {
                        cmd_edit(id, None, Some(self.input_buffer.clone()), false, true);
                    }
                }
                InputField::None => {}
            }
            self.input_mode = InputMode::Normal;
            self.input_buffer.clear();
            self.reload();
        }
    }
}
