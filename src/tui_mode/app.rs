use studycalc::calc_engine::{
    evaluate, evaluate_checked, format_for_display, is_valid_expression, AngleMode, Failure,
};

pub struct HistoryEntry {
    pub expression: String,
    pub outcome: Result<f64, Failure>,
    /// Angle mode the entry was evaluated under; recalling an old entry
    /// under a different mode may give a different result, so it is shown.
    pub mode: AngleMode,
}

pub struct App {
    pub input: String,
    pub cursor_position: usize,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub angle_mode: AngleMode,
    pub memory: [Option<f64>; 4],
    /// Live result for the current input, already formatted; `None` while
    /// the input is implausible or fails to evaluate.
    pub preview: Option<String>,
    /// Transient feedback for commands (deg/rad/sto/rcl/mc).
    pub status: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
}

impl App {
    pub fn new() -> Self {
        App {
            input: String::new(),
            cursor_position: 0,
            history: Vec::new(),
            cursor_history: 0,
            angle_mode: AngleMode::Degrees,
            memory: [None; 4],
            preview: None,
            status: None,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            history_scroll: 0,
            scroll_to_bottom: false,
        }
    }

    /// Recomputes the live preview. Runs on every edit: the validator gates
    /// the evaluator so half-typed input is cheap, and any failure simply
    /// suppresses the preview.
    pub fn refresh_preview(&mut self) {
        self.preview = if is_valid_expression(&self.input) {
            evaluate(&self.input, self.angle_mode).map(format_for_display)
        } else {
            None
        };
    }

    pub fn submit(&mut self) {
        let input = self.input.trim().to_string();
        if input.is_empty() {
            return;
        }
        self.status = None;

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                self.should_quit = true;
                return;
            }
            "clear" | "reset" => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
                self.clear_input();
                return;
            }
            "help" => {
                self.show_help = true;
                self.clear_input();
                return;
            }
            "deg" => {
                self.angle_mode = AngleMode::Degrees;
                self.status = Some("angle mode: degrees".to_string());
                self.clear_input();
                return;
            }
            "rad" => {
                self.angle_mode = AngleMode::Radians;
                self.status = Some("angle mode: radians".to_string());
                self.clear_input();
                return;
            }
            "mc" => {
                self.memory = [None; 4];
                self.status = Some("memory cleared".to_string());
                self.clear_input();
                return;
            }
            _ => {}
        }

        if let Some(slot) = parse_slot_command(&input, "sto") {
            self.store_to_memory(slot);
            return;
        }
        if let Some(slot) = parse_slot_command(&input, "rcl") {
            self.recall_from_memory(slot);
            return;
        }

        let outcome = evaluate_checked(&input, self.angle_mode);
        self.history.push(HistoryEntry {
            expression: input,
            outcome,
            mode: self.angle_mode,
        });

        self.cursor_history = self.history.len().saturating_sub(1);
        self.clear_input();
        self.scroll_to_bottom = true;
    }

    fn store_to_memory(&mut self, slot: usize) {
        match self.last_result() {
            Some(value) => {
                self.memory[slot - 1] = Some(value);
                self.status = Some(format!("M{slot} = {}", format_for_display(value)));
            }
            None => {
                self.status = Some("no result to store".to_string());
            }
        }
        self.clear_input();
    }

    fn recall_from_memory(&mut self, slot: usize) {
        match self.memory[slot - 1] {
            Some(value) => {
                self.input = format_for_display(value);
                self.cursor_position = self.input.chars().count();
                self.refresh_preview();
            }
            None => {
                self.status = Some(format!("M{slot} is empty"));
                self.clear_input();
            }
        }
    }

    /// Most recent successful evaluation, if any.
    fn last_result(&self) -> Option<f64> {
        self.history
            .iter()
            .rev()
            .find_map(|entry| entry.outcome.as_ref().ok().copied())
    }

    pub fn insert_char(&mut self, c: char) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        self.input.insert(byte_idx, c);
        self.cursor_position += 1;
        self.refresh_preview();
    }

    pub fn backspace(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        self.cursor_position -= 1;
        self.delete_at_cursor();
    }

    pub fn delete(&mut self) {
        self.delete_at_cursor();
    }

    fn delete_at_cursor(&mut self) {
        let byte_idx = Self::char_index_to_byte_index(&self.input, self.cursor_position);
        if let Some(c) = self.input[byte_idx..].chars().next() {
            self.input.drain(byte_idx..byte_idx + c.len_utf8());
        }
        self.refresh_preview();
    }

    pub fn move_cursor(&mut self, direction: i32) {
        match direction {
            -1 => self.cursor_position = self.cursor_position.saturating_sub(1),
            1 => self.cursor_position = (self.cursor_position + 1).min(self.input.chars().count()),
            _ => {}
        }
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if self.history.is_empty() {
            return;
        }
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len() - 1 {
            self.cursor_history += 1;
        }

        self.input = self.history[self.cursor_history].expression.clone();
        self.cursor_position = self.input.chars().count();
        self.scroll_to_bottom = false;
        self.refresh_preview();
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self
                .cursor_history
                .saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }

        if self.cursor_history < self.history.len() {
            self.input = self.history[self.cursor_history].expression.clone();
        }
        self.cursor_position = self.input.chars().count();
        self.scroll_to_bottom = false;
        self.refresh_preview();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.cursor_position = 0;
        self.preview = None;
    }

    pub fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
        s.char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(s.len())
    }
}

/// `"sto 2"` / `"rcl 4"` style commands; slot must be 1..=4.
fn parse_slot_command(input: &str, keyword: &str) -> Option<usize> {
    let lower = input.to_lowercase();
    let rest = lower.strip_prefix(keyword)?.trim();
    match rest.parse::<usize>() {
        Ok(slot @ 1..=4) => Some(slot),
        _ => None,
    }
}
