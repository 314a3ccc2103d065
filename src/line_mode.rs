use studycalc::calc_engine::{evaluate_checked, format_for_display, AngleMode};
use anyhow::Result;
use std::io::{stdin, stdout, Write};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::TermRead,
    raw::IntoRawMode,
};

fn char_index_to_byte_index(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

pub fn run_line() -> Result<()> {
    println!("studycalc");
    println!("Operators: + - * / ^ ( ), percent suffix n%");
    println!("Functions: sin cos tan asin acos atan log ln sqrt cbrt; constants pi, e");
    println!("Commands: 'deg'/'rad' switch angle mode, 'clear' resets history, 'quit' exits");
    println!("Navigation: ←/→, Backspace/Delete, Home/End, ↑/↓ for history\n");

    let mut stdout = stdout().into_raw_mode()?;
    let mut history: Vec<String> = Vec::new();
    let mut history_index = 0;
    let mut mode = AngleMode::Degrees;

    loop {
        let mode_tag = match mode {
            AngleMode::Degrees => "deg",
            AngleMode::Radians => "rad",
        };
        write!(stdout, "{ClearLine}[{mode_tag}] ")?;
        stdout.flush()?;

        let mut expression = String::new();
        let mut cursor_pos = 0;
        let (_, initial_y) = stdout.cursor_pos()?;
        // "[deg] " before the input: bracket pair, tag, space, 1-based column
        let prompt_width = mode_tag.len() as u16 + 4;

        let stdin = stdin();
        let mut keys = stdin.keys();

        loop {
            write!(
                stdout,
                "{}{}[{}] {}",
                Goto(1, initial_y),
                ClearLine,
                mode_tag,
                expression
            )?;
            let byte_pos = char_index_to_byte_index(&expression, cursor_pos);
            write!(stdout, "{}", Goto(prompt_width + byte_pos as u16, initial_y))?;
            stdout.flush()?;

            let key = match keys.next() {
                Some(key) => key?,
                None => return Ok(()),
            };
            match key {
                Key::Char('\n') => break,
                Key::Ctrl('c') => {
                    write!(stdout, "\r\n")?;
                    return Ok(());
                }
                Key::Char(c) => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    expression.insert(byte_idx, c);
                    cursor_pos += 1;
                }
                Key::Backspace if cursor_pos > 0 => {
                    cursor_pos -= 1;
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        expression.drain(byte_idx..byte_idx + c.len_utf8());
                    }
                }
                Key::Delete if cursor_pos < expression.chars().count() => {
                    let byte_idx = char_index_to_byte_index(&expression, cursor_pos);
                    if let Some(c) = expression[byte_idx..].chars().next() {
                        expression.drain(byte_idx..byte_idx + c.len_utf8());
                    }
                }
                Key::Left if cursor_pos > 0 => cursor_pos -= 1,
                Key::Right if cursor_pos < expression.chars().count() => cursor_pos += 1,
                Key::Home => cursor_pos = 0,
                Key::End => cursor_pos = expression.chars().count(),
                Key::Up => {
                    if history_index > 0 {
                        history_index -= 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    }
                }
                Key::Down => {
                    if history_index < history.len().saturating_sub(1) {
                        history_index += 1;
                        expression = history[history_index].clone();
                        cursor_pos = expression.chars().count();
                    } else {
                        history_index = history.len();
                        expression.clear();
                        cursor_pos = 0;
                    }
                }
                _ => {}
            }
        }

        let input = expression.trim();
        if input.is_empty() {
            continue;
        }

        match input.to_lowercase().as_str() {
            "quit" | "exit" | "q" => {
                println!("\r\nGoodbye!");
                return Ok(());
            }
            "clear" | "reset" => {
                history.clear();
                history_index = 0;
                println!("\r\nHistory cleared\n");
                continue;
            }
            "deg" => {
                mode = AngleMode::Degrees;
                println!("\r\nAngle mode: degrees\n");
                continue;
            }
            "rad" => {
                mode = AngleMode::Radians;
                println!("\r\nAngle mode: radians\n");
                continue;
            }
            _ => {}
        }

        history.push(input.to_string());
        history_index = history.len();

        match evaluate_checked(input, mode) {
            Ok(value) => println!("\r\n  {} = {}\n", input, format_for_display(value)),
            Err(failure) => println!("\r\n  {} = Error: {}\n", input, failure),
        }
    }
}
