use super::app::App;
use super::helpers::wrap_text;
use studycalc::calc_engine::{format_for_display, AngleMode};
use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEventKind};
use ratatui::{
    prelude::*,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::*,
    Frame,
};
use std::{io, time::Duration};

pub fn run_ui_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            if app.show_help {
                render_help(f, app);
            } else {
                ui(f, app);
            }
        })?;

        if app.should_quit {
            return Ok(());
        }

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }

        match event::read()? {
            Event::Key(KeyEvent {
                code,
                modifiers,
                kind,
                ..
            }) if kind == KeyEventKind::Press => {
                if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
                    return Ok(());
                }
                if app.show_help {
                    handle_help_key(app, code);
                } else {
                    handle_key(app, code);
                }
            }
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown if app.show_help => {
                    app.help_scroll = app.help_scroll.saturating_add(3);
                }
                MouseEventKind::ScrollUp if app.show_help => {
                    app.help_scroll = app.help_scroll.saturating_sub(3);
                }
                MouseEventKind::ScrollDown => {
                    app.history_scroll = app.history_scroll.saturating_add(3);
                }
                MouseEventKind::ScrollUp => {
                    app.history_scroll = app.history_scroll.saturating_sub(3);
                }
                _ => {}
            },
            _ => {}
        }
    }
}

fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Delete => app.delete(),
        KeyCode::Left => app.move_cursor(-1),
        KeyCode::Right => app.move_cursor(1),
        KeyCode::Home => app.cursor_position = 0,
        KeyCode::End => app.cursor_position = app.input.chars().count(),
        KeyCode::Up => app.navigate_history(-1),
        KeyCode::Down => app.navigate_history(1),
        KeyCode::PageUp => app.scroll_history(-1),
        KeyCode::PageDown => app.scroll_history(1),
        KeyCode::Enter => app.submit(),
        KeyCode::F(1) => {
            app.show_help = true;
            app.help_scroll = 0;
        }
        KeyCode::Esc => app.clear_input(),
        _ => {}
    }
}

fn handle_help_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Down => app.help_scroll = app.help_scroll.saturating_add(1),
        KeyCode::Up => app.help_scroll = app.help_scroll.saturating_sub(1),
        KeyCode::PageDown => app.help_scroll = app.help_scroll.saturating_add(10),
        KeyCode::PageUp => app.help_scroll = app.help_scroll.saturating_sub(10),
        KeyCode::Esc | KeyCode::F(1) => {
            app.show_help = false;
            app.help_scroll = 0;
        }
        _ => {}
    }
}

fn ui(frame: &mut Frame, app: &mut App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(4),
            Constraint::Length(1),
            Constraint::Min(3),
        ])
        .split(frame.size());

    render_input(frame, app, layout[0]);
    render_status(frame, app, layout[1]);
    render_history(frame, app, layout[2]);
    app.list_height = layout[2].height as usize;
}

fn render_input(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" Expression ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    let preview = match &app.preview {
        Some(result) => format!("= {result}"),
        None => String::new(),
    };
    let lines = vec![
        Line::from(format!("> {}", app.input)),
        Line::from(Span::styled(preview, Style::default().fg(Color::DarkGray))),
    ];
    frame.render_widget(Paragraph::new(lines), inner_area);

    let byte_position = App::char_index_to_byte_index(&app.input, app.cursor_position);
    frame.set_cursor(inner_area.x + 2 + byte_position as u16, inner_area.y);
}

fn render_status(frame: &mut Frame, app: &App, area: Rect) {
    let mode = match app.angle_mode {
        AngleMode::Degrees => "DEG",
        AngleMode::Radians => "RAD",
    };
    let slots: String = app
        .memory
        .iter()
        .enumerate()
        .filter_map(|(i, slot)| slot.map(|_| format!("M{}", i + 1)))
        .collect::<Vec<_>>()
        .join(" ");

    let mut spans = vec![
        Span::styled(
            format!(" {mode} "),
            Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
    ];
    if !slots.is_empty() {
        spans.push(Span::styled(slots, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(" "));
    }
    if let Some(status) = &app.status {
        spans.push(Span::styled(
            status.clone(),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled(
        "Enter: evaluate  ↑/↓: history  F1: help  Ctrl+C: quit",
        Style::default().fg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_history(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(" History ")
        .title_alignment(Alignment::Center);

    let inner_area = block.inner(area);
    frame.render_widget(block, area);

    if app.history.is_empty() {
        let empty_msg = Paragraph::new("No calculations yet. Type an expression and press Enter.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty_msg, inner_area);
        return;
    }

    let wrap_width = inner_area.width.saturating_sub(4) as usize;
    let mut items = Vec::new();
    let mut item_start_indices = Vec::new();

    for (i, entry) in app.history.iter().enumerate() {
        item_start_indices.push(items.len());

        let is_selected = i == app.cursor_history;
        let input_style =
            Style::default().fg(if is_selected { Color::Yellow } else { Color::Cyan });
        let mode_tag = match entry.mode {
            AngleMode::Degrees => "deg",
            AngleMode::Radians => "rad",
        };

        for (line_idx, line) in wrap_text(&entry.expression, wrap_width).iter().enumerate() {
            let mut spans = Vec::new();
            if line_idx == 0 {
                spans.push(Span::styled("➤ ", Style::default().fg(Color::Green)));
            } else {
                spans.push(Span::raw("  "));
            }
            spans.push(Span::styled(line.clone(), input_style));

            if line_idx == 0 {
                spans.push(Span::styled(" = ", Style::default().fg(Color::Gray)));
                match &entry.outcome {
                    Ok(value) => {
                        spans.push(Span::styled(
                            format_for_display(*value),
                            Style::default()
                                .fg(Color::Green)
                                .add_modifier(Modifier::BOLD),
                        ));
                    }
                    Err(failure) => {
                        spans.push(Span::styled(
                            failure.to_string(),
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ));
                    }
                }
                spans.push(Span::styled(
                    format!("  [{mode_tag}]"),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            items.push(ListItem::new(Line::from(spans)));
        }
    }

    if app.scroll_to_bottom {
        app.history_scroll = items.len().saturating_sub(inner_area.height as usize);
        app.scroll_to_bottom = false;
    }

    let selected_index = item_start_indices.get(app.cursor_history).copied();
    let list = List::new(items).highlight_style(
        Style::default()
            .bg(Color::DarkGray)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default()
        .with_selected(selected_index)
        .with_offset(app.history_scroll);

    frame.render_stateful_widget(list, inner_area, &mut state);
}

fn render_help(frame: &mut Frame, app: &mut App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" studycalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let section = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::UNDERLINED);

    let help_text = vec![
        Line::from(Span::styled(
            "studycalc - Scientific Calculator",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled("Operators:", section)),
        Line::from("  + - * / : arithmetic (× and ÷ also accepted)"),
        Line::from("  ^        : exponentiation, right-associative (2^3^2 = 512)"),
        Line::from("  ( )      : grouping"),
        Line::from("  n%       : percent, 5% = 0.05"),
        Line::from(""),
        Line::from(Span::styled("Functions:", section)),
        Line::from("  sin(x)  cos(x)  tan(x)   : trig, respects the angle mode"),
        Line::from("  asin(x) acos(x) atan(x)  : inverse trig, result in the angle mode"),
        Line::from("  log(x)  : base-10 logarithm (x > 0)"),
        Line::from("  ln(x)   : natural logarithm (x > 0)"),
        Line::from("  sqrt(x) : square root (x >= 0)"),
        Line::from("  cbrt(x) : cube root"),
        Line::from(""),
        Line::from(Span::styled("Constants:", section)),
        Line::from("  pi (or π) : 3.14159..."),
        Line::from("  e         : 2.71828..."),
        Line::from(""),
        Line::from(Span::styled("Commands:", section)),
        Line::from("  deg / rad : set the angle mode for new evaluations"),
        Line::from("  sto 1..4  : store the last result in a memory slot"),
        Line::from("  rcl 1..4  : recall a memory slot into the input"),
        Line::from("  mc        : clear all memory slots"),
        Line::from("  clear     : clear the history"),
        Line::from("  quit      : exit"),
        Line::from(""),
        Line::from(Span::styled("Navigation:", section)),
        Line::from("  ← → Home End : move the cursor"),
        Line::from("  ↑ ↓          : recall history entries"),
        Line::from("  PgUp/PgDn    : page through history"),
        Line::from("  Esc          : clear the input line"),
        Line::from(""),
        Line::from("The result preview updates as you type; it disappears while"),
        Line::from("the expression is incomplete and comes back once it parses."),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: true })
        .scroll((app.help_scroll as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
