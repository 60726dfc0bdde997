use crate::app::{App, AppScreen};
use crate::constants::{ASSISTANT_NAME, INPUT_SOFT_LIMIT};
use crate::message::ChatMessage;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};
use textwrap::wrap;
use unicode_width::UnicodeWidthStr;

/// Top-level draw: splash screen until "get started", then the chat.
pub fn draw(f: &mut Frame, app: &mut App) {
    match app.screen {
        AppScreen::Landing => {
            let area = f.area();
            app.splash_screen.draw(f, area);
        }
        AppScreen::Chat => draw_chat(f, app),
    }
}

pub fn draw_chat(f: &mut Frame, app: &mut App) {
    let size = f.area();
    let horizontal_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(2, 3), Constraint::Ratio(1, 3)])
        .margin(1)
        .split(size);

    let chat_vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(2),
                Constraint::Min(1),
                Constraint::Length(2),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(horizontal_chunks[0]);

    draw_header(f, app, chat_vertical_chunks[0]);
    draw_messages(f, app, chat_vertical_chunks[1]);

    app.status_indicator.render(f, chat_vertical_chunks[2]);

    draw_input(f, app, chat_vertical_chunks[3]);
    draw_logs(f, app, horizontal_chunks[1], size);

    if app.confirm_clear {
        draw_clear_confirm(f, size);
    }
}

fn draw_header(f: &mut Frame, app: &App, area: Rect) {
    let title = Line::from(vec![
        Span::styled(
            format!("{} AI Assistant", ASSISTANT_NAME),
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        ),
    ]);

    let action_style = if app.transcript.is_empty() {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::Gray)
    };
    let hints = Line::from(vec![
        Span::styled("^Y", action_style),
        Span::styled(" copy  ", action_style),
        Span::styled("^E", action_style),
        Span::styled(" export  ", action_style),
        Span::styled("^L", action_style),
        Span::styled(" clear  ", action_style),
        Span::styled("^C", Style::default().fg(Color::Gray)),
        Span::styled(" quit", Style::default().fg(Color::Gray)),
    ]);

    f.render_widget(Paragraph::new(title), area);
    f.render_widget(
        Paragraph::new(hints).alignment(Alignment::Right),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: 1,
        },
    );
}

fn draw_messages(f: &mut Frame, app: &mut App, area: Rect) {
    if app.transcript.is_empty() {
        draw_welcome(f, area);
        return;
    }

    let mut lines = Vec::new();
    for (idx, message) in app.transcript.iter().enumerate() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let selected = app.selected == Some(idx);
        let copied = matches!(app.copied, Some((i, _)) if i == idx);
        lines.extend(message_lines(message, area, selected, copied));
    }

    // A reply in flight shows as a typing bubble under the newest message.
    if app.awaiting_reply {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("┌─ {}", app.status_indicator.typing_dots()),
            Style::default().fg(Color::Rgb(144, 238, 144)),
        )));
    }

    let total_lines = lines.len() as u16;
    let available_height = area.height;
    let max_scroll = total_lines.saturating_sub(available_height);

    // Stick to the bottom on transcript changes; manual scrolling unsticks.
    if app.stick_to_bottom {
        app.chat_scroll = max_scroll;
    } else if app.chat_scroll > max_scroll {
        app.chat_scroll = max_scroll;
    }

    let msgs_para = Paragraph::new(lines)
        .style(Style::default())
        .block(Block::default())
        .wrap(Wrap { trim: false });
    f.render_widget(msgs_para.scroll((app.chat_scroll, 0)), area);
}

fn draw_welcome(f: &mut Frame, area: Rect) {
    let welcome = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Welcome to {} AI Assistant!", ASSISTANT_NAME),
            Style::default()
                .fg(Color::LightMagenta)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("I'm here to help you with any questions or concerns."),
        Line::from(""),
        Line::from("💬 Natural conversations"),
        Line::from("📋 Copy responses"),
        Line::from("💾 Export chat history"),
    ];

    let paragraph = Paragraph::new(welcome)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

fn message_lines(
    message: &ChatMessage,
    area: Rect,
    selected: bool,
    copied: bool,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let from_user = message.from_user();
    let base_style = Style::default().fg(if from_user {
        Color::Rgb(255, 223, 128)
    } else {
        Color::Rgb(144, 238, 144)
    });

    let indent = if from_user { "  " } else { "" };
    let timestamp = message.timestamp.format("%H:%M").to_string();
    let marker = if copied {
        " ✓ copied"
    } else if selected {
        " ▶"
    } else {
        ""
    };

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), base_style),
        Span::styled("┌─".to_string(), base_style),
        Span::styled(
            format!("{} ", timestamp),
            base_style.add_modifier(Modifier::DIM),
        ),
        Span::styled(message.sender.to_string(), base_style),
        Span::styled(
            marker.to_string(),
            Style::default().fg(Color::LightCyan).add_modifier(Modifier::BOLD),
        ),
    ]));

    render_content(message, &mut lines, area, base_style, indent);

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), base_style),
        Span::styled("╰─".to_string(), base_style),
    ]));

    lines
}

fn render_content(
    message: &ChatMessage,
    lines: &mut Vec<Line<'static>>,
    area: Rect,
    style: Style,
    indent: &str,
) {
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut text_buffer = String::new();

    for line in message.text.lines() {
        if line.trim().starts_with("```") {
            flush_text_buffer(lines, &text_buffer, area, style, indent);
            flush_code_buffer(lines, &code_buffer, style, indent);
            text_buffer.clear();
            code_buffer.clear();
            in_code_block = !in_code_block;
            continue;
        }

        if in_code_block {
            code_buffer.push_str(line);
            code_buffer.push('\n');
        } else {
            text_buffer.push_str(line);
            text_buffer.push('\n');
        }
    }

    flush_text_buffer(lines, &text_buffer, area, style, indent);
    flush_code_buffer(lines, &code_buffer, style, indent);
}

fn flush_text_buffer(
    lines: &mut Vec<Line<'static>>,
    buffer: &str,
    area: Rect,
    style: Style,
    indent: &str,
) {
    if buffer.trim().is_empty() {
        return;
    }

    let wrap_width = (area.width as usize).saturating_sub(6).max(8);
    for wrapped_line in wrap(buffer.trim_end(), wrap_width) {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled(wrapped_line.to_string(), style),
        ]));
    }
}

fn flush_code_buffer(lines: &mut Vec<Line<'static>>, buffer: &str, style: Style, indent: &str) {
    if buffer.is_empty() {
        return;
    }

    let code_style = Style::default()
        .fg(Color::Rgb(209, 154, 102))
        .add_modifier(Modifier::BOLD);

    for code_line in buffer.lines() {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled("▎".to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {}", code_line), code_style),
        ]));
    }
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let separator = "─".repeat(area.width as usize);
    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator.clone(),
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let prefix = "→ ";
    let input_style = if app.awaiting_reply {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };

    let input = Line::from(vec![
        Span::styled(prefix, Style::default().fg(Color::DarkGray)),
        Span::styled(app.chat_input.clone(), input_style),
    ]);

    // Advisory counter, display only; 500 is never enforced.
    let counter = format!("{}/{}", app.chat_input.chars().count(), INPUT_SOFT_LIMIT);
    let counter_style = if app.chat_input.chars().count() > INPUT_SOFT_LIMIT {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let counter_width = counter.width() as u16;

    let visible_width = area.width.saturating_sub(2 + counter_width + 1);
    let text_width = app.chat_input.width() as u16;
    let scroll_offset = text_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(input).scroll((0, scroll_offset)),
        Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width.saturating_sub(counter_width + 1),
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(counter, counter_style))),
        Rect {
            x: area.x + area.width.saturating_sub(counter_width),
            y: area.y + 1,
            width: counter_width,
            height: 1,
        },
    );

    f.render_widget(
        Paragraph::new(Line::from(Span::styled(
            separator,
            Style::default().fg(Color::DarkGray),
        ))),
        Rect {
            x: area.x,
            y: area.y + area.height - 1,
            width: area.width,
            height: 1,
        },
    );

    if !app.awaiting_reply {
        let cursor_x = area.x + 2 + text_width.saturating_sub(scroll_offset);
        f.set_cursor_position((cursor_x, area.y + 1));
    }
}

fn draw_logs(f: &mut Frame, app: &App, area: Rect, size: Rect) {
    let vsep = "│".repeat(size.height.saturating_sub(2) as usize);
    f.render_widget(
        Paragraph::new(Span::raw(vsep)).style(Style::default().fg(Color::DarkGray)),
        Rect {
            x: area.x.saturating_sub(1),
            y: 1,
            width: 1,
            height: size.height.saturating_sub(2),
        },
    );

    let log_lines: Vec<Line> = app
        .logs
        .entries
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled("• ", Style::default().fg(Color::DarkGray)),
                Span::raw(entry.clone()),
            ])
        })
        .collect();

    let total_log_lines = log_lines.len() as u16;
    let logs_scroll = total_log_lines.saturating_sub(area.height);

    let logs_para = Paragraph::new(log_lines)
        .style(Style::default().fg(Color::DarkGray))
        .wrap(Wrap { trim: true });
    f.render_widget(logs_para.scroll((logs_scroll, 0)), area);
}

fn draw_clear_confirm(f: &mut Frame, size: Rect) {
    let area = centered_rect(50, 20, size);
    f.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title("Clear Chat")
        .style(Style::default().fg(Color::LightYellow).bg(Color::Black));

    f.render_widget(block, area);

    let confirm_text =
        "Are you sure you want to clear all messages?\n\nPress 'y' to confirm or 'n' to cancel.";

    let paragraph = Paragraph::new(confirm_text)
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(
        paragraph,
        Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        },
    );
}

fn centered_rect(percent_x: u16, percent_y: u16, size: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(size);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
