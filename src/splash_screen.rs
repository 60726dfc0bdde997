use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Wrap},
    Frame,
};

/// The landing screen. The only way forward is "get started"; there is no
/// transition back here once the chat opens.
#[derive(Debug)]
pub struct SplashScreen {
    pub selected_idx: usize,
    pub menu_items: Vec<&'static str>,
}

impl SplashScreen {
    pub fn new() -> Self {
        Self {
            selected_idx: 0,
            menu_items: vec!["get started", "quit"],
        }
    }

    pub fn draw(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let ascii_art = r#"
  ______
 |  ____|
 | |__ _   _ _ __   ___  _ __ __ _  __ _
 |  __| | | | '_ \ / _ \| '__/ _` |/ _` |
 | |  | |_| | | | | (_) | | | (_| | (_| |
 |_|   \__, |_| |_|\___/|_|  \__,_|\__, |
        __/ |                          | |
       |___/                           |_|
"#;

        // One centered column: banner, title, subtitle, then the menu.
        let banner_height = ascii_art.lines().count() as u16;
        let vsplit = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),
                Constraint::Length(banner_height),
                Constraint::Length(1),
                Constraint::Length(2),
                Constraint::Length(self.menu_items.len() as u16),
                Constraint::Min(1),
            ])
            .split(area);

        let banner = Paragraph::new(ascii_art)
            .style(Style::default().fg(Color::LightMagenta))
            .alignment(Alignment::Center)
            .block(Block::default())
            .wrap(Wrap { trim: false });
        f.render_widget(banner, vsplit[1]);

        let title = Paragraph::new(Line::from(Span::styled(
            "Fynoraq AI Assistant",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center);
        f.render_widget(title, vsplit[2]);

        let subtitle = Paragraph::new(Line::from(Span::styled(
            "Your intelligent conversation partner",
            Style::default().fg(Color::Gray),
        )))
        .alignment(Alignment::Center);
        f.render_widget(subtitle, vsplit[3]);

        let mut menu_lines = Vec::new();
        for (i, item) in self.menu_items.iter().enumerate() {
            let selected = i == self.selected_idx;
            let style = if selected {
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let arrow = if selected && *item == "get started" {
                " →"
            } else {
                ""
            };
            menu_lines.push(Line::from(Span::styled(
                format!("{} {}{}", if selected { "▶" } else { " " }, item, arrow),
                style,
            )));
        }
        let menu_par = Paragraph::new(menu_lines).alignment(Alignment::Center);
        f.render_widget(menu_par, vsplit[4]);
    }

    pub fn handle_input(&mut self, key: crossterm::event::KeyEvent) -> Option<SplashScreenAction> {
        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Down) => {
                self.selected_idx = (self.selected_idx + 1) % self.menu_items.len();
                None
            }
            (KeyModifiers::NONE, KeyCode::Up) => {
                if self.selected_idx == 0 {
                    self.selected_idx = self.menu_items.len() - 1;
                } else {
                    self.selected_idx -= 1;
                }
                None
            }
            (KeyModifiers::NONE, KeyCode::Enter) => {
                let selected = self.menu_items[self.selected_idx];
                match selected {
                    "quit" => Some(SplashScreenAction::Quit),
                    "get started" => Some(SplashScreenAction::StartChat),
                    _ => None,
                }
            }
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(SplashScreenAction::Quit),
            _ => None,
        }
    }
}

impl Default for SplashScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug)]
pub enum SplashScreenAction {
    Quit,
    StartChat,
}
