use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// One-line status strip under the message area. Shows the typing spinner
/// while a reply is pending, or a transient status text otherwise.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    waiting: bool,
    status_text: String,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self {
            waiting: false,
            status_text: String::new(),
            spinner_idx: 0,
        }
    }

    pub fn set_waiting(&mut self, waiting: bool) {
        self.waiting = waiting;
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status_text = status.into();
    }

    pub fn clear_status(&mut self) {
        self.status_text.clear();
    }

    pub fn update_spinner(&mut self) {
        self.spinner_idx = self.spinner_idx.wrapping_add(1);
    }

    /// Current frame of the three-state typing ellipsis.
    pub fn typing_dots(&self) -> &'static str {
        const DOTS: [&str; 3] = [".", "..", "..."];
        DOTS[self.spinner_idx / 2 % DOTS.len()]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let spinner_frames = ["◐", "◓", "◑", "◒"];
        let spinner = if self.waiting {
            spinner_frames[self.spinner_idx % spinner_frames.len()]
        } else {
            " "
        };

        let status_text = if self.waiting {
            format!("Fynoraq is typing{}", self.typing_dots())
        } else {
            self.status_text.clone()
        };

        let status_color = if self.waiting {
            Color::DarkGray
        } else {
            Color::Yellow
        };

        let status = Line::from(vec![
            Span::styled(spinner, Style::default().fg(Color::Gray)),
            Span::raw(" "),
            Span::styled(status_text, Style::default().fg(status_color)),
        ]);

        frame.render_widget(
            Paragraph::new(status).alignment(ratatui::layout::Alignment::Left),
            area,
        );
    }
}
