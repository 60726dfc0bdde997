use crate::constants::{CLIENT_ERROR_REPLY, COPIED_MARKER_SECS};
use crate::errors::FynoraqResult;
use crate::export;
use crate::log_view::LogView;
use crate::markdown::markdown_to_plain;
use crate::message::{ChatMessage, Sender, Transcript};
use crate::splash_screen::SplashScreen;
use crate::status_indicator::StatusIndicator;
use copypasta::{ClipboardContext, ClipboardProvider};
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Landing,
    Chat,
}

/// All view state for one session. Owned by the event loop behind an
/// `Arc<Mutex<_>>`; the reply task is the only other holder.
pub struct App {
    pub screen: AppScreen,
    pub splash_screen: SplashScreen,
    pub transcript: Transcript,
    pub chat_input: String,
    pub awaiting_reply: bool,
    pub chat_scroll: u16,
    pub stick_to_bottom: bool,
    pub selected: Option<usize>,
    pub copied: Option<(usize, Instant)>,
    pub confirm_clear: bool,
    pub status_indicator: StatusIndicator,
    pub logs: LogView,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> App {
        App {
            screen: AppScreen::Landing,
            splash_screen: SplashScreen::new(),
            transcript: Transcript::new(),
            chat_input: String::new(),
            awaiting_reply: false,
            chat_scroll: 0,
            stick_to_bottom: true,
            selected: None,
            copied: None,
            confirm_clear: false,
            status_indicator: StatusIndicator::new(),
            logs: LogView::new(),
            should_quit: false,
        }
    }

    pub fn start_chat(&mut self) {
        self.screen = AppScreen::Chat;
        self.logs.add("chat session started");
    }

    /// Takes the current input as an outgoing message. Returns the text to
    /// send, or `None` for empty/whitespace-only input or while a reply is
    /// already pending. Appends the `You` message and enters Pending.
    pub fn submit_input(&mut self) -> Option<String> {
        if self.awaiting_reply || self.chat_input.trim().is_empty() {
            return None;
        }

        let text = std::mem::take(&mut self.chat_input);
        self.transcript.push(ChatMessage::new(Sender::You, text.clone()));
        self.awaiting_reply = true;
        self.stick_to_bottom = true;
        self.status_indicator.clear_status();
        self.status_indicator.set_waiting(true);
        self.logs.add("sending message to relay");
        Some(text)
    }

    /// Resolves the pending send: exactly one Fynoraq message is appended,
    /// a placeholder on failure. The session continues either way.
    pub fn apply_reply(&mut self, outcome: FynoraqResult<String>) {
        let text = match outcome {
            Ok(reply) => {
                self.logs.add("reply received");
                reply
            }
            Err(err) => {
                self.logs.add(format!("request failed: {}", err));
                CLIENT_ERROR_REPLY.to_string()
            }
        };

        self.transcript.push(ChatMessage::new(Sender::Fynoraq, text));
        self.awaiting_reply = false;
        self.stick_to_bottom = true;
        self.status_indicator.set_waiting(false);
    }

    pub fn request_clear(&mut self) {
        if !self.transcript.is_empty() {
            self.confirm_clear = true;
        }
    }

    pub fn clear_confirmed(&mut self) {
        self.transcript.clear();
        self.selected = None;
        self.copied = None;
        self.confirm_clear = false;
        self.stick_to_bottom = true;
        self.chat_scroll = 0;
        self.logs.add("chat cleared");
    }

    pub fn clear_cancelled(&mut self) {
        self.confirm_clear = false;
    }

    pub fn export_chat(&mut self) {
        match export::export_chat(self.transcript.as_slice(), Path::new(".")) {
            Ok(path) => {
                let note = format!("exported to {}", path.display());
                self.logs.add(note.clone());
                self.status_indicator.set_status(note);
            }
            Err(err) => {
                self.logs.add(format!("export failed: {}", err));
            }
        }
    }

    /// The message CopyMessage acts on: the selection cursor, or the newest
    /// message when nothing is selected.
    pub fn copy_target(&self) -> Option<usize> {
        self.selected
            .or_else(|| self.transcript.len().checked_sub(1))
    }

    pub fn copy_message(&mut self) {
        let Some(idx) = self.copy_target() else {
            return;
        };
        let Some(message) = self.transcript.get(idx) else {
            return;
        };

        let plain = markdown_to_plain(&message.text);
        match write_clipboard(&plain) {
            Ok(()) => {
                self.copied = Some((idx, Instant::now()));
                self.logs.add("message copied to clipboard");
            }
            Err(err) => {
                // Logged only, no user-visible feedback.
                self.logs.add(format!("failed to copy: {}", err));
            }
        }
    }

    pub fn select_prev(&mut self) {
        if self.transcript.is_empty() {
            return;
        }
        let last = self.transcript.len() - 1;
        self.selected = Some(match self.selected {
            None => last,
            Some(0) => 0,
            Some(idx) => idx - 1,
        });
    }

    pub fn select_next(&mut self) {
        if self.transcript.is_empty() {
            return;
        }
        let last = self.transcript.len() - 1;
        self.selected = Some(match self.selected {
            None => last,
            Some(idx) if idx >= last => last,
            Some(idx) => idx + 1,
        });
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn scroll_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
        self.stick_to_bottom = false;
    }

    pub fn scroll_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1);
    }

    pub fn scroll_to_bottom(&mut self) {
        self.stick_to_bottom = true;
    }

    /// Periodic upkeep driven by the event loop's tick: spinner animation
    /// and the 2-second copied-marker expiry.
    pub fn tick(&mut self) {
        self.status_indicator.update_spinner();
        if let Some((_, since)) = self.copied {
            if since.elapsed() >= Duration::from_secs(COPIED_MARKER_SECS) {
                self.copied = None;
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn write_clipboard(text: &str) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut ctx = ClipboardContext::new()?;
    ctx.set_contents(text.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FynoraqError;

    fn chat_app() -> App {
        let mut app = App::new();
        app.start_chat();
        app
    }

    #[test]
    fn test_submit_appends_exactly_one_you_message() {
        let mut app = chat_app();
        app.chat_input = "Hello".to_string();

        let sent = app.submit_input();

        assert_eq!(sent.as_deref(), Some("Hello"));
        assert_eq!(app.transcript.len(), 1);
        assert_eq!(app.transcript.last().unwrap().sender, Sender::You);
        assert!(app.chat_input.is_empty());
        assert!(app.awaiting_reply);
    }

    #[test]
    fn test_submit_is_noop_for_whitespace_input() {
        let mut app = chat_app();
        app.chat_input = "   \t ".to_string();

        assert!(app.submit_input().is_none());
        assert_eq!(app.transcript.len(), 0);
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_submit_is_disabled_while_pending() {
        let mut app = chat_app();
        app.chat_input = "first".to_string();
        app.submit_input();

        app.chat_input = "second".to_string();
        assert!(app.submit_input().is_none());
        assert_eq!(app.transcript.len(), 1);
    }

    #[test]
    fn test_reply_appends_fynoraq_message_and_clears_pending() {
        let mut app = chat_app();
        app.chat_input = "Hello".to_string();
        app.submit_input();

        app.apply_reply(Ok("Hi there!".to_string()));

        assert_eq!(app.transcript.len(), 2);
        let last = app.transcript.last().unwrap();
        assert_eq!(last.sender, Sender::Fynoraq);
        assert_eq!(last.text, "Hi there!");
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_failed_reply_appends_placeholder() {
        let mut app = chat_app();
        app.chat_input = "Hello".to_string();
        app.submit_input();

        app.apply_reply(Err(FynoraqError::relay_error("connection refused")));

        let last = app.transcript.last().unwrap();
        assert_eq!(last.sender, Sender::Fynoraq);
        assert_eq!(last.text, CLIENT_ERROR_REPLY);
        assert!(!app.awaiting_reply);
    }

    #[test]
    fn test_clear_requires_confirmation() {
        let mut app = chat_app();
        app.chat_input = "Hello".to_string();
        app.submit_input();
        app.apply_reply(Ok("Hi".to_string()));

        app.request_clear();
        assert!(app.confirm_clear);
        app.clear_cancelled();
        assert_eq!(app.transcript.len(), 2);

        app.request_clear();
        app.clear_confirmed();
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_copy_target_defaults_to_newest_message() {
        let mut app = chat_app();
        assert_eq!(app.copy_target(), None);

        app.chat_input = "Hello".to_string();
        app.submit_input();
        app.apply_reply(Ok("Hi".to_string()));

        assert_eq!(app.copy_target(), Some(1));
        app.selected = Some(0);
        assert_eq!(app.copy_target(), Some(0));
    }

    #[test]
    fn test_copied_marker_expires_on_tick() {
        let mut app = chat_app();
        let Some(aged) = Instant::now().checked_sub(Duration::from_secs(COPIED_MARKER_SECS + 1))
        else {
            return;
        };
        app.copied = Some((0, aged));

        app.tick();
        assert!(app.copied.is_none());
    }

    #[test]
    fn test_selection_moves_within_bounds() {
        let mut app = chat_app();
        app.chat_input = "one".to_string();
        app.submit_input();
        app.apply_reply(Ok("two".to_string()));

        app.select_next();
        assert_eq!(app.selected, Some(1));
        app.select_prev();
        assert_eq!(app.selected, Some(0));
        app.select_prev();
        assert_eq!(app.selected, Some(0));
    }
}
