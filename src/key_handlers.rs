use crate::app::App;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What the event loop should do after a key press; everything else is
/// handled by mutating `App` in place.
#[derive(Debug)]
pub enum ChatAction {
    SendMessage(String),
    Quit,
}

pub fn handle_chat_input(key: KeyEvent, app: &mut App) -> Option<ChatAction> {
    if app.confirm_clear {
        handle_clear_confirm_input(key, app);
        return None;
    }

    match key.code {
        KeyCode::Enter => app.submit_input().map(ChatAction::SendMessage),
        KeyCode::PageUp => {
            app.scroll_up();
            None
        }
        KeyCode::PageDown => {
            app.scroll_down();
            None
        }
        KeyCode::End => {
            app.scroll_to_bottom();
            None
        }
        KeyCode::Up if key.modifiers.contains(KeyModifiers::ALT) => {
            app.select_prev();
            None
        }
        KeyCode::Down if key.modifiers.contains(KeyModifiers::ALT) => {
            app.select_next();
            None
        }
        KeyCode::Esc => {
            app.clear_selection();
            None
        }
        KeyCode::Backspace => {
            if !app.awaiting_reply {
                app.chat_input.pop();
            }
            None
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => return Some(ChatAction::Quit),
                    'y' => app.copy_message(),
                    'e' => {
                        if !app.transcript.is_empty() {
                            app.export_chat();
                        }
                    }
                    'l' => app.request_clear(),
                    'u' => app.scroll_up(),
                    'd' => app.scroll_down(),
                    _ => {}
                }
            } else if !app.awaiting_reply {
                app.chat_input.push(c);
            }
            None
        }
        _ => None,
    }
}

pub fn handle_clear_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.clear_confirmed();
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.clear_cancelled();
        }
        _ => {}
    }
}
