// src/export.rs

use crate::errors::{FynoraqError, FynoraqResult};
use crate::markdown::markdown_to_plain;
use crate::message::ChatMessage;
use chrono::{Local, NaiveDate};
use std::fs;
use std::path::{Path, PathBuf};

/// Formats the transcript for export: one `[time] sender: text` block per
/// message, blocks separated by a blank line, Markdown stripped.
pub fn format_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .map(|msg| {
            format!(
                "[{}] {}: {}",
                msg.timestamp.format("%H:%M:%S"),
                msg.sender,
                markdown_to_plain(&msg.text)
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("chat-export-{}.txt", date.format("%Y-%m-%d"))
}

/// Writes the formatted transcript into `dir`, named with the current date.
/// Returns the path of the written file.
pub fn export_chat(messages: &[ChatMessage], dir: &Path) -> FynoraqResult<PathBuf> {
    if messages.is_empty() {
        return Err(FynoraqError::export_error("nothing to export"));
    }

    let path = dir.join(export_filename(Local::now().date_naive()));
    fs::write(&path, format_transcript(messages))?;
    Ok(path)
}
