// src/logging.rs

use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

pub const RELAY_LOG_FILE: &str = "relay.log";

/// Diagnostic record for one relayed call.
#[derive(Debug)]
pub struct ApiCallLog {
    pub timestamp: DateTime<Utc>,
    pub endpoint: String,
    pub request_summary: String,
    pub response_status: u16,
    pub response_time_ms: u128,
    pub reply: String,
}

/// Appends an API call record to the `relay.log` file, including the reply
/// as an `AI response` line.
pub fn log_api_call(log: &ApiCallLog) {
    if let Err(e) = write_log_entry(Path::new(RELAY_LOG_FILE), log) {
        log::warn!("failed to write relay log: {}", e);
    }
}

fn write_log_entry(path: &Path, log: &ApiCallLog) -> std::io::Result<()> {
    let log_entry = format!(
        "[{}] {} - {} - Status: {} - Time: {}ms\n[{}] AI response: {}\n",
        log.timestamp.to_rfc3339(),
        log.endpoint,
        log.request_summary,
        log.response_status,
        log.response_time_ms,
        log.timestamp.to_rfc3339(),
        log.reply
    );

    let mut file = OpenOptions::new().append(true).create(true).open(path)?;
    file.write_all(log_entry.as_bytes())
}

/// Trims a request body down to something readable in a log line.
pub fn summarize_request(message: &str) -> String {
    const MAX: usize = 120;
    if message.chars().count() > MAX {
        let truncated: String = message.chars().take(MAX).collect();
        format!("{}...", truncated)
    } else {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_log_entry_contains_ai_response_line() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("relay.log");
        let entry = ApiCallLog {
            timestamp: Utc::now(),
            endpoint: "/api/chat".to_string(),
            request_summary: "Hello".to_string(),
            response_status: 200,
            response_time_ms: 42,
            reply: "Hi there!".to_string(),
        };

        write_log_entry(&path, &entry).unwrap();
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("/api/chat"));
        assert!(contents.contains("AI response: Hi there!"));
    }

    #[test]
    fn test_summarize_request_truncates_long_messages() {
        let long = "x".repeat(500);
        let summary = summarize_request(&long);
        assert!(summary.ends_with("..."));
        assert!(summary.chars().count() <= 123);
    }

    #[test]
    fn test_summarize_request_keeps_short_messages() {
        assert_eq!(summarize_request("Hello"), "Hello");
    }
}
