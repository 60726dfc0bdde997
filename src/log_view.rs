#[derive(Debug, Default)]
pub struct LogView {
    pub entries: Vec<String>,
}

impl LogView {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
        if self.entries.len() > 200 {
            self.entries.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_view_caps_entries() {
        let mut logs = LogView::new();
        for i in 0..250 {
            logs.add(format!("entry {}", i));
        }
        assert_eq!(logs.entries.len(), 200);
        assert_eq!(logs.entries[0], "entry 50");
    }
}
