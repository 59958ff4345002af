use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub message: String,
}

/// In-memory logger feeding the log panel. Keeps the most recent entries.
#[derive(Clone)]
pub struct AppLogger {
    entries: Arc<Mutex<VecDeque<LogEntry>>>,
    max_entries: usize,
}

impl AppLogger {
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(max_entries))),
            max_entries,
        }
    }

    pub fn init(self) -> Result<(), log::SetLoggerError> {
        log::set_boxed_logger(Box::new(self.clone()))?;
        log::set_max_level(LevelFilter::Info);
        Ok(())
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        match self.entries.lock() {
            Ok(entries) => entries.iter().cloned().collect(),
            Err(_) => Vec::new(),
        }
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl log::Log for AppLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Info
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let entry = LogEntry {
            timestamp: Local::now(),
            level: record.level(),
            message: format!("{}", record.args()),
        };

        if let Ok(mut entries) = self.entries.lock() {
            entries.push_back(entry);
            while entries.len() > self.max_entries {
                entries.pop_front();
            }
        }
    }

    fn flush(&self) {}
}
