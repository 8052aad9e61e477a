//! Run history logging.
//!
//! Ledger events are appended to `events.jsonl` in the log directory as
//! they happen, one JSON object per line, stamped with wall-clock time.
//! The core stays free of timestamps so identical seeds keep producing
//! identical ledgers.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use chrono::Utc;
use pawgrove_core::events::{SimEvent, TickReport};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LogError {
    /// File system errors
    #[error("File system error: {0}")]
    FileSystem(#[from] std::io::Error),

    /// JSON encoding errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LogError>;

#[derive(Serialize, Debug)]
struct LogRecord<'a> {
    timestamp: String,
    #[serde(flatten)]
    event: &'a SimEvent,
}

/// Appends run events to `<log_dir>/events.jsonl`. A dummy logger
/// swallows everything, for tests and `--quiet` runs.
pub struct RunLogger {
    file: Option<BufWriter<File>>,
    log_dir: String,
}

impl RunLogger {
    pub fn new() -> Result<Self> {
        Self::new_at("logs")
    }

    pub fn new_at(dir: &str) -> Result<Self> {
        if !std::path::Path::new(dir).exists() {
            std::fs::create_dir_all(dir)?;
        }
        let file_path = format!("{}/events.jsonl", dir);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(file_path)?;
        Ok(Self {
            file: Some(BufWriter::new(file)),
            log_dir: dir.to_string(),
        })
    }

    pub fn new_dummy() -> Self {
        Self {
            file: None,
            log_dir: String::new(),
        }
    }

    pub fn log_dir(&self) -> &str {
        &self.log_dir
    }

    pub fn log_event(&mut self, event: &SimEvent) -> Result<()> {
        if let Some(ref mut file) = self.file {
            let record = LogRecord {
                timestamp: Utc::now().to_rfc3339(),
                event,
            };
            let json = serde_json::to_string(&record)?;
            writeln!(file, "{}", json)?;
            file.flush()?;
        }
        Ok(())
    }

    pub fn log_report(&mut self, report: &TickReport) -> Result<()> {
        for event in &report.events {
            self.log_event(event)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pawgrove_core::agent::EntityId;
    use pawgrove_core::species::Species;

    #[test]
    fn test_dummy_logger_swallows_events() {
        let mut logger = RunLogger::new_dummy();
        let event = SimEvent::Extinction { tick: 9 };
        assert!(logger.log_event(&event).is_ok());
    }

    #[test]
    fn test_events_land_in_jsonl_with_timestamps() {
        let dir = std::env::temp_dir().join(format!("pawgrove_log_{}", std::process::id()));
        let dir = dir.to_string_lossy().to_string();
        let mut logger = RunLogger::new_at(&dir).unwrap();

        let event = SimEvent::Birth {
            tick: 3,
            id: EntityId(21),
            species: Species::Dog,
            parent_a: EntityId(2),
            parent_b: EntityId(5),
        };
        logger.log_event(&event).unwrap();

        let contents = std::fs::read_to_string(format!("{}/events.jsonl", dir)).unwrap();
        let line = contents.lines().last().unwrap();
        assert!(line.contains("\"event\":\"Birth\""), "line: {line}");
        assert!(line.contains("\"timestamp\""), "line: {line}");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
