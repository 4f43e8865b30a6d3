use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Append-only JSONL log of one session.
pub struct Transcript {
    pub path: PathBuf,
    session_id: String,
    file: File,
}

#[derive(Serialize)]
struct Event<'a> {
    ts: DateTime<Utc>,
    session_id: &'a str,
    #[serde(rename = "type")]
    event_type: &'a str,
    #[serde(flatten)]
    data: serde_json::Value,
}

impl Transcript {
    pub fn new(path: &Path, session_id: &str) -> Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;

        Ok(Self {
            path: path.to_path_buf(),
            session_id: session_id.to_string(),
            file,
        })
    }

    pub fn log(&mut self, event_type: &str, data: serde_json::Value) -> Result<()> {
        let event = Event {
            ts: Utc::now(),
            session_id: &self.session_id,
            event_type,
            data,
        };
        let line = serde_json::to_string(&event)?;
        writeln!(self.file, "{}", line)?;
        self.file.flush()?;
        Ok(())
    }

    /// Log session start with the remote endpoint in use
    pub fn session_start(&mut self, base_url: &str, mode: &str) -> Result<()> {
        self.log(
            "session_start",
            serde_json::json!({
                "base_url": base_url,
                "mode": mode,
            }),
        )
    }

    /// Log an operator command
    pub fn command(&mut self, line: &str) -> Result<()> {
        self.log("command", serde_json::json!({ "line": line }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_events_are_jsonl() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.jsonl");
        let mut transcript = Transcript::new(&path, "sess-1").unwrap();

        transcript
            .session_start("https://example.test", "repl")
            .unwrap();
        transcript
            .log("user_deleted", serde_json::json!({ "id": 3 }))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["type"], "session_start");
        assert_eq!(lines[0]["base_url"], "https://example.test");
        assert_eq!(lines[1]["type"], "user_deleted");
        assert_eq!(lines[1]["id"], 3);
        assert_eq!(lines[1]["session_id"], "sess-1");
        assert!(lines[1]["ts"].is_string());
    }

    #[test]
    fn test_appends_across_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("s.jsonl");

        Transcript::new(&path, "a")
            .unwrap()
            .command("/list")
            .unwrap();
        Transcript::new(&path, "a")
            .unwrap()
            .command("/exit")
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }
}
