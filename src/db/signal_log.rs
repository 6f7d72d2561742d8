//! Append-only signal log.
//!
//! One JSON line per emitted signal: symbol, signal, price, indicator
//! snapshot, timestamp. An audit artifact only; the pipeline never reads it
//! back. Writes are serialized through a single-writer lock so concurrent
//! per-symbol tasks cannot interleave records.

use crate::models::signal::SignalEvent;
use std::io;
use std::path::Path;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub struct SignalLog {
    writer: Mutex<File>,
}

impl SignalLog {
    /// Open (or create) the log file for appending.
    pub async fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        Ok(Self {
            writer: Mutex::new(file),
        })
    }

    /// Append one signal record as a JSON line.
    pub async fn append(&self, event: &SignalEvent) -> io::Result<()> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self.writer.lock().await;
        file.write_all(&line).await?;
        file.flush().await
    }
}
