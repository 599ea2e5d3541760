//! JSONL record store
//!
//! Each entity kind is stored in `<data_dir>/<kind>.jsonl` with one JSON
//! object per line. Uses file locking for concurrent access safety.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Store for records of all entity kinds in a data directory
pub struct RecordStore {
    dir: PathBuf,
}

impl RecordStore {
    /// Creates a store rooted at the given data directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Returns the data directory
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Returns the backing file for a kind
    pub fn path_for(&self, kind: &str) -> PathBuf {
        self.dir.join(format!("{}.jsonl", kind))
    }

    /// Reads all records of a kind, in file order
    ///
    /// A missing backing file yields an empty vec.
    pub fn load_all<T: DeserializeOwned>(&self, kind: &str) -> Result<Vec<T>> {
        let path = self.path_for(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)
            .with_context(|| format!("Failed to open {} store: {}", kind, path.display()))?;

        // Shared lock for reading, released on drop
        file.lock_shared()
            .with_context(|| format!("Failed to acquire read lock on {} store", kind))?;

        let reader = BufReader::new(&file);
        let mut records = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.with_context(|| format!("Failed to read line {}", line_num + 1))?;

            if line.trim().is_empty() {
                continue;
            }

            let record: T = serde_json::from_str(&line).with_context(|| {
                format!("Failed to parse {} record at line {}", kind, line_num + 1)
            })?;

            records.push(record);
        }

        Ok(records)
    }

    /// Writes all records of a kind (full rewrite), preserving order
    pub fn save_all<T: Serialize>(&self, kind: &str, records: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create data directory: {}", self.dir.display()))?;

        // Write to temp file first
        let path = self.path_for(kind);
        let temp_path = path.with_extension("jsonl.tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

            file.lock_exclusive()
                .with_context(|| format!("Failed to acquire write lock on {} store", kind))?;

            let mut writer = BufWriter::new(&file);

            for record in records {
                let line = serde_json::to_string(record)
                    .with_context(|| format!("Failed to serialize {} record", kind))?;
                writeln!(writer, "{}", line)
                    .with_context(|| format!("Failed to write {} record", kind))?;
            }

            writer
                .flush()
                .with_context(|| format!("Failed to flush {} store", kind))?;
        }

        // Atomic rename
        fs::rename(&temp_path, &path).with_context(|| {
            format!(
                "Failed to rename {} to {}",
                temp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}
