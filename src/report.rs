use crate::lifecycle::key::KeyMode;
use md5::{Digest, Md5};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// What a completed run did, suitable for `--summary-json`.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub bucket: String,
    pub key: String,
    pub key_mode: KeyMode,
    pub region: Option<String>,
    pub bucket_created: bool,
    pub uploaded_bytes: u64,
    pub download_path: PathBuf,
    pub downloaded_bytes: u64,
    pub object_deleted: bool,
    pub bucket_deleted: bool,
    pub source_md5: Option<String>,
    pub download_md5: Option<String>,
    pub started: String,
    pub finished: String,
}

/// Current UTC time in the format used for summary timestamps.
#[must_use]
pub fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Calculate the MD5 of a file, streaming it in fixed-size chunks.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read.
pub fn file_md5(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Md5::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = file.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write the summary as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails or the file cannot be written.
pub fn write_summary_json(summary: &RunSummary, output: &Path) -> io::Result<()> {
    let content = serde_json::to_string_pretty(summary)?;
    let mut file = File::create(output)?;
    file.write_all(content.as_bytes())?;
    file.write_all(b"\n")?;
    Ok(())
}
