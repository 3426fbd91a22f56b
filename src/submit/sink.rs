//! Where submitted samples go.

use super::types::{ServiceError, SubmissionReceipt, TrainingSample};
use crate::export::file::{self, FileSaveConfig};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// Storage backend for training samples.
///
/// Implementations validate or trust the sample as they see fit; the submit
/// workflow has already run [`TrainingSample::validate`].
pub trait SampleSink {
    fn submit(&mut self, sample: &TrainingSample) -> Result<SubmissionReceipt, ServiceError>;
}

impl<F> SampleSink for F
where
    F: FnMut(&TrainingSample) -> Result<SubmissionReceipt, ServiceError>,
{
    fn submit(&mut self, sample: &TrainingSample) -> Result<SubmissionReceipt, ServiceError> {
        self(sample)
    }
}

/// Name of the JSON-lines index written next to the samples.
pub const INDEX_FILE: &str = "samples.jsonl";

#[derive(Serialize)]
struct IndexEntry<'a> {
    file: &'a str,
    label: &'a str,
    user: &'a str,
}

#[derive(Deserialize)]
struct IndexLine {
    user: String,
}

/// Number of stored samples contributed by one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub user: String,
    pub score: usize,
}

/// Writes each sample as a PNG into one flat directory and appends a line to
/// [`INDEX_FILE`] recording its label and contributor.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    config: FileSaveConfig,
}

impl DirectorySink {
    pub fn new(config: FileSaveConfig) -> Self {
        Self { config }
    }

    /// Per-user sample counts from this sink's index, highest first.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, ServiceError> {
        leaderboard(&self.config.save_directory)
    }
}

impl SampleSink for DirectorySink {
    fn submit(&mut self, sample: &TrainingSample) -> Result<SubmissionReceipt, ServiceError> {
        let png = sample.png_bytes()?;
        let directory = file::ensure_directory_exists(&self.config.save_directory)?;
        let name = file::generate_filename(&self.config.filename_template, Some(&sample.label))?;
        let path = file::write_new_png(&directory, &name, &png)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or(name);

        let entry = serde_json::to_string(&IndexEntry {
            file: &name,
            label: &sample.label,
            user: &sample.user,
        })?;
        let mut index = OpenOptions::new()
            .create(true)
            .append(true)
            .open(directory.join(INDEX_FILE))?;
        writeln!(index, "{entry}")?;

        log::info!("Stored sample '{}' from {} as {}", sample.label, sample.user, name);
        Ok(SubmissionReceipt { file_id: name })
    }
}

/// Counts the samples each user contributed to the index in `directory`.
///
/// Entries are sorted by score, highest first, ties broken by user name. A
/// directory without an index yields an empty board.
pub fn leaderboard(directory: &Path) -> Result<Vec<LeaderboardEntry>, ServiceError> {
    let index = match fs::read_to_string(directory.join(INDEX_FILE)) {
        Ok(index) => index,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(err) => return Err(err.into()),
    };

    let mut scores: HashMap<String, usize> = HashMap::new();
    for line in index.lines().filter(|l| !l.trim().is_empty()) {
        let entry: IndexLine = serde_json::from_str(line)?;
        *scores.entry(entry.user).or_default() += 1;
    }

    let mut board: Vec<LeaderboardEntry> = scores
        .into_iter()
        .map(|(user, score)| LeaderboardEntry { user, score })
        .collect();
    board.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.user.cmp(&b.user)));
    Ok(board)
}
