use super::evaluate_company;
use crate::error::{Result, ScoreError};
use crate::types::config::ScoringProfile;
use crate::types::metrics::CompanySignals;
use crate::types::report::ScoreReport;
use serde_json::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Keep reports scoring at least `min_score`, then page through them.
/// Input order is preserved.
pub fn rank_companies(
    reports: Vec<ScoreReport>,
    min_score: f64,
    skip: usize,
    limit: Option<usize>,
) -> Vec<ScoreReport> {
    let kept = reports
        .into_iter()
        .filter(|report| report.composite_score() >= min_score)
        .skip(skip);
    match limit {
        Some(limit) => kept.take(limit).collect(),
        None => kept.collect(),
    }
}

pub fn snapshot_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.exists() {
        return Err(ScoreError::InputNotFound(path.display().to_string()));
    }
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    let mut files = WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .filter(|file| file.extension().is_some_and(|ext| ext == "json"))
        .collect::<Vec<_>>();
    files.sort();
    Ok(files)
}

/// Read one snapshot file holding either a single company object or an
/// array of them.
pub fn read_snapshots(path: &Path) -> Result<Vec<CompanySignals>> {
    if !path.is_file() {
        return Err(ScoreError::InputNotFound(path.display().to_string()));
    }
    let content = std::fs::read_to_string(path)?;
    let value: Value = serde_json::from_str(&content)?;
    let snapshots = match value {
        Value::Array(items) => items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<std::result::Result<Vec<CompanySignals>, _>>()?,
        other => vec![serde_json::from_value(other)?],
    };
    tracing::debug!(path = %path.display(), count = snapshots.len(), "read snapshots");
    Ok(snapshots)
}

#[derive(Debug)]
pub enum Snapshot {
    Parsed(CompanySignals),
    /// A file in the batch that could not be read or parsed.
    Unreadable { path: PathBuf, error: ScoreError },
}

/// Load every snapshot under `path`. A broken file does not stop the
/// batch; it is kept as [`Snapshot::Unreadable`] so it still shows up.
pub fn load_snapshots(path: &Path) -> Result<Vec<Snapshot>> {
    let mut snapshots = Vec::new();
    for file in snapshot_files(path)? {
        match read_snapshots(&file) {
            Ok(parsed) => snapshots.extend(parsed.into_iter().map(Snapshot::Parsed)),
            Err(error) => {
                tracing::error!(path = %file.display(), %error, "unreadable snapshot file");
                snapshots.push(Snapshot::Unreadable { path: file, error });
            }
        }
    }
    Ok(snapshots)
}

pub fn evaluate_snapshots(
    snapshots: &[Snapshot],
    profile: &ScoringProfile,
) -> Result<Vec<ScoreReport>> {
    snapshots
        .iter()
        .map(|snapshot| match snapshot {
            Snapshot::Parsed(signals) => evaluate_company(signals, profile),
            Snapshot::Unreadable { path, error } => Ok(ScoreReport::unreadable(
                path.file_stem().map(|stem| stem.to_string_lossy().into_owned()),
                &profile.name,
                error.to_string(),
            )),
        })
        .collect()
}
