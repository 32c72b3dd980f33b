//! Append-only persistence for finished attempts

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Serialize;

use super::result::TestResult;
use crate::config::Config;
use crate::quiz::Subject;

/// Aggregate figures for one subject
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SubjectStats {
    /// Rounded mean accuracy, 0 when there are no results
    pub average_accuracy: u8,
    pub count: usize,
}

/// All stored results in insertion order
///
/// The whole collection is loaded once and rewritten on every append. The
/// in-memory list always mirrors the last snapshot written successfully,
/// minus any records that were unreadable on load.
#[derive(Debug)]
pub struct ResultStore {
    path: PathBuf,
    results: Vec<TestResult>,
    /// Records skipped on load because they could not be trusted
    dropped: usize,
}

impl ResultStore {
    /// Open the store at the default location
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Config::history_path()?))
    }

    /// Load the store at `path`
    ///
    /// Missing or unreadable history is treated as empty. Individual records
    /// that fail to parse or whose snapshot is inconsistent are skipped.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let (results, dropped) = match Self::read(&path) {
            Ok(records) => Self::keep_valid(records),
            Err(e) => {
                tracing::warn!("Ignoring unreadable history at {:?}: {:#}", path, e);
                (Vec::new(), 0)
            }
        };
        tracing::debug!("Loaded {} results from {:?}", results.len(), path);
        Self { path, results, dropped }
    }

    fn read(path: &Path) -> Result<Vec<serde_json::Value>> {
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read history from {:?}", path))?;
        serde_json::from_str(&contents).with_context(|| "Failed to parse history.json")
    }

    fn keep_valid(records: Vec<serde_json::Value>) -> (Vec<TestResult>, usize) {
        let total = records.len();
        let results: Vec<TestResult> = records
            .into_iter()
            .enumerate()
            .filter_map(|(i, value)| {
                let result = match serde_json::from_value::<TestResult>(value) {
                    Ok(result) => result,
                    Err(e) => {
                        tracing::warn!("Skipping history record {}: {}", i, e);
                        return None;
                    }
                };
                match result.snapshot.check_consistency() {
                    Ok(()) => Some(result),
                    Err(e) => {
                        tracing::warn!("Skipping history record {} ({}): {}", i, result.id, e);
                        None
                    }
                }
            })
            .collect();
        let dropped = total - results.len();
        (results, dropped)
    }

    fn write(path: &Path, results: &[TestResult]) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(results).with_context(|| "Failed to serialize history")?;

        // write beside the target then rename so a failed write keeps the old file
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents).with_context(|| format!("Failed to write history to {:?}", tmp))?;
        fs::rename(&tmp, path)
            .with_context(|| format!("Failed to move {:?} into place at {:?}", tmp, path))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a result and persist the full collection
    ///
    /// If writing fails the result is not kept.
    pub fn append(&mut self, result: TestResult) -> Result<()> {
        let id = result.id.clone();
        self.results.push(result);

        if let Err(e) = Self::write(&self.path, &self.results) {
            self.results.pop();
            tracing::error!("Failed to save result {}: {:#}", id, e);
            return Err(e);
        }

        tracing::info!("Saved result {} ({} in history)", id, self.results.len());
        Ok(())
    }

    /// Rewrite the current collection to disk
    ///
    /// Skipped records are not written back, so this removes them for good.
    pub fn flush(&mut self) -> Result<()> {
        Self::write(&self.path, &self.results)?;
        tracing::info!("Rewrote history with {} results", self.results.len());
        self.dropped = 0;
        Ok(())
    }

    /// Number of records skipped on load
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// All results, oldest first
    pub fn load_all(&self) -> &[TestResult] {
        &self.results
    }

    /// All results, newest first
    pub fn recent(&self) -> impl Iterator<Item = &TestResult> {
        self.results.iter().rev()
    }

    pub fn find(&self, id: &str) -> Option<&TestResult> {
        self.results.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Mean accuracy and attempt count for `subject`
    pub fn aggregate_by_subject(&self, subject: Subject) -> SubjectStats {
        let accuracies: Vec<u64> = self
            .results
            .iter()
            .filter(|r| r.subject == subject)
            .map(|r| u64::from(r.rescore().accuracy_percent))
            .collect();

        if accuracies.is_empty() {
            return SubjectStats::default();
        }

        let mean = accuracies.iter().sum::<u64>() as f64 / accuracies.len() as f64;
        SubjectStats { average_accuracy: mean.round() as u8, count: accuracies.len() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::fixtures;
    use crate::quiz::{QuizSession, TestType};
    use pretty_assertions::assert_eq;

    fn result(subject: Subject, answers: &[Option<usize>]) -> TestResult {
        let mut s =
            QuizSession::new(fixtures::questions(answers.len()), subject, TestType::Mixed).unwrap();
        for (i, a) in answers.iter().enumerate() {
            s.go_to(i).unwrap();
            if let Some(a) = a {
                s.record_answer(*a).unwrap();
            }
        }
        s.finalize().unwrap();
        TestResult::from_session(s).unwrap()
    }

    #[test]
    fn missing_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = ResultStore::open(dir.path().join("history.json"));
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_opens_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        fs::write(&path, "{not json").unwrap();

        let store = ResultStore::open(&path);
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_snapshot_is_dropped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let good = result(Subject::Biology, &[Some(0), None]);
        let mut bad = serde_json::to_value(result(Subject::Physics, &[Some(1)])).unwrap();
        bad["quizState"]["questions"][0]["correctAnswer"] = serde_json::json!(7);
        let garbage = serde_json::json!({ "id": "x" });
        let records = serde_json::json!([good, bad, garbage]);
        fs::write(&path, records.to_string()).unwrap();

        let store = ResultStore::open(&path);
        assert_eq!(store.load_all(), &[good]);
        assert_eq!(store.dropped(), 2);
    }

    #[test]
    fn flush_rewrites_without_dropped_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        let good = result(Subject::Chemistry, &[Some(0)]);
        let mut bad = serde_json::to_value(result(Subject::Chemistry, &[Some(0)])).unwrap();
        bad["quizState"]["answers"][0] = serde_json::json!(9);
        fs::write(&path, serde_json::json!([bad, good]).to_string()).unwrap();

        let mut store = ResultStore::open(&path);
        assert_eq!(store.dropped(), 1);
        store.flush().unwrap();
        assert_eq!(store.dropped(), 0);

        let reloaded = ResultStore::open(&path);
        assert_eq!(reloaded.load_all(), &[good]);
        assert_eq!(reloaded.dropped(), 0);
    }

    #[test]
    fn append_persists_and_reload_preserves_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history.json");

        let mut store = ResultStore::open(&path);
        let first = result(Subject::Biology, &[Some(0), None]);
        let second = result(Subject::Physics, &[Some(1)]);
        store.append(first.clone()).unwrap();
        store.append(second.clone()).unwrap();

        let reloaded = ResultStore::open(&path);
        assert_eq!(reloaded.load_all(), &[first, second]);
    }

    #[test]
    fn recent_is_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path().join("history.json"));
        let a = result(Subject::Biology, &[Some(0)]);
        let b = result(Subject::Biology, &[None]);
        store.append(a.clone()).unwrap();
        store.append(b.clone()).unwrap();

        let ids: Vec<_> = store.recent().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec![b.id.as_str(), a.id.as_str()]);
        assert_eq!(store.find(&a.id), Some(&a));
    }

    #[test]
    fn failed_write_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be makes the rename fail
        let path = dir.path().join("history.json");
        fs::create_dir_all(path.join("blocker")).unwrap();

        let mut store = ResultStore::open(&path);
        assert!(store.append(result(Subject::Biology, &[Some(0)])).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn aggregate_by_subject_rounds_mean_accuracy() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ResultStore::open(dir.path().join("history.json"));
        // 100%, 50% and 0% for biology; physics ignored
        store.append(result(Subject::Biology, &[Some(0), Some(0)])).unwrap();
        store.append(result(Subject::Biology, &[Some(0), Some(1)])).unwrap();
        store.append(result(Subject::Biology, &[None, None, None])).unwrap();
        store.append(result(Subject::Physics, &[Some(0)])).unwrap();

        assert_eq!(
            store.aggregate_by_subject(Subject::Biology),
            SubjectStats { average_accuracy: 50, count: 3 }
        );
        assert_eq!(
            store.aggregate_by_subject(Subject::Chemistry),
            SubjectStats { average_accuracy: 0, count: 0 }
        );
    }
}
