//! File-backed question supply for offline practice

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{QuestionSupply, SupplyError, SupplyRequest, parse_questions};
use crate::quiz::Question;

/// Reads a JSON array of questions from disk
///
/// The file uses the same shape the generator returns. Chapter filters are
/// honoured when the file has matching questions; otherwise the whole file
/// is used.
#[derive(Debug, Clone)]
pub struct FixtureSupply {
    path: PathBuf,
}

impl FixtureSupply {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSupply for FixtureSupply {
    async fn request(&self, request: &SupplyRequest) -> Result<Vec<Question>, SupplyError> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| SupplyError::Failed(format!("failed to read {:?}: {}", self.path, e)))?;

        let mut questions = parse_questions(&contents, request)?;

        if !request.chapters.is_empty() {
            let filtered: Vec<Question> = questions
                .iter()
                .filter(|q| request.chapters.iter().any(|c| c.eq_ignore_ascii_case(&q.chapter)))
                .cloned()
                .collect();
            if !filtered.is_empty() {
                questions = filtered;
            }
        }

        questions.truncate(request.count);
        Ok(questions)
    }
}
