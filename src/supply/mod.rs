//! Question supply: where the questions for an attempt come from
//!
//! The quiz engine only sees the [`QuestionSupply`] trait. The app uses the
//! Claude-backed supply; tests and offline practice use [`FixtureSupply`].

pub mod fixture;

use async_trait::async_trait;
use thiserror::Error;

use crate::quiz::{Question, QuizSession, RawQuestion, SessionError, Subject, TestType};

pub use fixture::FixtureSupply;

/// Default number of questions in a full-length mock
pub const DEFAULT_QUESTION_COUNT: usize = 90;

/// Parameters for a batch of questions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplyRequest {
    pub test_type: TestType,
    pub subject: Subject,
    /// Chapter names to draw from; empty means the entire syllabus
    pub chapters: Vec<String>,
    pub count: usize,
}

impl SupplyRequest {
    pub fn new(test_type: TestType, subject: Subject) -> Self {
        Self { test_type, subject, chapters: Vec::new(), count: DEFAULT_QUESTION_COUNT }
    }

    pub fn with_chapters(mut self, chapters: Vec<String>) -> Self {
        self.chapters = chapters;
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    /// Chapter filter as shown to the generator
    pub fn chapter_summary(&self) -> String {
        if self.chapters.is_empty() { "Entire Syllabus".to_string() } else { self.chapters.join(", ") }
    }
}

/// Why a batch of questions could not be produced
#[derive(Debug, Error)]
pub enum SupplyError {
    /// The supply answered but produced no usable questions
    #[error("no questions were generated")]
    Empty,

    /// The supply itself failed
    #[error("question generation failed: {0}")]
    Failed(String),

    /// The payload was not a JSON array of questions
    #[error("could not read generated questions: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// Anything that can produce an ordered batch of questions
#[async_trait]
pub trait QuestionSupply: Send + Sync {
    async fn request(&self, request: &SupplyRequest) -> Result<Vec<Question>, SupplyError>;
}

/// Turn an untrusted JSON array into validated questions
///
/// Items that fail validation are skipped with a warning.
pub fn parse_questions(json: &str, request: &SupplyRequest) -> Result<Vec<Question>, SupplyError> {
    let items: Vec<serde_json::Value> = serde_json::from_str(json)?;
    let total = items.len();

    let questions: Vec<Question> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let raw = match serde_json::from_value::<RawQuestion>(item) {
                Ok(raw) => raw,
                Err(e) => {
                    tracing::warn!("Dropping generated question #{}: {}", i + 1, e);
                    return None;
                }
            };
            match raw.validate(request.subject, request.test_type) {
                Ok(q) => Some(q),
                Err(e) => {
                    tracing::warn!("Dropping generated question #{}: {}", i + 1, e);
                    None
                }
            }
        })
        .collect();

    if questions.len() < total {
        tracing::warn!("Kept {} of {} generated questions", questions.len(), total);
    }
    Ok(questions)
}

/// Request questions and start an attempt
///
/// A failed request and an empty batch are the same failure to the caller;
/// no session is created in either case.
pub async fn start_attempt(
    supply: &dyn QuestionSupply,
    request: &SupplyRequest,
) -> Result<QuizSession, SupplyError> {
    tracing::info!(
        "Requesting {} {} questions ({}) for {}",
        request.count,
        request.test_type.wire_name(),
        request.chapter_summary(),
        request.subject
    );

    let questions = supply.request(request).await.inspect_err(|e| {
        tracing::error!("Question supply failed: {}", e);
    })?;

    QuizSession::new(questions, request.subject, request.test_type).map_err(|e| match e {
        SessionError::Empty => {
            tracing::error!("Question supply returned no questions");
            SupplyError::Empty
        }
        other => SupplyError::Failed(other.to_string()),
    })
}


#[cfg(test)]
mod tests {
    use super::testing::StaticSupply;
    use super::*;

    fn request() -> SupplyRequest {
        SupplyRequest::new(TestType::Mixed, Subject::Chemistry).with_count(5)
    }

    #[test]
    fn chapter_summary_defaults_to_entire_syllabus() {
        assert_eq!(request().chapter_summary(), "Entire Syllabus");
        let r = request().with_chapters(vec!["Haloalkanes".into(), "Electrochemistry".into()]);
        assert_eq!(r.chapter_summary(), "Haloalkanes, Electrochemistry");
    }

    #[test]
    fn parse_questions_drops_malformed_items() {
        let json = r#"[
            {"id":"1","question":"Q1","options":["a","b","c","d"],"correctAnswer":0,
             "explanation":"e","ncertReference":"r","chapter":"Haloalkanes"},
            {"id":"2","question":"Q2","options":["a","b"],"correctAnswer":0,
             "explanation":"e","ncertReference":"r","chapter":"Haloalkanes"},
            {"id":"3","question":"Q3","options":"nope"},
            {"id":"4","question":"Q4","options":["a","b","c","d"],"correctAnswer":9,
             "explanation":"e","ncertReference":"r","chapter":"Haloalkanes"}
        ]"#;
        let qs = parse_questions(json, &request()).unwrap();
        assert_eq!(qs.len(), 1);
        assert_eq!(qs[0].id, "1");
        assert_eq!(qs[0].subject, Subject::Chemistry);
    }

    #[test]
    fn parse_questions_rejects_non_array() {
        assert!(matches!(parse_questions("{}", &request()), Err(SupplyError::Invalid(_))));
    }

    #[tokio::test]
    async fn start_attempt_builds_session() {
        let session = start_attempt(&StaticSupply(Ok(5)), &request()).await.unwrap();
        assert_eq!(session.len(), 5);
        assert_eq!(session.subject(), Subject::Chemistry);
        assert_eq!(session.test_type(), TestType::Mixed);
    }

    #[tokio::test]
    async fn empty_batch_is_a_failure() {
        let err = start_attempt(&StaticSupply(Ok(0)), &request()).await.unwrap_err();
        assert!(matches!(err, SupplyError::Empty));
    }

    #[tokio::test]
    async fn supply_failure_propagates() {
        let err = start_attempt(&StaticSupply(Err("offline".into())), &request()).await.unwrap_err();
        assert!(matches!(err, SupplyError::Failed(msg) if msg == "offline"));
    }
}
