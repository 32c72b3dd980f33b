//! Finished attempts as stored in history

use anyhow::{Result, ensure};
use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

use crate::quiz::{QuizSession, ScoreCard, Subject, TestType, scoring};

/// An immutable record of one finished attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    pub id: String,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
    pub subject: Subject,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub score: i64,
    pub total_questions: usize,
    #[serde(rename = "accuracy")]
    pub accuracy_percent: u8,
    #[serde(rename = "timeTaken")]
    pub elapsed_label: String,
    #[serde(rename = "quizState")]
    pub snapshot: QuizSession,
}

impl TestResult {
    /// Build the record for a finalized session
    pub fn from_session(session: QuizSession) -> Result<Self> {
        Self::created_at(session, Utc::now())
    }

    pub fn created_at(session: QuizSession, created_at: DateTime<Utc>) -> Result<Self> {
        ensure!(session.is_complete(), "session {} has not been finalized", session.id());

        let card = scoring::score(&session);
        let elapsed = session.elapsed().map(|d| d.num_seconds().max(0) as u64).unwrap_or(0);

        Ok(Self {
            id: session.id().to_string(),
            created_at,
            subject: session.subject(),
            test_type: session.test_type(),
            score: card.score,
            total_questions: card.total_questions,
            accuracy_percent: card.accuracy_percent,
            elapsed_label: format_elapsed(elapsed),
            snapshot: session,
        })
    }

    /// Recompute the score card from the stored snapshot
    pub fn rescore(&self) -> ScoreCard {
        scoring::score(&self.snapshot)
    }

    /// Date shown in listings, e.g. `19 Oct 2026`
    pub fn date_label(&self) -> String {
        self.created_at.with_timezone(&Local).format("%-d %b %Y").to_string()
    }
}

/// Human duration such as `1h 05m`, `45m 10s` or `40s`
pub fn format_elapsed(seconds: u64) -> String {
    let h = seconds / 3600;
    let m = (seconds % 3600) / 60;
    let s = seconds % 60;
    if h > 0 {
        format!("{}h {:02}m", h, m)
    } else if m > 0 {
        format!("{}m {:02}s", m, s)
    } else {
        format!("{}s", s)
    }
}
