//! The quiz session engine
//!
//! A [`QuizSession`] is one attempt through a fixed, ordered set of
//! questions. It is mutated by discrete user events (answer, navigate) until
//! [`QuizSession::finalize`] freezes it. After that every mutating call is
//! rejected and the session is only read for scoring and review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::model::{OPTION_COUNT, Question, Subject, TestType};

/// Errors from session operations
///
/// These indicate a caller bug; the app never produces them through its
/// own key handling.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("cannot start a session without questions")]
    Empty,

    #[error("question index {index} out of range (session has {len} questions)")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("option {option} out of range (question has {len} options)")]
    OptionOutOfRange { option: usize, len: usize },

    #[error("session {0} is already finalized")]
    Finalized(String),

    #[error("inconsistent session data: {0}")]
    Inconsistent(String),
}

/// Result of pressing "next"
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved to the given index
    Moved(usize),
    /// Already on the last question; the caller should finalize
    AtEnd,
}

/// A single attempt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuizSession {
    id: String,
    questions: Vec<Question>,
    current_index: usize,
    answers: Vec<Option<usize>>,
    #[serde(rename = "isComplete")]
    complete: bool,
    #[serde(rename = "startTime")]
    started_at: DateTime<Utc>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    ended_at: Option<DateTime<Utc>>,
    subject: Subject,
    #[serde(rename = "type")]
    test_type: TestType,
}

impl QuizSession {
    /// Start a new attempt over `questions`
    pub fn new(
        questions: Vec<Question>,
        subject: Subject,
        test_type: TestType,
    ) -> Result<Self, SessionError> {
        Self::started_at(questions, subject, test_type, Utc::now())
    }

    /// Start a new attempt with an explicit start time
    pub fn started_at(
        questions: Vec<Question>,
        subject: Subject,
        test_type: TestType,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::Empty);
        }

        let id = Uuid::new_v4().simple().to_string();
        let answers = vec![None; questions.len()];
        tracing::info!(
            "Starting session {} ({} {}, {} questions)",
            id,
            subject,
            test_type,
            questions.len()
        );

        Ok(Self {
            id,
            questions,
            current_index: 0,
            answers,
            complete: false,
            started_at,
            ended_at: None,
            subject,
            test_type,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false for a constructed session
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The question under the cursor
    pub fn current_question(&self) -> &Question {
        &self.questions[self.current_index]
    }

    /// The recorded answer for the current question
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.current_index]
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn started(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn test_type(&self) -> TestType {
        self.test_type
    }

    pub fn is_last(&self) -> bool {
        self.current_index + 1 == self.questions.len()
    }

    /// Number of questions with a recorded answer
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    fn ensure_open(&self) -> Result<(), SessionError> {
        if self.complete {
            return Err(SessionError::Finalized(self.id.clone()));
        }
        Ok(())
    }

    /// Record `option` for the current question, replacing any earlier choice
    pub fn record_answer(&mut self, option: usize) -> Result<(), SessionError> {
        self.ensure_open()?;
        let len = self.current_question().options.len();
        if option >= len {
            debug_assert!(option < len, "option {} out of range", option);
            return Err(SessionError::OptionOutOfRange { option, len });
        }
        self.answers[self.current_index] = Some(option);
        Ok(())
    }

    /// Clear the answer for the current question
    pub fn clear_answer(&mut self) -> Result<(), SessionError> {
        self.ensure_open()?;
        self.answers[self.current_index] = None;
        Ok(())
    }

    /// Jump to `index`
    pub fn go_to(&mut self, index: usize) -> Result<(), SessionError> {
        self.ensure_open()?;
        let len = self.questions.len();
        if index >= len {
            debug_assert!(index < len, "question index {} out of range", index);
            return Err(SessionError::QuestionOutOfRange { index, len });
        }
        self.current_index = index;
        Ok(())
    }

    /// Move to the next question
    ///
    /// On the last question this does not move; it reports [`Advance::AtEnd`]
    /// so the caller can route to [`QuizSession::finalize`].
    pub fn next(&mut self) -> Result<Advance, SessionError> {
        self.ensure_open()?;
        if self.is_last() {
            return Ok(Advance::AtEnd);
        }
        self.current_index += 1;
        Ok(Advance::Moved(self.current_index))
    }

    /// Move to the previous question; no-op at index 0
    pub fn previous(&mut self) -> Result<usize, SessionError> {
        self.ensure_open()?;
        self.current_index = self.current_index.saturating_sub(1);
        Ok(self.current_index)
    }

    /// Freeze the attempt
    ///
    /// A second call is rejected with [`SessionError::Finalized`] and leaves
    /// the recorded end time untouched.
    pub fn finalize(&mut self) -> Result<&QuizSession, SessionError> {
        self.finalize_at(Utc::now())
    }

    /// Freeze the attempt with an explicit end time
    pub fn finalize_at(&mut self, ended_at: DateTime<Utc>) -> Result<&QuizSession, SessionError> {
        self.ensure_open()?;
        self.ended_at = Some(ended_at);
        self.complete = true;
        tracing::info!(
            "Finalized session {} ({}/{} answered)",
            self.id,
            self.answered_count(),
            self.questions.len()
        );
        Ok(&*self)
    }

    /// Recheck a session read back from storage
    ///
    /// Deserialization bypasses the constructor, so nothing may index into a
    /// stored snapshot until this passes.
    pub fn check_consistency(&self) -> Result<(), SessionError> {
        let len = self.questions.len();
        if len == 0 {
            return Err(SessionError::Empty);
        }
        if self.answers.len() != len {
            return Err(SessionError::Inconsistent(format!(
                "{} answers for {} questions",
                self.answers.len(),
                len
            )));
        }
        if self.current_index >= len {
            return Err(SessionError::QuestionOutOfRange { index: self.current_index, len });
        }
        if let Some((i, q)) =
            self.questions.iter().enumerate().find(|(_, q)| q.correct_index >= OPTION_COUNT)
        {
            return Err(SessionError::Inconsistent(format!(
                "question {} has correct answer {}",
                i + 1,
                q.correct_index
            )));
        }
        if let Some(option) = self.answers.iter().flatten().find(|a| **a >= OPTION_COUNT) {
            return Err(SessionError::OptionOutOfRange { option: *option, len: OPTION_COUNT });
        }
        Ok(())
    }

    /// Wall-clock time between start and finalize
    pub fn elapsed(&self) -> Option<chrono::Duration> {
        self.ended_at.map(|end| end - self.started_at)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::fixtures;
    use proptest::prelude::*;

    fn session(count: usize) -> QuizSession {
        QuizSession::new(fixtures::questions(count), Subject::Biology, TestType::Mixed).unwrap()
    }

    #[test]
    fn new_session_starts_unanswered_at_zero() {
        let s = session(5);
        assert_eq!(s.current_index(), 0);
        assert_eq!(s.answers().len(), 5);
        assert!(s.answers().iter().all(Option::is_none));
        assert!(!s.is_complete());
        assert!(s.ended().is_none());
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = QuizSession::new(vec![], Subject::Physics, TestType::Pyq).unwrap_err();
        assert_eq!(err, SessionError::Empty);
    }

    #[test]
    fn stored_snapshot_consistency() {
        let s = session(3);
        assert_eq!(s.check_consistency(), Ok(()));

        let mut bad = s.clone();
        bad.questions[1].correct_index = 7;
        assert!(matches!(bad.check_consistency(), Err(SessionError::Inconsistent(_))));

        let mut bad = s.clone();
        bad.answers[2] = Some(4);
        assert_eq!(
            bad.check_consistency(),
            Err(SessionError::OptionOutOfRange { option: 4, len: OPTION_COUNT })
        );

        let mut bad = s.clone();
        bad.answers.pop();
        assert!(matches!(bad.check_consistency(), Err(SessionError::Inconsistent(_))));

        let mut bad = s.clone();
        bad.current_index = 3;
        assert_eq!(
            bad.check_consistency(),
            Err(SessionError::QuestionOutOfRange { index: 3, len: 3 })
        );

        let mut bad = s;
        bad.questions.clear();
        bad.answers.clear();
        assert_eq!(bad.check_consistency(), Err(SessionError::Empty));
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(session(1).id(), session(1).id());
    }

    #[test]
    fn previous_at_zero_stays_at_zero() {
        let mut s = session(3);
        s.go_to(0).unwrap();
        assert_eq!(s.previous().unwrap(), 0);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn second_answer_overwrites_first() {
        let mut s = session(3);
        s.record_answer(1).unwrap();
        s.record_answer(3).unwrap();
        assert_eq!(s.answers()[0], Some(3));
    }

    #[test]
    fn next_on_last_question_reports_end() {
        let mut s = session(2);
        assert_eq!(s.next().unwrap(), Advance::Moved(1));
        assert_eq!(s.next().unwrap(), Advance::AtEnd);
        assert_eq!(s.current_index(), 1);
        assert!(!s.is_complete());
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "out of range"))]
    fn go_to_out_of_range_fails_fast() {
        let mut s = session(2);
        let err = s.go_to(2).unwrap_err();
        assert_eq!(err, SessionError::QuestionOutOfRange { index: 2, len: 2 });
    }

    #[test]
    #[cfg_attr(debug_assertions, should_panic(expected = "out of range"))]
    fn option_out_of_range_fails_fast() {
        let mut s = session(2);
        let err = s.record_answer(4).unwrap_err();
        assert_eq!(err, SessionError::OptionOutOfRange { option: 4, len: 4 });
    }

    #[test]
    fn finalize_sets_end_time_once() {
        let mut s = session(2);
        let start = s.started();
        let end = start + chrono::Duration::minutes(30);

        s.finalize_at(end).unwrap();
        assert!(s.is_complete());
        assert_eq!(s.ended(), Some(end));
        assert_eq!(s.elapsed(), Some(chrono::Duration::minutes(30)));

        let later = end + chrono::Duration::minutes(5);
        assert!(matches!(s.finalize_at(later), Err(SessionError::Finalized(_))));
        assert_eq!(s.ended(), Some(end));
    }

    #[test]
    fn finalized_session_rejects_mutation() {
        let mut s = session(3);
        s.record_answer(2).unwrap();
        s.finalize().unwrap();

        assert!(s.record_answer(0).is_err());
        assert!(s.clear_answer().is_err());
        assert!(s.next().is_err());
        assert!(s.previous().is_err());
        assert!(s.go_to(1).is_err());
        assert_eq!(s.answers()[0], Some(2));
    }

    #[test]
    fn clear_answer_unanswers() {
        let mut s = session(1);
        s.record_answer(2).unwrap();
        s.clear_answer().unwrap();
        assert_eq!(s.current_answer(), None);
    }

    #[test]
    fn session_round_trips_through_json() {
        let mut s = session(2);
        s.record_answer(1).unwrap();
        s.finalize().unwrap();

        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"isComplete\":true"));
        let back: QuizSession = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Answer(usize),
        Clear,
        Next,
        Previous,
        GoTo(usize),
    }

    fn op(len: usize) -> impl Strategy<Value = Op> {
        prop_oneof![
            (0..4usize).prop_map(Op::Answer),
            Just(Op::Clear),
            Just(Op::Next),
            Just(Op::Previous),
            (0..len).prop_map(Op::GoTo),
        ]
    }

    proptest! {
        #[test]
        fn answers_and_cursor_stay_in_bounds(
            (len, ops) in (1..40usize).prop_flat_map(|len| (Just(len), prop::collection::vec(op(len), 0..100)))
        ) {
            let mut s = session(len);
            for op in ops {
                match op {
                    Op::Answer(o) => s.record_answer(o).unwrap(),
                    Op::Clear => s.clear_answer().unwrap(),
                    Op::Next => { s.next().unwrap(); }
                    Op::Previous => { s.previous().unwrap(); }
                    Op::GoTo(i) => s.go_to(i).unwrap(),
                }
                prop_assert_eq!(s.answers().len(), s.questions().len());
                prop_assert!(s.current_index() < s.len());
                prop_assert!(s.answers().iter().flatten().all(|&a| a < 4));
            }
        }
    }
}
