//! Negative-marking score computation
//!
//! [`score`] is the single scoring path: it is used when a finished attempt
//! is stored and again whenever a stored attempt is reviewed.

use serde::Serialize;

use super::session::QuizSession;

/// Marks for a correct answer
pub const MARKS_CORRECT: i64 = 4;
/// Marks for a wrong answer
pub const MARKS_WRONG: i64 = -1;

/// Outcome of one question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Verdict {
    Correct,
    Incorrect,
    Unattempted,
}

impl Verdict {
    /// Marks contributed by this verdict
    pub fn marks(&self) -> i64 {
        match self {
            Self::Correct => MARKS_CORRECT,
            Self::Incorrect => MARKS_WRONG,
            Self::Unattempted => 0,
        }
    }
}

/// Derived metrics for an attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub score: i64,
    pub max_score: i64,
    pub total_questions: usize,
    pub attempted: usize,
    pub correct: usize,
    pub incorrect: usize,
    pub unattempted: usize,
    /// Rounded percentage of all questions answered correctly, 0..=100
    pub accuracy_percent: u8,
}

/// Verdict for a single answer slot
pub fn verdict(answer: Option<usize>, correct_index: usize) -> Verdict {
    match answer {
        None => Verdict::Unattempted,
        Some(a) if a == correct_index => Verdict::Correct,
        Some(_) => Verdict::Incorrect,
    }
}

/// Per-question verdicts in question order
pub fn verdicts(session: &QuizSession) -> Vec<Verdict> {
    session
        .questions()
        .iter()
        .zip(session.answers())
        .map(|(q, a)| verdict(*a, q.correct_index))
        .collect()
}

/// `round(100 * correct / total)`, 0 when there are no questions
pub fn accuracy_percent(correct: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let pct = (100.0 * correct as f64 / total as f64).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Score an attempt
pub fn score(session: &QuizSession) -> ScoreCard {
    let total_questions = session.len();
    let mut score = 0;
    let mut correct = 0;
    let mut attempted = 0;

    for v in verdicts(session) {
        score += v.marks();
        match v {
            Verdict::Correct => {
                correct += 1;
                attempted += 1;
            }
            Verdict::Incorrect => attempted += 1,
            Verdict::Unattempted => {}
        }
    }

    ScoreCard {
        score,
        max_score: MARKS_CORRECT * total_questions as i64,
        total_questions,
        attempted,
        correct,
        incorrect: attempted - correct,
        unattempted: total_questions - attempted,
        accuracy_percent: accuracy_percent(correct, total_questions),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::model::{Subject, TestType, fixtures};
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn session_with(answers: &[Option<usize>]) -> QuizSession {
        let mut s =
            QuizSession::new(fixtures::questions(answers.len()), Subject::Biology, TestType::Mixed)
                .unwrap();
        for (i, a) in answers.iter().enumerate() {
            s.go_to(i).unwrap();
            if let Some(a) = a {
                s.record_answer(*a).unwrap();
            }
        }
        s
    }

    #[test]
    fn mixed_answers_score_with_negative_marking() {
        // option 0 is correct everywhere
        let s = session_with(&[Some(0), Some(2), Some(0), None, Some(0)]);
        assert_eq!(
            score(&s),
            ScoreCard {
                score: 11,
                max_score: 20,
                total_questions: 5,
                attempted: 4,
                correct: 3,
                incorrect: 1,
                unattempted: 1,
                accuracy_percent: 60,
            }
        );
    }

    #[test]
    fn nothing_answered_scores_zero() {
        let s = session_with(&[None; 90]);
        let card = score(&s);
        assert_eq!(card.score, 0);
        assert_eq!(card.accuracy_percent, 0);
        assert_eq!(card.unattempted, 90);
    }

    #[test]
    fn all_correct_scores_maximum() {
        let s = session_with(&[Some(0); 90]);
        let card = score(&s);
        assert_eq!(card.score, 360);
        assert_eq!(card.max_score, 360);
        assert_eq!(card.accuracy_percent, 100);
    }

    #[test]
    fn all_wrong_goes_negative() {
        let s = session_with(&[Some(1); 10]);
        assert_eq!(score(&s).score, -10);
    }

    #[test]
    fn accuracy_guards_division_by_zero() {
        assert_eq!(accuracy_percent(0, 0), 0);
        assert_eq!(accuracy_percent(1, 3), 33);
        assert_eq!(accuracy_percent(2, 3), 67);
    }

    #[test]
    fn verdicts_follow_question_order() {
        let s = session_with(&[Some(0), None, Some(3)]);
        assert_eq!(verdicts(&s), vec![Verdict::Correct, Verdict::Unattempted, Verdict::Incorrect]);
    }

    proptest! {
        #[test]
        fn score_is_pure_and_bounded(answers in prop::collection::vec(prop::option::of(0..4usize), 1..120)) {
            let mut s = session_with(&answers);
            s.finalize().unwrap();

            let first = score(&s);
            prop_assert_eq!(&first, &score(&s));
            prop_assert!(first.accuracy_percent <= 100);
            prop_assert_eq!(first.attempted, answers.iter().flatten().count());
            prop_assert_eq!(first.correct + first.incorrect + first.unattempted, answers.len());
            prop_assert_eq!(first.score, 4 * first.correct as i64 - first.incorrect as i64);
        }
    }
}
