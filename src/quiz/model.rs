//! Question and enumeration types shared by the quiz engine

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of options every question carries
pub const OPTION_COUNT: usize = 4;

/// Exam subject
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subject {
    #[default]
    Biology,
    Physics,
    Chemistry,
}

impl Subject {
    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::Biology => "Biology",
            Self::Physics => "Physics",
            Self::Chemistry => "Chemistry",
        }
    }

    /// Single-letter badge used in history listings
    pub fn badge(&self) -> char {
        match self {
            Self::Biology => 'B',
            Self::Physics => 'P',
            Self::Chemistry => 'C',
        }
    }

    /// Parse a subject from user input (case-insensitive, accepts short forms)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "biology" | "bio" | "b" => Some(Self::Biology),
            "physics" | "phy" | "p" => Some(Self::Physics),
            "chemistry" | "chem" | "c" => Some(Self::Chemistry),
            _ => None,
        }
    }

    /// All subjects in display order
    pub fn all() -> &'static [Subject] {
        &[Self::Biology, Self::Physics, Self::Chemistry]
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown subject: {}. Options: biology, physics, chemistry", s))
    }
}

/// Kind of mock test
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestType {
    ChapterWise,
    #[default]
    Mixed,
    StatementBased,
    Pyq,
}

impl TestType {
    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::ChapterWise => "Chapter-wise",
            Self::Mixed => "Mixed Practice",
            Self::StatementBased => "Statement Based",
            Self::Pyq => "PYQ Marathon",
        }
    }

    /// Identifier sent to the question generator
    pub fn wire_name(&self) -> &'static str {
        match self {
            Self::ChapterWise => "CHAPTER_WISE",
            Self::Mixed => "MIXED",
            Self::StatementBased => "STATEMENT_BASED",
            Self::Pyq => "PYQ",
        }
    }

    /// Parse a test type from user input
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace(['-', '_'], "").as_str() {
            "chapterwise" | "chapter" => Some(Self::ChapterWise),
            "mixed" | "full" => Some(Self::Mixed),
            "statementbased" | "statement" => Some(Self::StatementBased),
            "pyq" => Some(Self::Pyq),
            _ => None,
        }
    }
}

impl fmt::Display for TestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TestType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
            .ok_or_else(|| format!("Unknown test type: {}. Options: chapter, mixed, statement, pyq", s))
    }
}

/// A single multiple-choice question
///
/// Questions are immutable once built. The only way to obtain one from an
/// external payload is [`RawQuestion::validate`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    #[serde(rename = "question")]
    pub text: String,
    pub options: [String; OPTION_COUNT],
    #[serde(rename = "correctAnswer")]
    pub correct_index: usize,
    pub explanation: String,
    #[serde(rename = "ncertReference")]
    pub reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u16>,
    #[serde(rename = "type")]
    pub test_type: TestType,
    pub chapter: String,
    pub subject: Subject,
}

impl Question {
    /// Letter label for an option index (0 -> 'A')
    pub fn option_letter(index: usize) -> char {
        (b'A' + (index % 26) as u8) as char
    }

    /// Text of the correct option, if the index is in range
    pub fn correct_option(&self) -> Option<&str> {
        self.options.get(self.correct_index).map(String::as_str)
    }
}

/// Untrusted question payload as produced by a question generator
///
/// Every field is optional so that a malformed item can be reported and
/// skipped instead of failing the whole batch.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    pub id: Option<String>,
    pub question: Option<String>,
    #[serde(default)]
    pub options: Vec<String>,
    pub correct_answer: Option<i64>,
    pub explanation: Option<String>,
    pub ncert_reference: Option<String>,
    pub year: Option<i64>,
    pub chapter: Option<String>,
}

/// Why a raw question was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidQuestion {
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    #[error("expected {OPTION_COUNT} options, got {0}")]
    OptionCount(usize),

    #[error("correct answer index {0} is outside 0..{OPTION_COUNT}")]
    AnswerOutOfRange(i64),
}

fn required(value: Option<String>, field: &'static str) -> Result<String, InvalidQuestion> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(InvalidQuestion::MissingField(field)),
    }
}

impl RawQuestion {
    /// Check structure and build a [`Question`]
    ///
    /// Subject and test type come from the request, not from the payload.
    pub fn validate(self, subject: Subject, test_type: TestType) -> Result<Question, InvalidQuestion> {
        let id = required(self.id, "id")?;
        let text = required(self.question, "question")?;

        let options: [String; OPTION_COUNT] = self
            .options
            .try_into()
            .map_err(|opts: Vec<String>| InvalidQuestion::OptionCount(opts.len()))?;

        let correct = self.correct_answer.ok_or(InvalidQuestion::MissingField("correctAnswer"))?;
        if !(0..OPTION_COUNT as i64).contains(&correct) {
            return Err(InvalidQuestion::AnswerOutOfRange(correct));
        }

        Ok(Question {
            id,
            text,
            options,
            correct_index: correct as usize,
            explanation: required(self.explanation, "explanation")?,
            reference: required(self.ncert_reference, "ncertReference")?,
            year: self.year.and_then(|y| u16::try_from(y).ok()),
            test_type,
            chapter: required(self.chapter, "chapter")?,
            subject,
        })
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn raw() -> RawQuestion {
        RawQuestion {
            id: Some("q1".into()),
            question: Some("Which organelle is the powerhouse of the cell?".into()),
            options: vec!["Nucleus".into(), "Mitochondria".into(), "Ribosome".into(), "Golgi".into()],
            correct_answer: Some(1),
            explanation: Some("ATP synthesis".into()),
            ncert_reference: Some("XI Ch 8".into()),
            year: Some(2019),
            chapter: Some("Cell: Unit of Life".into()),
        }
    }

    #[test]
    fn subject_parse() {
        assert_eq!(Subject::parse("bio"), Some(Subject::Biology));
        assert_eq!(Subject::parse("PHYSICS"), Some(Subject::Physics));
        assert_eq!(Subject::parse("chem"), Some(Subject::Chemistry));
        assert_eq!(Subject::parse("maths"), None);
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(TestType::parse("chapter-wise"), Some(TestType::ChapterWise));
        assert_eq!(TestType::parse("STATEMENT_BASED"), Some(TestType::StatementBased));
        assert_eq!(TestType::parse("pyq"), Some(TestType::Pyq));
        assert_eq!(TestType::parse("random"), None);
    }

    #[test]
    fn enums_serialize_screaming_snake() {
        assert_eq!(serde_json::to_string(&Subject::Biology).unwrap(), "\"BIOLOGY\"");
        assert_eq!(serde_json::to_string(&TestType::ChapterWise).unwrap(), "\"CHAPTER_WISE\"");
    }

    #[test]
    fn valid_raw_question_is_stamped_with_request_fields() {
        let q = raw().validate(Subject::Physics, TestType::Pyq).unwrap();
        assert_eq!(q.correct_index, 1);
        assert_eq!(q.subject, Subject::Physics);
        assert_eq!(q.test_type, TestType::Pyq);
        assert_eq!(q.year, Some(2019));
    }

    #[test]
    fn wrong_option_count_is_rejected() {
        let mut r = raw();
        r.options.pop();
        assert_eq!(r.validate(Subject::Biology, TestType::Mixed), Err(InvalidQuestion::OptionCount(3)));
    }

    #[test]
    fn answer_index_out_of_range_is_rejected() {
        let mut r = raw();
        r.correct_answer = Some(4);
        assert_eq!(
            r.validate(Subject::Biology, TestType::Mixed),
            Err(InvalidQuestion::AnswerOutOfRange(4))
        );

        let mut r = raw();
        r.correct_answer = Some(-1);
        assert!(r.validate(Subject::Biology, TestType::Mixed).is_err());
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut r = raw();
        r.explanation = Some("   ".into());
        assert_eq!(
            r.validate(Subject::Biology, TestType::Mixed),
            Err(InvalidQuestion::MissingField("explanation"))
        );
    }

    #[test]
    fn raw_question_deserializes_from_generator_json() {
        let json = r#"{
            "id": "x",
            "question": "Q?",
            "options": ["a", "b", "c", "d"],
            "correctAnswer": 3,
            "explanation": "e",
            "ncertReference": "r",
            "chapter": "Ray Optics",
            "subject": "ignored"
        }"#;
        let r: RawQuestion = serde_json::from_str(json).unwrap();
        let q = r.validate(Subject::Physics, TestType::Mixed).unwrap();
        assert_eq!(q.correct_index, 3);
        assert_eq!(q.year, None);
    }

    #[test]
    fn option_letters() {
        assert_eq!(Question::option_letter(0), 'A');
        assert_eq!(Question::option_letter(3), 'D');
    }

    #[test]
    fn correct_option_is_bounds_checked() {
        assert_eq!(fixtures::question(0, 2).correct_option(), Some("Option C"));
        assert_eq!(fixtures::question(0, 7).correct_option(), None);
    }
}
