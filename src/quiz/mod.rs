//! Quiz engine: questions, the attempt lifecycle, scoring and the countdown

pub mod model;
pub mod scoring;
pub mod session;
pub mod timer;

pub use model::{InvalidQuestion, OPTION_COUNT, Question, RawQuestion, Subject, TestType};
pub use scoring::{ScoreCard, Verdict, score};
pub use session::{Advance, QuizSession, SessionError};
pub use timer::{Countdown, CountdownHandle};
