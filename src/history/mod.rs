//! Test history: finished attempts and their persistence

pub mod result;
pub mod store;

pub use result::TestResult;
pub use store::{ResultStore, SubjectStats};
