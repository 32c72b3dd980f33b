//! NEETHub - A terminal exam-practice app for NEET aspirants
//!
//! NEETHub runs timed mock tests with NEET marking (+4 / -1 / 0), keeps a
//! local history of attempts, and generates NCERT-grounded questions with
//! Claude.

pub mod app;
pub mod catalog;
pub mod claude;
pub mod config;
pub mod history;
pub mod quiz;
pub mod supply;
pub mod theme;
pub mod ui;

pub use app::{App, SupplySource};
pub use config::Config;
pub use history::{ResultStore, TestResult};
pub use quiz::{QuizSession, Subject, TestType};
pub use theme::Theme;
