//! Core of the studyhub study assistant.
//!
//! Every store here is an ordinary value: construct it, own it, pass it
//! where it is needed. Share across threads with `Arc<Mutex<_>>`.

pub mod chat;
pub mod config;
pub mod flashcards;
pub mod focus;
pub mod gamification;
pub mod grades;

pub use grades::{score_to_grade, Grade, GradeError, QuizScore};
