//! Flashcards and spaced repetition
//!
//! This module provides:
//! - Deck management (optionally scoped to a course)
//! - Flashcard CRUD, manual or generated from documents
//! - SM-2 spaced repetition algorithm
//! - Review state tracking
//! - Anki plain-text export

pub mod algorithm;
pub mod anki;
pub mod models;
pub mod storage;

pub use anki::{export_anki, AnkiCard};
pub use models::*;
pub use storage::{FlashcardStorage, FlashcardStorageError};
