pub mod card;
pub mod deck;
pub mod export;
pub mod focus;
pub mod grade;
pub mod progress;
pub mod review;
